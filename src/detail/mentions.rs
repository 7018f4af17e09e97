//! Cross-reference tag list of co-mentioned members.

use std::collections::HashMap;

/// Visual emphasis tier by rank: the top tag, ranks 2-4, and the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionEmphasis {
    Primary,
    Strong,
    Normal,
}

impl MentionEmphasis {
    pub fn css_class(self) -> &'static str {
        match self {
            MentionEmphasis::Primary => "tag-primary",
            MentionEmphasis::Strong => "tag-strong",
            MentionEmphasis::Normal => "tag-normal",
        }
    }

    fn for_rank(rank: usize) -> Self {
        match rank {
            0 => MentionEmphasis::Primary,
            1..=3 => MentionEmphasis::Strong,
            _ => MentionEmphasis::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentionTag {
    pub member_id: String,
    pub count: usize,
    pub emphasis: MentionEmphasis,
}

/// Tags kept after ranking.
pub const MENTION_CAP: usize = 10;

/// Ranks co-mentioned member identifiers by how often they appear.
///
/// `mentions` is the flat stream of member codes harvested from the fetched
/// news items; the member's own code is excluded. Ordering is by count
/// descending, ties in the order each code was first encountered.
pub fn rank_co_mentions<I, S>(mentions: I, self_id: &str, cap: usize) -> Vec<MentionTag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for mention in mentions {
        let code = mention.as_ref();
        if code.is_empty() || code == self_id {
            continue;
        }
        match positions.get(code) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(code.to_string(), counts.len());
                counts.push((code.to_string(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(cap);
    counts
        .into_iter()
        .enumerate()
        .map(|(rank, (member_id, count))| MentionTag {
            member_id,
            count,
            emphasis: MentionEmphasis::for_rank(rank),
        })
        .collect()
}
