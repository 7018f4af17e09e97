//! Keyword frequency analysis over a member's news and video mentions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Political-domain terms excluded from keyword ranking.
pub const STOPWORDS: [&str; 22] = [
    "의원", "국회의원", "뉴스", "오늘", "기자", "정치", "국회", "지난", "오전", "오후",
    "때문", "대한", "관련", "영상", "채널", "금지", "무단", "배포", "재배포", "이번",
    "경우", "통해",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub text: String,
    pub value: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub top_keywords: Vec<String>,
    pub keyword_details: Vec<KeywordCount>,
}

/// One title/description pair; titles are weighted double when counting.
#[derive(Debug, Clone, Copy)]
pub struct WeightedText<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Ranks tokens by frequency, keeping the top `limit`.
///
/// Tokens must be longer than one character and are filtered against the
/// stopword list and the member's own name. Ties keep first-seen order.
pub fn extract_keywords<'a, I>(texts: I, member_name: &str, limit: usize) -> KeywordAnalysis
where
    I: IntoIterator<Item = WeightedText<'a>>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut tally = |text: &str, weight: usize| {
        for token in text.split(|c: char| !c.is_alphanumeric()) {
            if token.chars().count() <= 1 {
                continue;
            }
            if STOPWORDS.contains(&token) || token == member_name {
                continue;
            }
            match positions.get(token) {
                Some(&index) => counts[index].1 += weight,
                None => {
                    positions.insert(token.to_string(), counts.len());
                    counts.push((token.to_string(), weight));
                }
            }
        }
    };
    for text in texts {
        tally(text.title, 2);
        tally(text.description, 1);
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    KeywordAnalysis {
        top_keywords: counts.iter().map(|(text, _)| text.clone()).collect(),
        keyword_details: counts
            .into_iter()
            .map(|(text, value)| KeywordCount { text, value })
            .collect(),
    }
}
