use assemblyinsight::detail::page::{
    data_not_found_markup, render_bill_rows, render_mention_tags, render_news_list, strip_tags,
    youtube_video_id, BILL_CAP, NEWS_CAP,
};
use assemblyinsight::detail::{
    classify_outcome, collect_mentions, display_result, rank_co_mentions, BillItem, BillOutcome,
    BoundedList, MemberDetailDoc, MentionEmphasis, NewsItem, OutcomeDonut, TrendLine, MENTION_CAP,
};
use assemblyinsight::export::{CohortTrend, NewsTrend, PolicyStats};
use serde_json::json;

#[test]
fn outcome_matches_by_substring_not_exact_value() {
    assert_eq!(classify_outcome(Some("원안가결")), BillOutcome::Passed);
    assert_eq!(classify_outcome(Some("수정가결")), BillOutcome::Passed);
    // Other substrings may be present; containment decides the tier.
    assert_eq!(classify_outcome(Some("본회의 가결 (폐기 대체)")), BillOutcome::Passed);
    assert_eq!(classify_outcome(Some("대안반영폐기")), BillOutcome::Reflected);
    assert_eq!(classify_outcome(Some("폐기")), BillOutcome::Failed);
    assert_eq!(classify_outcome(Some("철회")), BillOutcome::Failed);
    assert_eq!(classify_outcome(Some("계류")), BillOutcome::Pending);
    assert_eq!(classify_outcome(Some("")), BillOutcome::Pending);
    assert_eq!(classify_outcome(None), BillOutcome::Pending);
}

#[test]
fn display_result_falls_back_to_pending_label() {
    assert_eq!(display_result(Some("원안가결")), "원안가결");
    assert_eq!(display_result(Some("  ")), "계류");
    assert_eq!(display_result(None), "계류");
}

#[test]
fn bounded_list_caps_then_expands_in_place() {
    let items: Vec<usize> = (0..15).collect();
    let mut list = BoundedList::new(items, 10);

    assert_eq!(list.visible().len(), 10);
    assert_eq!(list.hidden_count(), 5);
    assert!(list.has_more());
    let control = list.render_expand_control("더보기").unwrap();
    assert!(control.contains("5건"));

    list.expand();
    assert_eq!(list.visible().len(), 15);
    assert!(!list.has_more());
    assert!(list.render_expand_control("더보기").is_none());
}

#[test]
fn bounded_list_shorter_than_cap_shows_everything() {
    let list = BoundedList::new(vec![1, 2, 3], 10);
    assert_eq!(list.visible().len(), 3);
    assert!(!list.has_more());
    assert!(list.render_expand_control("더보기").is_none());
}

#[test]
fn news_list_renders_only_the_visible_slice() {
    let news: Vec<NewsItem> = (0..12)
        .map(|i| NewsItem {
            title: format!("기사 <b>{i}</b>"),
            ..NewsItem::default()
        })
        .collect();
    let list = BoundedList::new(news, NEWS_CAP);
    let html = render_news_list(&list);
    assert_eq!(html.matches("news-item").count(), NEWS_CAP);
    // Markup embedded in feed titles is stripped before escaping.
    assert!(!html.contains("<b>"));
}

#[test]
fn mentions_rank_by_count_with_stable_ties() {
    let mut stream = Vec::new();
    stream.extend(std::iter::repeat("B").take(5));
    stream.extend(std::iter::repeat("C").take(3));
    // D and E tie; D is encountered first.
    stream.extend(["D", "E", "D", "E"]);
    stream.push("A"); // self, excluded

    let tags = rank_co_mentions(stream, "A", MENTION_CAP);
    let order: Vec<&str> = tags.iter().map(|t| t.member_id.as_str()).collect();
    assert_eq!(order, vec!["B", "C", "D", "E"]);
    assert_eq!(tags[0].count, 5);
    assert_eq!(tags[1].count, 3);
}

#[test]
fn mentions_keep_top_ten_with_emphasis_tiers() {
    // 12 distinct ids with descending counts 12, 11, ..., 1.
    let mut stream = Vec::new();
    let ids: Vec<String> = (0..12).map(|i| format!("M{i:02}")).collect();
    for (index, id) in ids.iter().enumerate() {
        for _ in 0..(12 - index) {
            stream.push(id.clone());
        }
    }
    let tags = rank_co_mentions(stream, "SELF", MENTION_CAP);
    assert_eq!(tags.len(), 10);
    assert_eq!(tags[0].emphasis, MentionEmphasis::Primary);
    assert_eq!(tags[1].emphasis, MentionEmphasis::Strong);
    assert_eq!(tags[3].emphasis, MentionEmphasis::Strong);
    assert_eq!(tags[4].emphasis, MentionEmphasis::Normal);
    assert_eq!(tags[9].emphasis, MentionEmphasis::Normal);

    let html = render_mention_tags(&tags);
    assert_eq!(html.matches("tag-primary").count(), 1);
    assert_eq!(html.matches("tag-strong").count(), 3);
}

#[test]
fn donut_carries_total_in_center_label() {
    let stats = PolicyStats {
        passed: 4,
        reflected: 2,
        pending: 5,
        failed: 1,
        total: 12,
        achievement_rate: 50.0,
    };
    let donut = OutcomeDonut::from_stats(&stats);
    assert_eq!(donut.labels, ["가결", "반영", "계류", "실패"]);
    assert_eq!(donut.data, [4, 2, 5, 1]);
    assert_eq!(donut.center_label, "총 12건");
}

#[test]
fn trend_line_attaches_cohort_only_when_days_align() {
    let member = NewsTrend {
        labels: vec!["03-09".into(), "03-10".into()],
        data: vec![1, 2],
    };
    let aligned = CohortTrend {
        labels: vec!["03-09".into(), "03-10".into()],
        data: vec![0.5, 1.5],
    };
    let misaligned = CohortTrend {
        labels: vec!["03-01".into(), "03-02".into()],
        data: vec![3.0, 4.0],
    };
    assert!(TrendLine::new(&member, Some(&aligned)).cohort.is_some());
    assert!(TrendLine::new(&member, Some(&misaligned)).cohort.is_none());
    assert!(TrendLine::new(&member, None).cohort.is_none());
}

#[test]
fn video_id_comes_from_the_watch_url() {
    assert_eq!(
        youtube_video_id("https://www.youtube.com/watch?v=abc123&t=10"),
        Some("abc123")
    );
    assert_eq!(youtube_video_id("https://youtu.be/short"), None);
}

#[test]
fn strip_tags_removes_feed_markup() {
    assert_eq!(strip_tags("<b>속보</b> 본회의 통과"), "속보 본회의 통과");
}

#[test]
fn bill_rows_carry_outcome_badges() {
    let bills = vec![
        BillItem {
            bill_name: "반도체특별법".into(),
            bill_id: Some("BILL001".into()),
            proc_result: Some("원안가결".into()),
            propose_dt: Some("2025-03-01T00:00:00".into()),
        },
        BillItem {
            bill_name: "계류중인법".into(),
            ..BillItem::default()
        },
    ];
    let list = BoundedList::new(bills, BILL_CAP);
    let html = render_bill_rows(&list);
    assert!(html.contains("bg-blue-600"));
    assert!(html.contains("billId=BILL001"));
    assert!(html.contains("2025-03-01"));
    // The missing result falls back to the pending badge and label.
    assert!(html.contains("bg-slate-100"));
    assert!(html.contains("계류"));
}

#[test]
fn fetched_document_parses_even_when_sections_are_missing() {
    let doc = json!({
        "profile": { "NAAS_CD": "A01", "NAAS_NM": "홍길동" },
        "analysis": {
            "ai_policy_summary": "산업 정책에 집중",
            "policy_stats": { "passed": 1, "reflected": 0, "pending": 2, "failed": 0, "total": 3, "achievement_rate": 33.3 },
            "trend_news": { "labels": ["03-09", "03-10"], "data": [1, 2] }
        },
        "recent_news": [
            { "title": "기사", "pubDate": "2025-03-10T09:00:00", "related_members": ["A01", "B02"] }
        ]
    });
    let detail: MemberDetailDoc = serde_json::from_value(doc).unwrap();
    assert_eq!(detail.analysis.ai_policy_summary.as_deref(), Some("산업 정책에 집중"));
    assert_eq!(detail.analysis.policy_stats.unwrap().total, 3);
    assert_eq!(detail.recent_news.len(), 1);
    assert_eq!(detail.recent_news[0].related_members, vec!["A01", "B02"]);
    // Absent sections read as empty, not as parse failures.
    assert!(detail.recent_bills.is_empty());
    assert!(detail.recent_videos.is_empty());

    // Co-mentions harvested from the fetched news exclude the member itself.
    let tags = rank_co_mentions(collect_mentions(&detail.recent_news), "A01", MENTION_CAP);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].member_id, "B02");

    let fallback = data_not_found_markup();
    assert!(fallback.contains("데이터를 찾을 수 없습니다"));
}
