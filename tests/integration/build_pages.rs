use super::IntegrationHarness;
use anyhow::Result;
use assemblyinsight::orchestration::{EventType, SiteLog};
use assemblyinsight::records::FileScanSource;
use assemblyinsight::render::{
    contains_unresolved_tokens, BuildIssueReason, PageTemplate, SiteBuilder,
};
use assemblyinsight::site::{
    load_or_default, save, AppConfig, NamingScheme, SourceMode, FALLBACK_PARTY, FALLBACK_REGION,
    FALLBACK_SUMMARY,
};
use serde_json::json;
use std::fs;
use std::path::Path;

const TEMPLATE: &str = "<html><head><title>{{MEMBER_NAME}}</title></head>\
<body data-id=\"{{MEMBER_ID}}\"><h1>{{MEMBER_NAME}}</h1>\
<span>{{PARTY_NAME}}</span><span>{{REGION_NAME}}</span>\
<img src=\"{{PHOTO_PATH}}\"/><em>{{ACHIEVEMENT_RATE}}%</em>\
<section>{{AI_SUMMARY}}</section></body></html>";

fn write_member(dir: &Path, id: &str, name: &str, party: Option<&str>) {
    let mut profile = json!({ "NAAS_CD": id, "NAAS_NM": name, "PHOTO_PATH": format!("/photos/{id}.jpg") });
    if let Some(party) = party {
        profile["CURR_PLPT_NM"] = json!(party);
        profile["CURR_ELECD_NM"] = json!("서울 종로구");
    }
    let doc = json!({
        "profile": profile,
        "analysis": {
            "ai_policy_summary": "민생 법안 중심의 의정 활동",
            "policy_stats": { "passed": 3, "reflected": 1, "pending": 2, "failed": 0, "total": 6, "achievement_rate": 66.7 }
        }
    });
    fs::write(
        dir.join(format!("{id}.json")),
        serde_json::to_vec_pretty(&doc).unwrap(),
    )
    .unwrap();
}

#[test]
fn renders_one_page_per_member_with_no_leftover_tokens() -> Result<()> {
    let harness = IntegrationHarness::new();
    let manager = harness.site_manager();
    let data_dir = harness.workspace_path().join("export_src");
    fs::create_dir_all(&data_dir)?;
    write_member(&data_dir, "M001", "홍길동", Some("정의당"));
    write_member(&data_dir, "M002", "성춘향", Some("더불어민주당"));
    // Aggregate files must not be scanned as members.
    fs::write(data_dir.join("members_all.json"), b"[]")?;
    fs::write(data_dir.join("cohort_trend.json"), b"{}")?;

    let out_dir = harness.workspace_path().join("pages");
    let builder = SiteBuilder::new(
        &manager,
        PageTemplate::from_raw(TEMPLATE),
        &out_dir,
        NamingScheme::MemberId,
    );
    let outcome = builder.run(&FileScanSource::new(&data_dir))?;

    assert_eq!(outcome.summary.scanned, 2);
    assert_eq!(outcome.summary.rendered, 2);
    assert_eq!(outcome.summary.failed, 0);

    let page = fs::read_to_string(out_dir.join("M001.html"))?;
    assert!(!contains_unresolved_tokens(&page));
    // Both occurrences of the repeated name token are substituted.
    assert_eq!(page.matches("홍길동").count(), 2);
    assert!(page.contains("66.7%"));
    assert!(out_dir.join("M002.html").exists());

    assert_eq!(outcome.manifest.outputs.len(), 2);
    for output in &outcome.manifest.outputs {
        assert_eq!(output.content_hash.len(), 64);
    }
    let events = SiteLog::for_workspace(&manager.paths).read_events()?;
    assert!(events
        .iter()
        .any(|e| e.event_type == EventType::BuildStarted));
    assert!(events
        .iter()
        .any(|e| e.event_type == EventType::BuildCompleted));
    Ok(())
}

#[test]
fn malformed_file_is_skipped_not_fatal() -> Result<()> {
    let harness = IntegrationHarness::new();
    let manager = harness.site_manager();
    let data_dir = harness.workspace_path().join("export_src");
    fs::create_dir_all(&data_dir)?;
    write_member(&data_dir, "M001", "홍길동", Some("정의당"));
    fs::write(data_dir.join("broken.json"), b"not-json{{")?;

    let out_dir = harness.workspace_path().join("pages");
    let builder = SiteBuilder::new(
        &manager,
        PageTemplate::from_raw(TEMPLATE),
        &out_dir,
        NamingScheme::MemberId,
    );
    let outcome = builder.run(&FileScanSource::new(&data_dir))?;

    assert_eq!(outcome.summary.rendered, 1);
    assert_eq!(outcome.summary.skipped, 1);
    let issue = &outcome.summary.issues[0];
    assert_eq!(issue.reason, BuildIssueReason::ParseFailure);
    assert_eq!(issue.subject, "broken.json");

    let html_files = fs::read_dir(&out_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .count();
    assert_eq!(html_files, 1);
    Ok(())
}

#[test]
fn missing_optional_fields_render_fallbacks() -> Result<()> {
    let harness = IntegrationHarness::new();
    let manager = harness.site_manager();
    let data_dir = harness.workspace_path().join("export_src");
    fs::create_dir_all(&data_dir)?;
    // Profile with only the required code and a name.
    let doc = json!({ "profile": { "NAAS_CD": "M003", "NAAS_NM": "김철수" } });
    fs::write(data_dir.join("M003.json"), serde_json::to_vec(&doc)?)?;

    let out_dir = harness.workspace_path().join("pages");
    let builder = SiteBuilder::new(
        &manager,
        PageTemplate::from_raw(TEMPLATE),
        &out_dir,
        NamingScheme::MemberId,
    );
    builder.run(&FileScanSource::new(&data_dir))?;

    let page = fs::read_to_string(out_dir.join("M003.html"))?;
    assert!(page.contains(FALLBACK_PARTY));
    assert!(page.contains(FALLBACK_REGION));
    assert!(page.contains(FALLBACK_SUMMARY));
    assert!(page.contains("0%"));
    assert!(!page.contains("null"));
    assert!(!contains_unresolved_tokens(&page));
    Ok(())
}

#[test]
fn record_without_identifier_is_skipped() -> Result<()> {
    let harness = IntegrationHarness::new();
    let manager = harness.site_manager();
    let data_dir = harness.workspace_path().join("export_src");
    fs::create_dir_all(&data_dir)?;
    let doc = json!({ "profile": { "NAAS_NM": "무명씨" } });
    fs::write(data_dir.join("anonymous.json"), serde_json::to_vec(&doc)?)?;

    let out_dir = harness.workspace_path().join("pages");
    let builder = SiteBuilder::new(
        &manager,
        PageTemplate::from_raw(TEMPLATE),
        &out_dir,
        NamingScheme::MemberId,
    );
    let outcome = builder.run(&FileScanSource::new(&data_dir))?;

    assert_eq!(outcome.summary.rendered, 0);
    assert_eq!(outcome.summary.skipped, 1);
    assert_eq!(
        outcome.summary.issues[0].reason,
        BuildIssueReason::MissingIdentifier
    );
    Ok(())
}

#[test]
fn display_name_collision_is_flagged_not_fixed() -> Result<()> {
    let harness = IntegrationHarness::new();
    let manager = harness.site_manager();
    let data_dir = harness.workspace_path().join("export_src");
    fs::create_dir_all(&data_dir)?;
    write_member(&data_dir, "M010", "김철수", Some("정의당"));
    write_member(&data_dir, "M011", "김철수", Some("국민의힘"));

    let out_dir = harness.workspace_path().join("pages");
    let builder = SiteBuilder::new(
        &manager,
        PageTemplate::from_raw(TEMPLATE),
        &out_dir,
        NamingScheme::DisplayName,
    );
    let outcome = builder.run(&FileScanSource::new(&data_dir))?;

    // Both records render, into the same file; the collision is surfaced.
    assert_eq!(outcome.summary.rendered, 2);
    assert!(out_dir.join("김철수.html").exists());
    assert!(outcome
        .summary
        .issues
        .iter()
        .any(|issue| issue.reason == BuildIssueReason::DuplicateOutputName));
    // Files are enumerated in sorted order, so the later record wins.
    let page = fs::read_to_string(out_dir.join("김철수.html"))?;
    assert!(page.contains("국민의힘"));
    Ok(())
}

#[test]
fn config_round_trips_through_the_workspace() -> Result<()> {
    let _harness = IntegrationHarness::new();
    let defaults = AppConfig::default();
    assert_eq!(
        defaults.build.effective_naming(SourceMode::Join),
        NamingScheme::DisplayName
    );

    let mut config = AppConfig::default();
    config.build.source_mode = SourceMode::Join;
    config.build.naming = Some(NamingScheme::MemberId);
    save(&config)?;

    let loaded = load_or_default()?;
    assert_eq!(loaded.build.source_mode, SourceMode::Join);
    // An explicit naming choice overrides the mode default.
    assert_eq!(
        loaded.build.effective_naming(SourceMode::Join),
        NamingScheme::MemberId
    );
    Ok(())
}
