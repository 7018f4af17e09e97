use super::IntegrationHarness;
use anyhow::Result;
use assemblyinsight::records::{CollectionSession, JoinSource, LoadIssueReason, RecordSource};
use assemblyinsight::render::{PageTemplate, SiteBuilder};
use assemblyinsight::site::NamingScheme;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn seed_collections(dir: &Path) {
    let policy = json!([
        {
            "naas_cd": "M100",
            "name": "이몽룡",
            "ai_summary": "민생 법안 중심의 의정 활동",
            "analysis_stats": { "passed": 4, "reflected": 2, "pending": 3, "failed": 1, "total": 10, "achievement_rate": 60.0 }
        },
        { "naas_cd": "M999", "name": "짝없는의원" },
        { "name": "코드없는의원" }
    ]);
    let members = json!([
        {
            "NAAS_CD": "M100",
            "NAAS_NM": "이몽룡",
            "CURR_PLPT_NM": "더불어민주당",
            "CURR_ELECD_NM": "남원시",
            "PHOTO_PATH": "/photos/M100.jpg"
        },
        { "NAAS_CD": "M500", "NAAS_NM": "관계없는의원" }
    ]);
    fs::write(
        dir.join("members_policy.json"),
        serde_json::to_vec_pretty(&policy).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.join("members.json"),
        serde_json::to_vec_pretty(&members).unwrap(),
    )
    .unwrap();
}

#[test]
fn composes_policy_docs_with_profiles() -> Result<()> {
    let store = TempDir::new()?;
    seed_collections(store.path());
    let source = JoinSource::new(CollectionSession::open(store.path())?);
    let batch = source.load()?;

    assert_eq!(batch.scanned, 3);
    assert_eq!(batch.records.len(), 1);
    // The policy doc without a profile is dropped, not an error.
    assert_eq!(batch.dropped_unmatched, 1);
    assert_eq!(batch.issues.len(), 1);
    assert_eq!(batch.issues[0].reason, LoadIssueReason::MissingIdentifier);

    let record = &batch.records[0];
    assert_eq!(record.id, "M100");
    assert_eq!(record.name, "이몽룡");
    assert_eq!(record.party_name, "더불어민주당");
    assert_eq!(record.region_name, "남원시");
    assert_eq!(record.achievement_rate, 60.0);
    assert_eq!(record.ai_summary, "민생 법안 중심의 의정 활동");
    Ok(())
}

#[test]
fn unreachable_collection_store_is_fatal() -> Result<()> {
    let tmp = TempDir::new()?;
    let missing = tmp.path().join("no-such-store");
    assert!(CollectionSession::open(&missing).is_err());
    Ok(())
}

#[test]
fn join_mode_writes_name_keyed_pages() -> Result<()> {
    let harness = IntegrationHarness::new();
    let manager = harness.site_manager();
    let store = harness.workspace_path().join("store");
    fs::create_dir_all(&store)?;
    seed_collections(&store);

    let out_dir = harness.workspace_path().join("pages");
    let builder = SiteBuilder::new(
        &manager,
        PageTemplate::from_raw("<h1>{{MEMBER_NAME}}</h1><p>{{PARTY_NAME}}</p>"),
        &out_dir,
        NamingScheme::DisplayName,
    );
    let outcome = builder.run(&JoinSource::new(CollectionSession::open(&store)?))?;

    assert_eq!(outcome.summary.rendered, 1);
    let page = fs::read_to_string(out_dir.join("이몽룡.html"))?;
    assert!(page.contains("더불어민주당"));
    Ok(())
}
