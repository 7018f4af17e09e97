use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use assemblyinsight::export::InsightExporter;
use assemblyinsight::records::CollectionSession;
use assemblyinsight::site::SiteManager;
use chrono::Local;

fn main() -> Result<()> {
    let manager = SiteManager::new()?;
    let args = CliArgs::parse()?;

    let store_root = args
        .collections
        .unwrap_or_else(|| manager.paths.collections_dir.clone());
    let out_dir = args
        .out
        .unwrap_or_else(|| manager.paths.data_export_dir.clone());

    let session = CollectionSession::open(store_root)?;
    let exporter = InsightExporter::new(&manager, session, out_dir, Local::now().date_naive());
    let summary = exporter.run()?;

    println!("{}", summary.describe_for_console());
    for issue in &summary.issues {
        println!("  {}: {}", issue.subject, issue.message);
    }
    Ok(())
}

struct CliArgs {
    collections: Option<PathBuf>,
    out: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut parsed = Self {
            collections: None,
            out: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--collections" => {
                    let value = args.next().context("Expected a path after --collections")?;
                    parsed.collections = Some(PathBuf::from(value));
                }
                "--out" => {
                    let value = args.next().context("Expected a path after --out")?;
                    parsed.out = Some(PathBuf::from(value));
                }
                other => bail!("Unknown argument {other:?}"),
            }
        }
        Ok(parsed)
    }
}
