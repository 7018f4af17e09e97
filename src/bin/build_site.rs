use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use assemblyinsight::records::{CollectionSession, FileScanSource, JoinSource};
use assemblyinsight::render::{PageTemplate, SiteBuilder};
use assemblyinsight::site::{NamingScheme, SiteManager, SourceMode};

fn main() -> Result<()> {
    let manager = SiteManager::new()?;
    let args = CliArgs::parse()?;

    let mode = args.mode.unwrap_or(manager.config.build.source_mode);
    let naming = args
        .naming
        .unwrap_or_else(|| manager.effective_naming(mode));
    let layout = manager.layout();
    let template_path = args
        .template
        .unwrap_or_else(|| layout.detail_template());
    let output_dir = args
        .output
        .unwrap_or_else(|| manager.paths.details_dir.clone());

    let template = PageTemplate::load(&template_path)?;
    let builder = SiteBuilder::new(&manager, template, output_dir, naming);

    let outcome = match mode {
        SourceMode::Files => {
            let data_dir = args
                .data_dir
                .unwrap_or_else(|| manager.paths.data_export_dir.clone());
            builder.run(&FileScanSource::new(data_dir))?
        }
        SourceMode::Join => {
            let store_root = args
                .collections
                .unwrap_or_else(|| manager.paths.collections_dir.clone());
            let session = CollectionSession::open(store_root)?;
            builder.run(&JoinSource::new(session))?
        }
    };

    println!("{}", outcome.summary.describe_for_console());
    for issue in &outcome.summary.issues {
        println!("  {:?} {}: {}", issue.reason, issue.subject, issue.message);
    }
    Ok(())
}

struct CliArgs {
    mode: Option<SourceMode>,
    naming: Option<NamingScheme>,
    data_dir: Option<PathBuf>,
    collections: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut parsed = Self {
            mode: None,
            naming: None,
            data_dir: None,
            collections: None,
            template: None,
            output: None,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" => {
                    let value = args.next().context("Expected files|join after --mode")?;
                    parsed.mode = Some(match value.as_str() {
                        "files" => SourceMode::Files,
                        "join" => SourceMode::Join,
                        other => bail!("Unknown mode {other:?}; expected files or join"),
                    });
                }
                "--by-id" => parsed.naming = Some(NamingScheme::MemberId),
                "--by-name" => parsed.naming = Some(NamingScheme::DisplayName),
                "--data-dir" => {
                    let value = args.next().context("Expected a path after --data-dir")?;
                    parsed.data_dir = Some(PathBuf::from(value));
                }
                "--collections" => {
                    let value = args.next().context("Expected a path after --collections")?;
                    parsed.collections = Some(PathBuf::from(value));
                }
                "--template" => {
                    let value = args.next().context("Expected a path after --template")?;
                    parsed.template = Some(PathBuf::from(value));
                }
                "--output" => {
                    let value = args.next().context("Expected a path after --output")?;
                    parsed.output = Some(PathBuf::from(value));
                }
                other => bail!("Unknown argument {other:?}"),
            }
        }
        Ok(parsed)
    }
}
