use crate::commands::scan::load_document;
use crate::config::Config;
use crate::recorder::{attach_recorders, drain};
use crate::watcher::FileWatcher;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use svgsync_editor::{SyncOutcome, SyncSession};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// SVG document to watch
    pub input: PathBuf,

    /// Element ids to select after the first scan
    #[arg(short, long, value_delimiter = ',')]
    pub select: Vec<String>,
}

pub fn watch(args: WatchArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let session = SyncSession::with_options(config.sync.clone());
    let log = attach_recorders(&session);

    let records = load_document(&args.input, &config)?;
    println!(
        "👀 {} {} ({} elements)",
        "Watching".green().bold(),
        args.input.display(),
        records.len()
    );
    session.replace_document(records);

    if !args.select.is_empty() {
        let outcome = session.on_visual_selection_changed(&args.select);
        println!("   Selected [{}]: {}", args.select.join(", "), outcome);
    }
    drain(&log);

    let watcher = FileWatcher::new(&args.input)?;
    while watcher.next_change().is_some() {
        match refresh_from_disk(&session, watcher.path(), &config) {
            Ok(outcome) => {
                let state = session.state();
                let kept = matches!(
                    outcome,
                    SyncOutcome::IndexReplaced {
                        selection_reset: false
                    }
                );
                println!(
                    "{} {} elements, selection {}",
                    "↻".cyan(),
                    session.index().len(),
                    if kept && !state.selected_element_ids.is_empty() {
                        format!("kept [{}]", state.selected_element_ids.join(", ")).green()
                    } else if kept {
                        "empty".normal()
                    } else {
                        "reset".yellow()
                    }
                );
            }
            // Half-written files are common mid-save; wait for the next write
            Err(e) => println!("{} {}", "✗".red(), e),
        }

        for command in drain(&log) {
            tracing::debug!(%command, "Surface command");
        }
    }

    Ok(())
}

/// Re-scan the document and refresh the session's index
pub fn refresh_from_disk(session: &SyncSession, path: &Path, config: &Config) -> Result<SyncOutcome> {
    let records = load_document(path, config)?;
    tracing::info!(path = %path.display(), elements = records.len(), "Document re-scanned");
    Ok(session.refresh_index(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use svgsync_editor::SourceRange;
    use tempfile::TempDir;

    #[test]
    fn test_refresh_from_disk_follows_edits() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("drawing.svg");
        fs::write(&file, "<svg>\n  <rect id=\"r1\"/>\n</svg>").unwrap();

        let config = Config::default();
        let session = SyncSession::new();
        let _log = attach_recorders(&session);
        session.replace_document(load_document(&file, &config).unwrap());
        session.on_visual_selection_changed(&["r1"]);

        fs::write(&file, "<svg>\n\n  <rect id=\"r1\"/>\n</svg>").unwrap();
        let outcome = refresh_from_disk(&session, &file, &config).unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::IndexReplaced {
                selection_reset: false
            }
        );
        assert_eq!(
            session.state().selected_code_ranges,
            vec![SourceRange::new(3, 3, 3, 18)]
        );

        fs::write(&file, "<svg>\n  <rect id=\"other\"/>\n</svg>").unwrap();
        let outcome = refresh_from_disk(&session, &file, &config).unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::IndexReplaced {
                selection_reset: true
            }
        );
    }

    #[test]
    fn test_broken_save_keeps_old_index() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("drawing.svg");
        fs::write(&file, "<svg><rect id=\"r1\"/></svg>").unwrap();

        let config = Config::default();
        let session = SyncSession::new();
        session.replace_document(load_document(&file, &config).unwrap());

        fs::write(&file, "<svg><rect id=\"r1\"").unwrap();
        assert!(refresh_from_disk(&session, &file, &config).is_err());
        assert!(session.index().contains("r1"));
    }
}
