use crate::config::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use svgsync_editor::ElementRecord;
use svgsync_parser::{format_error, scan_with_options};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// SVG document to scan
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also report the root <svg> element
    #[arg(long)]
    pub include_root: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn scan(args: ScanArgs, cwd: &Path) -> Result<()> {
    let mut config = Config::load(cwd)?;
    config.include_root |= args.include_root;

    let records = load_document(&args.input, &config)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => print!("{}", render_table(&records)),
    }

    Ok(())
}

/// Read and scan a document, pretty-printing scan errors
pub fn load_document(path: &Path, config: &Config) -> Result<Vec<ElementRecord>> {
    let source = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;

    scan_with_options(&source, config.scan_options(path)).map_err(|e| {
        let filename = path.display().to_string();
        eprintln!("{}", format_error(&source, &filename, &e));
        anyhow::anyhow!("Failed to scan {}", filename)
    })
}

fn render_table(records: &[ElementRecord]) -> String {
    let id_width = records
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(0)
        .max(2);
    let tag_width = records
        .iter()
        .map(|r| r.tag.len())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut out = format!(
        "{:<id_width$}  {:<tag_width$}  {}\n",
        "ID".bold(),
        "TAG".bold(),
        "RANGE".bold(),
    );
    for record in records {
        out.push_str(&format!(
            "{:<id_width$}  {:<tag_width$}  {}\n",
            record.id.cyan(),
            record.tag,
            record.source_range
        ));
    }
    out.push_str(&format!("{} element(s)\n", records.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = "<svg>\n  <rect id=\"r1\"/>\n  <circle id=\"c1\"/>\n</svg>";

    #[test]
    fn test_load_document_respects_include_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("drawing.svg");
        fs::write(&file, DOC).unwrap();

        let records = load_document(&file, &Config::default()).unwrap();
        assert_eq!(records.len(), 2);

        let config = Config {
            include_root: true,
            ..Config::default()
        };
        let records = load_document(&file, &config).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].tag, "svg");
    }

    #[test]
    fn test_scan_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.svg");
        fs::write(&file, "<svg><g></svg>").unwrap();

        let err = load_document(&file, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("broken.svg"));
    }

    #[test]
    fn test_table_lists_every_record() {
        colored::control::set_override(false);
        let records = svgsync_parser::scan(DOC).unwrap();

        let table = render_table(&records);
        assert!(table.contains("r1  rect    (2,3)-(2,18)"));
        assert!(table.ends_with("2 element(s)\n"));
    }
}
