use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Report the root <svg> element when scanning
    #[arg(long)]
    pub include_root: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = Config::path_in(cwd);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        include_root: args.include_root,
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)? + "\n")?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();

        init(
            InitArgs {
                include_root: true,
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.include_root);
        assert_eq!(config.sync.highlight.class_name, "code-highlight");
    }

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(Config::path_in(dir.path()), r#"{ "includeRoot": true }"#).unwrap();

        init(
            InitArgs {
                include_root: false,
                force: false,
            },
            dir.path(),
        )
        .unwrap();
        assert!(Config::load(dir.path()).unwrap().include_root);

        init(
            InitArgs {
                include_root: false,
                force: true,
            },
            dir.path(),
        )
        .unwrap();
        assert!(!Config::load(dir.path()).unwrap().include_root);
    }
}
