//! hugeview - Terminal Viewer for Huge Files
//!
//! Maps the file, opens the viewer and hands it to the terminal host.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use hugeview::file_handler::BackwardSearch;
use hugeview::ui::{ColorTheme, TerminalUI};
use hugeview::{Application, ThemeName, Viewer, ViewerConfig};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("hugeview")
        .version(hugeview::VERSION)
        .about("A terminal viewer for huge files")
        .long_about(
            "hugeview memory-maps the file and shows a line-aligned window over it, \
             so files of any size open instantly. Regex matches in the window are \
             highlighted, including matches that span lines.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the file to view")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .short('p')
                .value_name("REGEX")
                .help("Highlight matches of REGEX from the start"),
        )
        .arg(
            Arg::new("ignore-case")
                .long("ignore-case")
                .short('i')
                .action(ArgAction::SetTrue)
                .help("Match patterns case-insensitively"),
        )
        .arg(
            Arg::new("backward-search")
                .long("backward-search")
                .value_name("STRATEGY")
                .value_parser(["expanding", "page-anchored"])
                .help("How far back a line-up search looks for a newline"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .value_parser(["default", "monochrome", "high-contrast"])
                .help("Color theme"),
        )
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let file_path = PathBuf::from(
        matches
            .get_one::<String>("file")
            .context("file argument is required")?,
    );

    let mut config = ViewerConfig::load()?;
    if matches.get_flag("ignore-case") {
        config.search.case_insensitive = true;
    }
    if let Some(strategy) = matches
        .get_one::<String>("backward-search")
        .and_then(|name| BackwardSearch::from_name(name))
    {
        config.backward_search = strategy;
    }
    if let Some(theme) = matches
        .get_one::<String>("theme")
        .and_then(|name| ThemeName::from_name(name))
    {
        config.theme = theme;
    }
    log::debug!("config: {:?}", config);

    let mut viewer = Viewer::open(&file_path, &config)
        .with_context(|| format!("cannot open {}", file_path.display()))?;
    if let Some(pattern) = matches.get_one::<String>("pattern") {
        viewer.set_pattern_str(Some(pattern))?;
    }

    let ui_renderer = Box::new(TerminalUI::with_theme(ColorTheme::from_name(config.theme)));
    let mut app = Application::new(viewer, ui_renderer, config.mouse_scroll_lines);
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!hugeview::VERSION.is_empty());
    }

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_cli_parses_options() {
        let matches = cli()
            .try_get_matches_from([
                "hugeview",
                "big.log",
                "--pattern",
                "err.r",
                "-i",
                "--backward-search",
                "page-anchored",
                "--theme",
                "monochrome",
            ])
            .unwrap();

        assert_eq!(matches.get_one::<String>("file").unwrap(), "big.log");
        assert_eq!(matches.get_one::<String>("pattern").unwrap(), "err.r");
        assert!(matches.get_flag("ignore-case"));
        assert_eq!(
            matches.get_one::<String>("backward-search").unwrap(),
            "page-anchored"
        );
        assert!(cli()
            .try_get_matches_from(["hugeview", "f", "--theme", "neon"])
            .is_err());
    }
}
