// SnapSleuth - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Control rule loading (built-in + user-defined)
// 4. Snapshot parsing and result printing

use clap::Parser;
use snapsleuth::app::{report, rule_mgr};
use snapsleuth::core::{export, parser, query};
use snapsleuth::platform::config::{self, PlatformPaths};
use snapsleuth::util;
use std::path::PathBuf;

/// SnapSleuth - accessibility-tree snapshot inspector.
///
/// With only a snapshot path, prints the element count and the well-known
/// controls found. With search text, prints the elements whose text or
/// description contains it.
#[derive(Parser, Debug)]
#[command(name = "snapsleuth", version, about)]
struct Cli {
    /// Snapshot file to parse.
    path: PathBuf,

    /// Text to search for in element text and descriptions.
    search: Option<String>,

    /// Match search text case-sensitively. Requires search text.
    #[arg(short = 'c', long = "case-sensitive", requires = "search")]
    case_sensitive: bool,

    /// Also look up a favorites folder with this name. Summary mode only.
    #[arg(short = 'f', long = "folder", conflicts_with = "search")]
    folder: Option<String>,

    /// Directory containing user-defined control rules.
    #[arg(short = 'r', long = "rules-dir")]
    rules_dir: Option<PathBuf>,

    /// Write the matched (or all) elements to a .csv or .json file.
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let (app_config, config_warnings) = config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config warning");
    }

    tracing::debug!(
        version = util::constants::APP_VERSION,
        path = %cli.path.display(),
        "SnapSleuth starting"
    );

    // Rule directory: CLI override > config > platform default
    let rules_dir = cli
        .rules_dir
        .as_deref()
        .or(app_config.rules_dir.as_deref())
        .unwrap_or(&platform_paths.user_rules_dir);

    let (rules, rule_errors) = rule_mgr::load_all_rules(Some(rules_dir));
    for err in &rule_errors {
        tracing::warn!(error = %err, "Rule loading warning");
    }

    let result = parser::parse_file(&cli.path);
    if let Some(ref err) = result.error {
        println!("{err}");
    }
    let elements = result.elements;

    let mut stdout = std::io::stdout().lock();
    let (printed, selected) = match cli.search.as_deref() {
        None => (
            report::write_summary(
                &mut stdout,
                &elements,
                &rules,
                &app_config,
                cli.folder.as_deref(),
            ),
            elements.iter().collect::<Vec<_>>(),
        ),
        Some(text) => {
            let matches = query::find_by_text(&elements, text, cli.case_sensitive);
            (
                report::write_matches(&mut stdout, &matches, &app_config),
                matches,
            )
        }
    };

    if let Err(e) = printed {
        tracing::error!(error = %e, "Failed to write results");
        std::process::exit(1);
    }

    if let Some(ref export_path) = cli.export {
        if let Err(e) = export::export_to_file(&selected, export_path) {
            tracing::error!(error = %e, "Export failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
