pub mod cli;
pub mod config;
pub mod controller;
pub mod display;
pub mod export;
pub mod filter;
pub mod interactive;
pub mod logging;
pub mod menu;
pub mod results;

use anyhow::Context;
use std::path::Path;

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use controller::{FilterController, FilterState, QueryCompiler};
pub use filter::{RowFilter, parse_query};
pub use menu::{LogicOp, QuickFilter};
pub use results::{ExchangeRef, ResultEntry, load_results};

fn load_entries(path: &Path) -> anyhow::Result<Vec<ResultEntry>> {
    load_results(path).with_context(|| format!("Failed to load results from '{}'", path.display()))
}

fn controller_for(query: Option<&str>, config: &config::AppConfig) -> FilterController {
    let mut controller = FilterController::new(config.filter.clone());
    if let Some(query) = query {
        controller.set_text(query);
    }
    controller
}

fn write_output_file(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let app_config = config::load_config(cli.config.as_deref()).context("Failed to load config")?;

    logging::init(cli.verbose, cli.quiet, app_config.logging.level.as_deref());
    if let Some(config_path) = &cli.config {
        tracing::debug!(path = %config_path.display(), "Loaded config file");
    }

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
    let colorize = colored::control::SHOULD_COLORIZE.should_colorize();

    match &cli.command {
        Commands::Filter {
            file,
            filter,
            format,
            output,
        } => {
            let entries = load_entries(file)?;
            let controller = controller_for(filter.as_deref(), &app_config);
            let indices = controller.visible_indices(&entries);
            let filtered = controller.state() == FilterState::Filtered;

            let text = match format {
                OutputFormat::Text => display::format_results_text(
                    &entries,
                    &indices,
                    filtered,
                    &app_config.display,
                    colorize,
                ),
                OutputFormat::Json => {
                    let mut json = display::format_results_json(&entries, &indices)
                        .context("Failed to serialize results")?;
                    json.push('\n');
                    json
                }
            };

            print!("{text}");
            if let Some(path) = output {
                write_output_file(path, &text)?;
            }
        }
        Commands::Export {
            file,
            output,
            filter,
            visible_only,
        } => {
            let entries = load_entries(file)?;
            let exported = if *visible_only {
                let keep = controller_for(filter.as_deref(), &app_config)
                    .active_filter()
                    .clone()
                    .into_predicate();
                let rows = entries.iter().filter(|entry| keep(*entry));
                export::export_csv_to_path(rows, output)
            } else {
                export::export_csv_to_path(&entries, output)
            };
            let count = exported
                .with_context(|| format!("Failed to export to '{}'", output.display()))?;

            if !cli.quiet {
                eprintln!("Exported {count} rows to {}", output.display());
            }
        }
        Commands::Interactive { file, filter } => {
            let entries = load_entries(file)?;
            let mut controller = controller_for(filter.as_deref(), &app_config);
            let stdin = std::io::stdin();
            interactive::run_session(
                stdin.lock(),
                std::io::stdout(),
                &entries,
                &mut controller,
                &app_config,
                interactive::SessionOptions { colorize },
            )
            .context("Interactive session failed")?;
        }
        Commands::Menu => {
            let sections = menu::build_menu(&app_config.menu);
            let mut out = Vec::new();
            for section in &sections {
                out.push(format!("{}:", section.title));
                for item in &section.items {
                    out.push(format!("  {:<14} {item}", item.label()));
                }
            }
            println!("{}", out.join("\n"));
        }
    }

    Ok(())
}
