use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod commands;
mod domain;
mod services;

pub use catalog::{validate, Catalog};
pub use cli::{Cli, ColorMode, Commands};
pub use domain::models::*;
pub use services::collector::TerminalCollector;
pub use services::config::{load_config, resolve_color};
pub use services::output::{print_error, print_one, print_out, Palette, Style};
pub use services::report::{render_markdown, render_summary};
pub use services::resolver;
pub use services::rules::{RULES, WORDING_ANCHORS};
pub use services::scoring::score;
pub use services::storage::{
    default_output_path, load_for_catalog, report_path_for, save_checkpoint,
};

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(cli.json, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cfg = load_config()?;
    let catalog = Catalog::standard();
    let palette = Palette::for_mode(resolve_color(cli.color, &cfg));

    match &cli.command {
        Commands::Assess { output, resume } => {
            commands::handle_assess(cli, &cfg, &catalog, output.as_deref(), resume.as_deref())
        }
        Commands::Score { file } => commands::handle_score(cli, &catalog, palette, file),
        Commands::Report { file, out } => {
            commands::handle_report(cli, &catalog, file, out.as_deref())
        }
        Commands::Questions { group } => {
            commands::handle_questions(cli, &catalog, group.as_deref())
        }
        Commands::Validate => commands::handle_validate(cli, &catalog),
    }
}
