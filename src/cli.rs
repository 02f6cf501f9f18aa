use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cmmc-scope",
    version,
    about = "Interactive CUI/FCI scoping assessment for CMMC"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_enum,
        help = "Color terminal output (overrides the config file)"
    )]
    pub color: Option<ColorMode>,
    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive questionnaire.
    Assess {
        #[arg(long, help = "Checkpoint file to write (default: <reports_dir>/scoping_<timestamp>.json)")]
        output: Option<PathBuf>,
        #[arg(long, help = "Continue a previously saved checkpoint")]
        resume: Option<PathBuf>,
    },
    /// Re-score a saved checkpoint.
    Score { file: PathBuf },
    /// Render the Markdown report for a saved checkpoint.
    Report {
        file: PathBuf,
        #[arg(long, help = "Report path (default: <file stem>_report.md)")]
        out: Option<PathBuf>,
    },
    /// List catalog questions.
    Questions {
        #[arg(long, help = "Only this group (system_inventory, data_flow, boundary, access_control)")]
        group: Option<String>,
    },
    /// Check catalog invariants and rule wording.
    Validate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
