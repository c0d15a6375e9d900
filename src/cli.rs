use crate::editor::FieldEdits;
use crate::export::ImageMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "damaged-box")]
#[command(version, about = "Damaged carton inspection dashboard and Excel report tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API endpoint (overrides config and DAMAGED_BOX_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

/// Search term and issue-type selector
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive ASN search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only this issue type
    #[arg(short = 't', long)]
    pub issue_type: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show records with summary counters
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show per-issue-type counts over all records
        #[arg(long)]
        counts: bool,
    },

    /// Export the filtered records to Excel
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output directory (default: config output_dir or current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Photo columns (hyperlink/embed)
        #[arg(long)]
        image_mode: Option<ImageMode>,
    },

    /// Edit one record; prompts for fields when no field flag is given
    Update {
        /// Record id
        #[arg(required = true)]
        id: i64,

        #[command(flatten)]
        fields: FieldEdits,
    },

    /// Refresh periodically and print the summary until Ctrl-C
    Watch {
        #[command(flatten)]
        filter: FilterArgs,

        /// Refresh interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Show or edit the configuration
    Config {
        /// Set the API endpoint
        #[arg(long)]
        set_api_url: Option<String>,

        /// Set the refresh interval in seconds
        #[arg(long)]
        set_interval: Option<u64>,

        /// Show the configuration
        #[arg(long)]
        show: bool,
    },
}
