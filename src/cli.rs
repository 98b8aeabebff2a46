use clap::{Parser, Subcommand, ValueEnum};

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Compact,
}

#[derive(Clone, ValueEnum)]
pub enum SortBy {
    LastRecognition,
    Name,
    Status,
}

#[derive(Clone, ValueEnum)]
pub enum StatusFilter {
    Online,
    Warning,
    Offline,
}

/// fleet health dashboard for local recognition applications
#[derive(Parser)]
#[command(name = "recwatch")]
pub struct Cli {
    /// Backend host to poll
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Backend port
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Full backend base URL including protocol (overrides host/port)
    #[arg(short = 'u', long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the application dashboard (single shot, or continuously with --watch)
    List {
        /// Output format: table (default), json, or compact
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
        /// Sort by: last-recognition (default), name, or status
        #[arg(short, long, default_value = "last-recognition")]
        sort: SortBy,
        /// Show only applications with this overall status
        #[arg(long)]
        status: Option<StatusFilter>,
        /// Watch mode: re-poll and redraw on an interval
        #[arg(short, long)]
        watch: bool,
        /// Poll interval in seconds (overrides config file, default: 30)
        #[arg(long)]
        interval: Option<u64>,
        /// Show per-camera status lines under each application
        #[arg(short = 'x', long)]
        extended: bool,
        /// Path to configuration file (supports `~`)
        #[arg(short, long)]
        config: Option<String>,
        /// HTTP request timeout in seconds (overrides config file)
        #[arg(long)]
        request_timeout: Option<u64>,
    },

    /// Show fleet-level counts only
    Summary {
        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}
