// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "card-scenes")]
#[command(about = "Animated wireframe scenes inside glass cards", long_about = None)]
pub struct Cli {
    /// JSON file overriding scene settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of cards on the page
    #[arg(long, default_value_t = 6)]
    pub cards: usize,

    /// Grid columns
    #[arg(long, default_value_t = 3)]
    pub columns: usize,

    /// Extra containers placed outside any card
    #[arg(long, default_value_t = 0)]
    pub bare: usize,

    /// Seed for particle placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable periodic frame statistics logging
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
