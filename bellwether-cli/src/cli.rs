use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use bellwether::FEED_URL;

/// Check a status feed for unresolved advisories and render the banner
#[derive(Parser)]
#[command(name = "bellwether", version)]
pub struct Cli {
    /// Atom status feed to check
    #[arg(long, default_value = FEED_URL)]
    pub feed_url: String,

    /// Available viewport width, used to pick the banner text
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Available viewport height, used to pick the banner text
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Number of banner containers on the page
    #[arg(long, default_value_t = 1)]
    pub banners: usize,

    /// Emit a single JSON report on stdout; logs go to stderr as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}
