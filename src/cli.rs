use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "reelscout", version, about = "TUI for discovering and searching movies")]
pub struct Args {
    /// Search query to run on startup
    #[arg(short, long)]
    pub query: Option<String>,

    /// Theme name (e.g., "Catppuccin Latte" or just "latte")
    #[arg(short, long)]
    pub theme: Option<String>,
}
