use std::sync::Arc;

use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playbucket::{
    cli::{self, PlaylistTarget},
    config, error,
    types::PkceToken,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Forget the cached token and analysis
    Logout,

    /// Collect recently played tracks and group them by month and genre
    Analyze(AnalyzeOptions),

    /// Create playlists from the cached analysis
    Playlist(PlaylistOptions),

    /// Show profile or cached analysis information
    Info(InfoOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeOptions {
    /// Number of calendar months to include, the current one included
    #[clap(long)]
    pub months: Option<u32>,

    /// Stop collecting once more than this many plays were fetched
    #[clap(long)]
    pub max_events: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["month", "all_months", "genre", "all_genres", "duplicates"])
))]
pub struct PlaylistOptions {
    /// Month to create a playlist for (YYYY-MM)
    #[clap(long)]
    pub month: Option<String>,

    /// Create a playlist for every month
    #[clap(long)]
    pub all_months: bool,

    /// Genre to create a playlist for (raw labels are canonicalized)
    #[clap(long)]
    pub genre: Option<String>,

    /// Create a playlist for every genre
    #[clap(long)]
    pub all_genres: bool,

    /// Create a playlist of the cross-genre tracks
    #[clap(long)]
    pub duplicates: bool,
}

impl PlaylistOptions {
    fn target(self) -> PlaylistTarget {
        if let Some(month) = self.month {
            PlaylistTarget::Month(month)
        } else if let Some(genre) = self.genre {
            PlaylistTarget::Genre(genre)
        } else if self.all_months {
            PlaylistTarget::AllMonths
        } else if self.all_genres {
            PlaylistTarget::AllGenres
        } else {
            PlaylistTarget::Duplicates
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct InfoOptions {
    /// Show the logged-in Spotify profile
    #[clap(long)]
    profile: bool,

    /// Print the full cached analysis tables
    #[clap(long)]
    cache: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Logout => cli::logout().await,
        Command::Analyze(opt) => cli::analyze(opt.months, opt.max_events).await,
        Command::Playlist(opt) => cli::playlist(opt.target()).await,
        Command::Info(opt) => cli::info(opt.profile, opt.cache).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
