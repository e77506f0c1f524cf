use clap::{ArgAction, Args, Parser, Subcommand};
use shelflog_models::{ContentType, RewardAction};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

use commands::{clear, favorites, history, library, record, reward, session, stats};

fn parse_content_type(s: &str) -> Result<ContentType, String> {
    s.parse()
}

fn parse_reward_action(s: &str) -> Result<RewardAction, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "shelflog")]
#[command(about = "Shelflog - track what you read and watch, and level up doing it")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Data directory override (defaults to $SHELFLOG_DATA_DIR or the
    /// platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RecordArgs {
    /// Content type (comic, novel, anime, donghua)
    #[arg(value_parser = parse_content_type)]
    content_type: ContentType,

    /// Content slug
    slug: String,

    /// Display title snapshot
    #[arg(long)]
    title: String,

    /// Cover image URL snapshot
    #[arg(long, default_value = "")]
    cover: String,

    /// Last read chapter label (comics and novels)
    #[arg(long)]
    chapter: Option<String>,

    /// Slug of the last read chapter
    #[arg(long)]
    chapter_slug: Option<String>,

    /// Last watched episode label (anime and donghua)
    #[arg(long)]
    episode: Option<String>,

    /// Identifier of the last watched episode
    #[arg(long)]
    episode_id: Option<String>,
}

#[derive(Args)]
struct FavoriteArgs {
    /// Content type (comic, novel, anime, donghua)
    #[arg(value_parser = parse_content_type)]
    content_type: ContentType,

    /// Content slug
    slug: String,

    /// Display title snapshot
    #[arg(long)]
    title: String,

    /// Cover image URL snapshot
    #[arg(long, default_value = "")]
    cover: String,

    /// Rating snapshot shown in the library
    #[arg(long)]
    rating: Option<String>,

    /// Publication status snapshot (e.g. Ongoing, Completed)
    #[arg(long)]
    status: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a consumption event in the history ledger
    #[command(long_about = "Record that a piece of content was just read or watched. Re-recording the same content replaces its entry and moves it to the front of the ledger; the ledger keeps at most 100 entries.")]
    Record(RecordArgs),

    /// Inspect or edit the history ledger
    History {
        #[command(subcommand)]
        cmd: HistoryCommands,
    },

    /// Manage bookmarked content
    Favorites {
        #[command(subcommand)]
        cmd: FavoritesCommands,
    },

    /// Grant the fixed XP reward for an action
    #[command(long_about = "Grant the fixed XP reward for a consumption milestone and update the matching lifetime counter. Actions: read-chapter (10 XP), watch-episode (15 XP), finish-comic (50 XP), finish-novel (100 XP), finish-anime (75 XP), finish-donghua (75 XP).")]
    Reward {
        /// Reward action to grant
        #[arg(value_parser = parse_reward_action)]
        action: RewardAction,
    },

    /// Show level, XP, progress, and lifetime counters
    Stats,

    /// Show the combined library view (history and favorites)
    Library {
        /// Only show entries of this content type
        #[arg(long = "type", value_parser = parse_content_type)]
        content_type: Option<ContentType>,
    },

    /// Store the local user record (mock sign-in, no credentials)
    Login {
        /// Email address to store
        email: String,

        /// Display name (defaults to the part of the email before '@')
        #[arg(long)]
        name: Option<String>,
    },

    /// Remove the local user record
    Logout,

    /// Show the current local user
    Whoami,

    /// Clear persisted state
    #[command(long_about = "Clear persisted state. Use --history, --favorites, or --level to clear one collection, or --all to clear everything including the stored user.")]
    Clear {
        /// Clear everything, including the stored user
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the history ledger
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear favorites
        #[arg(long, action = ArgAction::SetTrue)]
        favorites: bool,

        /// Reset XP, level, and lifetime counters
        #[arg(long, action = ArgAction::SetTrue)]
        level: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List history entries, most recent first
    List {
        /// Only show entries of this content type
        #[arg(long = "type", value_parser = parse_content_type)]
        content_type: Option<ContentType>,

        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Remove one entry from the ledger
    Remove {
        /// Content type of the entry
        #[arg(value_parser = parse_content_type)]
        content_type: ContentType,

        /// Slug of the entry
        slug: String,
    },

    /// Empty the ledger
    Clear,
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// Add a favorite (no-op if already present)
    Add(FavoriteArgs),

    /// Flip favorite membership for a piece of content
    Toggle(FavoriteArgs),

    /// Remove one favorite
    Remove {
        /// Content type of the favorite
        #[arg(value_parser = parse_content_type)]
        content_type: ContentType,

        /// Slug of the favorite
        slug: String,
    },

    /// List favorites, most recently added first
    List {
        /// Only show favorites of this content type
        #[arg(long = "type", value_parser = parse_content_type)]
        content_type: Option<ContentType>,
    },

    /// Remove all favorites
    Clear,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Record(args) => record::run_record(args, cli.data_dir, &output),
        Commands::History { cmd } => match cmd {
            HistoryCommands::List {
                content_type,
                limit,
            } => history::run_list(content_type, limit, cli.data_dir, &output),
            HistoryCommands::Remove { content_type, slug } => {
                history::run_remove(content_type, &slug, cli.data_dir, &output)
            }
            HistoryCommands::Clear => history::run_clear(cli.data_dir, &output),
        },
        Commands::Favorites { cmd } => match cmd {
            FavoritesCommands::Add(args) => {
                favorites::run_add(args, cli.data_dir, &output)
            }
            FavoritesCommands::Toggle(args) => {
                favorites::run_toggle(args, cli.data_dir, &output)
            }
            FavoritesCommands::Remove { content_type, slug } => {
                favorites::run_remove(content_type, &slug, cli.data_dir, &output)
            }
            FavoritesCommands::List { content_type } => {
                favorites::run_list(content_type, cli.data_dir, &output)
            }
            FavoritesCommands::Clear => favorites::run_clear(cli.data_dir, &output),
        },
        Commands::Reward { action } => reward::run_reward(action, cli.data_dir, &output),
        Commands::Stats => stats::run_stats(cli.data_dir, &output),
        Commands::Library { content_type } => {
            library::run_library(content_type, cli.data_dir, &output)
        }
        Commands::Login { email, name } => {
            session::run_login(email, name, cli.data_dir, &output)
        }
        Commands::Logout => session::run_logout(cli.data_dir, &output),
        Commands::Whoami => session::run_whoami(cli.data_dir, &output),
        Commands::Clear {
            all,
            history,
            favorites,
            level,
        } => clear::run_clear(all, history, favorites, level, cli.data_dir, &output),
    };

    result.map_err(|e| color_eyre::eyre::eyre!("{}", e))
}
