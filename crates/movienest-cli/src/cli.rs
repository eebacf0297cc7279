//! Argument parsing and command dispatch.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use movienest_client::ClientConfig;
use movienest_client::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use movienest_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use url::Url;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::account::{handle_login, handle_logout, handle_register};
use crate::commands::favorites::{
    handle_favorite_add, handle_favorite_remove, handle_favorite_toggle, handle_favorites_list,
};
use crate::commands::movies::{
    handle_director, handle_genre, handle_movie_list, handle_movie_show, handle_movie_synopsis,
};
use crate::commands::profile::{handle_profile_delete, handle_profile_edit, handle_profile_show};

/// Parses CLI arguments, executes the requested command and reports failures
/// on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
    }) {
        eprintln!("warning: {err}");
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let mut config = ClientConfig::new(cli.api_url).with_timeout(Duration::from_secs(cli.timeout));
    if let Some(dir) = cli.session_dir {
        config = config.with_session_dir(dir);
    }
    let mut ctx = AppContext::new(&config)?;
    let format = cli.output;

    match cli.command {
        Command::Register(args) => handle_register(&ctx, args).await,
        Command::Login(args) => handle_login(&mut ctx, args).await,
        Command::Logout => handle_logout(&mut ctx),
        Command::Movies(movies) => match movies {
            MoviesCommand::List(args) => handle_movie_list(&ctx, args, format).await,
            MoviesCommand::Show(args) => handle_movie_show(&ctx, args, format).await,
            MoviesCommand::Synopsis(args) => handle_movie_synopsis(&ctx, args, format).await,
        },
        Command::Genre(args) => handle_genre(&ctx, args, format).await,
        Command::Director(args) => handle_director(&ctx, args, format).await,
        Command::Favorites(favorites) => match favorites {
            FavoritesCommand::List => handle_favorites_list(&ctx, format).await,
            FavoritesCommand::Add(args) => handle_favorite_add(&mut ctx, args).await,
            FavoritesCommand::Remove(args) => handle_favorite_remove(&mut ctx, args).await,
            FavoritesCommand::Toggle(args) => handle_favorite_toggle(&mut ctx, args).await,
        },
        Command::Profile(profile) => match profile {
            ProfileCommand::Show => handle_profile_show(&mut ctx, format).await,
            ProfileCommand::Edit(args) => handle_profile_edit(&mut ctx, args, format).await,
            ProfileCommand::Delete(args) => handle_profile_delete(&mut ctx, args).await,
        },
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

#[derive(Parser)]
#[command(name = "movienest", about = "Browse the MovieNest catalog and manage your account")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "MOVIENEST_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    #[arg(
        long,
        global = true,
        env = "MOVIENEST_HTTP_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Per-request timeout in seconds"
    )]
    timeout: u64,
    #[arg(
        long,
        global = true,
        env = "MOVIENEST_SESSION_DIR",
        help = "Directory holding the persisted login session"
    )]
    session_dir: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "MOVIENEST_LOG_FORMAT",
        value_parser = parse_log_format,
        help = "Diagnostic log format on stderr (pretty or json)"
    )]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and remember the session.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    #[command(subcommand)]
    Movies(MoviesCommand),
    /// Describe a genre.
    Genre(NameArgs),
    /// Describe a director.
    Director(NameArgs),
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand)]
enum MoviesCommand {
    /// List the catalog.
    List(MovieListArgs),
    /// Show every detail of one movie.
    Show(TitleArgs),
    /// Print the synopsis of one movie.
    Synopsis(TitleArgs),
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favourite movies.
    List,
    /// Add a movie to the favourites.
    Add(MovieIdArgs),
    /// Remove a movie from the favourites.
    Remove(MovieIdArgs),
    /// Flip the favourite state of a movie.
    Toggle(MovieIdArgs),
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the account and its favourite movies.
    Show,
    /// Update account details.
    Edit(ProfileEditArgs),
    /// Delete the account permanently.
    Delete(ProfileDeleteArgs),
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long, help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, help = "Birth date as YYYY-MM-DD")]
    pub(crate) birth_date: String,
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long, help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct MovieListArgs {
    #[arg(long, help = "Only list favourite movies")]
    pub(crate) favorites_only: bool,
}

#[derive(Args)]
pub(crate) struct TitleArgs {
    #[arg(help = "Movie title")]
    pub(crate) title: String,
}

#[derive(Args)]
pub(crate) struct NameArgs {
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct MovieIdArgs {
    #[arg(help = "Movie identifier")]
    pub(crate) id: String,
}

#[derive(Args, Default)]
pub(crate) struct ProfileEditArgs {
    #[arg(long)]
    pub(crate) username: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long, help = "Birth date as YYYY-MM-DD")]
    pub(crate) birth_date: Option<String>,
    #[arg(long, help = "New password; omit to keep the current one")]
    pub(crate) password: Option<String>,
}

impl ProfileEditArgs {
    pub(crate) const fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.birth_date.is_none()
            && self.password.is_none()
    }
}

#[derive(Args, Default)]
pub(crate) struct ProfileDeleteArgs {
    #[arg(long, help = "Confirm the deletion")]
    pub(crate) yes: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}
