use betaseries::{
    ClientConfig, DEFAULT_BASE_URL, Episode, EpisodesListOptions, Session, Show,
    ShowEpisodesOptions, ShowLookup,
};
use clap::{Args, Parser, Subcommand};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "betaseries")]
#[command(about = "Query the BetaSeries TV show database", long_about = None)]
struct Cli {
    /// BetaSeries API key
    #[arg(long, env = "BETASERIES_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Member login; requests are anonymous without it
    #[arg(long, env = "BETASERIES_LOGIN", default_value = "")]
    login: String,

    /// Member password; prompted for when a login is given without one
    #[arg(long, env = "BETASERIES_PASSWORD", hide_env_values = true, default_value = "")]
    password: String,

    /// API base URL
    #[arg(long, env = "BETASERIES_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

/// Which show a command is about
#[derive(Args)]
struct ShowArgs {
    /// BetaSeries show ID
    #[arg(long, default_value = "0")]
    id: i64,

    /// TheTVDB show ID
    #[arg(long, default_value = "0")]
    thetvdb_id: i64,

    /// IMDb show ID
    #[arg(long, default_value = "")]
    imdb_id: String,
}

impl ShowArgs {
    fn lookup(&self) -> ShowLookup {
        ShowLookup::new(self.id, self.thetvdb_id, self.imdb_id.clone())
    }
}

#[derive(Subcommand)]
enum Command {
    /// Search shows by title
    Search {
        query: String,
        /// title, popularity or followers
        #[arg(long, default_value = "popularity")]
        order: String,
    },
    /// List random shows
    Random {
        #[arg(long)]
        count: Option<i64>,
    },
    /// Show details of a single show
    Show(ShowArgs),
    /// List the characters of a show
    Characters(ShowArgs),
    /// List shows similar to a show
    Similars(ShowArgs),
    /// List videos attached to a show
    Videos(ShowArgs),
    /// List the episodes of a show
    Episodes {
        #[command(flatten)]
        show: ShowArgs,
        #[arg(long)]
        season: Option<i64>,
        #[arg(long)]
        episode: Option<i64>,
    },
    /// List your unseen episodes
    Unseen {
        /// Maximum number of episodes per show
        #[arg(long)]
        limit: Option<i64>,
    },
    /// List favorite shows
    Favorites {
        /// Member ID; yourself when omitted
        #[arg(long, default_value = "0")]
        user_id: i64,
    },
}

fn print_show(show: &Show) {
    println!("{} (id {}, thetvdb {})", show.title, show.id, show.thetvdb_id);
    if !show.network.is_empty() {
        println!("  Network: {}", show.network);
    }
    if !show.seasons.is_empty() {
        println!("  Seasons: {}  Episodes: {}", show.seasons, show.episodes);
    }
    if !show.genres.is_empty() {
        println!("  Genres: {}", show.genres.join(", "));
    }
    if !show.description.is_empty() {
        println!(
            "  {}",
            nanohtml2text::html2text(&show.description).trim()
        );
    }
}

fn print_episode(episode: &Episode) {
    println!(
        "  {} - {} ({})",
        episode.code,
        episode.title,
        if episode.date.is_empty() { "no date" } else { episode.date.as_str() }
    );
}

fn run(cli: Cli) -> betaseries::Result<()> {
    let mut config = ClientConfig::new(cli.api_key)
        .with_base_url(cli.base_url)
        .with_credentials(cli.login, cli.password)
        .with_timeout(Duration::from_secs(cli.timeout));

    if !config.login.is_empty() && config.password.is_empty() {
        match dialoguer::Password::new()
            .with_prompt(format!("Password for {}", config.login))
            .interact()
        {
            Ok(password) => config.password = password,
            Err(e) => {
                eprintln!("Error: Could not read password: {}", e);
                process::exit(1);
            }
        }
    }

    let session = Session::authenticate(&config)?;
    if let Some(token) = session.token() {
        println!("Logged in as {}\n", token.user.login);
    }

    match cli.command {
        Command::Search { query, order } => {
            for show in session.shows_search(&query, &order, false)? {
                print_show(&show);
            }
        }
        Command::Random { count } => {
            for show in session.shows_random(count, true)? {
                print_show(&show);
            }
        }
        Command::Show(args) => {
            let show = session.show_display(&args.lookup())?;
            print_show(&show);
        }
        Command::Characters(args) => {
            for character in session.shows_characters(&args.lookup())? {
                println!("{} - played by {}", character.name, character.actor);
            }
        }
        Command::Similars(args) => {
            for similar in session.shows_similars(&args.lookup(), false)? {
                println!("{} (id {})", similar.show_title, similar.show_id);
            }
        }
        Command::Videos(args) => {
            for video in session.shows_videos(args.id, args.thetvdb_id)? {
                println!("{}: {}", video.title, video.youtube_url);
            }
        }
        Command::Episodes {
            show,
            season,
            episode,
        } => {
            let options = ShowEpisodesOptions {
                season,
                episode,
                subtitles: false,
            };
            for episode in session.shows_episodes(&show.lookup(), &options)? {
                print_episode(&episode);
            }
        }
        Command::Unseen { limit } => {
            let options = EpisodesListOptions {
                limit,
                ..EpisodesListOptions::default()
            };
            for show in session.episodes_list(&options)? {
                println!("{} ({} remaining)", show.title, show.remaining);
                for episode in &show.unseen {
                    print_episode(episode);
                }
            }
        }
        Command::Favorites { user_id } => {
            for show in session.shows_favorites(user_id)? {
                print_show(&show);
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
