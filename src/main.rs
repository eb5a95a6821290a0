use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use random_episode::{
    CatalogClient, CatalogConfig, FavoritesStore, NormalizedEpisode, ProgressEvent, Series,
    TvMazeSource, find_series, random_series, roll_episode, search_series,
};
use std::process::ExitCode;
use tracing::warn;

/// Can't decide what to watch? Let fate pick an episode for you.
#[derive(Debug, Parser)]
#[command(name = "random-episode", version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the TVMaze API
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick a random episode of a series
    Pick {
        /// Name of the TV series
        series: String,

        /// First season to consider
        #[arg(long, default_value_t = 1)]
        from: u32,

        /// Last season to consider (defaults to the last season of known series)
        #[arg(long)]
        to: Option<u32>,

        /// Number of episodes to roll ("I don't want this one")
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        rolls: u32,
    },

    /// Pick a random series and a random episode from all of its seasons
    Surprise,

    /// List known series matching a search term
    Search {
        /// At least two characters of the series name
        term: String,
    },

    /// Manage favorite series
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Debug, Subcommand)]
enum FavoritesAction {
    /// Show all favorites
    List,
    /// Add a known series to the favorites
    Add { series: String },
    /// Remove a series from the favorites
    Remove { series: String },
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::FetchingEpisodes {
            series_name,
            cached,
        } => {
            if !cached {
                println!("Retrieving episode information for '{}'...", series_name);
            }
        }
        ProgressEvent::EpisodesLoaded { series_name, count } => {
            println!("Found {} episode(s) for '{}'", count, series_name);
        }
        ProgressEvent::SelectingEpisode {
            min_season,
            max_season,
        } => {
            println!(
                "Rolling the dice for seasons {} to {}...\n",
                min_season, max_season
            );
        }
        ProgressEvent::EpisodeSelected { .. } => {}
    }
}

fn print_episode(episode: &NormalizedEpisode) {
    let number = episode
        .episode_number
        .map(|n| format!("{:02}", n))
        .unwrap_or_else(|| "??".to_string());

    println!(
        "{} - S{:02}E{} - {}",
        episode.series_title, episode.season_number, number, episode.episode_title
    );
    if let Some(rating) = episode.rating {
        println!("  Rating: {:.1}/10", rating);
    }
    println!("  Summary: {}", episode.summary);
    println!();
}

fn roll(
    client: &CatalogClient<TvMazeSource>,
    series: &str,
    from: u32,
    to: u32,
    rolls: u32,
) -> Result<()> {
    let mut rng = rand::thread_rng();

    for _ in 0..rolls {
        let episode = roll_episode(client, series, from, to, &mut rng, handle_progress_event)
            .map_err(|e| anyhow!("Failed to get episode. {}", e))?;
        print_episode(&episode);
    }

    Ok(())
}

fn favorites(action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            let store = match FavoritesStore::open() {
                Ok(store) => store,
                Err(e) => {
                    warn!("Failed to load favorites: {}", e);
                    println!("No favorites yet.");
                    return Ok(());
                }
            };

            if store.list().is_empty() {
                println!("No favorites yet.");
            }
            for favorite in store.list() {
                println!("{} ({} seasons)", favorite.name, favorite.seasons);
            }
        }
        FavoritesAction::Add { series } => {
            let Some(known) = find_series(&series) else {
                bail!("Unknown series '{}'. Try `random-episode search`.", series);
            };

            let mut store = FavoritesStore::open()?;
            if store.add(Series::from(known))? {
                println!("Added '{}' to favorites.", known.name);
            } else {
                println!("'{}' is already a favorite.", known.name);
            }
        }
        FavoritesAction::Remove { series } => {
            let mut store = FavoritesStore::open()?;
            let name = find_series(&series).map_or(series.as_str(), |known| known.name);
            if store.remove(name)? {
                println!("Show removed from favorites.");
            } else {
                println!("'{}' is not a favorite.", series);
            }
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CatalogConfig::default();
    if let Some(api_url) = cli.api_url {
        config.base_url = api_url;
    }

    match cli.command {
        Command::Pick {
            series,
            from,
            to,
            rolls,
        } => {
            let to = match (to, find_series(&series)) {
                (Some(to), _) => to,
                (None, Some(known)) => known.seasons,
                (None, None) => bail!(
                    "Unknown season count for '{}', please pass --to <SEASON>",
                    series
                ),
            };

            let client = config.build_client();
            roll(&client, &series, from, to, rolls)
        }
        Command::Surprise => {
            let known = random_series(&mut rand::thread_rng());
            println!("Fate picked '{}'!", known.name);

            let client = config.build_client();
            roll(&client, known.name, 1, known.seasons, 1)
        }
        Command::Search { term } => {
            let matches = search_series(&term);
            if matches.is_empty() {
                println!("No series matching '{}'.", term);
            }
            for known in matches {
                println!("{} ({} seasons)", known.name, known.seasons);
            }
            Ok(())
        }
        Command::Favorites { action } => favorites(action),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults based on the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "random_episode=debug".to_string()
        } else {
            "warn".to_string()
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{:#}", e);
            ExitCode::FAILURE
        }
    }
}
