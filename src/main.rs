//! MovieBook command line
//!
//! With arguments, runs one search. Without, reads typed text from stdin
//! through the debouncer and searches as you type.

use anyhow::Result;
use moviebook::{
    config::{self, Settings},
    Debouncer, FileStore, MovieSearch, SearchChange, SearchCoordinator, Suggestions,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("-h") | Some("--help") => {
            print_usage();
            return Ok(());
        }
        Some("-V") | Some("--version") => {
            println!("moviebook {}", moviebook::VERSION);
            return Ok(());
        }
        _ => {}
    }

    let source = config::locate();
    let settings = config::load_from(source.as_deref())?;

    FmtSubscriber::builder()
        .with_max_level(if settings.general.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting MovieBook v{}", moviebook::VERSION);
    match source {
        Some(ref path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    if settings.api.api_key.is_empty() {
        warn!("No API key configured; set MOVIEBOOK_API_KEY or api.api_key");
    }

    let coordinator = build_coordinator(&settings)?;

    if args.is_empty() {
        interactive(coordinator, &settings).await
    } else {
        let change = coordinator.query(&args.join(" ")).await;
        print_change(&coordinator, change.as_ref());
        Ok(())
    }
}

/// Wire the search client, preference file and coordinator together
fn build_coordinator(settings: &Settings) -> Result<SearchCoordinator> {
    let client = MovieSearch::from_settings(&settings.api, &settings.outgoing)?;

    let path = settings.suggestions.resolved_path();
    info!("Suggestions stored in {}", path.display());
    let suggestions = Suggestions::with_settings(Arc::new(FileStore::new(path)), &settings.suggestions);

    Ok(SearchCoordinator::with_settings(
        Arc::new(client),
        suggestions,
        &settings.search,
    ))
}

/// Search-as-you-type over stdin
async fn interactive(coordinator: SearchCoordinator, settings: &Settings) -> Result<()> {
    let (tx, rx) = mpsc::channel(32);
    let queries = Debouncer::with_settings(&settings.input).spawn(rx);

    // Overlapping searches are allowed; stale responses are dropped
    let runner = coordinator.clone();
    let searches = tokio::spawn(async move {
        runner
            .serve(queries, |coordinator, change| {
                print_change(coordinator, change.as_ref())
            })
            .await
    });

    println!("Type a movie title (:s suggestions, :r refresh, Ctrl-D to quit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":s" => {
                for (i, option) in coordinator.suggested_options().iter().enumerate() {
                    println!("{:>2}. {}", i + 1, option);
                }
            }
            ":r" => match coordinator.refresh().await {
                Some(change) => print_change(&coordinator, Some(&change)),
                None => println!("Nothing to refresh"),
            },
            _ => {
                if tx.send(line).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(tx);
    let panicked = searches.await?;
    if panicked > 0 {
        warn!("{} searches ended abnormally", panicked);
    }
    Ok(())
}

fn print_change(coordinator: &SearchCoordinator, change: Option<&SearchChange>) {
    match change {
        Some(SearchChange::Succeeded) => {
            for movie in coordinator.state().movies {
                println!("{}", movie.headline());
                if !movie.overview.is_empty() {
                    println!("    {}", movie.overview);
                }
            }
        }
        Some(SearchChange::Failed(message)) => println!("{}", message),
        None => {}
    }
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
MovieBook v{}
Search TMDB for movies

USAGE:
    moviebook [OPTIONS] [QUERY...]

With a QUERY, runs one search and prints the results. Without one, reads
text from stdin and searches as you type.

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    MOVIEBOOK_SETTINGS_PATH     Path to settings.yml
    MOVIEBOOK_DEBUG             Enable debug logging (true/false)
    MOVIEBOOK_API_KEY           TMDB API key
    MOVIEBOOK_SEARCH_URL        Movie search endpoint
    MOVIEBOOK_SUGGESTIONS_PATH  Preference file for suggestions
"#,
        moviebook::VERSION
    );
}
