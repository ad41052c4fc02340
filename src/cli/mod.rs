//! Command-line interface definitions and dispatch.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "boxdbot", version, about = "Letterboxd scraping and TMDB enrichment core")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a user's diary.
    Diary {
        username: String,
        /// Entries to show.
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Attach TMDB metadata to each entry.
        #[arg(long)]
        enrich: bool,
    },
    /// Show a user's reviews.
    Reviews {
        username: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Show a user's four profile favorites.
    Favorites { username: String },
    /// Show every film a user has liked.
    Likes { username: String },
    /// Show the slugs on a user's watchlist.
    Watchlist { username: String },
    /// Show one film's detail page.
    Film {
        slug: String,
        /// Attach TMDB metadata.
        #[arg(long)]
        enrich: bool,
    },
    /// Show a user's profile statistics.
    Profile { username: String },
    /// Look a movie up on TMDB directly.
    Movie {
        title: String,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Look a person up on TMDB.
    Person { name: String },
    /// Discover movies by genre and year.
    Discover {
        /// Genre name, e.g. "horror".
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Compose a poster grid from a user's recent diary.
    Grid {
        username: String,
        #[arg(long, default_value_t = 3)]
        cols: u32,
        #[arg(long, default_value_t = 2)]
        rows: u32,
        /// Output PNG path; defaults to the data directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a random movie quote.
    Quote,
}

/// Resolve settings and run the selected command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings_with_options(LoadOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
    });

    match cli.command {
        Command::Diary {
            username,
            limit,
            enrich,
        } => commands::cmd_diary(&settings, &username, limit, enrich).await,
        Command::Reviews { username, limit } => {
            commands::cmd_reviews(&settings, &username, limit).await
        }
        Command::Favorites { username } => commands::cmd_favorites(&settings, &username).await,
        Command::Likes { username } => commands::cmd_likes(&settings, &username).await,
        Command::Watchlist { username } => commands::cmd_watchlist(&settings, &username).await,
        Command::Film { slug, enrich } => commands::cmd_film(&settings, &slug, enrich).await,
        Command::Profile { username } => commands::cmd_profile(&settings, &username).await,
        Command::Movie { title, year } => commands::cmd_movie(&settings, &title, year).await,
        Command::Person { name } => commands::cmd_person(&settings, &name).await,
        Command::Discover { genre, year } => {
            commands::cmd_discover(&settings, genre.as_deref(), year).await
        }
        Command::Grid {
            username,
            cols,
            rows,
            out,
        } => commands::cmd_grid(&settings, &username, cols, rows, out).await,
        Command::Quote => commands::cmd_quote(&settings).await,
    }
}
