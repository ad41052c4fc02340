//! One function per subcommand.

use std::path::PathBuf;

use console::style;
use futures::future::join_all;

use crate::config::Settings;
use crate::enrich::Enricher;
use crate::models::EnrichedMovie;
use crate::render::grid::{compose_grid, fetch_poster_cells, GridSpec};
use crate::render::{self, MessageCard};
use crate::scrapers::LetterboxdScraper;
use crate::tmdb::{DiscoverParams, QuoteClient, TmdbClient};

fn scraper(settings: &Settings) -> LetterboxdScraper {
    LetterboxdScraper::new(settings)
}

fn http_client(settings: &Settings) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(std::time::Duration::from_secs(settings.request_timeout))
        .build()?)
}

fn enricher(settings: &Settings) -> anyhow::Result<Enricher> {
    let api_key = settings
        .tmdb_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("TMDB_API_KEY is not set (flag, config file, or environment)"))?;
    let tmdb = TmdbClient::new(http_client(settings)?, api_key, settings.tmdb_language.clone());
    Ok(Enricher::new(tmdb))
}

fn print_card(card: &MessageCard) {
    println!("\n{}", style(&card.title).bold());
    if let Some(url) = &card.url {
        println!("{}", style(url).dim());
    }
    if let Some(description) = &card.description {
        println!("{}", description);
    }
    for field in &card.fields {
        println!("  {:<12} {}", style(&field.name).cyan(), field.value);
    }
    if let Some(footer) = &card.footer {
        println!("{}", style(footer).dim());
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub async fn cmd_diary(
    settings: &Settings,
    username: &str,
    limit: usize,
    enrich: bool,
) -> anyhow::Result<()> {
    let entries = scraper(settings).fetch_diary(username).await?;
    let entries: Vec<_> = entries.into_iter().take(limit).collect();

    let pairs: Vec<(_, Option<EnrichedMovie>)> = if enrich {
        let enricher = enricher(settings)?;
        let lookups = entries
            .iter()
            .map(|e| enricher.enrich_movie(&e.title, e.year));
        let enriched = join_all(lookups).await;
        entries.into_iter().zip(enriched).collect()
    } else {
        entries.into_iter().map(|e| (e, None)).collect()
    };

    print_card(&render::diary_card(username, &pairs));
    Ok(())
}

pub async fn cmd_reviews(settings: &Settings, username: &str, limit: usize) -> anyhow::Result<()> {
    let reviews = scraper(settings).fetch_reviews(username).await?;
    if reviews.is_empty() {
        println!("{} {} has no reviews", style("!").yellow(), username);
        return Ok(());
    }
    for review in reviews.iter().take(limit) {
        print_card(&render::review_card(review));
    }
    Ok(())
}

pub async fn cmd_favorites(settings: &Settings, username: &str) -> anyhow::Result<()> {
    let favorites = scraper(settings).fetch_favorites(username).await?;
    if favorites.is_empty() {
        println!("{} {} has no favorites", style("!").yellow(), username);
        return Ok(());
    }

    println!("\n{}", style(format!("{}'s favorites", username)).bold());
    println!("{}", "-".repeat(60));
    for favorite in favorites {
        println!(
            "{:<35} {:<6} {}",
            truncate(&favorite.title, 34),
            favorite.year.map(|y| y.to_string()).unwrap_or_default(),
            style(&favorite.url).dim()
        );
    }
    Ok(())
}

pub async fn cmd_likes(settings: &Settings, username: &str) -> anyhow::Result<()> {
    let likes = scraper(settings).fetch_liked_films(username).await?;
    println!(
        "\n{}",
        style(format!("{} liked films", likes.len())).bold()
    );
    println!("{}", "-".repeat(60));
    for film in likes {
        println!(
            "{:<35} {:<6} {}",
            truncate(&film.title, 34),
            film.year.map(|y| y.to_string()).unwrap_or_default(),
            film.slug
        );
    }
    Ok(())
}

pub async fn cmd_watchlist(settings: &Settings, username: &str) -> anyhow::Result<()> {
    let slugs = scraper(settings).fetch_watchlist(username).await?;
    println!(
        "\n{}",
        style(format!("{} watchlist entries", slugs.len())).bold()
    );
    for slug in slugs {
        println!("{}", slug);
    }
    Ok(())
}

pub async fn cmd_film(settings: &Settings, slug: &str, enrich: bool) -> anyhow::Result<()> {
    let Some(film) = scraper(settings).fetch_film_details(slug).await? else {
        println!("{} film '{}' not found", style("✗").red(), slug);
        return Ok(());
    };

    let enriched = if enrich {
        enricher(settings)?.enrich_movie(&film.title, film.year).await
    } else {
        None
    };

    print_card(&render::film_card(&film, enriched.as_ref()));
    Ok(())
}

pub async fn cmd_profile(settings: &Settings, username: &str) -> anyhow::Result<()> {
    let stats = scraper(settings).fetch_profile_stats(username).await?;
    print_card(&render::profile_card(&stats));
    Ok(())
}

pub async fn cmd_movie(settings: &Settings, title: &str, year: Option<i32>) -> anyhow::Result<()> {
    let enricher = enricher(settings)?;
    let Some(movie) = enricher.enrich_movie(title, year).await else {
        println!("{} no TMDB match for '{}'", style("✗").red(), title);
        return Ok(());
    };

    print_card(&render::movie_card(&movie));

    // Trailer and similar titles are decoration; skip them quietly if
    // the lookups fail.
    if let Ok(videos) = enricher.tmdb().movie_videos(movie.id).await {
        if let Some(trailer) = videos
            .iter()
            .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
        {
            println!(
                "  {:<12} https://www.youtube.com/watch?v={}",
                style("Trailer").cyan(),
                trailer.key
            );
        }
    }
    if let Ok(similar) = enricher.tmdb().similar_movies(movie.id).await {
        let titles: Vec<String> = similar
            .results
            .iter()
            .take(3)
            .map(|m| m.title.clone())
            .collect();
        if !titles.is_empty() {
            println!("  {:<12} {}", style("Similar").cyan(), titles.join(", "));
        }
    }
    Ok(())
}

pub async fn cmd_person(settings: &Settings, name: &str) -> anyhow::Result<()> {
    let enricher = enricher(settings)?;
    let results = enricher.tmdb().search_person(name).await?;
    let Some(hit) = results.results.first() else {
        println!("{} no TMDB match for '{}'", style("✗").red(), name);
        return Ok(());
    };

    let person = enricher.tmdb().person_details(hit.id).await?;
    println!("\n{}", style(&person.name).bold());
    if let Some(department) = &person.known_for_department {
        println!("  {:<12} {}", style("Known for").cyan(), department);
    }
    if let Some(birthday) = &person.birthday {
        let place = person.place_of_birth.as_deref().unwrap_or("");
        println!("  {:<12} {} {}", style("Born").cyan(), birthday, place);
    }
    if !person.biography.is_empty() {
        println!("{}", truncate(&person.biography, 600));
    }
    Ok(())
}

pub async fn cmd_discover(
    settings: &Settings,
    genre: Option<&str>,
    year: Option<i32>,
) -> anyhow::Result<()> {
    let enricher = enricher(settings)?;

    let mut params = DiscoverParams::default().sort_by("popularity.desc");
    if let Some(name) = genre {
        let genres = enricher.tmdb().genre_list().await?;
        let Some(genre) = genres
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
        else {
            println!("{} unknown genre '{}'", style("✗").red(), name);
            return Ok(());
        };
        params = params.with_genres(genre.id.to_string());
    }
    if let Some(year) = year {
        params = params.year(year);
    }

    let page = enricher.tmdb().discover_movies(params).await?;
    println!("\n{}", style("Discover").bold());
    println!("{}", "-".repeat(60));
    for movie in page.results.iter().take(10) {
        let year = movie
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .unwrap_or("");
        println!(
            "{:<40} {:<6} {:.1}",
            truncate(&movie.title, 39),
            year,
            movie.vote_average
        );
    }
    Ok(())
}

pub async fn cmd_grid(
    settings: &Settings,
    username: &str,
    cols: u32,
    rows: u32,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let spec = GridSpec::posters(cols, rows);
    let entries = scraper(settings).fetch_diary(username).await?;
    let entries: Vec<_> = entries.into_iter().take(spec.capacity()).collect();
    if entries.is_empty() {
        println!("{} {}'s diary is empty", style("!").yellow(), username);
        return Ok(());
    }

    let enricher = enricher(settings)?;
    let lookups = entries
        .iter()
        .map(|e| enricher.enrich_movie(&e.title, e.year));
    let poster_urls: Vec<Option<String>> = join_all(lookups)
        .await
        .into_iter()
        .map(|m| m.and_then(|m| m.poster_url("w342")))
        .collect();

    let client = http_client(settings)?;
    let cells = fetch_poster_cells(&client, &poster_urls).await;
    let canvas = compose_grid(&spec, &cells);

    let out = match out {
        Some(path) => path,
        None => {
            settings.ensure_directories()?;
            settings.data_dir.join(format!("{}-grid.png", username))
        }
    };
    canvas.save(&out)?;

    println!(
        "{} wrote {}×{} grid to {}",
        style("✓").green(),
        cols,
        rows,
        out.display()
    );
    Ok(())
}

pub async fn cmd_quote(settings: &Settings) -> anyhow::Result<()> {
    let quotes = QuoteClient::new(http_client(settings)?);
    let quote = quotes.random_quote().await?;
    println!("\n“{}”", style(&quote.quote).italic());
    println!(
        "  — {}, {}",
        style(&quote.role).bold(),
        style(&quote.show).dim()
    );
    Ok(())
}
