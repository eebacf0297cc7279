//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use movienest_api_models::{Director, Genre, Movie, User};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const TITLE_WIDTH: usize = 32;

pub(crate) fn render_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct MovieRow<'a> {
    #[serde(flatten)]
    movie: &'a Movie,
    #[serde(rename = "IsFavorite")]
    favorite: bool,
}

pub(crate) fn render_movie_list(
    movies: &[Movie],
    is_favorite: impl Fn(&str) -> bool,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<MovieRow<'_>> = movies
                .iter()
                .map(|movie| MovieRow {
                    movie,
                    favorite: is_favorite(&movie.id),
                })
                .collect();
            render_json(&rows)?;
        }
        OutputFormat::Table => println!("{}", movie_list_table(movies, is_favorite)),
    }
    Ok(())
}

pub(crate) fn movie_list_table(movies: &[Movie], is_favorite: impl Fn(&str) -> bool) -> String {
    if movies.is_empty() {
        return "no movies".to_string();
    }
    let mut lines = vec![format!(
        "{:<26} {:<3} {:<TITLE_WIDTH$} {:<14} DIRECTOR",
        "ID", "FAV", "TITLE", "GENRE"
    )];
    for movie in movies {
        let marker = if is_favorite(&movie.id) { "*" } else { "" };
        lines.push(format!(
            "{:<26} {:<3} {:<TITLE_WIDTH$} {:<14} {}",
            movie.id,
            marker,
            truncate(&movie.title, TITLE_WIDTH),
            movie.genre.name,
            movie.director.name
        ));
    }
    lines.join("\n")
}

pub(crate) fn render_movie_detail(movie: &Movie, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(movie)?,
        OutputFormat::Table => println!("{}", movie_detail_table(movie)),
    }
    Ok(())
}

pub(crate) fn movie_detail_table(movie: &Movie) -> String {
    let mut lines = vec![
        format!("id: {}", movie.id),
        format!("title: {}", movie.title),
        format!("genre: {}", movie.genre.name),
        format!("director: {}", movie.director.name),
    ];
    if movie.featured {
        lines.push("featured: yes".to_string());
    }
    if let Some(image) = &movie.image_path {
        lines.push(format!("image: {image}"));
    }
    if !movie.description.is_empty() {
        lines.push(String::new());
        lines.push(movie.description.clone());
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct Synopsis<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
}

pub(crate) fn render_synopsis(movie: &Movie, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&Synopsis {
            title: &movie.title,
            description: &movie.description,
        })?,
        OutputFormat::Table => println!("{}\n\n{}", movie.title, movie.description),
    }
    Ok(())
}

pub(crate) fn render_genre(genre: &Genre, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(genre)?,
        OutputFormat::Table => println!("{}\n\n{}", genre.name, genre.description),
    }
    Ok(())
}

pub(crate) fn render_director(director: &Director, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(director)?,
        OutputFormat::Table => println!("{}", director_table(director)),
    }
    Ok(())
}

pub(crate) fn director_table(director: &Director) -> String {
    let mut lines = vec![director.name.clone()];
    match (&director.birth, &director.death) {
        (Some(birth), Some(death)) => lines.push(format!("{birth} - {death}")),
        (Some(birth), None) => lines.push(format!("born {birth}")),
        (None, Some(death)) => lines.push(format!("died {death}")),
        (None, None) => {}
    }
    if !director.bio.is_empty() {
        lines.push(String::new());
        lines.push(director.bio.clone());
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct ProfileDocument<'a> {
    user: &'a User,
    favorites: &'a [Movie],
}

pub(crate) fn render_profile(user: &User, favorites: &[Movie], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&ProfileDocument { user, favorites })?,
        OutputFormat::Table => println!("{}", profile_table(user, favorites)),
    }
    Ok(())
}

pub(crate) fn profile_table(user: &User, favorites: &[Movie]) -> String {
    let birthday = user.birth_date_ymd().map_or_else(
        || user.birth_date.clone(),
        |date| date.format("%Y-%m-%d").to_string(),
    );
    let mut lines = vec![
        format!("username: {}", user.username),
        format!("email: {}", user.email),
        format!("birthday: {birthday}"),
        format!("favorite movies: {}", favorites.len()),
    ];
    lines.extend(
        favorites
            .iter()
            .map(|movie| format!("  - {} ({})", movie.title, movie.id)),
    );
    lines.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
