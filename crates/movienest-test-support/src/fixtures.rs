//! Sample users and movies plus their wire representation.

use movienest_api_models::{Director, Genre, Movie, User};
use serde_json::{Value, json};

/// User with a fixed email, birth date and no favourites.
#[must_use]
pub fn sample_user(username: &str) -> User {
    User {
        username: username.to_string(),
        password: None,
        email: format!("{}@example.com", username.to_ascii_lowercase()),
        birth_date: "1990-01-31".to_string(),
        favourite_movies: Vec::new(),
    }
}

/// Movie with deterministic genre and director.
#[must_use]
pub fn sample_movie(id: &str, title: &str) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} synopsis"),
        genre: Genre {
            name: "Drama".to_string(),
            description: "Serious stories".to_string(),
        },
        director: Director {
            name: "Jane Doe".to_string(),
            bio: "Award-winning director".to_string(),
            birth: Some("1950".to_string()),
            death: None,
        },
        image_path: None,
        featured: false,
    }
}

/// Three-movie catalog with identifiers `m1`, `m2`, `m3`.
#[must_use]
pub fn sample_catalog() -> Vec<Movie> {
    vec![
        sample_movie("m1", "Alien"),
        sample_movie("m2", "Heat"),
        sample_movie("m3", "Ran"),
    ]
}

/// Server-side JSON for a user, including the `_id` and hashed password the
/// API echoes back.
#[must_use]
pub fn user_json(username: &str, favourites: &[&str]) -> Value {
    json!({
        "_id": format!("id-{username}"),
        "Username": username,
        "Password": "$2b$10$abcdefghijklmnopqrstuv",
        "Email": format!("{}@example.com", username.to_ascii_lowercase()),
        "BirthDate": "1990-01-31T00:00:00.000Z",
        "FavouriteMovies": favourites,
    })
}

/// Server-side JSON for [`sample_catalog`].
#[must_use]
pub fn catalog_json() -> Value {
    json!(sample_catalog())
}
