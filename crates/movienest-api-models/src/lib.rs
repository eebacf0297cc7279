#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared HTTP DTOs for the MovieNest API.
//!
//! The remote service speaks PascalCase JSON (`Username`, `FavouriteMovies`,
//! `_id`) and is not owned by this workspace. Every payload is re-typed here so
//! callers never handle untyped JSON; fields the service may omit or send as
//! `null` collapse to their defaults instead of failing the whole response.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize};

/// Registered account as returned by the user endpoints.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity key. Mutable; renames re-key the record server-side.
    #[serde(rename = "Username")]
    pub username: String,
    /// Write-only credential. Present only on outbound payloads or hashed
    /// echoes from the server; never persisted in the local session.
    #[serde(
        rename = "Password",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<String>,
    /// Contact address.
    #[serde(rename = "Email", default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Birth date as sent by the server (ISO date or timestamp).
    #[serde(rename = "BirthDate", default, deserialize_with = "null_as_default")]
    pub birth_date: String,
    /// Movie identifiers the user marked as favourite, in server order.
    #[serde(
        rename = "FavouriteMovies",
        default,
        deserialize_with = "null_as_default"
    )]
    pub favourite_movies: Vec<String>,
}

impl User {
    /// Copy of the record with the credential stripped.
    #[must_use]
    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }

    /// Whether `movie_id` is part of the favourite list.
    #[must_use]
    pub fn has_favourite(&self, movie_id: &str) -> bool {
        self.favourite_movies.iter().any(|id| id == movie_id)
    }

    /// Calendar date of birth, when the stored value parses.
    #[must_use]
    pub fn birth_date_ymd(&self) -> Option<NaiveDate> {
        parse_birth_date(&self.birth_date)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .field("favourite_movies", &self.favourite_movies)
            .finish()
    }
}

/// Genre attached to a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Display name, also the lookup key for `/movies/genre/{name}`.
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "Description", default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Director attached to a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    /// Display name, also the lookup key for `/movies/director/{name}`.
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Short biography.
    #[serde(rename = "Bio", default, deserialize_with = "null_as_default")]
    pub bio: String,
    /// Birth date or year when known.
    #[serde(rename = "Birth", default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    /// Death date or year when applicable.
    #[serde(rename = "Death", default, skip_serializing_if = "Option::is_none")]
    pub death: Option<String>,
}

/// Catalog entry. Server-owned and never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable identifier used by the favourites endpoints.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title, also the lookup key for `/movies/{title}`.
    #[serde(rename = "Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Synopsis.
    #[serde(rename = "Description", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Genre summary.
    #[serde(rename = "Genre", default, deserialize_with = "null_as_default")]
    pub genre: Genre,
    /// Director summary.
    #[serde(rename = "Director", default, deserialize_with = "null_as_default")]
    pub director: Director,
    /// Poster location when provided.
    #[serde(rename = "ImagePath", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Editorial highlight flag.
    #[serde(rename = "Featured", default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

/// Login request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account name, matched case-sensitively.
    #[serde(rename = "Username")]
    pub username: String,
    /// Plain-text password, sent over TLS only.
    #[serde(rename = "Password")]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Authenticated account.
    pub user: User,
    /// Bearer credential for subsequent calls.
    pub token: String,
}

/// Account creation request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Requested account name.
    #[serde(rename = "Username")]
    pub username: String,
    /// Initial password.
    #[serde(rename = "Password")]
    pub password: String,
    /// Contact address.
    #[serde(rename = "Email")]
    pub email: String,
    /// Birth date (`YYYY-MM-DD`).
    #[serde(rename = "BirthDate")]
    pub birth_date: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .finish()
    }
}

/// Profile update request body for `PUT /users/{username}`.
///
/// `password` is omitted from the JSON entirely when `None` so the server
/// keeps the existing credential.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// New (or unchanged) account name.
    #[serde(rename = "Username")]
    pub username: String,
    /// New (or unchanged) contact address.
    #[serde(rename = "Email")]
    pub email: String,
    /// Birth date as an ISO-8601 timestamp at UTC midnight.
    #[serde(rename = "BirthDate")]
    pub birth_date: String,
    /// Replacement password, only when the user typed one.
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Element of a `/users/{username}/movies` listing.
///
/// Deployments differ on whether the list is populated, so both the bare
/// identifier and the full movie record are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FavoriteEntry {
    /// Bare movie identifier.
    Id(String),
    /// Populated movie record.
    Movie(Box<Movie>),
}

impl FavoriteEntry {
    /// Movie identifier regardless of representation.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Movie(movie) => &movie.id,
        }
    }
}

/// Parse a birth date typed by a user or echoed by the server.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is kept).
#[must_use]
pub fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// Render a date as the ISO timestamp the server expects (`1990-01-31T00:00:00.000Z`).
#[must_use]
pub fn iso_birth_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
