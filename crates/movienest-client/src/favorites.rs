//! Favourite resolution and toggling.
//!
//! # Design
//! - The authoritative favourite list is `User.FavouriteMovies` from the
//!   server's user record; movies are resolved client-side against the catalog.
//! - Local state changes only after the server confirms a toggle.
//! - Until favourites load, nothing reads as a favourite.

use std::collections::HashSet;

use movienest_api_models::Movie;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;

/// Catalog movies whose identifier is in `favorite_ids`, in catalog order.
#[must_use]
pub fn resolve_favorites(favorite_ids: &[String], catalog: &[Movie]) -> Vec<Movie> {
    if favorite_ids.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<&str> = favorite_ids.iter().map(String::as_str).collect();
    catalog
        .iter()
        .filter(|movie| wanted.contains(movie.id.as_str()))
        .cloned()
        .collect()
}

/// Result of a confirmed toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The movie was added to the favourites.
    Added,
    /// The movie was removed from the favourites.
    Removed,
}

/// Catalog plus favourite-state for one view.
#[derive(Debug, Clone, Default)]
pub struct FavoritesView {
    catalog: Option<Vec<Movie>>,
    favorite_ids: Vec<String>,
    loaded: bool,
}

impl FavoritesView {
    /// View with neither catalog nor favourites loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// View over a catalog supplied by the caller.
    #[must_use]
    pub fn with_catalog(catalog: Vec<Movie>) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::default()
        }
    }

    /// Replace the catalog.
    pub fn set_catalog(&mut self, catalog: Vec<Movie>) {
        self.catalog = Some(catalog);
    }

    /// Replace the favourite identifiers and mark them loaded.
    pub fn set_favorites(&mut self, ids: Vec<String>) {
        self.favorite_ids = ids;
        self.loaded = true;
    }

    /// Loaded catalog, if any.
    #[must_use]
    pub fn catalog(&self) -> Option<&[Movie]> {
        self.catalog.as_deref()
    }

    /// Current favourite identifiers.
    #[must_use]
    pub fn favorite_ids(&self) -> &[String] {
        &self.favorite_ids
    }

    /// Whether favourites are still being fetched.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// Whether `movie_id` is a favourite. Always `false` while loading.
    #[must_use]
    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.loaded && self.favorite_ids.iter().any(|id| id == movie_id)
    }

    /// Favourite movies in catalog order, or `None` until the catalog arrives.
    #[must_use]
    pub fn resolved(&self) -> Option<Vec<Movie>> {
        self.catalog
            .as_deref()
            .map(|catalog| resolve_favorites(&self.favorite_ids, catalog))
    }

    /// Fetch the catalog (unless supplied) and then the authoritative favourites.
    ///
    /// Favourites are marked loaded even when the user fetch fails so the view
    /// stops waiting; the error is returned to the caller.
    ///
    /// # Errors
    ///
    /// Session-missing, transport, server and decode failures.
    pub async fn load<S: KeyValueStorage>(
        &mut self,
        api: &ApiClient,
        session: &SessionStore<S>,
    ) -> ClientResult<()> {
        let token = session.require_token()?;
        if self.catalog.is_none() {
            let catalog = api.list_movies(&token).await.inspect_err(|err| {
                error!(error = %err, "error fetching all movies");
            })?;
            self.catalog = Some(catalog);
        }
        self.refresh_favorites(api, session).await
    }

    /// Re-read the favourite identifiers from the server's user record.
    ///
    /// # Errors
    ///
    /// Session-missing, transport, server and decode failures.
    pub async fn refresh_favorites<S: KeyValueStorage>(
        &mut self,
        api: &ApiClient,
        session: &SessionStore<S>,
    ) -> ClientResult<()> {
        let token = session.require_token()?;
        let username = session.require_user()?.username;
        match api.get_user(&token, &username).await {
            Ok(user) => {
                self.set_favorites(user.favourite_movies);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "error fetching favorite movies");
                self.loaded = true;
                Err(err)
            }
        }
    }

    /// Add or remove `movie_id` for the session user.
    ///
    /// Local state and the session snapshot change only after the server
    /// confirms; a failed call leaves both untouched.
    ///
    /// # Errors
    ///
    /// Session-missing, transport, server, decode and storage failures.
    pub async fn toggle_favorite<S: KeyValueStorage>(
        &mut self,
        api: &ApiClient,
        session: &mut SessionStore<S>,
        movie_id: &str,
    ) -> ClientResult<ToggleOutcome> {
        let user = session.require_user()?;
        let token = session.require_token()?;

        let (outcome, confirmed) = if self.is_favorite(movie_id) {
            let confirmed = api
                .remove_favorite(&token, &user.username, movie_id)
                .await
                .inspect_err(|err| {
                    error!(movie_id, error = %err, "error removing movie from favorites");
                })?;
            self.favorite_ids.retain(|id| id != movie_id);
            info!(movie_id, "movie removed from favorites");
            (ToggleOutcome::Removed, confirmed)
        } else {
            let confirmed = api
                .add_favorite(&token, &user.username, movie_id)
                .await
                .inspect_err(|err| {
                    error!(movie_id, error = %err, "error adding movie to favorites");
                })?;
            if !self.favorite_ids.iter().any(|id| id == movie_id) {
                self.favorite_ids.push(movie_id.to_string());
            }
            info!(movie_id, "movie added to favorites");
            (ToggleOutcome::Added, confirmed)
        };

        if confirmed.username == user.username {
            session.save_user(&confirmed)?;
        } else {
            warn!(
                expected = %user.username,
                received = %confirmed.username,
                "favorite update returned a different user; session snapshot left as is"
            );
        }
        Ok(outcome)
    }
}
