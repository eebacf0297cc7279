//! Profile view synchronisation and edit flow.
//!
//! # Design
//! - State machine: `Idle → Loading → Ready ⇄ Editing → Saving → Ready`.
//!   Failures settle in `Ready` (or `Idle` without data), never in
//!   `Loading`/`Saving`.
//! - Updates target the username captured when editing began; the session is
//!   refreshed from the server's response, never from the form values.
//! - A blank password field is omitted from the update payload.

use std::fmt;

use movienest_api_models::{Movie, ProfileUpdate, User, iso_birth_date};
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::auth;
use crate::error::{ClientError, ClientResult, SessionItem};
use crate::favorites::FavoritesView;
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;
use crate::validate;

/// Lifecycle of a profile view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileState {
    /// No data yet.
    #[default]
    Idle,
    /// Fetching the authoritative user record.
    Loading,
    /// Data displayed.
    Ready,
    /// Edit form open.
    Editing,
    /// Update in flight.
    Saving,
}

/// Values collected by the edit form, as typed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Desired username.
    pub username: String,
    /// Desired email address.
    pub email: String,
    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: String,
    /// New password; blank keeps the current one.
    pub password: String,
}

impl ProfileForm {
    /// Form pre-filled from `user` with an empty password.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            birth_date: user.birth_date_ymd().map_or_else(
                || user.birth_date.clone(),
                |date| date.format("%Y-%m-%d").to_string(),
            ),
            password: String::new(),
        }
    }

    /// Validate the form and build the update payload.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for the first invalid field.
    pub fn to_update(&self) -> ClientResult<ProfileUpdate> {
        let username = validate::required("username", &self.username)?;
        let email = validate::email(&self.email)?;
        let birth_date = iso_birth_date(validate::birth_date(&self.birth_date)?);
        let password = (!self.password.trim().is_empty()).then(|| self.password.clone());
        Ok(ProfileUpdate {
            username,
            email,
            birth_date,
            password,
        })
    }
}

impl fmt::Debug for ProfileForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .field(
                "password",
                &if self.password.is_empty() { "" } else { "<redacted>" },
            )
            .finish()
    }
}

/// Profile page state: user record, edit flow and favourite movies.
#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    state: ProfileState,
    user: Option<User>,
    original_username: Option<String>,
    favorites: FavoritesView,
}

impl ProfileView {
    /// Fresh view in [`ProfileState::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ProfileState {
        self.state
    }

    /// Displayed user record.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Username captured when the current edit began.
    #[must_use]
    pub fn original_username(&self) -> Option<&str> {
        self.original_username.as_deref()
    }

    /// Favourite state backing the view.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesView {
        &self.favorites
    }

    /// Favourite movies resolved against the catalog; empty until it loads.
    #[must_use]
    pub fn favorite_movies(&self) -> Vec<Movie> {
        self.favorites.resolved().unwrap_or_default()
    }

    /// Whether favourites are still waiting on the catalog.
    #[must_use]
    pub fn favorites_unresolved(&self) -> bool {
        self.favorites.catalog().is_none()
    }

    /// Load the authoritative record for the session user, persist it and
    /// resolve favourites against the catalog.
    ///
    /// A catalog failure does not fail activation: the profile stays `Ready`
    /// and [`Self::favorites_unresolved`] reports the gap.
    ///
    /// # Errors
    ///
    /// Session-missing, transport, server, decode and storage failures on the
    /// user record. The view settles in `Ready` (or `Idle` without prior data).
    pub async fn activate<S: KeyValueStorage>(
        &mut self,
        api: &ApiClient,
        session: &mut SessionStore<S>,
    ) -> ClientResult<()> {
        let (token, stored) = match session
            .require_token()
            .and_then(|token| session.require_user().map(|user| (token, user)))
        {
            Ok(pair) => pair,
            Err(err) => {
                self.settle();
                return Err(err);
            }
        };

        self.state = ProfileState::Loading;
        let user = match api.get_user(&token, &stored.username).await {
            Ok(user) => user.without_password(),
            Err(err) => {
                error!(error = %err, "error fetching user profile");
                self.settle();
                return Err(err);
            }
        };
        self.favorites.set_favorites(user.favourite_movies.clone());
        self.user = Some(user.clone());
        self.state = ProfileState::Ready;
        session.save_user(&user)?;

        if self.favorites.catalog().is_none() {
            match api.list_movies(&token).await {
                Ok(catalog) => self.favorites.set_catalog(catalog),
                Err(err) => {
                    warn!(error = %err, "catalog unavailable; favourites left unresolved");
                }
            }
        }
        Ok(())
    }

    /// Open the edit form, capturing the current username.
    ///
    /// # Errors
    ///
    /// [`ClientError::SessionMissing`] when no profile is loaded;
    /// [`ClientError::Validation`] when the view is busy.
    pub fn begin_edit(&mut self) -> ClientResult<ProfileForm> {
        let Some(user) = &self.user else {
            return Err(ClientError::SessionMissing {
                what: SessionItem::User,
            });
        };
        if !matches!(self.state, ProfileState::Ready | ProfileState::Editing) {
            return Err(ClientError::validation(
                "profile",
                "cannot edit while a request is in flight",
            ));
        }
        let form = ProfileForm::from_user(user);
        self.original_username = Some(user.username.clone());
        self.state = ProfileState::Editing;
        Ok(form)
    }

    /// Close the edit form without saving.
    pub fn cancel_edit(&mut self) {
        if self.state == ProfileState::Editing {
            self.original_username = None;
            self.settle();
        }
    }

    /// Complete the edit dialog. `None` means the dialog was dismissed.
    ///
    /// On success the view and the session take the server's returned record.
    /// An invalid form keeps the view in `Editing`.
    ///
    /// # Errors
    ///
    /// Validation, session-missing, transport, server, decode and storage failures.
    pub async fn finish_edit<S: KeyValueStorage>(
        &mut self,
        api: &ApiClient,
        session: &mut SessionStore<S>,
        result: Option<ProfileForm>,
    ) -> ClientResult<()> {
        let Some(form) = result else {
            self.cancel_edit();
            return Ok(());
        };
        let Some(original) = self
            .original_username
            .clone()
            .filter(|_| self.state == ProfileState::Editing)
        else {
            return Err(ClientError::validation("profile", "no edit in progress"));
        };
        let update = form.to_update()?;
        let token = match session.require_token() {
            Ok(token) => token,
            Err(err) => {
                self.original_username = None;
                self.settle();
                return Err(err);
            }
        };

        self.state = ProfileState::Saving;
        let outcome = api.update_user(&token, &original, &update).await;
        self.original_username = None;
        let user = match outcome {
            Ok(user) => user.without_password(),
            Err(err) => {
                error!(username = %original, error = %err, "error updating user");
                self.settle();
                return Err(err);
            }
        };
        info!(from = %original, to = %user.username, "user updated");
        self.favorites.set_favorites(user.favourite_movies.clone());
        self.user = Some(user.clone());
        self.state = ProfileState::Ready;
        session.save_user(&user)
    }

    /// Delete the account server-side and clear the session.
    ///
    /// # Errors
    ///
    /// Session-missing, transport, server and storage failures.
    pub async fn delete_account<S: KeyValueStorage>(
        &mut self,
        api: &ApiClient,
        session: &mut SessionStore<S>,
    ) -> ClientResult<()> {
        let token = session.require_token()?;
        let username = match &self.user {
            Some(user) => user.username.clone(),
            None => session.require_user()?.username,
        };
        api.delete_user(&token, &username)
            .await
            .inspect_err(|err| error!(%username, error = %err, "error deleting user"))?;
        info!(%username, "account deleted");
        *self = Self::default();
        auth::sign_out(session)
    }

    fn settle(&mut self) {
        self.state = if self.user.is_some() {
            ProfileState::Ready
        } else {
            ProfileState::Idle
        };
    }
}
