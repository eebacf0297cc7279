#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Typed client for the MovieNest catalog API.
//!
//! Layout:
//! - `config.rs`: base URL, timeout and session directory resolution
//! - `error.rs`: client error taxonomy
//! - `storage.rs`: key-value storage backends (file, memory)
//! - `session.rs`: persisted bearer token and user snapshot
//! - `api.rs`: HTTP request builders and response normalisation
//! - `auth.rs`: sign-in, sign-up and sign-out flows
//! - `favorites.rs`: favourite resolution and toggling
//! - `profile.rs`: profile view synchronisation and edit flow
//! - `validate.rs`: form-level validation shared by the flows

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod profile;
pub mod session;
pub mod storage;
pub mod validate;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, SessionItem};
pub use favorites::{FavoritesView, ToggleOutcome, resolve_favorites};
pub use profile::{ProfileForm, ProfileState, ProfileView};
pub use session::{Session, SessionStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub use movienest_api_models as models;
