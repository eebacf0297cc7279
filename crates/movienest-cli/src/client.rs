//! CLI error type and the application context shared by command handlers.

use std::fmt::{self, Display, Formatter};

use movienest_client::{ApiClient, ClientConfig, ClientError, FileStorage, SessionStore};
use url::Url;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => error.to_string(),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        if err.is_user_error() {
            Self::Validation(err.to_string())
        } else {
            Self::Failure(err.into())
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) api: ApiClient,
    pub(crate) session: SessionStore<FileStorage>,
}

impl AppContext {
    /// Build the HTTP client and open the on-disk session.
    pub(crate) fn new(config: &ClientConfig) -> CliResult<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            session: SessionStore::new(FileStorage::new(&config.session_dir)),
        })
    }
}

/// Parse the API URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    movienest_client::config::parse_base_url(input).map_err(|err| err.to_string())
}

/// Context against a mock server with the session kept in `session_dir`.
#[cfg(test)]
pub(crate) fn context_for(base_url: &str, session_dir: &std::path::Path) -> AppContext {
    let base = parse_url(base_url).expect("mock server URL");
    AppContext::new(&ClientConfig::new(base).with_session_dir(session_dir)).expect("context builds")
}
