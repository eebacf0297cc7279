//! HTTP access layer for the MovieNest API.
//!
//! Every operation is a single request: no retries, no caching. Transport
//! failures surface as [`ClientError::Transport`], non-success statuses as
//! [`ClientError::Server`], and success bodies that do not match the expected
//! shape as [`ClientError::Decode`].

use movienest_api_models::{
    Credentials, Director, FavoriteEntry, Genre, LoginResponse, Movie, ProfileUpdate,
    Registration, User,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Stateless request builder bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("movienest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ClientError::Config {
                detail: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Wrap an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /users`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn register(&self, registration: &Registration) -> ClientResult<User> {
        let request = self
            .request(Method::POST, &["users"], None)?
            .json(registration);
        self.fetch_json(request, "registration").await
    }

    /// `POST /login`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        let request = self
            .request(Method::POST, &["login"], None)?
            .json(credentials);
        self.fetch_json(request, "login").await
    }

    /// `GET /users/{username}`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn get_user(&self, token: &str, username: &str) -> ClientResult<User> {
        let request = self.request(Method::GET, &["users", username], Some(token))?;
        self.fetch_json(request, "user").await
    }

    /// `PUT /users/{username}`, keyed by the username *before* the edit.
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn update_user(
        &self,
        token: &str,
        username: &str,
        update: &ProfileUpdate,
    ) -> ClientResult<User> {
        let request = self
            .request(Method::PUT, &["users", username], Some(token))?
            .json(update);
        self.fetch_json(request, "user").await
    }

    /// `DELETE /users/{username}`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Transport and server failures.
    pub async fn delete_user(&self, token: &str, username: &str) -> ClientResult<()> {
        let request = self.request(Method::DELETE, &["users", username], Some(token))?;
        self.execute(request).await.map(drop)
    }

    /// `GET /movies`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn list_movies(&self, token: &str) -> ClientResult<Vec<Movie>> {
        let request = self.request(Method::GET, &["movies"], Some(token))?;
        self.fetch_json(request, "movie list").await
    }

    /// `GET /movies/{title}`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn get_movie(&self, token: &str, title: &str) -> ClientResult<Movie> {
        let request = self.request(Method::GET, &["movies", title], Some(token))?;
        self.fetch_json(request, "movie").await
    }

    /// `GET /movies/director/{name}`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn get_director(&self, token: &str, name: &str) -> ClientResult<Director> {
        let request = self.request(Method::GET, &["movies", "director", name], Some(token))?;
        self.fetch_json(request, "director").await
    }

    /// `GET /movies/genre/{name}`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn get_genre(&self, token: &str, name: &str) -> ClientResult<Genre> {
        let request = self.request(Method::GET, &["movies", "genre", name], Some(token))?;
        self.fetch_json(request, "genre").await
    }

    /// `POST /users/{username}/movies/{movie_id}`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        movie_id: &str,
    ) -> ClientResult<User> {
        let request = self.request(
            Method::POST,
            &["users", username, "movies", movie_id],
            Some(token),
        )?;
        self.fetch_json(request, "user").await
    }

    /// `DELETE /users/{username}/movies/{movie_id}`
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        movie_id: &str,
    ) -> ClientResult<User> {
        let request = self.request(
            Method::DELETE,
            &["users", username, "movies", movie_id],
            Some(token),
        )?;
        self.fetch_json(request, "user").await
    }

    /// `GET /users/{username}/movies`, normalised to movie identifiers.
    ///
    /// # Errors
    ///
    /// Transport, server and decode failures.
    pub async fn list_favorites(&self, token: &str, username: &str) -> ClientResult<Vec<String>> {
        let request = self.request(Method::GET, &["users", username, "movies"], Some(token))?;
        let entries: Vec<FavoriteEntry> = self.fetch_json(request, "favorite list").await?;
        Ok(entries
            .iter()
            .map(|entry| entry.id().to_string())
            .collect())
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| ClientError::Config {
                detail: format!("API URL '{}' cannot carry a path", self.base_url),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
    ) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, authenticated = token.is_some(), "api request");
        let builder = self.client.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = request.send().await.map_err(|source| {
            error!(error = %source, "client-side error");
            ClientError::Transport { source }
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| {
                error!(error = %source, "client-side error while reading response");
                ClientError::Transport { source }
            })?
            .to_vec();
        if status.is_success() {
            Ok(body)
        } else {
            let message = server_message(status, &body);
            error!(status = status.as_u16(), %message, "server-side error");
            Err(ClientError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &'static str,
    ) -> ClientResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(|source| {
            error!(payload = what, error = %source, "unexpected response payload");
            ClientError::Decode { what, source }
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Human-readable detail for a failed response.
fn server_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(detail) = parsed
            .message
            .or(parsed.error)
            .filter(|detail| !detail.trim().is_empty())
        {
            return detail;
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| format!("status {}", status.as_u16()), str::to_string)
    } else {
        text
    }
}
