use httpmock::Method::{DELETE, GET, POST, PUT};
use httpmock::MockServer;
use movienest_client::config::parse_base_url;
use movienest_client::models::{Credentials, ProfileUpdate, Registration};
use movienest_client::{ApiClient, ClientConfig, ClientError};
use movienest_test_support::fixtures::{catalog_json, user_json};
use serde_json::json;

const TOKEN: &str = "jwt-token";
const BEARER: &str = "Bearer jwt-token";

fn api_for(server: &MockServer) -> ApiClient {
    let base = parse_base_url(&server.base_url()).expect("mock server URL");
    ApiClient::new(&ClientConfig::new(base)).expect("client builds")
}

#[tokio::test]
async fn register_posts_registration_body() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/users").json_body(json!({
            "Username": "neo",
            "Password": "secret",
            "Email": "neo@example.com",
            "BirthDate": "1990-01-31"
        }));
        then.status(201).json_body(user_json("neo", &[]));
    });

    let user = api_for(&server)
        .register(&Registration {
            username: "neo".into(),
            password: "secret".into(),
            email: "neo@example.com".into(),
            birth_date: "1990-01-31".into(),
        })
        .await
        .expect("registration succeeds");

    mock.assert();
    assert_eq!(user.username, "neo");
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/login")
            .json_body(json!({"Username": "neo", "Password": "secret"}));
        then.status(200)
            .json_body(json!({"user": user_json("neo", &["m1"]), "token": TOKEN}));
    });

    let response = api_for(&server)
        .login(&Credentials {
            username: "neo".into(),
            password: "secret".into(),
        })
        .await
        .expect("login succeeds");

    mock.assert();
    assert_eq!(response.token, TOKEN);
    assert_eq!(response.user.favourite_movies, ["m1"]);
}

#[tokio::test]
async fn get_user_sends_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/neo")
            .header("authorization", BEARER);
        then.status(200).json_body(user_json("neo", &["m2"]));
    });

    let user = api_for(&server)
        .get_user(TOKEN, "neo")
        .await
        .expect("user fetch succeeds");

    mock.assert();
    assert_eq!(user.favourite_movies, ["m2"]);
}

#[tokio::test]
async fn update_user_puts_to_given_username() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/users/neo")
            .header("authorization", BEARER)
            .json_body(json!({
                "Username": "thomas",
                "Email": "thomas@example.com",
                "BirthDate": "1990-01-31T00:00:00.000Z",
                "Password": "n3w"
            }));
        then.status(200).json_body(user_json("thomas", &[]));
    });

    let user = api_for(&server)
        .update_user(
            TOKEN,
            "neo",
            &ProfileUpdate {
                username: "thomas".into(),
                email: "thomas@example.com".into(),
                birth_date: "1990-01-31T00:00:00.000Z".into(),
                password: Some("n3w".into()),
            },
        )
        .await
        .expect("update succeeds");

    mock.assert();
    assert_eq!(user.username, "thomas");
}

#[tokio::test]
async fn delete_user_ignores_text_body() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/users/neo")
            .header("authorization", BEARER);
        then.status(200).body("neo was deleted.");
    });

    api_for(&server)
        .delete_user(TOKEN, "neo")
        .await
        .expect("delete succeeds");
    mock.assert();
}

#[tokio::test]
async fn movie_lookups_hit_expected_paths() {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET).path("/movies").header("authorization", BEARER);
        then.status(200).json_body(catalog_json());
    });
    let single = server.mock(|when, then| {
        when.method(GET).path("/movies/Alien");
        then.status(200).json_body(json!({"_id": "m1", "Title": "Alien"}));
    });
    let genre = server.mock(|when, then| {
        when.method(GET).path("/movies/genre/Drama");
        then.status(200)
            .json_body(json!({"Name": "Drama", "Description": "Serious stories"}));
    });
    let director = server.mock(|when, then| {
        when.method(GET).path("/movies/director/Kurosawa");
        then.status(200)
            .json_body(json!({"Name": "Kurosawa", "Bio": "Japanese director", "Death": "1998"}));
    });

    let api = api_for(&server);
    let catalog = api.list_movies(TOKEN).await.expect("catalog");
    let movie = api.get_movie(TOKEN, "Alien").await.expect("movie");
    let drama = api.get_genre(TOKEN, "Drama").await.expect("genre");
    let kurosawa = api.get_director(TOKEN, "Kurosawa").await.expect("director");

    list.assert();
    single.assert();
    genre.assert();
    director.assert();
    assert_eq!(catalog.len(), 3);
    assert_eq!(movie.id, "m1");
    assert_eq!(drama.description, "Serious stories");
    assert_eq!(kurosawa.death.as_deref(), Some("1998"));
}

#[tokio::test]
async fn favorite_endpoints_use_user_movie_paths() {
    let server = MockServer::start_async().await;
    let add = server.mock(|when, then| {
        when.method(POST)
            .path("/users/neo/movies/m2")
            .header("authorization", BEARER);
        then.status(201).json_body(user_json("neo", &["m2"]));
    });
    let remove = server.mock(|when, then| {
        when.method(DELETE)
            .path("/users/neo/movies/m2")
            .header("authorization", BEARER);
        then.status(200).json_body(user_json("neo", &[]));
    });
    let list = server.mock(|when, then| {
        when.method(GET).path("/users/neo/movies");
        then.status(200)
            .json_body(json!(["m1", {"_id": "m3", "Title": "Ran"}]));
    });

    let api = api_for(&server);
    let added = api.add_favorite(TOKEN, "neo", "m2").await.expect("add");
    let removed = api.remove_favorite(TOKEN, "neo", "m2").await.expect("remove");
    let ids = api.list_favorites(TOKEN, "neo").await.expect("list");

    add.assert();
    remove.assert();
    list.assert();
    assert!(added.has_favourite("m2"));
    assert!(!removed.has_favourite("m2"));
    assert_eq!(ids, ["m1", "m3"]);
}

#[tokio::test]
async fn non_success_status_becomes_server_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/users/ghost");
        then.status(404).body("ghost was not found");
    });

    let err = api_for(&server)
        .get_user(TOKEN, "ghost")
        .await
        .expect_err("missing user should fail");

    assert!(
        matches!(&err, ClientError::Server { status: 404, message } if message == "ghost was not found")
    );
    assert_eq!(err.to_string(), "Server error: 404 - ghost was not found");
}

#[tokio::test]
async fn unreachable_server_becomes_transport_error() {
    let base = parse_base_url("http://127.0.0.1:9").expect("valid URL");
    let api = ApiClient::new(&ClientConfig::new(base)).expect("client builds");

    let err = api
        .list_movies(TOKEN)
        .await
        .expect_err("closed port should fail");

    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(err.to_string().starts_with("An error occurred: "));
}

#[tokio::test]
async fn malformed_success_body_becomes_decode_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/movies");
        then.status(200).json_body(json!({"movies": []}));
    });

    let err = api_for(&server)
        .list_movies(TOKEN)
        .await
        .expect_err("object instead of array should fail");

    assert!(matches!(err, ClientError::Decode { what: "movie list", .. }));
}
