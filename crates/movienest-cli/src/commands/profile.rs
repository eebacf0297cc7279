use movienest_client::ProfileView;
use tracing::warn;

use crate::cli::{OutputFormat, ProfileDeleteArgs, ProfileEditArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_profile;

pub(crate) async fn handle_profile_show(
    ctx: &mut AppContext,
    format: OutputFormat,
) -> CliResult<()> {
    let mut view = ProfileView::new();
    view.activate(&ctx.api, &mut ctx.session).await?;
    render_view(&view, format)
}

pub(crate) async fn handle_profile_edit(
    ctx: &mut AppContext,
    args: ProfileEditArgs,
    format: OutputFormat,
) -> CliResult<()> {
    if args.is_empty() {
        return Err(CliError::validation(
            "nothing to change; pass --username, --email, --birth-date or --password",
        ));
    }

    let mut view = ProfileView::new();
    view.activate(&ctx.api, &mut ctx.session).await?;
    let mut form = view.begin_edit()?;
    if let Some(username) = args.username {
        form.username = username;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(birth_date) = args.birth_date {
        form.birth_date = birth_date;
    }
    if let Some(password) = args.password {
        form.password = password;
    }

    view.finish_edit(&ctx.api, &mut ctx.session, Some(form))
        .await?;
    println!("Profile updated.");
    render_view(&view, format)
}

pub(crate) async fn handle_profile_delete(
    ctx: &mut AppContext,
    args: ProfileDeleteArgs,
) -> CliResult<()> {
    if !args.yes {
        return Err(CliError::validation(
            "account deletion is permanent; re-run with --yes to confirm",
        ));
    }
    let mut view = ProfileView::new();
    view.delete_account(&ctx.api, &mut ctx.session).await?;
    println!("Account deleted.");
    Ok(())
}

fn render_view(view: &ProfileView, format: OutputFormat) -> CliResult<()> {
    let user = view
        .user()
        .ok_or_else(|| CliError::validation("profile is not loaded"))?;
    if view.favorites_unresolved() {
        warn!("movie catalog unavailable; favourite movies not shown");
    }
    render_profile(user, &view.favorite_movies(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{DELETE, GET, PUT};
    use httpmock::MockServer;
    use movienest_test_support::fixtures::{catalog_json, sample_user, user_json};
    use serde_json::json;

    use crate::client::context_for;

    fn logged_in(server: &MockServer, dir: &std::path::Path) -> AppContext {
        let mut ctx = context_for(&server.base_url(), dir);
        ctx.session
            .save("jwt-token", &sample_user("neo"))
            .expect("seed session");
        ctx
    }

    fn serve_profile(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/users/neo");
            then.status(200).json_body(user_json("neo", &["m1"]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/movies");
            then.status(200).json_body(catalog_json());
        });
    }

    #[tokio::test]
    async fn show_refreshes_stored_user() {
        let server = MockServer::start_async().await;
        serve_profile(&server);
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ctx = logged_in(&server, dir.path());

        handle_profile_show(&mut ctx, OutputFormat::Json)
            .await
            .expect("show succeeds");

        let stored = ctx.session.require_user().expect("user");
        assert_eq!(stored.favourite_movies, ["m1"]);
        assert_eq!(stored.birth_date, "1990-01-31T00:00:00.000Z");
    }

    #[tokio::test]
    async fn edit_without_fields_is_rejected_up_front() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ctx = logged_in(&server, dir.path());

        let err = handle_profile_edit(&mut ctx, ProfileEditArgs::default(), OutputFormat::Table)
            .await
            .expect_err("nothing to change");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn rename_updates_original_username_and_session() {
        let server = MockServer::start_async().await;
        serve_profile(&server);
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/users/neo")
                .header("authorization", "Bearer jwt-token")
                .json_body(json!({
                    "Username": "thomas",
                    "Email": "neo@example.com",
                    "BirthDate": "1990-01-31T00:00:00.000Z"
                }));
            then.status(200).json_body(user_json("thomas", &["m1"]));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ctx = logged_in(&server, dir.path());

        handle_profile_edit(
            &mut ctx,
            ProfileEditArgs {
                username: Some("thomas".to_string()),
                ..ProfileEditArgs::default()
            },
            OutputFormat::Table,
        )
        .await
        .expect("edit succeeds");

        update.assert();
        let stored = ctx.session.require_user().expect("user");
        assert_eq!(stored.username, "thomas");
        assert!(stored.password.is_none());
    }

    #[tokio::test]
    async fn edit_proceeds_while_catalog_is_down() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/users/neo");
            then.status(200).json_body(user_json("neo", &["m1"]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/movies");
            then.status(503).body("catalog down");
        });
        let update = server.mock(|when, then| {
            when.method(PUT)
                .path("/users/neo")
                .json_body(json!({
                    "Username": "neo",
                    "Email": "new@example.com",
                    "BirthDate": "1990-01-31T00:00:00.000Z"
                }));
            then.status(200).json_body(user_json("neo", &["m1"]));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ctx = logged_in(&server, dir.path());

        handle_profile_show(&mut ctx, OutputFormat::Table)
            .await
            .expect("show without catalog");
        handle_profile_edit(
            &mut ctx,
            ProfileEditArgs {
                email: Some("new@example.com".to_string()),
                ..ProfileEditArgs::default()
            },
            OutputFormat::Table,
        )
        .await
        .expect("edit without catalog");

        assert_eq!(update.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_birth_date_never_reaches_server() {
        let server = MockServer::start_async().await;
        serve_profile(&server);
        let update = server.mock(|when, then| {
            when.method(PUT).path("/users/neo");
            then.status(200);
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ctx = logged_in(&server, dir.path());

        let err = handle_profile_edit(
            &mut ctx,
            ProfileEditArgs {
                birth_date: Some("31/01/1990".to_string()),
                ..ProfileEditArgs::default()
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("bad date");

        assert_eq!(err.exit_code(), 2);
        assert_eq!(update.calls(), 0);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let server = MockServer::start_async().await;
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/users/neo");
            then.status(200).body("neo was deleted.");
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ctx = logged_in(&server, dir.path());

        let err = handle_profile_delete(&mut ctx, ProfileDeleteArgs::default())
            .await
            .expect_err("confirmation required");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(delete.calls(), 0);

        handle_profile_delete(&mut ctx, ProfileDeleteArgs { yes: true })
            .await
            .expect("delete succeeds");
        delete.assert();
        assert!(ctx.session.token().is_none());
        assert!(ctx.session.user().is_none());
    }
}
