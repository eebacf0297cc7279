use movienest_client::{FavoritesView, ToggleOutcome};

use crate::cli::{MovieIdArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::render_movie_list;

/// Favourites come from the user record, as in `movies list --favorites-only`.
pub(crate) async fn handle_favorites_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let mut view = FavoritesView::new();
    view.load(&ctx.api, &ctx.session).await?;
    let movies = view.resolved().unwrap_or_default();
    render_movie_list(&movies, |id| view.is_favorite(id), format)
}

pub(crate) async fn handle_favorite_add(ctx: &mut AppContext, args: MovieIdArgs) -> CliResult<()> {
    change_favorite(ctx, &args.id, Some(ToggleOutcome::Added)).await
}

pub(crate) async fn handle_favorite_remove(
    ctx: &mut AppContext,
    args: MovieIdArgs,
) -> CliResult<()> {
    change_favorite(ctx, &args.id, Some(ToggleOutcome::Removed)).await
}

pub(crate) async fn handle_favorite_toggle(
    ctx: &mut AppContext,
    args: MovieIdArgs,
) -> CliResult<()> {
    change_favorite(ctx, &args.id, None).await
}

/// Bring `movie_id` to the `wanted` state, or flip it when `wanted` is `None`.
/// The current state is read from the server first.
async fn change_favorite(
    ctx: &mut AppContext,
    movie_id: &str,
    wanted: Option<ToggleOutcome>,
) -> CliResult<()> {
    let mut view = FavoritesView::new();
    view.refresh_favorites(&ctx.api, &ctx.session).await?;

    let already = match wanted {
        Some(ToggleOutcome::Added) => view.is_favorite(movie_id),
        Some(ToggleOutcome::Removed) => !view.is_favorite(movie_id),
        None => false,
    };
    if already {
        println!("Favorites already up to date.");
        return Ok(());
    }

    match view
        .toggle_favorite(&ctx.api, &mut ctx.session, movie_id)
        .await?
    {
        ToggleOutcome::Added => println!("Movie added to favorites!"),
        ToggleOutcome::Removed => println!("Movie removed from favorites!"),
    }
    Ok(())
}
