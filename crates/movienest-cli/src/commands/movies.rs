use movienest_client::FavoritesView;
use tracing::warn;

use crate::cli::{MovieListArgs, NameArgs, OutputFormat, TitleArgs};
use crate::client::{AppContext, CliResult};
use crate::output::{
    render_director, render_genre, render_movie_detail, render_movie_list, render_synopsis,
};

pub(crate) async fn handle_movie_list(
    ctx: &AppContext,
    args: MovieListArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let mut view = FavoritesView::new();
    if let Err(err) = view.load(&ctx.api, &ctx.session).await {
        if args.favorites_only || view.catalog().is_none() {
            return Err(err.into());
        }
        warn!(error = %err, "favorites unavailable; listing catalog without them");
    }

    let movies = if args.favorites_only {
        view.resolved().unwrap_or_default()
    } else {
        view.catalog().map(<[_]>::to_vec).unwrap_or_default()
    };
    render_movie_list(&movies, |id| view.is_favorite(id), format)
}

pub(crate) async fn handle_movie_show(
    ctx: &AppContext,
    args: TitleArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let token = ctx.session.require_token()?;
    let movie = ctx.api.get_movie(&token, &args.title).await?;
    render_movie_detail(&movie, format)
}

pub(crate) async fn handle_movie_synopsis(
    ctx: &AppContext,
    args: TitleArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let token = ctx.session.require_token()?;
    let movie = ctx.api.get_movie(&token, &args.title).await?;
    render_synopsis(&movie, format)
}

pub(crate) async fn handle_genre(
    ctx: &AppContext,
    args: NameArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let token = ctx.session.require_token()?;
    let genre = ctx.api.get_genre(&token, &args.name).await?;
    render_genre(&genre, format)
}

pub(crate) async fn handle_director(
    ctx: &AppContext,
    args: NameArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let token = ctx.session.require_token()?;
    let director = ctx.api.get_director(&token, &args.name).await?;
    render_director(&director, format)
}
