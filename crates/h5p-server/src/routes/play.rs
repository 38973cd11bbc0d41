//! Playing stored content and bundled examples

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use h5p_kit::{ContentId, PlayableContent};
use tracing::{debug, error};

use crate::{
    AppState,
    error::{ApiError, Result},
    examples,
    models::ContentQuery,
};

/// Render stored content; failures are reported with their message
pub async fn play_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Response> {
    let Some(id) = query.content_id() else {
        return Ok(Redirect::to("/").into_response());
    };
    debug!("Playing content {}", id);

    let page = render_stored(&state, id).await.map_err(|e| {
        error!("Failed to play content: {}", e);
        ApiError::render(e)
    })?;

    Ok(Html(page).into_response())
}

async fn render_stored(state: &AppState, id: ContentId) -> h5p_kit::Result<String> {
    let (manifest, params) = tokio::try_join!(
        state.content.load_manifest(&id),
        state.content.load_params(&id)
    )?;
    let files_url = format!(
        "{}/{}",
        state.editor_config.files_path.trim_end_matches('/'),
        id
    );

    state
        .player
        .render(&PlayableContent {
            id,
            manifest,
            params,
            files_url,
        })
        .await
}

/// Fetch an example on first use, then render it
pub async fn play_example(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Html<String>> {
    let dir = state.examples.ensure(&key).await.map_err(|e| match e {
        ApiError::ExampleNotFound(_) => e,
        other => {
            error!("Failed to fetch example {}: {}", key, other);
            ApiError::render(other)
        }
    })?;

    let (manifest, params) = examples::load_package(&dir)
        .await
        .map_err(ApiError::render)?;

    let page = state
        .player
        .render(&PlayableContent {
            id: ContentId::from(key.as_str()),
            manifest,
            params,
            files_url: format!("/examples/{key}/files/content"),
        })
        .await
        .map_err(|e| {
            error!("Failed to play example {}: {}", key, e);
            ApiError::render(e)
        })?;

    Ok(Html(page))
}
