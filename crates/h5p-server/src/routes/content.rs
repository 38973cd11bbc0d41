//! Listing, editing and saving content

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use h5p_kit::{ContentId, StoredContent};
use tracing::{debug, info, warn};

use crate::{
    AppState,
    error::{ApiError, Result},
    models::{ContentQuery, SaveContentRequest},
    templates,
};

/// Start page listing stored content and registered examples
///
/// A content root that cannot be read is shown as an empty list.
pub async fn list_content(State(state): State<AppState>) -> Html<String> {
    let ids = match state.content.list_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            warn!(
                "Failed to list content in {}: {}",
                state.content.base_path().display(),
                e
            );
            Vec::new()
        }
    };

    Html(templates::index_page(&ids, state.examples.registry()))
}

/// Editor page; without an id a fresh one is generated
pub async fn edit_page(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Response> {
    let Some(id) = query.content_id() else {
        let id = ContentId::generate();
        debug!("Redirecting to editor for new content {}", id);
        return Ok(Redirect::to(&format!("/edit?contentId={id}")).into_response());
    };

    let page = state.editor.render(&id).await?;
    Ok(Html(page).into_response())
}

/// Stored parameters of one content package
pub async fn get_params(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<StoredContent>> {
    let id = query
        .content_id()
        .ok_or_else(|| ApiError::ContentNotFound(String::new()))?;

    let content = state.editor.load_content(&id).await.map_err(|e| {
        debug!("Failed to load content {}: {}", id, e);
        ApiError::ContentNotFound(id.to_string())
    })?;

    Ok(Json(content))
}

/// Save authored parameters
pub async fn save_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
    Json(request): Json<SaveContentRequest>,
) -> Result<impl IntoResponse> {
    let id = query
        .content_id()
        .ok_or_else(|| ApiError::bad_request("contentId is required"))?;
    info!("Saving content {} ({})", id, request.library);

    state
        .editor
        .save_content(
            &id,
            request.params.params,
            request.params.metadata,
            &request.library,
        )
        .await?;

    Ok(StatusCode::OK)
}
