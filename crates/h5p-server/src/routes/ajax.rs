//! The editor's ajax endpoint, dispatched on `?action=`

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Query, Request, State, multipart::Field},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use h5p_kit::{ContentId, UploadedFile};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    AppState,
    error::{ApiError, Result},
    models::{AjaxQuery, AjaxSuccess, LibrariesRequest, UploadedPackage, parse_library_form},
};

/// `GET /ajax`
pub async fn ajax_get(
    State(state): State<AppState>,
    Query(query): Query<AjaxQuery>,
) -> Result<Json<Value>> {
    debug!("GET ajax action {:?}", query.action);

    match query.action.as_deref() {
        Some("content-type-cache") => Ok(Json(state.editor.content_type_cache().await?)),
        Some("libraries") => {
            let library = query.library_ref()?;
            Ok(Json(state.editor.library_data(&library).await?))
        }
        other => Err(ApiError::UnknownAction(other.unwrap_or_default().to_string())),
    }
}

/// `POST /ajax`
pub async fn ajax_post(
    State(state): State<AppState>,
    Query(query): Query<AjaxQuery>,
    request: Request,
) -> Result<Response> {
    debug!("POST ajax action {:?}", query.action);

    match query.action.as_deref() {
        Some("libraries") => library_overview(&state, request).await,
        Some("files") => save_file(&state, &query, request).await,
        Some("library-install") => install_library(&state, &query).await,
        Some("library-upload") => upload_package(&state, &query, request).await,
        other => Err(ApiError::NotImplemented(other.unwrap_or_default().to_string())),
    }
}

async fn library_overview(state: &AppState, request: Request) -> Result<Response> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    let body = Bytes::from_request(request, state)
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;

    let libraries = if is_json {
        serde_json::from_slice::<LibrariesRequest>(&body)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
            .libraries
    } else {
        parse_library_form(&body)?
    };

    let overview = state.editor.library_overview(&libraries).await?;
    Ok(Json(overview).into_response())
}

async fn save_file(state: &AppState, query: &AjaxQuery, request: Request) -> Result<Response> {
    let mut multipart = multipart(state, request).await?;
    let mut body_content_id = None;
    let mut field = None;
    let mut file = None;

    while let Some(part) = next_field(&mut multipart).await? {
        let name = part.name().map(str::to_string);
        match name.as_deref() {
            Some("contentId") => body_content_id = Some(text(part).await?),
            Some("field") => {
                let raw = text(part).await?;
                field = Some(
                    serde_json::from_str::<Value>(&raw)
                        .map_err(|e| ApiError::BadRequest(format!("field: {e}")))?,
                );
            }
            Some("file") => {
                let name = part.file_name().unwrap_or("upload").to_string();
                let content_type = part.content_type().map(str::to_string);
                let bytes = part
                    .bytes()
                    .await
                    .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;
                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    // Content that has not been saved yet is posted as "0"
    let id = match body_content_id.filter(|id| !id.is_empty() && id != "0") {
        Some(id) => ContentId::from(id),
        None => query
            .content_id()
            .ok_or_else(|| ApiError::bad_request("contentId is required"))?,
    };
    let field = field.ok_or_else(|| ApiError::bad_request("field is required"))?;
    let file = file.ok_or_else(|| ApiError::bad_request("file is required"))?;

    let response = state.editor.save_content_file(&id, field, file).await?;
    Ok(Json(response).into_response())
}

async fn install_library(state: &AppState, query: &AjaxQuery) -> Result<Response> {
    let id = query
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("id is required"))?;
    info!("Installing library {}", id);

    state.editor.install_library(id).await?;
    let content_types = state.editor.content_type_cache().await?;

    Ok(Json(AjaxSuccess::new(content_types)).into_response())
}

async fn upload_package(
    state: &AppState,
    query: &AjaxQuery,
    request: Request,
) -> Result<Response> {
    let id = query
        .content_id()
        .ok_or_else(|| ApiError::bad_request("contentId is required"))?;

    let mut multipart = multipart(state, request).await?;
    let mut package = None;
    while let Some(part) = next_field(&mut multipart).await? {
        let name = part.name().map(str::to_string);
        if name.as_deref() == Some("h5p") {
            let bytes = part
                .bytes()
                .await
                .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;
            package = Some(bytes.to_vec());
        }
    }
    let package = package.ok_or_else(|| ApiError::bad_request("h5p file is required"))?;
    info!("Uploading package of {} bytes into {}", package.len(), id);

    state.editor.upload_package(&id, package).await?;
    let (content, content_types) = tokio::try_join!(
        state.editor.load_content(&id),
        state.editor.content_type_cache()
    )?;

    Ok(Json(AjaxSuccess::new(UploadedPackage {
        h5p: content.h5p,
        content: content.params.params,
        content_types,
    }))
    .into_response())
}

async fn multipart(state: &AppState, request: Request) -> Result<Multipart> {
    Multipart::from_request(request, state)
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))
}

async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>> {
    multipart
        .next_field()
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))
}

async fn text(field: Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::rejected(e.status(), e.body_text()))
}
