//! HTTP routes

pub mod ajax;
pub mod content;
pub mod play;

use axum::{Router, routing::get};

use crate::AppState;

/// All page and API routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content))
        .route("/edit", get(content::edit_page).post(content::save_content))
        .route("/params", get(content::get_params))
        .route("/ajax", get(ajax::ajax_get).post(ajax::ajax_post))
        .route("/play", get(play::play_content))
        .route("/examples/{key}", get(play::play_example))
}
