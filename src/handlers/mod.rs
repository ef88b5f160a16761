pub mod oauth;

use crate::models::AppState;
use axum::{Router, routing::get};
use oauth::callback_handler;

/// The provider redirects back to `/`, so that is the only route.
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(callback_handler))
        .with_state(app_state)
}
