use crate::error::CallbackError;
use crate::handlers::oauth::token_exchange::exchange_code;
use crate::models::AppState;
use crate::models::oauth::CallbackParams;
use axum::extract::{Query, State};
use oauth2::{AuthorizationCode, CsrfToken};

pub async fn callback_handler(
    Query(params): Query<CallbackParams>,
    State(app_state): State<AppState>,
) -> Result<String, CallbackError> {
    let code = match params.code.filter(|code| !code.is_empty()) {
        Some(code) => AuthorizationCode::new(code),
        None => {
            tracing::debug!("callback received without a code");
            return Err(CallbackError::MissingCode);
        }
    };
    let state = params.state.map(CsrfToken::new);

    tracing::debug!(has_state = state.is_some(), "OAuth callback received");

    if let Some(expected) = &app_state.config.expected_state {
        if state.as_ref() != Some(expected) {
            tracing::warn!("rejecting callback with unexpected state");
            return Err(CallbackError::StateMismatch);
        }
    }

    match exchange_code(
        &app_state.http_client,
        &app_state.config,
        &code,
        state.as_ref(),
    )
    .await
    {
        Ok(access_token) => {
            tracing::info!("token exchange succeeded");
            Ok(format!("Access Token: {}", access_token))
        }
        Err(e) => {
            tracing::warn!(error = %e, "token exchange failed");
            Err(e)
        }
    }
}
