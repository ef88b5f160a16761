use crate::error::CallbackError;
use crate::models::AppConfig;
use crate::models::oauth::{TokenExchangeRequest, TokenResponse};
use oauth2::{AuthorizationCode, CsrfToken};
use reqwest::header::ACCEPT;

/// Trades an authorization code for an access token at the configured token
/// endpoint. Any failure along the way comes back as `ExchangeFailure`.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &AppConfig,
    code: &AuthorizationCode,
    state: Option<&CsrfToken>,
) -> Result<String, CallbackError> {
    let body = TokenExchangeRequest {
        client_id: config.client_id.as_str(),
        client_secret: config.client_secret.secret(),
        code: code.secret(),
        redirect_uri: config.redirect_uri.as_str(),
        state: state.map(|s| s.secret().as_str()),
    };

    let response = client
        .post(config.token_url.url().as_str())
        .header(ACCEPT, "application/json")
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());
        return Err(CallbackError::ExchangeFailure(format!(
            "token endpoint returned HTTP {}: {}",
            status, error_text
        )));
    }

    let token_data = response.json::<TokenResponse>().await.map_err(|e| {
        CallbackError::ExchangeFailure(format!("failed to parse token response: {}", e))
    })?;

    if let Some(error) = token_data.error {
        let mut message = match token_data.error_description {
            Some(description) => format!("{}: {}", error, description),
            None => error,
        };
        if let Some(uri) = token_data.error_uri {
            message.push_str(&format!(" ({})", uri));
        }
        return Err(CallbackError::ExchangeFailure(message));
    }

    token_data.access_token.ok_or_else(|| {
        CallbackError::ExchangeFailure(
            "token response did not contain an access_token".to_string(),
        )
    })
}
