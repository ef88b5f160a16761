use serde::{Deserialize, Serialize};

/// Query string of the provider redirect. Both fields are optional here so a
/// missing code can be answered with a message instead of a 400.
#[derive(Debug, Deserialize, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Body posted to the token endpoint. Always exactly these five keys;
/// `state` goes out as `null` when the redirect carried none.
#[derive(Debug, Serialize)]
pub struct TokenExchangeRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
    pub state: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
}
