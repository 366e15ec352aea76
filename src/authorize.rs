use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{PkceError, Result};
use crate::pkce::{self, ChallengeMethod};

/// Everything needed to redirect a user agent to the authorization server.
/// The caller keeps `state` and `verifier` until the redirect comes back.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub server_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub state: String,
    pub verifier: String,
    pub challenge: String,
    pub method: ChallengeMethod,
}

impl AuthorizationRequest {
    pub fn new(cfg: &ClientConfig, verifier: String) -> Result<Self> {
        pkce::validate_code_verifier(&verifier)?;
        let method = ChallengeMethod::S256;
        let challenge = method.challenge(&verifier)?;
        Ok(Self {
            server_url: cfg.server_url.clone(),
            client_id: cfg.client_id.clone(),
            redirect_uri: cfg.redirect_uri.clone(),
            scope: cfg.scope(),
            state: pkce::generate_state(pkce::DEFAULT_STATE_LEN),
            verifier,
            challenge,
            method,
        })
    }

    /// Build the `/authorize` URL.
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.server_url)?;
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| PkceError::InvalidConfig("server_url cannot be a base url".to_string()))?
            .pop_if_empty()
            .push("authorize");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("state", &self.state)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("code_challenge", &self.challenge)
            .append_pair("code_challenge_method", self.method.as_str());
        debug!(url = %url, "built authorization url");
        Ok(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResponse {
    pub code: String,
    pub state: Option<String>,
}

/// Extract `code` and `state` from the URL the user agent was redirected to.
///
/// When `expected_state` is a non-empty value, the returned state must match
/// it. With no saved state (or an empty one) any returned state is accepted.
pub fn parse_authorization_response(
    redirect_url: &str,
    expected_state: Option<&str>,
) -> Result<AuthorizationResponse> {
    let parsed = Url::parse(redirect_url)?;
    let mut code = None;
    let mut state = None;
    for (k, v) in parsed.query_pairs() {
        match k.as_ref() {
            "code" => code = Some(v.into_owned()),
            "state" => state = Some(v.into_owned()),
            _ => {}
        }
    }

    if let Some(expected) = expected_state.filter(|s| !s.is_empty()) {
        let received = state.clone().unwrap_or_default();
        if received != expected {
            warn!("saved state does not match returned state");
            return Err(PkceError::StateMismatch {
                expected: expected.to_string(),
                received,
            });
        }
    }

    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(PkceError::MissingParameter("code"))?;
    Ok(AuthorizationResponse { code, state })
}
