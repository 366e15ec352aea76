//! Fixed token-exchange check: the challenge stored when the authorization
//! code was issued against the verifier received with the token request.
use crate::error::{PkceError, Result};
use crate::pkce;

/// Stored on authorization code generation.
pub const STORED_CHALLENGE: &str =
    "OGFkNTNhNWQ3NmQwMjljNGEyYzMyODkwNTkyNTA3NTljZjViYTA0NmU2MmEwMjQ5ZmFmZGY3NjRiMmJjNzhiZg==";

/// Received in the access_token request.
pub const CODE_VERIFIER: &str = "y0AlzK4~4D-TGMuDfB3mpKfC6xRjhqJJ60aUACs_OcH-UJzUo8I3Me8usL3zm2sm";
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// Outcome of a check: the recomputed challenge and whether it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub received_challenge: String,
    pub valid: bool,
}

/// Run the check against arbitrary inputs. Only method errors are returned;
/// a mismatch is reported through `valid`.
pub fn check(stored: &str, verifier: &str, method: &str) -> Result<DemoReport> {
    let received_challenge = pkce::compute_challenge(verifier, method)?;
    let valid = received_challenge == stored;
    Ok(DemoReport {
        received_challenge,
        valid,
    })
}

/// Run the fixed check, failing with `ChallengeMismatch` if the fixtures disagree.
pub fn run_demo() -> Result<String> {
    let report = check(STORED_CHALLENGE, CODE_VERIFIER, CODE_CHALLENGE_METHOD)?;
    if !report.valid {
        return Err(PkceError::ChallengeMismatch {
            expected: STORED_CHALLENGE.to_string(),
            received: report.received_challenge,
        });
    }
    Ok(report.received_challenge)
}
