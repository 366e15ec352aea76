//! PKCE helpers: verifier/state generation and the S256 challenge.
//!
//! The S256 transform here is `base64(hex(sha256(verifier)))` with standard
//! padded base64, not the raw-digest base64url of RFC 7636. Challenges stored
//! by existing authorization servers were produced with this exact transform.
use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{PkceError, Result};

/// Characters allowed in a verifier or state value (RFC 3986 unreserved).
pub const UNRESERVED_CHARACTERS: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-._~";

pub const MIN_VERIFIER_LEN: usize = 43;
pub const MAX_VERIFIER_LEN: usize = 128;
pub const DEFAULT_VERIFIER_LEN: usize = 64;
pub const DEFAULT_STATE_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeMethod {
    S256,
}

impl ChallengeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeMethod::S256 => "S256",
        }
    }

    /// Derive the challenge for `verifier` with this method.
    pub fn challenge(&self, verifier: &str) -> Result<String> {
        if !verifier.is_ascii() {
            return Err(PkceError::NonAsciiVerifier);
        }
        match self {
            ChallengeMethod::S256 => {
                let digest = Sha256::digest(verifier.as_bytes());
                let hex = format!("{:x}", digest);
                Ok(general_purpose::STANDARD.encode(hex.as_bytes()))
            }
        }
    }
}

impl FromStr for ChallengeMethod {
    type Err = PkceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "S256" => Ok(ChallengeMethod::S256),
            other => Err(PkceError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for ChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute `code_challenge` from `code_verifier` and `code_challenge_method`.
///
/// The method is checked before the verifier, so an unknown method is
/// reported even for a non-ASCII verifier.
pub fn compute_challenge(verifier: &str, method: &str) -> Result<String> {
    let method: ChallengeMethod = method.parse()?;
    let challenge = method.challenge(verifier)?;
    debug!(method = %method, verifier_len = verifier.len(), "computed code_challenge");
    Ok(challenge)
}

/// Recompute the challenge for `verifier` and compare it with `stored`.
pub fn verify_challenge(stored: &str, verifier: &str, method: &str) -> Result<()> {
    let received = compute_challenge(verifier, method)?;
    if received != stored {
        warn!(expected = %stored, received = %received, "code_verifier rejected");
        return Err(PkceError::ChallengeMismatch {
            expected: stored.to_string(),
            received,
        });
    }
    info!(method = %method, "code_verifier accepted");
    Ok(())
}

/// Check length bounds and that only unreserved characters are used.
pub fn validate_code_verifier(verifier: &str) -> Result<()> {
    let len = verifier.len();
    if !(MIN_VERIFIER_LEN..=MAX_VERIFIER_LEN).contains(&len) {
        return Err(PkceError::InvalidVerifierLength(len));
    }
    if let Some(c) = verifier.chars().find(|c| !is_unreserved(*c)) {
        return Err(PkceError::InvalidVerifierCharacter(c));
    }
    Ok(())
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii() && UNRESERVED_CHARACTERS.contains(&(c as u8))
}

fn random_unreserved<R: Rng>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| UNRESERVED_CHARACTERS[rng.gen_range(0..UNRESERVED_CHARACTERS.len())] as char)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_unreserved(DEFAULT_VERIFIER_LEN, &mut rand::thread_rng())
}

pub fn generate_code_verifier_with_len(len: usize) -> Result<String> {
    generate_with_rng(len, &mut rand::thread_rng())
}

/// Generate a verifier from the provided RNG (seeded RNGs make this reproducible).
pub fn generate_with_rng<R: Rng>(len: usize, rng: &mut R) -> Result<String> {
    if !(MIN_VERIFIER_LEN..=MAX_VERIFIER_LEN).contains(&len) {
        return Err(PkceError::InvalidVerifierLength(len));
    }
    Ok(random_unreserved(len, rng))
}

/// Random opaque `state` value sent with the authorization request.
pub fn generate_state(len: usize) -> String {
    random_unreserved(len, &mut rand::thread_rng())
}

/// A verifier together with its S256 challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
    pub method: ChallengeMethod,
}

impl PkcePair {
    pub fn generate() -> Result<Self> {
        Self::from_verifier(generate_code_verifier())
    }

    pub fn generate_with_len(len: usize) -> Result<Self> {
        Self::from_verifier(generate_code_verifier_with_len(len)?)
    }

    pub fn from_verifier(verifier: String) -> Result<Self> {
        let method = ChallengeMethod::S256;
        let challenge = method.challenge(&verifier)?;
        Ok(Self {
            verifier,
            challenge,
            method,
        })
    }
}
