//! Error types for challenge computation, verification and the authorization helpers.

/// Errors raised by the library. The CLI wraps these in `anyhow` with context.
#[derive(thiserror::Error, Debug)]
pub enum PkceError {
    /// Only `S256` is implemented; carries the rejected method name.
    #[error("Unsupported code_challenge_method '{0}'")]
    UnsupportedMethod(String),

    /// Recomputed challenge differs from the one stored at authorization time.
    #[error(
        "code_verifier does not matches code_challenge (expected {expected}, received {received})"
    )]
    ChallengeMismatch {
        /// Challenge stored when the authorization code was issued
        expected: String,
        /// Challenge recomputed from the received verifier
        received: String,
    },

    /// The verifier is hashed as ASCII text.
    #[error("code_verifier must be ASCII")]
    NonAsciiVerifier,

    #[error("code_verifier length {0} is outside 43..=128")]
    InvalidVerifierLength(usize),

    #[error("code_verifier contains reserved character {0:?}")]
    InvalidVerifierCharacter(char),

    /// Returned `state` differs from the one saved before redirecting.
    #[error("state mismatch: expected {expected}, received {received}")]
    StateMismatch { expected: String, received: String },

    #[error("missing '{0}' parameter in authorization response")]
    MissingParameter(&'static str),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PkceError>;
