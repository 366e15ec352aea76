//! Core library for pkce-challenge-check
pub mod authorize;
pub mod config;
pub mod demo;
pub mod error;
pub mod pkce;

pub use error::PkceError;
pub use pkce::{compute_challenge, verify_challenge, ChallengeMethod};
