use pkce_challenge_check::pkce::{self, PkcePair, UNRESERVED_CHARACTERS};
use pkce_challenge_check::PkceError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn all_unreserved(s: &str) -> bool {
    s.bytes().all(|b| UNRESERVED_CHARACTERS.contains(&b))
}

#[test]
fn default_verifier_is_64_unreserved_chars() {
    let v = pkce::generate_code_verifier();
    assert_eq!(v.len(), pkce::DEFAULT_VERIFIER_LEN);
    assert!(all_unreserved(&v));
    pkce::validate_code_verifier(&v).expect("generated verifier is valid");
}

#[test]
fn verifier_length_bounds_enforced() {
    assert_eq!(pkce::generate_code_verifier_with_len(43).unwrap().len(), 43);
    assert_eq!(pkce::generate_code_verifier_with_len(128).unwrap().len(), 128);
    assert!(matches!(
        pkce::generate_code_verifier_with_len(42),
        Err(PkceError::InvalidVerifierLength(42))
    ));
    assert!(matches!(
        pkce::generate_code_verifier_with_len(129),
        Err(PkceError::InvalidVerifierLength(129))
    ));
}

#[test]
fn seeded_rng_is_reproducible() {
    let a = pkce::generate_with_rng(50, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = pkce::generate_with_rng(50, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn validate_rejects_reserved_characters() {
    let mut v = "a".repeat(50);
    v.push('+');
    assert!(matches!(
        pkce::validate_code_verifier(&v),
        Err(PkceError::InvalidVerifierCharacter('+'))
    ));
    assert!(matches!(
        pkce::validate_code_verifier("short"),
        Err(PkceError::InvalidVerifierLength(5))
    ));
}

#[test]
fn state_values_differ() {
    let a = pkce::generate_state(pkce::DEFAULT_STATE_LEN);
    let b = pkce::generate_state(pkce::DEFAULT_STATE_LEN);
    assert_eq!(a.len(), 50);
    assert!(all_unreserved(&a));
    assert_ne!(a, b);
}

#[test]
fn pair_challenge_matches_verifier() {
    let pair = PkcePair::generate().unwrap();
    assert_eq!(pair.challenge, pkce::compute_challenge(&pair.verifier, "S256").unwrap());
    pkce::verify_challenge(&pair.challenge, &pair.verifier, pair.method.as_str()).unwrap();
}

#[test]
fn pair_with_len_respects_bounds() {
    let pair = PkcePair::generate_with_len(100).unwrap();
    assert_eq!(pair.verifier.len(), 100);
    assert_eq!(pair.challenge, pkce::compute_challenge(&pair.verifier, "S256").unwrap());
    assert!(matches!(
        PkcePair::generate_with_len(42),
        Err(PkceError::InvalidVerifierLength(42))
    ));
}
