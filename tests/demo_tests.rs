use pkce_challenge_check::demo;

#[test]
fn fixture_verifier_matches_stored_challenge() {
    let received = demo::run_demo().expect("fixtures agree");
    assert_eq!(received, demo::STORED_CHALLENGE);
}

#[test]
fn check_reports_mismatch_without_failing() {
    let report =
        demo::check(demo::STORED_CHALLENGE, "not-the-verifier", demo::CODE_CHALLENGE_METHOD)
            .unwrap();
    assert!(!report.valid);
    assert_ne!(report.received_challenge, demo::STORED_CHALLENGE);

    let report =
        demo::check(demo::STORED_CHALLENGE, demo::CODE_VERIFIER, demo::CODE_CHALLENGE_METHOD)
            .unwrap();
    assert!(report.valid);
}

#[test]
fn check_propagates_unsupported_method() {
    assert!(demo::check(demo::STORED_CHALLENGE, demo::CODE_VERIFIER, "plain").is_err());
}
