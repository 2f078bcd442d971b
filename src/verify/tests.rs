use super::*;

#[test]
fn test_matching_sequences_pass() {
    let outcome = verify_texts("10\n20\n30", "10\n20\n30");

    assert!(outcome.is_pass());
    assert_eq!(outcome.exit_code(), EXIT_PASS);
    assert_eq!(
        outcome.report(),
        "[harness] PASS AES Decryption  (expected=[10, 20, 30], got=[10, 20, 30])"
    );
}

#[test]
fn test_single_difference_fails() {
    let outcome = verify_texts("10\n20\n30", "10\n20\n31");

    assert_eq!(outcome.exit_code(), EXIT_FAIL);
    assert_eq!(
        outcome.report(),
        "[harness] FAIL AES Decryption  (expected=[10, 20, 30], got=[10, 20, 31])"
    );
    match outcome {
        VerifyOutcome::Mismatch {
            first_difference, ..
        } => assert_eq!(first_difference, 2),
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

#[test]
fn test_length_difference_fails() {
    let outcome = compare(vec![1, 2, 3], vec![1, 2]);
    assert_eq!(
        outcome,
        VerifyOutcome::Mismatch {
            expected: vec![1, 2, 3],
            actual: vec![1, 2],
            first_difference: 2,
        }
    );

    assert!(!compare(vec![], vec![0]).is_pass());
}

#[test]
fn test_whitespace_layout_is_irrelevant() {
    // The pipeline may separate values with any whitespace
    assert!(verify_texts("1\n2\n3\n", "1 2\t3").is_pass());
    assert!(verify_texts("", "").is_pass());
}

#[test]
fn test_non_numeric_content_is_read_failure() {
    let outcome = verify_texts("1\n2\n", "1\nzwei\n");

    assert_eq!(outcome.exit_code(), EXIT_FAIL);
    assert!(matches!(outcome, VerifyOutcome::ReadFailure { .. }));
    assert!(outcome.report().starts_with("[harness] failed to read files:"));
}

#[test]
fn test_out_of_range_result_is_mismatch() {
    // A value past i64::MAX is still a number, so this is a FAIL, not a read failure
    let outcome = verify_texts("1\n2\n", "1\n18446744073709551616\n");

    assert!(matches!(
        outcome,
        VerifyOutcome::Mismatch {
            first_difference: 1,
            ..
        }
    ));
    assert_eq!(
        outcome.report(),
        "[harness] FAIL AES Decryption  (expected=[1, 2], got=[1, 18446744073709551616])"
    );
}

#[test]
fn test_self_comparison_always_passes() {
    for seq in [vec![], vec![0], vec![65535, 0, 12, -4]] {
        assert!(compare(seq.clone(), seq).is_pass());
    }
}

#[test]
fn test_verify_files() {
    let dir = tempfile::tempdir().unwrap();
    let expected = dir.path().join("expected_aes.txt");
    let result = dir.path().join("result_aes.txt");

    std::fs::write(&expected, "10\n20\n30\n").unwrap();
    std::fs::write(&result, "10\n20\n30\n").unwrap();
    assert!(verify_files(&expected, &result).is_pass());

    std::fs::write(&result, "10\n20\n31\n").unwrap();
    assert_eq!(verify_files(&expected, &result).exit_code(), EXIT_FAIL);
}

#[test]
fn test_verify_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let expected = dir.path().join("expected_aes.txt");
    std::fs::write(&expected, "1\n").unwrap();

    let outcome = verify_files(&expected, &dir.path().join("absent.txt"));
    assert!(matches!(outcome, VerifyOutcome::ReadFailure { .. }));
    assert_eq!(outcome.exit_code(), EXIT_FAIL);
}
