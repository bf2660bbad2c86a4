//! Lifecycle tests for the checker registry
//!
//! These tests verify that:
//! - URL validation rejects malformed and relative input
//! - Adding and stopping sites mutates the registry synchronously
//! - Duplicate registrations are rejected
//! - Registry state is consistent after stopping everything

use std::time::Duration;

use assert_matches::assert_matches;
use sitecheck::checker::Checker;
use sitecheck::error::CheckerError;

use crate::helpers::IDLE;

#[tokio::test]
async fn test_new_checker_is_empty() {
    let checker = Checker::new();

    assert!(checker.is_empty());
    assert_eq!(checker.len(), 0);
}

#[tokio::test]
async fn test_add_url_rejects_invalid() {
    let mut checker = Checker::new();

    let err = checker.add_url("i am not a valid url", IDLE).unwrap_err();
    assert_matches!(err, CheckerError::InvalidUrl(_));

    let err = checker.add_url("/ddfsd/das", IDLE).unwrap_err();
    assert_matches!(err, CheckerError::InvalidUrl(_));

    // parses, but carries no host
    let err = checker
        .add_url("mailto:nobody@example.com", IDLE)
        .unwrap_err();
    assert_matches!(err, CheckerError::InvalidUrl(_));

    assert!(checker.is_empty());
}

#[tokio::test]
async fn test_add_url_rejects_zero_interval() {
    let mut checker = Checker::new();

    let err = checker
        .add_url("http://www.example.com", Duration::ZERO)
        .unwrap_err();
    assert_matches!(err, CheckerError::InvalidInterval);

    assert!(checker.is_empty());
}

#[tokio::test]
async fn test_add_url_registers_site() {
    let mut checker = Checker::new();

    checker.add_url("http://www.example.com", IDLE).unwrap();

    assert!(checker.is_watching("http://www.example.com"));
    assert_eq!(checker.len(), 1);
}

#[tokio::test]
async fn test_add_url_duplicate_rejected() {
    let mut checker = Checker::new();

    checker.add_url("http://www.example.com", IDLE).unwrap();

    // same canonical URL, different spelling
    let err = checker
        .add_url("http://www.example.com/", IDLE)
        .unwrap_err();
    assert_matches!(err, CheckerError::AlreadyWatched(_));
    assert_eq!(checker.len(), 1);
}

#[tokio::test]
async fn test_stop_unknown_url_not_found() {
    let mut checker = Checker::new();

    let err = checker.stop_checking_url("http://www.example.com").unwrap_err();
    assert_matches!(err, CheckerError::NotFound(_));
}

#[tokio::test]
async fn test_stop_removes_site_immediately() {
    let mut checker = Checker::new();

    checker.add_url("http://www.example.com", IDLE).unwrap();
    checker.stop_checking_url("http://www.example.com").unwrap();

    assert!(!checker.is_watching("http://www.example.com"));
    assert!(checker.is_empty());
}

#[tokio::test]
async fn test_stop_all_leaves_registry_empty() {
    let mut checker = Checker::new();

    let urls = [
        "http://www.example.com",
        "http://www.google.com",
        "http://www.dn.se",
        "http://www.aftonbladet.se",
    ];

    for url in urls {
        checker.add_url(url, IDLE).unwrap();
    }
    assert_eq!(checker.len(), urls.len());

    for url in urls {
        checker.stop_checking_url(url).unwrap();
    }
    assert!(checker.is_empty());
}

#[tokio::test]
async fn test_check_now_unknown_url_not_found() {
    let checker = Checker::new();

    let err = checker.check_now("http://www.example.com").await.unwrap_err();
    assert_matches!(err, CheckerError::NotFound(_));
}

#[tokio::test]
async fn test_urls_lists_canonical_keys() {
    let mut checker = Checker::new();

    checker.add_url("http://www.example.com", IDLE).unwrap();

    let urls: Vec<_> = checker.urls().collect();
    assert_eq!(urls, vec!["http://www.example.com/"]);
}
