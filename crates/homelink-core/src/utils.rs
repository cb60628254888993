/*!
 * Utility functions and helpers for Homelink.
 *
 * This module provides the small parsing helpers used by plugin code and the
 * version comparison used to gate host API calls.
 */
use std::future::Future;
use std::time::Duration;

use semver::Version;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{Error, Result};

/// Parse an integer from a string value
///
/// # Arguments
///
/// * `value` - The string to parse
///
/// # Returns
///
/// The parsed integer, or `None` when the string is not numeric
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse an integer from a string value, substituting a default
///
/// # Arguments
///
/// * `value` - The string to parse
/// * `default` - The value to substitute when parsing fails
pub fn parse_int_or(value: &str, default: i64) -> i64 {
    parse_int(value).unwrap_or(default)
}

/// Parse a comma-separated list of integers
///
/// Only the substrings that parse as integers are returned, in their original
/// order; non-numeric tokens are silently dropped.
///
/// # Arguments
///
/// * `csv` - The comma-separated string to parse
pub fn parse_csv(csv: &str) -> Vec<i64> {
    csv.split(',').filter_map(parse_int).collect()
}

/// Compare two dotted version strings
///
/// Returns true when `actual` is at least `wanted`. Short versions are padded
/// to three components before semver comparison; versions that are not
/// semver-clean fall back to a numeric component-wise comparison.
///
/// # Arguments
///
/// * `actual` - The version reported by the host
/// * `wanted` - The minimum version required
pub fn version_at_least(actual: &str, wanted: &str) -> bool {
    match (parse_version(actual), parse_version(wanted)) {
        (Some(a), Some(w)) => a >= w,
        _ => {
            debug!(
                "Falling back to numeric version comparison for '{}' >= '{}'",
                actual, wanted
            );
            numeric_components(actual) >= numeric_components(wanted)
        }
    }
}

fn parse_version(version: &str) -> Option<Version> {
    let mut parts: Vec<String> = version.trim().split('.').map(str::to_string).collect();
    while parts.len() < 3 {
        parts.push("0".to_string());
    }
    Version::parse(&parts.join(".")).ok()
}

fn numeric_components(version: &str) -> Vec<i64> {
    version
        .trim()
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().unwrap_or(0)
        })
        .collect()
}

/// Run a future with a timeout
///
/// # Arguments
///
/// * `duration` - The timeout duration
/// * `future` - The future to run
///
/// # Returns
///
/// The result of the future, or a timeout error if the timeout is reached
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout("Operation timed out")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("4.2"), None);
        assert_eq!(parse_int("forty"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_int_or() {
        assert_eq!(parse_int_or("42", 0), 42);
        assert_eq!(parse_int_or("nope", 5), 5);
        assert_eq!(parse_int_or("", -1), -1);
    }

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv("1,2,3"), vec![1, 2, 3]);
        assert_eq!(parse_csv(" 1 , 2 ,3 "), vec![1, 2, 3]);
        // Non-numeric tokens are dropped, order preserved
        assert_eq!(parse_csv("5,abc,7,,9"), vec![5, 7, 9]);
        assert_eq!(parse_csv("a,b,c"), Vec::<i64>::new());
        assert_eq!(parse_csv(""), Vec::<i64>::new());
    }

    #[test]
    fn test_version_at_least() {
        assert!(version_at_least("2.4.9", "2.4.9"));
        assert!(version_at_least("2.4.10", "2.4.9"));
        assert!(version_at_least("2.5", "2.4.9"));
        assert!(version_at_least("3.0.0", "2.4.9"));
        assert!(!version_at_least("2.4.8", "2.4.9"));
        assert!(!version_at_least("2.4", "2.4.9"));
        assert!(!version_at_least("1.9.9", "2.4.9"));
    }

    #[test]
    fn test_version_at_least_lenient() {
        assert!(version_at_least("2.4.9-beta", "2.4.8"));
        assert!(version_at_least("2.4.9 ", "2.4.9"));
        assert!(!version_at_least("garbage", "2.4.9"));
    }

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, Error>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_failure() {
        let result = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, Error>(42)
        })
        .await;
        assert!(matches!(result, Err(Error::Timeout(_))));
    }
}
