//! ID generation and issue key helpers.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

// ============================================================================
// ID Generation
// ============================================================================

/// Generate an opaque issue ID.
///
/// Uses SHA256 hashing with base36 encoding. Length adapts to the
/// collection size; the `exists` closure checks for collisions.
#[must_use]
pub fn generate_id<F>(
    summary: &str,
    reporter: &str,
    created: DateTime<Utc>,
    issue_count: usize,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let mut length = optimal_hash_length(issue_count);

    loop {
        for nonce in 0..10 {
            let seed = generate_id_seed(summary, reporter, created, nonce);
            let id = compute_id_hash(&seed, length);
            if !exists(&id) {
                return id;
            }
        }

        if length < 8 {
            length += 1;
        } else {
            // Fallback: use longer hash with increasing nonces
            let mut nonce = 10u32;
            loop {
                let seed = generate_id_seed(summary, reporter, created, nonce);
                let id = compute_id_hash(&seed, 12);
                if !exists(&id) {
                    return id;
                }
                nonce += 1;
                if nonce > 1000 {
                    return format!("{id}{nonce}");
                }
            }
        }
    }
}

/// Compute the optimal hash length for a given issue count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
fn optimal_hash_length(issue_count: usize) -> usize {
    let n = issue_count as f64;
    let max_prob = 0.25;

    for (len, exp) in [(4_usize, 4_i32), (5, 5), (6, 6), (7, 7), (8, 8)] {
        let space = 36_f64.powi(exp);
        let prob = 1.0 - (-n * n / (2.0 * space)).exp();
        if prob < max_prob {
            return len;
        }
    }
    8
}

fn generate_id_seed(summary: &str, reporter: &str, created: DateTime<Utc>, nonce: u32) -> String {
    format!(
        "{}|{}|{}|{}",
        summary,
        reporter,
        created.timestamp_nanos_opt().unwrap_or(0),
        nonce
    )
}

fn compute_id_hash(input: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    let mut num = 0u64;
    for &byte in result.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let mut encoded = base36_encode(num);
    if encoded.len() < length {
        encoded = format!("{encoded:0>length$}");
    }
    encoded.chars().take(length).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        #[allow(clippy::cast_possible_truncation)]
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}

// ============================================================================
// Issue Keys
// ============================================================================

/// Format an issue key, e.g. `PROJ-129`.
#[must_use]
pub fn format_key(project_key: &str, number: u64) -> String {
    format!("{project_key}-{number}")
}

/// Split `PROJ-129` into its project key and sequence number.
#[must_use]
pub fn split_key(key: &str) -> Option<(&str, u64)> {
    let (project_key, number) = key.rsplit_once('-')?;
    if project_key.is_empty() {
        return None;
    }
    Some((project_key, number.parse().ok()?))
}

// ============================================================================
// Labels
// ============================================================================

/// Drop repeated labels, keeping the first occurrence of each.
#[must_use]
pub fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_base36() {
        let id = generate_id("Test", "JD", Utc::now(), 0, |_| false);
        assert_eq!(id.len(), 4);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_id_collision_handling() {
        let mut generated = std::collections::HashSet::new();
        let now = Utc::now();
        let id1 = generate_id("Test", "JD", now, 0, |id| generated.contains(id));
        generated.insert(id1.clone());
        let id2 = generate_id("Test", "JD", now, 0, |id| generated.contains(id));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_hash_length_grows_with_collection() {
        assert_eq!(optimal_hash_length(0), 4);
        assert!(optimal_hash_length(5_000) > 4);
    }

    #[test]
    fn test_key_roundtrip() {
        let key = format_key("PROJ", 129);
        assert_eq!(key, "PROJ-129");
        assert_eq!(split_key(&key), Some(("PROJ", 129)));
    }

    #[test]
    fn test_split_key_rejects_malformed() {
        assert_eq!(split_key("MY-TEAM-12"), Some(("MY-TEAM", 12)));
        assert_eq!(split_key("PROJ-abc"), None);
        assert_eq!(split_key("-12"), None);
        assert_eq!(split_key("PROJ"), None);
    }

    #[test]
    fn test_dedup_labels_keeps_first_occurrence() {
        let labels = ["ui", "backend", "ui", "api", "backend"]
            .map(String::from)
            .to_vec();
        assert_eq!(dedup_labels(labels), vec!["ui", "backend", "api"]);
    }
}
