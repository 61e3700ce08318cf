//! Entity identifiers
//!
//! Identifiers look like `task_1718000000000_k3j9x0a2b`: an entity-kind
//! prefix, the creation time in milliseconds and a random base-36 suffix.
//! The prefix only helps when reading logs and data files; stores treat the
//! whole identifier as opaque.

use chrono::Utc;
use rand::Rng;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Kind of entity an identifier is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Task,
    ChecklistItem,
    User,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::ChecklistItem => "item",
            Self::User => "user",
        }
    }
}

/// Generate a fresh identifier for the given entity kind
pub fn generate_id(kind: IdKind) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
        .collect();

    format!(
        "{}_{}_{}",
        kind.prefix(),
        Utc::now().timestamp_millis(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = generate_id(IdKind::Task);
        let parts: Vec<&str> = id.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_prefix_per_kind() {
        assert!(generate_id(IdKind::ChecklistItem).starts_with("item_"));
        assert!(generate_id(IdKind::User).starts_with("user_"));
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_id(IdKind::Task)).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_timestamp_segment_is_monotonic() {
        let millis = |id: &str| -> i64 { id.split('_').nth(1).unwrap().parse().unwrap() };

        let first = generate_id(IdKind::Task);
        let second = generate_id(IdKind::Task);
        assert!(millis(&second) >= millis(&first));
    }
}
