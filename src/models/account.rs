use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::security::credential_matches;

/// A registered user account
///
/// Accounts are append-only: created through registration, never mutated
/// or deleted afterward. Ids are never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric id, unique within the collection (starts at 1)
    pub id: u64,
    /// Login name (unique, case-sensitive)
    pub name: String,
    /// SHA-256 hex digest of the password
    pub credential_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// The account collection, stored as one JSON array document
///
/// The array is the only accepted document shape. Legacy id-keyed maps
/// fail deserialization and surface as a malformed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCollection {
    accounts: Vec<Account>,
}

impl AccountCollection {
    /// Create an empty collection (the "no users yet" state)
    pub fn new() -> Self {
        Self::default()
    }

    /// All accounts in document order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// First account whose name and credential both match exactly
    pub fn find(&self, name: &str, credential: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name == name && credential_matches(credential, &a.credential_hash))
    }

    /// Exact, case-sensitive name lookup
    pub fn name_taken(&self, name: &str) -> bool {
        self.accounts.iter().any(|a| a.name == name)
    }

    /// Next free account id: 1 for an empty collection, max + 1 otherwise
    pub fn next_id(&self) -> u64 {
        self.accounts
            .iter()
            .map(|a| a.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Append an account. The caller is responsible for the uniqueness
    /// checks (`name_taken`, `next_id`) against this same collection.
    pub fn push(&mut self, account: Account) {
        self.accounts.push(account);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::hash_credential;

    fn account(id: u64, name: &str, credential: &str) -> Account {
        Account {
            id,
            name: name.to_string(),
            credential_hash: hash_credential(credential),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(AccountCollection::new().next_id(), 1);
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let mut collection = AccountCollection::new();
        collection.push(account(7, "Ana", "sol123"));
        collection.push(account(2, "Bea", "abcd"));

        // Max id wins even when entries are out of order
        assert_eq!(collection.next_id(), 8);
    }

    #[test]
    fn test_next_id_saturates_at_max() {
        // A hand-edited document can carry the maximum id; the next id
        // must not overflow
        let mut collection = AccountCollection::new();
        collection.push(account(u64::MAX, "Ana", "sol123"));

        assert_eq!(collection.next_id(), u64::MAX);
    }

    #[test]
    fn test_name_taken_case_sensitive() {
        let mut collection = AccountCollection::new();
        collection.push(account(1, "Ana", "sol123"));

        assert!(collection.name_taken("Ana"));
        assert!(!collection.name_taken("ana"));
        assert!(!collection.name_taken("Bea"));
    }

    #[test]
    fn test_find_requires_both_matches() {
        let mut collection = AccountCollection::new();
        collection.push(account(1, "Ana", "sol123"));

        assert!(collection.find("Ana", "sol123").is_some());
        assert!(collection.find("Ana", "wrong").is_none());
        assert!(collection.find("Bea", "sol123").is_none());
    }

    #[test]
    fn test_find_returns_first_match_in_order() {
        let mut collection = AccountCollection::new();
        collection.push(account(1, "Ana", "sol123"));
        collection.push(account(2, "Bea", "abcd"));

        let found = collection.find("Bea", "abcd").unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_serialized_shape_is_array() {
        let mut collection = AccountCollection::new();
        collection.push(account(1, "Ana", "sol123"));

        let json = serde_json::to_value(&collection).unwrap();
        assert!(json.is_array());
    }

    #[test]
    fn test_id_keyed_map_shape_rejected() {
        // The legacy map shape must not deserialize silently
        let legacy = r#"{"1": {"name": "Ana"}}"#;
        assert!(serde_json::from_str::<AccountCollection>(legacy).is_err());
    }
}
