use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a game table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Active,
    Inactive,
}

/// A single game session ("table") record
///
/// Each table is its own store document, named after its id. The id is
/// the Unix timestamp at creation time, which also makes it the known
/// collision window: two tables created within the same second contend
/// for the same document path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTable {
    /// Unix timestamp at creation, doubles as the document name
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Name of the account that created the table
    pub owner_name: String,
    /// Player names, at most `capacity` entries
    pub players: Vec<String>,
    pub capacity: u32,
    pub created_at: DateTime<Utc>,
    pub status: TableStatus,
}

impl GameTable {
    /// Document path for a table id within the given namespace directory
    pub fn document_path(tables_dir: &str, id: i64) -> String {
        format!("{}/{}.json", tables_dir.trim_end_matches('/'), id)
    }

    /// Whether the table has reached its player capacity
    pub fn is_full(&self) -> bool {
        self.players.len() as u32 >= self.capacity
    }

    /// Whether the named player has already joined
    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TABLE_CAPACITY;

    fn table() -> GameTable {
        GameTable {
            id: 1735689600,
            name: "Ruins".to_string(),
            description: "desc".to_string(),
            owner_name: "Mestre".to_string(),
            players: Vec::new(),
            capacity: DEFAULT_TABLE_CAPACITY,
            created_at: Utc::now(),
            status: TableStatus::Active,
        }
    }

    #[test]
    fn test_document_path() {
        assert_eq!(
            GameTable::document_path("tables", 1735689600),
            "tables/1735689600.json"
        );
        // Trailing slash in the namespace is tolerated
        assert_eq!(
            GameTable::document_path("tables/", 42),
            "tables/42.json"
        );
    }

    #[test]
    fn test_is_full() {
        let mut t = table();
        assert!(!t.is_full());

        t.players = (0..t.capacity).map(|i| format!("player{}", i)).collect();
        assert!(t.is_full());
    }

    #[test]
    fn test_has_player() {
        let mut t = table();
        t.players.push("Ana".to_string());

        assert!(t.has_player("Ana"));
        assert!(!t.has_player("Bea"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TableStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");

        let status: TableStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(status, TableStatus::Inactive);
    }
}
