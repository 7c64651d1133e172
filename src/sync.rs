use chrono::Utc;

use crate::config::Config;
use crate::constants::{
    DEFAULT_ACCOUNTS_PATH, DEFAULT_TABLES_DIR, DEFAULT_TABLE_CAPACITY, ERR_CREDENTIAL_TOO_SHORT,
    ERR_NAME_TOO_SHORT, ERR_TABLE_NAME_EMPTY, MIN_CREDENTIAL_LEN, MIN_NAME_LEN,
};
use crate::error::{Result, SyncError};
use crate::models::{Account, AccountCollection, GameTable, TableStatus};
use crate::security::hash_credential;
use crate::store::{DocumentHandle, ObjectStore};

/// Credential-store synchronizer
///
/// Stateless aside from the store it talks to: every operation performs
/// at most one read followed by at most one write, and the write echoes
/// the version token obtained by that same read. A stale token surfaces
/// as `ConflictingWrite`; the synchronizer never retries on its own, the
/// caller decides whether to re-load and try again.
pub struct Synchronizer<S: ObjectStore> {
    store: S,
    accounts_path: String,
    tables_dir: String,
}

impl<S: ObjectStore> Synchronizer<S> {
    /// Build a synchronizer using the document layout from configuration
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            accounts_path: config.accounts_path.clone(),
            tables_dir: config.tables_dir.clone(),
        }
    }

    /// Build a synchronizer with the default document layout
    pub fn with_defaults(store: S) -> Self {
        Self {
            store,
            accounts_path: DEFAULT_ACCOUNTS_PATH.to_string(),
            tables_dir: DEFAULT_TABLES_DIR.to_string(),
        }
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Load the account collection and the handle for writing it back
    ///
    /// An absent document is the valid "no users yet" state: it loads as
    /// an empty collection with no version token, not as an error.
    /// Transport and auth failures surface as `StoreUnavailable`.
    pub async fn load_accounts(&self) -> Result<(AccountCollection, DocumentHandle)> {
        match self.store.get(&self.accounts_path).await? {
            Some(document) => {
                let collection: AccountCollection = serde_json::from_slice(&document.content)
                    .map_err(|e| SyncError::MalformedDocument {
                        path: self.accounts_path.clone(),
                        reason: e.to_string(),
                    })?;
                Ok((
                    collection,
                    DocumentHandle {
                        path: self.accounts_path.clone(),
                        version: Some(document.version),
                    },
                ))
            }
            None => Ok((
                AccountCollection::new(),
                DocumentHandle {
                    path: self.accounts_path.clone(),
                    version: None,
                },
            )),
        }
    }

    /// Write the account collection back in a single shot
    ///
    /// The handle must come from the most recent `load_accounts` of the
    /// same logical operation; no re-fetch happens here. Returns the
    /// handle carrying the new version token.
    pub async fn save_accounts(
        &self,
        collection: &AccountCollection,
        handle: &DocumentHandle,
    ) -> Result<DocumentHandle> {
        let content = serde_json::to_vec_pretty(collection)?;
        let version = self
            .store
            .put(&handle.path, &content, handle.version.as_deref())
            .await?;

        tracing::info!("Accounts document saved ({} accounts)", collection.len());
        Ok(DocumentHandle {
            path: handle.path.clone(),
            version: Some(version),
        })
    }

    /// Register a new account
    ///
    /// Validation runs before any network call. The duplicate check runs
    /// against a freshly loaded collection, and the save echoes the
    /// version token from that same load: a concurrent registration that
    /// commits first makes this one fail with `ConflictingWrite` instead
    /// of silently dropping the other writer's account.
    pub async fn register_account(
        &self,
        name: &str,
        credential: &str,
        confirmation: Option<&str>,
    ) -> Result<Account> {
        if name.chars().count() < MIN_NAME_LEN {
            return Err(SyncError::InvalidInput(ERR_NAME_TOO_SHORT.to_string()));
        }
        if credential.chars().count() < MIN_CREDENTIAL_LEN {
            return Err(SyncError::WeakCredential(
                ERR_CREDENTIAL_TOO_SHORT.to_string(),
            ));
        }
        if let Some(confirmation) = confirmation {
            if confirmation != credential {
                return Err(SyncError::Mismatch);
            }
        }

        let (mut collection, handle) = self.load_accounts().await?;
        if collection.name_taken(name) {
            tracing::info!("Registration rejected: name already taken");
            return Err(SyncError::DuplicateName(name.to_string()));
        }

        let account = Account {
            id: collection.next_id(),
            name: name.to_string(),
            credential_hash: hash_credential(credential),
            created_at: Utc::now(),
        };
        collection.push(account.clone());
        self.save_accounts(&collection, &handle).await?;

        tracing::info!("New account registered: {}", account.name);
        Ok(account)
    }

    /// Look up an account by name and credential against a fresh load
    ///
    /// Returns `None` for an unknown name or a wrong credential; the two
    /// cases are indistinguishable to the caller.
    pub async fn authenticate(&self, name: &str, credential: &str) -> Result<Option<Account>> {
        let (collection, _) = self.load_accounts().await?;
        Ok(collection.find(name, credential).cloned())
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Create a new table document
    ///
    /// The id is the current Unix timestamp, so two tables created within
    /// the same second contend for the same path. The write goes out with
    /// no version token (create-if-absent), turning that collision into a
    /// visible `ConflictingWrite` instead of a silent overwrite.
    pub async fn create_table(
        &self,
        name: &str,
        description: &str,
        owner_name: &str,
    ) -> Result<GameTable> {
        if name.trim().is_empty() {
            return Err(SyncError::InvalidInput(ERR_TABLE_NAME_EMPTY.to_string()));
        }

        let created_at = Utc::now();
        let table = GameTable {
            id: created_at.timestamp(),
            name: name.to_string(),
            description: description.to_string(),
            owner_name: owner_name.to_string(),
            players: Vec::new(),
            capacity: DEFAULT_TABLE_CAPACITY,
            created_at,
            status: TableStatus::Active,
        };

        let path = GameTable::document_path(&self.tables_dir, table.id);
        let content = serde_json::to_vec_pretty(&table)?;
        self.store.put(&path, &content, None).await?;

        tracing::info!("New table created: {} at {}", table.name, path);
        Ok(table)
    }

    /// List all tables in the namespace
    ///
    /// Documents that fail to parse are logged and skipped: one corrupt
    /// table must not block listing the rest. An absent namespace lists
    /// as empty.
    pub async fn list_tables(&self) -> Result<Vec<GameTable>> {
        let paths = self.store.list(&self.tables_dir).await?;
        let mut tables = Vec::with_capacity(paths.len());

        for path in paths {
            let Some(document) = self.store.get(&path).await? else {
                tracing::warn!("Table document vanished between list and get: {}", path);
                continue;
            };
            match serde_json::from_slice::<GameTable>(&document.content) {
                Ok(table) => tables.push(table),
                Err(e) => tracing::warn!("Skipping malformed table document {}: {}", path, e),
            }
        }

        Ok(tables)
    }

    /// Load a single table by id
    ///
    /// Unlike the listing path, absence and parse failure are both
    /// surfaced here: the caller asked for this specific document.
    pub async fn get_table(&self, id: i64) -> Result<GameTable> {
        let path = GameTable::document_path(&self.tables_dir, id);
        let document = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| SyncError::NotFound(path.clone()))?;

        serde_json::from_slice(&document.content).map_err(|e| SyncError::MalformedDocument {
            path,
            reason: e.to_string(),
        })
    }
}
