/// Minimum account name length in characters
pub const MIN_NAME_LEN: usize = 3;

/// Minimum credential (password) length in characters
pub const MIN_CREDENTIAL_LEN: usize = 4;

/// Default repository path of the accounts document
pub const DEFAULT_ACCOUNTS_PATH: &str = "accounts.json";

/// Default repository directory holding one document per game table
pub const DEFAULT_TABLES_DIR: &str = "tables";

/// Default player capacity of a newly created table
pub const DEFAULT_TABLE_CAPACITY: u32 = 6;

/// Default timeout in seconds for a single store request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an account name below the minimum length
pub const ERR_NAME_TOO_SHORT: &str = "Account name must be at least 3 characters";

/// Error message for a credential below the minimum length
pub const ERR_CREDENTIAL_TOO_SHORT: &str = "Password must be at least 4 characters";

/// Error message for an empty table name
pub const ERR_TABLE_NAME_EMPTY: &str = "Table name must not be empty";
