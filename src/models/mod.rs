pub mod account;
pub mod table;

pub use account::{Account, AccountCollection};
pub use table::{GameTable, TableStatus};
