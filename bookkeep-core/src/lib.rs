//! bookkeep-core: shared record types, candidate passwords and output naming

pub mod naming;
pub mod passwords;
pub mod transaction;

pub use naming::next_available_path;
pub use passwords::PasswordList;
pub use transaction::{Transaction, TransactionStatus};
