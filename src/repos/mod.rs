mod accounts;
mod transactions;
mod users;

pub use accounts::{AccountRepo, DynAccountRepo};
pub use transactions::{DynTransactionRepo, TransactionPersistenceError, TransactionRepo};
pub use users::{DynUserRepo, UserPersistenceError, UserRepo};
