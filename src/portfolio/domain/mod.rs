pub mod accounts;
pub mod transactions;
