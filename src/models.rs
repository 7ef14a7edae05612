pub mod identities;
pub mod portfolio;
