mod analytics;
pub mod cli;
mod database;
mod http_err;
mod identities;
mod models;
mod passwords;
mod portfolio;
mod rate_limit;
mod repos;
mod server;
