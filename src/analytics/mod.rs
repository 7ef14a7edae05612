pub mod http;
pub mod reports;
pub mod services;
