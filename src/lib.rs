pub mod config;
pub mod models;
pub mod notify;
pub mod poller;
pub mod scrapers;
pub mod store;
