// Library for tests to access modules

pub mod analysis;
pub mod config;
pub mod csv_writer;
pub mod error;
pub mod log_repo;
pub mod models;
pub mod parser;
pub mod projector;
pub mod routes;
pub mod stats;
pub mod version;
