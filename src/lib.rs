pub mod cli;
pub mod config;
pub mod corrector;
pub mod handlers;
pub mod http;
pub mod importer;
pub mod init;
