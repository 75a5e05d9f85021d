pub mod cli;
pub mod config;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
