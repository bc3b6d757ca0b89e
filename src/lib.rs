pub mod arguments;
pub mod config;
pub mod errors; // Structured error types
pub mod logger;
pub mod paths;
pub mod report;
pub mod run;
pub mod tokens;
pub mod utils;
