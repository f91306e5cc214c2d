pub mod config;
pub mod export;
pub mod interactive;
pub mod process;
