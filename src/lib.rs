pub mod args;
pub mod config;
pub mod duration;
pub mod error;
pub mod filter;
pub mod options;
pub mod runner;
