pub mod cli;
pub mod config;
pub mod context;
pub mod decision;
pub mod engine;
pub mod explain;
pub mod governance;
pub mod health;
pub mod insights;
pub mod logging;
pub mod math;
pub mod scoring;
pub mod signals;
pub mod store;
pub mod strategies;
