pub mod adapters;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod sink;
