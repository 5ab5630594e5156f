//! Core translation engine module

pub mod client;
pub mod config;
pub mod errors;
pub mod languages;
pub mod models;
pub mod parser;
pub mod rpc;
pub mod transport;
