// src/edgar/mod.rs
pub mod client;
