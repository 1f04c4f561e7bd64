// src/fetch/mod.rs
pub mod client;
