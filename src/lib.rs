// src/lib.rs
//! Extraction, cleaning and deduplication of short text records (quotes,
//! trivia, author listings, fun facts) from saved pages and payloads.

pub mod config;
pub mod extractors;
pub mod fetch;
pub mod pipeline;
pub mod records;
pub mod storage;
pub mod utils;
