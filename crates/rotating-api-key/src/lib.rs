//! Time-rotating shared-secret API keys.
//!
//! A client and a server that share a *seed* can each derive the same API key
//! for the current time period without ever sending it to each other. Keys
//! rotate on their own as the period (the *bucket*) advances.
//!
//! This crate provides functionality for:
//! - Deriving the key for one seed at a given time ([`make_key`])
//! - Enumerating every key valid for a list of seeds over a time window, to
//!   publish as the server's allowlist ([`keys_and_descriptions`])
//!
//! # Key Format
//!
//! `key = hex(sha1(seed + "+" + bucket))`, where `bucket` is the time
//! formatted with a coarse, numeric-only pattern (default `%Y-%m-%d`).
//!
//! This is obfuscation with predictable rotation, not an authentication
//! protocol: anyone who learns a seed can derive all of its keys.
//!
//! # Example
//!
//! ```rust
//! use rotating_api_key::{KeyOptions, TraceNote, make_key};
//!
//! // Client side: derive the key for a fixed day
//! let key = make_key("Our dear customer-adfuw42", KeyOptions::at("2022-06-24")).unwrap();
//! assert_eq!(key, "bda11d301febf5266376c3b4062d27a91781c7aa");
//!
//! // The same day given as a Unix timestamp (UTC) yields the same key
//! let mut notes: Vec<TraceNote> = Vec::new();
//! let options = KeyOptions::at(1656071483.460343).with_trace(&mut notes);
//! assert_eq!(make_key("Our dear customer-adfuw42", options).unwrap(), key);
//! for note in &notes {
//!     println!("{note}");
//! }
//! ```

mod batch;
mod config;
mod data;
mod error;
mod hash;
mod time;
mod token;
mod trace;

// Public re-exports
pub use batch::{keys_and_descriptions, time_buckets, KeyBatch, Keys};
pub use config::{BatchConfig, KeyOptions};
pub use data::{describe, KeyEntry};
pub use error::{ApiKeyError, Result};
pub use hash::{compute_key, KEY_ALGORITHM, SEPARATOR};
pub use time::{format_time, timestamp_to_time, TimeInput, DEFAULT_DATE_FORMAT};
pub use token::make_key;
pub use trace::{TraceLevel, TraceNote, TraceSink};
