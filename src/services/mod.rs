//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `resolver.rs` — walks the catalog and decides which questions to ask.
//! - `collector.rs` — terminal answer collector with input parsing/re-prompts.
//! - `rules.rs` — ordered gap rule table.
//! - `scoring.rs` — response store → derived result.
//! - `report.rs` — terminal summary box and Markdown report.
//! - `storage.rs` — checkpoint load/save and output paths.
//! - `config.rs` — `~/.config/cmmc-scope/config.toml`.
//! - `output.rs` — JSON/text output helpers, error codes, palette.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod collector;
pub mod config;
pub mod output;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod scoring;
pub mod storage;
