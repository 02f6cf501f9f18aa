//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep question, answer, and scoring types in one place.
//! - Avoid cyclic imports between the resolver, scorer, and renderers.
//! - Make checkpoint and `--json` schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — questions, response store, derived result, checkpoint.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/terminal side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect persisted checkpoints and `--json` outputs.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod models;
