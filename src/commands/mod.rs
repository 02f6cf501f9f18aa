//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `assess.rs` — interactive run: metadata, questionnaire, checkpoints, report.
//! - `inspect.rs` — score/report/questions/validate over saved data and the catalog.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod assess;
pub mod inspect;

pub use assess::handle_assess;
pub use inspect::{handle_questions, handle_report, handle_score, handle_validate};
