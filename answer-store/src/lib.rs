//! Read-only answer corpus for the FAQ pipeline.
//!
//! Public API:
//! - [`AnswerStore`]: CSV-backed id → answer map, loaded once at bootstrap.
//! - [`normalize::clean`]: strips rating/feedback boilerplate from answers.
//! - [`assemble::assemble`]: joins retrieved question ids with cleaned
//!   answers into one ID-labeled context block.

pub mod assemble;
pub mod normalize;
pub mod store;

pub use assemble::{NO_RESULTS_SENTINEL, STORE_EMPTY_SENTINEL, assemble};
pub use store::{AnswerLookup, AnswerStore, QuestionRecord, StoreError};
