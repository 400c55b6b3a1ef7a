//! Content catalog module.
//!
//! The **catalog** holds the static, read-only tables of motivational
//! quotes, study tips, confidence messages, and dashboard greetings that
//! personalization draws from. It is loaded once and never mutated.
//!
//! # Lookup Semantics
//!
//! - Motivations are keyed by [`MotivationCategory`]: the general category
//!   plus optional cluster categories.
//! - Study tips are keyed by learning style; absent tables yield an empty
//!   slice and selection falls back to the structured table.
//! - Confidence messages are a fixed 1–5 mapping with the level-3 message
//!   as the out-of-range fallback.

pub mod catalog;
pub mod types;

pub use catalog::{confidence_message, Catalog};
pub use types::{ClusterGreeting, Motivation, MotivationCategory, StudyTip};
