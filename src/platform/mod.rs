//! Platform abstraction layer
//!
//! Handles browser/native differences for input events. Storage lives in
//! [`crate::persistence`].

pub mod input;

pub use input::{Action, KeyboardState};
