//! Time counter
//!
//! This module provides:
//! - **TimeCounter**: the `(seconds, minutes, hours)` triple with carry/borrow arithmetic
//! - **Normalization**: folding user input (object or array form) into a canonical triple
//! - **Comparisons**: precision-scoped target checks on a single scalar total

mod time_counter;

pub use time_counter::{Direction, TimeCounter, total_seconds_of};
