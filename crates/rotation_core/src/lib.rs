//! Round-pairing engine for social racket-sport events
//!
//! This crate provides the core of a multi-round event scheduler:
//! - Rest-streak accounting over the caller's round history
//! - Active-pool selection that bounds how long anyone sits out
//! - Seven pairing formats (the Americano and Mexicano families)
//!
//! The engine is a pure function of its inputs: the caller assembles a
//! [`RoundContext`] snapshot, the engine proposes one round of matches, and
//! the caller persists them. Nothing is stored between calls.
//!
//! # Usage
//!
//! ```
//! use rotation_core::{generate_round, Format, RotationConfig, RoundContext};
//!
//! let ctx = RoundContext {
//!     participants: vec!["ana".into(), "bo".into(), "cam".into(), "dee".into()],
//!     ..Default::default()
//! };
//!
//! let matches = generate_round(Format::Americano, &ctx, 1, &RotationConfig::default()).unwrap();
//! assert_eq!(matches.len(), 1);
//! ```

mod error;
mod matching;
mod rest;
mod round;
mod selection;
mod types;

pub use error::*;
pub use matching::*;
pub use rest::*;
pub use round::*;
pub use selection::*;
pub use types::*;
