//! Shared foundational types for the halwire HAL wiring compiler.
//!
//! This crate provides the textual grammar of pin references (operand
//! classification, combinator markers) and the component availability tables
//! that decide into which output stream a wiring statement is written.

#![warn(missing_docs)]

pub mod component;
pub mod pin;

pub use component::{availability, native_invert, Availability};
pub use pin::{classify, Combinator, Operand, PinParseError};
