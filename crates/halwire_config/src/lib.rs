//! Parsing and validation of TOML wiring files.
//!
//! A wiring file lists the declarations fed into the compiler: `[[net]]`
//! entries connecting an input expression to a destination pin, `[[setp]]`
//! entries binding literal values to pins, and raw passthrough lines copied
//! verbatim into the primary output stream.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_wiring, load_wiring_from_str};
pub use types::{ConstDecl, NetDecl, RawLines, WiringFile};
