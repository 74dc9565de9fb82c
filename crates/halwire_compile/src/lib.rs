//! Expression-to-netlist compiler for HAL wiring declarations.
//!
//! Given a stream of "connect input-expression to output-pin" declarations,
//! this crate synthesizes a netlist of reusable logic and arithmetic HAL
//! components, assigns every inter-component wire a stable signal name,
//! resolves pin inversion, deduplicates repeated sub-expressions, and emits
//! an ordered, deterministic program of `loadrt`, `addf`, `net`, and `setp`
//! statements partitioned into a primary and a deferred (postgui) stream.
//!
//! The API has two stages. [`NetlistBuilder`] records declarations cheaply
//! and in any interleaving; [`NetlistBuilder::compile`] performs all
//! symbolic work in one batch and is pure given the recorded state, so the
//! same declaration sequence always produces byte-identical output.
//!
//! ```
//! use halwire_compile::NetlistBuilder;
//! use halwire_diagnostics::DiagnosticSink;
//!
//! let sink = DiagnosticSink::new();
//! let mut builder = NetlistBuilder::new();
//! builder.declare("rio.alarm AND !rio.enable", "hal.estop", None, &sink);
//! let output = builder.compile(&sink).unwrap();
//! assert!(output.hal.iter().any(|l| l.starts_with("loadrt logic")));
//! ```

#![warn(missing_docs)]

mod builder;
pub mod codes;
mod emit;
mod error;
pub mod kind;
mod netlist;
pub mod registry;
mod resolver;

pub use builder::{NetlistBuilder, Target};
pub use emit::HalOutput;
pub use error::CompileError;
pub use kind::{ArithKind, BlockOp, GateKind};
pub use registry::{PortBinding, SignalRegistry};
