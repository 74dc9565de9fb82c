//! Strongly-typed representation of a wiring file.

use serde::{Deserialize, Serialize};

/// A complete wiring file: nets, constants, and raw passthrough lines.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct WiringFile {
    /// Wiring declarations, applied in file order.
    #[serde(default, rename = "net")]
    pub nets: Vec<NetDecl>,
    /// Static constant assignments.
    #[serde(default, rename = "setp")]
    pub constants: Vec<ConstDecl>,
    /// Raw lines copied verbatim into the primary stream.
    #[serde(default)]
    pub raw: RawLines,
}

/// One `[[net]]` entry: connect `expr` to `target`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NetDecl {
    /// The source expression in the wiring grammar.
    pub expr: String,
    /// The destination pin.
    pub target: String,
    /// Optional name for the driving signal.
    #[serde(default)]
    pub signal: Option<String>,
}

/// One `[[setp]]` entry: bind a literal value to a pin.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConstDecl {
    /// The destination pin.
    pub pin: String,
    /// The literal value, kept as text.
    pub value: String,
}

/// Raw passthrough lines for the top and bottom of the primary stream.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawLines {
    /// Lines placed before everything else.
    #[serde(default)]
    pub top: Vec<String>,
    /// Lines placed after everything else.
    #[serde(default)]
    pub bottom: Vec<String>,
}
