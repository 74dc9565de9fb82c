//! The textual grammar of pin references and wiring-expression operands.
//!
//! A pin reference is `component.port` text. Three modifier forms exist:
//! `sig:NAME` names an existing signal directly and bypasses auto-naming,
//! a leading `!` means the logical negation of the pin's value, and a
//! leading `|` or `&` on the source side of a wiring declaration selects
//! how the new driver combines with previously declared drivers of the
//! same destination.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a literal-signal reference (`sig:NAME`).
pub const SIGNAL_ALIAS_PREFIX: &str = "sig:";

/// Namespace prefix of pins that belong to internally allocated blocks.
pub const BLOCK_PIN_PREFIX: &str = "func.";

/// An error produced when an operand token cannot be classified.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PinParseError {
    /// The token was empty.
    #[error("empty operand token")]
    Empty,
    /// An invert marker with no pin behind it.
    #[error("invert marker without a pin: '{0}'")]
    DanglingInvert(String),
    /// A `sig:` alias with an empty name.
    #[error("signal alias without a name: '{0}'")]
    EmptyAlias(String),
}

/// One classified operand of a wiring expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// A numeric literal, bound to its input port with a constant assignment.
    Literal(String),
    /// `!pin` — the logical negation of the pin's value.
    Inverted(String),
    /// `sig:name` — names an existing signal, bypassing auto-naming.
    SignalAlias(String),
    /// A plain `component.port` reference.
    Pin(String),
}

/// Classifies a raw operand token.
///
/// Only the modifier characters of the grammar are recognized here. Whether
/// a plain pin actually exists on some component is the caller's concern.
pub fn classify(token: &str) -> Result<Operand, PinParseError> {
    if token.is_empty() {
        return Err(PinParseError::Empty);
    }
    if is_numeric_literal(token) {
        return Ok(Operand::Literal(token.to_string()));
    }
    if let Some(rest) = token.strip_prefix('!') {
        if rest.is_empty() {
            return Err(PinParseError::DanglingInvert(token.to_string()));
        }
        return Ok(Operand::Inverted(rest.to_string()));
    }
    if let Some(name) = token.strip_prefix(SIGNAL_ALIAS_PREFIX) {
        if name.is_empty() {
            return Err(PinParseError::EmptyAlias(token.to_string()));
        }
        return Ok(Operand::SignalAlias(name.to_string()));
    }
    Ok(Operand::Pin(token.to_string()))
}

/// Returns `true` if the token is a numeric literal: an optional leading
/// minus followed by digits and dots only.
pub fn is_numeric_literal(token: &str) -> bool {
    let digits: String = token
        .trim_start_matches('-')
        .chars()
        .filter(|c| *c != '.')
        .collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Returns the component part of a `component.port` reference (the text
/// before the first dot; the whole token if there is no dot).
pub fn component(pin: &str) -> &str {
    pin.split('.').next().unwrap_or(pin)
}

/// Removes all combinator markers from an accumulated expression.
pub fn strip_markers(expr: &str) -> String {
    expr.replace(['|', '&'], "")
}

/// How multiple drivers of the same destination pin combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    /// Drivers are OR-ed together (the default).
    Or,
    /// Drivers are AND-ed together.
    And,
}

impl Combinator {
    /// The operator token spliced between accumulated expression fragments.
    pub fn token(self) -> &'static str {
        match self {
            Combinator::Or => "OR",
            Combinator::And => "AND",
        }
    }

    /// Reads the marker character at the start of an expression, if any.
    pub fn from_marker(expr: &str) -> Option<Combinator> {
        match expr.chars().next() {
            Some('|') => Some(Combinator::Or),
            Some('&') => Some(Combinator::And),
            _ => None,
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
