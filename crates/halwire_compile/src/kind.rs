//! Closed enumerations of the processing-block kinds the allocator emits.
//!
//! Logic gates all map to the HAL `logic` component, configured through a
//! numeric personality that combines a per-kind flag with the operand
//! count. Arithmetic kinds each map to a dedicated two-input (or N-input,
//! for the scaled sum) HAL component without a personality.

use serde::{Deserialize, Serialize};

/// A logic-gate kind implemented by the HAL `logic` component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// N-input AND.
    And,
    /// N-input OR.
    Or,
    /// N-input XOR.
    Xor,
    /// N-input NAND.
    Nand,
    /// N-input NOR.
    Nor,
}

impl GateKind {
    /// The per-kind personality flag OR-ed with the operand count.
    pub fn flag(self) -> u32 {
        match self {
            GateKind::And => 0x100,
            GateKind::Or => 0x200,
            GateKind::Xor => 0x400,
            GateKind::Nand => 0x800,
            GateKind::Nor => 0x1000,
        }
    }

    /// Lower-case kind name, used in instance names and as the output port.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::And => "and",
            GateKind::Or => "or",
            GateKind::Xor => "xor",
            GateKind::Nand => "nand",
            GateKind::Nor => "nor",
        }
    }

    /// The personality parameter for a gate with `inputs` operands.
    pub fn personality(self, inputs: usize) -> u32 {
        self.flag() + inputs as u32
    }

    /// Parses a case-insensitive operator token.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "AND" => Some(GateKind::And),
            "OR" => Some(GateKind::Or),
            "XOR" => Some(GateKind::Xor),
            "NAND" => Some(GateKind::Nand),
            "NOR" => Some(GateKind::Nor),
            _ => None,
        }
    }
}

/// An arithmetic block kind, each mapping to a dedicated HAL component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithKind {
    /// N-input scaled signed sum (`s+`).
    ScaledSum,
    /// Two-input sum (`+`).
    Add,
    /// Two-input difference (`-`), a signed sum with a `-1` gain on the
    /// second input.
    Sub,
    /// Two-input product (`*`).
    Mul,
    /// Two-input quotient (`/`).
    Div,
}

impl ArithKind {
    /// The HAL component loaded for this kind.
    pub fn component(self) -> &'static str {
        match self {
            ArithKind::ScaledSum => "scaled_s32_sums",
            ArithKind::Add | ArithKind::Sub => "sum2",
            ArithKind::Mul => "mult2",
            ArithKind::Div => "div2",
        }
    }

    /// The prefix used in instance names. Differs from the component for
    /// subtraction, which loads a `sum2` but is named `sub2`.
    pub fn instance_prefix(self) -> &'static str {
        match self {
            ArithKind::Sub => "sub2",
            other => other.component(),
        }
    }

    /// The output port name.
    pub fn output_port(self) -> &'static str {
        match self {
            ArithKind::ScaledSum => "out-s",
            _ => "out",
        }
    }

    /// Parses an operator token.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "s+" => Some(ArithKind::ScaledSum),
            "+" => Some(ArithKind::Add),
            "-" => Some(ArithKind::Sub),
            "*" => Some(ArithKind::Mul),
            "/" => Some(ArithKind::Div),
            _ => None,
        }
    }
}

/// The operator of one expression group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockOp {
    /// A logic gate.
    Gate(GateKind),
    /// An arithmetic unit.
    Arith(ArithKind),
}

impl BlockOp {
    /// Parses an operator token of either family.
    pub fn parse(token: &str) -> Option<Self> {
        GateKind::parse(token)
            .map(BlockOp::Gate)
            .or_else(|| ArithKind::parse(token).map(BlockOp::Arith))
    }
}
