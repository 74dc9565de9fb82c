//! Innermost-first reduction of parenthesized wiring expressions.

use halwire_common::pin::classify;
use halwire_common::Operand;
use halwire_diagnostics::DiagnosticSink;

use crate::error::CompileError;
use crate::netlist::Netlist;

/// Reduces a fully parenthesized expression to a single pin or block-output
/// reference.
///
/// Repeatedly extracts the first innermost balanced group: a group with an
/// operator chain is handed to the block allocator, a single inverted pin
/// goes through the inversion resolver, and a bare operand replaces its own
/// group. Every occurrence of the group text is substituted at once, so a
/// sub-expression repeated inside one expression collapses to a single
/// reference. The loop terminates when no parentheses remain; leftover
/// unmatched parentheses are a hard error.
pub(crate) fn reduce(
    nl: &mut Netlist,
    expr: &str,
    target: &str,
    sink: &DiagnosticSink,
) -> Result<String, CompileError> {
    let mut text = expr.to_string();
    while let Some(close) = text.find(')') {
        let open = text[..close]
            .rfind('(')
            .ok_or_else(|| CompileError::UnbalancedParens(expr.to_string()))?;
        let group = text[open..=close].to_string();
        let inside = text[open + 1..close].trim().to_string();
        if inside.is_empty() {
            return Err(CompileError::EmptyGroup(expr.to_string()));
        }
        let replacement = if inside.contains(' ') {
            nl.allocate_block(&inside, target, sink)?
        } else {
            match classify(&inside).map_err(|source| CompileError::InvalidOperand {
                expr: expr.to_string(),
                source,
            })? {
                Operand::Inverted(pin) => nl.invert(&pin, target, sink),
                _ => inside.clone(),
            }
        };
        text = text.replace(&group, &replacement);
    }
    if text.contains('(') {
        return Err(CompileError::UnbalancedParens(expr.to_string()));
    }
    Ok(text)
}
