//! Declaration accumulation: the cheap, order-dependent first stage.

use indexmap::map::Entry;
use indexmap::IndexMap;

use halwire_common::Combinator;
use halwire_diagnostics::{Diagnostic, DiagnosticSink};

use crate::codes;
use crate::emit::{self, HalOutput};
use crate::error::CompileError;

/// One destination pin with its accumulated raw driving expression.
#[derive(Clone, Debug)]
pub struct Target {
    /// The raw (uncompiled) expression, grown by successive declarations.
    pub expression: String,
    /// Caller-supplied name for the driving signal, if any.
    pub signal_name: Option<String>,
}

/// Records wiring declarations and constant assignments, then compiles them
/// in one batch.
///
/// Declarations are cheap; all symbolic work happens in
/// [`compile`](Self::compile), which is pure given the recorded state.
/// Compiling the same builder twice yields byte-identical output.
#[derive(Default)]
pub struct NetlistBuilder {
    targets: IndexMap<String, Target>,
    constants: IndexMap<String, String>,
    raw_top: Vec<String>,
    raw_bottom: Vec<String>,
}

impl NetlistBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `source_expr` as a driver of `destination`.
    ///
    /// A destination declared more than once combines its drivers: an
    /// explicit leading `|`/`&` marker on `source_expr` selects OR/AND;
    /// without a marker the combinator of the first declaration is
    /// inherited, defaulting to OR. A `signal_name` may be supplied once
    /// per destination; a second, differing override is reported through
    /// the sink and ignored.
    pub fn declare(
        &mut self,
        source_expr: &str,
        destination: &str,
        signal_name: Option<&str>,
        sink: &DiagnosticSink,
    ) {
        let combinator = Combinator::from_marker(source_expr)
            .or_else(|| {
                self.targets
                    .get(destination)
                    .and_then(|t| Combinator::from_marker(&t.expression))
            })
            .unwrap_or(Combinator::Or);

        match self.targets.entry(destination.to_string()) {
            Entry::Occupied(mut entry) => {
                let target = entry.get_mut();
                target.expression =
                    format!("{} {} {}", target.expression, combinator.token(), source_expr);
            }
            Entry::Vacant(entry) => {
                entry.insert(Target {
                    expression: source_expr.to_string(),
                    signal_name: None,
                });
            }
        }

        if let Some(name) = signal_name {
            if let Some(target) = self.targets.get_mut(destination) {
                match &target.signal_name {
                    None => target.signal_name = Some(name.to_string()),
                    Some(existing) if existing != name => {
                        sink.emit(Diagnostic::warning(
                            codes::OVERRIDE_CONFLICT,
                            format!(
                                "destination '{destination}' already has signal name '{existing}', ignoring '{name}'"
                            ),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Binds a literal value to `pin`.
    ///
    /// The assignment is dropped at emission time (with a diagnostic) if
    /// the pin ends up carrying a live signal. The first value recorded for
    /// a pin wins.
    pub fn assign_constant(&mut self, pin: &str, value: &str) {
        self.constants
            .entry(pin.to_string())
            .or_insert_with(|| value.to_string());
    }

    /// Appends a preformatted line to the bottom section of the primary
    /// stream.
    pub fn add_raw(&mut self, line: impl Into<String>) {
        self.raw_bottom.push(line.into());
    }

    /// Appends a preformatted line to the top of the primary stream.
    pub fn add_raw_top(&mut self, line: impl Into<String>) {
        self.raw_top.push(line.into());
    }

    /// Compiles every accumulated target and serializes the netlist into
    /// the primary and deferred output streams.
    pub fn compile(&self, sink: &DiagnosticSink) -> Result<HalOutput, CompileError> {
        emit::emit(self, sink)
    }

    pub(crate) fn targets(&self) -> impl Iterator<Item = (&String, &Target)> {
        self.targets.iter()
    }

    pub(crate) fn constants(&self) -> &IndexMap<String, String> {
        &self.constants
    }

    pub(crate) fn raw_top(&self) -> &[String] {
        &self.raw_top
    }

    pub(crate) fn raw_bottom(&self) -> &[String] {
        &self.raw_bottom
    }
}
