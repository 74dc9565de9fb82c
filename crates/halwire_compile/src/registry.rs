//! Pin-to-signal naming and per-port driver bookkeeping.

use halwire_common::pin::{BLOCK_PIN_PREFIX, SIGNAL_ALIAS_PREFIX};
use halwire_diagnostics::{Diagnostic, DiagnosticSink};
use indexmap::IndexMap;

use crate::codes;

/// What is bound to one consuming port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortBinding {
    /// The signals wired into the port, in registration order.
    Drivers(Vec<String>),
    /// A fixed numeric parameter (the `-1` gain of a subtraction block).
    Parameter(i64),
}

/// A source pin together with its assigned signal and the destination under
/// which it was first resolved.
#[derive(Clone, Debug)]
pub(crate) struct SourceEntry {
    pub signal: String,
    pub target: String,
}

/// A consuming port together with its binding and owning destination.
#[derive(Clone, Debug)]
pub(crate) struct PortEntry {
    pub binding: PortBinding,
    pub target: String,
}

/// Maps pin references to canonical signal names and records, per consuming
/// port, every driving signal.
///
/// `resolve` is memoized: a given pin reference always maps to the same
/// signal name within one compilation session, so two references to the
/// same pin are referentially transparent. All tables iterate in insertion
/// order, which is part of the determinism contract of the emitter.
#[derive(Default)]
pub struct SignalRegistry {
    /// Source pins that drive a signal, in first-resolution order.
    sources: IndexMap<String, SourceEntry>,
    /// Consuming ports and their bindings, in first-registration order.
    ports: IndexMap<String, PortEntry>,
}

impl SignalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a pin reference to its canonical signal name.
    ///
    /// - A `sig:NAME` reference returns `NAME` verbatim, without a registry
    ///   entry.
    /// - A pin resolved before returns its previously assigned name.
    /// - A pin that is already a driven port returns the existing driving
    ///   signal, so compiled outputs can be reused as sources.
    /// - An `override_name` is honored the first time the pin is resolved;
    ///   a conflicting override is reported and the prior name wins.
    /// - Otherwise a name is synthesized deterministically from the pin
    ///   text.
    pub fn resolve(
        &mut self,
        pin: &str,
        target: &str,
        override_name: Option<&str>,
        sink: &DiagnosticSink,
    ) -> String {
        if let Some(name) = pin.strip_prefix(SIGNAL_ALIAS_PREFIX) {
            return name.to_string();
        }

        if let Some(entry) = self.sources.get(pin) {
            if let Some(name) = override_name {
                if entry.signal != name {
                    sink.emit(Diagnostic::warning(
                        codes::SIGNAL_NAME_CONFLICT,
                        format!(
                            "pin '{pin}' is already bound to signal '{}', ignoring requested name '{name}'",
                            entry.signal
                        ),
                    ));
                }
            }
            return entry.signal.clone();
        }

        if let Some(existing) = self.first_driver(pin) {
            return existing;
        }

        let signal = match override_name {
            Some(name) => name.to_string(),
            None => synthesize_name(pin),
        };
        self.sources.insert(
            pin.to_string(),
            SourceEntry {
                signal: signal.clone(),
                target: target.to_string(),
            },
        );
        signal
    }

    /// Records `signal` as a driver of `port`.
    pub fn add_driver(&mut self, port: &str, signal: String, target: &str) {
        match self.ports.get_mut(port) {
            Some(entry) => {
                if let PortBinding::Drivers(signals) = &mut entry.binding {
                    signals.push(signal);
                }
            }
            None => {
                self.ports.insert(
                    port.to_string(),
                    PortEntry {
                        binding: PortBinding::Drivers(vec![signal]),
                        target: target.to_string(),
                    },
                );
            }
        }
    }

    /// Binds a fixed numeric parameter to `port`.
    pub fn set_parameter(&mut self, port: &str, value: i64, target: &str) {
        self.ports.insert(
            port.to_string(),
            PortEntry {
                binding: PortBinding::Parameter(value),
                target: target.to_string(),
            },
        );
    }

    /// The signals already linked to `pin` from either side, if any. Used
    /// to detect constant assignments shadowed by live wiring.
    pub fn linked_signals(&self, pin: &str) -> Option<Vec<String>> {
        if let Some(entry) = self.ports.get(pin) {
            return Some(match &entry.binding {
                PortBinding::Drivers(signals) => signals.clone(),
                PortBinding::Parameter(value) => vec![value.to_string()],
            });
        }
        self.sources.get(pin).map(|entry| vec![entry.signal.clone()])
    }

    fn first_driver(&self, pin: &str) -> Option<String> {
        self.ports.get(pin).and_then(|entry| match &entry.binding {
            PortBinding::Drivers(signals) => signals.first().cloned(),
            PortBinding::Parameter(_) => None,
        })
    }

    pub(crate) fn sources(&self) -> impl Iterator<Item = (&String, &SourceEntry)> {
        self.sources.iter()
    }

    pub(crate) fn ports(&self) -> impl Iterator<Item = (&String, &PortEntry)> {
        self.ports.iter()
    }
}

/// Synthesizes a deterministic signal name from the pin text: dots become
/// underscores, with a `sig_` prefix for pins outside the block namespace.
fn synthesize_name(pin: &str) -> String {
    let flat = pin.replace('.', "_");
    if pin.starts_with(BLOCK_PIN_PREFIX) {
        flat
    } else {
        format!("sig_{flat}")
    }
}
