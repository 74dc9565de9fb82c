//! Batch compilation and serialization of the accumulated netlist.
//!
//! `emit` freezes the builder's state, compiles every target through the
//! expression resolver, and writes the four statement shapes (`loadrt`,
//! `addf`, `net`, `setp`) into two ordered text streams. Statements whose
//! endpoint belongs to a deferred-availability component are commented in
//! the primary stream and duplicated, uncommented, into the deferred one;
//! virtual-loopback endpoints are commented out of the primary stream only.

use halwire_common::component::{availability, Availability};
use halwire_common::pin::{strip_markers, BLOCK_PIN_PREFIX};
use halwire_diagnostics::{Diagnostic, DiagnosticSink};
use serde::{Deserialize, Serialize};

use crate::builder::NetlistBuilder;
use crate::codes;
use crate::error::CompileError;
use crate::netlist::Netlist;
use crate::registry::PortBinding;
use crate::resolver;

/// The fixed-rate thread every block instance is scheduled on.
const SCHEDULE_THREAD: &str = "servo-thread";

/// The two ordered output streams of a compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalOutput {
    /// The primary stream, loaded at host-runtime startup.
    pub hal: Vec<String>,
    /// The deferred stream, loaded after the GUI components exist.
    pub postgui: Vec<String>,
}

impl HalOutput {
    /// The primary stream as one newline-terminated string.
    pub fn hal_text(&self) -> String {
        let mut text = self.hal.join("\n");
        text.push('\n');
        text
    }

    /// The deferred stream as one newline-terminated string.
    pub fn postgui_text(&self) -> String {
        let mut text = self.postgui.join("\n");
        text.push('\n');
        text
    }
}

pub(crate) fn emit(
    builder: &NetlistBuilder,
    sink: &DiagnosticSink,
) -> Result<HalOutput, CompileError> {
    let mut nl = Netlist::new(builder.constants().clone());
    let mut hal: Vec<String> = Vec::new();
    let mut postgui: Vec<String> = Vec::new();

    hal.push(String::new());
    hal.extend(builder.raw_top().iter().cloned());

    // Resolve every target to its final driving reference. This allocates
    // all blocks and fills the registry; serialization below only reads.
    for (destination, target) in builder.targets() {
        let cleaned = strip_markers(&target.expression);
        let resolved = resolver::reduce(&mut nl, &format!("({cleaned})"), destination, sink)?;
        let signal = nl
            .registry
            .resolve(&resolved, destination, target.signal_name.as_deref(), sink);
        nl.registry.add_driver(destination, signal, destination);
    }

    section(&mut hal, "logic and calc components");
    if !nl.gates.is_empty() {
        let names: Vec<&str> = nl.gates.keys().map(String::as_str).collect();
        let personalities: Vec<String> =
            nl.gates.values().map(|p| format!("0x{p:x}")).collect();
        hal.push(format!(
            "loadrt logic names={} personality={}",
            names.join(","),
            personalities.join(",")
        ));
        for name in &names {
            hal.push(format!("addf {name} {SCHEDULE_THREAD}"));
        }
        hal.push(String::new());
    }
    for (component, names) in nl.calcs.iter() {
        hal.push(format!("loadrt {component} names={}", names.join(",")));
        for name in names {
            hal.push(format!("addf {name} {SCHEDULE_THREAD}"));
        }
        hal.push(String::new());
    }

    section(&mut postgui, "networks");

    for (destination, target) in builder.targets() {
        section(&mut hal, &format!("{} --> {}", target.expression, destination));

        // Wires from externally declared source pins.
        for (pin, entry) in nl.registry.sources() {
            if entry.target == *destination && !pin.starts_with(BLOCK_PIN_PREFIX) {
                route(
                    &mut hal,
                    &mut postgui,
                    pin,
                    format!("net {:30} <= {}", entry.signal, pin),
                );
            }
        }

        // Per-block wiring, in allocation order: first every input port
        // (or its constant/parameter), then the block's output.
        let mut prefixes: Vec<String> = Vec::new();
        for (port, entry) in nl.registry.ports() {
            if entry.target == *destination && port.starts_with(BLOCK_PIN_PREFIX) {
                if let Some((prefix, _)) = port.rsplit_once('.') {
                    if !prefixes.iter().any(|p| p == prefix) {
                        prefixes.push(prefix.to_string());
                    }
                }
            }
        }
        for prefix in &prefixes {
            let dotted = format!("{prefix}.");
            for (port, entry) in nl.registry.ports() {
                if entry.target == *destination && port.starts_with(&dotted) {
                    match &entry.binding {
                        PortBinding::Parameter(value) => {
                            hal.push(format!("setp {port:32} {value}"));
                        }
                        PortBinding::Drivers(signals) => {
                            for signal in signals {
                                hal.push(format!("net {signal:30} => {port}"));
                            }
                        }
                    }
                }
            }
            for (pin, entry) in nl.registry.sources() {
                if entry.target == *destination && pin.starts_with(&dotted) {
                    hal.push(format!("net {:30} <= {}", entry.signal, pin));
                }
            }
        }

        // Wires into the destination and any other external consumers.
        for (port, entry) in nl.registry.ports() {
            if entry.target == *destination && !port.starts_with(BLOCK_PIN_PREFIX) {
                if let PortBinding::Drivers(signals) = &entry.binding {
                    for signal in signals {
                        route(
                            &mut hal,
                            &mut postgui,
                            port,
                            format!("net {signal:30} => {port}"),
                        );
                    }
                }
            }
        }
        hal.push(String::new());
    }
    postgui.push(String::new());

    if !nl.constants.is_empty() {
        section(&mut hal, "setp");
        section(&mut postgui, "setp");
        for (pin, value) in nl.constants.iter() {
            if let Some(linked) = nl.registry.linked_signals(pin) {
                hal.push(format!(
                    "# setp {pin:30}   {value:6} (already linked to {})",
                    linked.join(", ")
                ));
                sink.emit(
                    Diagnostic::warning(
                        codes::REDUNDANT_CONSTANT,
                        format!("constant assignment to '{pin}' dropped"),
                    )
                    .with_note(format!(
                        "the pin already carries signal '{}'",
                        linked.join(", ")
                    )),
                );
            } else if availability(pin) == Availability::Deferred {
                hal.push(format!("# setp {pin:30}   {value:6} (in postgui)"));
                postgui.push(format!("setp {pin:30}   {value}"));
            } else {
                hal.push(format!("setp {pin:30}   {value}"));
            }
        }
        hal.push(String::new());
        postgui.push(String::new());
    }

    section(&mut hal, "raw statements");
    hal.extend(builder.raw_bottom().iter().cloned());

    Ok(HalOutput { hal, postgui })
}

/// Writes one wiring statement into the right stream(s) for the pin's
/// availability class.
fn route(hal: &mut Vec<String>, postgui: &mut Vec<String>, pin: &str, line: String) {
    match availability(pin) {
        Availability::Deferred => {
            hal.push(format!("# {line} (in postgui)"));
            postgui.push(line);
        }
        Availability::Virtual => hal.push(format!("# {line} (virtual pin)")),
        Availability::Immediate => hal.push(line),
    }
}

/// Pushes a section banner.
fn section(out: &mut Vec<String>, title: &str) {
    let bar = "#".repeat(81);
    out.push(bar.clone());
    out.push(format!("# {title}"));
    out.push(bar);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_partitions_by_availability() {
        let mut hal = Vec::new();
        let mut postgui = Vec::new();
        route(&mut hal, &mut postgui, "rio.input1", "net a => rio.input1".to_string());
        route(&mut hal, &mut postgui, "pyvcp.lamp", "net a => pyvcp.lamp".to_string());
        route(&mut hal, &mut postgui, "riov.loop", "net a => riov.loop".to_string());
        assert_eq!(hal[0], "net a => rio.input1");
        assert_eq!(hal[1], "# net a => pyvcp.lamp (in postgui)");
        assert_eq!(hal[2], "# net a => riov.loop (virtual pin)");
        assert_eq!(postgui, vec!["net a => pyvcp.lamp".to_string()]);
    }

    #[test]
    fn hal_text_is_newline_terminated() {
        let output = HalOutput {
            hal: vec!["a".to_string(), "b".to_string()],
            postgui: Vec::new(),
        };
        assert_eq!(output.hal_text(), "a\nb\n");
    }

    #[test]
    fn serde_roundtrip() {
        let output = HalOutput {
            hal: vec!["loadrt logic names=func.and_0.1 personality=0x102".to_string()],
            postgui: vec!["net my_lamp                        => pyvcp.lamp".to_string()],
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: HalOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(output, back);
    }
}
