//! Component availability classes and the native-invert allow-list.
//!
//! HAL components fall into three availability classes. Most exist as soon
//! as the primary stream is loaded. GUI components only exist after the
//! host runtime's GUI initialization phase, so their wiring goes into the
//! deferred stream. Virtual components are logical loopback endpoints with
//! no standalone existence and are never wired externally.

use crate::pin;
use serde::{Deserialize, Serialize};

/// Components that only exist after the GUI phase of host-runtime startup.
const DEFERRED_COMPONENTS: &[&str] = &[
    "pyvcp",
    "gladevcp",
    "rio-gui",
    "qtdragon",
    "qtvcp",
    "qtpyvcp",
    "axisui",
    "mpg",
    "vismach",
    "kinstype",
    "melfagui",
    "fanuc_200f",
    "gmoccapy",
];

/// Logical loopback components with no standalone pins to wire against.
const VIRTUAL_COMPONENTS: &[&str] = &["riov"];

/// Components whose pins expose a hardware inverted counterpart, with the
/// pin-name suffix that selects it.
const NATIVE_INVERTS: &[(&str, &str)] = &[("rio", "-not")];

/// When a wiring statement touching a pin may be emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// The component exists at load time; wire it in the primary stream.
    Immediate,
    /// The component exists only after GUI startup; wire it in the
    /// deferred stream and comment it out of the primary one.
    Deferred,
    /// A loopback endpoint that is never wired externally.
    Virtual,
}

/// Classifies a pin by the availability of its owning component.
pub fn availability(pin: &str) -> Availability {
    let comp = pin::component(pin);
    if DEFERRED_COMPONENTS.contains(&comp) {
        Availability::Deferred
    } else if VIRTUAL_COMPONENTS.contains(&comp) {
        Availability::Virtual
    } else {
        Availability::Immediate
    }
}

/// Returns the native inverted counterpart of `pin`, if its component (or
/// the full pin text) is on the hardware-invert allow-list.
pub fn native_invert(pin: &str) -> Option<String> {
    let comp = pin::component(pin);
    for (name, suffix) in NATIVE_INVERTS {
        if *name == comp || *name == pin {
            return Some(format!("{pin}{suffix}"));
        }
    }
    None
}
