//! Mutable netlist state built up while expressions are resolved: allocated
//! block instances, constant assignments, and the signal registry.

use indexmap::IndexMap;
use std::collections::HashMap;

use halwire_common::component::native_invert;
use halwire_common::pin::classify;
use halwire_common::Operand;
use halwire_diagnostics::DiagnosticSink;

use crate::error::CompileError;
use crate::kind::{ArithKind, BlockOp, GateKind};
use crate::registry::SignalRegistry;

/// HAL component name of the synthesized unary inverter.
const INVERTER_COMPONENT: &str = "not";

/// All state produced by block allocation during one compilation.
pub(crate) struct Netlist {
    /// Pin naming and port driver bookkeeping.
    pub registry: SignalRegistry,
    /// Gate instance name to personality parameter, in allocation order.
    pub gates: IndexMap<String, u32>,
    /// Arithmetic/inverter component to instance names, in allocation order.
    pub calcs: IndexMap<&'static str, Vec<String>>,
    /// Port to literal constant assignment; the first assignment wins.
    pub constants: IndexMap<String, String>,
    /// Per-target block sequence counters, keyed in first-allocation order.
    target_seq: IndexMap<String, u32>,
    /// Reduced-expression cache for cross-target deduplication.
    cache: HashMap<String, String>,
}

impl Netlist {
    /// Creates a netlist seeded with the caller-supplied constant
    /// assignments, so they precede block-operand literals in the output.
    pub fn new(constants: IndexMap<String, String>) -> Self {
        Self {
            registry: SignalRegistry::new(),
            gates: IndexMap::new(),
            calcs: IndexMap::new(),
            constants,
            target_seq: IndexMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Records a constant assignment unless the port already has one.
    pub fn add_constant(&mut self, port: String, value: String) {
        self.constants.entry(port).or_insert(value);
    }

    /// Returns a reference whose value is the negation of `pin`.
    ///
    /// Components on the native-invert allow-list expose the inverted value
    /// as a hardware pin, so no block is spent on them. Everything else gets
    /// a single-input inverter instance, allocated once per pin. The
    /// inverter is named after the pin it negates, but it still consumes the
    /// target's next block number, so later blocks for the same target (and
    /// target-index assignment) number past it.
    pub fn invert(&mut self, pin: &str, target: &str, sink: &DiagnosticSink) -> String {
        if let Some(native) = native_invert(pin) {
            return native;
        }
        let fname = format!("func.{INVERTER_COMPONENT}_{}", pin.replace('.', "_"));
        let allocated = self
            .calcs
            .get(INVERTER_COMPONENT)
            .is_some_and(|names| names.iter().any(|name| name == &fname));
        if !allocated {
            self.calcs
                .entry(INVERTER_COMPONENT)
                .or_default()
                .push(fname.clone());
            let signal = self.registry.resolve(pin, target, None, sink);
            self.registry.add_driver(&format!("{fname}.in"), signal, target);
            self.bump_target(target);
        }
        format!("{fname}.out")
    }

    /// Reduces one operator group (`a OP b [OP c ...]`) to a block output
    /// reference, allocating the block and wiring its inputs.
    ///
    /// Identical group texts are cached across the whole session, so a
    /// repeated sub-expression reuses the block allocated for its first
    /// occurrence, even under a different destination.
    pub fn allocate_block(
        &mut self,
        group: &str,
        target: &str,
        sink: &DiagnosticSink,
    ) -> Result<String, CompileError> {
        if let Some(output) = self.cache.get(group) {
            return Ok(output.clone());
        }

        let parts: Vec<&str> = group.split_whitespace().collect();
        if parts.len() < 3 || parts.len() % 2 == 0 {
            return Err(CompileError::MalformedChain(group.to_string()));
        }
        let op = BlockOp::parse(parts[1]).ok_or_else(|| CompileError::UnknownOperator {
            token: parts[1].to_string(),
            expr: group.to_string(),
        })?;
        for token in parts.iter().skip(3).step_by(2) {
            match BlockOp::parse(token) {
                None => {
                    return Err(CompileError::UnknownOperator {
                        token: token.to_string(),
                        expr: group.to_string(),
                    })
                }
                Some(other) if other != op => {
                    return Err(CompileError::MixedOperators(group.to_string()))
                }
                Some(_) => {}
            }
        }
        let operands: Vec<&str> = parts.iter().step_by(2).copied().collect();

        let id = self.next_instance_id(target);
        let output = match op {
            BlockOp::Gate(kind) => self.alloc_gate(kind, &operands, &id, group, target, sink)?,
            BlockOp::Arith(kind) => self.alloc_arith(kind, &operands, &id, group, target, sink)?,
        };
        self.cache.insert(group.to_string(), output.clone());
        Ok(output)
    }

    fn alloc_gate(
        &mut self,
        kind: GateKind,
        operands: &[&str],
        id: &str,
        group: &str,
        target: &str,
        sink: &DiagnosticSink,
    ) -> Result<String, CompileError> {
        let fname = format!("func.{}_{id}", kind.name());
        self.gates.insert(fname.clone(), kind.personality(operands.len()));
        for (n, token) in operands.iter().enumerate() {
            let port = format!("{fname}.in-{n:02}");
            self.bind_input(&port, token, group, target, sink)?;
        }
        Ok(format!("{fname}.{}", kind.name()))
    }

    fn alloc_arith(
        &mut self,
        kind: ArithKind,
        operands: &[&str],
        id: &str,
        group: &str,
        target: &str,
        sink: &DiagnosticSink,
    ) -> Result<String, CompileError> {
        let fname = format!("func.{}_{id}", kind.instance_prefix());
        self.calcs
            .entry(kind.component())
            .or_default()
            .push(fname.clone());
        for (n, token) in operands.iter().enumerate() {
            let port = format!("{fname}.in{n}");
            self.bind_input(&port, token, group, target, sink)?;
            if kind == ArithKind::Sub && n == 1 {
                // difference = signed sum with the second operand negated
                self.registry
                    .set_parameter(&format!("{fname}.gain{n}"), -1, target);
            }
        }
        Ok(format!("{fname}.{}", kind.output_port()))
    }

    /// Classifies one operand token and binds it to `port`.
    fn bind_input(
        &mut self,
        port: &str,
        token: &str,
        group: &str,
        target: &str,
        sink: &DiagnosticSink,
    ) -> Result<(), CompileError> {
        let operand = classify(token).map_err(|source| CompileError::InvalidOperand {
            expr: group.to_string(),
            source,
        })?;
        match operand {
            Operand::Literal(value) => self.add_constant(port.to_string(), value),
            Operand::Inverted(pin) => {
                let inverted = self.invert(&pin, target, sink);
                let signal = self.registry.resolve(&inverted, target, None, sink);
                self.registry.add_driver(port, signal, target);
            }
            Operand::SignalAlias(_) | Operand::Pin(_) => {
                let signal = self.registry.resolve(token, target, None, sink);
                self.registry.add_driver(port, signal, target);
            }
        }
        Ok(())
    }

    /// Next deterministic instance id for `target`: `<target-index>.<seq>`,
    /// where the index is the target's rank among block-allocating targets
    /// and the sequence counts blocks allocated for it.
    fn next_instance_id(&mut self, target: &str) -> String {
        let (index, seq) = self.bump_target(target);
        format!("{index}.{seq}")
    }

    /// Claims the next block number for `target`, registering the target's
    /// index slot on first use.
    fn bump_target(&mut self, target: &str) -> (usize, u32) {
        let index = match self.target_seq.get_index_of(target) {
            Some(index) => index,
            None => {
                self.target_seq.insert(target.to_string(), 0);
                self.target_seq.len() - 1
            }
        };
        let seq = &mut self.target_seq[index];
        *seq += 1;
        (index, *seq)
    }
}
