//! Shared plumbing between the `build` and `check` subcommands.

use halwire_compile::{CompileError, HalOutput, NetlistBuilder};
use halwire_config::WiringFile;
use halwire_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};

/// Feeds every declaration of a wiring file into a fresh builder and
/// compiles it.
pub fn compile_wiring(
    wiring: &WiringFile,
    sink: &DiagnosticSink,
) -> Result<HalOutput, CompileError> {
    let mut builder = NetlistBuilder::new();
    for line in &wiring.raw.top {
        builder.add_raw_top(line.clone());
    }
    for net in &wiring.nets {
        builder.declare(&net.expr, &net.target, net.signal.as_deref(), sink);
    }
    for constant in &wiring.constants {
        builder.assign_constant(&constant.pin, &constant.value);
    }
    for line in &wiring.raw.bottom {
        builder.add_raw(line.clone());
    }
    builder.compile(sink)
}

/// Renders all accumulated diagnostics to stderr.
pub fn report_diagnostics(sink: &DiagnosticSink, quiet: bool) {
    if quiet {
        return;
    }
    let renderer = TerminalRenderer::new(false);
    for diag in sink.diagnostics() {
        eprint!("{}", renderer.render(&diag));
    }
}
