//! `halwire check` — compile a wiring file without writing output.

use halwire_diagnostics::DiagnosticSink;

use crate::{pipeline, CheckArgs};

/// Runs the `halwire check` command.
///
/// Compiles the wiring file, reports diagnostics, and discards the output.
/// Returns exit code 0 if compilation succeeded (warnings included), 1 on
/// a compilation failure.
pub fn run(args: &CheckArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let wiring = halwire_config::load_wiring(&args.file)?;
    let sink = DiagnosticSink::new();

    let code = match pipeline::compile_wiring(&wiring, &sink) {
        Ok(output) => {
            if !quiet {
                eprintln!(
                    "ok: {} hal lines, {} postgui lines, {} warnings",
                    output.hal.len(),
                    output.postgui.len(),
                    sink.len()
                );
            }
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    };
    pipeline::report_diagnostics(&sink, quiet);
    Ok(code)
}
