//! `halwire build` — compile a wiring file and write both output streams.

use std::path::{Path, PathBuf};

use halwire_diagnostics::DiagnosticSink;

use crate::{pipeline, BuildArgs};

/// Runs the `halwire build` command.
///
/// Loads the wiring file, compiles it, and writes `<stem>.hal` and
/// `<stem>_postgui.hal` into the output directory. Returns exit code 0 on
/// success, 1 on a compilation failure.
pub fn run(args: &BuildArgs, quiet: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let wiring = halwire_config::load_wiring(&args.file)?;
    let sink = DiagnosticSink::new();

    let output = match pipeline::compile_wiring(&wiring, &sink) {
        Ok(output) => output,
        Err(err) => {
            // warnings recorded before the hard error still get reported
            pipeline::report_diagnostics(&sink, quiet);
            eprintln!("error: {err}");
            return Ok(1);
        }
    };

    let stem = args
        .file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("wiring");
    let out_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => args
            .file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&out_dir)?;

    let hal_path = out_dir.join(format!("{stem}.hal"));
    let postgui_path = out_dir.join(format!("{stem}_postgui.hal"));
    std::fs::write(&hal_path, output.hal_text())?;
    std::fs::write(&postgui_path, output.postgui_text())?;

    pipeline::report_diagnostics(&sink, quiet);
    if !quiet {
        eprintln!("     Wrote {}", hal_path.display());
        eprintln!("     Wrote {}", postgui_path.display());
    }
    Ok(0)
}
