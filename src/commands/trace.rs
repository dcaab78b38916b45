use std::fs;

use backdrop::{BackdropResult, TraceOptions, VtracerShapeTracer, to_hex};

use crate::cli::{GlobalOptions, TraceCommand};

use super::utils::{build_backdrop, derive_svg_path, resolve_export_path, spinner};

/// The main function to run the trace command.
pub fn run(global: &GlobalOptions, cmd: TraceCommand) -> BackdropResult<()> {
    let backdrop = build_backdrop(global, &cmd.sampling)?;
    let source = backdrop.open(&cmd.input)?;
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_svg_path(&cmd.input));
    let options = TraceOptions::from(&cmd.trace_options);

    if cmd.export_filled.is_some() && !source.has_alpha() {
        eprintln!("Warning: input has no alpha channel; no background is filled and nothing is exported.");
    }

    let pb = spinner("Tracing shapes and picking a background color, may take a while...");
    let outcome = source.trace(&VtracerShapeTracer, &options);
    pb.finish_and_clear();
    let outcome = outcome?;

    if let Some(background) = &outcome.background {
        println!(
            "Background {} (threshold {}, {} samples)",
            to_hex(background.color),
            background.threshold,
            background.samples
        );
        println!(
            "Kept {} shapes, discarded {}",
            outcome.kept, outcome.discarded
        );
    }

    fs::write(&output_path, outcome.shapes.to_string())?;
    println!("SVG saved to {}", output_path.display());

    if let (Some(path), Some(filled)) = (
        resolve_export_path(&cmd.export_filled, &cmd.input, "filled"),
        outcome.filled.as_ref(),
    ) {
        filled.save(&path)?;
        println!("Filled PNG saved to {}", path.display());
    }

    Ok(())
}
