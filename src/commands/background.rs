use backdrop::{BackdropResult, TraceOptions, VtracerShapeTracer, to_hex};

use crate::cli::{BackgroundCommand, GlobalOptions};

use super::utils::{build_backdrop, resolve_export_path, spinner};

/// Run the background command.
pub fn run(global: &GlobalOptions, cmd: BackgroundCommand) -> BackdropResult<()> {
    let backdrop = build_backdrop(global, &cmd.sampling)?;
    let source = backdrop.open(&cmd.input)?;
    let options = TraceOptions::from(&cmd.trace_options);

    let pb = spinner("Getting the best background color, may take a while...");
    let choice = source.choose_background(&VtracerShapeTracer, &options);
    pb.finish_and_clear();
    let choice = choice?;

    println!(
        "{} threshold={} samples={}",
        to_hex(choice.color),
        choice.threshold,
        choice.samples
    );

    if let Some(path) = resolve_export_path(&cmd.export_filled, &cmd.input, "filled") {
        source.filled(&choice).save(&path)?;
        println!("Filled PNG saved to {}", path.display());
    }

    Ok(())
}
