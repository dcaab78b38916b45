use backdrop::{BackdropResult, distance};

use crate::cli::DistanceCommand;

/// Run the distance command.
pub fn run(cmd: DistanceCommand) -> BackdropResult<()> {
    println!("{:.4}", distance(cmd.reference, cmd.other));
    Ok(())
}
