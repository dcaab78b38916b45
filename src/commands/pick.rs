use backdrop::{BackdropResult, to_hex};

use crate::cli::{GlobalOptions, PickCommand};

use super::utils::{build_search, spinner};

/// Run the pick command.
pub fn run(global: &GlobalOptions, cmd: PickCommand) -> BackdropResult<()> {
    let search = build_search(global)?;

    let pb = spinner("Searching for a distinct color...");
    let outcome = search.run(&cmd.colors);
    pb.finish_and_clear();

    println!(
        "{} threshold={} counter={}",
        to_hex(outcome.color),
        outcome.threshold,
        outcome.counter
    );
    Ok(())
}
