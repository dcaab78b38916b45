mod background;
mod distance;
mod pick;
mod trace;
mod utils;

use crate::cli::{Cli, Commands, GlobalOptions};
use backdrop::BackdropResult;

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> BackdropResult<()> {
    let Cli { global, command } = cli;
    dispatch(&global, command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(global: &GlobalOptions, command: Commands) -> BackdropResult<()> {
    match command {
        Commands::Trace(cmd) => trace::run(global, cmd),
        Commands::Background(cmd) => background::run(global, cmd),
        Commands::Pick(cmd) => pick::run(global, cmd),
        Commands::Distance(cmd) => distance::run(cmd),
    }
}
