use clap::{Parser, Subcommand};

use self::{drive::DriveArg, show_config::ShowConfigArg};

mod drive;
mod show_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train the driver online on the built-in track
    Drive(#[clap(flatten)] DriveArg),
    /// Print the driver configuration as JSON
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Drive(arg) => drive::run(&arg)?,
        Mode::ShowConfig(arg) => show_config::run(&arg)?,
    }
    Ok(())
}
