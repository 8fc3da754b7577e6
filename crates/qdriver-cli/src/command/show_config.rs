use std::path::PathBuf;

use anyhow::Context as _;
use qdriver_training::config::DriverConfig;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    /// Configuration file to check and print with defaults filled in
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowConfigArg) -> anyhow::Result<()> {
    let config = match &arg.config {
        Some(path) => util::read_json_file::<DriverConfig, _>("driver config", path)?,
        None => DriverConfig::default(),
    };
    config.validate().context("Invalid driver configuration")?;
    Output::save_json(&config, arg.output.clone())
}
