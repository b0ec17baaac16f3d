//! Elevated commands.

use anyhow::{Context, Result, bail};
use log::debug;
use std::path::Path;
use std::process::Command;

use super::RealRuntime;

const ELEVATION_TOOL: &str = "sudo";

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn elevated_copy_impl(&self, from: &Path, to: &Path, mode: u32) -> Result<()> {
        let sudo = which::which(ELEVATION_TOOL)
            .with_context(|| format!("{} is not available", ELEVATION_TOOL))?;
        debug!("Using {:?} for elevated copy", sudo);

        run(Command::new(&sudo).arg("cp").arg(from).arg(to))?;
        run(Command::new(&sudo)
            .arg("chmod")
            .arg(format!("{:o}", mode))
            .arg(to))
    }
}

fn run(cmd: &mut Command) -> Result<()> {
    debug!("Running {:?}", cmd);
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run {:?}", cmd))?;
    if !status.success() {
        bail!("{:?} failed with {}", cmd, status);
    }
    Ok(())
}
