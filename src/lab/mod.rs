//! Lab submission files: steps of text lines, stored in a numbered layout.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::runtime::Runtime;

pub mod format;

/// One numbered section of a submission: its lines, in order.
pub type Step = Vec<String>;

/// Number of steps when the user does not ask for a specific count.
pub const DEFAULT_STEPS: usize = 6;

/// A fresh step holds a single empty line for the cursor to sit on.
pub fn new_step() -> Step {
    vec![String::new()]
}

pub fn make_steps(n: usize) -> Vec<Step> {
    (0..n).map(|_| new_step()).collect()
}

/// Conventional file name, e.g. `activity-01_ch_02_lab_03.txt`.
pub fn activity_file_name(activity: u32, chapter: u32, lab: u32) -> String {
    format!(
        "activity-{:02}_ch_{:02}_lab_{:02}.txt",
        activity, chapter, lab
    )
}

/// Load a submission. An unreadable file yields a single empty step.
#[tracing::instrument(skip(runtime))]
pub fn load_file<R: Runtime>(runtime: &R, path: &Path) -> Vec<Step> {
    match runtime.read_to_string(path) {
        Ok(content) => format::parse(&content),
        Err(e) => {
            debug!("Could not read {:?}: {:#}", path, e);
            vec![new_step()]
        }
    }
}

/// Save a submission in the clean layout, replacing the file atomically.
///
/// A symlinked submission is saved through the link, and an existing file
/// keeps its permission bits.
#[tracing::instrument(skip(runtime, steps))]
pub fn save_file<R: Runtime>(runtime: &R, path: &Path, steps: &[Step]) -> Result<()> {
    let content = format::render(steps);
    let target = runtime
        .canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf());
    let mut tmp_name = target.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    runtime
        .write(tmp_path, content.as_bytes())
        .with_context(|| format!("Failed to write {:?}", tmp_path))?;
    if let Some(mode) = runtime.file_mode(&target) {
        runtime
            .set_permissions(tmp_path, mode)
            .with_context(|| format!("Failed to set permissions on {:?}", tmp_path))?;
    }
    runtime
        .rename(tmp_path, &target)
        .with_context(|| format!("Failed to replace {:?}", target))?;
    info!("Saved {} step(s) to {:?}", steps.len(), target);
    Ok(())
}

/// Load `path` if it exists, otherwise start `num_steps` empty steps.
/// Either way the result has at least `num_steps` steps.
pub fn open_or_create<R: Runtime>(runtime: &R, path: &Path, num_steps: usize) -> Vec<Step> {
    let mut steps = if runtime.exists(path) {
        load_file(runtime, path)
    } else {
        debug!("{:?} does not exist, starting {} empty step(s)", path, num_steps);
        make_steps(num_steps)
    };

    while steps.len() < num_steps {
        steps.push(new_step());
    }
    steps
}
