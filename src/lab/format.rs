//! Text layout of a lab submission file.
//!
//! The current layout has no blank lines: each step starts with its number
//! on a line of its own, followed by the step's lines.
//!
//! ```text
//! 1
//! {giant:~} echo hello
//! hello
//! 2
//! {giant:~} ls
//! file.txt
//! ```
//!
//! Two older layouts are still read: blank-line separated steps, and the
//! dollar layout where commands were written as `$ cmd` and bare `$` lines
//! closed an entry.

use super::{Step, new_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Clean,
    Dollar,
}

/// Parse file contents into steps. Never returns an empty list.
///
/// Step boundaries are found by looking only for the *next* expected step
/// number, so bare numbers in command output stay part of the step.
pub fn parse(content: &str) -> Vec<Step> {
    if content.trim().is_empty() {
        return vec![new_step()];
    }

    let layout = if content.lines().any(|l| l.starts_with("$ ")) {
        Layout::Dollar
    } else {
        Layout::Clean
    };

    let mut steps: Vec<Step> = Vec::new();
    let mut current: Step = Vec::new();
    let mut next_expected: u32 = 1;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed == next_expected.to_string() {
            if !current.is_empty() {
                steps.push(std::mem::take(&mut current));
            }
            next_expected += 1;
            continue;
        }

        match layout {
            Layout::Dollar if line == "$" => {}
            Layout::Dollar if line.starts_with("$ ") => current.push(line[2..].to_string()),
            _ => current.push(line.to_string()),
        }
    }

    if !current.is_empty() {
        steps.push(current);
    }

    if steps.is_empty() {
        vec![new_step()]
    } else {
        steps
    }
}

/// Render steps in the clean layout, ending with exactly one newline.
pub fn render(steps: &[Step]) -> String {
    let mut output = String::new();

    for (i, step) in steps.iter().enumerate() {
        output.push_str(&(i + 1).to_string());
        output.push('\n');
        for line in step {
            output.push_str(line);
            output.push('\n');
        }
    }

    let trimmed = output.trim_end_matches('\n');
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{}\n", trimmed)
    }
}
