//! Choosing which submission to open.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::lab::activity_file_name;
use crate::runtime::prompt_number_with_io;

/// A submission file and how many steps it should have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub path: PathBuf,
    pub steps: usize,
}

/// Ask for activity, chapter, lab and step count.
pub fn interactive_setup<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Launch> {
    writeln!(output, "=== Lab Editor Setup ===")?;
    writeln!(output)?;

    let activity = prompt_number_with_io("  Activity number", input, output)?;
    let chapter = prompt_number_with_io("  Chapter number", input, output)?;
    let lab = prompt_number_with_io("  Lab number", input, output)?;
    let steps = prompt_number_with_io("  Number of steps", input, output)?;

    let name = activity_file_name(activity, chapter, lab);
    writeln!(output)?;
    writeln!(output, "  -> {}  ({} steps)", name, steps)?;
    writeln!(output)?;

    Ok(Launch {
        path: PathBuf::from(name),
        steps: steps as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_interactive_setup() {
        let mut input = Cursor::new(b"1\n2\n\nx\n3\n8\n".as_slice());
        let mut output = Vec::new();

        let launch = interactive_setup(&mut input, &mut output).unwrap();

        assert_eq!(
            launch,
            Launch {
                path: PathBuf::from("activity-01_ch_02_lab_03.txt"),
                steps: 8,
            }
        );
        let out = String::from_utf8(output).unwrap();
        assert!(out.starts_with("=== Lab Editor Setup ===\n"));
        assert!(out.contains("  -> activity-01_ch_02_lab_03.txt  (8 steps)"));
        assert!(out.contains("Please enter a positive number."));
    }

    #[test]
    fn test_interactive_setup_aborts_on_end_of_input() {
        let mut input = Cursor::new(b"1\n2\n".as_slice());
        let mut output = Vec::new();

        let result = interactive_setup(&mut input, &mut output);
        assert!(result.unwrap_err().to_string().contains("Lab number"));
    }
}
