//! User interaction operations (line prompts).

use anyhow::{Result, bail};

use std::io::{BufRead, Write};

/// Prompt until the user enters a positive integer.
///
/// Empty lines re-prompt silently, anything that is not a positive integer
/// prints an error and re-prompts. End of input is an error.
pub fn prompt_number_with_io<R: BufRead, W: Write>(
    label: &str,
    input: &mut R,
    output: &mut W,
) -> Result<u32> {
    loop {
        write!(output, "{}: ", label)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            bail!("Input ended before a value for '{}' was entered", label.trim());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed.parse::<u32>() {
            Ok(v) if v > 0 => return Ok(v),
            _ => writeln!(
                output,
                "  Error: Invalid input. Please enter a positive number."
            )?,
        }
    }
}
