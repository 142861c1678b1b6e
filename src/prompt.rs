use crate::errors::{Error, Result};
use crate::scanner::TEXT_EXTENSION;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// How many discovered paths are listed before the rest are summarized.
pub const PREVIEW_LIMIT: usize = 10;

/// Prints the files about to be edited to `output`.
pub fn preview<W: Write>(files: &[PathBuf], output: &mut W) -> Result<()> {
    writeln!(
        output,
        "\nFound {} .{} files to process:",
        files.len(),
        TEXT_EXTENSION
    )?;

    for path in files.iter().take(PREVIEW_LIMIT) {
        writeln!(output, "  - {}", path.display())?;
    }

    if files.len() > PREVIEW_LIMIT {
        writeln!(output, "  ... and {} more files", files.len() - PREVIEW_LIMIT)?;
    }

    Ok(())
}

/// Shows a preview of `files` and asks the operator whether to go ahead.
///
/// Blocks until `input` yields `y`/`yes` or `n`/`no` (any case). Anything else
/// re-prompts. Running out of input before an answer is an error.
pub fn confirm<R: BufRead, W: Write>(files: &[PathBuf], input: &mut R, output: &mut W) -> Result<bool> {
    preview(files, output)?;

    loop {
        write!(output, "\nProceed with editing these files? (y/n): ")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Err(Error::PromptClosed);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer with 'y' or 'n'")?,
        }
    }
}
