//! Output writing and confirmation prompts

use crate::error::{Result, UserAbort};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Ask whether `path` may be overwritten; anything but yes aborts
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    prompt: &mut W,
) -> Result<()> {
    write!(prompt, "{} already exists. Overwrite? [y/N] ", path.display())?;
    prompt.flush()?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer)?;
    let accepted = read > 0 && matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

    if accepted {
        Ok(())
    } else {
        Err(UserAbort.into())
    }
}

/// Make sure `path` may be written, asking on stderr when it already exists
pub fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if force || !path.exists() {
        return Ok(());
    }
    confirm_overwrite(path, &mut io::stdin().lock(), &mut io::stderr())
}

/// Print rendered text to stdout, or write it to `output`
pub fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut contents = rendered.to_string();
            if !contents.is_empty() {
                contents.push('\n');
            }
            fs::write(path, contents)?;
        }
        None if rendered.is_empty() => {}
        None => println!("{}", rendered),
    }
    Ok(())
}
