//! Clipboard hand-off.
//!
//! Pipes text into the first platform clipboard tool found on PATH.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Clipboard tools in preference order, with the arguments that make them
/// read the new clipboard contents from stdin.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Copy `text` to the system clipboard.
///
/// # Errors
///
/// Returns `Error::Clipboard` if no tool is installed or the tool fails.
pub fn copy(text: &str) -> Result<()> {
    let (program, args) = find_tool()?;
    debug!(tool = %program.display(), "copying to clipboard");

    // Helpers like xclip and wl-copy fork to serve the selection, so their
    // output streams must not be piped or waiting would block.
    let mut child = Command::new(&program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Clipboard("failed to open clipboard tool stdin".to_string()))?;
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::Clipboard(format!(
            "{} exited with {}",
            program.display(),
            status
        )));
    }

    Ok(())
}

fn find_tool() -> Result<(PathBuf, &'static [&'static str])> {
    TOOLS
        .iter()
        .find_map(|(name, args)| which::which(name).ok().map(|path| (path, *args)))
        .ok_or_else(|| {
            Error::Clipboard(
                "no clipboard tool found (install pbcopy, wl-clipboard, xclip or xsel)"
                    .to_string(),
            )
        })
}
