use crate::error::{CatalogError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// A clipboard program and the arguments that make it read stdin.
type Candidate = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const CANDIDATES: &[Candidate] = &[("pbcopy", &[])];

#[cfg(target_os = "linux")]
const CANDIDATES: &[Candidate] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(target_os = "windows")]
const CANDIDATES: &[Candidate] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CANDIDATES: &[Candidate] = &[];

/// Copies text to the system clipboard using the platform's command-line tool.
/// - macOS: pbcopy
/// - Linux: wl-copy, xclip or xsel
/// - Windows: clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let programs = CANDIDATES;
    if programs.is_empty() {
        return Err(CatalogError::Api(
            "Clipboard not supported on this platform".to_string(),
        ));
    }

    let mut last_error = None;
    for (program, args) in programs {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(program, error = %e, "clipboard program failed");
                last_error = Some(e);
            }
        }
    }

    let tried: Vec<_> = programs.iter().map(|(p, _)| *p).collect();
    Err(last_error.unwrap_or_else(|| {
        CatalogError::Api(format!("No clipboard program found (tried {})", tried.join(", ")))
    }))
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| CatalogError::Api(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| CatalogError::Api(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| CatalogError::Api(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(CatalogError::Api(format!("{} exited with {}", program, status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_an_api_error() {
        let err = pipe_to("prodcat-no-such-clipboard-tool", &[], "text").unwrap_err();
        assert!(matches!(err, CatalogError::Api(msg) if msg.contains("Failed to spawn")));
    }
}
