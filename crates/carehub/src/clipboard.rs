use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to(Command::new("pbcopy"), text, "pbcopy")
    }

    #[cfg(target_os = "linux")]
    {
        copy_linux(text)
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to(Command::new("clip"), text, "clip")
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(anyhow!("Clipboard not supported on this platform"))
    }
}

#[cfg(target_os = "linux")]
fn copy_linux(text: &str) -> Result<()> {
    let mut xclip = Command::new("xclip");
    xclip.args(["-selection", "clipboard"]);
    match pipe_to(xclip, text, "xclip") {
        Ok(()) => Ok(()),
        Err(first) => {
            tracing::debug!(error = %first, "xclip failed, trying xsel");
            let mut xsel = Command::new("xsel");
            xsel.args(["--clipboard", "--input"]);
            pipe_to(xsel, text, "xsel").context("Install xclip or xsel")
        }
    }
}

fn pipe_to(mut command: Command, text: &str, name: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to spawn {}", name))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("Failed to write to {}", name))?;
    }

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for {}", name))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{} exited with error", name))
    }
}
