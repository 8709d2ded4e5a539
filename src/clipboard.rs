use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// Hidden argument that turns this binary into the clipboard keeper.
pub const DAEMON_FLAG: &str = "__clipboard_daemon";

/// Destination for the finished output.
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
///
/// On Linux the selection is owned by whichever process set it, so the text
/// is handed to a detached copy of this binary that holds it after we exit.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    #[cfg(not(target_os = "linux"))]
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_owned())?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn copy_text(&mut self, text: &str) -> Result<()> {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let mut child = Command::new(std::env::current_exe()?)
            .arg(DAEMON_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()?;

        let Some(mut stdin) = child.stdin.take() else {
            return Err(anyhow::anyhow!("failed to get stdin for clipboard daemon"));
        };
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn run_daemon_mode() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())?;

    let mut clipboard = Clipboard::new()?;
    // Blocks until another program takes ownership of the clipboard.
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Run as the clipboard keeper if we were spawned as one.
/// Returns `Ok(true)` when the daemon ran and the process should exit.
pub fn check_and_run_daemon_if_requested() -> Result<bool> {
    if !std::env::args().any(|a| a == DAEMON_FLAG) {
        return Ok(false);
    }
    #[cfg(target_os = "linux")]
    run_daemon_mode()?;
    #[cfg(not(target_os = "linux"))]
    eprintln!("Warning: {DAEMON_FLAG} is only used on Linux. Ignoring.");
    Ok(true)
}

/// Collects copied text instead of touching the desktop.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub copies: Vec<String>,
    pub fail: bool,
}

#[cfg(test)]
impl ClipboardSink for RecordingClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("no display");
        }
        self.copies.push(text.to_owned());
        Ok(())
    }
}
