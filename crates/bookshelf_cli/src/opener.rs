//! Launches files with the platform's default application.
//!
//! Outcomes are plain status values; they are not catalog errors.

use log::{info, warn};
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenStatus {
    Opened,
    Failed(String),
}

/// Hands `path` to `open` (macOS), `cmd /C start` (Windows) or `xdg-open`.
pub fn open_with_default_app(path: &Path) -> OpenStatus {
    let mut command = launcher_command(path);
    let status = match command.status() {
        Ok(status) => status,
        Err(err) => {
            warn!("event=book_open module=cli status=error error={}", err);
            return OpenStatus::Failed(format!("could not start launcher: {err}"));
        }
    };

    if status.success() {
        info!("event=book_open module=cli status=ok");
        OpenStatus::Opened
    } else {
        warn!(
            "event=book_open module=cli status=error exit_code={:?}",
            status.code()
        );
        OpenStatus::Failed("no default application found".to_string())
    }
}

fn launcher_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        // `start` reads its first quoted argument as a window title.
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}
