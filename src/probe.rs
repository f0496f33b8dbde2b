use std::path::Path;
use std::process::Command;
use std::sync::mpsc::Sender;
use std::thread;

use log::warn;

use crate::models::WorkerEvent;

/// True when ffmpeg is on PATH and answers its version probe.
pub fn companion_present() -> bool {
    which::which("ffmpeg")
        .ok()
        .and_then(|path| Command::new(path).arg("-version").output().ok())
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Version string reported by the cached yt-dlp binary, "unknown" when the
/// probe fails to launch or exits non-zero.
pub fn helper_version(path: &Path) -> String {
    Command::new(path)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Startup probe for the companion tool. Non-fatal: a missing ffmpeg only
/// produces a one-time warning, it never blocks the other actions.
pub fn check_companion(tx: Sender<WorkerEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        if !companion_present() {
            warn!("ffmpeg not found on PATH");
            let _ = tx.send(WorkerEvent::CompanionMissing);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_version_reports_unknown_for_missing_binary() {
        let version = helper_version(Path::new("/nonexistent/yt-dlp"));
        assert_eq!(version, "unknown");
    }
}
