use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;

use anyhow::{anyhow, Context, Result};
use log::info;

use crate::models::{DownloadFormat, TaskKind, WorkerEvent};

/// Returns the trimmed URL, or `None` for empty and whitespace-only input.
/// Callers must reject `None` before any subprocess is spawned.
pub fn normalized_url(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Argument list for one download invocation. Two fixed presets: audio
/// extraction to mp3, or video+audio capped at 1080p muxed into mp4.
pub fn build_download_args(url: &str, format: DownloadFormat, download_dir: &Path) -> Vec<String> {
    let output_template = download_dir
        .join("%(title)s.%(ext)s")
        .to_string_lossy()
        .to_string();

    let mut args = vec![
        url.to_string(),
        "--no-mtime".to_string(),
        "--newline".to_string(),
        "-o".to_string(),
        output_template,
    ];

    match format {
        DownloadFormat::MP3 => {
            args.extend(
                ["-x", "--audio-format", "mp3", "--audio-quality", "192K"].map(String::from),
            );
        }
        DownloadFormat::MP4 => {
            args.extend(
                [
                    "-f",
                    "bv*[height<=1080]+ba/bestvideo+bestaudio",
                    "--merge-output-format",
                    "mp4",
                    "--postprocessor-args",
                    "-c:a aac -b:a 192k",
                ]
                .map(String::from),
            );
        }
    }

    args
}

pub fn start_download(
    helper: PathBuf,
    url: String,
    format: DownloadFormat,
    download_dir: PathBuf,
    tx: Sender<WorkerEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = relay_download(&helper, &url, format, &download_dir, &tx)
            .map_err(|error| format!("{error:#}"));
        let _ = tx.send(WorkerEvent::Finished {
            task: TaskKind::Download,
            result,
        });
    })
}

/// Runs the helper and relays each line of its output to the UI as it
/// arrives. stdout is read on this thread, stderr on a second one; the
/// last stderr line is kept as the failure message.
fn relay_download(
    helper: &Path,
    url: &str,
    format: DownloadFormat,
    download_dir: &Path,
    tx: &Sender<WorkerEvent>,
) -> Result<String> {
    let mut child = Command::new(helper)
        .args(build_download_args(url, format, download_dir))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to launch yt-dlp")?;

    let stdout = child.stdout.take().context("no stdout handle")?;
    let stderr = child.stderr.take().context("no stderr handle")?;

    let tx_err = tx.clone();
    let stderr_handle = thread::spawn(move || {
        let mut last_line: Option<String> = None;
        for line in BufReader::new(stderr).lines().map_while(|line| line.ok()) {
            if !line.trim().is_empty() {
                last_line = Some(line.trim().to_string());
            }
            let _ = tx_err.send(WorkerEvent::Line(line));
        }
        last_line
    });

    for line in BufReader::new(stdout).lines().map_while(|line| line.ok()) {
        let _ = tx.send(WorkerEvent::Line(line));
    }

    let status = child.wait().context("failed to wait for yt-dlp")?;
    let stderr_tail = stderr_handle.join().unwrap_or(None);
    info!("yt-dlp exited with {status}");

    if status.success() {
        Ok("Download completed successfully!".to_string())
    } else {
        Err(anyhow!(stderr_tail
            .unwrap_or_else(|| format!("yt-dlp exited with {status}"))))
    }
}

/// Opens the download directory with the platform file browser.
pub fn open_folder(dir: &Path) {
    let dir = dir.to_path_buf();
    thread::spawn(move || {
        #[cfg(target_os = "windows")]
        let opener = "explorer";
        #[cfg(target_os = "macos")]
        let opener = "open";
        #[cfg(all(unix, not(target_os = "macos")))]
        let opener = "xdg-open";

        let _ = Command::new(opener).arg(dir).spawn();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_urls_are_rejected() {
        assert_eq!(normalized_url(""), None);
        assert_eq!(normalized_url("   \t "), None);
        assert_eq!(
            normalized_url("  https://example.com/watch?v=abc  "),
            Some("https://example.com/watch?v=abc")
        );
    }

    #[test]
    fn audio_preset_extracts_audio_without_video_selector() {
        let args = build_download_args(
            "https://example.com/watch?v=abc",
            DownloadFormat::MP3,
            Path::new("/home/user/Downloads"),
        );

        assert!(args.contains(&"-x".to_string()));
        assert!(args.contains(&"mp3".to_string()));
        assert!(!args.contains(&"-f".to_string()));
        assert!(!args.iter().any(|arg| arg.contains("bestvideo")));
    }

    #[test]
    fn video_preset_uses_bounded_resolution_mux() {
        let args = build_download_args(
            "https://example.com/watch?v=abc",
            DownloadFormat::MP4,
            Path::new("/home/user/Downloads"),
        );

        let selector_pos = args.iter().position(|arg| arg == "-f").unwrap();
        assert_eq!(args[selector_pos + 1], "bv*[height<=1080]+ba/bestvideo+bestaudio");
        assert!(args.contains(&"--merge-output-format".to_string()));
        assert!(args.contains(&"mp4".to_string()));
        assert!(!args.contains(&"-x".to_string()));
    }

    #[test]
    fn output_template_lands_in_download_dir() {
        let args = build_download_args(
            "https://example.com/watch?v=abc",
            DownloadFormat::MP4,
            Path::new("/tmp/videos"),
        );

        let output_pos = args.iter().position(|arg| arg == "-o").unwrap();
        assert_eq!(args[output_pos + 1], "/tmp/videos/%(title)s.%(ext)s");
        assert_eq!(args[0], "https://example.com/watch?v=abc");
    }
}
