use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    MP4,
    MP3,
}

impl Default for DownloadFormat {
    fn default() -> Self {
        Self::MP4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    FetchHelper,
    UpdateHelper,
    Download,
}

/// Everything the worker threads are allowed to tell the UI thread.
/// The UI drains these at the top of each frame; workers never touch
/// widget state directly.
#[derive(Debug)]
pub enum WorkerEvent {
    /// One line of relayed child output or a fetch progress note.
    Line(String),
    /// Result of probing the cached yt-dlp binary with `--version`.
    HelperVersion(String),
    /// ffmpeg was not found on PATH (or its version probe failed).
    CompanionMissing,
    /// A background task ran to completion.
    Finished {
        task: TaskKind,
        result: Result<String, String>,
    },
}

/// Dialog the UI should pop after applying an event.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogKind {
    CompanionMissing,
    FetchFailed(String),
    DownloadFailed(String),
}

#[derive(Default)]
pub struct AppState {
    pub url: String,
    pub format: DownloadFormat,
    /// The single task currently in flight. New actions are rejected
    /// while this is `Some`.
    pub active: Option<TaskKind>,
    pub status: String,
    pub last_error: Option<String>,
    pub helper_version: String,
    pub show_open_folder: bool,
    pub companion_warned: bool,
    pub download_dir: PathBuf,
}

impl AppState {
    /// Applies one worker event and reports which dialog, if any, the UI
    /// should show for it.
    pub fn apply_event(&mut self, event: WorkerEvent) -> Option<DialogKind> {
        match event {
            WorkerEvent::Line(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.status = trimmed.to_string();
                }
                None
            }
            WorkerEvent::HelperVersion(version) => {
                self.helper_version = version;
                None
            }
            WorkerEvent::CompanionMissing => {
                if self.companion_warned {
                    return None;
                }
                self.companion_warned = true;
                Some(DialogKind::CompanionMissing)
            }
            WorkerEvent::Finished { task, result } => {
                self.active = None;
                match result {
                    Ok(message) => {
                        self.last_error = None;
                        if !message.is_empty() {
                            self.status = message;
                        }
                        if task == TaskKind::Download {
                            self.show_open_folder = true;
                        }
                        None
                    }
                    Err(message) => {
                        self.status = message.clone();
                        self.last_error = Some(message.clone());
                        match task {
                            TaskKind::Download => Some(DialogKind::DownloadFailed(message)),
                            TaskKind::FetchHelper | TaskKind::UpdateHelper => {
                                Some(DialogKind::FetchFailed(message))
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_download_reveals_open_folder() {
        let mut state = AppState::default();
        state.active = Some(TaskKind::Download);

        let dialog = state.apply_event(WorkerEvent::Finished {
            task: TaskKind::Download,
            result: Ok("Download completed successfully!".to_string()),
        });

        assert_eq!(dialog, None);
        assert_eq!(state.active, None);
        assert!(state.show_open_folder);
        assert_eq!(state.status, "Download completed successfully!");
    }

    #[test]
    fn failed_download_keeps_open_folder_hidden_and_pops_dialog() {
        let mut state = AppState::default();
        state.active = Some(TaskKind::Download);

        let dialog = state.apply_event(WorkerEvent::Finished {
            task: TaskKind::Download,
            result: Err("yt-dlp exited with status 1".to_string()),
        });

        assert_eq!(
            dialog,
            Some(DialogKind::DownloadFailed(
                "yt-dlp exited with status 1".to_string()
            ))
        );
        assert_eq!(state.active, None);
        assert!(!state.show_open_folder);
        assert!(state.last_error.is_some());
    }

    #[test]
    fn fetch_failure_pops_fetch_dialog() {
        let mut state = AppState::default();
        state.active = Some(TaskKind::FetchHelper);

        let dialog = state.apply_event(WorkerEvent::Finished {
            task: TaskKind::FetchHelper,
            result: Err("connection refused".to_string()),
        });

        assert_eq!(
            dialog,
            Some(DialogKind::FetchFailed("connection refused".to_string()))
        );
        assert_eq!(state.active, None);
    }

    #[test]
    fn companion_warning_fires_only_once() {
        let mut state = AppState::default();

        assert_eq!(
            state.apply_event(WorkerEvent::CompanionMissing),
            Some(DialogKind::CompanionMissing)
        );
        assert_eq!(state.apply_event(WorkerEvent::CompanionMissing), None);
    }

    #[test]
    fn relayed_lines_update_status() {
        let mut state = AppState::default();

        assert_eq!(
            state.apply_event(WorkerEvent::Line("[download]  42.0%".to_string())),
            None
        );
        assert_eq!(state.status, "[download]  42.0%");

        // Blank lines from the child are ignored rather than clearing the status.
        state.apply_event(WorkerEvent::Line("   ".to_string()));
        assert_eq!(state.status, "[download]  42.0%");
    }
}
