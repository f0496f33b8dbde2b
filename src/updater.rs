use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::models::{TaskKind, WorkerEvent};
use crate::probe;

pub const RELEASE_INDEX_URL: &str =
    "https://api.github.com/repos/yt-dlp/yt-dlp/releases/latest";

const RELEASE_DOWNLOAD_TEMPLATE: &str =
    "https://github.com/yt-dlp/yt-dlp/releases/download/{tag}/{asset}";

#[derive(Deserialize)]
struct ReleaseIndex {
    tag_name: String,
}

pub fn helper_asset_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Fixed cache location for the managed binary, created on demand.
pub fn helper_path() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("no user data directory available")?
        .join("ytgrab");
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    Ok(dir.join(helper_asset_name()))
}

pub fn download_url_for(tag: &str) -> String {
    RELEASE_DOWNLOAD_TEMPLATE
        .replacen("{tag}", tag, 1)
        .replacen("{asset}", helper_asset_name(), 1)
}

fn http_client() -> Result<reqwest::blocking::Client> {
    // GitHub's API rejects requests without a user agent.
    reqwest::blocking::Client::builder()
        .user_agent(concat!("ytgrab/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")
}

fn latest_release_tag(client: &reqwest::blocking::Client) -> Result<String> {
    let body = client
        .get(RELEASE_INDEX_URL)
        .timeout(Duration::from_secs(10))
        .send()
        .context("failed to query the release index")?
        .error_for_status()
        .context("release index request failed")?
        .text()
        .context("failed to read the release index")?;

    let index: ReleaseIndex =
        serde_json::from_str(&body).context("failed to parse the release index")?;
    Ok(index.tag_name)
}

fn stream_to_file(mut response: reqwest::blocking::Response, target: &Path) -> Result<()> {
    // Written to a sibling temp file first; the rename below means a
    // concurrent reader of the cache path never sees a half-written binary.
    let tmp = target.with_extension("part");
    let mut file = fs::File::create(&tmp)
        .with_context(|| format!("failed to create {}", tmp.display()))?;

    let mut buffer = [0_u8; 8192];
    loop {
        let read = response
            .read(&mut buffer)
            .context("failed to read the download stream")?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .context("failed to write the downloaded binary")?;
    }
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o755))
            .context("failed to mark the binary executable")?;
    }

    fs::rename(&tmp, target)
        .with_context(|| format!("failed to move the binary into {}", target.display()))?;
    Ok(())
}

/// Runs one full fetch sequence: index query, binary download, permission
/// adjustment. Returns the release tag that was installed.
pub fn fetch_helper(tx: &Sender<WorkerEvent>) -> Result<String> {
    let _ = tx.send(WorkerEvent::Line(
        "Fetching latest yt-dlp release info...".to_string(),
    ));
    let client = http_client()?;
    let tag = latest_release_tag(&client)?;
    let url = download_url_for(&tag);
    info!("downloading yt-dlp {tag} from {url}");

    let _ = tx.send(WorkerEvent::Line(format!("Downloading yt-dlp {tag}...")));
    let response = client
        .get(&url)
        .send()
        .context("failed to download the yt-dlp binary")?
        .error_for_status()
        .context("binary download request failed")?;

    stream_to_file(response, &helper_path()?)?;
    Ok(tag)
}

/// No-op when the cached binary already exists; otherwise runs `fetch`
/// exactly once and reports what it installed.
fn ensure_with<F>(path: &Path, fetch: F) -> Result<Option<String>>
where
    F: FnOnce() -> Result<String>,
{
    if path.exists() {
        return Ok(None);
    }
    fetch().map(Some)
}

/// Startup task: make sure the helper is present, then probe its version.
pub fn ensure_helper(tx: Sender<WorkerEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let outcome = helper_path().and_then(|path| {
            let fetched = ensure_with(&path, || fetch_helper(&tx))?;
            let _ = tx.send(WorkerEvent::HelperVersion(probe::helper_version(&path)));
            Ok(fetched)
        });

        let result = match outcome {
            Ok(Some(tag)) => Ok(format!("yt-dlp {tag} downloaded successfully!")),
            Ok(None) => Ok(String::new()),
            Err(error) => {
                warn!("yt-dlp setup failed: {error:#}");
                Err(format!("Failed to download yt-dlp: {error:#}"))
            }
        };
        let _ = tx.send(WorkerEvent::Finished {
            task: TaskKind::FetchHelper,
            result,
        });
    })
}

/// Manual update: re-runs the fetch sequence unconditionally and refreshes
/// the displayed version string.
pub fn update_helper(tx: Sender<WorkerEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = match fetch_helper(&tx) {
            Ok(tag) => {
                if let Ok(path) = helper_path() {
                    let _ = tx.send(WorkerEvent::HelperVersion(probe::helper_version(&path)));
                }
                Ok(format!("yt-dlp {tag} downloaded successfully!"))
            }
            Err(error) => {
                warn!("yt-dlp update failed: {error:#}");
                Err(format!("Failed to download yt-dlp: {error:#}"))
            }
        };
        let _ = tx.send(WorkerEvent::Finished {
            task: TaskKind::UpdateHelper,
            result,
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use tempfile::TempDir;

    #[test]
    fn download_url_substitutes_tag_exactly_once() {
        let url = download_url_for("2024.01.01");
        assert_eq!(
            url,
            format!(
                "https://github.com/yt-dlp/yt-dlp/releases/download/2024.01.01/{}",
                helper_asset_name()
            )
        );
        assert_eq!(url.matches("2024.01.01").count(), 1);
        assert!(!url.contains("{tag}"));
    }

    #[test]
    fn release_index_parses_tag_name() {
        let index: ReleaseIndex =
            serde_json::from_str(r#"{"tag_name": "2024.01.01", "name": "yt-dlp 2024.01.01"}"#)
                .unwrap();
        assert_eq!(index.tag_name, "2024.01.01");
    }

    #[test]
    fn ensure_skips_fetch_when_binary_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yt-dlp");
        fs::write(&path, b"stub").unwrap();

        let mut calls = 0;
        let fetched = ensure_with(&path, || {
            calls += 1;
            Ok("2024.01.01".to_string())
        })
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(fetched, None);
    }

    #[test]
    fn ensure_fetches_exactly_once_when_binary_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yt-dlp");

        let mut calls = 0;
        let fetched = ensure_with(&path, || {
            calls += 1;
            Ok("2024.01.01".to_string())
        })
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(fetched, Some("2024.01.01".to_string()));
    }

    #[test]
    fn ensure_propagates_fetch_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yt-dlp");

        let result = ensure_with(&path, || Err(anyhow!("network unreachable")));
        assert!(result.is_err());
    }
}
