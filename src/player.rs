use crate::api::Stream;
use std::process::{Child, Command};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// How a stream gets opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    /// HLS playlist handed to mpv
    Mpv,
    /// Embed page opened in the default browser
    Browser,
}

/// HLS playlists go to mpv when it is installed; embed pages (and HLS
/// without mpv) go to the browser.
pub fn choose_target(stream: &Stream, mpv_available: bool) -> PlaybackTarget {
    if stream.is_hls() && mpv_available {
        PlaybackTarget::Mpv
    } else {
        PlaybackTarget::Browser
    }
}

/// Pick stream `number` (1-based) or the first one.
pub fn select_stream(streams: &[Stream], number: Option<usize>) -> Option<&Stream> {
    match number {
        Some(n) if n >= 1 => streams.get(n - 1),
        Some(_) => None,
        None => streams.first(),
    }
}

pub fn check_mpv_installed() -> bool {
    Command::new("mpv")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[derive(Clone, Default)]
pub struct Player {
    process: Arc<Mutex<Option<Child>>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, stream: &Stream) -> Result<PlaybackTarget, anyhow::Error> {
        if stream.embed_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Stream {} has no URL", stream.stream_no));
        }
        let target = choose_target(stream, check_mpv_installed());
        match target {
            PlaybackTarget::Mpv => self.play(&stream.embed_url)?,
            PlaybackTarget::Browser => {
                info!(url = %stream.embed_url, "opening in browser");
                webbrowser::open(&stream.embed_url)?;
            }
        }
        Ok(target)
    }

    /// Start mpv on `url`, replacing any running instance.
    pub fn play(&self, url: &str) -> Result<(), anyhow::Error> {
        self.stop();
        info!(url, "starting mpv");

        let child = Command::new("mpv")
            .arg(url)
            .arg("--force-window")
            .arg("--cache=yes")
            .arg("--demuxer-max-bytes=128MiB")
            .arg("--demuxer-max-back-bytes=32MiB")
            .arg("--msg-level=all=no")
            .arg("--term-status-msg=no")
            .arg("--hwdec=auto")
            .spawn();

        match child {
            Ok(child) => {
                let mut guard = self
                    .process
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Failed to lock process mutex: {}", e))?;
                *guard = Some(child);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to start mpv: {}. Make sure mpv is installed and in PATH.",
                e
            )),
        }
    }

    pub fn is_running(&self) -> bool {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(ref mut child) = *guard {
                return matches!(child.try_wait(), Ok(None));
            }
        }
        false
    }

    /// Poll until mpv has stayed up for two seconds (playing) or exited
    /// (failed). Returns whether playback looks healthy.
    pub async fn wait_for_playback(&self, timeout_ms: u64) -> bool {
        use tokio::time::{sleep, Duration, Instant};

        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        sleep(Duration::from_millis(500)).await;

        while start.elapsed() < timeout {
            if !self.is_running() {
                warn!("mpv exited before playback started");
                return false;
            }
            if start.elapsed() > Duration::from_millis(2000) {
                return true;
            }
            sleep(Duration::from_millis(200)).await;
        }

        self.is_running()
    }

    /// Block until mpv exits.
    pub fn wait(&self) {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.wait();
            }
        }
    }

    pub fn stop(&self) {
        if let Ok(mut guard) = self.process.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(no: i32, url: &str) -> Stream {
        Stream {
            stream_no: no,
            embed_url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_choose_target() {
        let hls = stream(1, "https://cdn/x/master.m3u8");
        let embed = stream(2, "https://embed/charlie/x/1");
        assert_eq!(choose_target(&hls, true), PlaybackTarget::Mpv);
        assert_eq!(choose_target(&hls, false), PlaybackTarget::Browser);
        assert_eq!(choose_target(&embed, true), PlaybackTarget::Browser);
    }

    #[test]
    fn test_select_stream() {
        let streams = vec![stream(1, "a"), stream(2, "b")];
        assert_eq!(select_stream(&streams, None).unwrap().stream_no, 1);
        assert_eq!(select_stream(&streams, Some(2)).unwrap().stream_no, 2);
        assert!(select_stream(&streams, Some(0)).is_none());
        assert!(select_stream(&streams, Some(3)).is_none());
        assert!(select_stream(&[], None).is_none());
    }

    #[test]
    fn test_open_rejects_empty_url() {
        let player = Player::new();
        assert!(player.open(&stream(1, "  ")).is_err());
        assert!(!player.is_running());
    }
}
