//! External helper processes: looping audio player and document opener.

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use comstat_types::error::{ComstatError, Result};

use crate::services::AudioService;

/// How often the supervisor checks on the player process.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn spawn_detached(argv: &[String], path: &Path) -> std::io::Result<Child> {
    let Some((program, args)) = argv.split_first() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty command",
        ));
    };
    Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

fn stop_child(child: &mut Child) {
    if let Ok(None) = child.try_wait() {
        let _ = child.kill();
    }
    let _ = child.wait();
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

struct Playback {
    stop: Arc<AtomicBool>,
    /// Cleared by the supervisor once it stops looping, for any reason.
    active: Arc<AtomicBool>,
    supervisor: Option<JoinHandle<()>>,
}

/// Loops an audio file by re-running an external player whenever it exits.
pub struct ProcessAudio {
    argv: Vec<String>,
    playback: Option<Playback>,
}

impl ProcessAudio {
    /// `argv` is the player command; the file path is appended to it.
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            playback: None,
        }
    }

    fn halt(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.stop.store(true, Ordering::Release);
            if let Some(handle) = playback.supervisor.take() {
                let _ = handle.join();
            }
            log::info!("Playback stopped");
        }
    }
}

impl AudioService for ProcessAudio {
    fn play_loop(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(ComstatError::Audio(format!(
                "music file not found: {}",
                path.display()
            )));
        }
        self.halt();

        // First spawn is synchronous so a missing player is reported.
        let child = spawn_detached(&self.argv, path)
            .map_err(|e| ComstatError::Audio(format!("cannot start player: {e}")))?;

        let stop = Arc::new(AtomicBool::new(false));
        let active = Arc::new(AtomicBool::new(true));
        let supervisor = {
            let stop = Arc::clone(&stop);
            let active = Arc::clone(&active);
            let argv = self.argv.clone();
            let path = path.to_path_buf();
            thread::Builder::new()
                .name("comstat-audio".to_string())
                .spawn(move || {
                    supervise(child, &argv, &path, &stop);
                    active.store(false, Ordering::Release);
                })
                .map_err(|e| ComstatError::Audio(format!("cannot start supervisor: {e}")))?
        };

        self.playback = Some(Playback {
            stop,
            active,
            supervisor: Some(supervisor),
        });
        log::info!("Looping {}", path.display());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let playing = self.is_playing();
        // Reap an abandoned loop either way.
        self.halt();
        if !playing {
            return Err(ComstatError::Audio(
                "no active playback to stop".to_string(),
            ));
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.active.load(Ordering::Acquire))
    }
}

impl Drop for ProcessAudio {
    fn drop(&mut self) {
        self.halt();
    }
}

fn supervise(mut child: Child, argv: &[String], path: &Path, stop: &AtomicBool) {
    loop {
        if stop.load(Ordering::Acquire) {
            stop_child(&mut child);
            return;
        }
        match child.try_wait() {
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Ok(Some(status)) if status.success() => match spawn_detached(argv, path) {
                Ok(next) => child = next,
                Err(e) => {
                    log::warn!("Player restart failed: {e}");
                    return;
                },
            },
            Ok(Some(status)) => {
                log::warn!("Player exited with {status}, loop abandoned");
                return;
            },
            Err(e) => {
                log::warn!("Lost track of player process: {e}");
                return;
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Hands a file to the desktop's default viewer.
pub struct ProcessOpener {
    argv: Vec<String>,
}

impl ProcessOpener {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn open(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ComstatError::Platform(format!(
                "document not found: {}",
                path.display()
            )));
        }
        let mut child = spawn_detached(&self.argv, path)
            .map_err(|e| ComstatError::Platform(format!("cannot start opener: {e}")))?;
        // Reap in the background so the viewer never becomes a zombie.
        thread::spawn(move || {
            let _ = child.wait();
        });
        log::info!("Opened {}", path.display());
        Ok(())
    }
}
