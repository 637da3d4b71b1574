//! Audio cues and desktop notifications.
//! Playback goes through the platform's command-line player; the terminal bell
//! is the fallback everywhere else.

use crate::domain::SoundKey;
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long an expiry/skip alert plays
pub const ALERT_DURATION: Duration = Duration::from_millis(5000);

/// How long a settings preview plays
pub const PREVIEW_DURATION: Duration = Duration::from_millis(1500);

#[cfg(target_os = "macos")]
fn sound_command(sound: SoundKey, volume: f32) -> Option<Command> {
    let file = match sound {
        SoundKey::Chime => "/System/Library/Sounds/Glass.aiff",
        SoundKey::Bell => "/System/Library/Sounds/Hero.aiff",
        SoundKey::Alert => "/System/Library/Sounds/Funk.aiff",
    };
    let mut cmd = Command::new("afplay");
    cmd.arg("-v").arg(format!("{:.2}", volume)).arg(file);
    Some(cmd)
}

#[cfg(target_os = "linux")]
fn sound_command(sound: SoundKey, volume: f32) -> Option<Command> {
    let file = match sound {
        SoundKey::Chime => "/usr/share/sounds/freedesktop/stereo/complete.oga",
        SoundKey::Bell => "/usr/share/sounds/freedesktop/stereo/bell.oga",
        SoundKey::Alert => "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
    };
    if !std::path::Path::new(file).exists() {
        return None;
    }
    // paplay volume is linear, 65536 = 100%
    let mut cmd = Command::new("paplay");
    cmd.arg(format!("--volume={}", (volume * 65536.0) as u32)).arg(file);
    Some(cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn sound_command(_sound: SoundKey, _volume: f32) -> Option<Command> {
    None
}

fn ring_terminal_bell() {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

/// Plays one alert sound at a time for a bounded duration
#[derive(Debug, Default)]
pub struct AlertPlayer {
    current: Option<Child>,
    stop_at: Option<Instant>,
}

impl AlertPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `sound` at `volume` (0.0 to 1.0), cancelling any prior playback
    pub fn play(&mut self, sound: SoundKey, volume: f32, duration: Duration) {
        self.stop();

        let volume = volume.clamp(0.0, 1.0);
        if volume == 0.0 {
            return;
        }

        let spawned = sound_command(sound, volume).and_then(|mut cmd| {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map_err(|e| warn!(error = %e, sound = sound.key(), "alert playback failed"))
                .ok()
        });

        match spawned {
            Some(child) => {
                debug!(sound = sound.key(), volume, ?duration, "alert: playing");
                self.current = Some(child);
                self.stop_at = Some(Instant::now() + duration);
            }
            None => ring_terminal_bell(),
        }
    }

    /// Whether a sound is still playing
    pub fn is_playing(&mut self) -> bool {
        match self.current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Cut playback once its duration has passed; reap finished players
    pub fn tick(&mut self, now: Instant) {
        if self.stop_at.is_some_and(|deadline| now >= deadline) || !self.is_playing() {
            self.stop();
        }
    }

    /// Stop playback (idempotent)
    pub fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        self.stop_at = None;
    }
}

impl Drop for AlertPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Send a desktop notification when the whole session is done
pub fn notify_session_finished(completed: usize) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{} activities completed" with title "FocusFlow - Session Complete""#,
            completed
        );

        let _ = Command::new("osascript").arg("-e").arg(&script).output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = completed;
    }
}
