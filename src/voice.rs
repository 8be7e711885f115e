//! Voice bank for counted-down seconds.
//!
//! The countdown phase announces every second from ten down to zero. Clips
//! are preloaded once through an [`AudioSink`] and played by second value.
//! Playback is fire-and-forget: a sink that refuses to play (autoplay
//! restrictions, a closed terminal, a missing device) is logged at debug
//! level and otherwise ignored.
//!
//! A bank can be attached to a widget directly, or installed once as the
//! process-wide bank with [`install`]. The global bank is read-only after
//! installation.
//!
//! ```rust
//! use bubbletea_voicetimer::voice::{SilentSink, VoiceBank, VoiceConfig};
//!
//! let bank = VoiceBank::load(&VoiceConfig::default(), SilentSink);
//! assert_eq!(bank.len(), 11);
//! bank.play_for(3);
//! bank.play_for(42); // no clip, no-op
//! ```

use crate::error::Result;
use crossterm::{execute, style::Print};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::io::{stdout, Write};
use std::sync::Arc;
use tracing::debug;

/// Base path the clip files are served from.
pub const DEFAULT_BASE_PATH: &str = "static/sounds";

/// File names of the eleven clips, indexed by the second they announce.
pub const VOICE_FILES: [(u32, &str); 11] = [
    (10, "count_10.mp3"),
    (9, "count_09.mp3"),
    (8, "count_08.mp3"),
    (7, "count_07.mp3"),
    (6, "count_06.mp3"),
    (5, "count_05.mp3"),
    (4, "count_04.mp3"),
    (3, "count_03.mp3"),
    (2, "count_02.mp3"),
    (1, "count_01.mp3"),
    (0, "count_00.mp3"),
];

static GLOBAL: OnceCell<Arc<VoiceBank>> = OnceCell::new();

/// A preloaded clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// The second this clip announces.
    pub second: u32,
    /// Location of the audio file.
    pub path: String,
}

/// Where clips come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceConfig {
    /// Directory or URL prefix holding the clip files.
    pub base_path: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl VoiceConfig {
    /// Full path of the file for `file_name`.
    pub fn path_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), file_name)
    }
}

/// Playback backend for voice clips.
pub trait AudioSink: Send + Sync {
    /// Prepares a clip for playback. The default accepts every clip.
    fn preload(&self, _clip: &Clip) -> Result<()> {
        Ok(())
    }

    /// Plays `clip` from its beginning, interrupting any earlier playback of
    /// the same clip.
    fn play_from_start(&self, clip: &Clip) -> Result<()>;
}

/// Sink that never makes a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play_from_start(&self, _clip: &Clip) -> Result<()> {
        Ok(())
    }
}

/// Sink that rings the terminal bell for every clip.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellSink;

impl AudioSink for BellSink {
    fn play_from_start(&self, _clip: &Clip) -> Result<()> {
        let mut out = stdout();
        execute!(out, Print('\u{7}'))?;
        out.flush()?;
        Ok(())
    }
}

/// Preloaded clips keyed by second.
pub struct VoiceBank {
    clips: BTreeMap<u32, Clip>,
    sink: Box<dyn AudioSink>,
}

impl std::fmt::Debug for VoiceBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceBank")
            .field("clips", &self.clips.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl VoiceBank {
    /// Preloads every clip in [`VOICE_FILES`] through `sink`.
    ///
    /// Clips the sink fails to preload are left out; `play_for` on their
    /// second is then a no-op.
    pub fn load(config: &VoiceConfig, sink: impl AudioSink + 'static) -> Self {
        let mut clips = BTreeMap::new();
        for (second, file_name) in VOICE_FILES {
            let clip = Clip {
                second,
                path: config.path_for(file_name),
            };
            match sink.preload(&clip) {
                Ok(()) => {
                    clips.insert(second, clip);
                }
                Err(err) => debug!(second, error = %err, "voice clip not preloaded"),
            }
        }
        Self {
            clips,
            sink: Box::new(sink),
        }
    }

    /// Number of clips available.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether no clip is available.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// The clip announcing `second`, if any.
    pub fn clip(&self, second: u32) -> Option<&Clip> {
        self.clips.get(&second)
    }

    /// Plays the clip for `second` from the start.
    ///
    /// Does nothing when no clip exists for `second`. Playback errors are
    /// swallowed.
    pub fn play_for(&self, second: u32) {
        let Some(clip) = self.clips.get(&second) else {
            return;
        };
        if let Err(err) = self.sink.play_from_start(clip) {
            debug!(second, error = %err, "voice playback ignored");
        }
    }
}

/// Installs the process-wide voice bank.
///
/// Only the first call takes effect; later calls hand the rejected bank back.
pub fn install(bank: VoiceBank) -> std::result::Result<(), Arc<VoiceBank>> {
    GLOBAL.set(Arc::new(bank))
}

/// The process-wide voice bank, if one was installed.
pub fn global() -> Option<Arc<VoiceBank>> {
    GLOBAL.get().cloned()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    /// Sink recording every played second.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSink {
        pub(crate) played: Arc<Mutex<Vec<u32>>>,
        pub(crate) fail_play: bool,
        pub(crate) fail_preload: Option<u32>,
    }

    impl RecordingSink {
        pub(crate) fn played(&self) -> Vec<u32> {
            self.played.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    impl AudioSink for RecordingSink {
        fn preload(&self, clip: &Clip) -> Result<()> {
            if self.fail_preload == Some(clip.second) {
                return Err(Error::Playback {
                    second: clip.second,
                    reason: "not found".to_string(),
                });
            }
            Ok(())
        }

        fn play_from_start(&self, clip: &Clip) -> Result<()> {
            if let Ok(mut played) = self.played.lock() {
                played.push(clip.second);
            }
            if self.fail_play {
                return Err(Error::Playback {
                    second: clip.second,
                    reason: "autoplay blocked".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_load_preloads_eleven_clips() {
        let bank = VoiceBank::load(&VoiceConfig::default(), SilentSink);
        assert_eq!(bank.len(), 11);
        for second in 0..=10 {
            assert!(bank.clip(second).is_some(), "missing clip {}", second);
        }
        assert!(bank.clip(11).is_none());
    }

    #[test]
    fn test_clip_paths_use_base_path() {
        let config = VoiceConfig {
            base_path: "/assets/voice/".to_string(),
        };
        let bank = VoiceBank::load(&config, SilentSink);
        assert_eq!(
            bank.clip(7).map(|c| c.path.as_str()),
            Some("/assets/voice/count_07.mp3")
        );
        assert_eq!(
            bank.clip(10).map(|c| c.path.as_str()),
            Some("/assets/voice/count_10.mp3")
        );
    }

    #[test]
    fn test_play_for_known_and_unknown_seconds() {
        let sink = RecordingSink::default();
        let bank = VoiceBank::load(&VoiceConfig::default(), sink.clone());
        bank.play_for(3);
        bank.play_for(0);
        bank.play_for(11);
        assert_eq!(sink.played(), vec![3, 0]);
    }

    #[test]
    fn test_playback_failure_is_swallowed() {
        let sink = RecordingSink {
            fail_play: true,
            ..RecordingSink::default()
        };
        let bank = VoiceBank::load(&VoiceConfig::default(), sink.clone());
        bank.play_for(5);
        bank.play_for(4);
        assert_eq!(sink.played(), vec![5, 4]);
    }

    #[test]
    fn test_failed_preload_skips_clip() {
        let sink = RecordingSink {
            fail_preload: Some(2),
            ..RecordingSink::default()
        };
        let bank = VoiceBank::load(&VoiceConfig::default(), sink.clone());
        assert_eq!(bank.len(), 10);
        bank.play_for(2);
        assert!(sink.played().is_empty());
    }

    #[test]
    fn test_install_only_once() {
        let _ = install(VoiceBank::load(&VoiceConfig::default(), SilentSink));
        let again = install(VoiceBank::load(&VoiceConfig::default(), SilentSink));
        assert!(again.is_err());
        assert!(global().is_some());
    }
}
