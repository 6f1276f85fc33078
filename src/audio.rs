//! Audio routing
//!
//! The core never touches a sound device. It names effects by logical id and
//! hands them, with the current volume, to whatever `AudioSink` the host
//! plugged in. `AudioManager` is the one place the volume lives.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Good drop caught
    Catch,
    /// Catcher took damage
    Hurt,
}

impl SoundEffect {
    /// Logical id the sink maps to an asset
    pub fn id(self) -> &'static str {
        match self {
            SoundEffect::Catch => "catch",
            SoundEffect::Hurt => "hurt",
        }
    }

    /// Sound for a gameplay event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::DropCaught => Some(SoundEffect::Catch),
            GameEvent::PlayerHurt => Some(SoundEffect::Hurt),
            GameEvent::PowerUpCollected(_) => None,
        }
    }
}

/// Output side of the audio system, implemented by the host
pub trait AudioSink {
    fn play_effect(&mut self, id: &str, volume: f32);
    fn set_music_volume(&mut self, volume: f32);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_effect(&mut self, _id: &str, _volume: f32) {}
    fn set_music_volume(&mut self, _volume: f32) {}
}

/// Logs every call; used by the headless runner
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_effect(&mut self, id: &str, volume: f32) {
        log::trace!("sfx {} @ {:.2}", id, volume);
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("music volume {:.2}", volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("master_volume", &self.master_volume)
            .field("music_volume", &self.music_volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            music_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0) and push the new music level
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Set music multiplier (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.apply_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_music_volume();
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Get effective effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    pub fn effective_music_volume(&self) -> f32 {
        self.effective_volume() * self.music_volume
    }

    /// Push the current music level to the sink
    pub fn apply_music_volume(&mut self) {
        let vol = self.effective_music_volume();
        self.sink.set_music_volume(vol);
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play_effect(effect.id(), vol);
    }

    /// Play whatever sounds a batch of gameplay events call for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::AudioSink;

    /// Shared record of sink calls
    #[derive(Debug, Default)]
    pub struct Recorded {
        pub effects: Vec<(String, f32)>,
        pub music_volumes: Vec<f32>,
    }

    /// Sink that records into a shared log the test keeps a handle to
    #[derive(Debug, Clone, Default)]
    pub struct RecordingSink(pub Rc<RefCell<Recorded>>);

    impl AudioSink for RecordingSink {
        fn play_effect(&mut self, id: &str, volume: f32) {
            self.0.borrow_mut().effects.push((id.to_string(), volume));
        }

        fn set_music_volume(&mut self, volume: f32) {
            self.0.borrow_mut().music_volumes.push(volume);
        }
    }
}
