//! Playback backends
//!
//! The sound device talks to a [`Mixer`], which owns the voices that are
//! actually playing. [`KiraMixer`] is the real backend.

use crate::sound::SoundChunk;
use grit_core::{GritError, Result};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::sound::PlaybackState;
use kira::PlaySoundError;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend, Panning, Tween};
use thiserror::Error;

/// Per-voice processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEffect {
    /// Three-tap smoothing, for sounds heard through walls
    Muffle,
}

/// Where a voice sits in the stereo field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Degrees clockwise from straight ahead; 90 is hard right
    pub bearing: i16,
    /// 0 is loudest, 255 is quietest
    pub distance: u8,
    pub effect: Option<ChannelEffect>,
}

impl Placement {
    /// Stereo pan in -1.0 (left) ..= 1.0 (right)
    pub fn panning(&self) -> f32 {
        (self.bearing as f32).to_radians().sin()
    }

    /// Linear gain from distance
    pub fn attenuation(&self) -> f64 {
        (255 - self.distance as i32) as f64 / 255.0
    }
}

#[derive(Debug, Error)]
pub enum MixerError {
    /// Every channel is in use
    #[error("no free channel")]
    Busy,

    #[error("mixer error: {0}")]
    Failed(String),
}

/// A backend that plays sound chunks on a bounded set of channels
pub trait Mixer {
    /// Handle to one playing sound
    type Voice;

    /// Make `count` channels available
    fn allocate_channels(&mut self, count: usize) -> std::result::Result<(), MixerError>;

    /// Effect volume, 0..=128
    fn set_volume(&mut self, volume: u8);

    fn play(
        &mut self,
        chunk: &SoundChunk,
        placement: &Placement,
    ) -> std::result::Result<Self::Voice, MixerError>;

    fn is_playing(&self, voice: &Self::Voice) -> bool;

    fn stop(&mut self, voice: &mut Self::Voice);
}

/// Mixer backed by a kira [`AudioManager`]
pub struct KiraMixer {
    manager: AudioManager<DefaultBackend>,
    channels: usize,
    volume: f64,
}

impl KiraMixer {
    /// Open the default output device
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| GritError::AudioError(format!("No audio device available: {e}")))?;
        Ok(Self {
            manager,
            channels: 0,
            volume: 0.5,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

impl Mixer for KiraMixer {
    type Voice = StaticSoundHandle;

    fn allocate_channels(&mut self, count: usize) -> std::result::Result<(), MixerError> {
        // kira caps concurrent sounds itself and reports the cap as
        // SoundLimitReached, so the count is bookkeeping only
        self.channels = count;
        Ok(())
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(128) as f64 / 128.0;
    }

    fn play(
        &mut self,
        chunk: &SoundChunk,
        placement: &Placement,
    ) -> std::result::Result<StaticSoundHandle, MixerError> {
        let data = source_data(chunk, placement)
            .volume(amplitude_to_db(self.volume * placement.attenuation()))
            .panning(Panning(placement.panning()));

        self.manager.play(data).map_err(|e| match e {
            PlaySoundError::SoundLimitReached => MixerError::Busy,
            other => MixerError::Failed(format!("{other:?}")),
        })
    }

    fn is_playing(&self, voice: &StaticSoundHandle) -> bool {
        voice.state() != PlaybackState::Stopped
    }

    fn stop(&mut self, voice: &mut StaticSoundHandle) {
        voice.stop(Tween::default());
    }
}

/// The audio to send for `chunk`: filtered when the placement muffles it
pub fn source_data(chunk: &SoundChunk, placement: &Placement) -> StaticSoundData {
    match placement.effect {
        Some(ChannelEffect::Muffle) => chunk.muffled_data().clone(),
        None => chunk.data().clone(),
    }
}

/// Convert linear amplitude (0.0–1.0) to decibels
fn amplitude_to_db(amplitude: f64) -> kira::Decibels {
    if amplitude <= 0.0 {
        kira::Decibels(-60.0) // silence
    } else {
        kira::Decibels((20.0 * (amplitude as f32).log10()).max(-60.0))
    }
}
