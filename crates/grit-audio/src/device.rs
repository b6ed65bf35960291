//! Sound device: tables, ears and positional playback

use crate::channels::ChannelPool;
use crate::config::SoundConfig;
use crate::mixer::{Mixer, MixerError, Placement};
use crate::sound::{Sound, SoundTable};
use crate::spatial::{locate, placement, Ears, Side};
use grit_core::{LineOfSight, Vec2i};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Longest `terminate` waits for playing sounds
const TERMINATE_WAIT: Duration = Duration::from_secs(1);

/// What happened to a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    /// Device not initialised or no sound given
    Silent,
    /// Too far away to hear; no channel was used
    Inaudible,
    /// No channel could be found or allocated
    Dropped,
}

/// Built-in effects looked up by name at startup
#[derive(Debug, Clone, Default)]
pub struct ReservedSounds {
    pub footstep: Option<Sound>,
    pub slide: Option<Sound>,
    pub switch: Option<Sound>,
    pub pickup: Option<Sound>,
    pub health: Option<Sound>,
    pub click: Option<Sound>,
    pub key: Option<Sound>,
    /// Looked up as `bang`
    pub wreck: Option<Sound>,
}

/// Process-wide sound state
pub struct SoundDevice<M: Mixer> {
    mixer: Option<M>,
    is_initialised: bool,
    config: SoundConfig,
    sounds: SoundTable,
    custom_sounds: SoundTable,
    channels: ChannelPool<M::Voice>,
    ears: Ears,
    reserved: ReservedSounds,
    screams: Vec<Sound>,
    last_scream: usize,
    rng: StdRng,
}

impl<M: Mixer> SoundDevice<M> {
    /// A device without output. Every play request is silent.
    pub fn silent(config: SoundConfig) -> Self {
        Self {
            mixer: None,
            is_initialised: false,
            channels: ChannelPool::default(),
            config,
            sounds: SoundTable::new(),
            custom_sounds: SoundTable::new(),
            ears: Ears::default(),
            reserved: ReservedSounds::default(),
            screams: Vec::new(),
            last_scream: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// A device on `mixer` with empty sound tables
    pub fn new(mixer: M, config: SoundConfig) -> Self {
        let mut device = Self::silent(config.clone());
        device.mixer = Some(mixer);
        device.reconfigure(&config);
        device
    }

    /// Start the device and load every sound in the configured directory.
    ///
    /// Without a mixer, or if the directory cannot be read, the device stays
    /// uninitialised and silent.
    pub fn initialize(mixer: Option<M>, config: SoundConfig) -> Self {
        let Some(mixer) = mixer else {
            log::warn!("No audio output, sound disabled");
            return Self::silent(config);
        };

        let mut device = Self::new(mixer, config);
        let dir = device.config.directory.clone();
        match device.sounds.load_directory(&dir) {
            Ok(count) => log::info!("Loaded {} sounds from {}", count, dir.display()),
            Err(e) => {
                log::warn!("Cannot open sound dir '{}': {}", dir.display(), e);
                device.is_initialised = false;
            }
        }
        device.index_sounds();
        device
    }

    /// Apply volume and re-allocate channels
    pub fn reconfigure(&mut self, config: &SoundConfig) {
        self.is_initialised = false;
        self.config = config.clone();
        let Some(mixer) = self.mixer.as_mut() else {
            return;
        };

        if let Err(e) = mixer.allocate_channels(self.channels.capacity()) {
            log::warn!("Couldn't allocate channels: {}", e);
            return;
        }
        mixer.set_volume(self.config.volume());
        self.is_initialised = true;
    }

    /// Stop everything and clear the sound tables.
    ///
    /// With `wait`, playing sounds get up to a second to finish first.
    pub fn terminate(&mut self, wait: bool) {
        if !self.is_initialised {
            return;
        }
        log::info!("Shutting down sound");

        if let Some(mixer) = self.mixer.as_mut() {
            if wait {
                let start = Instant::now();
                while self.channels.voices().any(|v| mixer.is_playing(v))
                    && start.elapsed() < TERMINATE_WAIT
                {
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
            for voice in self.channels.voices_mut() {
                mixer.stop(voice);
            }
        }

        self.channels.clear();
        self.sounds.clear();
        self.custom_sounds.clear();
        self.reserved = ReservedSounds::default();
        self.screams.clear();
        self.is_initialised = false;
    }

    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }

    pub fn mixer(&self) -> Option<&M> {
        self.mixer.as_ref()
    }

    pub fn channel_capacity(&self) -> usize {
        self.channels.capacity()
    }

    pub fn sounds(&self) -> &SoundTable {
        &self.sounds
    }

    pub fn reserved(&self) -> &ReservedSounds {
        &self.reserved
    }

    pub fn scream_count(&self) -> usize {
        self.screams.len()
    }

    /// Reseed the scream picker
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // --- Sound tables ---

    /// Add a default sound and refresh the built-in lookups
    pub fn add_sound(&mut self, sound: Sound) {
        self.sounds.add(sound);
        self.index_sounds();
    }

    /// Add a sound that overrides a default one of the same name
    pub fn add_custom_sound(&mut self, sound: Sound) {
        self.custom_sounds.add(sound);
    }

    pub fn clear_custom_sounds(&mut self) {
        self.custom_sounds.clear();
    }

    /// Look up a sound by name, custom sounds first
    pub fn str_sound(&self, name: &str) -> Option<Sound> {
        if name.is_empty() {
            return None;
        }
        self.custom_sounds
            .get(name)
            .or_else(|| self.sounds.get(name))
            .cloned()
    }

    fn index_sounds(&mut self) {
        self.reserved = ReservedSounds {
            footstep: self.str_sound("footstep"),
            slide: self.str_sound("slide"),
            switch: self.str_sound("switch"),
            pickup: self.str_sound("pickup"),
            health: self.str_sound("health"),
            click: self.str_sound("click"),
            key: self.str_sound("key"),
            wreck: self.str_sound("bang"),
        };

        self.screams.clear();
        let mut index = 0;
        while let Some(scream) = self.str_sound(&format!("aargh{index}")) {
            self.screams.push(scream);
            index += 1;
        }
    }

    /// A scream variant, never the same one twice in a row when there is a
    /// choice
    pub fn random_scream(&mut self) -> Option<Sound> {
        let count = self.screams.len();
        if count == 0 {
            return None;
        }
        let mut index = self.last_scream;
        while index >= count || (count > 1 && index == self.last_scream) {
            index = self.rng.gen_range(0..count);
        }
        self.last_scream = index;
        Some(self.screams[index].clone())
    }

    // --- Ears ---

    pub fn ears(&self) -> &Ears {
        &self.ears
    }

    pub fn set_ear(&mut self, side: Side, index: usize, pos: Vec2i) {
        self.ears.set(side, index, pos);
    }

    pub fn set_ears_side(&mut self, side: Side, pos: Vec2i) {
        self.ears.set_side(side, pos);
    }

    pub fn set_ears(&mut self, pos: Vec2i) {
        self.ears = Ears::at(pos);
    }

    // --- Playback ---

    /// Play without positioning
    pub fn play(&mut self, sound: Option<&Sound>) -> PlayOutcome {
        let Some(sound) = sound else {
            return PlayOutcome::Silent;
        };
        if !self.is_initialised {
            return PlayOutcome::Silent;
        }
        self.play_placed(sound, Placement::default())
    }

    /// Play at a world position relative to the ears
    pub fn play_at(
        &mut self,
        sound: Option<&Sound>,
        pos: Vec2i,
        map: &impl LineOfSight,
    ) -> PlayOutcome {
        self.play_at_plus_distance(sound, pos, 0, map)
    }

    /// Play at a world position as if it were `extra` units further away
    pub fn play_at_plus_distance(
        &mut self,
        sound: Option<&Sound>,
        pos: Vec2i,
        extra: i32,
        map: &impl LineOfSight,
    ) -> PlayOutcome {
        let Some(sound) = sound else {
            return PlayOutcome::Silent;
        };
        if !self.is_initialised {
            return PlayOutcome::Silent;
        }

        let location = locate(&self.ears, pos, map);
        let distance = location.distance.saturating_add(extra);
        let Some(placement) = placement(distance, location.bearing, location.muffled) else {
            return PlayOutcome::Inaudible;
        };
        log::debug!(
            "sound '{}': distance {} bearing {} muffled {}",
            sound.name(),
            placement.distance,
            placement.bearing,
            location.muffled
        );
        self.play_placed(sound, placement)
    }

    fn play_placed(&mut self, sound: &Sound, placement: Placement) -> PlayOutcome {
        let Some(mixer) = self.mixer.as_mut() else {
            return PlayOutcome::Silent;
        };
        self.channels.reap(|voice| mixer.is_playing(voice));

        loop {
            if let Some(slot) = self.channels.free_slot() {
                match mixer.play(sound, &placement) {
                    Ok(voice) => {
                        self.channels.occupy(slot, voice);
                        return PlayOutcome::Played;
                    }
                    Err(MixerError::Busy) => {}
                    Err(e) => {
                        log::warn!("Cannot play '{}': {}", sound.name(), e);
                        return PlayOutcome::Dropped;
                    }
                }
            }

            let Some(capacity) = self.channels.grow() else {
                log::warn!(
                    "All {} channels busy, dropping '{}'",
                    self.channels.capacity(),
                    sound.name()
                );
                return PlayOutcome::Dropped;
            };
            log::debug!("Growing sound channels to {}", capacity);
            if let Err(e) = mixer.allocate_channels(capacity) {
                log::warn!("Couldn't allocate channels: {}", e);
                return PlayOutcome::Dropped;
            }
        }
    }
}
