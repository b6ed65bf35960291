//! Grit Audio - Positional sound effects (Kira backend)
//!
//! Provides sound playback for the Grit engine:
//! - `SoundDevice`: sound tables, listener ears and positional playback
//! - `Mixer` / `KiraMixer`: playback backend trait and its kira implementation
//! - `ChannelPool`: bounded channel allocation that doubles on demand
//! - `locate` / `placement`: stereo bearing, distance and wall muffling

pub mod channels;
pub mod config;
pub mod device;
pub mod mixer;
pub mod muffle;
pub mod sound;
pub mod spatial;

pub use channels::{ChannelPool, GROWTH_LIMIT, INITIAL_CHANNELS};
pub use config::SoundConfig;
pub use device::{PlayOutcome, ReservedSounds, SoundDevice};
pub use mixer::{source_data, ChannelEffect, KiraMixer, Mixer, MixerError, Placement};
pub use sound::{Sound, SoundChunk, SoundTable};
pub use spatial::{locate, placement, Ears, Side, SoundLocation};
