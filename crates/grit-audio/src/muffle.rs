//! Muffle filter for sounds heard through walls

use kira::sound::static_sound::StaticSoundData;
use kira::Frame;

/// Average each frame with its two successors.
///
/// The last two frames are left as they are.
pub fn muffle_frames(frames: &[Frame]) -> Vec<Frame> {
    let mut out = frames.to_vec();
    for (i, window) in frames.windows(3).enumerate() {
        out[i] = Frame {
            left: (window[0].left + window[1].left + window[2].left) / 3.0,
            right: (window[0].right + window[1].right + window[2].right) / 3.0,
        };
    }
    out
}

/// A muffled copy of `data`, keeping its settings
pub fn muffle(data: &StaticSoundData) -> StaticSoundData {
    StaticSoundData {
        frames: muffle_frames(&data.frames).into(),
        ..data.clone()
    }
}
