//! Bounded, growable pool of playback channels

/// Channels allocated when a device starts
pub const INITIAL_CHANNELS: usize = 64;

/// The pool refuses to grow once its capacity is above this
pub const GROWTH_LIMIT: usize = 128;

/// Fixed slots that each hold at most one playing voice.
///
/// Capacity doubles on demand (64, 128, 256) and stops growing once it
/// exceeds [`GROWTH_LIMIT`].
#[derive(Debug)]
pub struct ChannelPool<V> {
    slots: Vec<Option<V>>,
}

impl<V> ChannelPool<V> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots holding a voice
    pub fn in_use(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Free every slot whose voice has finished. Returns how many were freed.
    pub fn reap(&mut self, mut is_playing: impl FnMut(&V) -> bool) -> usize {
        let mut freed = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|voice| !is_playing(voice)) {
                *slot = None;
                freed += 1;
            }
        }
        freed
    }

    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put a voice into a slot, replacing whatever was there
    pub fn occupy(&mut self, slot: usize, voice: V) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = Some(voice);
        }
    }

    pub fn can_grow(&self) -> bool {
        self.capacity() <= GROWTH_LIMIT
    }

    /// Double the capacity. Returns the new capacity, or `None` once the
    /// pool is past its growth limit.
    pub fn grow(&mut self) -> Option<usize> {
        if !self.can_grow() {
            return None;
        }
        let capacity = (self.capacity() * 2).max(1);
        self.slots.resize_with(capacity, || None);
        Some(capacity)
    }

    pub fn voices_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub fn voices(&self) -> impl Iterator<Item = &V> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Drop every voice, keeping the capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

impl<V> Default for ChannelPool<V> {
    fn default() -> Self {
        Self::new(INITIAL_CHANNELS)
    }
}
