use trellis_core::{ViterbiInitErr, ViterbiParams};

/// Circular survivor history with `trace_back_depth + 1` slots.
///
/// Each decoding step first calls `advance()`, which moves the write position
/// one slot forward, and then fills the slot returned by `current_mut()`.
/// The write position starts at slot 0 and the first step writes slot 1, so
/// after `trace_back_depth` steps every slot a trace-back reads has been
/// written once and the ring is armed.
///
/// Slots are only ever addressed relative to the write position, see `slot()`.
pub struct SurvivorRing<T> {
    slots: Vec<T>,
    /// Current write position
    offset: usize,
    trace_back_depth: usize,
    armed: bool,
}

/// Result of walking back through the survivor history.
#[derive(Debug)]
pub struct TraceBack<'a, T> {
    /// State reached after walking back `trace_back_depth` steps
    pub state: usize,
    /// State visited just before `state`, one step later in time
    pub successor: usize,
    /// Slot in which the `state` -> `successor` transition was recorded
    pub entry: &'a T,
}

impl<T: Copy + Default> SurvivorRing<T> {
    pub fn new(params: &ViterbiParams) -> Result<Self, ViterbiInitErr> {
        params.validate()?;
        Ok(Self {
            slots: vec![T::default(); params.ring_capacity()],
            offset: 0,
            trace_back_depth: params.trace_back_depth,
            armed: false,
        })
    }

    /// Clear all slots and return to the unarmed start position.
    pub fn reset(&mut self) {
        self.slots.fill(T::default());
        self.offset = 0;
        self.armed = false;
    }

    /// Move the write position to the next slot.
    /// Returns true if this step armed the ring.
    pub fn advance(&mut self) -> bool {
        self.offset += 1;
        if self.offset >= self.trace_back_depth {
            if self.offset == self.slots.len() {
                self.offset = 0;
            }
            if !self.armed {
                self.armed = true;
                return true;
            }
        }
        false
    }

    /// Slot for the current step
    #[inline]
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.slots[self.offset]
    }

    /// Slot written `steps_back` steps before the current one.
    #[inline]
    pub fn slot(&self, steps_back: usize) -> &T {
        let len = self.slots.len();
        &self.slots[(self.offset + len - steps_back % len) % len]
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn trace_back_depth(&self) -> usize {
        self.trace_back_depth
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[allow(dead_code)]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Walk back `trace_back_depth` steps starting at `final_state`.
    /// `survivor` returns the predecessor recorded for a state in a slot.
    pub fn trace_back<F>(&self, final_state: usize, survivor: F) -> TraceBack<'_, T>
    where
        F: Fn(&T, usize) -> usize,
    {
        let mut state = final_state;
        let mut successor = final_state;
        let mut entry = self.slot(0);
        for steps_back in 0..self.trace_back_depth {
            entry = self.slot(steps_back);
            successor = state;
            state = survivor(entry, state);
            tracing::trace!("trace-back {}: state {} <- {}", steps_back, successor, state);
        }
        TraceBack { state, successor, entry }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ring(depth: usize) -> SurvivorRing<[u8; 4]> {
        SurvivorRing::new(&ViterbiParams::new(depth)).unwrap()
    }

    #[test]
    fn test_invalid_depth_rejected() {
        assert!(matches!(
            SurvivorRing::<[u8; 4]>::new(&ViterbiParams::new(0)),
            Err(ViterbiInitErr::TraceBackDepthZero)
        ));
    }

    #[test]
    fn test_arms_after_depth_steps() {
        let mut r = ring(5);
        assert_eq!(r.capacity(), 6);
        assert!(!r.is_armed());
        for _ in 0..4 {
            assert!(!r.advance());
            assert!(!r.is_armed());
        }
        assert!(r.advance());
        assert!(r.is_armed());
        // Only reported once
        assert!(!r.advance());
        assert!(r.is_armed());
    }

    #[test]
    fn test_offset_wraps_modulo_capacity() {
        let mut r = ring(3);
        let mut seen = Vec::new();
        for _ in 0..9 {
            r.advance();
            seen.push(r.offset());
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_slot_addresses_relative_to_current() {
        let mut r = ring(3);
        for step in 1..=6u8 {
            r.advance();
            *r.current_mut() = [step; 4];
        }
        assert_eq!(r.slot(0)[0], 6);
        assert_eq!(r.slot(1)[0], 5);
        assert_eq!(r.slot(2)[0], 4);
        assert_eq!(r.slot(3)[0], 3);
        // Wraps around the whole ring
        assert_eq!(r.slot(4)[0], 6);
    }

    #[test]
    fn test_trace_back_follows_survivors() {
        let mut r = ring(3);
        // Chain 1 -> 2 -> 3 -> 0 written oldest first, survivors point one step back
        let history = [[0, 0, 0, 0], [0, 0, 1, 0], [0, 0, 0, 2], [3, 0, 0, 0]];
        for h in history {
            r.advance();
            *r.current_mut() = h;
        }
        let tb = r.trace_back(0, |slot, state| slot[state] as usize);
        // Three steps back from state 0: 0 <- 3 <- 2 <- 1
        assert_eq!(tb.state, 1);
        assert_eq!(tb.successor, 2);
        assert_eq!(*tb.entry, [0, 0, 1, 0]);
    }

    #[test]
    fn test_reset() {
        let mut r = ring(2);
        for _ in 0..3 {
            r.advance();
            *r.current_mut() = [7; 4];
        }
        assert!(r.is_armed());
        r.reset();
        assert!(!r.is_armed());
        assert_eq!(r.offset(), 0);
        for steps_back in 0..r.capacity() {
            assert_eq!(*r.slot(steps_back), [0; 4]);
        }
    }
}
