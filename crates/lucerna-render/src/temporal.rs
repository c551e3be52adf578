/// Role assignment over the pipeline's three render targets plus the
/// accumulation counter.
///
/// Targets never move; only the indices naming which slot currently plays
/// `raw`, `current` and `last` do. This keeps swaps O(1) and removes any
/// dangling-reference risk from pointer juggling.
///
/// Invariants:
/// - `sample_count >= 1`, incremented by exactly 1 per `advance`, reset
///   to 1 only by `invalidate`.
/// - The three role indices are always a permutation of {0, 1, 2}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalState {
    raw: usize,
    current: usize,
    last: usize,
    sample_count: u32,
}

impl Default for TemporalState {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalState {
    pub fn new() -> Self {
        Self {
            raw: 0,
            current: 1,
            last: 2,
            sample_count: 1,
        }
    }

    /// Slot receiving this frame's ray-trace output.
    pub fn raw(&self) -> usize {
        self.raw
    }

    /// Slot receiving this frame's filtered output.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Slot holding the previous frame's filtered history.
    pub fn last(&self) -> usize {
        self.last
    }

    /// Frames accumulated into the history since the last invalidation,
    /// counting this one.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Post-render transition: this frame's filtered output becomes next
    /// frame's history.
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.last);
        self.sample_count += 1;
    }

    /// Discard accumulated history without clearing any target: the stale
    /// history slot is handed to the tracer to overwrite, and the counter
    /// restarts so the next filter pass passes raw through unweighted.
    pub fn invalidate(&mut self) {
        std::mem::swap(&mut self.last, &mut self.raw);
        self.sample_count = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(state: &TemporalState) {
        let mut roles = [state.raw(), state.current(), state.last()];
        roles.sort_unstable();
        assert_eq!(roles, [0, 1, 2]);
    }

    #[test]
    fn test_sample_count_tracks_frames() {
        let mut state = TemporalState::new();
        assert_eq!(state.sample_count(), 1);
        for n in 1..=10 {
            state.advance();
            assert_eq!(state.sample_count(), n + 1);
        }
    }

    #[test]
    fn test_advance_swaps_current_and_last() {
        let mut state = TemporalState::new();
        let (current, last) = (state.current(), state.last());
        state.advance();
        assert_eq!(state.current(), last);
        assert_eq!(state.last(), current);
    }

    #[test]
    fn test_invalidate_resets_count_and_retires_raw() {
        let mut state = TemporalState::new();
        for _ in 0..7 {
            state.advance();
        }
        let raw = state.raw();
        state.invalidate();
        assert_eq!(state.sample_count(), 1);
        assert_eq!(state.last(), raw, "old raw slot becomes history");
    }

    #[test]
    fn test_observed_sample_sequence_with_reset() {
        // Five accumulation frames then one invalidation: the counts a
        // frame observes are 1, 2, 3, 4, 5, then 1 again.
        let mut state = TemporalState::new();
        let mut observed = Vec::new();
        for _ in 0..5 {
            observed.push(state.sample_count());
            state.advance();
        }
        state.invalidate();
        observed.push(state.sample_count());
        assert_eq!(observed, vec![1, 2, 3, 4, 5, 1]);
    }

    #[test]
    fn test_roles_stay_a_permutation() {
        let mut state = TemporalState::new();
        assert_permutation(&state);
        for i in 0..50 {
            if i % 7 == 3 {
                state.invalidate();
            } else {
                state.advance();
            }
            assert_permutation(&state);
        }
    }

    #[test]
    fn test_roles_are_distinct_after_interleaving() {
        let mut state = TemporalState::new();
        state.advance();
        state.invalidate();
        state.advance();
        assert_ne!(state.raw(), state.current());
        assert_ne!(state.current(), state.last());
        assert_ne!(state.raw(), state.last());
    }
}
