//! Tsetlin Automaton - the fundamental building block.

/// # Overview
///
/// A bounded two-action automaton with states `1..=n_states`.
/// States `1..=middle` produce action=false (exclude).
/// States `(middle+1)..=n_states` produce action=true (include).
///
/// The action is cached next to the state and refreshed on every mutation,
/// so reading it never recomputes anything.
///
/// # Examples
///
/// ```
/// use tsetlin_pairwise::Automaton;
///
/// let mut automaton = Automaton::new(10, 5);
/// assert!(!automaton.action());
///
/// assert!(automaton.reward());
/// assert!(automaton.action());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Automaton {
    state:    i16,
    n_states: i16,
    middle:   i16,
    action:   bool
}

impl Automaton {
    /// # Overview
    ///
    /// Creates automaton with the given initial state.
    ///
    /// # Panics
    ///
    /// Panics if `n_states` is odd.
    #[inline]
    pub fn new(n_states: i16, state: i16) -> Self {
        assert!(n_states % 2 == 0, "n_states must be even, got {n_states}");
        let middle = n_states / 2;
        Self {
            state,
            n_states,
            middle,
            action: state > middle
        }
    }

    /// Returns true if the literal is included.
    #[inline(always)]
    pub fn action(&self) -> bool {
        self.action
    }

    #[inline(always)]
    pub fn state(&self) -> i16 {
        self.state
    }

    #[inline(always)]
    pub fn n_states(&self) -> i16 {
        self.n_states
    }

    #[inline(always)]
    pub fn middle(&self) -> i16 {
        self.middle
    }

    /// # Overview
    ///
    /// Moves one state toward include. Returns true if the action flipped
    /// from exclude to include.
    ///
    /// The caller keeps `state < n_states`.
    #[inline]
    pub fn reward(&mut self) -> bool {
        debug_assert!(self.state < self.n_states);
        let previous = self.action;
        self.state += 1;
        self.recompute_action();
        previous != self.action
    }

    /// # Overview
    ///
    /// Moves one state toward exclude. Returns true if the action flipped
    /// from include to exclude.
    ///
    /// The caller keeps `state > 1`.
    #[inline]
    pub fn penalty(&mut self) -> bool {
        debug_assert!(self.state > 1);
        let previous = self.action;
        self.state -= 1;
        self.recompute_action();
        previous != self.action
    }

    /// # Overview
    ///
    /// Overwrites the state and refreshes the action. Bounds are not checked.
    #[inline]
    pub fn set_state(&mut self, state: i16) {
        self.state = state;
        self.recompute_action();
    }

    #[inline]
    pub fn recompute_action(&mut self) {
        self.action = self.state > self.middle;
    }

    /// True while another reward keeps the state in bounds.
    #[inline(always)]
    pub fn can_reward(&self) -> bool {
        self.state < self.n_states
    }

    /// True while another penalty keeps the state in bounds.
    #[inline(always)]
    pub fn can_penalize(&self) -> bool {
        self.state > 1
    }
}
