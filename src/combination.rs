//! Lexicographic enumeration of fixed-size index subsets

/// Walks every `w`-element subset of `0..n` in lexicographic order.
///
/// The state holds the current subset in increasing order followed by a
/// sentinel equal to `n`, so the last element has an upper bound to compare
/// against like every other position.
#[derive(Debug, Clone)]
pub struct Combination {
    state: Vec<usize>,
}

impl Combination {
    /// Start at `{0, 1, ..., w - 1}`. Requires `w <= n`.
    pub fn new(w: usize, n: usize) -> Self {
        assert!(w <= n, "cannot choose {w} elements out of {n}");
        let mut state = Vec::with_capacity(w + 1);
        state.extend(0..w);
        state.push(n);
        Self { state }
    }

    pub fn current(&self) -> &[usize] {
        &self.state[..self.state.len() - 1]
    }

    /// Step to the next subset. Returns `false` and leaves the state alone
    /// once the last subset has been reached.
    pub fn advance(&mut self) -> bool {
        let w = self.state.len() - 1;
        let Some(t) = (0..w).rev().find(|&t| self.state[t] + 1 != self.state[t + 1]) else {
            return false;
        };

        self.state[t] += 1;
        for i in t + 1..w {
            self.state[i] = self.state[i - 1] + 1;
        }
        true
    }
}
