use std::fmt;

/// Token naming one selection. Results carrying an older epoch are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch-{}", self.0)
    }
}

/// Monotonic selection counter, scoped to one open recording view.
#[derive(Debug, Default)]
pub struct SelectionEpoch {
    current: Epoch,
}

impl SelectionEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new selection and return its epoch.
    pub fn advance(&mut self) -> Epoch {
        self.current = Epoch(self.current.0 + 1);
        self.current
    }

    pub fn current(&self) -> Epoch {
        self.current
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.current == epoch
    }

    pub fn reset(&mut self) {
        self.current = Epoch::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let mut epoch = SelectionEpoch::new();
        let first = epoch.advance();
        let second = epoch.advance();
        assert!(second > first);
        assert!(epoch.is_current(second));
        assert!(!epoch.is_current(first));
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut epoch = SelectionEpoch::new();
        epoch.advance();
        epoch.advance();
        epoch.reset();
        assert_eq!(epoch.current().value(), 0);
    }
}
