use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use crate::error::LedgerError;

/// Positions with an operation in flight.
#[derive(Clone, Debug, Default)]
pub struct ReentrancyGuard {
    in_flight: BTreeSet<Pubkey>,
}

impl ReentrancyGuard {
    /// Marks every position busy, or none of them if one already is.
    pub fn enter(&mut self, positions: &[Pubkey]) -> Result<()> {
        require!(
            positions.iter().all(|p| !self.in_flight.contains(p)),
            LedgerError::ReentrantCall
        );
        self.in_flight.extend(positions.iter().copied());
        Ok(())
    }

    pub fn exit(&mut self, positions: &[Pubkey]) {
        for position in positions {
            self.in_flight.remove(position);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nested_entry() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut guard = ReentrancyGuard::default();
        guard.enter(&[a]).unwrap();

        let err = guard.enter(&[b, a]).unwrap_err();
        assert_eq!(err, LedgerError::ReentrantCall.into());
        guard.enter(&[b]).unwrap();

        guard.exit(&[a, b]);
        assert!(guard.is_idle());
        guard.enter(&[a, b]).unwrap();
    }
}
