//! Investor registry: one position per investor

use lock_model::{merge_position, Position};
use solana_program::pubkey::Pubkey;
use std::collections::HashMap;

use crate::error::{LockError, Result};

/// Outcome of recording a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// First deposit for this investor
    Created(Position),
    /// Deposit merged into an existing position
    Merged(Position),
}

impl Upsert {
    pub fn position(&self) -> Position {
        match *self {
            Upsert::Created(p) | Upsert::Merged(p) => p,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Upsert::Created(_))
    }
}

/// Positions keyed by investor identity.
///
/// Mutations made while a journal is open can be undone with
/// [`InvestorRegistry::rollback`]; outside a journal they are final.
#[derive(Debug, Clone, Default)]
pub struct InvestorRegistry {
    positions: HashMap<Pubkey, Position>,
    journal: Option<Vec<(Pubkey, Option<Position>)>>,
}

impl InvestorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of `investor`; `None` when absent
    pub fn get(&self, investor: &Pubkey) -> Option<&Position> {
        self.positions.get(investor)
    }

    pub fn contains(&self, investor: &Pubkey) -> bool {
        self.positions.contains_key(investor)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pubkey, &Position)> {
        self.positions.iter()
    }

    /// Sum of all locked amounts
    pub fn total_locked(&self) -> Option<u128> {
        self.positions
            .values()
            .try_fold(0u128, |acc, p| acc.checked_add(p.locked_amount))
    }

    /// Record a deposit, creating or merging the investor's position.
    ///
    /// Merging adds amount and reward due and keeps the earlier unlock date.
    pub(crate) fn upsert(
        &mut self,
        investor: Pubkey,
        amount: u128,
        reward_due: u128,
        proposed_unlock_at: u64,
    ) -> Result<Upsert> {
        if amount == 0 {
            return Err(LockError::ZeroAmount);
        }
        if proposed_unlock_at == 0 {
            return Err(LockError::InvalidUnlockDate);
        }

        let previous = self.positions.get(&investor).copied();
        let upsert = match previous {
            None => Upsert::Created(merge_position(
                Position::EMPTY,
                amount,
                reward_due,
                proposed_unlock_at,
            )),
            Some(existing) => {
                existing
                    .locked_amount
                    .checked_add(amount)
                    .ok_or(LockError::ArithmeticOverflow)?;
                existing
                    .reward_due
                    .checked_add(reward_due)
                    .ok_or(LockError::ArithmeticOverflow)?;
                Upsert::Merged(merge_position(existing, amount, reward_due, proposed_unlock_at))
            }
        };

        self.record(investor, previous);
        self.positions.insert(investor, upsert.position());
        Ok(upsert)
    }

    /// Delete and return the investor's position
    pub(crate) fn remove(&mut self, investor: &Pubkey) -> Option<Position> {
        let removed = self.positions.remove(investor);
        if removed.is_some() {
            self.record(*investor, removed);
        }
        removed
    }

    /// Open a journal; any open journal is discarded
    pub(crate) fn begin(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Keep every change since [`begin`](Self::begin)
    pub(crate) fn commit(&mut self) {
        self.journal = None;
    }

    /// Undo every change since [`begin`](Self::begin), newest first
    pub(crate) fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for (investor, previous) in journal.into_iter().rev() {
            match previous {
                Some(position) => {
                    self.positions.insert(investor, position);
                }
                None => {
                    self.positions.remove(&investor);
                }
            }
        }
    }

    fn record(&mut self, investor: Pubkey, previous: Option<Position>) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push((investor, previous));
        }
    }
}
