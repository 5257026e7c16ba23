//! Account-wide scalars

use lock_model::Phase;
use solana_program::pubkey::Pubkey;
use std::collections::BTreeSet;

use crate::config::LockSettings;

/// Everything the locked account owns besides the registry.
///
/// Small enough to clone as a whole when an operation checkpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globals {
    pub phase: Phase,
    /// Bound once, when leaving `Uncontrolled`
    pub controller: Option<Pubkey>,
    /// Addresses the controller delegated deposits to
    pub depositors: BTreeSet<Pubkey>,
    /// Sum of all locked amounts
    pub total_locked: u128,
    /// Number of registry entries
    pub total_investors: u64,
    pub penalty_fraction: u128,
    pub penalty_disbursal: Pubkey,
    /// Seconds added to the deposit time to form the unlock date
    pub lock_period: u64,
    /// Successor account, once migration is enabled
    pub migration: Option<Pubkey>,
}

impl Globals {
    pub fn new(settings: &LockSettings) -> Self {
        Self {
            phase: Phase::Uncontrolled,
            controller: None,
            depositors: BTreeSet::new(),
            total_locked: 0,
            total_investors: 0,
            penalty_fraction: settings.penalty_fraction,
            penalty_disbursal: settings.penalty_disbursal,
            lock_period: settings.lock_period,
            migration: None,
        }
    }
}
