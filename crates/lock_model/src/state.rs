//! Pure state model for the locked account

/// One whole asset or reward unit in ULPs (1e18)
pub const WHOLE_UNIT: u128 = 1_000_000_000_000_000_000;

pub const DAY_SECS: u64 = 86_400;

/// Default individual lock period: 18 months of 30 days
pub const DEFAULT_LOCK_PERIOD_SECS: u64 = 18 * 30 * DAY_SECS;

/// Default early-unlock penalty (10% of the ticket)
pub const DEFAULT_PENALTY_FRACTION: u128 = WHOLE_UNIT / 10;

/// Investor table bound for the model (small for Kani)
pub const MAX_INVESTORS: usize = 6;

/// Global lifecycle of a locked account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No controller bound, nothing accepted
    Uncontrolled,
    /// Controller bound, deposits accepted
    AcceptingLocks,
    /// Controller confirmed success, unlocks subject to penalty
    AcceptingUnlocks,
    /// Controller declared failure, unlocks return everything
    ReleaseAll,
}

impl Phase {
    pub fn accepts_locks(self) -> bool {
        matches!(self, Phase::AcceptingLocks)
    }

    pub fn accepts_unlocks(self) -> bool {
        matches!(self, Phase::AcceptingUnlocks | Phase::ReleaseAll)
    }

    /// No forward transition leaves a terminal phase
    pub fn is_terminal(self) -> bool {
        self.accepts_unlocks()
    }
}

/// Locked position of a single investor.
///
/// `unlock_at == 0` is the absence sentinel: a live position always has a
/// non-zero date and a non-zero locked amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Asset units escrowed for the investor
    pub locked_amount: u128,
    /// Reward units burned on a penalised unlock
    pub reward_due: u128,
    /// Longstop date, seconds
    pub unlock_at: u64,
}

impl Position {
    pub const EMPTY: Position = Position {
        locked_amount: 0,
        reward_due: 0,
        unlock_at: 0,
    };

    pub fn is_live(&self) -> bool {
        self.unlock_at != 0
    }

    /// Live iff the date is set iff something is locked; tombstones carry nothing
    pub fn is_wellformed(&self) -> bool {
        if self.is_live() {
            self.locked_amount > 0
        } else {
            self.locked_amount == 0 && self.reward_due == 0
        }
    }
}

/// Investor as seen by the model: position plus wallet balances
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Investor {
    pub position: Position,
    /// Asset held outside the account
    pub asset_balance: u128,
    /// Reward units held
    pub reward_balance: u128,
    /// Reward units the investor approved the account to burn
    pub reward_allowance: u128,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub lock_period: u64,
    pub penalty_fraction: u128,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub phase: Phase,
    /// Asset held at the account's address (locked + stray)
    pub custody: u128,
    pub total_locked: u128,
    pub total_investors: u32,
    /// Asset received by the penalty disbursal destination
    pub disbursed: u128,
    /// Asset moved out by reclaim
    pub reclaimed: u128,
    /// Total asset in existence (custody + everything outside it)
    pub asset_supply: u128,
    pub reward_supply: u128,
    pub investors: arrayvec::ArrayVec<Investor, MAX_INVESTORS>,
    pub params: Params,
    /// Caller holds the role the next operation requires
    pub authorized_caller: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            lock_period: DEFAULT_LOCK_PERIOD_SECS,
            penalty_fraction: DEFAULT_PENALTY_FRACTION,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            phase: Phase::Uncontrolled,
            custody: 0,
            total_locked: 0,
            total_investors: 0,
            disbursed: 0,
            reclaimed: 0,
            asset_supply: 0,
            reward_supply: 0,
            investors: arrayvec::ArrayVec::new(),
            params: Params::default(),
            authorized_caller: true,
        }
    }
}
