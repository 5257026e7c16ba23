//! Events emitted by the locked account
//!
//! Events are appended to the account's log in emission order and dropped
//! together with every other effect when an operation aborts.

use lock_model::Phase;
use serde::Serialize;
use solana_program::pubkey::Pubkey;

/// Observable record of a state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum LockEvent {
    ControllerBound {
        #[serde(serialize_with = "base58::serialize")]
        controller: Pubkey,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    DepositorAuthorized {
        #[serde(serialize_with = "base58::serialize")]
        depositor: Pubkey,
        allowed: bool,
    },
    /// Deposit recorded; `amount` and `reward_due` are this deposit's, not the totals
    LockRecorded {
        #[serde(serialize_with = "base58::serialize")]
        investor: Pubkey,
        amount: u128,
        reward_due: u128,
    },
    /// Reward burned on a success-phase unlock, tagged with the unlocked ticket
    RewardBurned {
        #[serde(serialize_with = "base58::serialize")]
        investor: Pubkey,
        asset_amount: u128,
        reward_amount: u128,
    },
    PenaltyDisbursed {
        #[serde(serialize_with = "base58::serialize")]
        investor: Pubkey,
        amount: u128,
        #[serde(serialize_with = "base58::serialize")]
        destination: Pubkey,
    },
    /// Asset paid out to the investor (ticket minus penalty)
    FundsUnlocked {
        #[serde(serialize_with = "base58::serialize")]
        investor: Pubkey,
        amount: u128,
    },
    PenaltyFractionChanged {
        fraction: u128,
    },
    PenaltyDisbursalChanged {
        #[serde(serialize_with = "base58::serialize")]
        destination: Pubkey,
    },
    MigrationEnabled {
        #[serde(serialize_with = "base58::serialize")]
        target: Pubkey,
    },
    InvestorMigrated {
        #[serde(serialize_with = "base58::serialize")]
        investor: Pubkey,
        amount: u128,
        reward_due: u128,
        unlock_at: u64,
    },
    AssetReclaimed {
        #[serde(serialize_with = "base58::serialize")]
        token: Pubkey,
        #[serde(serialize_with = "base58::serialize")]
        destination: Pubkey,
        amount: u128,
    },
}

impl LockEvent {
    /// Investor the event concerns, if any
    pub fn investor(&self) -> Option<&Pubkey> {
        match self {
            LockEvent::LockRecorded { investor, .. }
            | LockEvent::RewardBurned { investor, .. }
            | LockEvent::PenaltyDisbursed { investor, .. }
            | LockEvent::FundsUnlocked { investor, .. }
            | LockEvent::InvestorMigrated { investor, .. } => Some(investor),
            _ => None,
        }
    }
}

/// Identities render as base58 strings in serialized output
pub(crate) mod base58 {
    use serde::Serializer;
    use solana_program::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(key)
    }

    pub mod option {
        use serde::Serializer;
        use solana_program::pubkey::Pubkey;

        pub fn serialize<S: Serializer>(key: &Option<Pubkey>, s: S) -> Result<S::Ok, S::Error> {
            match key {
                Some(key) => s.collect_str(key),
                None => s.serialize_none(),
            }
        }
    }
}
