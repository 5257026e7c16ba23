//! Error types for the locked account

use lock_model::Phase;
use solana_program::pubkey::Pubkey;

use crate::capabilities::Role;

/// Failure reported by an external collaborator (token, ledger, migration target)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: u128, approved: u128 },

    #[error("rejected: {0}")]
    Rejected(String),
}

/// Errors returned by locked-account operations.
///
/// Every error aborts the whole operation; state is left exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    #[error("caller {caller} lacks the {role:?} role")]
    Unauthorized { caller: Pubkey, role: Role },

    #[error("operation not permitted in phase {phase:?}")]
    InvalidPhase { phase: Phase },

    #[error("no locked position for investor {0}")]
    NoSuchPosition(Pubkey),

    #[error("reward burn not authorized: {required} due, {allowance} approved, {balance} held")]
    InsufficientAuthorization {
        required: u128,
        allowance: u128,
        balance: u128,
    },

    #[error("reward due {required} exceeds the investor's reward balance {balance}")]
    UnbackedReward { required: u128, balance: u128 },

    #[error("collaborator call failed: {0}")]
    CollaboratorFailure(#[from] CollaboratorError),

    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("penalty fraction {0} exceeds one whole unit")]
    PenaltyFractionTooLarge(u128),

    #[error("lock period must be greater than zero")]
    InvalidLockPeriod,

    #[error("unlock date must be non-zero")]
    InvalidUnlockDate,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("token {0} is held by this account and must be reclaimed through its own target")]
    AliasedToken(Pubkey),

    #[error("migration is not enabled")]
    MigrationNotEnabled,

    #[error("migration is already enabled")]
    MigrationAlreadyEnabled,

    #[error("migration target mismatch: expected {expected}, got {actual}")]
    MigrationTargetMismatch { expected: Pubkey, actual: Pubkey },
}

pub type Result<T> = core::result::Result<T, LockError>;
