//! Collaborator capabilities consumed by the locked account
//!
//! The asset token, the reward ledger, access control and migration targets
//! live outside this crate. Calls into them are synchronous; a failing call
//! must leave the collaborator unchanged, and [`Checkpoint`] lets the locked
//! account undo calls that already succeeded earlier in the same operation.

use lock_model::Position;
use serde::Serialize;
use solana_program::pubkey::Pubkey;

use crate::error::CollaboratorError;

pub type CollabResult = Result<(), CollaboratorError>;

/// Capabilities a caller can hold.
///
/// Only the admin roles are answered by the [`AccessGate`]; the controller
/// roles follow from the bound controller and the reward-ledger role from the
/// ledger's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Role {
    /// Decides the outcome (success / failure)
    Controller,
    /// Controller or a depositor it delegated
    Depositor,
    /// Moves stray assets out of the account
    ReclaimAdmin,
    /// Binds the controller, sets penalty parameters, enables migration
    ConfigAdmin,
    /// The reward ledger calling back after an approval
    RewardLedger,
}

/// Yes/no authorization per role per caller
pub trait AccessGate {
    fn is_authorized(&self, caller: &Pubkey, role: Role) -> bool;
}

/// Host transaction semantics: capture state, restore it on abort
pub trait Checkpoint {
    type Snapshot;

    fn checkpoint(&self) -> Self::Snapshot;

    fn rollback(&mut self, snapshot: Self::Snapshot);
}

/// Fungible token as seen from the account's address
pub trait Token {
    /// Token identity
    fn id(&self) -> Pubkey;

    fn balance_of(&self, holder: &Pubkey) -> u128;

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> CollabResult;
}

/// The escrowed asset
pub trait AssetVault: Token + Checkpoint {
    /// Pull `amount` from `payer` into `holder`'s custody
    fn deposit(&mut self, payer: &Pubkey, holder: &Pubkey, amount: u128) -> CollabResult;
}

/// The reward token, burned on penalised unlocks
pub trait RewardLedger: Token + Checkpoint {
    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128;

    /// Burn `amount` of `holder`'s balance using `spender`'s allowance
    fn burn_from(&mut self, spender: &Pubkey, holder: &Pubkey, amount: u128) -> CollabResult;

    fn total_supply(&self) -> u128;
}

/// Successor account accepting migrated positions
pub trait MigrationTarget {
    /// Address that receives the migrated asset
    fn address(&self) -> Pubkey;

    fn migrate_investor(&mut self, investor: &Pubkey, position: &Position) -> CollabResult;
}
