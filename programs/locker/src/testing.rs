//! In-memory collaborators for tests and simulations
//!
//! Available to other crates with the `test-utils` feature.

use lock_model::Position;
use solana_program::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};

use crate::capabilities::{
    AccessGate, AssetVault, Checkpoint, CollabResult, MigrationTarget, RewardLedger, Role, Token,
};
use crate::config::LockSettings;
use crate::error::CollaboratorError;
use crate::locked_account::LockedAccount;

pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

/// Ledger token usable both as the asset and as the reward
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimToken {
    id: Pubkey,
    balances: HashMap<Pubkey, u128>,
    allowances: HashMap<(Pubkey, Pubkey), u128>,
    supply: u128,
    rejecting: HashSet<Pubkey>,
}

impl SimToken {
    pub fn new(id: Pubkey) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Create `amount` new units for `to`
    pub fn mint(&mut self, to: &Pubkey, amount: u128) {
        *self.balances.entry(*to).or_default() += amount;
        self.supply += amount;
    }

    /// Destroy `amount` of the holder's own units
    pub fn withdraw(&mut self, holder: &Pubkey, amount: u128) -> CollabResult {
        self.debit(holder, amount)?;
        self.supply -= amount;
        Ok(())
    }

    pub fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u128) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Make every transfer to `recipient` fail
    pub fn reject_transfers_to(&mut self, recipient: Pubkey) {
        self.rejecting.insert(recipient);
    }

    pub fn supply(&self) -> u128 {
        self.supply
    }

    /// Sum of every balance; equals the supply unless something is broken
    pub fn sum_of_balances(&self) -> u128 {
        self.balances.values().sum()
    }

    fn debit(&mut self, holder: &Pubkey, amount: u128) -> CollabResult {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(CollaboratorError::InsufficientBalance { required: amount, available });
        }
        self.balances.insert(*holder, available - amount);
        Ok(())
    }
}

impl Token for SimToken {
    fn id(&self) -> Pubkey {
        self.id
    }

    fn balance_of(&self, holder: &Pubkey) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> CollabResult {
        if self.rejecting.contains(to) {
            return Err(CollaboratorError::Rejected(format!("{} refuses transfers", to)));
        }
        self.debit(from, amount)?;
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }
}

impl Checkpoint for SimToken {
    type Snapshot = SimToken;

    fn checkpoint(&self) -> SimToken {
        self.clone()
    }

    fn rollback(&mut self, snapshot: SimToken) {
        *self = snapshot;
    }
}

impl AssetVault for SimToken {
    fn deposit(&mut self, payer: &Pubkey, holder: &Pubkey, amount: u128) -> CollabResult {
        self.transfer(payer, holder, amount)
    }
}

impl RewardLedger for SimToken {
    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn burn_from(&mut self, spender: &Pubkey, holder: &Pubkey, amount: u128) -> CollabResult {
        let approved = self.allowance(holder, spender);
        if approved < amount {
            return Err(CollaboratorError::InsufficientAllowance { required: amount, approved });
        }
        self.debit(holder, amount)?;
        self.allowances.insert((*holder, *spender), approved - amount);
        self.supply -= amount;
        Ok(())
    }

    fn total_supply(&self) -> u128 {
        self.supply
    }
}

/// Access gate backed by an explicit grant list
#[derive(Debug, Clone, Default)]
pub struct SimAccessGate {
    grants: HashSet<(Pubkey, Role)>,
}

impl SimAccessGate {
    pub fn grant(&mut self, caller: Pubkey, role: Role) {
        self.grants.insert((caller, role));
    }

    pub fn revoke(&mut self, caller: &Pubkey, role: Role) {
        self.grants.remove(&(*caller, role));
    }
}

impl AccessGate for SimAccessGate {
    fn is_authorized(&self, caller: &Pubkey, role: Role) -> bool {
        self.grants.contains(&(*caller, role))
    }
}

/// Successor account recording what it received
#[derive(Debug, Clone)]
pub struct SimMigrationTarget {
    address: Pubkey,
    migrated: Vec<(Pubkey, Position)>,
    rejecting: bool,
}

impl SimMigrationTarget {
    pub fn new(address: Pubkey) -> Self {
        Self {
            address,
            migrated: Vec::new(),
            rejecting: false,
        }
    }

    pub fn reject_all(&mut self) {
        self.rejecting = true;
    }

    pub fn migrated(&self) -> &[(Pubkey, Position)] {
        &self.migrated
    }
}

impl MigrationTarget for SimMigrationTarget {
    fn address(&self) -> Pubkey {
        self.address
    }

    fn migrate_investor(&mut self, investor: &Pubkey, position: &Position) -> CollabResult {
        if self.rejecting {
            return Err(CollaboratorError::Rejected("migration closed".to_string()));
        }
        self.migrated.push((*investor, *position));
        Ok(())
    }
}

pub type SimAccount = LockedAccount<SimToken, SimToken, SimAccessGate>;

/// Locked account wired to simulated collaborators
pub struct Fixture {
    pub account: SimAccount,
    /// Holds both admin roles
    pub admin: Pubkey,
    pub controller: Pubkey,
    pub disbursal: Pubkey,
    /// Clock used by [`Fixture::lock`]
    pub now: u64,
}

impl Fixture {
    pub const ADDRESS: Pubkey = Pubkey::new_from_array([100; 32]);
    pub const ASSET: Pubkey = Pubkey::new_from_array([101; 32]);
    pub const REWARD: Pubkey = Pubkey::new_from_array([102; 32]);

    /// Fresh account, no controller yet
    pub fn new() -> Self {
        Self::with_settings(LockSettings::new(key(10)))
    }

    pub fn with_settings(settings: LockSettings) -> Self {
        let admin = key(1);
        let mut gate = SimAccessGate::default();
        gate.grant(admin, Role::ConfigAdmin);
        gate.grant(admin, Role::ReclaimAdmin);

        let account = LockedAccount::new(
            Self::ADDRESS,
            settings,
            SimToken::new(Self::ASSET),
            SimToken::new(Self::REWARD),
            gate,
        )
        .expect("fixture settings are valid");

        Self {
            account,
            admin,
            controller: key(2),
            disbursal: settings.penalty_disbursal,
            now: 1,
        }
    }

    /// Account with the controller bound, accepting locks
    pub fn controlled() -> Self {
        let mut fx = Self::new();
        let (admin, controller) = (fx.admin, fx.controller);
        fx.account
            .set_controller(&admin, controller)
            .expect("admin binds controller");
        fx
    }

    /// Fund the controller, issue `reward` to `investor` and lock `amount`
    pub fn lock(&mut self, investor: Pubkey, amount: u128, reward: u128) -> Position {
        let controller = self.controller;
        self.account.asset_mut().mint(&controller, amount);
        self.account.reward_mut().mint(&investor, reward);
        self.account
            .lock(&controller, investor, amount, reward, self.now)
            .expect("fixture lock succeeds")
    }

    /// Investor approves the account to burn `amount` reward units
    pub fn approve_burn(&mut self, investor: &Pubkey, amount: u128) {
        let address = self.account.address();
        self.account.reward_mut().approve(investor, &address, amount);
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
