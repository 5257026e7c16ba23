//! The locked account: custody, registry and lifecycle in one place

use lock_model::{Phase, Position};
use serde::Serialize;
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, Checkpoint, RewardLedger, Role, Token};
use crate::config::LockSettings;
use crate::error::{LockError, Result};
use crate::events::{base58, LockEvent};
use crate::state::{Globals, InvestorRegistry};

/// Escrow of one asset per investor, released by the controller's outcome.
///
/// Operations take `&mut self`, so a collaborator cannot re-enter the account
/// while one is running. Each operation either completes with all its effects
/// or fails leaving account and collaborators untouched.
pub struct LockedAccount<A, R, G> {
    pub(crate) address: Pubkey,
    pub(crate) asset: A,
    pub(crate) reward: R,
    pub(crate) gate: G,
    pub(crate) globals: Globals,
    pub(crate) registry: InvestorRegistry,
    pub(crate) events: Vec<LockEvent>,
}

/// Serializable view of the whole account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockSnapshot {
    #[serde(serialize_with = "base58::serialize")]
    pub address: Pubkey,
    pub phase: Phase,
    #[serde(serialize_with = "base58::option::serialize")]
    pub controller: Option<Pubkey>,
    pub total_locked_amount: u128,
    pub total_investors: u64,
    pub penalty_fraction: u128,
    #[serde(serialize_with = "base58::serialize")]
    pub penalty_disbursal: Pubkey,
    pub lock_period: u64,
    #[serde(serialize_with = "base58::option::serialize")]
    pub migration: Option<Pubkey>,
    /// Sorted by investor
    pub positions: Vec<InvestorSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorSnapshot {
    #[serde(serialize_with = "base58::serialize")]
    pub investor: Pubkey,
    #[serde(flatten)]
    pub position: Position,
}

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Create an account at `address` in the `Uncontrolled` phase
    pub fn new(address: Pubkey, settings: LockSettings, asset: A, reward: R, gate: G) -> Result<Self> {
        settings.validate()?;
        if asset.id() == reward.id() {
            return Err(LockError::AliasedToken(asset.id()));
        }

        log::info!(
            "LockedAccount: created at {} (asset {}, reward {}, period {}s)",
            address,
            asset.id(),
            reward.id(),
            settings.lock_period
        );

        Ok(Self {
            address,
            asset,
            reward,
            gate,
            globals: Globals::new(&settings),
            registry: InvestorRegistry::new(),
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn phase(&self) -> Phase {
        self.globals.phase
    }

    pub fn controller(&self) -> Option<Pubkey> {
        self.globals.controller
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn registry(&self) -> &InvestorRegistry {
        &self.registry
    }

    /// Position of `investor`, zeroed when absent
    pub fn balance_of(&self, investor: &Pubkey) -> Position {
        self.registry.get(investor).copied().unwrap_or(Position::EMPTY)
    }

    pub fn position(&self, investor: &Pubkey) -> Option<Position> {
        self.registry.get(investor).copied()
    }

    pub fn total_locked_amount(&self) -> u128 {
        self.globals.total_locked
    }

    pub fn total_investors(&self) -> u64 {
        self.globals.total_investors
    }

    pub fn penalty_fraction(&self) -> u128 {
        self.globals.penalty_fraction
    }

    pub fn penalty_disbursal(&self) -> Pubkey {
        self.globals.penalty_disbursal
    }

    pub fn lock_period(&self) -> u64 {
        self.globals.lock_period
    }

    pub fn migration(&self) -> Option<Pubkey> {
        self.globals.migration
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn asset_mut(&mut self) -> &mut A {
        &mut self.asset
    }

    pub fn reward(&self) -> &R {
        &self.reward
    }

    pub fn reward_mut(&mut self) -> &mut R {
        &mut self.reward
    }

    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    /// Events emitted so far, oldest first
    pub fn events(&self) -> &[LockEvent] {
        &self.events
    }

    /// Take the emitted events, leaving the log empty
    pub fn take_events(&mut self) -> Vec<LockEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> LockSnapshot {
        let mut positions: Vec<InvestorSnapshot> = self
            .registry
            .iter()
            .map(|(investor, position)| InvestorSnapshot {
                investor: *investor,
                position: *position,
            })
            .collect();
        positions.sort_by_key(|p| p.investor);

        LockSnapshot {
            address: self.address,
            phase: self.globals.phase,
            controller: self.globals.controller,
            total_locked_amount: self.globals.total_locked,
            total_investors: self.globals.total_investors,
            penalty_fraction: self.globals.penalty_fraction,
            penalty_disbursal: self.globals.penalty_disbursal,
            lock_period: self.globals.lock_period,
            migration: self.globals.migration,
            positions,
        }
    }

    /// Custody covers the registry and the totals agree with it
    pub fn is_consistent(&self) -> bool {
        let registry_total = match self.registry.total_locked() {
            Some(total) => total,
            None => return false,
        };
        registry_total == self.globals.total_locked
            && self.registry.len() as u64 == self.globals.total_investors
            && self.asset.balance_of(&self.address) >= self.globals.total_locked
    }

    /// Check `caller` holds `role`
    pub(crate) fn authorize(&self, caller: &Pubkey, role: Role) -> Result<()> {
        let allowed = match role {
            Role::Controller => self.globals.controller.as_ref() == Some(caller),
            Role::Depositor => {
                self.globals.controller.as_ref() == Some(caller)
                    || self.globals.depositors.contains(caller)
            }
            Role::RewardLedger => *caller == self.reward.id(),
            Role::ReclaimAdmin | Role::ConfigAdmin => self.gate.is_authorized(caller, role),
        };

        if !allowed {
            log::debug!("Authorize: {} lacks {:?}", caller, role);
            return Err(LockError::Unauthorized { caller: *caller, role });
        }
        Ok(())
    }

    /// Current phase, if it is one of `accepted`
    pub(crate) fn expect_phase(&self, accepted: &[Phase]) -> Result<Phase> {
        let phase = self.globals.phase;
        if !accepted.contains(&phase) {
            log::debug!("Phase: {:?} not in {:?}", phase, accepted);
            return Err(LockError::InvalidPhase { phase });
        }
        Ok(phase)
    }

    pub(crate) fn position_of(&self, investor: &Pubkey) -> Result<Position> {
        self.registry
            .get(investor)
            .copied()
            .ok_or(LockError::NoSuchPosition(*investor))
    }

    pub(crate) fn set_phase(&mut self, to: Phase) {
        let from = self.globals.phase;
        self.globals.phase = to;
        log::info!("Phase: {:?} -> {:?}", from, to);
        self.emit(LockEvent::PhaseChanged { from, to });
    }

    pub(crate) fn emit(&mut self, event: LockEvent) {
        log::debug!("Event: {:?}", event);
        self.events.push(event);
    }

    /// Run `f` atomically.
    ///
    /// On error the globals, registry, event log and both tokens are restored
    /// to their state before the call.
    pub(crate) fn transact<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let globals = self.globals.clone();
        let asset = self.asset.checkpoint();
        let reward = self.reward.checkpoint();
        let events = self.events.len();
        self.registry.begin();

        match f(self) {
            Ok(value) => {
                self.registry.commit();
                Ok(value)
            }
            Err(err) => {
                self.registry.rollback();
                self.globals = globals;
                self.asset.rollback(asset);
                self.reward.rollback(reward);
                self.events.truncate(events);
                log::warn!("{}: rolled back: {}", op, err);
                Err(err)
            }
        }
    }
}
