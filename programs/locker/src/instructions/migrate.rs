//! Migration to a successor account

use lock_model::Phase;
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, MigrationTarget, RewardLedger, Role, Token};
use crate::error::{LockError, Result};
use crate::events::LockEvent;
use crate::locked_account::LockedAccount;

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Name the successor account investors may move their positions to.
    ///
    /// Allowed once, before the outcome is decided.
    pub fn enable_migration(&mut self, caller: &Pubkey, target: Pubkey) -> Result<()> {
        self.authorize(caller, Role::ConfigAdmin)?;
        self.expect_phase(&[Phase::AcceptingLocks])?;
        if self.globals.migration.is_some() {
            return Err(LockError::MigrationAlreadyEnabled);
        }

        self.globals.migration = Some(target);
        log::info!("Migration: enabled towards {}", target);
        self.emit(LockEvent::MigrationEnabled { target });
        Ok(())
    }

    /// Move the caller's whole position, asset included, to the successor.
    ///
    /// Only after success; the reward stays with the investor and nothing is
    /// burned or penalised.
    pub fn migrate(&mut self, investor: &Pubkey, target: &mut dyn MigrationTarget) -> Result<()> {
        log::debug!("Migrate: {}", investor);
        self.expect_phase(&[Phase::AcceptingUnlocks])?;
        let expected = self.globals.migration.ok_or(LockError::MigrationNotEnabled)?;
        let actual = target.address();
        if actual != expected {
            return Err(LockError::MigrationTargetMismatch { expected, actual });
        }
        let position = self.position_of(investor)?;
        let investor = *investor;
        let address = self.address;

        self.transact("Migrate", |acc| {
            // Effects
            acc.registry.remove(&investor);
            acc.globals.total_locked = acc
                .globals
                .total_locked
                .checked_sub(position.locked_amount)
                .ok_or(LockError::ArithmeticOverflow)?;
            acc.globals.total_investors = acc
                .globals
                .total_investors
                .checked_sub(1)
                .ok_or(LockError::ArithmeticOverflow)?;
            acc.emit(LockEvent::InvestorMigrated {
                investor,
                amount: position.locked_amount,
                reward_due: position.reward_due,
                unlock_at: position.unlock_at,
            });

            // Interactions
            acc.asset.transfer(&address, &actual, position.locked_amount)?;
            target.migrate_investor(&investor, &position)?;
            Ok(())
        })?;

        log::info!("Migrate: {} moved {} to {}", investor, position.locked_amount, actual);
        Ok(())
    }
}
