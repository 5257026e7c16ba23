//! Lock instruction - record a deposit and take custody of the asset

use lock_model::{Phase, Position};
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, RewardLedger, Role, Token};
use crate::error::{LockError, Result};
use crate::events::LockEvent;
use crate::locked_account::LockedAccount;

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Lock `amount` of the asset for `investor`, paid by `caller`.
    ///
    /// `reward_due` is the reward the controller issued for this deposit; it
    /// must be burned again on a success-phase unlock, so the investor must
    /// already hold the whole merged reward due. A repeat deposit merges
    /// into the existing position and never moves its unlock date later.
    ///
    /// Returns the investor's position after the deposit.
    pub fn lock(
        &mut self,
        caller: &Pubkey,
        investor: Pubkey,
        amount: u128,
        reward_due: u128,
        now: u64,
    ) -> Result<Position> {
        log::debug!("Lock: {} for {} ({} reward)", amount, investor, reward_due);
        self.authorize(caller, Role::Depositor)?;
        self.expect_phase(&[Phase::AcceptingLocks])?;
        if amount == 0 {
            return Err(LockError::ZeroAmount);
        }

        let unlock_at = now
            .checked_add(self.globals.lock_period)
            .ok_or(LockError::ArithmeticOverflow)?;
        let total_locked = self
            .globals
            .total_locked
            .checked_add(amount)
            .ok_or(LockError::ArithmeticOverflow)?;

        // the merged reward due must already be held by the investor
        let existing_due = self.registry.get(&investor).map_or(0, |p| p.reward_due);
        let required = existing_due
            .checked_add(reward_due)
            .ok_or(LockError::ArithmeticOverflow)?;
        let balance = self.reward.balance_of(&investor);
        if balance < required {
            log::debug!("Lock: reward due {} not backed (balance {})", required, balance);
            return Err(LockError::UnbackedReward { required, balance });
        }

        let address = self.address;
        let position = self.transact("Lock", |acc| {
            // Effects
            let upsert = acc.registry.upsert(investor, amount, reward_due, unlock_at)?;
            acc.globals.total_locked = total_locked;
            if upsert.is_created() {
                acc.globals.total_investors = acc
                    .globals
                    .total_investors
                    .checked_add(1)
                    .ok_or(LockError::ArithmeticOverflow)?;
            }
            acc.emit(LockEvent::LockRecorded { investor, amount, reward_due });

            // Interactions
            acc.asset.deposit(caller, &address, amount)?;
            Ok(upsert.position())
        })?;

        log::info!(
            "Lock: {} now holds {} until {}",
            investor,
            position.locked_amount,
            position.unlock_at
        );
        Ok(position)
    }
}
