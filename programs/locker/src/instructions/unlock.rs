//! Unlock instructions - release a whole position back to its investor

use lock_model::penalty::split_unlock;
use lock_model::{Phase, Position};
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, RewardLedger, Role, Token};
use crate::error::{LockError, Result};
use crate::events::LockEvent;
use crate::locked_account::LockedAccount;

/// Asset movements of a completed unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnlockReceipt {
    /// Asset paid to the investor
    pub paid_out: u128,
    /// Asset sent to the penalty disbursal destination
    pub penalty: u128,
    /// Reward units burned
    pub reward_burned: u128,
}

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Release the whole position of `investor` (the caller).
    ///
    /// After success the investor must have approved this account to burn the
    /// full reward due and still hold it; unlocking before the unlock date
    /// sends the penalty to the disbursal destination. After failure the full
    /// ticket is returned and no reward is touched.
    pub fn unlock(&mut self, investor: &Pubkey, now: u64) -> Result<UnlockReceipt> {
        log::debug!("Unlock: {} at {}", investor, now);
        let phase = self.expect_phase(&[Phase::AcceptingUnlocks, Phase::ReleaseAll])?;
        let position = self.position_of(investor)?;

        if phase == Phase::AcceptingUnlocks {
            let allowance = self.reward.allowance(investor, &self.address);
            self.check_burn_authorization(investor, position.reward_due, allowance)?;
        }
        self.settle(*investor, position, phase, now)
    }

    /// Approve-and-call entry point, invoked by the reward ledger right after
    /// `from` approved `approved` units to this account.
    ///
    /// Behaves like [`unlock`](Self::unlock) for `from`; an approval above the
    /// reward due leaves the excess allowance in place.
    pub fn receive_approval(
        &mut self,
        token: &Pubkey,
        from: &Pubkey,
        approved: u128,
        now: u64,
    ) -> Result<UnlockReceipt> {
        log::debug!("ReceiveApproval: {} approved {} via {}", from, approved, token);
        self.authorize(token, Role::RewardLedger)?;
        let phase = self.expect_phase(&[Phase::AcceptingUnlocks, Phase::ReleaseAll])?;
        let position = self.position_of(from)?;

        if phase == Phase::AcceptingUnlocks {
            let allowance = approved.min(self.reward.allowance(from, &self.address));
            self.check_burn_authorization(from, position.reward_due, allowance)?;
        }
        self.settle(*from, position, phase, now)
    }

    fn check_burn_authorization(&self, investor: &Pubkey, required: u128, allowance: u128) -> Result<()> {
        let balance = self.reward.balance_of(investor);
        if allowance < required || balance < required {
            log::debug!(
                "Unlock: burn of {} not authorized (allowance {}, balance {})",
                required,
                allowance,
                balance
            );
            return Err(LockError::InsufficientAuthorization { required, allowance, balance });
        }
        Ok(())
    }

    fn settle(&mut self, investor: Pubkey, position: Position, phase: Phase, now: u64) -> Result<UnlockReceipt> {
        let (paid_out, penalty) = split_unlock(
            position.locked_amount,
            now,
            position.unlock_at,
            self.globals.penalty_fraction,
            phase,
        );
        let reward_burned = match phase {
            Phase::AcceptingUnlocks => position.reward_due,
            _ => 0,
        };
        let destination = self.globals.penalty_disbursal;
        let address = self.address;

        let receipt = self.transact("Unlock", |acc| {
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
            if reward_burned > 0 {
                acc.emit(LockEvent::RewardBurned {
                    investor,
                    asset_amount: position.locked_amount,
                    reward_amount: reward_burned,
                });
            }
            if penalty > 0 {
                acc.emit(LockEvent::PenaltyDisbursed { investor, amount: penalty, destination });
            }
            acc.emit(LockEvent::FundsUnlocked { investor, amount: paid_out });

            // Interactions
            if reward_burned > 0 {
                acc.reward.burn_from(&address, &investor, reward_burned)?;
            }
            if penalty > 0 {
                acc.asset.transfer(&address, &destination, penalty)?;
            }
            if paid_out > 0 {
                acc.asset.transfer(&address, &investor, paid_out)?;
            }
            Ok(UnlockReceipt { paid_out, penalty, reward_burned })
        })?;

        log::info!(
            "Unlock: {} received {} (penalty {}, burned {})",
            investor,
            receipt.paid_out,
            receipt.penalty,
            receipt.reward_burned
        );
        Ok(receipt)
    }
}

#[cfg(test)]
#[path = "unlock_test.rs"]
mod unlock_test;
