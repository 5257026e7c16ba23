//! Outcome instructions - the controller's one-shot success or failure

use lock_model::Phase;
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, RewardLedger, Role};
use crate::error::Result;
use crate::locked_account::LockedAccount;

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Success: unlocks burn the reward and pay a penalty before the unlock date
    pub fn confirm_success(&mut self, caller: &Pubkey) -> Result<()> {
        self.conclude(caller, Phase::AcceptingUnlocks)
    }

    /// Failure: every investor may withdraw the full ticket, no burn, no penalty
    pub fn confirm_failure(&mut self, caller: &Pubkey) -> Result<()> {
        self.conclude(caller, Phase::ReleaseAll)
    }

    fn conclude(&mut self, caller: &Pubkey, to: Phase) -> Result<()> {
        log::debug!("Outcome: {} requests {:?}", caller, to);
        self.authorize(caller, Role::Controller)?;
        self.expect_phase(&[Phase::AcceptingLocks])?;

        self.set_phase(to);
        Ok(())
    }
}
