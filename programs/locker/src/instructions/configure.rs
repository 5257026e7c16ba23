//! Administrative parameter changes

use lock_model::WHOLE_UNIT;
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, RewardLedger, Role};
use crate::error::{LockError, Result};
use crate::events::LockEvent;
use crate::locked_account::LockedAccount;

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Change the early-unlock penalty; applies to unlocks from now on
    pub fn set_penalty_fraction(&mut self, caller: &Pubkey, fraction: u128) -> Result<()> {
        self.authorize(caller, Role::ConfigAdmin)?;
        if fraction > WHOLE_UNIT {
            return Err(LockError::PenaltyFractionTooLarge(fraction));
        }

        self.globals.penalty_fraction = fraction;
        log::info!("Config: penalty fraction set to {}", fraction);
        self.emit(LockEvent::PenaltyFractionChanged { fraction });
        Ok(())
    }

    pub fn set_penalty_disbursal(&mut self, caller: &Pubkey, destination: Pubkey) -> Result<()> {
        self.authorize(caller, Role::ConfigAdmin)?;

        self.globals.penalty_disbursal = destination;
        log::info!("Config: penalty disbursal set to {}", destination);
        self.emit(LockEvent::PenaltyDisbursalChanged { destination });
        Ok(())
    }
}
