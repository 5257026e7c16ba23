//! Controller binding and depositor delegation

use lock_model::Phase;
use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, RewardLedger, Role};
use crate::error::Result;
use crate::events::LockEvent;
use crate::locked_account::LockedAccount;

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Bind the controller and open the account for deposits.
    ///
    /// Only a config admin may do this, and only once.
    pub fn set_controller(&mut self, caller: &Pubkey, controller: Pubkey) -> Result<()> {
        log::debug!("SetController: {} binding {}", caller, controller);
        self.authorize(caller, Role::ConfigAdmin)?;
        self.expect_phase(&[Phase::Uncontrolled])?;

        self.globals.controller = Some(controller);
        self.emit(LockEvent::ControllerBound { controller });
        self.set_phase(Phase::AcceptingLocks);
        Ok(())
    }

    /// Let `depositor` record locks on the controller's behalf (or revoke it).
    ///
    /// Deciding the outcome stays with the controller.
    pub fn authorize_depositor(&mut self, caller: &Pubkey, depositor: Pubkey, allowed: bool) -> Result<()> {
        log::debug!("AuthorizeDepositor: {} allowed={}", depositor, allowed);
        self.authorize(caller, Role::Controller)?;
        self.expect_phase(&[Phase::AcceptingLocks])?;

        let changed = if allowed {
            self.globals.depositors.insert(depositor)
        } else {
            self.globals.depositors.remove(&depositor)
        };
        if changed {
            self.emit(LockEvent::DepositorAuthorized { depositor, allowed });
        }
        Ok(())
    }
}
