//! Reclaim instruction - move stray assets out of the account

use solana_program::pubkey::Pubkey;

use crate::capabilities::{AccessGate, AssetVault, RewardLedger, Role, Token};
use crate::error::{LockError, Result};
use crate::events::LockEvent;
use crate::locked_account::LockedAccount;

/// What to reclaim
pub enum ReclaimTarget<'a> {
    /// Custody surplus above the total locked amount
    Asset,
    /// Every reward unit held by the account
    Reward,
    /// Every unit of some unrelated token held by the account
    Foreign(&'a mut dyn Token),
}

impl<A, R, G> LockedAccount<A, R, G>
where
    A: AssetVault,
    R: RewardLedger,
    G: AccessGate,
{
    /// Send what the account holds of `target` beyond its obligations to
    /// `destination`. Returns the amount moved; reclaiming twice moves
    /// nothing the second time.
    pub fn reclaim(&mut self, caller: &Pubkey, target: ReclaimTarget<'_>, destination: &Pubkey) -> Result<u128> {
        log::debug!("Reclaim: {} to {}", caller, destination);
        self.authorize(caller, Role::ReclaimAdmin)?;
        let address = self.address;
        let destination = *destination;

        let (token, amount) = match target {
            ReclaimTarget::Asset => {
                let held = self.asset.balance_of(&address);
                let surplus = held.saturating_sub(self.globals.total_locked);
                let token = self.asset.id();
                if surplus > 0 {
                    self.transact("Reclaim", |acc| {
                        acc.emit(LockEvent::AssetReclaimed { token, destination, amount: surplus });
                        acc.asset.transfer(&address, &destination, surplus)?;
                        Ok(())
                    })?;
                }
                (token, surplus)
            }
            ReclaimTarget::Reward => {
                let held = self.reward.balance_of(&address);
                let token = self.reward.id();
                if held > 0 {
                    self.transact("Reclaim", |acc| {
                        acc.emit(LockEvent::AssetReclaimed { token, destination, amount: held });
                        acc.reward.transfer(&address, &destination, held)?;
                        Ok(())
                    })?;
                }
                (token, held)
            }
            ReclaimTarget::Foreign(foreign) => {
                let token = foreign.id();
                if token == self.asset.id() || token == self.reward.id() {
                    return Err(LockError::AliasedToken(token));
                }
                let held = foreign.balance_of(&address);
                if held > 0 {
                    foreign.transfer(&address, &destination, held)?;
                    self.emit(LockEvent::AssetReclaimed { token, destination, amount: held });
                }
                (token, held)
            }
        };

        log::info!("Reclaim: moved {} of {} to {}", amount, token, destination);
        Ok(amount)
    }
}
