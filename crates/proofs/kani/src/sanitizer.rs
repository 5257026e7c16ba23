//! State space sanitizer - bounds values for Kani exploration

use lock_model::state::*;

pub const N_INVESTORS: usize = 3;
pub const MAX_STEPS: u8 = 4;

/// Bounds for tractable verification
const MAX_BALANCE: u128 = 1_000_000u128;
const MAX_REWARD: u128 = 1_000_000u128;
const MAX_LOCK_PERIOD: u64 = 1_000;
const MAX_FRACTION: u128 = WHOLE_UNIT;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for State {
    /// Clamps wallets and params only; positions and totals are left alone
    /// so a consistent state stays consistent.
    fn sanitize(mut self) -> State {
        while self.investors.len() > N_INVESTORS {
            self.investors.pop();
        }

        let mut supply = self.custody.saturating_add(self.disbursed).saturating_add(self.reclaimed);
        let mut rewards = 0u128;
        for i in self.investors.iter_mut() {
            if i.asset_balance > MAX_BALANCE {
                i.asset_balance %= MAX_BALANCE;
            }
            if i.reward_allowance > MAX_REWARD {
                i.reward_allowance %= MAX_REWARD;
            }
            supply = supply.saturating_add(i.asset_balance);
            rewards = rewards.saturating_add(i.reward_balance);
        }
        self.asset_supply = supply;
        self.reward_supply = rewards;

        if self.params.lock_period == 0 || self.params.lock_period > MAX_LOCK_PERIOD {
            self.params.lock_period = (self.params.lock_period % MAX_LOCK_PERIOD) + 1;
        }
        if self.params.penalty_fraction > MAX_FRACTION {
            self.params.penalty_fraction %= MAX_FRACTION + 1;
        }

        self
    }
}
