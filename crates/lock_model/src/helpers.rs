//! Invariant checking helpers

use crate::math::*;
use crate::state::*;

/// Sum of locked amounts over live positions
pub fn sum_locked(s: &State) -> u128 {
    s.investors
        .iter()
        .fold(0u128, |acc, i| add_u128(acc, i.position.locked_amount))
}

/// Number of live positions
pub fn live_positions(s: &State) -> u32 {
    s.investors
        .iter()
        .filter(|i| i.position.is_live())
        .fold(0u32, |acc, _| acc.saturating_add(1))
}

/// Custody above what investors are owed
pub fn surplus(s: &State) -> u128 {
    sub_u128(s.custody, s.total_locked)
}

/// Conservation:
/// - registry sum == total_locked <= custody
/// - no asset created or destroyed
/// - reward supply equals the sum of investor balances
pub fn conservation_ok(s: &State) -> bool {
    if sum_locked(s) != s.total_locked || s.custody < s.total_locked {
        return false;
    }

    let outside = s
        .investors
        .iter()
        .fold(0u128, |acc, i| add_u128(acc, i.asset_balance));
    let accounted = add_u128(add_u128(s.custody, outside), add_u128(s.disbursed, s.reclaimed));
    if accounted != s.asset_supply {
        return false;
    }

    let rewards = s
        .investors
        .iter()
        .fold(0u128, |acc, i| add_u128(acc, i.reward_balance));
    rewards == s.reward_supply
}

/// Every position is a proper live entry or a clean tombstone, and the
/// investor counter matches the live entries
pub fn registry_wellformed(s: &State) -> bool {
    s.investors.iter().all(|i| i.position.is_wellformed()) && live_positions(s) == s.total_investors
}

/// No live position claims more reward than its investor holds
pub fn rewards_backed(s: &State) -> bool {
    s.investors
        .iter()
        .filter(|i| i.position.is_live())
        .all(|i| i.position.reward_due <= i.reward_balance)
}

/// Positions identical between two states
pub fn positions_unchanged(before: &State, after: &State) -> bool {
    if before.investors.len() != after.investors.len() {
        return false;
    }
    before
        .investors
        .iter()
        .zip(after.investors.iter())
        .all(|(a, b)| a.position == b.position)
}

/// Custody, totals and every investor balance identical between two states
pub fn balances_unchanged(before: &State, after: &State) -> bool {
    if before.custody != after.custody
        || before.total_locked != after.total_locked
        || before.disbursed != after.disbursed
        || before.reclaimed != after.reclaimed
    {
        return false;
    }
    if before.investors.len() != after.investors.len() {
        return false;
    }
    before.investors.iter().zip(after.investors.iter()).all(|(a, b)| {
        a.position == b.position
            && a.asset_balance == b.asset_balance
            && a.reward_balance == b.reward_balance
    })
}

/// No unlock date moved later between two states
pub fn unlock_dates_never_extended(before: &State, after: &State) -> bool {
    if before.investors.len() != after.investors.len() {
        return false;
    }
    before.investors.iter().zip(after.investors.iter()).all(|(a, b)| {
        !a.position.is_live() || !b.position.is_live() || b.position.unlock_at <= a.position.unlock_at
    })
}
