//! State transition functions - all total, no panics
//!
//! A transition whose preconditions fail returns the state unchanged, which
//! is the model of an aborted operation.

use crate::math::*;
use crate::penalty::*;
use crate::state::*;

/// Merge a deposit into an existing (possibly empty) position.
///
/// Amounts and reward dues add up; the earlier of the two dates wins so a
/// second deposit never extends vesting.
pub fn merge_position(existing: Position, amount: u128, reward: u128, proposed_unlock_at: u64) -> Position {
    if !existing.is_live() {
        return Position {
            locked_amount: amount,
            reward_due: reward,
            unlock_at: proposed_unlock_at,
        };
    }
    Position {
        locked_amount: add_u128(existing.locked_amount, amount),
        reward_due: add_u128(existing.reward_due, reward),
        unlock_at: min_u64(existing.unlock_at, proposed_unlock_at),
    }
}

/// Bind a controller (Uncontrolled -> AcceptingLocks)
pub fn bind_controller(mut s: State) -> State {
    if !s.authorized_caller {
        return s;
    }
    if s.phase != Phase::Uncontrolled {
        return s;
    }
    s.phase = Phase::AcceptingLocks;
    s
}

/// Controller issues `amount` reward units to investor `uid`
pub fn mint_reward(mut s: State, uid: usize, amount: u128) -> State {
    if uid >= s.investors.len() {
        return s;
    }
    s.investors[uid].reward_balance = add_u128(s.investors[uid].reward_balance, amount);
    s.reward_supply = add_u128(s.reward_supply, amount);
    s
}

/// Lock `amount` for investor `uid` with `reward` more due on a success unlock.
///
/// The investor must already hold the whole merged reward due.
pub fn lock(mut s: State, uid: usize, amount: u128, reward: u128, now: u64) -> State {
    if !s.authorized_caller {
        return s;
    }
    if !s.phase.accepts_locks() || uid >= s.investors.len() || amount == 0 {
        return s;
    }
    if s.investors[uid].asset_balance < amount {
        return s;
    }
    let proposed = now.saturating_add(s.params.lock_period);
    if proposed == 0 {
        return s;
    }

    let investor = &mut s.investors[uid];
    let merged = merge_position(investor.position, amount, reward, proposed);
    if investor.reward_balance < merged.reward_due {
        return s;
    }

    let is_new = !investor.position.is_live();
    investor.position = merged;
    investor.asset_balance = sub_u128(investor.asset_balance, amount);

    s.custody = add_u128(s.custody, amount);
    s.total_locked = add_u128(s.total_locked, amount);
    if is_new {
        s.total_investors = s.total_investors.saturating_add(1);
    }
    s
}

/// Controller confirms success (AcceptingLocks -> AcceptingUnlocks)
pub fn confirm_success(s: State) -> State {
    advance(s, Phase::AcceptingUnlocks)
}

/// Controller declares failure (AcceptingLocks -> ReleaseAll)
pub fn confirm_failure(s: State) -> State {
    advance(s, Phase::ReleaseAll)
}

fn advance(mut s: State, to: Phase) -> State {
    if !s.authorized_caller {
        return s;
    }
    if s.phase != Phase::AcceptingLocks {
        return s;
    }
    s.phase = to;
    s
}

/// Investor approves the account to burn `amount` reward units
pub fn approve_burn(mut s: State, uid: usize, amount: u128) -> State {
    if uid >= s.investors.len() {
        return s;
    }
    s.investors[uid].reward_allowance = amount;
    s
}

/// Unlock the whole position of investor `uid`
pub fn unlock(mut s: State, uid: usize, now: u64) -> State {
    if !s.phase.accepts_unlocks() || uid >= s.investors.len() {
        return s;
    }
    let position = s.investors[uid].position;
    if !position.is_live() {
        return s;
    }

    let burn = s.phase == Phase::AcceptingUnlocks;
    if burn {
        let investor = &s.investors[uid];
        if investor.reward_allowance < position.reward_due
            || investor.reward_balance < position.reward_due
        {
            return s;
        }
    }

    let (to_investor, penalty) = split_unlock(
        position.locked_amount,
        now,
        position.unlock_at,
        s.params.penalty_fraction,
        s.phase,
    );

    let investor = &mut s.investors[uid];
    if burn {
        investor.reward_balance = sub_u128(investor.reward_balance, position.reward_due);
        investor.reward_allowance = sub_u128(investor.reward_allowance, position.reward_due);
        s.reward_supply = sub_u128(s.reward_supply, position.reward_due);
    }
    investor.asset_balance = add_u128(investor.asset_balance, to_investor);
    investor.position = Position::EMPTY;

    s.disbursed = add_u128(s.disbursed, penalty);
    s.custody = sub_u128(s.custody, position.locked_amount);
    s.total_locked = sub_u128(s.total_locked, position.locked_amount);
    s.total_investors = s.total_investors.saturating_sub(1);
    s
}

/// Investor sends asset straight to the account's address (not a lock)
pub fn stray_transfer(mut s: State, uid: usize, amount: u128) -> State {
    if uid >= s.investors.len() || s.investors[uid].asset_balance < amount {
        return s;
    }
    s.investors[uid].asset_balance = sub_u128(s.investors[uid].asset_balance, amount);
    s.custody = add_u128(s.custody, amount);
    s
}

/// Move the custody surplus above the locked total out of the account
pub fn reclaim(mut s: State) -> State {
    if !s.authorized_caller {
        return s;
    }
    let surplus = sub_u128(s.custody, s.total_locked);
    s.custody = sub_u128(s.custody, surplus);
    s.reclaimed = add_u128(s.reclaimed, surplus);
    s
}

/// Administrative penalty change (applies to later unlocks only)
pub fn set_penalty_fraction(mut s: State, fraction: u128) -> State {
    if !s.authorized_caller || fraction > WHOLE_UNIT {
        return s;
    }
    s.params.penalty_fraction = fraction;
    s
}
