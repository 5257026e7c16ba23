//! Whole-lifecycle scenarios for the locked account

use lockvault_integration_tests::*;
use lockvault_locker::testing::{key, Fixture, SimMigrationTarget};
use lockvault_locker::{
    CollaboratorError, LockError, LockEvent, LockSettings, Phase, Position, ReclaimTarget,
    RewardLedger, Role, Token, DEFAULT_LOCK_PERIOD_SECS, WHOLE_UNIT,
};

const DAY: u64 = 86_400;

/// Success path: one investor early, one on time, one after a penalty change
#[test]
fn test_success_lifecycle_with_mixed_unlocks() {
    init_logging();
    let mut fx = Fixture::controlled();
    let (controller, admin) = (fx.controller, fx.admin);
    let (alice, bob, carol) = (key(50), key(51), key(52));

    fx.now = 1_000;
    lock_all(
        &mut fx,
        &[(alice, units(3), 6_000), (bob, units(1), 2_000), (carol, units(2), 4_000)],
    );
    assert_eq!(fx.account.total_investors(), 3);
    assert_eq!(fx.account.total_locked_amount(), units(6));
    assert_conserved(&fx.account);

    fx.account.confirm_success(&controller).unwrap();

    // early: pays 10%
    fx.approve_burn(&alice, 6_000);
    let early = fx.account.unlock(&alice, 1_000 + DAY).unwrap();
    assert_eq!(early.penalty, units(3) / 10);
    assert_eq!(fx.account.asset().balance_of(&alice), units(3) - units(3) / 10);

    // on time: no penalty
    fx.approve_burn(&bob, 2_000);
    let on_time = fx.account.unlock(&bob, 1_000 + DEFAULT_LOCK_PERIOD_SECS).unwrap();
    assert_eq!(on_time.penalty, 0);
    assert_eq!(fx.account.asset().balance_of(&bob), units(1));

    assert_eq!(fx.account.asset().balance_of(&fx.disbursal), units(3) / 10);
    assert_eq!(fx.account.reward().total_supply(), 4_000);
    assert_eq!(fx.account.total_investors(), 1);
    assert_eq!(fx.account.total_locked_amount(), units(2));
    assert_eq!(fx.account.balance_of(&carol).locked_amount, units(2));
    assert_conserved(&fx.account);

    // admin changes the penalty; carol's later unlock uses the new value
    fx.account.set_penalty_fraction(&admin, WHOLE_UNIT / 4).unwrap();
    fx.approve_burn(&carol, 4_000);
    let late = fx.account.unlock(&carol, 1_000 + 2 * DAY).unwrap();
    assert_eq!(late.penalty, units(2) / 4);
    assert!(fx.account.registry().is_empty());
    assert_eq!(fx.account.asset().balance_of(&fx.account.address()), 0);
    assert_conserved(&fx.account);
}

/// Failure path: everyone gets the full ticket back and keeps the reward
#[test]
fn test_failure_releases_everything() {
    init_logging();
    let mut fx = Fixture::controlled();
    let controller = fx.controller;
    let tickets = [(key(50), units(5), 100), (key(51), 1, 0), (key(52), units(1) + 7, 3)];
    lock_all(&mut fx, &tickets);

    fx.account.confirm_failure(&controller).unwrap();
    assert_eq!(fx.account.phase(), Phase::ReleaseAll);

    for (investor, amount, reward) in tickets {
        let receipt = fx.account.unlock(&investor, fx.now).unwrap();
        assert_eq!(receipt.paid_out, amount);
        assert_eq!(receipt.penalty, 0);
        assert_eq!(fx.account.asset().balance_of(&investor), amount);
        assert_eq!(fx.account.reward().balance_of(&investor), reward);
    }
    assert_eq!(fx.account.total_locked_amount(), 0);
    assert_eq!(fx.account.asset().balance_of(&fx.disbursal), 0);
    assert_conserved(&fx.account);
}

/// Unlocked asset can be unwrapped by the investor straight away
#[test]
fn test_unlocked_asset_is_withdrawable() {
    let mut fx = Fixture::controlled();
    let (controller, investor) = (fx.controller, key(50));
    fx.lock(investor, units(2), 0);
    fx.account.confirm_failure(&controller).unwrap();
    fx.account.unlock(&investor, fx.now).unwrap();

    fx.account.asset_mut().withdraw(&investor, units(2)).unwrap();
    assert_eq!(fx.account.asset().balance_of(&investor), 0);
    assert_eq!(fx.account.asset().supply(), 0);
}

/// Deposits made at different times merge; the earliest unlock date wins
#[test]
fn test_repeat_deposits_never_extend_vesting() {
    let mut fx = Fixture::controlled();
    let investor = key(50);

    fx.now = 10 * DAY;
    let first = fx.lock(investor, units(1), 10);
    fx.now = 40 * DAY;
    let second = fx.lock(investor, units(1), 20);

    assert_eq!(second.unlock_at, first.unlock_at);
    assert_eq!(second.locked_amount, units(2));
    assert_eq!(second.reward_due, 30);
    assert_eq!(fx.account.total_investors(), 1);

    let recorded: Vec<_> = fx
        .account
        .events()
        .iter()
        .filter_map(|e| match e {
            LockEvent::LockRecorded { amount, reward_due, .. } => Some((*amount, *reward_due)),
            _ => None,
        })
        .collect();
    assert_eq!(recorded, vec![(units(1), 10), (units(1), 20)]);
}

/// A disbursal destination refusing the penalty aborts the whole unlock
#[test]
fn test_unlock_aborts_when_disbursal_rejects() {
    init_logging();
    let mut fx = Fixture::controlled();
    let (controller, investor) = (fx.controller, key(50));
    fx.lock(investor, units(1), 500);
    fx.account.confirm_success(&controller).unwrap();
    fx.approve_burn(&investor, 500);

    let disbursal = fx.disbursal;
    fx.account.asset_mut().reject_transfers_to(disbursal);
    let before = fx.account.snapshot();
    let events = fx.account.events().len();

    let result = fx.account.unlock(&investor, fx.now + 1);
    assert!(matches!(
        result,
        Err(LockError::CollaboratorFailure(CollaboratorError::Rejected(_)))
    ));
    assert_eq!(fx.account.snapshot(), before);
    assert_eq!(fx.account.events().len(), events);
    assert_eq!(fx.account.reward().balance_of(&investor), 500);

    // a new destination lets the same unlock through
    let admin = fx.admin;
    fx.account.set_penalty_disbursal(&admin, key(11)).unwrap();
    let receipt = fx.account.unlock(&investor, fx.now + 1).unwrap();
    assert_eq!(fx.account.asset().balance_of(&key(11)), receipt.penalty);
    assert_conserved(&fx.account);
}

/// The approve-and-call path unlocks in one step
#[test]
fn test_unlock_through_reward_ledger_callback() {
    let mut fx = Fixture::controlled();
    let (controller, investor) = (fx.controller, key(50));
    fx.lock(investor, units(1), 700);
    fx.account.confirm_success(&controller).unwrap();

    let ledger = fx.account.reward().id();
    fx.approve_burn(&investor, 1_000);
    let receipt = fx
        .account
        .receive_approval(&ledger, &investor, 1_000, fx.now + DEFAULT_LOCK_PERIOD_SECS)
        .unwrap();

    assert_eq!(receipt.paid_out, units(1));
    assert_eq!(receipt.reward_burned, 700);
    assert_eq!(
        fx.account.reward().allowance(&investor, &fx.account.address()),
        300
    );
    assert_conserved(&fx.account);
}

/// Stray transfers are reclaimable; locked funds never are
#[test]
fn test_reclaim_cycle() {
    let mut fx = Fixture::controlled();
    let (admin, address) = (fx.admin, fx.account.address());
    fx.lock(key(50), units(4), 0);

    fx.account.asset_mut().mint(&key(60), 99);
    fx.account.asset_mut().transfer(&key(60), &address, 99).unwrap();
    fx.account.reward_mut().mint(&address, 12);
    assert_eq!(surplus(&fx.account), 99);

    let moved = fx.account.reclaim(&admin, ReclaimTarget::Asset, &key(90)).unwrap();
    assert_eq!(moved, 99);
    assert_eq!(surplus(&fx.account), 0);
    assert_eq!(fx.account.reclaim(&admin, ReclaimTarget::Asset, &key(90)).unwrap(), 0);

    let rewards = fx.account.reclaim(&admin, ReclaimTarget::Reward, &key(90)).unwrap();
    assert_eq!(rewards, 12);

    // revoking the role stops further reclaims
    fx.account.gate_mut().revoke(&admin, Role::ReclaimAdmin);
    let denied = fx.account.reclaim(&admin, ReclaimTarget::Asset, &key(90));
    assert_eq!(denied, Err(LockError::Unauthorized { caller: admin, role: Role::ReclaimAdmin }));

    assert_eq!(fx.account.total_locked_amount(), units(4));
    assert_conserved(&fx.account);
}

/// Migration moves positions to the successor without burning rewards
#[test]
fn test_migration_to_successor() {
    init_logging();
    let mut fx = Fixture::controlled();
    let (admin, controller) = (fx.admin, fx.controller);
    let mut successor = SimMigrationTarget::new(key(120));
    fx.account.enable_migration(&admin, key(120)).unwrap();

    lock_all(&mut fx, &[(key(50), units(1), 5), (key(51), units(2), 9)]);
    fx.account.confirm_success(&controller).unwrap();

    fx.account.migrate(&key(50), &mut successor).unwrap();
    assert_eq!(fx.account.asset().balance_of(&key(120)), units(1));
    assert_eq!(successor.migrated().len(), 1);
    assert_eq!(fx.account.balance_of(&key(50)), Position::EMPTY);

    // the other investor can still unlock normally
    fx.approve_burn(&key(51), 9);
    fx.account.unlock(&key(51), fx.now + DEFAULT_LOCK_PERIOD_SECS).unwrap();

    assert!(fx.account.registry().is_empty());
    assert_eq!(fx.account.reward().balance_of(&key(50)), 5);
    assert_conserved(&fx.account);
}

/// Custom settings flow through from config to unlock dates
#[test]
fn test_custom_lock_period() {
    let settings = LockSettings {
        lock_period: 30 * DAY,
        penalty_fraction: 0,
        penalty_disbursal: key(12),
    };
    let mut fx = Fixture::with_settings(settings);
    let (admin, controller) = (fx.admin, fx.controller);
    fx.account.set_controller(&admin, controller).unwrap();

    fx.now = 5;
    let position = fx.lock(key(50), 100, 0);
    assert_eq!(position.unlock_at, 5 + 30 * DAY);

    fx.account.confirm_success(&controller).unwrap();
    let receipt = fx.account.unlock(&key(50), 6).unwrap();
    assert_eq!(receipt.penalty, 0);
    assert_eq!(receipt.paid_out, 100);
}

/// The event log serializes for off-line consumers
#[test]
fn test_event_log_serializes() {
    let mut fx = Fixture::controlled();
    let controller = fx.controller;
    fx.lock(key(50), 1_000, 0);
    fx.account.confirm_failure(&controller).unwrap();
    fx.account.unlock(&key(50), fx.now).unwrap();

    let json = serde_json::to_string(fx.account.events()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let tags: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();

    assert_eq!(
        tags,
        vec![
            "ControllerBound",
            "PhaseChanged",
            "LockRecorded",
            "PhaseChanged",
            "FundsUnlocked",
        ]
    );
}

/// Two investors unlocking early both pay, into the same destination
#[test]
fn test_two_investors_both_penalised() {
    let mut fx = Fixture::controlled();
    let controller = fx.controller;
    lock_all(&mut fx, &[(key(50), units(1), 10), (key(51), units(1) / 2, 20)]);
    fx.account.confirm_success(&controller).unwrap();

    fx.approve_burn(&key(50), 10);
    fx.approve_burn(&key(51), 20);
    fx.account.unlock(&key(50), fx.now + 1).unwrap();
    fx.account.unlock(&key(51), fx.now + 1).unwrap();

    let expected = units(1) / 10 + units(1) / 20;
    assert_eq!(fx.account.asset().balance_of(&fx.disbursal), expected);
    let disbursed: u128 = fx
        .account
        .events()
        .iter()
        .filter_map(|e| match e {
            LockEvent::PenaltyDisbursed { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum();
    assert_eq!(disbursed, expected);
    assert_eq!(fx.account.total_investors(), 0);
    assert_conserved(&fx.account);
}

/// Ten seconds before one investor's date is still early; the other, who
/// locked earlier, is already past theirs
#[test]
fn test_unlock_dates_are_per_investor() {
    let mut fx = Fixture::controlled();
    let controller = fx.controller;

    fx.now = 1_000;
    fx.lock(key(50), units(1), 0);
    fx.now = 1_000 + 20;
    let late = fx.lock(key(51), units(1), 0);
    fx.account.confirm_success(&controller).unwrap();

    let when = late.unlock_at - 10;
    let first = fx.account.unlock(&key(50), when).unwrap();
    let second = fx.account.unlock(&key(51), when).unwrap();

    assert_eq!(first.penalty, 0);
    assert_eq!(second.penalty, units(1) / 10);
    assert_eq!(fx.account.asset().balance_of(&key(50)), units(1));
    assert_eq!(fx.account.asset().balance_of(&key(51)), units(1) - units(1) / 10);
}
