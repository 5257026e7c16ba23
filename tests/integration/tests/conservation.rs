//! Randomized operation sequences: whatever succeeds or fails, the account
//! never creates, loses or strands units

use lockvault_integration_tests::*;
use lockvault_locker::testing::{key, Fixture};
use lockvault_locker::{LockError, Phase, Position, ReclaimTarget, Token};
use proptest::test_runner::TestCaseError;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Lock { investor: u8, amount: u128, reward: u128 },
    /// Lock without issuing the reward first
    LockUnbacked { investor: u8, amount: u128, reward: u128 },
    Stray { amount: u128 },
    Advance { secs: u64 },
    Succeed,
    Fail,
    Approve { investor: u8, amount: u128 },
    Unlock { investor: u8 },
    SetPenalty { fraction: u128 },
    Reclaim,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let investor = 50u8..54;
    prop_oneof![
        4 => (investor.clone(), 0u128..10_000, 0u128..1_000)
            .prop_map(|(investor, amount, reward)| Op::Lock { investor, amount, reward }),
        1 => (investor.clone(), 0u128..10_000, 1u128..1_000)
            .prop_map(|(investor, amount, reward)| Op::LockUnbacked { investor, amount, reward }),
        1 => (1u128..500).prop_map(|amount| Op::Stray { amount }),
        2 => (0u64..40_000_000).prop_map(|secs| Op::Advance { secs }),
        1 => Just(Op::Succeed),
        1 => Just(Op::Fail),
        2 => (investor.clone(), 0u128..2_000)
            .prop_map(|(investor, amount)| Op::Approve { investor, amount }),
        3 => investor.prop_map(|investor| Op::Unlock { investor }),
        1 => (0u128..=lockvault_locker::WHOLE_UNIT).prop_map(|fraction| Op::SetPenalty { fraction }),
        1 => Just(Op::Reclaim),
    ]
}

fn apply(fx: &mut Fixture, op: &Op) -> Result<(), TestCaseError> {
    let (admin, controller) = (fx.admin, fx.controller);
    let address = fx.account.address();
    let _ = match *op {
        Op::Lock { investor, amount, reward } => {
            fx.account.asset_mut().mint(&controller, amount);
            fx.account.reward_mut().mint(&key(investor), reward);
            fx.account
                .lock(&controller, key(investor), amount, reward, fx.now)
                .map(|_| ())
        }
        Op::LockUnbacked { investor, amount, reward } => {
            let investor = key(investor);
            fx.account.asset_mut().mint(&controller, amount);
            let required = fx.account.balance_of(&investor).reward_due + reward;
            let balance = fx.account.reward().balance_of(&investor);
            let accepting = fx.account.phase() == Phase::AcceptingLocks;

            let result = fx.account.lock(&controller, investor, amount, reward, fx.now);
            if balance < required {
                prop_assert!(result.is_err());
                if accepting && amount > 0 {
                    prop_assert_eq!(
                        result.clone(),
                        Err(LockError::UnbackedReward { required, balance })
                    );
                }
            }
            result.map(|_| ())
        }
        Op::Stray { amount } => {
            fx.account.asset_mut().mint(&address, amount);
            Ok(())
        }
        Op::Advance { secs } => {
            fx.now = fx.now.saturating_add(secs);
            Ok(())
        }
        Op::Succeed => fx.account.confirm_success(&controller),
        Op::Fail => fx.account.confirm_failure(&controller),
        Op::Approve { investor, amount } => {
            fx.approve_burn(&key(investor), amount);
            Ok(())
        }
        Op::Unlock { investor } => fx.account.unlock(&key(investor), fx.now).map(|_| ()),
        Op::SetPenalty { fraction } => fx.account.set_penalty_fraction(&admin, fraction),
        Op::Reclaim => fx
            .account
            .reclaim(&admin, ReclaimTarget::Asset, &key(90))
            .map(|_| ()),
    };
    Ok(())
}

proptest! {
    #[test]
    fn test_conservation_under_random_ops(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut fx = Fixture::controlled();

        for op in &ops {
            let before_phase = fx.account.phase();
            let before_dates: Vec<(_, Position)> = fx
                .account
                .registry()
                .iter()
                .map(|(k, p)| (*k, *p))
                .collect();

            apply(&mut fx, op)?;
            assert_conserved(&fx.account);

            // outcome is one-shot
            if before_phase.is_terminal() {
                prop_assert_eq!(fx.account.phase(), before_phase);
            }
            // no unlock date ever moves later
            for (investor, before) in before_dates {
                if let Some(after) = fx.account.registry().get(&investor) {
                    prop_assert!(after.unlock_at <= before.unlock_at);
                }
            }
        }

        // after failure every remaining position can always be released in full
        let controller = fx.controller;
        if fx.account.phase() == Phase::AcceptingLocks {
            fx.account.confirm_failure(&controller).unwrap();
        }
        if fx.account.phase() == Phase::ReleaseAll {
            let investors: Vec<_> = fx.account.registry().iter().map(|(k, _)| *k).collect();
            for investor in investors {
                let owed = fx.account.balance_of(&investor).locked_amount;
                let held = fx.account.asset().balance_of(&investor);
                let receipt = fx.account.unlock(&investor, fx.now).unwrap();
                prop_assert_eq!(receipt.paid_out, owed);
                prop_assert_eq!(fx.account.asset().balance_of(&investor), held + owed);
            }
            prop_assert_eq!(fx.account.total_locked_amount(), 0);
            assert_conserved(&fx.account);
        }
    }
}
