//! Adversarial step generator

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use lock_model::{state::*, transitions::*};

#[derive(Clone, Copy)]
pub enum Step {
    MintReward,
    Lock,
    ConfirmSuccess,
    ConfirmFailure,
    Approve,
    Unlock,
    StrayTransfer,
    Reclaim,
    SetPenalty,
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        let choice: u8 = any();
        match choice % 9 {
            0 => Step::MintReward,
            1 => Step::Lock,
            2 => Step::ConfirmSuccess,
            3 => Step::ConfirmFailure,
            4 => Step::Approve,
            5 => Step::Unlock,
            6 => Step::StrayTransfer,
            7 => Step::Reclaim,
            _ => Step::SetPenalty,
        }
    }
}

#[cfg(kani)]
pub fn adversary_step(s: State) -> State {
    if s.investors.is_empty() {
        return s;
    }

    let uid: usize = (any::<u8>() as usize) % s.investors.len();
    match any::<Step>() {
        Step::MintReward => {
            let r: u128 = (any::<u8>() as u128) % 100;
            mint_reward(s, uid, r)
        }
        Step::Lock => {
            let x: u128 = (any::<u8>() as u128) % 100;
            let r: u128 = (any::<u8>() as u128) % 100;
            let now: u64 = (any::<u8>() as u64) % 50;
            lock(s, uid, x, r, now)
        }
        Step::ConfirmSuccess => confirm_success(s),
        Step::ConfirmFailure => confirm_failure(s),
        Step::Approve => {
            let a: u128 = (any::<u8>() as u128) % 200;
            approve_burn(s, uid, a)
        }
        Step::Unlock => {
            let now: u64 = any::<u64>() % 100;
            unlock(s, uid, now)
        }
        Step::StrayTransfer => {
            let x: u128 = (any::<u8>() as u128) % 100;
            stray_transfer(s, uid, x)
        }
        Step::Reclaim => reclaim(s),
        Step::SetPenalty => {
            let f: u128 = (any::<u8>() as u128 % 11) * (WHOLE_UNIT / 10);
            set_penalty_fraction(s, f)
        }
    }
}
