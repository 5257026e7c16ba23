//! Locked account: escrows one asset per investor until the controller's
//! outcome and the investor's unlock date release it
//!
//! Deposits come from the controller (or depositors it delegated) and carry
//! a reward issued elsewhere. After success an investor unlocks by burning
//! that reward, paying a penalty if still before the unlock date; after
//! failure everything is returned as deposited.

pub mod capabilities;
pub mod config;
pub mod error;
pub mod events;
pub mod instructions;
pub mod locked_account;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use capabilities::*;
pub use config::*;
pub use error::*;
pub use events::LockEvent;
pub use instructions::unlock::UnlockReceipt;
pub use instructions::ReclaimTarget;
pub use locked_account::*;
pub use state::*;

pub use lock_model::{Phase, Position, DEFAULT_LOCK_PERIOD_SECS, DEFAULT_PENALTY_FRACTION, WHOLE_UNIT};
