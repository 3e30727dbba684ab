//! Linear unlock arithmetic.
//!
//! Everything here is a pure function of its inputs. The pallet feeds it the
//! stored phase balance, the account's last withdrawal time and the current
//! block time.

use crate::{
    constants::{FIRST_AIRDROP_START_TIME, SECONDS_PER_DAY, VESTING_PERIOD_DAYS},
    types::{Balance, Phase},
};

/// Whole days elapsed since `since`, counting the current day.
///
/// Signed and truncating toward zero, so an instant less than a day before
/// `since` still yields 1 and anything earlier yields zero or less.
pub fn hold_days(now: u64, since: u64) -> i64 {
    let elapsed = now as i128 - since as i128;
    (elapsed / SECONDS_PER_DAY as i128 + 1) as i64
}

/// `deposited * hold_days / 730`, truncated. Not capped at `deposited`.
pub fn unlocked(deposited: Balance, hold_days: i64) -> Balance {
    if hold_days < 1 {
        return 0;
    }
    deposited.saturating_mul(hold_days as Balance) / VESTING_PERIOD_DAYS
}

/// Amount of `deposited` that is withdrawable for `phase` at `now`.
///
/// `last_withdraw` is zero for an account that never withdrew. Any value after
/// the first phase start counts as "has withdrawn", whatever the phase.
pub fn available_amount(deposited: Balance, phase: Phase, now: u64, last_withdraw: u64) -> Balance {
    if deposited < 1 {
        return 0;
    }
    if now < FIRST_AIRDROP_START_TIME {
        return 0;
    }

    let since = if last_withdraw > FIRST_AIRDROP_START_TIME {
        last_withdraw
    } else {
        phase.start_time()
    };

    unlocked(deposited, hold_days(now, since))
}
