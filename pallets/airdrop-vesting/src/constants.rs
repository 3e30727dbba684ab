//! Fixed parameters of the airdrop. These are part of the deployed contract and
//! never change at runtime.

use crate::types::Balance;

/// 2018-07-05 00:00:00 UTC. Nothing vests before this instant, for any phase.
pub const FIRST_AIRDROP_START_TIME: u64 = 1_530_720_000;

/// 2018-09-05 00:00:00 UTC.
pub const SECOND_AIRDROP_START_TIME: u64 = 1_536_076_800;

/// 2018-11-05 00:00:00 UTC.
pub const THIRD_AIRDROP_START_TIME: u64 = 1_541_347_200;

/// Upper bound for a single deposit.
pub const TOTAL_AMOUNT_PER_PHASE: Balance = 2_790_152_100_000_000;

/// Upper bound for `AirdropSupply`. Three phases' worth.
pub const TOTAL_AIRDROP_AMOUNT: Balance = 8_370_456_300_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Length of the linear unlock, in days.
pub const VESTING_PERIOD_DAYS: Balance = 730;

/// Transaction type tag of an invocation transaction.
pub const INVOCATION_TRANSACTION_TYPE: u8 = 0xd1;

/// Exact length of the canonical self-withdraw script.
pub const WITHDRAW_SCRIPT_LEN: usize = 53;

/// Upper bound accepted when decoding an invocation script.
pub const MAX_SCRIPT_LEN: u32 = 1024;

/// Status the token contract returns for a completed transfer.
pub const TRANSFER_SUCCESS: u128 = 1;

/// Log target shared by everything in this pallet.
pub const LOG_TARGET: &str = "pallet-airdrop-vesting";
