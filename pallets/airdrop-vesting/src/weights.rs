//! Weights for pallet-airdrop-vesting.
//!
//! Hand-estimated from the storage access pattern of each call until the
//! benchmarks in `benchmarking.rs` are run on reference hardware.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn deploy() -> Weight;
    fn deposit() -> Weight;
    fn withdraw() -> Weight;
    fn set_withdraw_switch() -> Weight;
}

/// Weights backed by the runtime's configured database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    /// Storage: `AirdropVesting::Deployed` (r:1 w:1)
    /// Storage: `AirdropVesting::AirdropSupply` (r:0 w:1)
    /// Storage: `AirdropVesting::WithdrawSwitch` (r:0 w:1)
    fn deploy() -> Weight {
        Weight::from_parts(9_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(1, 3))
    }
    /// Storage: `AirdropVesting::AirdropSupply` (r:1 w:1)
    /// Storage: `AirdropVesting::AirdropBalances` (r:1 w:1)
    fn deposit() -> Weight {
        Weight::from_parts(14_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(2, 2))
    }
    /// Storage: `AirdropVesting::WithdrawSwitch` (r:1 w:0)
    /// Storage: `AirdropVesting::PhaseBalances` (r:6 w:0)
    /// Storage: `AirdropVesting::LastWithdrawTime` (r:3 w:1)
    /// Storage: `AirdropVesting::AirdropBalances` (r:0 w:3)
    fn withdraw() -> Weight {
        Weight::from_parts(45_000_000, 0).saturating_add(T::DbWeight::get().reads_writes(10, 4))
    }
    /// Storage: `AirdropVesting::WithdrawSwitch` (r:0 w:1)
    fn set_withdraw_switch() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(T::DbWeight::get().writes(1))
    }
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    fn deploy() -> Weight {
        Weight::from_parts(9_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 3))
    }
    fn deposit() -> Weight {
        Weight::from_parts(14_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 2))
    }
    fn withdraw() -> Weight {
        Weight::from_parts(45_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(10, 4))
    }
    fn set_withdraw_switch() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().writes(1))
    }
}
