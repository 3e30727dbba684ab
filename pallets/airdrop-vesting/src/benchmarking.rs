//! Benchmarking setup for pallet-airdrop-vesting

use super::*;

#[allow(unused)]
use crate::Pallet as AirdropVesting;
use constants::INVOCATION_TRANSACTION_TYPE;
use frame_benchmarking::v2::*;

fn beneficiary() -> ScriptHash {
    ScriptHash([0x42; 20])
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn deploy() {
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin);

        assert!(Deployed::<T>::get());
    }

    #[benchmark]
    fn deposit() {
        let account = beneficiary();
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, account, TOTAL_AMOUNT_PER_PHASE);

        assert_eq!(AirdropBalances::<T>::get(account), TOTAL_AMOUNT_PER_PHASE);
    }

    // Worst case: an allocation in every phase.
    #[benchmark]
    fn withdraw() {
        let account = beneficiary();
        for phase in Phase::ALL {
            PhaseBalances::<T>::insert(phase, account, TOTAL_AMOUNT_PER_PHASE);
        }
        WithdrawSwitch::<T>::put(SwitchState::Enabled);

        let script = verification::canonical_withdraw_script(&account, &T::ContractId::get());
        let transaction = InvocationTransaction {
            tx_type: INVOCATION_TRANSACTION_TYPE,
            script: script.to_vec().try_into().expect("Canonical script fits"),
        };
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, transaction);
    }

    #[benchmark]
    fn set_withdraw_switch() {
        let origin = T::AdminOrigin::try_successful_origin().expect("Admin origin");

        #[extrinsic_call]
        _(origin as T::RuntimeOrigin, SwitchMode::On);

        assert_eq!(WithdrawSwitch::<T>::get(), SwitchState::Enabled);
    }

    impl_benchmark_test_suite!(AirdropVesting, crate::mock::new_test_ext(), crate::mock::Test);
}
