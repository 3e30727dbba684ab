//! # Airdrop Vesting Pallet
//!
//! Holds a fixed airdrop supply allocated across three sequential phases and
//! releases each allocation linearly over 730 days.
//!
//! - The administrator deploys the airdrop, deposits allocations and toggles
//!   the withdrawal switch.
//! - Anyone may submit an unsigned `withdraw` whose invocation script is the
//!   canonical self-call (see [`verification`]); the administrator may withdraw
//!   on any account's behalf.
//! - Tokens leave through [`Config::TokenMover`], from [`Config::ContractId`] to
//!   the account.
//!
//! The string operation surface used by legacy clients is exposed through
//! [`Pallet::invoke`].

#![cfg_attr(not(feature = "std"), no_std)]
// `Config::RuntimeEvent` and `#[pallet::getter]` are deprecated in FRAME but still used here
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::EnsureOrigin};
use frame_system::pallet_prelude::*;
use sp_std::prelude::*;

pub use pallet::*;

pub mod constants;
pub mod dispatch;
pub mod types;
pub mod verification;
pub mod vesting;
pub mod weights;

pub use dispatch::{Arg, Outcome};
pub use types::{Balance, InvocationTransaction, Phase, ScriptHash, SwitchMode, SwitchState};
pub use weights::WeightInfo;

use constants::{LOG_TARGET, TOTAL_AIRDROP_AMOUNT, TOTAL_AMOUNT_PER_PHASE, TRANSFER_SUCCESS};

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Moves tokens held by the airdrop contract.
///
/// Implementations report the token contract's raw status; only
/// [`TRANSFER_SUCCESS`] means the tokens moved.
pub trait TokenMover {
    fn transfer(from: &ScriptHash, to: &ScriptHash, amount: Balance) -> u128;
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::traits::UnixTime;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        /// Origin allowed to deploy, deposit and toggle withdrawals.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        /// Source of the current block time.
        type UnixTime: UnixTime;
        type TokenMover: TokenMover;
        /// The airdrop contract's own identity; tokens are paid out from it.
        #[pallet::constant]
        type ContractId: Get<ScriptHash>;
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Set once by `deploy`.
    #[pallet::storage]
    #[pallet::getter(fn is_deployed)]
    pub type Deployed<T> = StorageValue<_, bool, ValueQuery>;

    /// Total amount ever deposited. Never decremented.
    #[pallet::storage]
    #[pallet::getter(fn airdrop_supply)]
    pub type AirdropSupply<T> = StorageValue<_, Balance, ValueQuery>;

    /// Per-account balance keyed by the bare account, written by `deposit`
    /// and by the post-withdrawal decrement.
    #[pallet::storage]
    #[pallet::getter(fn airdrop_balance)]
    pub type AirdropBalances<T> =
        StorageMap<_, Blake2_128Concat, ScriptHash, Balance, ValueQuery>;

    /// Phase-scoped allocation read by the availability calculation.
    #[pallet::storage]
    #[pallet::getter(fn phase_balance)]
    pub type PhaseBalances<T> = StorageDoubleMap<
        _,
        Twox64Concat,
        Phase,
        Blake2_128Concat,
        ScriptHash,
        Balance,
        ValueQuery,
    >;

    /// Epoch seconds of the account's most recent successful withdrawal.
    #[pallet::storage]
    #[pallet::getter(fn last_withdraw_time)]
    pub type LastWithdrawTime<T> = StorageMap<_, Blake2_128Concat, ScriptHash, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn withdraw_switch)]
    pub type WithdrawSwitch<T> = StorageValue<_, SwitchState, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Airdrop initialised with an empty supply
        Deployed,
        /// Allocation credited to an account
        Deposited { account: ScriptHash, amount: Balance },
        /// Vested tokens paid out to an account
        Withdrew { account: ScriptHash, amount: Balance },
        /// Withdrawal switch changed
        WithdrawSwitchSet { state: SwitchState },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// `deploy` was already called.
        AlreadyDeployed,
        /// Deposit amount is zero or above the per-phase cap.
        InvalidAmount,
        /// Deposit would push the supply above the airdrop total.
        SupplyExceeded,
        /// Withdrawals are switched off.
        WithdrawDisabled,
        /// Nothing has unlocked for the account.
        NothingToWithdraw,
        /// The invocation script does not carry a 20-byte account argument.
        MalformedInvocation,
        /// The invocation is not the canonical self-withdraw script.
        InvalidInvocation,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::deploy())]
        pub fn deploy(origin: OriginFor<T>) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_deploy()
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::deposit())]
        pub fn deposit(
            origin: OriginFor<T>,
            account: ScriptHash,
            #[pallet::compact] amount: Balance,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_deposit(&account, amount)
        }

        /// Pays out everything unlocked for the account pushed by the
        /// invocation script.
        ///
        /// Unsigned submissions must carry the canonical self-withdraw script;
        /// the admin origin skips that check.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::withdraw())]
        pub fn withdraw(origin: OriginFor<T>, transaction: InvocationTransaction) -> DispatchResult {
            match T::AdminOrigin::try_origin(origin) {
                Ok(_) => {},
                Err(origin) => {
                    ensure_none(origin)?;
                    Self::check_invocation(&transaction)?;
                },
            }
            let account = transaction.argument().ok_or(Error::<T>::MalformedInvocation)?;
            Self::do_withdraw(&account)
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_withdraw_switch())]
        pub fn set_withdraw_switch(origin: OriginFor<T>, mode: SwitchMode) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::do_set_withdraw_switch(mode);
            Ok(())
        }
    }

    #[pallet::validate_unsigned]
    impl<T: Config> ValidateUnsigned for Pallet<T> {
        type Call = Call<T>;

        fn validate_unsigned(_source: TransactionSource, call: &Self::Call) -> TransactionValidity {
            let Call::withdraw { transaction } = call else {
                return InvalidTransaction::Call.into();
            };

            if let Err(reason) = verification::check_transaction(transaction, &T::ContractId::get()) {
                log::warn!(target: LOG_TARGET, "Rejected withdraw invocation: {reason:?}");
                return InvalidTransaction::BadProof.into();
            }
            let account = transaction.argument().ok_or(InvalidTransaction::Call)?;

            // Only claims that would pay out right now enter the pool.
            if !WithdrawSwitch::<T>::get().is_enabled() || Self::total_available_amount(&account) < 1 {
                return InvalidTransaction::Call.into();
            }

            ValidTransaction::with_tag_prefix("AirdropVestingWithdraw")
                .priority(TransactionPriority::MAX / 2)
                .and_provides(account)
                .longevity(5)
                .propagate(true)
                .build()
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Start already deployed, with an empty supply
        pub deployed: bool,
        /// Initial withdrawal switch position
        pub withdraw_switch: SwitchState,
        /// Phase-scoped allocations (phase, account, amount)
        pub phase_balances: Vec<(Phase, ScriptHash, Balance)>,
        #[serde(skip)]
        pub _config: sp_std::marker::PhantomData<T>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            if self.deployed {
                Deployed::<T>::put(true);
                AirdropSupply::<T>::put(0);
            }

            WithdrawSwitch::<T>::put(self.withdraw_switch);

            for (phase, account, amount) in &self.phase_balances {
                PhaseBalances::<T>::mutate(phase, account, |balance| {
                    *balance = balance.saturating_add(*amount)
                });
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Current block time in whole epoch seconds.
    pub fn now() -> u64 {
        use frame_support::traits::UnixTime;
        T::UnixTime::now().as_secs()
    }

    /// Amount unlocked for `account` under `phase` right now.
    pub fn available_amount(account: &ScriptHash, phase: Phase) -> Balance {
        vesting::available_amount(
            PhaseBalances::<T>::get(phase, account),
            phase,
            Self::now(),
            LastWithdrawTime::<T>::get(account),
        )
    }

    /// Sum of [`Self::available_amount`] over all three phases.
    pub fn total_available_amount(account: &ScriptHash) -> Balance {
        Phase::ALL
            .iter()
            .fold(0, |total, phase| total.saturating_add(Self::available_amount(account, *phase)))
    }

    /// Verification-phase admission: the admin origin always passes, anything
    /// else must present the canonical self-withdraw script.
    pub fn verify(origin: OriginFor<T>, transaction: &InvocationTransaction) -> bool {
        if T::AdminOrigin::try_origin(origin).is_ok() {
            return true;
        }
        Self::check_invocation(transaction).is_ok()
    }

    fn check_invocation(transaction: &InvocationTransaction) -> DispatchResult {
        verification::check_transaction(transaction, &T::ContractId::get()).map_err(|reason| {
            log::warn!(target: LOG_TARGET, "Rejected withdraw invocation: {reason:?}");
            Error::<T>::InvalidInvocation.into()
        })
    }

    pub(crate) fn do_deploy() -> DispatchResult {
        ensure!(!Deployed::<T>::get(), Error::<T>::AlreadyDeployed);

        Deployed::<T>::put(true);
        AirdropSupply::<T>::put(0);
        WithdrawSwitch::<T>::put(SwitchState::Disabled);

        log::info!(target: LOG_TARGET, "Airdrop deployed");
        Self::deposit_event(Event::Deployed);
        Ok(())
    }

    pub(crate) fn do_deposit(account: &ScriptHash, amount: Balance) -> DispatchResult {
        ensure!(amount > 0 && amount <= TOTAL_AMOUNT_PER_PHASE, Error::<T>::InvalidAmount);

        let supply = AirdropSupply::<T>::get()
            .checked_add(amount)
            .filter(|supply| *supply <= TOTAL_AIRDROP_AMOUNT)
            .ok_or(Error::<T>::SupplyExceeded)?;

        AirdropBalances::<T>::mutate(account, |balance| *balance = balance.saturating_add(amount));
        AirdropSupply::<T>::put(supply);

        Self::deposit_event(Event::Deposited { account: *account, amount });
        Ok(())
    }

    /// Application-phase withdrawal. Admission is the caller's concern.
    pub(crate) fn do_withdraw(account: &ScriptHash) -> DispatchResult {
        ensure!(WithdrawSwitch::<T>::get().is_enabled(), Error::<T>::WithdrawDisabled);

        let unlocked = Phase::ALL.map(|phase| (phase, Self::available_amount(account, phase)));
        let total = unlocked.iter().fold(0 as Balance, |sum, (_, amount)| sum.saturating_add(*amount));
        ensure!(total >= 1, Error::<T>::NothingToWithdraw);

        let status = T::TokenMover::transfer(&T::ContractId::get(), account, total);
        if status != TRANSFER_SUCCESS {
            // Reported as success to the caller; nothing has been written yet.
            log::warn!(
                target: LOG_TARGET,
                "Token transfer of {total} to {account:?} failed with status {status}"
            );
            return Ok(());
        }

        // The remaining balance is recomputed from the phase-scoped entry but
        // stored under the bare account key.
        for (phase, amount) in unlocked {
            if amount > 0 {
                let balance = PhaseBalances::<T>::get(phase, account);
                AirdropBalances::<T>::insert(account, balance.saturating_sub(amount));
            }
        }

        let now = Self::now();
        LastWithdrawTime::<T>::insert(account, now);

        log::info!(target: LOG_TARGET, "Withdrew {total} for {account:?} at {now}");
        Self::deposit_event(Event::Withdrew { account: *account, amount: total });
        Ok(())
    }

    pub(crate) fn do_set_withdraw_switch(mode: SwitchMode) {
        let state = SwitchState::from(mode);
        WithdrawSwitch::<T>::put(state);

        log::info!(target: LOG_TARGET, "Withdraw switch set to {state:?}");
        Self::deposit_event(Event::WithdrawSwitchSet { state });
    }

    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        ensure!(
            AirdropSupply::<T>::get() <= TOTAL_AIRDROP_AMOUNT,
            "airdrop supply exceeds the total airdrop amount"
        );
        Ok(())
    }
}
