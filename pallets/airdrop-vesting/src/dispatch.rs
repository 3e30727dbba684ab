//! String operation router.
//!
//! Legacy clients address the airdrop as `(operation, [args])` and expect a
//! plain boolean or integer back. [`Pallet::invoke`] parses that surface,
//! applies the same access rules as the extrinsics and folds every failure
//! into `false` (or `0` for balance queries).
//!
//! Each invocation runs in its own storage layer which is committed only when
//! the outcome is a success, so a `false` never leaves partial writes or
//! events behind.
//!
//! `withdraw` here is the application phase only. The host is expected to
//! have admitted the surrounding transaction through [`Pallet::verify`].

use codec::{Decode, DecodeWithMemTracking, Encode};
use frame_support::{storage::with_transaction, traits::EnsureOrigin};
use sp_runtime::RuntimeDebug;
use frame_system::pallet_prelude::OriginFor;
use scale_info::TypeInfo;
use sp_runtime::{DispatchError, TransactionOutcome};
use sp_std::prelude::*;

use crate::{
    constants::LOG_TARGET,
    pallet::{AirdropBalances, AirdropSupply, Config, Pallet},
    types::{Balance, ScriptHash, SwitchMode},
};

/// A positional argument as supplied by the caller.
#[derive(Clone, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, RuntimeDebug)]
pub enum Arg {
    Bytes(Vec<u8>),
    Integer(i128),
    Text(Vec<u8>),
}

impl Arg {
    fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Arg::Bytes(bytes) | Arg::Text(bytes) => Some(bytes),
            Arg::Integer(_) => None,
        }
    }

    fn as_account(&self) -> Option<ScriptHash> {
        self.as_bytes().and_then(|bytes| ScriptHash::try_from(bytes).ok())
    }
}

/// Result handed back to the caller.
#[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, RuntimeDebug)]
pub enum Outcome {
    Bool(bool),
    Integer(Balance),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Bool(false))
    }
}

/// A parsed operation. Arguments are validated; access is not.
#[derive(Clone, PartialEq, Eq, RuntimeDebug)]
pub enum Operation {
    Deploy,
    Deposit { account: ScriptHash, amount: Balance },
    Withdraw { account: ScriptHash },
    QueryAirdropSupply,
    QueryAirdropBalance { account: Option<ScriptHash> },
    QueryAvailableBalance { account: Option<ScriptHash> },
    SetWithdrawSwitch { mode: SwitchMode },
}

impl Operation {
    /// `None` for unknown operations, wrong argument counts, malformed
    /// accounts on mutating operations and non-positive deposit amounts.
    ///
    /// Queries keep a malformed account as `None`; they answer `0` for it.
    pub fn parse(name: &str, args: &[Arg]) -> Option<Self> {
        match (name, args) {
            ("deploy", _) => Some(Operation::Deploy),
            ("deposit", [account, amount]) => {
                let account = account.as_account()?;
                let amount = match amount {
                    Arg::Integer(value) if *value > 0 => Balance::try_from(*value).ok()?,
                    _ => return None,
                };
                Some(Operation::Deposit { account, amount })
            },
            ("withdraw", [account]) => Some(Operation::Withdraw { account: account.as_account()? }),
            ("queryAirDropSupply", _) => Some(Operation::QueryAirdropSupply),
            ("queryAirDropBalance", [account]) =>
                Some(Operation::QueryAirdropBalance { account: account.as_account() }),
            ("queryAvailableBalance", [account]) =>
                Some(Operation::QueryAvailableBalance { account: account.as_account() }),
            ("setWithdrawSwitch", [mode]) => {
                let mode = mode.as_bytes().map(SwitchMode::parse).unwrap_or(SwitchMode::Off);
                Some(Operation::SetWithdrawSwitch { mode })
            },
            _ => None,
        }
    }

    fn requires_admin(&self) -> bool {
        matches!(
            self,
            Operation::Deploy | Operation::Deposit { .. } | Operation::SetWithdrawSwitch { .. }
        )
    }
}

impl<T: Config> Pallet<T> {
    /// Executes one named operation on behalf of `origin`.
    pub fn invoke(origin: OriginFor<T>, name: &str, args: &[Arg]) -> Outcome {
        let Some(operation) = Operation::parse(name, args) else {
            log::debug!(target: LOG_TARGET, "Rejected invocation of {name} with {} args", args.len());
            return Outcome::Bool(false);
        };

        if operation.requires_admin() && T::AdminOrigin::try_origin(origin).is_err() {
            log::debug!(target: LOG_TARGET, "Rejected {operation:?}: caller is not the administrator");
            return Outcome::Bool(false);
        }

        let result: Result<Outcome, DispatchError> = with_transaction(|| {
            let outcome = Self::execute(&operation);
            if outcome.is_success() {
                TransactionOutcome::Commit(Ok(outcome))
            } else {
                TransactionOutcome::Rollback(Ok(outcome))
            }
        });
        result.unwrap_or(Outcome::Bool(false))
    }

    fn execute(operation: &Operation) -> Outcome {
        let done = |result: Result<(), DispatchError>| {
            if let Err(error) = &result {
                log::debug!(target: LOG_TARGET, "{operation:?} failed: {error:?}");
            }
            Outcome::Bool(result.is_ok())
        };

        match operation {
            Operation::Deploy => done(Self::do_deploy()),
            Operation::Deposit { account, amount } => done(Self::do_deposit(account, *amount)),
            Operation::Withdraw { account } => done(Self::do_withdraw(account)),
            Operation::QueryAirdropSupply => Outcome::Integer(AirdropSupply::<T>::get()),
            Operation::QueryAirdropBalance { account } =>
                Outcome::Integer(account.map(|account| AirdropBalances::<T>::get(account)).unwrap_or_default()),
            Operation::QueryAvailableBalance { account } => Outcome::Integer(
                account.as_ref().map(Self::total_available_amount).unwrap_or_default(),
            ),
            Operation::SetWithdrawSwitch { mode } => {
                Self::do_set_withdraw_switch(*mode);
                Outcome::Bool(true)
            },
        }
    }
}
