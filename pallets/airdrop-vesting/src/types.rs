//! Value types shared by the ledger, the calculator and the admission guard.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{traits::ConstU32, BoundedVec};
use sp_runtime::RuntimeDebug;
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FIRST_AIRDROP_START_TIME, MAX_SCRIPT_LEN, SECOND_AIRDROP_START_TIME, THIRD_AIRDROP_START_TIME,
};

/// Token amount in base units.
pub type Balance = u128;

/// Length of an account or contract identity.
pub const SCRIPT_HASH_LEN: usize = 20;

/// A 20-byte script hash identifying an account or a contract.
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    RuntimeDebug,
    Serialize,
    Deserialize,
)]
pub struct ScriptHash(pub [u8; SCRIPT_HASH_LEN]);

impl ScriptHash {
    pub const fn new(bytes: [u8; SCRIPT_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SCRIPT_HASH_LEN]> for ScriptHash {
    fn from(bytes: [u8; SCRIPT_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

/// Returned when a byte string is not exactly [`SCRIPT_HASH_LEN`] bytes long.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub struct InvalidLength(pub usize);

impl TryFrom<&[u8]> for ScriptHash {
    type Error = InvalidLength;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; SCRIPT_HASH_LEN] = bytes.try_into().map_err(|_| InvalidLength(bytes.len()))?;
        Ok(Self(raw))
    }
}

/// One of the three sequential allocation cohorts.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    RuntimeDebug,
    Serialize,
    Deserialize,
)]
pub enum Phase {
    First,
    Second,
    Third,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::First, Phase::Second, Phase::Third];

    /// Epoch second at which this phase starts vesting.
    pub const fn start_time(self) -> u64 {
        match self {
            Phase::First => FIRST_AIRDROP_START_TIME,
            Phase::Second => SECOND_AIRDROP_START_TIME,
            Phase::Third => THIRD_AIRDROP_START_TIME,
        }
    }

    /// Storage prefix historically used for this phase's balances.
    pub const fn prefix(self) -> &'static [u8] {
        match self {
            Phase::First => b"firstPhase",
            Phase::Second => b"secondPhase",
            Phase::Third => b"thirdPhase",
        }
    }
}

/// Process-wide withdrawal gate.
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Encode,
    Decode,
    DecodeWithMemTracking,
    MaxEncodedLen,
    TypeInfo,
    RuntimeDebug,
    Serialize,
    Deserialize,
)]
pub enum SwitchState {
    #[default]
    Disabled,
    Enabled,
}

impl SwitchState {
    pub fn is_enabled(self) -> bool {
        matches!(self, SwitchState::Enabled)
    }
}

/// Requested switch position, as passed to `set_withdraw_switch`.
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum SwitchMode {
    On,
    Off,
}

impl SwitchMode {
    /// Only the literal `on` turns withdrawals on; anything else means off.
    pub fn parse(text: &[u8]) -> Self {
        if text == b"on" {
            SwitchMode::On
        } else {
            SwitchMode::Off
        }
    }
}

impl From<SwitchMode> for SwitchState {
    fn from(mode: SwitchMode) -> Self {
        match mode {
            SwitchMode::On => SwitchState::Enabled,
            SwitchMode::Off => SwitchState::Disabled,
        }
    }
}

/// Raw script bytes of an invocation transaction.
pub type Script = BoundedVec<u8, ConstU32<MAX_SCRIPT_LEN>>;

/// The host transaction that carries a `withdraw` request.
#[derive(Clone, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, RuntimeDebug)]
pub struct InvocationTransaction {
    /// Transaction type tag assigned by the host.
    pub tx_type: u8,
    pub script: Script,
}

impl InvocationTransaction {
    /// The account pushed as the call argument: byte 0 must be the 20-byte push
    /// opcode and bytes 1..21 the account itself.
    pub fn argument(&self) -> Option<ScriptHash> {
        match self.script.split_first() {
            Some((&crate::verification::PUSH_20_BYTES, rest)) if rest.len() >= SCRIPT_HASH_LEN => {
                ScriptHash::try_from(&rest[..SCRIPT_HASH_LEN]).ok()
            },
            _ => None,
        }
    }
}
