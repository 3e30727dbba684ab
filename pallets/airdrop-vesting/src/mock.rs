use crate as pallet_airdrop_vesting;
use crate::{constants::FIRST_AIRDROP_START_TIME, Balance, Phase, ScriptHash, TokenMover};
use core::time::Duration;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64, UnixTime},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        AirdropVesting: pallet_airdrop_vesting,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

pub const CONTRACT: ScriptHash = ScriptHash([0xc0; 20]);
pub const ALICE: ScriptHash = ScriptHash([0xa1; 20]);
pub const BOB: ScriptHash = ScriptHash([0xb0; 20]);
pub const CHARLIE: ScriptHash = ScriptHash([0xc4; 20]);

pub const DAY: u64 = crate::constants::SECONDS_PER_DAY;

parameter_types! {
    pub const AdminAccount: u64 = 1;
    pub const ContractId: ScriptHash = CONTRACT;
    /// Block time, in epoch seconds, reported to the pallet.
    pub static Now: u64 = FIRST_AIRDROP_START_TIME;
    /// Status the mock token contract answers with.
    pub static TransferStatus: u128 = crate::constants::TRANSFER_SUCCESS;
    /// Every transfer attempted, successful or not.
    pub static Transfers: Vec<(ScriptHash, ScriptHash, Balance)> = Vec::new();
}

pub struct EnsureAdmin;
impl frame_support::traits::EnsureOrigin<RuntimeOrigin> for EnsureAdmin {
    type Success = u64;

    fn try_origin(o: RuntimeOrigin) -> Result<Self::Success, RuntimeOrigin> {
        match o.clone().into() {
            Ok(frame_system::RawOrigin::Signed(account)) if account == AdminAccount::get() => {
                Ok(account)
            },
            _ => Err(o),
        }
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn try_successful_origin() -> Result<RuntimeOrigin, ()> {
        Ok(RuntimeOrigin::signed(AdminAccount::get()))
    }
}

pub struct MockTime;
impl UnixTime for MockTime {
    fn now() -> Duration {
        Duration::from_secs(Now::get())
    }
}

pub struct MockTokenMover;
impl TokenMover for MockTokenMover {
    fn transfer(from: &ScriptHash, to: &ScriptHash, amount: Balance) -> u128 {
        let mut transfers = Transfers::get();
        transfers.push((*from, *to, amount));
        Transfers::set(transfers);
        TransferStatus::get()
    }
}

impl pallet_airdrop_vesting::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type AdminOrigin = EnsureAdmin;
    type UnixTime = MockTime;
    type TokenMover = MockTokenMover;
    type ContractId = ContractId;
    type WeightInfo = ();
}

/// Alice holds an allocation in every phase, Bob only in the second.
pub fn seeded_phase_balances() -> Vec<(Phase, ScriptHash, Balance)> {
    vec![
        (Phase::First, ALICE, 730_000),
        (Phase::Second, ALICE, 1_460_000),
        (Phase::Third, ALICE, 2_190_000),
        (Phase::Second, BOB, 730_000),
    ]
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_airdrop_vesting::GenesisConfig::<Test> {
        deployed: false,
        withdraw_switch: Default::default(),
        phase_balances: seeded_phase_balances(),
        _config: Default::default(),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    Now::set(FIRST_AIRDROP_START_TIME);
    TransferStatus::set(crate::constants::TRANSFER_SUCCESS);
    Transfers::set(Vec::new());

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
