//! Admission guard for unprivileged `withdraw` transactions.
//!
//! The only script an unprivileged sender may submit is the canonical
//! self-invocation:
//!
//! ```text
//! offset  0       1..21      21..24        24..32      32    33..53
//!         0x14    <account>  51 C1 09      "withdraw"  0x67  <contract>
//!         push20  argument   pack/push     operation   call  own identity
//! ```
//!
//! The account argument is free; every other byte is fixed by the contract's
//! identity. Matching is done byte by byte against a template built once per
//! check so a rejection can name the first offending offset.

use crate::{
    constants::{INVOCATION_TRANSACTION_TYPE, WITHDRAW_SCRIPT_LEN},
    types::{InvocationTransaction, ScriptHash, SCRIPT_HASH_LEN},
};

/// Opcode pushing the next 20 bytes.
pub const PUSH_20_BYTES: u8 = 0x14;

/// Offset at which the fixed call template starts.
pub const TEMPLATE_OFFSET: usize = 1 + SCRIPT_HASH_LEN;

const PACK_PREFIX: [u8; 3] = [0x51, 0xc1, 0x09];
const OPERATION: &[u8; 8] = b"withdraw";
const APP_CALL: u8 = 0x67;

const TEMPLATE_LEN: usize = PACK_PREFIX.len() + OPERATION.len() + 1 + SCRIPT_HASH_LEN;

/// Why a transaction was refused admission.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeError {
    /// Not an invocation transaction.
    TransactionType(u8),
    /// Script is not exactly [`WITHDRAW_SCRIPT_LEN`] bytes.
    ScriptLength(usize),
    /// Byte 0 is not the 20-byte push.
    ArgumentPush(u8),
    /// The call template differs at this script offset.
    TemplateMismatch { offset: usize },
}

/// The fixed tail of the canonical withdraw script for one contract.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WithdrawTemplate([u8; TEMPLATE_LEN]);

impl WithdrawTemplate {
    pub fn new(contract: &ScriptHash) -> Self {
        let mut bytes = [0u8; TEMPLATE_LEN];
        let (prefix, rest) = bytes.split_at_mut(PACK_PREFIX.len());
        prefix.copy_from_slice(&PACK_PREFIX);
        let (operation, rest) = rest.split_at_mut(OPERATION.len());
        operation.copy_from_slice(OPERATION);
        rest[0] = APP_CALL;
        rest[1..].copy_from_slice(contract.as_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// First script offset whose byte differs from the template, if any.
    fn first_mismatch(&self, tail: &[u8]) -> Option<usize> {
        self.0
            .iter()
            .zip(tail)
            .position(|(expected, actual)| expected != actual)
            .map(|index| TEMPLATE_OFFSET + index)
    }
}

/// Checks a raw script against the canonical withdraw shape.
pub fn check_withdraw_script(script: &[u8], contract: &ScriptHash) -> Result<(), ShapeError> {
    if script.len() != WITHDRAW_SCRIPT_LEN {
        return Err(ShapeError::ScriptLength(script.len()));
    }
    if script[0] != PUSH_20_BYTES {
        return Err(ShapeError::ArgumentPush(script[0]));
    }
    match WithdrawTemplate::new(contract).first_mismatch(&script[TEMPLATE_OFFSET..]) {
        Some(offset) => Err(ShapeError::TemplateMismatch { offset }),
        None => Ok(()),
    }
}

/// Checks the transaction type tag, then the script.
pub fn check_transaction(tx: &InvocationTransaction, contract: &ScriptHash) -> Result<(), ShapeError> {
    if tx.tx_type != INVOCATION_TRANSACTION_TYPE {
        return Err(ShapeError::TransactionType(tx.tx_type));
    }
    check_withdraw_script(&tx.script, contract)
}

/// Builds the one script an unprivileged sender may use to withdraw for `account`.
pub fn canonical_withdraw_script(
    account: &ScriptHash,
    contract: &ScriptHash,
) -> [u8; WITHDRAW_SCRIPT_LEN] {
    let mut script = [0u8; WITHDRAW_SCRIPT_LEN];
    script[0] = PUSH_20_BYTES;
    script[1..TEMPLATE_OFFSET].copy_from_slice(account.as_bytes());
    script[TEMPLATE_OFFSET..].copy_from_slice(WithdrawTemplate::new(contract).as_bytes());
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Script;

    const CONTRACT: ScriptHash = ScriptHash([0xc0; 20]);
    const ACCOUNT: ScriptHash = ScriptHash([0x0a; 20]);

    fn invocation(script: &[u8]) -> InvocationTransaction {
        InvocationTransaction {
            tx_type: INVOCATION_TRANSACTION_TYPE,
            script: Script::try_from(script.to_vec()).unwrap(),
        }
    }

    #[test]
    fn template_matches_literal_byte_table() {
        let mut expected = vec![0x51, 0xc1, 0x09];
        expected.extend_from_slice(b"withdraw");
        expected.push(0x67);
        expected.extend_from_slice(&[0xc0; 20]);
        assert_eq!(WithdrawTemplate::new(&CONTRACT).as_bytes(), &expected[..]);
    }

    #[test]
    fn canonical_script_is_accepted() {
        let script = canonical_withdraw_script(&ACCOUNT, &CONTRACT);
        assert_eq!(script.len(), 53);
        assert_eq!(script[0], 0x14);
        assert_eq!(&script[1..21], ACCOUNT.as_bytes());
        assert_eq!(check_withdraw_script(&script, &CONTRACT), Ok(()));
        assert_eq!(check_transaction(&invocation(&script), &CONTRACT), Ok(()));
    }

    #[test]
    fn any_account_argument_is_accepted() {
        for fill in [0x00, 0x14, 0xff] {
            let script = canonical_withdraw_script(&ScriptHash([fill; 20]), &CONTRACT);
            assert_eq!(check_withdraw_script(&script, &CONTRACT), Ok(()));
        }
    }

    #[test]
    fn every_single_byte_mutation_of_the_fixed_pattern_is_rejected() {
        let script = canonical_withdraw_script(&ACCOUNT, &CONTRACT);
        let fixed_offsets = core::iter::once(0).chain(TEMPLATE_OFFSET..WITHDRAW_SCRIPT_LEN);
        for offset in fixed_offsets {
            for delta in [1u8, 0x80, 0xff] {
                let mut mutated = script;
                mutated[offset] = mutated[offset].wrapping_add(delta);
                let result = check_withdraw_script(&mutated, &CONTRACT);
                assert!(result.is_err(), "mutation at offset {offset} by {delta:#x} was accepted");
                if offset >= TEMPLATE_OFFSET {
                    assert_eq!(result, Err(ShapeError::TemplateMismatch { offset }));
                }
            }
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        let script = canonical_withdraw_script(&ACCOUNT, &CONTRACT);
        assert_eq!(
            check_withdraw_script(&script[..52], &CONTRACT),
            Err(ShapeError::ScriptLength(52))
        );
        let mut longer = script.to_vec();
        longer.push(0x66);
        assert_eq!(check_withdraw_script(&longer, &CONTRACT), Err(ShapeError::ScriptLength(54)));
        assert_eq!(check_withdraw_script(&[], &CONTRACT), Err(ShapeError::ScriptLength(0)));
    }

    #[test]
    fn wrong_push_opcode_is_rejected() {
        let mut script = canonical_withdraw_script(&ACCOUNT, &CONTRACT);
        script[0] = 0x15;
        assert_eq!(check_withdraw_script(&script, &CONTRACT), Err(ShapeError::ArgumentPush(0x15)));
    }

    #[test]
    fn script_for_another_contract_is_rejected() {
        let other = ScriptHash([0xc1; 20]);
        let script = canonical_withdraw_script(&ACCOUNT, &other);
        assert_eq!(
            check_withdraw_script(&script, &CONTRACT),
            Err(ShapeError::TemplateMismatch { offset: 33 })
        );
    }

    #[test]
    fn other_transaction_types_are_rejected() {
        let script = canonical_withdraw_script(&ACCOUNT, &CONTRACT);
        let mut tx = invocation(&script);
        tx.tx_type = 0x80;
        assert_eq!(check_transaction(&tx, &CONTRACT), Err(ShapeError::TransactionType(0x80)));
    }

    #[test]
    fn other_operation_name_is_rejected() {
        let mut script = canonical_withdraw_script(&ACCOUNT, &CONTRACT);
        script[24..32].copy_from_slice(b"withdrax");
        assert_eq!(
            check_withdraw_script(&script, &CONTRACT),
            Err(ShapeError::TemplateMismatch { offset: 31 })
        );
    }
}
