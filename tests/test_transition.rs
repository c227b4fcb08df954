use cirrus::eth::evm::Contract;
use cirrus::eth::evm::Evm;
use cirrus::eth::evm::EvmError;
use cirrus::eth::evm::EvmOutput;
use cirrus::eth::evm::Host;
use cirrus::eth::executor::EvmInput;
use cirrus::eth::executor::GasPool;
use cirrus::eth::executor::Transition;
use cirrus::eth::executor::TransitionError;
use cirrus::eth::primitives::Account;
use cirrus::eth::primitives::Address;
use cirrus::eth::primitives::BlockHeader;
use cirrus::eth::primitives::BlockNumber;
use cirrus::eth::primitives::Bytes;
use cirrus::eth::primitives::Gas;
use cirrus::eth::primitives::Hash;
use cirrus::eth::primitives::Nonce;
use cirrus::eth::primitives::Revision;
use cirrus::eth::primitives::SlotIndex;
use cirrus::eth::primitives::SlotValue;
use cirrus::eth::primitives::Wei;
use cirrus::eth::state::InMemorySnapshot;
use cirrus::eth::state::Snapshot;
use cirrus::eth::state::Txn;
use hex_literal::hex;

const ADDR_1: Address = Address::new(hex!("0000000000000000000000000000000000000001"));
const ADDR_2: Address = Address::new(hex!("0000000000000000000000000000000000000002"));
const COINBASE: Address = Address::new(hex!("00000000000000000000000000000000000000ff"));

fn header() -> BlockHeader {
    BlockHeader {
        number: BlockNumber::from(1u64),
        coinbase: COINBASE,
        timestamp: 1_600_000_000,
        gas_limit: 10_000_000,
        chain_id: 1,
        ..Default::default()
    }
}

fn pre_state(accounts: &[(Address, u64, u64)]) -> InMemorySnapshot {
    let mut snapshot = InMemorySnapshot::new();
    for (address, nonce, balance) in accounts {
        snapshot = snapshot.with_account(
            *address,
            Account {
                nonce: Nonce::from(*nonce),
                balance: Wei::from(*balance),
                ..Default::default()
            },
        );
    }
    snapshot
}

// -----------------------------------------------------------------------------
// Scripted interpreter
// -----------------------------------------------------------------------------

/// Interpreter stand-in: runs a fixed script against the host instead of
/// decoding bytecode.
enum Script {
    Return { output: Vec<u8>, gas_cost: u64 },
    StoreAndLog,
    Selfdestruct { beneficiary: Address },
    Revert { gas_cost: u64 },
    OutOfGas,
}

struct ScriptedEvm(Script);

impl Evm for ScriptedEvm {
    fn execute(&mut self, host: &mut dyn Host, contract: &Contract, _revision: Revision) -> EvmOutput {
        match &self.0 {
            Script::Return { output, gas_cost } => EvmOutput::success(Bytes::from(output.clone()), contract.gas - gas_cost),
            Script::StoreAndLog => {
                host.set_storage(contract.address, SlotIndex::from(1u64), SlotValue::from(42u64));
                host.emit_log(contract.address, &[], b"stored");
                EvmOutput::success(Bytes::default(), contract.gas)
            }
            Script::Selfdestruct { beneficiary } => {
                host.selfdestruct(contract.address, *beneficiary);
                EvmOutput::success(Bytes::default(), contract.gas)
            }
            Script::Revert { gas_cost } => EvmOutput::failed(EvmError::ExecutionReverted, contract.gas - gas_cost),
            Script::OutOfGas => EvmOutput::failed(EvmError::OutOfGas, 0),
        }
    }
}

// -----------------------------------------------------------------------------
// Pre-execution rejections
// -----------------------------------------------------------------------------

#[test]
fn rejects_transaction_with_nonce_below_account() {
    let snapshot = pre_state(&[(ADDR_1, 10, 0)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot);
    let mut pool = GasPool::new(1000);

    let input = EvmInput {
        from: ADDR_1,
        nonce: Nonce::from(5u64),
        ..Default::default()
    };
    let err = transition.apply(&input, &mut pool).unwrap_err();

    assert_eq!(err.to_string(), "too low 10 > 5");
    assert_eq!(pool.remaining(), 1000);
    assert!(transition.commit().is_empty(), "state must be unchanged");
}

#[test]
fn rejects_transaction_with_nonce_above_account() {
    let snapshot = pre_state(&[(ADDR_1, 5, 0)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot);
    let mut pool = GasPool::new(1000);

    let input = EvmInput {
        from: ADDR_1,
        nonce: Nonce::from(10u64),
        ..Default::default()
    };
    let err = transition.apply(&input, &mut pool).unwrap_err();

    assert_eq!(err.to_string(), "too high 5 < 10");
    assert!(transition.commit().is_empty(), "state must be unchanged");
}

#[test]
fn rejects_transaction_that_cannot_pay_for_gas() {
    let snapshot = pre_state(&[(ADDR_1, 0, 50)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot);
    let mut pool = GasPool::new(1000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        gas_limit: Gas::from(1u64),
        gas_price: Wei::from(100u64),
        ..Default::default()
    };
    let err = transition.apply(&input, &mut pool).unwrap_err();

    assert!(matches!(err, TransitionError::InsufficientBalanceForGas));
    assert_eq!(pool.remaining(), 1000);
}

#[test]
fn rejects_gas_limit_below_intrinsic_cost() {
    let snapshot = pre_state(&[(ADDR_1, 0, 10_000_000)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot);
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        gas_limit: Gas::from(20_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let err = transition.apply(&input, &mut pool).unwrap_err();

    assert!(matches!(err, TransitionError::IntrinsicGasTooLow { intrinsic: 21000, .. }));
}

#[test]
fn rejects_transaction_exceeding_block_gas_pool() {
    let snapshot = pre_state(&[(ADDR_1, 0, 10_000_000)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot);
    let mut pool = GasPool::new(10_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        gas_limit: Gas::from(30_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let err = transition.apply(&input, &mut pool).unwrap_err();

    assert!(matches!(err, TransitionError::BlockGasLimitReached { .. }));
}

#[test]
fn rejects_contract_deployment_without_interpreter() {
    let snapshot = pre_state(&[(ADDR_1, 0, 10_000_000)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot);
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: None,
        gas_limit: Gas::from(100_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let err = transition.apply(&input, &mut pool).unwrap_err();

    assert!(matches!(err, TransitionError::EvmNotConfigured));
}

// -----------------------------------------------------------------------------
// Value transfers
// -----------------------------------------------------------------------------

#[test]
fn transfer_settles_gas_and_pays_coinbase() {
    let snapshot = pre_state(&[(ADDR_1, 0, 1_000_000)]);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot.clone());
    let mut pool = GasPool::new(100_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        value: Wei::from(100u64),
        gas_limit: Gas::from(30_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let result = transition.apply(&input, &mut pool).unwrap();

    assert!(result.is_success());
    assert_eq!(result.gas_used, Gas::from(21_000u64));
    assert_eq!(result.gas_left, Gas::from(9_000u64));
    assert_eq!(result.contract_address, None);
    assert_eq!(pool.remaining(), 100_000 - 21_000);

    let objects = transition.commit();
    let (snapshot, _) = snapshot.commit(&objects);

    let txn = Txn::new(snapshot);
    assert_eq!(txn.get_balance(ADDR_1), Wei::from(1_000_000u64 - 21_000 - 100));
    assert_eq!(txn.get_nonce(ADDR_1), Nonce::from(1u64));
    assert_eq!(txn.get_balance(ADDR_2), Wei::from(100u64));
    assert_eq!(txn.get_balance(COINBASE), Wei::from(21_000u64));
}

// -----------------------------------------------------------------------------
// Contract frames
// -----------------------------------------------------------------------------

#[test]
fn deployment_stores_code_and_charges_deposit() {
    let snapshot = pre_state(&[(ADDR_1, 0, 10_000_000)]);
    let deployed_code = vec![0xfe; 10];
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot)
        .with_evm(Box::new(ScriptedEvm(Script::Return {
            output: deployed_code.clone(),
            gas_cost: 5_000,
        })));
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: None,
        data: Bytes::from(vec![0x00, 0x01, 0x02]),
        gas_limit: Gas::from(100_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let result = transition.apply(&input, &mut pool).unwrap();

    assert!(result.is_success());
    let contract_address = result.contract_address.expect("creation must report an address");

    // intrinsic: 53000 base + 1 zero byte * 4 + 2 non-zero bytes * 16
    let intrinsic = 53_000 + 4 + 32;
    let deposit = deployed_code.len() as u64 * 200;
    assert_eq!(result.gas_left.as_u64(), 100_000 - intrinsic - 5_000 - deposit);

    let objects = transition.commit();
    let deployed = objects.iter().find(|object| object.address == contract_address).unwrap();
    assert!(deployed.dirty_code);
    assert_eq!(deployed.code, Bytes::from(deployed_code));
    assert_eq!(deployed.nonce, Nonce::from(1u64), "contracts are born with nonce 1 after Spurious Dragon");
}

#[test]
fn contract_storage_writes_and_logs_are_collected() {
    let code = Bytes::from(vec![0x60, 0x01]);
    let snapshot = pre_state(&[(ADDR_1, 0, 10_000_000)]).with_code(ADDR_2, code);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot.clone()).with_evm(Box::new(ScriptedEvm(Script::StoreAndLog)));
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        gas_limit: Gas::from(100_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let result = transition.apply(&input, &mut pool).unwrap();

    assert!(result.is_success());
    assert_eq!(result.logs.len(), 1);
    assert_eq!(result.logs[0].address, ADDR_2);

    let objects = transition.commit();
    let (snapshot, _) = snapshot.commit(&objects);
    let txn = Txn::new(snapshot);
    assert_eq!(txn.get_state(ADDR_2, SlotIndex::from(1u64)), SlotValue::from(42u64));
}

#[test]
fn reverted_call_consumes_gas_but_undoes_state() {
    let code = Bytes::from(vec![0x60, 0x01]);
    let snapshot = pre_state(&[(ADDR_1, 0, 1_000_000)]).with_code(ADDR_2, code);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot.clone()).with_evm(Box::new(ScriptedEvm(Script::Revert { gas_cost: 7_000 })));
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        value: Wei::from(500u64),
        gas_limit: Gas::from(50_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let result = transition.apply(&input, &mut pool).unwrap();

    assert_eq!(result.error, Some(EvmError::ExecutionReverted));
    assert_eq!(result.gas_used, Gas::from(21_000u64 + 7_000));

    let objects = transition.commit();
    let (snapshot, _) = snapshot.commit(&objects);
    let txn = Txn::new(snapshot);

    // the value transfer was reverted; only gas was spent
    assert_eq!(txn.get_balance(ADDR_2), Wei::ZERO);
    assert_eq!(txn.get_balance(ADDR_1), Wei::from(1_000_000u64 - 28_000));
    assert_eq!(txn.get_nonce(ADDR_1), Nonce::from(1u64));
}

#[test]
fn out_of_gas_call_burns_the_gas_limit() {
    let code = Bytes::from(vec![0x60, 0x01]);
    let snapshot = pre_state(&[(ADDR_1, 0, 1_000_000)]).with_code(ADDR_2, code);
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot).with_evm(Box::new(ScriptedEvm(Script::OutOfGas)));
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        gas_limit: Gas::from(50_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let result = transition.apply(&input, &mut pool).unwrap();

    assert_eq!(result.error, Some(EvmError::OutOfGas));
    assert_eq!(result.gas_used, Gas::from(50_000u64));
    assert_eq!(result.gas_left, Gas::ZERO);
}

#[test]
fn selfdestruct_transfers_balance_and_deletes_account() {
    let code = Bytes::from(vec![0x60, 0x01]);
    let snapshot = pre_state(&[(ADDR_1, 0, 1_000_000), (ADDR_2, 1, 777)]).with_code(ADDR_2, code);
    let beneficiary = Address::new(hex!("00000000000000000000000000000000000000aa"));
    let mut transition = Transition::new(Revision::Istanbul, header(), snapshot.clone()).with_evm(Box::new(ScriptedEvm(Script::Selfdestruct { beneficiary })));
    let mut pool = GasPool::new(1_000_000);

    let input = EvmInput {
        from: ADDR_1,
        to: Some(ADDR_2),
        gas_limit: Gas::from(50_000u64),
        gas_price: Wei::from(1u64),
        ..Default::default()
    };
    let result = transition.apply(&input, &mut pool).unwrap();
    assert!(result.is_success());

    let objects = transition.commit();
    let (snapshot, _) = snapshot.commit(&objects);
    let txn = Txn::new(snapshot);

    assert!(!txn.exist(ADDR_2));
    assert_eq!(txn.get_balance(beneficiary), Wei::from(777u64));
}

// -----------------------------------------------------------------------------
// Host context
// -----------------------------------------------------------------------------

#[test]
fn host_exposes_block_context_and_hash_oracle() {
    let snapshot = pre_state(&[]);
    let transition = Transition::new(Revision::Istanbul, header(), snapshot).with_block_hash_oracle(|number| Hash::keccak(number.to_string()));

    let context = transition.get_tx_context();
    assert_eq!(context.coinbase, COINBASE);
    assert_eq!(context.block_number, BlockNumber::from(1u64));
    assert_eq!(context.chain_id, 1);

    let hash = transition.get_block_hash(BlockNumber::from(7u64));
    assert_eq!(hash, Hash::keccak("7"));
}
