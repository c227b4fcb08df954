use std::cmp::min;

use anyhow::anyhow;
use ethereum_types::H160;
use rlp::RlpStream;

use crate::eth::evm::CallKind;
use crate::eth::evm::Contract;
use crate::eth::evm::Evm;
use crate::eth::evm::EvmError;
use crate::eth::evm::EvmOutput;
use crate::eth::evm::Host;
use crate::eth::evm::TxContext;
use crate::eth::executor::EvmInput;
use crate::eth::executor::ExecutionResult;
use crate::eth::executor::GasPool;
use crate::eth::executor::TransitionError;
use crate::eth::primitives::Address;
use crate::eth::primitives::BlockHeader;
use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Gas;
use crate::eth::primitives::Hash;
use crate::eth::primitives::LogTopic;
use crate::eth::primitives::Nonce;
use crate::eth::primitives::Revision;
use crate::eth::primitives::SlotIndex;
use crate::eth::primitives::SlotValue;
use crate::eth::primitives::StorageStatus;
use crate::eth::primitives::Wei;
use crate::eth::state::Object;
use crate::eth::state::Snapshot;
use crate::eth::state::Txn;
use crate::if_else;

pub const MAX_CALL_DEPTH: usize = 1024;

/// Deployed code size cap (EIP-170).
const MAX_CODE_SIZE: usize = 24576;

/// Gas charged per byte of deployed contract code.
const CODE_DEPOSIT_GAS_PER_BYTE: u64 = 200;

const TX_GAS: u64 = 21000;
const TX_GAS_CONTRACT_CREATION: u64 = 53000;
const TX_DATA_ZERO_GAS: u64 = 4;
const TX_DATA_NON_ZERO_GAS: u64 = 68;

/// Reduced calldata cost from Istanbul (EIP-2028).
const TX_DATA_NON_ZERO_GAS_EIP2028: u64 = 16;

/// Applies transaction messages on top of a [`Snapshot`].
///
/// One `Transition` processes the transactions of one block: each
/// [`Transition::apply`] runs a message through the journaled [`Txn`] and the
/// plugged-in interpreter, and [`Transition::commit`] serialises the final
/// journal for the trie layer. It also implements [`Host`], which is how the
/// interpreter reads state and spawns nested frames.
pub struct Transition<S: Snapshot> {
    revision: Revision,
    header: BlockHeader,
    txn: Txn<S>,
    evm: Option<Box<dyn Evm>>,
    block_hashes: Option<Box<dyn Fn(BlockNumber) -> Hash>>,

    // context of the message currently being applied
    gas_price: Wei,
    origin: Address,
}

impl<S: Snapshot> Transition<S> {
    pub fn new(revision: Revision, header: BlockHeader, snapshot: S) -> Self {
        Self {
            revision,
            header,
            txn: Txn::new(snapshot).with_revision(revision),
            evm: None,
            block_hashes: None,
            gas_price: Wei::ZERO,
            origin: Address::ZERO,
        }
    }

    /// Plugs the bytecode interpreter executed for contract frames. Plain
    /// value transfers work without one.
    pub fn with_evm(mut self, evm: Box<dyn Evm>) -> Self {
        self.evm = Some(evm);
        self
    }

    /// Plugs the oracle resolving historical block hashes for BLOCKHASH.
    pub fn with_block_hash_oracle(mut self, oracle: impl Fn(BlockNumber) -> Hash + 'static) -> Self {
        self.block_hashes = Some(Box::new(oracle));
        self
    }

    /// Credits the block reward to an address, typically the coinbase.
    pub fn add_sealing_reward(&mut self, address: Address, amount: Wei) {
        self.txn.add_sealing_reward(address, amount);
    }

    /// Consumes the layer, serialising every change into the ordered list
    /// the trie layer materialises into a new state root.
    pub fn commit(self) -> Vec<Object> {
        self.txn.commit()
    }

    // -------------------------------------------------------------------------
    // Apply
    // -------------------------------------------------------------------------

    /// Runs one transaction message to completion: validation, gas purchase,
    /// execution, gas settlement and the end-of-transaction cleanup sweep.
    pub fn apply(&mut self, input: &EvmInput, pool: &mut GasPool) -> Result<ExecutionResult, TransitionError> {
        // pre-execution validation: nothing here may change state or the pool
        let account_nonce = self.txn.get_nonce(input.from);
        if account_nonce > input.nonce {
            return Err(TransitionError::NonceTooLow {
                account: account_nonce,
                transaction: input.nonce,
            });
        }
        if account_nonce < input.nonce {
            return Err(TransitionError::NonceTooHigh {
                account: account_nonce,
                transaction: input.nonce,
            });
        }

        let gas_limit = input.gas_limit.as_u64();
        let upfront = input.gas_price * gas_limit;
        if self.txn.get_balance(input.from) < upfront {
            return Err(TransitionError::InsufficientBalanceForGas);
        }

        let intrinsic = intrinsic_gas(self.revision, input.to.is_none(), &input.data);
        if gas_limit < intrinsic {
            return Err(TransitionError::IntrinsicGasTooLow { gas_limit, intrinsic });
        }

        if self.evm.is_none() {
            let needs_evm = match input.to {
                Some(to) => self.txn.get_code_size(to) > 0,
                None => true,
            };
            if needs_evm {
                return Err(TransitionError::EvmNotConfigured);
            }
        }

        pool.sub_gas(gas_limit)?;

        // buy gas
        if let Err(e) = self.txn.sub_balance(input.from, upfront) {
            return Err(TransitionError::Unexpected(anyhow!("failed to charge upfront gas: {e}")));
        }

        self.gas_price = input.gas_price;
        self.origin = input.from;

        let gas = gas_limit - intrinsic;
        tracing::debug!(from = %input.from, to = ?input.to, gas, "executing transaction");

        let output = match input.to {
            Some(to) => {
                self.txn.incr_nonce(input.from);
                self.call_ex(CallKind::Call, to, input.from, input.value, input.data.clone(), gas, 0, false, Hash::ZERO, to)
            }
            // the create frame bumps the sender nonce itself
            None => self.call_ex(CallKind::Create, Address::ZERO, input.from, input.value, input.data.clone(), gas, 0, false, Hash::ZERO, Address::ZERO),
        };

        // settle gas: the refund counter is bounded by a quotient of the gas
        // actually used (EIP-3529 lowered it from 1/2 to 1/5 at Istanbul)
        let mut gas_left = output.gas_left;
        let mut gas_used = gas_limit - gas_left;
        let refund_quotient = if_else!(self.revision >= Revision::Istanbul, 5, 2);
        let refund = min(self.txn.get_refund(), gas_used / refund_quotient);
        gas_left += refund;
        gas_used -= refund;

        self.txn.add_balance(input.from, self.gas_price * gas_left);
        self.txn.add_balance(self.header.coinbase, self.gas_price * gas_used);
        pool.add_gas(gas_left);

        // EIP-161 sweep of touched-but-empty accounts
        self.txn.clean_delete_objects(self.revision >= Revision::SpuriousDragon);

        let logs = self.txn.logs();

        tracing::debug!(gas_used, success = output.is_success(), logs = logs.len(), "transaction applied");

        Ok(ExecutionResult {
            output: output.output,
            gas_used: Gas::from(gas_used),
            gas_left: Gas::from(gas_left),
            logs,
            contract_address: output.create_address,
            error: output.error,
        })
    }

    // -------------------------------------------------------------------------
    // Call frames
    // -------------------------------------------------------------------------

    fn execute_evm(&mut self, contract: &Contract) -> EvmOutput {
        #[allow(clippy::expect_used)]
        let mut evm = self.evm.take().expect("evm interpreter presence is validated before execution");
        let revision = self.revision;
        let output = evm.execute(self, contract, revision);
        self.evm = Some(evm);
        output
    }

    fn transfer(&mut self, from: Address, to: Address, value: Wei) {
        if let Err(e) = self.txn.sub_balance(from, value) {
            tracing::error!(reason = ?e, %from, %to, "balance transfer failed after funds check");
            return;
        }
        // a zero credit still touches the recipient
        self.txn.add_balance(to, value);
    }

    fn apply_call(&mut self, contract: Contract) -> EvmOutput {
        if contract.depth > MAX_CALL_DEPTH {
            return EvmOutput::failed(EvmError::Depth, contract.gas);
        }

        let id = self.txn.snapshot();

        if contract.kind == CallKind::Call {
            if self.txn.get_balance(contract.caller) < contract.value {
                return EvmOutput::failed(EvmError::InsufficientBalance, contract.gas);
            }
            self.transfer(contract.caller, contract.address, contract.value);
        }

        if contract.code.is_empty() {
            return EvmOutput::success(Bytes::default(), contract.gas);
        }

        let output = self.execute_evm(&contract);
        if output.error.is_some() {
            self.txn.revert_to(id);
        }
        output
    }

    fn apply_create(&mut self, contract: Contract) -> EvmOutput {
        if contract.depth > MAX_CALL_DEPTH {
            return EvmOutput::failed(EvmError::Depth, contract.gas);
        }

        if self.txn.get_balance(contract.caller) < contract.value {
            return EvmOutput::failed(EvmError::InsufficientBalance, contract.gas);
        }

        // the creator pays for the nonce slot no matter how the frame ends
        let nonce = self.txn.get_nonce(contract.caller);
        self.txn.incr_nonce(contract.caller);

        let address = match contract.kind {
            CallKind::Create2 => create2_address(contract.caller, contract.salt, &contract.input),
            _ => create_address(contract.caller, nonce),
        };

        if self.txn.get_nonce(address) != Nonce::ZERO || has_code(&self.txn, address) {
            return EvmOutput::failed(EvmError::ContractAddressCollision, 0);
        }

        let id = self.txn.snapshot();

        self.txn.create_account(address);
        if self.revision >= Revision::SpuriousDragon {
            // EIP-161: contract accounts are born with nonce 1
            self.txn.incr_nonce(address);
        }
        self.transfer(contract.caller, address, contract.value);

        let frame = Contract {
            kind: contract.kind,
            address,
            code_address: address,
            caller: contract.caller,
            value: contract.value,
            input: Bytes::default(),
            code: contract.input,
            gas: contract.gas,
            depth: contract.depth,
            is_static: false,
            salt: contract.salt,
        };

        let mut output = self.execute_evm(&frame);
        output.create_address = Some(address);
        if output.error.is_some() {
            self.txn.revert_to(id);
            return output;
        }

        // deployed code checks and deposit charge
        let code = output.output.clone();
        if self.revision >= Revision::SpuriousDragon && code.len() > MAX_CODE_SIZE {
            self.txn.revert_to(id);
            let mut failed = EvmOutput::failed(EvmError::MaxCodeSizeExceeded, 0);
            failed.create_address = Some(address);
            return failed;
        }

        let deposit_gas = code.len() as u64 * CODE_DEPOSIT_GAS_PER_BYTE;
        if output.gas_left < deposit_gas {
            self.txn.revert_to(id);
            let mut failed = EvmOutput::failed(EvmError::CodeStoreOutOfGas, 0);
            failed.create_address = Some(address);
            return failed;
        }
        output.gas_left -= deposit_gas;
        self.txn.set_code(address, code);

        output
    }
}

fn has_code<S: Snapshot>(txn: &Txn<S>, address: Address) -> bool {
    let code_hash = txn.get_code_hash(address);
    code_hash != Hash::ZERO && code_hash != Hash::EMPTY_CODE
}

/// CREATE address: last 20 bytes of `keccak(rlp([sender, nonce]))`.
fn create_address(creator: Address, nonce: Nonce) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(&H160::from(creator));
    stream.append(&nonce.as_u64());
    let hash = Hash::keccak(stream.out());
    Address::from(H160::from_slice(&hash.as_bytes()[12..]))
}

/// CREATE2 address: last 20 bytes of `keccak(0xff ++ sender ++ salt ++ keccak(init_code))` (EIP-1014).
fn create2_address(creator: Address, salt: Hash, init_code: &[u8]) -> Address {
    let code_hash = Hash::keccak(init_code);
    let mut buffer = Vec::with_capacity(85);
    buffer.push(0xff);
    buffer.extend_from_slice(creator.as_bytes());
    buffer.extend_from_slice(salt.as_bytes());
    buffer.extend_from_slice(code_hash.as_bytes());
    let hash = Hash::keccak(&buffer);
    Address::from(H160::from_slice(&hash.as_bytes()[12..]))
}

/// Gas charged before a single opcode runs: base cost plus calldata cost.
fn intrinsic_gas(revision: Revision, is_create: bool, data: &Bytes) -> u64 {
    let mut gas = if_else!(is_create && revision >= Revision::Homestead, TX_GAS_CONTRACT_CREATION, TX_GAS);

    let non_zero_gas = if_else!(revision >= Revision::Istanbul, TX_DATA_NON_ZERO_GAS_EIP2028, TX_DATA_NON_ZERO_GAS);
    let non_zero_bytes = data.iter().filter(|byte| **byte != 0).count() as u64;
    let zero_bytes = data.len() as u64 - non_zero_bytes;

    gas += zero_bytes * TX_DATA_ZERO_GAS;
    gas += non_zero_bytes * non_zero_gas;
    gas
}

// -----------------------------------------------------------------------------
// Host
// -----------------------------------------------------------------------------
impl<S: Snapshot> Host for Transition<S> {
    fn account_exists(&self, address: Address) -> bool {
        self.txn.exist(address)
    }

    fn get_storage(&self, address: Address, index: SlotIndex) -> SlotValue {
        self.txn.get_state(address, index)
    }

    fn set_storage(&mut self, address: Address, index: SlotIndex, value: SlotValue) -> StorageStatus {
        self.txn.set_storage(address, index, value)
    }

    fn get_balance(&self, address: Address) -> Wei {
        self.txn.get_balance(address)
    }

    fn get_code_size(&self, address: Address) -> usize {
        self.txn.get_code_size(address)
    }

    fn get_code_hash(&self, address: Address) -> Hash {
        self.txn.get_code_hash(address)
    }

    fn get_code(&self, address: Address) -> Bytes {
        self.txn.get_code(address)
    }

    fn selfdestruct(&mut self, address: Address, beneficiary: Address) {
        let balance = self.txn.get_balance(address);
        self.txn.add_balance(beneficiary, balance);
        self.txn.suicide(address);
    }

    fn get_tx_context(&self) -> TxContext {
        TxContext {
            gas_price: self.gas_price,
            origin: self.origin,
            coinbase: self.header.coinbase,
            block_number: self.header.number,
            block_timestamp: self.header.timestamp,
            block_gas_limit: self.header.gas_limit,
            difficulty: self.header.difficulty,
            chain_id: self.header.chain_id,
        }
    }

    fn get_block_hash(&self, number: BlockNumber) -> Hash {
        match &self.block_hashes {
            Some(oracle) => oracle(number),
            None => Hash::ZERO,
        }
    }

    fn emit_log(&mut self, address: Address, topics: &[LogTopic], data: &[u8]) {
        self.txn.emit_log(address, topics, data);
    }

    fn call(&mut self, contract: Contract) -> EvmOutput {
        if contract.kind.is_create() {
            self.apply_create(contract)
        } else {
            self.apply_call(contract)
        }
    }

    fn empty(&self, address: Address) -> bool {
        self.txn.empty(address)
    }

    fn call_ex(
        &mut self,
        kind: CallKind,
        recipient: Address,
        sender: Address,
        value: Wei,
        input: Bytes,
        gas: u64,
        depth: usize,
        is_static: bool,
        salt: Hash,
        code_address: Address,
    ) -> EvmOutput {
        let contract = if kind.is_create() {
            Contract {
                kind,
                address: recipient,
                code_address,
                caller: sender,
                value,
                input,
                code: Bytes::default(),
                gas,
                depth,
                is_static,
                salt,
            }
        } else {
            Contract {
                kind,
                address: recipient,
                code_address,
                caller: sender,
                value,
                input,
                code: self.txn.get_code(code_address),
                gas,
                depth,
                is_static,
                salt,
            }
        };
        self.call(contract)
    }
}
