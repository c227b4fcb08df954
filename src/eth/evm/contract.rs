use crate::eth::primitives::Address;
use crate::eth::primitives::Bytes;
use crate::eth::primitives::Hash;
use crate::eth::primitives::Wei;

/// Kind of call frame being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Call,
    DelegateCall,
    CallCode,
    Create,
    Create2,
}

impl CallKind {
    pub fn is_create(&self) -> bool {
        matches!(self, CallKind::Create | CallKind::Create2)
    }
}

/// Contract instance being called: the code to run plus its frame context.
#[derive(Debug, Clone)]
pub struct Contract {
    pub kind: CallKind,

    /// Account whose storage and balance the frame operates on.
    pub address: Address,

    /// Account the executed code belongs to. Differs from `address` for
    /// DELEGATECALL and CALLCODE frames.
    pub code_address: Address,

    pub caller: Address,
    pub value: Wei,
    pub input: Bytes,
    pub code: Bytes,
    pub gas: u64,
    pub depth: usize,
    pub is_static: bool,
    pub salt: Hash,
}

impl Contract {
    pub fn new(kind: CallKind, depth: usize, from: Address, to: Address, value: Wei, gas: u64, code: Bytes) -> Self {
        Self {
            kind,
            address: to,
            code_address: to,
            caller: from,
            value,
            input: Bytes::default(),
            code,
            gas,
            depth,
            is_static: false,
            salt: Hash::ZERO,
        }
    }

    pub fn creation(depth: usize, from: Address, to: Address, value: Wei, gas: u64, code: Bytes) -> Self {
        Self::new(CallKind::Create, depth, from, to, value, gas, code)
    }

    pub fn call(depth: usize, from: Address, to: Address, value: Wei, gas: u64, code: Bytes, input: Bytes) -> Self {
        let mut contract = Self::new(CallKind::Call, depth, from, to, value, gas, code);
        contract.input = input;
        contract
    }
}
