use crate::eth::executor::TransitionError;

/// Gas still available to transactions within one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPool {
    gas: u64,
}

impl GasPool {
    pub fn new(gas: u64) -> Self {
        Self { gas }
    }

    /// Reserves gas for a transaction.
    pub fn sub_gas(&mut self, amount: u64) -> Result<(), TransitionError> {
        if self.gas < amount {
            return Err(TransitionError::BlockGasLimitReached {
                available: self.gas,
                required: amount,
            });
        }
        self.gas -= amount;
        Ok(())
    }

    /// Returns unused gas to the pool.
    pub fn add_gas(&mut self, amount: u64) {
        self.gas += amount;
    }

    pub fn remaining(&self) -> u64 {
        self.gas
    }
}
