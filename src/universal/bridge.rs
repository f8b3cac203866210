/// Cross-chain / cross-domain transfer admission.
pub trait BridgePolicy: Send + Sync {
    fn allow_transfer(&self, amount: u64) -> bool;
}

impl<F> BridgePolicy for F
where
    F: Fn(u64) -> bool + Send + Sync,
{
    fn allow_transfer(&self, amount: u64) -> bool {
        self(amount)
    }
}

/// Admits transfers up to and including `max_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferCap {
    pub max_amount: u64,
}

impl BridgePolicy for TransferCap {
    fn allow_transfer(&self, amount: u64) -> bool {
        amount <= self.max_amount
    }
}
