//! Query result types.

/// Confirmation state of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Unknown to the node or not yet mined.
    Pending,
    /// Mined but not yet at the required depth.
    Confirming { current: u64, required: u64 },
    /// Mined successfully at the required depth.
    Confirmed { block_number: u64 },
    /// Mined but reverted.
    Reverted { block_number: u64 },
}

impl ConfirmationStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_confirmed_counts() {
        assert!(ConfirmationStatus::Confirmed { block_number: 5 }.is_confirmed());
        assert!(!ConfirmationStatus::Reverted { block_number: 5 }.is_confirmed());
        assert!(!ConfirmationStatus::Confirming {
            current: 1,
            required: 3
        }
        .is_confirmed());
        assert!(!ConfirmationStatus::Pending.is_confirmed());
    }
}
