//! Timeout-guarded chain queries.
//!
//! # Responsibilities
//! - Query chain state (chain ID, block number, balances, receipts)
//! - Bound every RPC call by the configured timeout
//! - Map transport failures onto `ApiError`

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use alloy::transports::TransportResult;
use tokio::time::timeout;

use crate::api::types::ConfirmationStatus;
use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};
use crate::observability::metrics;

/// API instance bound to one configuration and one provider.
#[derive(Clone)]
pub struct Api<P> {
    config: Arc<ApiConfig>,
    provider: P,
}

impl<P> Api<P> {
    /// Bind `provider` to `config`.
    pub fn new(config: Arc<ApiConfig>, provider: P) -> Self {
        Self { config, provider }
    }

    /// The configuration this instance was created with.
    pub fn config(&self) -> &Arc<ApiConfig> {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Per-call RPC timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.rpc_timeout_secs)
    }

    /// Number of confirmation blocks required for finality.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmation_blocks
    }
}

impl<P: Provider> Api<P> {
    async fn call<T, F>(&self, method: &'static str, request: F) -> ApiResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout(), request).await {
            Ok(Ok(value)) => {
                metrics::record_rpc(method, "ok");
                Ok(value)
            }
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                metrics::record_rpc(method, "error");
                Err(ApiError::Rpc {
                    method,
                    message: e.to_string(),
                })
            }
            Err(_) => {
                tracing::warn!(method, timeout_secs = self.config.rpc_timeout_secs, "RPC timeout");
                metrics::record_rpc(method, "timeout");
                Err(ApiError::Timeout {
                    method,
                    secs: self.config.rpc_timeout_secs,
                })
            }
        }
    }

    /// Get the chain ID reported by the provider.
    pub async fn chain_id(&self) -> ApiResult<u64> {
        self.call("eth_chainId", self.provider.get_chain_id()).await
    }

    /// Verify the provider's chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ApiResult<()> {
        let actual = self.chain_id().await?;
        if actual != self.config.chain_id {
            return Err(ApiError::ChainMismatch {
                expected: self.config.chain_id,
                actual,
            });
        }
        Ok(())
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> ApiResult<u64> {
        self.call("eth_blockNumber", self.provider.get_block_number()).await
    }

    /// Get the balance of an address in wei.
    pub async fn balance(&self, address: Address) -> ApiResult<U256> {
        self.call("eth_getBalance", self.provider.get_balance(address)).await
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn transaction_count(&self, address: Address) -> ApiResult<u64> {
        self.call(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    /// Get a transaction receipt by hash.
    pub async fn transaction_receipt(&self, tx_hash: TxHash) -> ApiResult<Option<TransactionReceipt>> {
        self.call(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Get current gas price in wei.
    pub async fn gas_price(&self) -> ApiResult<u128> {
        self.call("eth_gasPrice", self.provider.get_gas_price()).await
    }

    /// Number of blocks mined on top of (and including) the transaction's block.
    ///
    /// `None` while the transaction is unknown or not yet mined. A node whose
    /// head is behind the inclusion block reports `Some(0)`.
    pub async fn confirmations(&self, tx_hash: TxHash) -> ApiResult<Option<u64>> {
        let Some(tx_block) = self
            .transaction_receipt(tx_hash)
            .await?
            .and_then(|receipt| receipt.block_number)
        else {
            tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
            return Ok(None);
        };

        let head = self.block_number().await?;
        Ok(Some(self.depth(tx_hash, tx_block, head)))
    }

    fn depth(&self, tx_hash: TxHash, tx_block: u64, head: u64) -> u64 {
        if head < tx_block {
            tracing::warn!(
                tx_hash = %tx_hash,
                tx_block,
                head,
                "Node head is behind the inclusion block"
            );
            return 0;
        }
        head - tx_block + 1
    }

    /// Classify the transaction against `confirmation_blocks`.
    pub async fn confirmation_status(&self, tx_hash: TxHash) -> ApiResult<ConfirmationStatus> {
        let Some(receipt) = self.transaction_receipt(tx_hash).await? else {
            return Ok(ConfirmationStatus::Pending);
        };
        let Some(tx_block) = receipt.block_number else {
            return Ok(ConfirmationStatus::Pending);
        };

        if !receipt.status() {
            return Ok(ConfirmationStatus::Reverted {
                block_number: tx_block,
            });
        }

        let head = self.block_number().await?;
        let current = self.depth(tx_hash, tx_block, head);
        let required = u64::from(self.config.confirmation_blocks);

        if current >= required {
            return Ok(ConfirmationStatus::Confirmed {
                block_number: tx_block,
            });
        }

        tracing::debug!(
            tx_hash = %tx_hash,
            confirmations = current,
            required,
            "Waiting for confirmations"
        );
        Ok(ConfirmationStatus::Confirming { current, required })
    }

    /// Whether the transaction succeeded and reached `confirmation_blocks`.
    pub async fn is_confirmed(&self, tx_hash: TxHash) -> ApiResult<bool> {
        Ok(self.confirmation_status(tx_hash).await?.is_confirmed())
    }

    /// Check if the chain is reachable.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.block_number().await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }
}

impl<P> std::fmt::Debug for Api<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
