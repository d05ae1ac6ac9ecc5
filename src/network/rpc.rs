use std::time::Duration;

use anchor_client::solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use tracing::debug;

use crate::network::NetworkError;

/// Read access to the network.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Contents of the account at `address`, or `None` when no account exists.
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, NetworkError>;

    /// Recent blockhash a transaction must carry to be accepted.
    async fn get_latest_blockhash(&self) -> Result<Hash, NetworkError>;

    async fn get_minimum_balance_for_rent_exemption(&self, size: usize)
        -> Result<u64, NetworkError>;
}

/// Write access to the network.
#[async_trait]
pub trait ChainWriter: Send + Sync {
    /// Sends a fully signed transaction and waits for its confirmation.
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, NetworkError>;
}

pub struct RpcChain {
    client: RpcClient,
    timeout: Duration,
}

impl RpcChain {
    pub fn new(rpc_url: String, timeout: Duration) -> Self {
        let client =
            RpcClient::new_with_timeout_and_commitment(rpc_url, timeout, CommitmentConfig::confirmed());

        RpcChain { client, timeout }
    }

    fn request_error(&self, err: ClientError) -> NetworkError {
        match err.kind() {
            ClientErrorKind::Reqwest(e) if e.is_timeout() => {
                NetworkError::Timeout(self.timeout.as_secs())
            }
            _ => NetworkError::Transient(err.to_string()),
        }
    }
}

#[async_trait]
impl ChainReader for RpcChain {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, NetworkError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map_err(|e| self.request_error(e))?;

        debug!(
            "Account {} {}",
            address,
            if response.value.is_some() {
                "found"
            } else {
                "not found"
            }
        );

        Ok(response.value.map(|account| account.data))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, NetworkError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| self.request_error(e))
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        size: usize,
    ) -> Result<u64, NetworkError> {
        self.client
            .get_minimum_balance_for_rent_exemption(size)
            .await
            .map_err(|e| self.request_error(e))
    }
}

#[async_trait]
impl ChainWriter for RpcChain {
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, NetworkError> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(|err| {
                let transport = matches!(
                    err.kind(),
                    ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_)
                );

                if transport {
                    self.request_error(err)
                } else {
                    NetworkError::Rejected(err.to_string())
                }
            })
    }
}
