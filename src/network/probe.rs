use std::time::Duration;

use anchor_client::solana_sdk::pubkey::Pubkey;
use futures::future::try_join_all;
use tokio::time::timeout;
use tracing::debug;

use crate::network::{ChainReader, NetworkError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeResult {
    Present(Vec<u8>),
    Absent,
}

impl ProbeResult {
    pub fn is_present(&self) -> bool {
        matches!(self, ProbeResult::Present(_))
    }
}

/// Checks whether an account exists at `address`.
///
/// A missing account is `Absent`. Any other failure, including the request not
/// completing within `limit`, is an error; a slow account is never reported
/// as absent.
pub async fn probe<R>(reader: &R, address: &Pubkey, limit: Duration) -> Result<ProbeResult, NetworkError>
where
    R: ChainReader + ?Sized,
{
    let data = timeout(limit, reader.get_account_data(address))
        .await
        .map_err(|_| NetworkError::Timeout(limit.as_secs()))??;

    let result = match data {
        Some(data) => ProbeResult::Present(data),
        None => ProbeResult::Absent,
    };

    debug!("Probed {}: present={}", address, result.is_present());

    Ok(result)
}

/// Probes every address concurrently. Results are in the order of `addresses`;
/// the first failure aborts the whole set.
pub async fn probe_all<R>(
    reader: &R,
    addresses: &[Pubkey],
    limit: Duration,
) -> Result<Vec<ProbeResult>, NetworkError>
where
    R: ChainReader + ?Sized,
{
    try_join_all(addresses.iter().map(|address| probe(reader, address, limit))).await
}
