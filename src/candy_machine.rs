use std::time::Duration;

use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_lang::AccountDeserialize;
use mpl_candy_machine::CandyMachine;
use tracing::debug;

use crate::{
    mint::MintError,
    network::{probe, ChainReader, ProbeResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineCreator {
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

/// The parts of a candy machine account the mint flow and the status
/// report read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    pub authority: Pubkey,
    /// Receives mint proceeds.
    pub wallet: Pubkey,
    /// Set when the mint price is paid in an SPL token.
    pub token_mint: Option<Pubkey>,
    pub uuid: String,
    pub symbol: String,
    pub price: u64,
    pub items_available: u64,
    pub items_redeemed: u64,
    pub go_live_date: Option<i64>,
    pub seller_fee_basis_points: u16,
    pub creators: Vec<MachineCreator>,
}

impl MachineConfig {
    pub fn items_remaining(&self) -> u64 {
        self.items_available.saturating_sub(self.items_redeemed)
    }
}

impl From<CandyMachine> for MachineConfig {
    fn from(state: CandyMachine) -> Self {
        MachineConfig {
            authority: state.authority,
            wallet: state.wallet,
            token_mint: state.token_mint,
            uuid: state.data.uuid,
            symbol: state.data.symbol,
            price: state.data.price,
            items_available: state.data.items_available,
            items_redeemed: state.items_redeemed,
            go_live_date: state.data.go_live_date,
            seller_fee_basis_points: state.data.seller_fee_basis_points,
            creators: state
                .data
                .creators
                .into_iter()
                .map(|creator| MachineCreator {
                    address: creator.address,
                    verified: creator.verified,
                    share: creator.share,
                })
                .collect(),
        }
    }
}

pub fn decode_machine_config(address: &Pubkey, data: &[u8]) -> Result<MachineConfig, MintError> {
    let mut buf = data;
    let state = CandyMachine::try_deserialize(&mut buf)
        .map_err(|err| MintError::InvalidMachineAccount(*address, err.to_string()))?;

    Ok(state.into())
}

/// Fetches and decodes the candy machine account at `candy_machine_id`.
pub async fn fetch_machine_config<R>(
    reader: &R,
    candy_machine_id: &Pubkey,
    limit: Duration,
) -> Result<MachineConfig, MintError>
where
    R: ChainReader + ?Sized,
{
    match probe(reader, candy_machine_id, limit).await? {
        ProbeResult::Present(data) => {
            let config = decode_machine_config(candy_machine_id, &data)?;
            debug!(
                "Candy machine {}: authority={}, wallet={}, token_mint={:?}",
                candy_machine_id, config.authority, config.wallet, config.token_mint
            );
            Ok(config)
        }
        ProbeResult::Absent => Err(MintError::MachineNotFound(*candy_machine_id)),
    }
}

pub fn uuid_from_pubkey(pubkey: &Pubkey) -> String {
    pubkey.to_string()[0..6].to_string()
}
