#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex, time::Duration};

use anchor_client::solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use anchor_lang::AccountSerialize;
use async_trait::async_trait;
use candy_mint_cli::network::{ChainReader, ChainWriter, NetworkError};
use mpl_candy_machine::{CandyMachine, CandyMachineData};

/// Requests seen by the mock, in the order they were made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Account(Pubkey),
    Blockhash,
    Rent(usize),
    Send,
}

/// In-memory network: accounts are served from a map, submitted
/// transactions are recorded instead of executed.
pub struct MockChain {
    accounts: HashMap<Pubkey, Vec<u8>>,
    slow: HashMap<Pubkey, Duration>,
    blockhash: Hash,
    rejection: Option<String>,
    calls: Mutex<Vec<Call>>,
    submitted: Mutex<Vec<Transaction>>,
}

impl MockChain {
    pub fn new() -> Self {
        MockChain {
            accounts: HashMap::new(),
            slow: HashMap::new(),
            blockhash: Hash::new_unique(),
            rejection: None,
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_account(mut self, address: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.insert(address, data);
        self
    }

    /// Reads of `address` take `delay` to answer.
    pub fn with_slow_account(mut self, address: Pubkey, delay: Duration) -> Self {
        self.slow.insert(address, delay);
        self
    }

    /// Every submitted transaction is refused with `message`.
    pub fn rejecting(mut self, message: &str) -> Self {
        self.rejection = Some(message.to_string());
        self
    }

    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<Transaction> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, NetworkError> {
        self.calls.lock().unwrap().push(Call::Account(*address));

        if let Some(delay) = self.slow.get(address) {
            tokio::time::sleep(*delay).await;
        }

        Ok(self.accounts.get(address).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, NetworkError> {
        self.calls.lock().unwrap().push(Call::Blockhash);
        Ok(self.blockhash)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        size: usize,
    ) -> Result<u64, NetworkError> {
        self.calls.lock().unwrap().push(Call::Rent(size));
        Ok(size as u64 * 6_960)
    }
}

#[async_trait]
impl ChainWriter for MockChain {
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, NetworkError> {
        self.calls.lock().unwrap().push(Call::Send);

        if let Some(message) = &self.rejection {
            return Err(NetworkError::Rejected(message.clone()));
        }

        self.submitted.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}

/// Serialized candy machine account as the program stores it, with 7 of its
/// 10 items left.
pub fn machine_account(authority: Pubkey, wallet: Pubkey, token_mint: Option<Pubkey>) -> Vec<u8> {
    machine_account_with_items(authority, wallet, token_mint, 10, 3)
}

pub fn machine_account_with_items(
    authority: Pubkey,
    wallet: Pubkey,
    token_mint: Option<Pubkey>,
    items_available: u64,
    items_redeemed: u64,
) -> Vec<u8> {
    let state = CandyMachine {
        authority,
        wallet,
        token_mint,
        items_redeemed,
        data: CandyMachineData {
            uuid: "ABCDEF".to_string(),
            price: 1_000_000,
            symbol: "CNDY".to_string(),
            seller_fee_basis_points: 500,
            items_available,
            ..Default::default()
        },
    };

    let mut data = Vec::new();
    state.try_serialize(&mut data).unwrap();
    data
}

pub fn test_start(name: &str) {
    println!("\n========================================");
    println!("{}", name);
    println!("========================================");
}
