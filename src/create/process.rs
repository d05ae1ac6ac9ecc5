use std::time::Duration;

use anchor_client::solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program, sysvar,
};
use anchor_lang::{InstructionData, ToAccountMetas};
use anyhow::Result;
use chrono::Utc;
use console::style;
use mpl_candy_machine::{
    accounts as nft_accounts,
    constants::{CONFIG_ARRAY_START, CONFIG_LINE_SIZE},
    instruction as nft_instruction, CandyMachineData, Creator,
};
use spl_associated_token_account::instruction::create_associated_token_account;
use tracing::info;

use crate::{
    candy_machine::uuid_from_pubkey,
    cli::NetworkOpts,
    config::{parse_pubkey, parse_ruleset},
    constants::{CANDY_EMOJI, CANDY_MACHINE_ID, PAPER_EMOJI},
    create::CreateError,
    mint::{sign_with, submit},
    modules::{
        lockup::{set_lockup_settings, LockupType},
        permissioned::set_permissioned_settings,
        ruleset::set_ccs_settings,
    },
    network::{probe, ChainReader},
    pdas::find_ata,
    setup::{setup_chain, tool_setup},
    utils::{print_step, print_with_style, spinner_with_style},
};

pub struct CreateArgs {
    pub items: u64,
    pub price: u64,
    pub symbol: String,
    pub seller_fee_basis_points: u16,
    pub go_live_date: Option<i64>,
    pub payment_mint: Option<String>,
    pub lockup_type: Option<String>,
    pub lockup_number: Option<u64>,
    pub permissioned_creator: Option<String>,
    pub ruleset_creator: Option<String>,
    pub ruleset_name: String,
    pub network: NetworkOpts,
}

/// Parameters of a new candy machine and of the modules set up with it.
#[derive(Clone, Debug)]
pub struct MachineParams {
    pub items: u64,
    pub price: u64,
    pub symbol: String,
    pub seller_fee_basis_points: u16,
    pub go_live_date: i64,
    pub payment_mint: Option<Pubkey>,
    pub lockup: Option<(LockupType, u64)>,
    pub permissioned_creator: Option<Pubkey>,
    /// Creator and ruleset address of the creator standard module.
    pub ruleset: Option<(Pubkey, Pubkey)>,
}

/// Accounts of the candy machine creation.
#[derive(Clone, Debug)]
pub struct MachineAccounts {
    pub program_id: Pubkey,
    pub candy_machine: Pubkey,
    pub authority: Pubkey,
    pub payer: Pubkey,
}

/// Size of the candy machine account holding `items` config lines.
pub fn machine_account_size(items: u64) -> Result<usize, CreateError> {
    let too_many = || CreateError::TooManyItems(items);
    let count = usize::try_from(items).map_err(|_| too_many())?;

    count
        .checked_mul(CONFIG_LINE_SIZE)
        .and_then(|lines| lines.checked_add(CONFIG_ARRAY_START + 4 + 8))
        .and_then(|size| size.checked_add(2 * (count / 8 + 1)))
        .ok_or_else(too_many)
}

/// Treasury of the machine: the authority, or the machine's token account
/// when the price is paid in an SPL token.
pub fn machine_wallet(accounts: &MachineAccounts, params: &MachineParams) -> Pubkey {
    match params.payment_mint {
        Some(payment_mint) => find_ata(&payment_mint, &accounts.candy_machine),
        None => accounts.authority,
    }
}

pub fn machine_data(accounts: &MachineAccounts, params: &MachineParams) -> CandyMachineData {
    CandyMachineData {
        uuid: uuid_from_pubkey(&accounts.candy_machine),
        price: params.price,
        symbol: params.symbol.clone(),
        seller_fee_basis_points: params.seller_fee_basis_points,
        max_supply: 0,
        is_mutable: true,
        retain_authority: true,
        go_live_date: Some(params.go_live_date),
        end_settings: None,
        creators: vec![
            Creator {
                address: accounts.candy_machine,
                verified: true,
                share: 0,
            },
            Creator {
                address: accounts.authority,
                verified: false,
                share: 100,
            },
        ],
        hidden_settings: None,
        whitelist_mint_settings: None,
        items_available: params.items,
        gatekeeper: None,
    }
}

/// Instructions allocating, initializing and configuring a candy machine.
///
/// `create_wallet` adds the creation of the machine's payment token account.
pub fn create_machine_instructions(
    accounts: &MachineAccounts,
    params: &MachineParams,
    rent_lamports: u64,
    create_wallet: bool,
) -> Result<Vec<Instruction>, CreateError> {
    let size = machine_account_size(params.items)?;
    let wallet = machine_wallet(accounts, params);
    let mut instructions = Vec::new();

    if let (Some(payment_mint), true) = (params.payment_mint, create_wallet) {
        instructions.push(create_associated_token_account(
            &accounts.payer,
            &accounts.candy_machine,
            &payment_mint,
            &spl_token::ID,
        ));
    }

    instructions.push(system_instruction::create_account(
        &accounts.payer,
        &accounts.candy_machine,
        rent_lamports,
        size as u64,
        &accounts.program_id,
    ));

    let mut init_accounts = nft_accounts::InitializeCandyMachine {
        candy_machine: accounts.candy_machine,
        wallet,
        authority: accounts.authority,
        payer: accounts.payer,
        system_program: system_program::ID,
        rent: sysvar::rent::ID,
    }
    .to_account_metas(None);

    if let Some(payment_mint) = params.payment_mint {
        init_accounts.push(AccountMeta::new_readonly(payment_mint, false));
    }

    instructions.push(Instruction {
        program_id: accounts.program_id,
        accounts: init_accounts,
        data: nft_instruction::InitializeCandyMachine {
            data: machine_data(accounts, params),
        }
        .data(),
    });

    if let Some((lockup_type, number)) = params.lockup {
        instructions.push(set_lockup_settings(
            &accounts.program_id,
            &accounts.candy_machine,
            &accounts.authority,
            &accounts.payer,
            lockup_type,
            number,
        )?);
    }

    if let Some(creator) = params.permissioned_creator {
        instructions.push(set_permissioned_settings(
            &accounts.program_id,
            &accounts.candy_machine,
            &accounts.authority,
            &accounts.payer,
            &creator,
        )?);
    }

    if let Some((creator, ruleset)) = params.ruleset {
        instructions.push(set_ccs_settings(
            &accounts.program_id,
            &accounts.candy_machine,
            &accounts.authority,
            &accounts.payer,
            &creator,
            &ruleset,
        )?);
    }

    Ok(instructions)
}

fn machine_params(args: &CreateArgs) -> Result<MachineParams> {
    let lockup = match (&args.lockup_type, args.lockup_number) {
        (Some(lockup_type), Some(number)) => Some((lockup_type.parse::<LockupType>()?, number)),
        _ => None,
    };

    let ruleset = match &args.ruleset_creator {
        Some(creator) => Some((
            parse_pubkey("ruleset creator", creator)?,
            parse_ruleset(&args.ruleset_name)?,
        )),
        None => None,
    };

    Ok(MachineParams {
        items: args.items,
        price: args.price,
        symbol: args.symbol.clone(),
        seller_fee_basis_points: args.seller_fee_basis_points,
        go_live_date: args.go_live_date.unwrap_or_else(|| Utc::now().timestamp()),
        payment_mint: args
            .payment_mint
            .as_deref()
            .map(|mint| parse_pubkey("payment mint", mint))
            .transpose()?,
        lockup,
        permissioned_creator: args
            .permissioned_creator
            .as_deref()
            .map(|creator| parse_pubkey("permissioned creator", creator))
            .transpose()?,
        ruleset,
    })
}

pub async fn process_create(args: CreateArgs) -> Result<()> {
    let config = tool_setup(&args.network)?;
    let timeout = Duration::from_secs(args.network.timeout);
    let chain = setup_chain(&config, timeout);
    let params = machine_params(&args)?;

    let candy_machine = Keypair::new();
    let authority = &config.keypair;
    let payer = config.fee_payer();
    let accounts = MachineAccounts {
        program_id: match &args.network.program_id {
            Some(program_id) => parse_pubkey("program", program_id)?,
            None => CANDY_MACHINE_ID,
        },
        candy_machine: candy_machine.pubkey(),
        authority: authority.pubkey(),
        payer: payer.pubkey(),
    };

    print_step(1, 2, PAPER_EMOJI, "Preparing candy machine");
    let pb = spinner_with_style();
    pb.set_message("Connecting...");

    let size = machine_account_size(params.items)?;
    let rent = chain.get_minimum_balance_for_rent_exemption(size).await?;

    let create_wallet = match params.payment_mint {
        Some(_) => !probe(&chain, &machine_wallet(&accounts, &params), timeout)
            .await?
            .is_present(),
        None => false,
    };

    let instructions = create_machine_instructions(&accounts, &params, rent, create_wallet)?;
    pb.finish_and_clear();

    print_with_style("", "account size", size.to_string());
    print_with_style("", "rent", rent.to_string());
    print_with_style("", "wallet", machine_wallet(&accounts, &params).to_string());

    println!();
    print_step(2, 2, CANDY_EMOJI, "Creating candy machine");
    let pb = spinner_with_style();
    pb.set_message("Sending transaction...");

    let mut keypairs = vec![authority];
    if payer.pubkey() != authority.pubkey() {
        keypairs.push(payer);
    }
    keypairs.push(&candy_machine);

    let blockhash = chain.get_latest_blockhash().await?;
    let transaction = sign_with(&instructions, &accounts.payer, &keypairs, blockhash)?;
    let signature = submit(&chain, &transaction).await?;

    pb.finish_with_message(format!("{} {}", style("Signature:").bold(), signature));
    println!(
        "{}{} {}",
        CANDY_EMOJI,
        style("Candy machine ID:").bold(),
        candy_machine.pubkey()
    );
    info!("Created candy machine {}: {}", candy_machine.pubkey(), signature);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sighash;

    fn accounts() -> MachineAccounts {
        let authority = Pubkey::new_unique();
        MachineAccounts {
            program_id: CANDY_MACHINE_ID,
            candy_machine: Pubkey::new_unique(),
            authority,
            payer: authority,
        }
    }

    fn params() -> MachineParams {
        MachineParams {
            items: 10,
            price: 10,
            symbol: "SYM".to_string(),
            seller_fee_basis_points: 500,
            go_live_date: 1_700_000_000,
            payment_mint: None,
            lockup: None,
            permissioned_creator: None,
            ruleset: None,
        }
    }

    #[test]
    fn account_size_grows_with_items() {
        assert_eq!(
            machine_account_size(10).unwrap(),
            CONFIG_ARRAY_START + 4 + 10 * CONFIG_LINE_SIZE + 8 + 2 * 2
        );
        assert!(machine_account_size(11).unwrap() > machine_account_size(10).unwrap());
    }

    #[test]
    fn oversized_machine_is_refused() {
        assert!(matches!(
            machine_account_size(u64::MAX),
            Err(CreateError::TooManyItems(u64::MAX))
        ));

        let mut params = params();
        params.items = u64::MAX / 2;
        let result = create_machine_instructions(&accounts(), &params, 1, false);

        assert!(matches!(result, Err(CreateError::TooManyItems(_))));
    }

    #[test]
    fn creators_split_shares_to_authority() {
        let accounts = accounts();
        let data = machine_data(&accounts, &params());

        assert_eq!(data.uuid, uuid_from_pubkey(&accounts.candy_machine));
        assert_eq!(data.creators[0].address, accounts.candy_machine);
        assert_eq!(data.creators[0].share, 0);
        assert_eq!(data.creators[1].address, accounts.authority);
        assert_eq!(data.creators[1].share, 100);
    }

    #[test]
    fn plain_machine_is_allocated_then_initialized() {
        let accounts = accounts();
        let instructions = create_machine_instructions(&accounts, &params(), 1, false).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].program_id, system_program::ID);
        assert_eq!(instructions[1].data[..8], sighash("initialize_candy_machine"));
        // wallet is the authority
        assert_eq!(instructions[1].accounts[1].pubkey, accounts.authority);
    }

    #[test]
    fn payment_mint_is_appended_and_wallet_is_token_account() {
        let accounts = accounts();
        let payment_mint = Pubkey::new_unique();
        let mut params = params();
        params.payment_mint = Some(payment_mint);

        let instructions = create_machine_instructions(&accounts, &params, 1, true).unwrap();

        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].program_id, spl_associated_token_account::ID);
        let init = &instructions[2];
        assert_eq!(
            init.accounts[1].pubkey,
            find_ata(&payment_mint, &accounts.candy_machine)
        );
        assert_eq!(
            init.accounts.last(),
            Some(&AccountMeta::new_readonly(payment_mint, false))
        );
    }

    #[test]
    fn module_settings_follow_initialization() {
        let accounts = accounts();
        let mut params = params();
        params.lockup = Some((LockupType::DurationSeconds, 3600));
        params.permissioned_creator = Some(Pubkey::new_unique());
        params.ruleset = Some((Pubkey::new_unique(), Pubkey::new_unique()));

        let instructions = create_machine_instructions(&accounts, &params, 1, false).unwrap();

        let names: Vec<[u8; 8]> = instructions[2..]
            .iter()
            .map(|ix| {
                let mut discriminator = [0u8; 8];
                discriminator.copy_from_slice(&ix.data[..8]);
                discriminator
            })
            .collect();
        assert_eq!(
            names,
            vec![
                sighash("set_lockup_settings"),
                sighash("set_permissioned_settings"),
                sighash("set_ccs_settings"),
            ]
        );
    }
}
