use std::time::Duration;

use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signer};
use anyhow::Result;
use console::style;
use tracing::info;

use crate::{
    candy_machine::fetch_machine_config,
    cli::NetworkOpts,
    config::{parse_pubkey, parse_ruleset, ToolConfig},
    constants::{CANDY_MACHINE_ID, LOCK_EMOJI, PAPER_EMOJI},
    mint::{sign_with, submit, MintError},
    modules::{
        lockup::{set_lockup_settings, LockupType},
        permissioned::set_permissioned_settings,
        ruleset::set_ccs_settings,
        ModuleKind,
    },
    network::{ChainReader, RpcChain},
    pdas::find_module_address,
    setup::{setup_chain, tool_setup},
    utils::{assert_correct_authority, print_step, print_with_style, spinner_with_style},
};

pub struct SetLockupArgs {
    pub candy_machine: String,
    pub lockup_type: String,
    pub number: u64,
    pub network: NetworkOpts,
}

pub struct SetPermissionedArgs {
    pub candy_machine: String,
    pub creator: String,
    pub network: NetworkOpts,
}

pub struct SetRulesetArgs {
    pub candy_machine: String,
    pub creator: String,
    pub ruleset_name: String,
    pub network: NetworkOpts,
}

/// Loaded state every settings command starts from.
struct SettingsSession {
    config: ToolConfig,
    chain: RpcChain,
    program_id: Pubkey,
    candy_machine: Pubkey,
}

impl SettingsSession {
    async fn open(candy_machine: &str, network: &NetworkOpts) -> Result<Self> {
        let config = tool_setup(network)?;
        let timeout = Duration::from_secs(network.timeout);
        let chain = setup_chain(&config, timeout);

        let candy_machine = parse_pubkey("candy machine", candy_machine)
            .map_err(|_| MintError::MalformedMachineId(candy_machine.to_string()))?;
        let program_id = match &network.program_id {
            Some(program_id) => parse_pubkey("program", program_id)?,
            None => CANDY_MACHINE_ID,
        };

        print_step(1, 2, LOCK_EMOJI, "Checking candy machine authority");
        let pb = spinner_with_style();
        pb.set_message("Connecting...");
        let machine = fetch_machine_config(&chain, &candy_machine, timeout).await?;
        pb.finish_and_clear();

        assert_correct_authority(&config.keypair.pubkey(), &candy_machine, &machine)?;

        Ok(SettingsSession {
            config,
            chain,
            program_id,
            candy_machine,
        })
    }

    /// Signs `instruction` with the authority (and distinct payer) and submits it.
    async fn send(&self, kind: ModuleKind, instruction: Instruction) -> Result<()> {
        println!();
        print_step(2, 2, PAPER_EMOJI, &format!("Setting {} settings", kind));

        let pb = spinner_with_style();
        pb.set_message("Sending transaction...");

        let authority = &self.config.keypair;
        let payer = self.config.fee_payer();
        let mut keypairs = vec![authority];
        if payer.pubkey() != authority.pubkey() {
            keypairs.push(payer);
        }

        let blockhash = self.chain.get_latest_blockhash().await?;
        let transaction = sign_with(&[instruction], &payer.pubkey(), &keypairs, blockhash)?;
        let signature = submit(&self.chain, &transaction).await?;

        pb.finish_with_message(format!("{} {}", style("Signature:").bold(), signature));
        print_with_style(
            "",
            "settings account",
            find_module_address(&self.program_id, &self.candy_machine, kind).to_string(),
        );
        info!("Set {} settings of {}: {}", kind, self.candy_machine, signature);

        Ok(())
    }

    fn authority(&self) -> Pubkey {
        self.config.keypair.pubkey()
    }

    fn payer(&self) -> Pubkey {
        self.config.fee_payer().pubkey()
    }
}

pub async fn process_set_lockup(args: SetLockupArgs) -> Result<()> {
    let lockup_type: LockupType = args.lockup_type.parse()?;
    let session = SettingsSession::open(&args.candy_machine, &args.network).await?;

    let instruction = set_lockup_settings(
        &session.program_id,
        &session.candy_machine,
        &session.authority(),
        &session.payer(),
        lockup_type,
        args.number,
    )?;

    session.send(ModuleKind::Lockup, instruction).await
}

pub async fn process_set_permissioned(args: SetPermissionedArgs) -> Result<()> {
    let creator = parse_pubkey("creator", &args.creator)?;
    let session = SettingsSession::open(&args.candy_machine, &args.network).await?;

    let instruction = set_permissioned_settings(
        &session.program_id,
        &session.candy_machine,
        &session.authority(),
        &session.payer(),
        &creator,
    )?;

    session.send(ModuleKind::Permissioned, instruction).await
}

pub async fn process_set_ruleset(args: SetRulesetArgs) -> Result<()> {
    let creator = parse_pubkey("creator", &args.creator)?;
    let ruleset = parse_ruleset(&args.ruleset_name)?;
    let session = SettingsSession::open(&args.candy_machine, &args.network).await?;

    let instruction = set_ccs_settings(
        &session.program_id,
        &session.candy_machine,
        &session.authority(),
        &session.payer(),
        &creator,
        &ruleset,
    )?;

    session.send(ModuleKind::CreatorRuleset, instruction).await
}
