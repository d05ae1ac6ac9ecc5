use std::time::Duration;

use anchor_client::solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use anyhow::Result;
use console::style;
use tracing::{debug, error, info};

use crate::{
    cli::NetworkOpts,
    config::{parse_pubkey, parse_ruleset},
    constants::{CANDY_EMOJI, LOOKING_GLASS_EMOJI, SIGNING_EMOJI},
    mint::{
        assemble_instructions, sign_transaction, submit, ExtensionResolver, MintContext, MintError,
        MintNftBuilder, MintSettings, MintSigners, Resolution,
    },
    modules::roles::effective_flags,
    network::{ChainReader, ChainWriter},
    setup::{setup_chain, tool_setup},
    utils::{print_step, print_with_style, spinner_with_style},
};

pub struct MintArgs {
    pub candy_machine: String,
    pub collection_mint: Option<String>,
    pub ruleset_name: String,
    pub compute_units: u32,
    pub dedupe_roles: bool,
    pub network: NetworkOpts,
}

/// A signed mint transaction ready to be submitted.
pub struct PreparedMint {
    pub mint: Pubkey,
    pub resolution: Resolution,
    pub transaction: Transaction,
}

pub async fn process_mint(args: MintArgs) -> Result<()> {
    let config = tool_setup(&args.network)?;
    let settings = mint_settings(&args)?;
    let chain = setup_chain(&config, settings.timeout);

    info!("Minting NFT from candy machine: {}", settings.candy_machine);
    info!("Candy machine program id: {}", settings.program_id);

    print_step(1, 2, LOOKING_GLASS_EMOJI, "Resolving candy machine modules");
    println!("Candy machine ID: {}", settings.candy_machine);

    let pb = spinner_with_style();
    pb.set_message("Connecting...");

    let mint_keypair = Keypair::new();
    let signers = MintSigners {
        wallet: &config.keypair,
        payer: config.payer.as_ref(),
        mint: &mint_keypair,
    };

    let prepared = match prepare_mint(&chain, &settings, &signers).await {
        Ok(prepared) => prepared,
        Err(err) => {
            pb.finish_and_clear();
            error!("{:?}", err);
            return Err(err.into());
        }
    };
    pb.finish_and_clear();

    let machine = &prepared.resolution.machine;

    print_with_style("", "items remaining", machine.items_remaining().to_string());
    let active: Vec<String> = prepared
        .resolution
        .active_modules()
        .map(|module| module.kind.to_string())
        .collect();
    print_with_style(
        "",
        "active modules",
        if active.is_empty() {
            "none".to_string()
        } else {
            active.join(", ")
        },
    );

    println!();
    print_step(2, 2, SIGNING_EMOJI, "Minting");
    let pb = spinner_with_style();
    pb.set_message("Sending mint transaction...");

    let result = submit(&chain, &prepared.transaction).await;

    match result {
        Ok(signature) => {
            pb.finish_with_message(format!("{} {}", style("Signature:").bold(), signature));
            println!(
                "{}{} {}",
                CANDY_EMOJI,
                style("Minted:").bold(),
                prepared.mint
            );
            info!("Minted {} in {}", prepared.mint, signature);
            Ok(())
        }
        Err(err) => {
            pb.finish_with_message(format!(
                "{}",
                style("Could not confirm transaction").red().bold()
            ));
            error!("{:?}", err);
            Err(err.into())
        }
    }
}

fn mint_settings(args: &MintArgs) -> Result<MintSettings> {
    let candy_machine = parse_pubkey("candy machine", &args.candy_machine)
        .map_err(|_| MintError::MalformedMachineId(args.candy_machine.clone()))?;

    let mut settings = MintSettings::new(candy_machine);

    if let Some(program_id) = &args.network.program_id {
        settings.program_id = parse_pubkey("program", program_id)?;
    }

    settings.collection_mint = args
        .collection_mint
        .as_deref()
        .map(|mint| parse_pubkey("collection mint", mint))
        .transpose()?;
    settings.ruleset = parse_ruleset(&args.ruleset_name)?;
    settings.compute_units = args.compute_units;
    settings.timeout = Duration::from_secs(args.network.timeout);
    settings.dedupe_roles = args.dedupe_roles;

    Ok(settings)
}

/// Resolves the active modules and builds the signed mint transaction.
///
/// A machine with no items left is refused before anything is signed. The
/// blockhash is fetched only after every other read has completed.
pub async fn prepare_mint<R>(
    reader: &R,
    settings: &MintSettings,
    signers: &MintSigners<'_>,
) -> Result<PreparedMint, MintError>
where
    R: ChainReader + ?Sized,
{
    let ctx = MintContext::new(
        settings.candy_machine,
        signers.mint.pubkey(),
        signers.wallet.pubkey(),
        signers.payer.map(|payer| payer.pubkey()),
    );

    let resolution = ExtensionResolver::new(reader, settings).resolve(&ctx).await?;
    if resolution.machine.items_remaining() == 0 {
        return Err(MintError::MachineEmpty(settings.candy_machine));
    }

    let base = MintNftBuilder::from_context(&settings.program_id, &resolution.machine, &ctx)
        .build(&settings.program_id)?;
    let mint_instructions = resolution.mint_instructions(base, &ctx.mint)?;
    if let Some((signer, writable)) = mint_instructions
        .first()
        .and_then(|ix| effective_flags(&ix.accounts, &ctx.mint))
    {
        debug!("Mint {}: signer={}, writable={}", ctx.mint, signer, writable);
    }
    let instructions = assemble_instructions(settings.compute_units, mint_instructions);
    info!(
        "Mint instruction carries {} extension account(s), {} instruction(s) total",
        resolution.remaining_accounts.len(),
        instructions.len()
    );

    let blockhash = reader.get_latest_blockhash().await?;
    let transaction = sign_transaction(&instructions, signers, blockhash)?;

    Ok(PreparedMint {
        mint: ctx.mint,
        resolution,
        transaction,
    })
}

/// Mints one item: resolve, assemble, sign and submit.
pub async fn mint<C>(
    chain: &C,
    settings: &MintSettings,
    signers: &MintSigners<'_>,
) -> Result<Signature, MintError>
where
    C: ChainReader + ChainWriter + ?Sized,
{
    let prepared = prepare_mint(chain, settings, signers).await?;
    submit(chain, &prepared.transaction).await
}
