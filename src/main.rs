use std::{fs::OpenOptions, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use candy_mint_cli::{
    cli::{Cli, Commands},
    constants::{COMPLETE_EMOJI, ERROR_EMOJI, LOG_FILE},
    create::{process_create, CreateArgs},
    mint::{process_mint, MintArgs},
    parse::parse_tool_errors,
    settings::{
        process_set_lockup, process_set_permissioned, process_set_ruleset, SetLockupArgs,
        SetPermissionedArgs, SetRulesetArgs,
    },
    show::{process_show, ShowArgs},
};
use clap::Parser;
use console::style;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{self, filter::LevelFilter, prelude::*, EnvFilter};

fn setup_logging(level: Option<EnvFilter>) -> Result<()> {
    // Log in current directory for now.
    let log_path = PathBuf::from(LOG_FILE);

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Prioritize user-provided level, otherwise read from RUST_LOG env var for log level, fall back to "trace" if not set.
    let env_filter = if let Some(filter) = level {
        filter
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"))
    };

    let formatting_layer = BunyanFormattingLayer::new("candy-mint".into(), file);
    let level_filter = LevelFilter::from_str(&env_filter.to_string())?;

    let subscriber = tracing_subscriber::registry()
        .with(formatting_layer.with_filter(level_filter))
        .with(JsonStorageLayer);

    set_global_default(subscriber)?;

    Ok(())
}

#[tokio::main(worker_threads = 4)]
async fn main() {
    match run().await {
        Ok(()) => {
            println!(
                "\n{}{}",
                COMPLETE_EMOJI,
                style("Command successful.").green().bold().dim()
            );
        }
        Err(err) => {
            let parsed_err = parse_tool_errors(&err.to_string());

            println!(
                "\n{}{} {}",
                ERROR_EMOJI,
                style("Error running command (re-run needed):").red(),
                parsed_err,
            );
            // finished the program with an error code to the OS
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    solana_logger::setup_with_default("solana=off");

    // a missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(user_filter) = cli.log_level {
        let filter = EnvFilter::from_str(&user_filter).map_err(|_| {
            anyhow!(
                "Invalid log level: {:?}.\n Valid levels are: trace, debug, info, warn, error.",
                user_filter
            )
        })?;
        setup_logging(Some(filter))?;
    } else {
        setup_logging(None)?;
    }

    tracing::info!("Candy mint starting.");

    match cli.command {
        Commands::Mint {
            candy_machine,
            collection_mint,
            ruleset_name,
            compute_units,
            dedupe_roles,
            network,
        } => {
            process_mint(MintArgs {
                candy_machine,
                collection_mint,
                ruleset_name,
                compute_units,
                dedupe_roles,
                network,
            })
            .await?
        }
        Commands::Show {
            candy_machine,
            network,
        } => {
            process_show(ShowArgs {
                candy_machine,
                network,
            })
            .await?
        }
        Commands::Create {
            items,
            price,
            symbol,
            seller_fee_basis_points,
            go_live_date,
            payment_mint,
            lockup_type,
            lockup_number,
            permissioned_creator,
            ruleset_creator,
            ruleset_name,
            network,
        } => {
            process_create(CreateArgs {
                items,
                price,
                symbol,
                seller_fee_basis_points,
                go_live_date,
                payment_mint,
                lockup_type,
                lockup_number,
                permissioned_creator,
                ruleset_creator,
                ruleset_name,
                network,
            })
            .await?
        }
        Commands::SetLockup {
            candy_machine,
            lockup_type,
            number,
            network,
        } => {
            process_set_lockup(SetLockupArgs {
                candy_machine,
                lockup_type,
                number,
                network,
            })
            .await?
        }
        Commands::SetPermissioned {
            candy_machine,
            creator,
            network,
        } => {
            process_set_permissioned(SetPermissionedArgs {
                candy_machine,
                creator,
                network,
            })
            .await?
        }
        Commands::SetRuleset {
            candy_machine,
            creator,
            ruleset_name,
            network,
        } => {
            process_set_ruleset(SetRulesetArgs {
                candy_machine,
                creator,
                ruleset_name,
                network,
            })
            .await?
        }
    }

    Ok(())
}
