use std::time::Duration;

use anchor_client::solana_sdk::native_token::LAMPORTS_PER_SOL;
use anyhow::Result;
use console::style;

use crate::{
    candy_machine::fetch_machine_config,
    cli::NetworkOpts,
    config::parse_pubkey,
    constants::{CANDY_EMOJI, LOOKING_GLASS_EMOJI},
    mint::{discover_modules, MintContext, MintError, MintSettings},
    modules::{Activation, ModuleConfig, ModuleKind},
    network::{probe_all, RpcChain},
    pdas::find_module_address,
    setup::resolve_rpc_url,
    utils::{format_timestamp, print_step, print_with_style, spinner_with_style},
};

pub struct ShowArgs {
    pub candy_machine: String,
    pub network: NetworkOpts,
}

pub async fn process_show(args: ShowArgs) -> Result<()> {
    print_step(1, 1, LOOKING_GLASS_EMOJI, "Looking up candy machine");

    let pb = spinner_with_style();
    pb.set_message("Connecting...");

    let candy_machine_id = parse_pubkey("candy machine", &args.candy_machine)
        .map_err(|_| MintError::MalformedMachineId(args.candy_machine.clone()))?;

    let mut settings = MintSettings::new(candy_machine_id);
    settings.timeout = Duration::from_secs(args.network.timeout);
    if let Some(program_id) = &args.network.program_id {
        settings.program_id = parse_pubkey("program", program_id)?;
    }

    // only reads: no keypair is needed
    let chain = RpcChain::new(resolve_rpc_url(&args.network)?, settings.timeout);

    let machine = fetch_machine_config(&chain, &candy_machine_id, settings.timeout).await?;
    let addresses: Vec<_> = ModuleKind::PROBED
        .iter()
        .map(|kind| find_module_address(&settings.program_id, &candy_machine_id, *kind))
        .collect();
    let probes = probe_all(&chain, &addresses, settings.timeout).await?;

    // the mint and wallet do not affect module activation
    let ctx = MintContext::new(candy_machine_id, machine.authority, machine.authority, None);
    let modules = discover_modules(&settings, &machine, &ctx, probes);

    pb.finish_and_clear();

    println!(
        "\n{}{} {}",
        CANDY_EMOJI,
        style("Candy machine ID:").dim(),
        &candy_machine_id
    );

    println!(" {}", style(":").dim());
    print_with_style("", "authority", machine.authority.to_string());
    print_with_style("", "wallet", machine.wallet.to_string());
    print_with_style(
        "",
        "token mint",
        machine
            .token_mint
            .map(|mint| mint.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );
    print_with_style("", "items redeemed", machine.items_redeemed.to_string());
    print_with_style("", "items available", machine.items_available.to_string());
    print_with_style("", "uuid", machine.uuid.clone());
    print_with_style(
        "",
        "price",
        match machine.token_mint {
            Some(_) => machine.price.to_string(),
            None => format!(
                "◎{} ({})",
                machine.price as f64 / LAMPORTS_PER_SOL as f64,
                machine.price
            ),
        },
    );
    print_with_style("", "symbol", machine.symbol.trim_end_matches('\0').to_string());
    print_with_style(
        "",
        "seller fee basis points",
        format_royalty(machine.seller_fee_basis_points),
    );
    print_with_style(
        "",
        "go live date",
        machine
            .go_live_date
            .map(format_timestamp)
            .unwrap_or_else(|| "none".to_string()),
    );
    print_with_style("", "creators", "".to_string());

    for (index, creator) in machine.creators.iter().enumerate() {
        let info = format!(
            "{} ({}%{})",
            creator.address,
            creator.share,
            if creator.verified { ", verified" } else { "" },
        );
        print_with_style(":   ", &(index + 1).to_string(), info);
    }

    // extension modules

    print_with_style("", "modules", "".to_string());

    for module in &modules {
        let status = match &module.activation {
            Activation::Active(ModuleConfig::Payment { token_mint }) => {
                format!("active (paid in {})", token_mint)
            }
            Activation::Active(ModuleConfig::Settings { data }) => {
                format!("active ({}, {} bytes)", module.address, data.len())
            }
            // collection linkage is a mint option, not machine state
            Activation::Active(ModuleConfig::Collection { .. }) | Activation::Inactive => {
                if module.kind == ModuleKind::Collection {
                    "set with --collection-mint".to_string()
                } else {
                    "inactive".to_string()
                }
            }
        };
        print_with_style(":   ", &module.kind.to_string(), status);
    }

    Ok(())
}

/// Royalty as a percentage followed by the raw basis points.
pub fn format_royalty(seller_fee_basis_points: u16) -> String {
    format!(
        "{}% ({})",
        seller_fee_basis_points as f64 / 100.0,
        seller_fee_basis_points
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn royalty_keeps_fractional_percent() {
        assert_eq!(format_royalty(250), "2.5% (250)");
        assert_eq!(format_royalty(500), "5% (500)");
        assert_eq!(format_royalty(1), "0.01% (1)");
    }
}
