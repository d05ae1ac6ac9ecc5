use std::time::Duration;

use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use tracing::{debug, info};

use crate::{
    candy_machine::{fetch_machine_config, MachineConfig},
    constants::{CANDY_MACHINE_ID, DEFAULT_COMPUTE_UNITS, DEFAULT_RPC_TIMEOUT, DEFAULT_RULESET},
    mint::MintError,
    modules::{
        collection::{link_collection_instruction, CollectionLink},
        roles::{dedupe, force_signer, writable},
        AccountRole, Activation, ExtensionModule, ModuleConfig, ModuleKind, RoleContext,
    },
    network::{probe_all, ChainReader, ProbeResult},
    pdas::{find_ata, find_metadata_pda, find_module_address, find_ruleset_pda},
};

/// Settings of a mint run that do not change between mints.
#[derive(Clone, Debug)]
pub struct MintSettings {
    pub program_id: Pubkey,
    pub candy_machine: Pubkey,
    /// Items are linked to this collection when set.
    pub collection_mint: Option<Pubkey>,
    /// Transfer ruleset enforced by the creator standard module.
    pub ruleset: Pubkey,
    pub compute_units: u32,
    /// Upper bound on every single network read.
    pub timeout: Duration,
    /// Merge identical extension roles before appending them.
    pub dedupe_roles: bool,
}

impl MintSettings {
    pub fn new(candy_machine: Pubkey) -> Self {
        MintSettings {
            program_id: CANDY_MACHINE_ID,
            candy_machine,
            collection_mint: None,
            ruleset: find_ruleset_pda(DEFAULT_RULESET),
            compute_units: DEFAULT_COMPUTE_UNITS,
            timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT),
            dedupe_roles: false,
        }
    }
}

/// Participants of a single mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintContext {
    pub candy_machine: Pubkey,
    /// Address of the fresh mint keypair.
    pub mint: Pubkey,
    /// Minting wallet; receives the item and signs as mint and update authority.
    pub wallet: Pubkey,
    pub payer: Pubkey,
    /// Token account of `wallet` for `mint`, created inline by the mint.
    pub receiving_account: Pubkey,
}

impl MintContext {
    pub fn new(candy_machine: Pubkey, mint: Pubkey, wallet: Pubkey, payer: Option<Pubkey>) -> Self {
        MintContext {
            candy_machine,
            mint,
            wallet,
            payer: payer.unwrap_or(wallet),
            receiving_account: find_ata(&mint, &wallet),
        }
    }

    fn role_context(&self, settings: &MintSettings) -> RoleContext {
        RoleContext {
            program_id: settings.program_id,
            candy_machine: self.candy_machine,
            mint: self.mint,
            receiving_account: self.receiving_account,
            payer: self.payer,
            ruleset: settings.ruleset,
        }
    }
}

/// Everything the extension modules add to a mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub machine: MachineConfig,
    /// One entry per module kind, active or not.
    pub modules: Vec<ExtensionModule>,
    /// Roles appended to the mint instruction, in order.
    pub remaining_accounts: Vec<AccountRole>,
    /// Instructions that must directly follow the mint instruction.
    pub extra_instructions: Vec<Instruction>,
}

impl Resolution {
    pub fn active_modules(&self) -> impl Iterator<Item = &ExtensionModule> {
        self.modules.iter().filter(|module| module.is_active())
    }

    /// Appends the remaining accounts to `base` and marks `mint` as a signer,
    /// returning the mint instruction followed by the extra instructions.
    pub fn mint_instructions(
        &self,
        mut base: Instruction,
        mint: &Pubkey,
    ) -> Result<Vec<Instruction>, MintError> {
        base.accounts.extend(self.remaining_accounts.iter().cloned());

        let promoted = force_signer(&mut base.accounts, mint);
        if promoted != 1 {
            return Err(MintError::MintRoleCount(*mint, promoted));
        }

        let mut instructions = Vec::with_capacity(1 + self.extra_instructions.len());
        instructions.push(base);
        instructions.extend(self.extra_instructions.iter().cloned());

        Ok(instructions)
    }
}

pub struct ExtensionResolver<'a, R: ChainReader + ?Sized> {
    reader: &'a R,
    settings: &'a MintSettings,
}

impl<'a, R: ChainReader + ?Sized> ExtensionResolver<'a, R> {
    pub fn new(reader: &'a R, settings: &'a MintSettings) -> Self {
        ExtensionResolver { reader, settings }
    }

    /// Reads the candy machine, probes the settings account of every probed
    /// module and plans the accounts and instructions they contribute.
    ///
    /// Any failed or timed out read aborts the resolution.
    pub async fn resolve(&self, ctx: &MintContext) -> Result<Resolution, MintError> {
        let machine =
            fetch_machine_config(self.reader, &ctx.candy_machine, self.settings.timeout).await?;

        let addresses: Vec<Pubkey> = ModuleKind::PROBED
            .iter()
            .map(|kind| find_module_address(&self.settings.program_id, &ctx.candy_machine, *kind))
            .collect();
        let probes = probe_all(self.reader, &addresses, self.settings.timeout).await?;

        let modules = discover_modules(self.settings, &machine, ctx, probes);
        for module in modules.iter().filter(|m| m.is_active()) {
            info!("Active module: {} ({})", module.kind, module.address);
        }

        Ok(plan(self.settings, machine, ctx, modules))
    }
}

/// Activation of every module kind, from the machine state, the probe results
/// (in [`ModuleKind::PROBED`] order) and the mint settings.
pub fn discover_modules(
    settings: &MintSettings,
    machine: &MachineConfig,
    ctx: &MintContext,
    probes: Vec<ProbeResult>,
) -> Vec<ExtensionModule> {
    let mut modules = Vec::with_capacity(ModuleKind::ALL.len());

    let payment_address =
        find_module_address(&settings.program_id, &ctx.candy_machine, ModuleKind::Payment);
    modules.push(match machine.token_mint {
        Some(token_mint) => ExtensionModule {
            kind: ModuleKind::Payment,
            address: payment_address,
            activation: Activation::Active(ModuleConfig::Payment { token_mint }),
        },
        None => ExtensionModule::inactive(ModuleKind::Payment, payment_address),
    });

    for (kind, probe) in ModuleKind::PROBED.iter().zip(probes) {
        let address = find_module_address(&settings.program_id, &ctx.candy_machine, *kind);
        modules.push(match probe {
            ProbeResult::Present(data) => ExtensionModule {
                kind: *kind,
                address,
                activation: Activation::Active(ModuleConfig::Settings { data }),
            },
            ProbeResult::Absent => ExtensionModule::inactive(*kind, address),
        });
    }

    let collection_address =
        find_module_address(&settings.program_id, &ctx.candy_machine, ModuleKind::Collection);
    modules.push(match settings.collection_mint {
        Some(mint) => ExtensionModule {
            kind: ModuleKind::Collection,
            address: collection_address,
            activation: Activation::Active(ModuleConfig::Collection { mint }),
        },
        None => ExtensionModule::inactive(ModuleKind::Collection, collection_address),
    });

    modules
}

/// Orders the contributions of the active modules.
///
/// Remaining accounts are the payment roles, then the receiving token
/// account, then the roles of each probed module in probe order. The
/// collection link, when active, is the only extra instruction. With
/// `dedupe_roles`, exact repeats are removed within each module's block.
pub fn plan(
    settings: &MintSettings,
    machine: MachineConfig,
    ctx: &MintContext,
    modules: Vec<ExtensionModule>,
) -> Resolution {
    let role_ctx = ctx.role_context(settings);
    let module = |kind: ModuleKind| modules.iter().find(|m| m.kind == kind);

    // Each validator reads its block positionally, so repeats are only
    // dropped inside a block, never across blocks.
    let mut remaining_accounts = Vec::new();
    let mut append = |roles: Vec<AccountRole>| {
        if settings.dedupe_roles {
            remaining_accounts.extend(dedupe(roles));
        } else {
            remaining_accounts.extend(roles);
        }
    };

    if let Some(payment) = module(ModuleKind::Payment) {
        append(payment.roles(&role_ctx));
    }

    append(vec![writable(ctx.receiving_account)]);

    for kind in ModuleKind::PROBED {
        if let Some(probed) = module(kind) {
            let roles = probed.roles(&role_ctx);
            if !roles.is_empty() {
                debug!("Adding {} {} account(s)", roles.len(), kind);
            }
            append(roles);
        }
    }

    let mut extra_instructions = Vec::new();

    if let Some(ExtensionModule {
        activation: Activation::Active(ModuleConfig::Collection { mint }),
        ..
    }) = module(ModuleKind::Collection)
    {
        extra_instructions.push(link_collection_instruction(
            &settings.program_id,
            &CollectionLink {
                candy_machine: ctx.candy_machine,
                metadata: find_metadata_pda(&ctx.mint),
                payer: ctx.wallet,
                authority: machine.authority,
                collection_mint: *mint,
            },
        ));
    }

    Resolution {
        machine,
        modules,
        remaining_accounts,
        extra_instructions,
    }
}
