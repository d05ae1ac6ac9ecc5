//! Extension modules a candy machine can be configured with.

pub mod collection;
pub mod errors;
pub mod lockup;
pub mod payment;
pub mod permissioned;
pub mod roles;
pub mod ruleset;

use std::fmt::{self, Display};

use anchor_client::solana_sdk::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use anchor_lang::AnchorSerialize;

pub use errors::*;
pub use roles::AccountRole;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Payment,
    Lockup,
    Permissioned,
    CreatorRuleset,
    Collection,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 5] = [
        ModuleKind::Payment,
        ModuleKind::Lockup,
        ModuleKind::Permissioned,
        ModuleKind::CreatorRuleset,
        ModuleKind::Collection,
    ];

    /// Modules whose activation is decided by probing their settings account,
    /// in the order their accounts are read by the candy machine program.
    pub const PROBED: [ModuleKind; 3] = [
        ModuleKind::Lockup,
        ModuleKind::Permissioned,
        ModuleKind::CreatorRuleset,
    ];
}

impl Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleKind::Payment => "payment",
            ModuleKind::Lockup => "lockup",
            ModuleKind::Permissioned => "permissioned",
            ModuleKind::CreatorRuleset => "creator ruleset",
            ModuleKind::Collection => "collection",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleConfig {
    /// Mint price is paid in this token instead of SOL.
    Payment { token_mint: Pubkey },
    /// Raw contents of the module settings account.
    Settings { data: Vec<u8> },
    /// Items are linked to this collection as they are minted.
    Collection { mint: Pubkey },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    Active(ModuleConfig),
    Inactive,
}

/// Accounts a module's role builder derives its roles from.
#[derive(Clone, Debug)]
pub struct RoleContext {
    pub program_id: Pubkey,
    pub candy_machine: Pubkey,
    pub mint: Pubkey,
    pub receiving_account: Pubkey,
    pub payer: Pubkey,
    pub ruleset: Pubkey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionModule {
    pub kind: ModuleKind,
    pub address: Pubkey,
    pub activation: Activation,
}

impl ExtensionModule {
    pub fn inactive(kind: ModuleKind, address: Pubkey) -> Self {
        ExtensionModule {
            kind,
            address,
            activation: Activation::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.activation, Activation::Active(_))
    }

    /// Ordered roles the module appends to the mint instruction.
    ///
    /// Inactive modules contribute nothing; the collection module contributes
    /// an instruction of its own instead of roles.
    pub fn roles(&self, ctx: &RoleContext) -> Vec<AccountRole> {
        let config = match &self.activation {
            Activation::Active(config) => config,
            Activation::Inactive => return Vec::new(),
        };

        match (self.kind, config) {
            (ModuleKind::Payment, ModuleConfig::Payment { token_mint }) => {
                payment::payment_roles(token_mint, &ctx.payer)
            }
            (ModuleKind::Lockup, _) => lockup::lockup_roles(ctx),
            (ModuleKind::Permissioned, _) => permissioned::permissioned_roles(ctx),
            (ModuleKind::CreatorRuleset, _) => ruleset::ruleset_roles(ctx),
            _ => Vec::new(),
        }
    }
}

/// Anchor instruction discriminator for `name`.
pub fn sighash(name: &str) -> [u8; 8] {
    let preimage = format!("global:{}", name);

    let mut sighash = [0u8; 8];
    sighash.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    sighash
}

/// Accounts shared by every module settings instruction.
pub(crate) fn settings_accounts(
    candy_machine: &Pubkey,
    authority: &Pubkey,
    settings: &Pubkey,
    payer: &Pubkey,
) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(*candy_machine, false),
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*settings, false),
        AccountMeta::new(*payer, true),
        AccountMeta::new_readonly(system_program::ID, false),
    ]
}

pub(crate) fn encode_instruction<T: AnchorSerialize>(
    program_id: &Pubkey,
    name: &str,
    accounts: Vec<AccountMeta>,
    args: &T,
) -> Result<Instruction, ModuleError> {
    let mut data = sighash(name).to_vec();
    data.extend(args.try_to_vec()?);

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_nft_sighash_matches_program() {
        assert_eq!(sighash("mint_nft"), [211, 57, 6, 167, 15, 219, 35, 251]);
    }

    #[test]
    fn inactive_module_contributes_no_roles() {
        let ctx = RoleContext {
            program_id: Pubkey::new_unique(),
            candy_machine: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            receiving_account: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            ruleset: Pubkey::new_unique(),
        };

        for kind in ModuleKind::ALL {
            let module = ExtensionModule::inactive(kind, Pubkey::new_unique());
            assert!(module.roles(&ctx).is_empty(), "{}", kind);
        }
    }

    #[test]
    fn probe_order_is_fixed() {
        assert_eq!(
            ModuleKind::PROBED,
            [
                ModuleKind::Lockup,
                ModuleKind::Permissioned,
                ModuleKind::CreatorRuleset
            ]
        );
        assert!(!ModuleKind::PROBED.contains(&ModuleKind::Payment));
        assert!(!ModuleKind::PROBED.contains(&ModuleKind::Collection));
    }
}
