use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use anchor_lang::{prelude::borsh, AnchorSerialize};

use crate::{
    constants::TOKEN_MANAGER_ID,
    modules::{
        encode_instruction,
        roles::{readonly, writable, AccountRole},
        settings_accounts, ModuleError, ModuleKind, RoleContext,
    },
    pdas::{find_ata, find_mint_counter_pda, find_module_address, find_token_manager_pda},
};

#[derive(AnchorSerialize, Debug)]
pub struct SetPermissionedSettingsArgs {
    pub creator: Pubkey,
}

/// Roles read by the permissioned validator. Minted items are issued through
/// the token manager so that transfers require the creator's permission.
pub fn permissioned_roles(ctx: &RoleContext) -> Vec<AccountRole> {
    let permissioned_settings =
        find_module_address(&ctx.program_id, &ctx.candy_machine, ModuleKind::Permissioned);
    let token_manager = find_token_manager_pda(&ctx.mint);

    vec![
        readonly(permissioned_settings),
        writable(token_manager),
        writable(find_ata(&ctx.mint, &token_manager)),
        writable(find_mint_counter_pda(&ctx.mint)),
        writable(ctx.receiving_account),
        readonly(TOKEN_MANAGER_ID),
    ]
}

pub fn set_permissioned_settings(
    program_id: &Pubkey,
    candy_machine: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    creator: &Pubkey,
) -> Result<Instruction, ModuleError> {
    let permissioned_settings =
        find_module_address(program_id, candy_machine, ModuleKind::Permissioned);

    encode_instruction(
        program_id,
        "set_permissioned_settings",
        settings_accounts(candy_machine, authority, &permissioned_settings, payer),
        &SetPermissionedSettingsArgs { creator: *creator },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissioned_roles_start_with_settings_account() {
        let ctx = RoleContext {
            program_id: Pubkey::new_unique(),
            candy_machine: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            receiving_account: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            ruleset: Pubkey::new_unique(),
        };

        let roles = permissioned_roles(&ctx);

        assert_eq!(
            roles[0].pubkey,
            find_module_address(&ctx.program_id, &ctx.candy_machine, ModuleKind::Permissioned)
        );
        assert!(!roles[0].is_writable);
        assert!(roles.iter().any(|r| r.pubkey == ctx.receiving_account));
        assert!(roles.iter().all(|r| r.pubkey != ctx.mint));
    }

    #[test]
    fn set_permissioned_settings_encodes_creator() {
        let program_id = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let ix = set_permissioned_settings(
            &program_id,
            &Pubkey::new_unique(),
            &authority,
            &authority,
            &creator,
        )
        .unwrap();

        assert_eq!(&ix.data[8..], creator.as_ref());
        assert!(ix.accounts[1].is_signer);
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);
    }
}
