use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use anchor_lang::{prelude::borsh, AnchorSerialize};

use crate::{
    constants::CREATOR_STANDARD_ID,
    modules::{
        encode_instruction,
        roles::{readonly, writable, AccountRole},
        settings_accounts, ModuleError, ModuleKind, RoleContext,
    },
    pdas::{find_mint_manager_pda, find_module_address},
};

#[derive(AnchorSerialize, Debug)]
pub struct SetCcsSettingsArgs {
    pub creator: Pubkey,
    pub ruleset: Pubkey,
}

/// Roles read by the creator standard validator, which places the minted
/// item under a mint manager bound to the transfer ruleset.
pub fn ruleset_roles(ctx: &RoleContext) -> Vec<AccountRole> {
    let ccs_settings =
        find_module_address(&ctx.program_id, &ctx.candy_machine, ModuleKind::CreatorRuleset);

    vec![
        readonly(ccs_settings),
        writable(find_mint_manager_pda(&ctx.mint)),
        readonly(ctx.ruleset),
        readonly(CREATOR_STANDARD_ID),
    ]
}

pub fn set_ccs_settings(
    program_id: &Pubkey,
    candy_machine: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    creator: &Pubkey,
    ruleset: &Pubkey,
) -> Result<Instruction, ModuleError> {
    let ccs_settings = find_module_address(program_id, candy_machine, ModuleKind::CreatorRuleset);

    encode_instruction(
        program_id,
        "set_ccs_settings",
        settings_accounts(candy_machine, authority, &ccs_settings, payer),
        &SetCcsSettingsArgs {
            creator: *creator,
            ruleset: *ruleset,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdas::find_ruleset_pda;

    #[test]
    fn ruleset_roles_reference_configured_ruleset() {
        let ruleset = find_ruleset_pda("ruleset-no-checks");
        let ctx = RoleContext {
            program_id: Pubkey::new_unique(),
            candy_machine: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            receiving_account: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            ruleset,
        };

        let roles = ruleset_roles(&ctx);

        assert_eq!(roles.len(), 4);
        assert_eq!(roles[2].pubkey, ruleset);
        assert_eq!(roles[3].pubkey, CREATOR_STANDARD_ID);
    }

    #[test]
    fn set_ccs_settings_encodes_creator_then_ruleset() {
        let creator = Pubkey::new_unique();
        let ruleset = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let ix = set_ccs_settings(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &authority,
            &authority,
            &creator,
            &ruleset,
        )
        .unwrap();

        assert_eq!(&ix.data[8..40], creator.as_ref());
        assert_eq!(&ix.data[40..], ruleset.as_ref());
    }
}
