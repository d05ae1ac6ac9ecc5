use std::{
    fmt::{self, Display},
    str::FromStr,
};

use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use anchor_lang::{prelude::borsh, AnchorSerialize};

use crate::{
    constants::{TIME_INVALIDATOR_ID, TOKEN_MANAGER_ID},
    modules::{
        encode_instruction,
        roles::{readonly, writable, AccountRole},
        settings_accounts, ModuleError, ModuleKind, RoleContext,
    },
    pdas::{
        find_ata, find_mint_counter_pda, find_module_address, find_time_invalidator_pda,
        find_token_manager_pda,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockupType {
    /// Items unlock at a fixed unix timestamp.
    Expiration = 1,
    /// Items unlock a number of seconds after they are minted.
    DurationSeconds = 2,
}

impl FromStr for LockupType {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expiration" => Ok(LockupType::Expiration),
            "duration" => Ok(LockupType::DurationSeconds),
            _ => Err(ModuleError::InvalidLockupType(s.to_string())),
        }
    }
}

impl Display for LockupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockupType::Expiration => write!(f, "expiration"),
            LockupType::DurationSeconds => write!(f, "duration"),
        }
    }
}

#[derive(AnchorSerialize, Debug)]
pub struct SetLockupSettingsArgs {
    pub lockup_type: u8,
    pub number: u64,
}

/// Roles read by the lockup validator: the settings account, the token
/// manager holding the minted item and the invalidator releasing it.
pub fn lockup_roles(ctx: &RoleContext) -> Vec<AccountRole> {
    let lockup_settings =
        find_module_address(&ctx.program_id, &ctx.candy_machine, ModuleKind::Lockup);
    let token_manager = find_token_manager_pda(&ctx.mint);
    let time_invalidator = find_time_invalidator_pda(&token_manager);

    vec![
        readonly(lockup_settings),
        writable(token_manager),
        writable(find_ata(&ctx.mint, &token_manager)),
        writable(find_mint_counter_pda(&ctx.mint)),
        readonly(TOKEN_MANAGER_ID),
        writable(time_invalidator),
        readonly(TIME_INVALIDATOR_ID),
    ]
}

pub fn set_lockup_settings(
    program_id: &Pubkey,
    candy_machine: &Pubkey,
    authority: &Pubkey,
    payer: &Pubkey,
    lockup_type: LockupType,
    number: u64,
) -> Result<Instruction, ModuleError> {
    let lockup_settings = find_module_address(program_id, candy_machine, ModuleKind::Lockup);

    encode_instruction(
        program_id,
        "set_lockup_settings",
        settings_accounts(candy_machine, authority, &lockup_settings, payer),
        &SetLockupSettingsArgs {
            lockup_type: lockup_type as u8,
            number,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sighash;

    #[test]
    fn parse_lockup_type() {
        assert_eq!(
            "duration".parse::<LockupType>().unwrap(),
            LockupType::DurationSeconds
        );
        assert_eq!(
            "expiration".parse::<LockupType>().unwrap(),
            LockupType::Expiration
        );
        assert!("forever".parse::<LockupType>().is_err());
    }

    #[test]
    fn set_lockup_settings_encodes_args() {
        let program_id = Pubkey::new_unique();
        let candy_machine = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let ix = set_lockup_settings(
            &program_id,
            &candy_machine,
            &authority,
            &authority,
            LockupType::DurationSeconds,
            5,
        )
        .unwrap();

        assert_eq!(ix.program_id, program_id);
        assert_eq!(&ix.data[..8], &sighash("set_lockup_settings"));
        assert_eq!(ix.data[8], LockupType::DurationSeconds as u8);
        assert_eq!(&ix.data[9..], &5u64.to_le_bytes());
        assert_eq!(
            ix.accounts[2].pubkey,
            find_module_address(&program_id, &candy_machine, ModuleKind::Lockup)
        );
    }

    #[test]
    fn lockup_roles_never_reference_the_mint() {
        let ctx = RoleContext {
            program_id: Pubkey::new_unique(),
            candy_machine: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            receiving_account: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            ruleset: Pubkey::new_unique(),
        };

        let roles = lockup_roles(&ctx);

        assert_eq!(roles.len(), 7);
        assert!(roles.iter().all(|r| r.pubkey != ctx.mint && !r.is_signer));
    }
}
