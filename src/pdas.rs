use anchor_client::solana_sdk::pubkey::Pubkey;
use mpl_token_metadata::pda::{
    find_collection_authority_account, find_master_edition_account, find_metadata_account,
};
use spl_associated_token_account::get_associated_token_address;

use crate::{constants::*, modules::ModuleKind};

pub fn find_metadata_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = find_metadata_account(mint);

    pda
}

pub fn find_master_edition_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = find_master_edition_account(mint);

    pda
}

pub fn find_collection_authority_record_pda(
    collection_mint: &Pubkey,
    collection_pda: &Pubkey,
) -> Pubkey {
    let (pda, _bump) = find_collection_authority_account(collection_mint, collection_pda);

    pda
}

pub fn find_candy_machine_creator_pda(program_id: &Pubkey, candy_machine: &Pubkey) -> (Pubkey, u8) {
    // Derive creator account, used as the signing creator of every minted item
    let creator_seeds = &[CANDY_MACHINE_PREFIX.as_bytes(), candy_machine.as_ref()];

    Pubkey::find_program_address(creator_seeds, program_id)
}

pub fn find_collection_pda(program_id: &Pubkey, candy_machine: &Pubkey) -> (Pubkey, u8) {
    let collection_seeds = &[COLLECTION_PREFIX.as_bytes(), candy_machine.as_ref()];

    Pubkey::find_program_address(collection_seeds, program_id)
}

/// Derives the address of an extension module for a candy machine.
///
/// Settings-based modules live at a PDA of the candy machine program seeded with
/// the module seed and the candy machine address. The collection module resolves
/// to the collection PDA. The payment module has no account of its own and
/// resolves to the candy machine itself, since its activation is read from the
/// machine's `token_mint`.
pub fn find_module_address(program_id: &Pubkey, candy_machine: &Pubkey, kind: ModuleKind) -> Pubkey {
    match kind {
        ModuleKind::Payment => *candy_machine,
        ModuleKind::Collection => find_collection_pda(program_id, candy_machine).0,
        ModuleKind::Lockup => find_settings_pda(program_id, candy_machine, LOCKUP_SETTINGS_SEED),
        ModuleKind::Permissioned => {
            find_settings_pda(program_id, candy_machine, PERMISSIONED_SETTINGS_SEED)
        }
        ModuleKind::CreatorRuleset => {
            find_settings_pda(program_id, candy_machine, CCS_SETTINGS_SEED)
        }
    }
}

fn find_settings_pda(program_id: &Pubkey, candy_machine: &Pubkey, seed: &str) -> Pubkey {
    let (pda, _bump) =
        Pubkey::find_program_address(&[seed.as_bytes(), candy_machine.as_ref()], program_id);

    pda
}

pub fn find_ata(mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}

pub fn find_token_manager_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = Pubkey::find_program_address(
        &[TOKEN_MANAGER_SEED.as_bytes(), mint.as_ref()],
        &TOKEN_MANAGER_ID,
    );

    pda
}

pub fn find_mint_counter_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = Pubkey::find_program_address(
        &[MINT_COUNTER_SEED.as_bytes(), mint.as_ref()],
        &TOKEN_MANAGER_ID,
    );

    pda
}

pub fn find_time_invalidator_pda(token_manager: &Pubkey) -> Pubkey {
    let (pda, _bump) = Pubkey::find_program_address(
        &[TIME_INVALIDATOR_SEED.as_bytes(), token_manager.as_ref()],
        &TIME_INVALIDATOR_ID,
    );

    pda
}

pub fn find_mint_manager_pda(mint: &Pubkey) -> Pubkey {
    let (pda, _bump) = Pubkey::find_program_address(
        &[MINT_MANAGER_SEED.as_bytes(), mint.as_ref()],
        &CREATOR_STANDARD_ID,
    );

    pda
}

pub fn find_ruleset_pda(name: &str) -> Pubkey {
    let (pda, _bump) = Pubkey::find_program_address(
        &[RULESET_SEED.as_bytes(), name.as_bytes()],
        &CREATOR_STANDARD_ID,
    );

    pda
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_addresses_are_deterministic() {
        let candy_machine = Pubkey::new_unique();

        for kind in ModuleKind::ALL {
            let first = find_module_address(&CANDY_MACHINE_ID, &candy_machine, kind);
            let second = find_module_address(&CANDY_MACHINE_ID, &candy_machine, kind);
            assert_eq!(first, second, "{:?}", kind);
        }
    }

    #[test]
    fn module_addresses_are_distinct_per_kind() {
        let candy_machine = Pubkey::new_unique();
        let lockup = find_module_address(&CANDY_MACHINE_ID, &candy_machine, ModuleKind::Lockup);
        let permissioned =
            find_module_address(&CANDY_MACHINE_ID, &candy_machine, ModuleKind::Permissioned);
        let ruleset =
            find_module_address(&CANDY_MACHINE_ID, &candy_machine, ModuleKind::CreatorRuleset);
        let collection =
            find_module_address(&CANDY_MACHINE_ID, &candy_machine, ModuleKind::Collection);

        assert_ne!(lockup, permissioned);
        assert_ne!(permissioned, ruleset);
        assert_ne!(ruleset, collection);
        assert_ne!(lockup, collection);
    }

    #[test]
    fn module_addresses_depend_on_machine() {
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        assert_ne!(
            find_module_address(&CANDY_MACHINE_ID, &first, ModuleKind::Lockup),
            find_module_address(&CANDY_MACHINE_ID, &second, ModuleKind::Lockup)
        );
    }

    #[test]
    fn ata_matches_spl_derivation() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let seeds: &[&[u8]] = &[
            &owner.to_bytes(),
            &spl_token::ID.to_bytes(),
            &mint.to_bytes(),
        ];
        let (expected, _) =
            Pubkey::find_program_address(seeds, &spl_associated_token_account::ID);

        assert_eq!(find_ata(&mint, &owner), expected);
    }
}
