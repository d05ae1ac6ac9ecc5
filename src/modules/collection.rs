use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey, sysvar};
use anchor_lang::{InstructionData, ToAccountMetas};
use mpl_candy_machine::{accounts as nft_accounts, instruction as nft_instruction};

use crate::pdas::{
    find_collection_authority_record_pda, find_collection_pda, find_master_edition_pda,
    find_metadata_pda,
};

/// Accounts of the instruction linking a freshly minted item to the machine's
/// collection.
#[derive(Clone, Debug)]
pub struct CollectionLink {
    pub candy_machine: Pubkey,
    /// Metadata of the item being minted.
    pub metadata: Pubkey,
    /// Must be the signer of the preceding mint instruction.
    pub payer: Pubkey,
    /// Authority of the candy machine.
    pub authority: Pubkey,
    pub collection_mint: Pubkey,
}

/// Builds the `set_collection_during_mint` instruction. The candy machine
/// program only honours it when it immediately follows the mint instruction.
pub fn link_collection_instruction(program_id: &Pubkey, link: &CollectionLink) -> Instruction {
    let (collection_pda, _) = find_collection_pda(program_id, &link.candy_machine);

    let accounts = nft_accounts::SetCollectionDuringMint {
        candy_machine: link.candy_machine,
        metadata: link.metadata,
        payer: link.payer,
        collection_pda,
        token_metadata_program: mpl_token_metadata::ID,
        instructions: sysvar::instructions::ID,
        collection_mint: link.collection_mint,
        collection_metadata: find_metadata_pda(&link.collection_mint),
        collection_master_edition: find_master_edition_pda(&link.collection_mint),
        authority: link.authority,
        collection_authority_record: find_collection_authority_record_pda(
            &link.collection_mint,
            &collection_pda,
        ),
    };

    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: nft_instruction::SetCollectionDuringMint {}.data(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sighash;

    #[test]
    fn link_collection_targets_collection_accounts() {
        let program_id = Pubkey::new_unique();
        let link = CollectionLink {
            candy_machine: Pubkey::new_unique(),
            metadata: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            collection_mint: Pubkey::new_unique(),
        };

        let ix = link_collection_instruction(&program_id, &link);

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data, sighash("set_collection_during_mint").to_vec());
        assert_eq!(ix.accounts.len(), 11);
        assert_eq!(ix.accounts[0].pubkey, link.candy_machine);
        assert_eq!(
            ix.accounts[3].pubkey,
            find_collection_pda(&program_id, &link.candy_machine).0
        );
        assert_eq!(ix.accounts[6].pubkey, link.collection_mint);
    }
}
