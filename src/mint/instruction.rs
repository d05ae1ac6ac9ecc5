use anchor_client::solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program, sysvar};
use anchor_lang::{InstructionData, ToAccountMetas};
use mpl_candy_machine::{accounts as nft_accounts, instruction as nft_instruction};

use crate::{
    candy_machine::MachineConfig,
    mint::{MintContext, MintError},
    pdas::{find_candy_machine_creator_pda, find_master_edition_pda, find_metadata_pda},
};

/// Builder for the base `mint_nft` instruction.
///
/// Every account role must be supplied before [`MintNftBuilder::build`]
/// succeeds. The mint account is emitted as a non-signer; the mint flow
/// promotes it once the extension accounts are appended.
#[derive(Clone, Debug, Default)]
pub struct MintNftBuilder {
    candy_machine: Option<Pubkey>,
    candy_machine_creator: Option<(Pubkey, u8)>,
    payer: Option<Pubkey>,
    wallet: Option<Pubkey>,
    metadata: Option<Pubkey>,
    mint: Option<Pubkey>,
    mint_authority: Option<Pubkey>,
    update_authority: Option<Pubkey>,
    master_edition: Option<Pubkey>,
}

impl MintNftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills every role from the machine state and the mint context.
    pub fn from_context(program_id: &Pubkey, machine: &MachineConfig, ctx: &MintContext) -> Self {
        MintNftBuilder::new()
            .candy_machine(ctx.candy_machine)
            .candy_machine_creator(find_candy_machine_creator_pda(program_id, &ctx.candy_machine))
            .payer(ctx.payer)
            .wallet(machine.wallet)
            .metadata(find_metadata_pda(&ctx.mint))
            .mint(ctx.mint)
            .mint_authority(ctx.wallet)
            .update_authority(ctx.wallet)
            .master_edition(find_master_edition_pda(&ctx.mint))
    }

    pub fn candy_machine(mut self, candy_machine: Pubkey) -> Self {
        self.candy_machine = Some(candy_machine);
        self
    }

    pub fn candy_machine_creator(mut self, (creator, bump): (Pubkey, u8)) -> Self {
        self.candy_machine_creator = Some((creator, bump));
        self
    }

    pub fn payer(mut self, payer: Pubkey) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Treasury of the candy machine.
    pub fn wallet(mut self, wallet: Pubkey) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn metadata(mut self, metadata: Pubkey) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn mint(mut self, mint: Pubkey) -> Self {
        self.mint = Some(mint);
        self
    }

    pub fn mint_authority(mut self, mint_authority: Pubkey) -> Self {
        self.mint_authority = Some(mint_authority);
        self
    }

    pub fn update_authority(mut self, update_authority: Pubkey) -> Self {
        self.update_authority = Some(update_authority);
        self
    }

    pub fn master_edition(mut self, master_edition: Pubkey) -> Self {
        self.master_edition = Some(master_edition);
        self
    }

    #[allow(deprecated)]
    pub fn build(&self, program_id: &Pubkey) -> Result<Instruction, MintError> {
        let (candy_machine_creator, creator_bump) = self
            .candy_machine_creator
            .ok_or(MintError::MissingRole("candy_machine_creator"))?;

        let accounts = nft_accounts::MintNFT {
            candy_machine: required(self.candy_machine, "candy_machine")?,
            candy_machine_creator,
            payer: required(self.payer, "payer")?,
            wallet: required(self.wallet, "wallet")?,
            metadata: required(self.metadata, "metadata")?,
            mint: required(self.mint, "mint")?,
            mint_authority: required(self.mint_authority, "mint_authority")?,
            update_authority: required(self.update_authority, "update_authority")?,
            master_edition: required(self.master_edition, "master_edition")?,
            token_metadata_program: mpl_token_metadata::ID,
            token_program: spl_token::ID,
            system_program: system_program::ID,
            rent: sysvar::rent::ID,
            clock: sysvar::clock::ID,
            recent_blockhashes: sysvar::recent_blockhashes::ID,
            instruction_sysvar_account: sysvar::instructions::ID,
        };

        Ok(Instruction {
            program_id: *program_id,
            accounts: accounts.to_account_metas(None),
            data: nft_instruction::MintNft { creator_bump }.data(),
        })
    }
}

fn required(value: Option<Pubkey>, role: &'static str) -> Result<Pubkey, MintError> {
    value.ok_or(MintError::MissingRole(role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::sighash;

    fn complete_builder(mint: Pubkey) -> MintNftBuilder {
        MintNftBuilder::new()
            .candy_machine(Pubkey::new_unique())
            .candy_machine_creator((Pubkey::new_unique(), 254))
            .payer(Pubkey::new_unique())
            .wallet(Pubkey::new_unique())
            .metadata(find_metadata_pda(&mint))
            .mint(mint)
            .mint_authority(Pubkey::new_unique())
            .update_authority(Pubkey::new_unique())
            .master_edition(find_master_edition_pda(&mint))
    }

    #[test]
    fn mint_account_is_not_a_signer() {
        let mint = Pubkey::new_unique();
        let ix = complete_builder(mint).build(&Pubkey::new_unique()).unwrap();

        let mint_roles: Vec<_> = ix.accounts.iter().filter(|a| a.pubkey == mint).collect();
        assert_eq!(mint_roles.len(), 1);
        assert!(!mint_roles[0].is_signer);
        assert!(mint_roles[0].is_writable);
    }

    #[test]
    fn data_carries_discriminator_and_creator_bump() {
        let ix = complete_builder(Pubkey::new_unique())
            .build(&Pubkey::new_unique())
            .unwrap();

        assert_eq!(ix.data[..8], sighash("mint_nft"));
        assert_eq!(ix.data[8..], [254]);
        assert_eq!(ix.accounts.len(), 16);
    }

    #[test]
    fn missing_role_is_named() {
        let builder = MintNftBuilder::new()
            .candy_machine(Pubkey::new_unique())
            .candy_machine_creator((Pubkey::new_unique(), 255))
            .payer(Pubkey::new_unique())
            .wallet(Pubkey::new_unique())
            .mint(Pubkey::new_unique());

        let result = builder.build(&Pubkey::new_unique());

        assert!(matches!(result, Err(MintError::MissingRole("metadata"))));
    }

    #[test]
    fn signer_roles_are_marked() {
        let mint = Pubkey::new_unique();
        let builder = complete_builder(mint);
        let ix = builder.build(&Pubkey::new_unique()).unwrap();

        // payer, mint authority and update authority
        assert!(ix.accounts[2].is_signer);
        assert!(ix.accounts[6].is_signer);
        assert!(ix.accounts[7].is_signer);
        assert_eq!(ix.accounts.iter().filter(|a| a.is_signer).count(), 3);
    }
}
