use anchor_client::solana_sdk::pubkey::Pubkey;

use crate::{
    modules::roles::{writable, AccountRole},
    pdas::find_ata,
};

/// Roles of the account paying the mint price in `token_mint`: the payer's
/// token account followed by the payer itself.
pub fn payment_roles(token_mint: &Pubkey, payer: &Pubkey) -> Vec<AccountRole> {
    vec![writable(find_ata(token_mint, payer)), writable(*payer)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_roles_are_writable_non_signers() {
        let token_mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();

        let roles = payment_roles(&token_mint, &payer);

        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].pubkey, find_ata(&token_mint, &payer));
        assert_eq!(roles[1].pubkey, payer);
        assert!(roles.iter().all(|r| r.is_writable && !r.is_signer));
    }
}
