//! Account roles contributed to an instruction and the rules for combining them.

use std::collections::HashSet;

use anchor_client::solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};

/// An account reference together with the signer/writable flags one
/// instruction requires for it.
pub type AccountRole = AccountMeta;

pub fn writable(pubkey: Pubkey) -> AccountRole {
    AccountMeta::new(pubkey, false)
}

pub fn readonly(pubkey: Pubkey) -> AccountRole {
    AccountMeta::new_readonly(pubkey, false)
}

/// Forces the signer flag on every role referencing `address`.
///
/// Returns the number of roles that reference the address. Applying it more
/// than once leaves the roles unchanged.
pub fn force_signer(roles: &mut [AccountRole], address: &Pubkey) -> usize {
    let mut matched = 0;

    for role in roles.iter_mut().filter(|r| r.pubkey == *address) {
        role.is_signer = true;
        matched += 1;
    }

    matched
}

/// Removes roles that repeat an earlier role exactly (same address and flags),
/// keeping the first occurrence in place.
pub fn dedupe(roles: Vec<AccountRole>) -> Vec<AccountRole> {
    let mut seen = HashSet::new();

    roles
        .into_iter()
        .filter(|role| seen.insert((role.pubkey, role.is_signer, role.is_writable)))
        .collect()
}

/// Flags the network applies to `address` once the instruction is compiled:
/// the logical OR of every role referencing it.
pub fn effective_flags(roles: &[AccountRole], address: &Pubkey) -> Option<(bool, bool)> {
    roles
        .iter()
        .filter(|r| r.pubkey == *address)
        .fold(None, |acc, role| {
            let (signer, writable) = acc.unwrap_or((false, false));
            Some((signer || role.is_signer, writable || role.is_writable))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_signer_is_idempotent() {
        let target = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut roles = vec![readonly(other), writable(target)];

        assert_eq!(force_signer(&mut roles, &target), 1);
        let once = roles.clone();
        assert_eq!(force_signer(&mut roles, &target), 1);

        assert_eq!(roles, once);
        assert!(roles[1].is_signer);
        assert!(roles[1].is_writable);
        assert!(!roles[0].is_signer);
    }

    #[test]
    fn force_signer_reports_missing_address() {
        let mut roles = vec![readonly(Pubkey::new_unique())];

        assert_eq!(force_signer(&mut roles, &Pubkey::new_unique()), 0);
        assert!(!roles[0].is_signer);
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let roles = vec![writable(a), readonly(b), writable(a), readonly(a)];

        let deduped = dedupe(roles);

        assert_eq!(deduped, vec![writable(a), readonly(b), readonly(a)]);
    }

    #[test]
    fn effective_flags_are_or_of_roles() {
        let a = Pubkey::new_unique();
        let roles = vec![
            readonly(a),
            writable(a),
            AccountMeta::new_readonly(a, true),
        ];

        assert_eq!(effective_flags(&roles, &a), Some((true, true)));
        assert_eq!(effective_flags(&roles, &Pubkey::new_unique()), None);
    }
}
