use anchor_lang::prelude::*;

use crate::errors::Cur8Error;

/// Marks one identity-proof nullifier as spent.
/// Seeds: [b"nullifier", nullifier_hash]
///
/// Records are never closed, so a spent hash stays rejected forever.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct NullifierRecord {
    pub nullifier_hash: [u8; 32],
    pub is_used: bool,
    /// Claimant that spent the nullifier.
    pub user: Pubkey,
    pub used_at: i64,
    pub bump: u8,
}

impl NullifierRecord {
    pub const SEED: &'static [u8] = b"nullifier";

    pub fn ensure_available(&self, nullifier_hash: &[u8; 32]) -> Result<()> {
        require!(is_non_zero_hash(nullifier_hash), Cur8Error::InvalidNullifier);
        require!(!self.is_used, Cur8Error::NullifierAlreadyUsed);
        Ok(())
    }

    pub fn consume(&mut self, nullifier_hash: [u8; 32], user: Pubkey, now: i64) -> Result<()> {
        self.ensure_available(&nullifier_hash)?;
        self.nullifier_hash = nullifier_hash;
        self.is_used = true;
        self.user = user;
        self.used_at = now;
        Ok(())
    }
}

pub fn is_non_zero_hash(hash: &[u8; 32]) -> bool {
    hash.iter().any(|b| *b != 0)
}
