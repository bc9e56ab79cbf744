use anchor_lang::prelude::*;

use crate::errors::Cur8Error;
use crate::state::TokenConfig;

/// Backend account allowed to mint gamification rewards.
/// Seeds: [b"minter", minter]
///
/// A minter without a record, or with `is_authorized == false`, is rejected.
/// The owner gets no implicit entry.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct MinterAuthorization {
    pub minter: Pubkey,
    pub is_authorized: bool,
    pub bump: u8,
}

impl MinterAuthorization {
    pub const SEED: &'static [u8] = b"minter";

    pub fn require_authorized(&self, caller: &Pubkey) -> Result<()> {
        require!(
            self.is_authorized && self.minter == *caller,
            Cur8Error::NotAuthorizedMinter
        );
        Ok(())
    }
}

impl TokenConfig {
    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(
            self.owner != Pubkey::default() && self.owner == *caller,
            Cur8Error::Unauthorized
        );
        Ok(())
    }

    /// Sets a minter's flag. Re-setting the current value is accepted.
    pub fn set_minter_authorization(
        &self,
        caller: &Pubkey,
        record: &mut MinterAuthorization,
        minter: Pubkey,
        authorized: bool,
    ) -> Result<()> {
        self.require_owner(caller)?;
        require!(minter != Pubkey::default(), Cur8Error::InvalidMinterAddress);
        record.minter = minter;
        record.is_authorized = authorized;
        Ok(())
    }

    /// First half of the hand-over: nominate `new_owner`.
    pub fn begin_ownership_transfer(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        require!(new_owner != Pubkey::default(), Cur8Error::InvalidOwnerAddress);
        self.pending_owner = new_owner;
        Ok(())
    }

    /// Second half: the nominee takes over. Returns the previous owner.
    pub fn accept_ownership(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_owner != Pubkey::default() && self.pending_owner == *caller,
            Cur8Error::Unauthorized
        );
        let previous = self.owner;
        self.owner = self.pending_owner;
        self.pending_owner = Pubkey::default();
        Ok(previous)
    }

    /// Leaves the config without an owner. Owner-gated calls fail from then on.
    pub fn renounce_ownership(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        self.require_owner(caller)?;
        let previous = self.owner;
        self.owner = Pubkey::default();
        self.pending_owner = Pubkey::default();
        Ok(previous)
    }

    pub fn set_paused(&mut self, caller: &Pubkey, paused: bool) -> Result<()> {
        self.require_owner(caller)?;
        self.paused = paused;
        Ok(())
    }
}
