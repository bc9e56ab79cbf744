use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::BadgeError;

/// Whether balances of this ledger may ever move between holders.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum TransferPolicy {
    Transferable = 0,
    #[default]
    Soulbound = 1,
}

impl anchor_lang::Space for TransferPolicy {
    const INIT_SPACE: usize = 1;
}

#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct BadgeConfig {
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
    pub current_supply: u64,
    pub transfer_policy: TransferPolicy,
    #[max_len(200)]
    pub uri: String,
    pub bump: u8,
}

impl BadgeConfig {
    pub const SEED: &'static [u8] = b"badge_config";

    pub fn new(owner: Pubkey, uri: String, bump: u8) -> Result<Self> {
        require!(uri.len() <= MAX_URI_LEN, BadgeError::UriTooLong);
        Ok(Self {
            owner,
            pending_owner: Pubkey::default(),
            current_supply: 0,
            transfer_policy: TransferPolicy::Soulbound,
            uri,
            bump,
        })
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(
            self.owner != Pubkey::default() && self.owner == *caller,
            BadgeError::Unauthorized
        );
        Ok(())
    }

    pub fn remaining_supply(&self) -> u64 {
        MAX_SUPPLY.saturating_sub(self.current_supply)
    }

    pub fn supply_after_mint(&self) -> Result<u64> {
        let next = self
            .current_supply
            .checked_add(1)
            .ok_or(BadgeError::Overflow)?;
        require!(next <= MAX_SUPPLY, BadgeError::SupplyCapExceeded);
        Ok(next)
    }

    pub fn set_uri(&mut self, caller: &Pubkey, uri: String) -> Result<()> {
        self.require_owner(caller)?;
        require!(uri.len() <= MAX_URI_LEN, BadgeError::UriTooLong);
        self.uri = uri;
        Ok(())
    }

    pub fn begin_ownership_transfer(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        require!(new_owner != Pubkey::default(), BadgeError::InvalidOwnerAddress);
        self.pending_owner = new_owner;
        Ok(())
    }

    pub fn accept_ownership(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_owner != Pubkey::default() && self.pending_owner == *caller,
            BadgeError::Unauthorized
        );
        let previous = self.owner;
        self.owner = self.pending_owner;
        self.pending_owner = Pubkey::default();
        Ok(previous)
    }

    pub fn renounce_ownership(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        self.require_owner(caller)?;
        let previous = self.owner;
        self.owner = Pubkey::default();
        self.pending_owner = Pubkey::default();
        Ok(previous)
    }

    pub fn badge_info(&self) -> BadgeInfo {
        BadgeInfo {
            current_supply: self.current_supply,
            max_supply: MAX_SUPPLY,
            remaining: self.remaining_supply(),
        }
    }
}

/// Badge holdings of one address.
/// Seeds: [b"badge_holder", owner]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct BadgeHolder {
    pub owner: Pubkey,
    /// Balance of `BADGE_TOKEN_ID`; 0 or 1.
    pub balance: u64,
    /// Flips to true on mint and never back.
    pub has_minted: bool,
    pub minted_at: i64,
    pub bump: u8,
}

impl BadgeHolder {
    pub const SEED: &'static [u8] = b"badge_holder";

    pub fn bind(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn balance_of(&self, token_id: u64) -> u64 {
        if token_id == BADGE_TOKEN_ID {
            self.balance
        } else {
            0
        }
    }

    pub fn can_mint(&self, config: &BadgeConfig) -> bool {
        !self.has_minted && config.remaining_supply() > 0
    }
}

/// Spent nullifier of this ledger. Independent from the reward token's set.
/// Seeds: [b"nullifier", nullifier_hash]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct NullifierRecord {
    pub nullifier_hash: [u8; 32],
    pub is_used: bool,
    pub holder: Pubkey,
    pub used_at: i64,
    pub bump: u8,
}

impl NullifierRecord {
    pub const SEED: &'static [u8] = b"nullifier";
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct BadgeInfo {
    pub current_supply: u64,
    pub max_supply: u64,
    pub remaining: u64,
}

/// Reads a PDA that may not exist yet; a missing account reads as `T::default()`.
pub fn load_or_default<T: AccountDeserialize + Default>(info: &AccountInfo) -> Result<T> {
    if info.data_is_empty() {
        return Ok(T::default());
    }
    require_keys_eq!(
        *info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..])
}
