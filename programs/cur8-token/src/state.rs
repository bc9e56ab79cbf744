use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::Cur8Error;

/// Global token configuration. One PDA per deployment.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct TokenConfig {
    /// Owner; the only signer allowed to pause, change the rate, manage minters or admin mint.
    pub owner: Pubkey,
    /// Nominated owner waiting to accept. Zero when no hand-over is in progress.
    pub pending_owner: Pubkey,
    /// When true, claims, mints and transfers are blocked.
    pub paused: bool,
    /// Proof points exchanged for one whole token.
    pub proof_points_per_token: u64,
    /// Tokens in existence, base units.
    pub current_supply: u128,
    /// Lifetime tokens issued through self-claims.
    pub total_claimed: u128,
    /// Lifetime tokens issued through minter rewards.
    pub total_rewarded: u128,
    pub bump: u8,
}

impl TokenConfig {
    pub const SEED: &'static [u8] = b"token_config";

    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            pending_owner: Pubkey::default(),
            paused: false,
            proof_points_per_token: DEFAULT_PROOF_POINTS_PER_TOKEN,
            current_supply: 0,
            total_claimed: 0,
            total_rewarded: 0,
            bump,
        }
    }

    pub fn require_active(&self) -> Result<()> {
        require!(!self.paused, Cur8Error::ContractPaused);
        Ok(())
    }

    pub fn remaining_supply(&self) -> u128 {
        MAX_SUPPLY.saturating_sub(self.current_supply)
    }

    /// Returns the supply after minting `amount`, or `SupplyCapExceeded`.
    pub fn supply_after_mint(&self, amount: u128) -> Result<u128> {
        let next = self
            .current_supply
            .checked_add(amount)
            .ok_or(Cur8Error::Overflow)?;
        require!(next <= MAX_SUPPLY, Cur8Error::SupplyCapExceeded);
        Ok(next)
    }

    /// Whole tokens, in base units, that `proof_points` convert to at the current rate.
    /// Points below the minimum convert to nothing; remainders are dropped.
    pub fn calculate_tokens(&self, proof_points: u64) -> u128 {
        if proof_points < MIN_PROOF_POINTS || self.proof_points_per_token == 0 {
            return 0;
        }
        (proof_points / self.proof_points_per_token) as u128 * TOKEN_UNIT
    }

    pub fn set_proof_points_rate(&mut self, caller: &Pubkey, rate: u64) -> Result<u64> {
        self.require_owner(caller)?;
        require!(
            rate > 0 && rate <= MAX_PROOF_POINTS_PER_TOKEN,
            Cur8Error::InvalidRate
        );
        let old_rate = self.proof_points_per_token;
        self.proof_points_per_token = rate;
        Ok(old_rate)
    }

    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            current_supply: self.current_supply,
            max_supply: MAX_SUPPLY,
            remaining: self.remaining_supply(),
            conversion_rate: self.proof_points_per_token,
            min_proof_points: MIN_PROOF_POINTS,
            daily_limit: MAX_CLAIM_PER_DAY,
            max_reward_size: MAX_REWARD_SIZE,
        }
    }
}

/// Per-user self-claim history.
/// Seeds: [b"claim_record", user]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct ClaimRecord {
    pub user: Pubkey,
    pub total_claimed: u128,
    pub proof_points_spent: u64,
    pub last_claim_timestamp: i64,
    pub daily_claimed_amount: u128,
    pub daily_window_start: i64,
    /// Set on the first successful claim and never cleared.
    pub is_verified: bool,
    pub bump: u8,
}

impl ClaimRecord {
    pub const SEED: &'static [u8] = b"claim_record";

    /// Stamps a freshly created record with its user.
    pub fn bind(&mut self, user: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.bump = bump;
        }
    }

    /// Earliest time the next claim is accepted. Zero for a user who never claimed.
    pub fn next_claim_time(&self) -> i64 {
        if !self.is_verified {
            return 0;
        }
        self.last_claim_timestamp.saturating_add(CLAIM_COOLDOWN)
    }

    pub fn can_claim_at(&self, now: i64) -> bool {
        now >= self.next_claim_time()
    }

    /// `(daily_claimed_amount, daily_window_start)` as they stand at `now`,
    /// with an expired window rolled over.
    pub fn daily_window_at(&self, now: i64) -> (u128, i64) {
        if !self.is_verified || now > self.daily_window_start.saturating_add(DAILY_WINDOW) {
            (0, now)
        } else {
            (self.daily_claimed_amount, self.daily_window_start)
        }
    }

    pub fn claim_info(&self, now: i64) -> UserClaimInfo {
        UserClaimInfo {
            is_verified: self.is_verified,
            can_claim_now: self.can_claim_at(now),
            total_claimed: self.total_claimed,
            proof_points_spent: self.proof_points_spent,
            next_claim_time: self.next_claim_time(),
        }
    }
}

/// Fungible balance of one owner.
/// Seeds: [b"balance", owner]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct BalanceAccount {
    pub owner: Pubkey,
    pub amount: u128,
    pub bump: u8,
}

impl BalanceAccount {
    pub const SEED: &'static [u8] = b"balance";

    /// Stamps a freshly created balance with its owner.
    pub fn bind(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn credit(&mut self, amount: u128) -> Result<()> {
        self.amount = self.amount.checked_add(amount).ok_or(Cur8Error::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u128) -> Result<()> {
        require!(self.amount >= amount, Cur8Error::InsufficientBalance);
        self.amount -= amount;
        Ok(())
    }
}

/// Amount `spender` may move out of `owner`'s balance.
/// Seeds: [b"allowance", owner, spender]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct Allowance {
    pub owner: Pubkey,
    pub spender: Pubkey,
    /// `u128::MAX` never decreases.
    pub amount: u128,
    pub bump: u8,
}

impl Allowance {
    pub const SEED: &'static [u8] = b"allowance";

    pub fn require_covers(&self, amount: u128) -> Result<()> {
        require!(self.amount >= amount, Cur8Error::InsufficientAllowance);
        Ok(())
    }

    pub fn spend(&mut self, amount: u128) -> Result<()> {
        self.require_covers(amount)?;
        if self.amount != u128::MAX {
            self.amount -= amount;
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenInfo {
    pub current_supply: u128,
    pub max_supply: u128,
    pub remaining: u128,
    pub conversion_rate: u64,
    pub min_proof_points: u64,
    pub daily_limit: u128,
    pub max_reward_size: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserClaimInfo {
    pub is_verified: bool,
    pub can_claim_now: bool,
    pub total_claimed: u128,
    pub proof_points_spent: u64,
    pub next_claim_time: i64,
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
