//! Balance-moving operations of the CUR8 ledger.
//!
//! Every function here runs all of its checks before the first write, so an
//! `Err` leaves the passed accounts untouched. Instruction handlers in `lib.rs`
//! only load accounts, call into this module, and emit events.

use anchor_lang::prelude::*;

use crate::access::MinterAuthorization;
use crate::constants::*;
use crate::errors::Cur8Error;
use crate::nullifier::NullifierRecord;
use crate::state::{Allowance, BalanceAccount, ClaimRecord, TokenConfig};

/// Accounts touched by a self-claim.
pub struct ClaimAccounts<'a> {
    pub config: &'a mut TokenConfig,
    pub record: &'a mut ClaimRecord,
    pub nullifier: &'a mut NullifierRecord,
    pub balance: &'a mut BalanceAccount,
}

/// Converts `proof_points` into tokens for `user`, consuming `nullifier_hash`.
/// Returns the minted amount in base units.
pub fn claim_tokens(
    accounts: ClaimAccounts<'_>,
    user: Pubkey,
    proof_points: u64,
    nullifier_hash: [u8; 32],
    now: i64,
) -> Result<u128> {
    let ClaimAccounts {
        config,
        record,
        nullifier,
        balance,
    } = accounts;

    config.require_active()?;
    require!(proof_points >= MIN_PROOF_POINTS, Cur8Error::BelowMinimum);
    nullifier.ensure_available(&nullifier_hash)?;
    require!(record.can_claim_at(now), Cur8Error::CooldownActive);

    let tokens = config.calculate_tokens(proof_points);

    let (daily_claimed, window_start) = record.daily_window_at(now);
    let daily_claimed = daily_claimed
        .checked_add(tokens)
        .ok_or(Cur8Error::Overflow)?;
    require!(
        daily_claimed <= MAX_CLAIM_PER_DAY,
        Cur8Error::ExceedsDailyLimit
    );

    let supply = config.supply_after_mint(tokens)?;
    let config_claimed = config
        .total_claimed
        .checked_add(tokens)
        .ok_or(Cur8Error::Overflow)?;
    let user_claimed = record
        .total_claimed
        .checked_add(tokens)
        .ok_or(Cur8Error::Overflow)?;
    let points_spent = record
        .proof_points_spent
        .checked_add(proof_points)
        .ok_or(Cur8Error::Overflow)?;
    let user_balance = balance
        .amount
        .checked_add(tokens)
        .ok_or(Cur8Error::Overflow)?;

    nullifier.consume(nullifier_hash, user, now)?;

    config.current_supply = supply;
    config.total_claimed = config_claimed;
    balance.amount = user_balance;

    record.user = user;
    record.last_claim_timestamp = now;
    record.daily_claimed_amount = daily_claimed;
    record.daily_window_start = window_start;
    record.total_claimed = user_claimed;
    record.proof_points_spent = points_spent;
    record.is_verified = true;

    Ok(tokens)
}

fn validate_reward_type(reward_type: &str) -> Result<()> {
    require!(!reward_type.is_empty(), Cur8Error::RewardTypeRequired);
    Ok(())
}

/// Backend bonus mint. No cooldown, nullifier or daily cap applies.
pub fn mint_reward(
    config: &mut TokenConfig,
    authorization: &MinterAuthorization,
    caller: &Pubkey,
    balance: &mut BalanceAccount,
    amount: u128,
    reward_type: &str,
) -> Result<()> {
    authorization.require_authorized(caller)?;
    config.require_active()?;
    require!(
        balance.owner != Pubkey::default(),
        Cur8Error::InvalidUserAddress
    );
    validate_reward_type(reward_type)?;
    require!(amount <= MAX_REWARD_SIZE, Cur8Error::RewardTooLarge);

    let supply = config.supply_after_mint(amount)?;
    let rewarded = config
        .total_rewarded
        .checked_add(amount)
        .ok_or(Cur8Error::Overflow)?;
    balance.credit(amount)?;

    config.current_supply = supply;
    config.total_rewarded = rewarded;
    Ok(())
}

/// Checks a batch without touching state and returns its total.
pub fn validate_batch(users: &[Pubkey], amounts: &[u128], reward_type: &str) -> Result<u128> {
    require!(
        users.len() == amounts.len(),
        Cur8Error::ArrayLengthMismatch
    );
    require!(
        !users.is_empty() && users.len() <= MAX_BATCH_SIZE,
        Cur8Error::InvalidArrayLength
    );
    validate_reward_type(reward_type)?;

    let mut total: u128 = 0;
    for (user, amount) in users.iter().zip(amounts) {
        require!(*user != Pubkey::default(), Cur8Error::InvalidUserAddress);
        require!(
            *amount <= MAX_REWARD_SIZE,
            Cur8Error::IndividualRewardTooLarge
        );
        total = total.checked_add(*amount).ok_or(Cur8Error::Overflow)?;
    }
    Ok(total)
}

/// Mints `amounts[i]` to `users[i]` under one label, all or nothing.
///
/// `balances` holds one account per distinct recipient, in any order. A user
/// listed twice is credited twice through the same account.
pub fn batch_mint_rewards(
    config: &mut TokenConfig,
    authorization: &MinterAuthorization,
    caller: &Pubkey,
    balances: &mut [&mut BalanceAccount],
    users: &[Pubkey],
    amounts: &[u128],
    reward_type: &str,
) -> Result<u128> {
    authorization.require_authorized(caller)?;
    config.require_active()?;
    let total = validate_batch(users, amounts, reward_type)?;

    for (i, balance) in balances.iter().enumerate() {
        require!(
            balances[..i].iter().all(|other| other.owner != balance.owner),
            Cur8Error::BalanceAccountMismatch
        );
    }

    let mut credited: Vec<u128> = balances.iter().map(|b| b.amount).collect();
    for (user, amount) in users.iter().zip(amounts) {
        let slot = balances
            .iter()
            .position(|b| b.owner == *user)
            .ok_or(Cur8Error::BalanceAccountMismatch)?;
        credited[slot] = credited[slot]
            .checked_add(*amount)
            .ok_or(Cur8Error::Overflow)?;
    }

    let supply = config.supply_after_mint(total)?;
    let rewarded = config
        .total_rewarded
        .checked_add(total)
        .ok_or(Cur8Error::Overflow)?;

    for (balance, amount) in balances.iter_mut().zip(credited) {
        balance.amount = amount;
    }
    config.current_supply = supply;
    config.total_rewarded = rewarded;
    Ok(total)
}

/// Owner correction mint. Bypasses every user-facing check except the caps.
pub fn admin_mint(
    config: &mut TokenConfig,
    caller: &Pubkey,
    balance: &mut BalanceAccount,
    amount: u128,
) -> Result<()> {
    config.require_owner(caller)?;
    config.require_active()?;
    require!(
        balance.owner != Pubkey::default(),
        Cur8Error::InvalidUserAddress
    );
    require!(amount <= MAX_ADMIN_MINT, Cur8Error::AdminMintTooLarge);

    let supply = config.supply_after_mint(amount)?;
    balance.credit(amount)?;
    config.current_supply = supply;
    Ok(())
}

/// Credits the deployment's pre-mint to the owner.
pub fn mint_initial_supply(config: &mut TokenConfig, owner_balance: &mut BalanceAccount) -> Result<()> {
    require_keys_eq!(owner_balance.owner, config.owner, Cur8Error::Unauthorized);
    let supply = config.supply_after_mint(INITIAL_SUPPLY)?;
    owner_balance.credit(INITIAL_SUPPLY)?;
    config.current_supply = supply;
    Ok(())
}

/// Moves `amount` between two balances. When both sides are the same owner
/// the call only checks the balance covers `amount`.
pub fn transfer(
    config: &TokenConfig,
    from: &mut BalanceAccount,
    to: &mut BalanceAccount,
    amount: u128,
) -> Result<()> {
    config.require_active()?;
    require!(to.owner != Pubkey::default(), Cur8Error::InvalidRecipient);
    require!(from.amount >= amount, Cur8Error::InsufficientBalance);
    if from.owner == to.owner {
        return Ok(());
    }

    let received = to.amount.checked_add(amount).ok_or(Cur8Error::Overflow)?;
    from.debit(amount)?;
    to.amount = received;
    Ok(())
}

/// Spender-initiated transfer out of `from`, charged against `allowance`.
pub fn transfer_from(
    config: &TokenConfig,
    allowance: &mut Allowance,
    from: &mut BalanceAccount,
    to: &mut BalanceAccount,
    amount: u128,
) -> Result<()> {
    require_keys_eq!(allowance.owner, from.owner, Cur8Error::InsufficientAllowance);
    allowance.require_covers(amount)?;
    transfer(config, from, to, amount)?;
    allowance.spend(amount)
}
