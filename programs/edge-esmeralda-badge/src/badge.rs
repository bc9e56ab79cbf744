use anchor_lang::prelude::*;

use crate::constants::BADGE_TOKEN_ID;
use crate::errors::BadgeError;
use crate::state::{BadgeConfig, BadgeHolder, NullifierRecord, TransferPolicy};

fn is_non_zero_hash(hash: &[u8; 32]) -> bool {
    hash.iter().any(|b| *b != 0)
}

fn issue(config: &mut BadgeConfig, holder: &mut BadgeHolder, now: i64) -> Result<()> {
    require!(holder.owner != Pubkey::default(), BadgeError::InvalidRecipient);
    require!(!holder.has_minted, BadgeError::AlreadyMinted);
    let supply = config.supply_after_mint()?;

    config.current_supply = supply;
    holder.balance = 1;
    holder.has_minted = true;
    holder.minted_at = now;
    Ok(())
}

/// Proof-backed mint of the badge to `holder.owner`, spending `nullifier_hash`.
pub fn mint_edge_esmeralda(
    config: &mut BadgeConfig,
    holder: &mut BadgeHolder,
    nullifier: &mut NullifierRecord,
    nullifier_hash: [u8; 32],
    now: i64,
) -> Result<u64> {
    require!(
        is_non_zero_hash(&nullifier_hash),
        BadgeError::InvalidNullifier
    );
    require!(holder.owner != Pubkey::default(), BadgeError::InvalidRecipient);
    require!(!holder.has_minted, BadgeError::AlreadyMinted);
    require!(!nullifier.is_used, BadgeError::NullifierUsed);

    issue(config, holder, now)?;

    nullifier.nullifier_hash = nullifier_hash;
    nullifier.is_used = true;
    nullifier.holder = holder.owner;
    nullifier.used_at = now;
    Ok(BADGE_TOKEN_ID)
}

/// Owner grant without a proof. One badge per address and the supply cap still hold.
pub fn admin_mint(
    config: &mut BadgeConfig,
    caller: &Pubkey,
    holder: &mut BadgeHolder,
    now: i64,
) -> Result<u64> {
    config.require_owner(caller)?;
    issue(config, holder, now)?;
    Ok(BADGE_TOKEN_ID)
}

/// The only path that moves balances between holders. A soulbound ledger
/// refuses every call.
pub fn transfer(
    config: &BadgeConfig,
    from: &mut BadgeHolder,
    to: &mut BadgeHolder,
    token_id: u64,
    amount: u64,
) -> Result<()> {
    match config.transfer_policy {
        TransferPolicy::Soulbound => return err!(BadgeError::Soulbound),
        TransferPolicy::Transferable => {}
    }

    require!(token_id == BADGE_TOKEN_ID, BadgeError::InvalidTokenId);
    require!(to.owner != Pubkey::default(), BadgeError::InvalidRecipient);
    require!(from.balance >= amount, BadgeError::InsufficientBalance);
    if from.owner == to.owner {
        return Ok(());
    }

    let received = to
        .balance
        .checked_add(amount)
        .ok_or(BadgeError::Overflow)?;
    from.balance -= amount;
    to.balance = received;
    Ok(())
}
