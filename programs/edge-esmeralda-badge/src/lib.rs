use anchor_lang::prelude::*;

pub mod badge;
pub mod constants;
pub mod errors;
pub mod events;
pub mod state;

#[cfg(test)]
mod tests;

use events::*;
use state::{BadgeConfig, BadgeHolder, BadgeInfo, NullifierRecord};

declare_id!("DLL1ZwzTNCaSr8T1YGqv9WkBVgWmjrvhHwUMgKidcb3N");

#[program]
pub mod edge_esmeralda_badge {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, uri: String) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        ctx.accounts
            .config
            .set_inner(BadgeConfig::new(owner, uri, ctx.bumps.config)?);
        msg!("{} initialized by {}", constants::BADGE_NAME, owner);
        Ok(())
    }

    /// Mint the attendance badge to `to`, backed by an identity nullifier.
    /// The signer may be `to` or a relayer paying on their behalf.
    pub fn mint_edge_esmeralda(
        ctx: Context<MintEdgeEsmeralda>,
        to: Pubkey,
        nullifier_hash: [u8; 32],
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let accounts = ctx.accounts;
        accounts.holder.bind(to, ctx.bumps.holder);
        accounts.nullifier_record.bump = ctx.bumps.nullifier_record;

        let token_id = badge::mint_edge_esmeralda(
            &mut accounts.config,
            &mut accounts.holder,
            &mut accounts.nullifier_record,
            nullifier_hash,
            now,
        )?;

        emit!(BadgeMinted {
            to,
            token_id,
            nullifier_hash,
        });
        msg!(
            "mint_edge_esmeralda: to={} supply={}",
            to,
            accounts.config.current_supply
        );
        Ok(())
    }

    pub fn admin_mint(ctx: Context<AdminMint>, to: Pubkey) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let by = ctx.accounts.owner.key();
        let accounts = ctx.accounts;
        accounts.holder.bind(to, ctx.bumps.holder);

        let token_id = badge::admin_mint(&mut accounts.config, &by, &mut accounts.holder, now)?;

        emit!(AdminBadgeMinted { to, token_id, by });
        msg!(
            "admin_mint: to={} supply={}",
            to,
            accounts.config.current_supply
        );
        Ok(())
    }

    pub fn transfer(
        ctx: Context<TransferBadge>,
        to: Pubkey,
        token_id: u64,
        amount: u64,
    ) -> Result<()> {
        let from = ctx.accounts.sender.key();
        let accounts = ctx.accounts;
        accounts.to_holder.bind(to, ctx.bumps.to_holder);

        badge::transfer(
            &accounts.config,
            &mut accounts.from_holder,
            &mut accounts.to_holder,
            token_id,
            amount,
        )?;

        emit!(BadgeTransferred {
            from,
            to,
            token_id,
            amount,
        });
        Ok(())
    }

    pub fn set_uri(ctx: Context<ConfigAuthority>, uri: String) -> Result<()> {
        ctx.accounts
            .config
            .set_uri(&ctx.accounts.authority.key(), uri.clone())?;
        emit!(UriUpdated { uri });
        Ok(())
    }

    pub fn transfer_ownership(ctx: Context<ConfigAuthority>, new_owner: Pubkey) -> Result<()> {
        let config = &mut ctx.accounts.config;
        config.begin_ownership_transfer(&ctx.accounts.authority.key(), new_owner)?;
        emit!(OwnershipTransferStarted {
            previous_owner: config.owner,
            new_owner,
        });
        Ok(())
    }

    pub fn accept_ownership(ctx: Context<ConfigAuthority>) -> Result<()> {
        let new_owner = ctx.accounts.authority.key();
        let previous_owner = ctx.accounts.config.accept_ownership(&new_owner)?;
        emit!(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    pub fn renounce_ownership(ctx: Context<ConfigAuthority>) -> Result<()> {
        let previous_owner = ctx
            .accounts
            .config
            .renounce_ownership(&ctx.accounts.authority.key())?;
        emit!(OwnershipTransferred {
            previous_owner,
            new_owner: Pubkey::default(),
        });
        Ok(())
    }

    pub fn get_badge_info(ctx: Context<ReadConfig>) -> Result<BadgeInfo> {
        Ok(ctx.accounts.config.badge_info())
    }

    pub fn can_mint(ctx: Context<HolderLookup>, _user: Pubkey) -> Result<bool> {
        let holder: BadgeHolder = state::load_or_default(&ctx.accounts.holder)?;
        Ok(holder.can_mint(&ctx.accounts.config))
    }

    pub fn has_minted(ctx: Context<HolderLookup>, _user: Pubkey) -> Result<bool> {
        let holder: BadgeHolder = state::load_or_default(&ctx.accounts.holder)?;
        Ok(holder.has_minted)
    }

    pub fn balance_of(ctx: Context<HolderLookup>, _user: Pubkey, token_id: u64) -> Result<u64> {
        let holder: BadgeHolder = state::load_or_default(&ctx.accounts.holder)?;
        Ok(holder.balance_of(token_id))
    }
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + BadgeConfig::INIT_SPACE,
        seeds = [BadgeConfig::SEED],
        bump
    )]
    pub config: Account<'info, BadgeConfig>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(to: Pubkey, nullifier_hash: [u8; 32])]
pub struct MintEdgeEsmeralda<'info> {
    #[account(mut, seeds = [BadgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BadgeConfig>,
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + BadgeHolder::INIT_SPACE,
        seeds = [BadgeHolder::SEED, to.as_ref()],
        bump
    )]
    pub holder: Account<'info, BadgeHolder>,
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + NullifierRecord::INIT_SPACE,
        seeds = [NullifierRecord::SEED, nullifier_hash.as_ref()],
        bump
    )]
    pub nullifier_record: Account<'info, NullifierRecord>,
    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(to: Pubkey)]
pub struct AdminMint<'info> {
    #[account(mut, seeds = [BadgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BadgeConfig>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + BadgeHolder::INIT_SPACE,
        seeds = [BadgeHolder::SEED, to.as_ref()],
        bump
    )]
    pub holder: Account<'info, BadgeHolder>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(to: Pubkey)]
pub struct TransferBadge<'info> {
    #[account(seeds = [BadgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BadgeConfig>,
    #[account(
        mut,
        seeds = [BadgeHolder::SEED, sender.key().as_ref()],
        bump = from_holder.bump
    )]
    pub from_holder: Account<'info, BadgeHolder>,
    #[account(
        init_if_needed,
        payer = sender,
        space = 8 + BadgeHolder::INIT_SPACE,
        seeds = [BadgeHolder::SEED, to.as_ref()],
        bump
    )]
    pub to_holder: Account<'info, BadgeHolder>,
    #[account(mut)]
    pub sender: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ConfigAuthority<'info> {
    #[account(mut, seeds = [BadgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BadgeConfig>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(seeds = [BadgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BadgeConfig>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct HolderLookup<'info> {
    #[account(seeds = [BadgeConfig::SEED], bump = config.bump)]
    pub config: Account<'info, BadgeConfig>,
    /// CHECK: may be uninitialized; read through `state::load_or_default`.
    #[account(seeds = [BadgeHolder::SEED, user.as_ref()], bump)]
    pub holder: UncheckedAccount<'info>,
}
