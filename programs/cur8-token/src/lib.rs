use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;

pub mod access;
pub mod constants;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod nullifier;
pub mod state;


use access::MinterAuthorization;
use errors::Cur8Error;
use events::*;
use ledger::ClaimAccounts;
use nullifier::NullifierRecord;
use state::{Allowance, BalanceAccount, ClaimRecord, TokenConfig, TokenInfo, UserClaimInfo};

declare_id!("C3uEe5MaYbgSgcCLBoJKFw5Gm8pSWLnMrrA73Zc4gZYK");

#[program]
pub mod cur8_token {
    use super::*;

    /// Create the token config and pre-mint the initial supply to the signer.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        let config = &mut ctx.accounts.config;
        config.set_inner(TokenConfig::new(owner, ctx.bumps.config));

        let owner_balance = &mut ctx.accounts.owner_balance;
        owner_balance.bind(owner, ctx.bumps.owner_balance);
        ledger::mint_initial_supply(config, owner_balance)?;

        emit!(TokensTransferred {
            from: Pubkey::default(),
            to: owner,
            amount: owner_balance.amount,
        });
        msg!(
            "{} ({}) initialized: owner={} supply={} decimals={}",
            constants::TOKEN_NAME,
            constants::TOKEN_SYMBOL,
            owner,
            config.current_supply,
            constants::TOKEN_DECIMALS
        );
        Ok(())
    }

    pub fn set_minter_authorization(
        ctx: Context<SetMinterAuthorization>,
        minter: Pubkey,
        authorized: bool,
    ) -> Result<()> {
        let accounts = ctx.accounts;
        accounts.minter_authorization.bump = ctx.bumps.minter_authorization;
        accounts.config.set_minter_authorization(
            &accounts.owner.key(),
            &mut accounts.minter_authorization,
            minter,
            authorized,
        )?;

        emit!(MinterAuthorizationUpdated { minter, authorized });
        Ok(())
    }

    pub fn is_authorized_minter(ctx: Context<MinterLookup>, _minter: Pubkey) -> Result<bool> {
        let record: MinterAuthorization = state::load_or_default(&ctx.accounts.minter_authorization)?;
        Ok(record.is_authorized)
    }

    /// User self-claim: convert off-chain proof points into tokens, spending
    /// one identity nullifier.
    pub fn claim_tokens(
        ctx: Context<ClaimTokens>,
        proof_points: u64,
        nullifier_hash: [u8; 32],
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let user = ctx.accounts.user.key();
        let accounts = ctx.accounts;

        accounts.claim_record.bind(user, ctx.bumps.claim_record);
        accounts.balance.bind(user, ctx.bumps.balance);
        accounts.nullifier_record.bump = ctx.bumps.nullifier_record;

        let tokens = ledger::claim_tokens(
            ClaimAccounts {
                config: &mut *accounts.config,
                record: &mut *accounts.claim_record,
                nullifier: &mut *accounts.nullifier_record,
                balance: &mut *accounts.balance,
            },
            user,
            proof_points,
            nullifier_hash,
            now,
        )?;

        emit!(TokensClaimed {
            user,
            amount: tokens,
            proof_points,
            nullifier_hash,
        });
        msg!(
            "claim_tokens: user={} amount={} proof_points={}",
            user,
            tokens,
            proof_points
        );
        Ok(())
    }

    /// Backend gamification reward for `user`.
    pub fn mint_reward(
        ctx: Context<MintReward>,
        user: Pubkey,
        amount: u128,
        reward_type: String,
    ) -> Result<()> {
        let minter = ctx.accounts.minter.key();
        let authorization: MinterAuthorization =
            state::load_or_default(&ctx.accounts.minter_authorization)?;
        let accounts = ctx.accounts;
        accounts.balance.bind(user, ctx.bumps.balance);

        ledger::mint_reward(
            &mut accounts.config,
            &authorization,
            &minter,
            &mut accounts.balance,
            amount,
            &reward_type,
        )?;

        msg!(
            "mint_reward: user={} amount={} type={}",
            user,
            amount,
            reward_type
        );
        emit!(RewardMinted {
            user,
            amount,
            reward_type,
            minter,
        });
        Ok(())
    }

    /// Mint several rewards under one label. Remaining accounts carry one
    /// writable balance account per distinct recipient (see `open_balance`).
    pub fn batch_mint_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchMintRewards<'info>>,
        users: Vec<Pubkey>,
        amounts: Vec<u128>,
        reward_type: String,
    ) -> Result<()> {
        let minter = ctx.accounts.minter.key();
        let authorization: MinterAuthorization =
            state::load_or_default(&ctx.accounts.minter_authorization)?;

        let mut recipients = Vec::with_capacity(ctx.remaining_accounts.len());
        for info in ctx.remaining_accounts.iter() {
            require!(info.is_writable, Cur8Error::BalanceAccountMismatch);
            recipients.push(Account::<BalanceAccount>::try_from(info)?);
        }

        let mut balances: Vec<&mut BalanceAccount> =
            recipients.iter_mut().map(|account| &mut **account).collect();
        let total = ledger::batch_mint_rewards(
            &mut ctx.accounts.config,
            &authorization,
            &minter,
            &mut balances,
            &users,
            &amounts,
            &reward_type,
        )?;
        drop(balances);

        for account in &recipients {
            account.exit(&crate::ID)?;
        }

        msg!(
            "batch_mint_rewards: recipients={} total={} type={}",
            users.len(),
            total,
            reward_type
        );
        for (user, amount) in users.iter().zip(amounts.iter()) {
            emit!(RewardMinted {
                user: *user,
                amount: *amount,
                reward_type: reward_type.clone(),
                minter,
            });
        }
        emit!(BatchRewardsMinted {
            recipients: users.len() as u32,
            total_amount: total,
            reward_type,
            minter,
        });
        Ok(())
    }

    /// Owner-only correction mint, capped per call.
    pub fn admin_mint(ctx: Context<AdminMint>, user: Pubkey, amount: u128) -> Result<()> {
        let owner = ctx.accounts.owner.key();
        let accounts = ctx.accounts;
        accounts.balance.bind(user, ctx.bumps.balance);

        ledger::admin_mint(&mut accounts.config, &owner, &mut accounts.balance, amount)?;

        emit!(AdminMinted { user, amount });
        msg!("admin_mint: user={} amount={} by={}", user, amount, owner);
        Ok(())
    }

    pub fn update_proof_points_rate(ctx: Context<ConfigAuthority>, rate: u64) -> Result<()> {
        let old_rate = ctx
            .accounts
            .config
            .set_proof_points_rate(&ctx.accounts.authority.key(), rate)?;

        emit!(ProofPointsRateUpdated {
            old_rate,
            new_rate: rate,
        });
        Ok(())
    }

    pub fn pause(ctx: Context<ConfigAuthority>) -> Result<()> {
        let by = ctx.accounts.authority.key();
        ctx.accounts.config.set_paused(&by, true)?;
        emit!(PauseStateChanged { paused: true, by });
        msg!("CUR8 paused by {}", by);
        Ok(())
    }

    pub fn unpause(ctx: Context<ConfigAuthority>) -> Result<()> {
        let by = ctx.accounts.authority.key();
        ctx.accounts.config.set_paused(&by, false)?;
        emit!(PauseStateChanged { paused: false, by });
        msg!("CUR8 unpaused by {}", by);
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

    /// Create an empty balance for `owner`. Anyone may pay for it.
    pub fn open_balance(ctx: Context<OpenBalance>, owner: Pubkey) -> Result<()> {
        ctx.accounts.balance.bind(owner, ctx.bumps.balance);
        Ok(())
    }

    pub fn transfer(ctx: Context<TransferTokens>, to: Pubkey, amount: u128) -> Result<()> {
        let from = ctx.accounts.sender.key();
        let accounts = ctx.accounts;
        accounts.to_balance.bind(to, ctx.bumps.to_balance);

        ledger::transfer(
            &accounts.config,
            &mut accounts.from_balance,
            &mut accounts.to_balance,
            amount,
        )?;

        emit!(TokensTransferred { from, to, amount });
        Ok(())
    }

    pub fn approve(ctx: Context<Approve>, spender: Pubkey, amount: u128) -> Result<()> {
        require!(spender != Pubkey::default(), Cur8Error::InvalidRecipient);
        let owner = ctx.accounts.owner.key();
        let allowance = &mut ctx.accounts.allowance;
        allowance.owner = owner;
        allowance.spender = spender;
        allowance.amount = amount;
        allowance.bump = ctx.bumps.allowance;

        emit!(Approval {
            owner,
            spender,
            amount,
        });
        Ok(())
    }

    pub fn transfer_from(
        ctx: Context<TransferFrom>,
        owner: Pubkey,
        to: Pubkey,
        amount: u128,
    ) -> Result<()> {
        let accounts = ctx.accounts;
        accounts.to_balance.bind(to, ctx.bumps.to_balance);

        ledger::transfer_from(
            &accounts.config,
            &mut accounts.allowance,
            &mut accounts.from_balance,
            &mut accounts.to_balance,
            amount,
        )?;

        emit!(TokensTransferred {
            from: owner,
            to,
            amount,
        });
        Ok(())
    }

    pub fn get_token_info(ctx: Context<ReadConfig>) -> Result<TokenInfo> {
        Ok(ctx.accounts.config.token_info())
    }

    pub fn calculate_tokens(ctx: Context<ReadConfig>, proof_points: u64) -> Result<u128> {
        Ok(ctx.accounts.config.calculate_tokens(proof_points))
    }

    pub fn get_user_claim_info(ctx: Context<ClaimLookup>, _user: Pubkey) -> Result<UserClaimInfo> {
        let now = Clock::get()?.unix_timestamp;
        let record: ClaimRecord = state::load_or_default(&ctx.accounts.claim_record)?;
        Ok(record.claim_info(now))
    }
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + TokenConfig::INIT_SPACE,
        seeds = [TokenConfig::SEED],
        bump
    )]
    pub config: Account<'info, TokenConfig>,
    #[account(
        init,
        payer = owner,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, owner.key().as_ref()],
        bump
    )]
    pub owner_balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(minter: Pubkey)]
pub struct SetMinterAuthorization<'info> {
    #[account(seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + MinterAuthorization::INIT_SPACE,
        seeds = [MinterAuthorization::SEED, minter.as_ref()],
        bump
    )]
    pub minter_authorization: Account<'info, MinterAuthorization>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(minter: Pubkey)]
pub struct MinterLookup<'info> {
    /// CHECK: may be uninitialized; read through `state::load_or_default`.
    #[account(seeds = [MinterAuthorization::SEED, minter.as_ref()], bump)]
    pub minter_authorization: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(proof_points: u64, nullifier_hash: [u8; 32])]
pub struct ClaimTokens<'info> {
    #[account(mut, seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + ClaimRecord::INIT_SPACE,
        seeds = [ClaimRecord::SEED, user.key().as_ref()],
        bump
    )]
    pub claim_record: Account<'info, ClaimRecord>,
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + NullifierRecord::INIT_SPACE,
        seeds = [NullifierRecord::SEED, nullifier_hash.as_ref()],
        bump
    )]
    pub nullifier_record: Account<'info, NullifierRecord>,
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, user.key().as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub user: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct MintReward<'info> {
    #[account(mut, seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    /// CHECK: may be uninitialized, which reads as "not authorized".
    #[account(seeds = [MinterAuthorization::SEED, minter.key().as_ref()], bump)]
    pub minter_authorization: UncheckedAccount<'info>,
    #[account(
        init_if_needed,
        payer = minter,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, user.as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub minter: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct BatchMintRewards<'info> {
    #[account(mut, seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    /// CHECK: may be uninitialized, which reads as "not authorized".
    #[account(seeds = [MinterAuthorization::SEED, minter.key().as_ref()], bump)]
    pub minter_authorization: UncheckedAccount<'info>,
    pub minter: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct AdminMint<'info> {
    #[account(mut, seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, user.as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ConfigAuthority<'info> {
    #[account(mut, seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct ClaimLookup<'info> {
    /// CHECK: may be uninitialized; read through `state::load_or_default`.
    #[account(seeds = [ClaimRecord::SEED, user.as_ref()], bump)]
    pub claim_record: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct OpenBalance<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, owner.as_ref()],
        bump
    )]
    pub balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(to: Pubkey)]
pub struct TransferTokens<'info> {
    #[account(seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    #[account(
        mut,
        seeds = [BalanceAccount::SEED, sender.key().as_ref()],
        bump = from_balance.bump
    )]
    pub from_balance: Account<'info, BalanceAccount>,
    #[account(
        init_if_needed,
        payer = sender,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, to.as_ref()],
        bump
    )]
    pub to_balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub sender: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(spender: Pubkey)]
pub struct Approve<'info> {
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + Allowance::INIT_SPACE,
        seeds = [Allowance::SEED, owner.key().as_ref(), spender.as_ref()],
        bump
    )]
    pub allowance: Account<'info, Allowance>,
    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(owner: Pubkey, to: Pubkey)]
pub struct TransferFrom<'info> {
    #[account(seeds = [TokenConfig::SEED], bump = config.bump)]
    pub config: Account<'info, TokenConfig>,
    #[account(
        mut,
        seeds = [Allowance::SEED, owner.as_ref(), spender.key().as_ref()],
        bump = allowance.bump
    )]
    pub allowance: Account<'info, Allowance>,
    #[account(
        mut,
        seeds = [BalanceAccount::SEED, owner.as_ref()],
        bump = from_balance.bump
    )]
    pub from_balance: Account<'info, BalanceAccount>,
    #[account(
        init_if_needed,
        payer = spender,
        space = 8 + BalanceAccount::INIT_SPACE,
        seeds = [BalanceAccount::SEED, to.as_ref()],
        bump
    )]
    pub to_balance: Account<'info, BalanceAccount>,
    #[account(mut)]
    pub spender: Signer<'info>,
    pub system_program: Program<'info, System>,
}
