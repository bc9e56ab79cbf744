use anchor_lang::prelude::*;

#[error_code]
pub enum Cur8Error {
    #[msg("Unauthorized: caller is not owner")]
    Unauthorized,

    #[msg("Not authorized minter")]
    NotAuthorizedMinter,

    #[msg("Invalid minter address")]
    InvalidMinterAddress,

    #[msg("Invalid owner address")]
    InvalidOwnerAddress,

    #[msg("Contract is paused")]
    ContractPaused,

    #[msg("Below minimum proof points")]
    BelowMinimum,

    #[msg("Invalid nullifier")]
    InvalidNullifier,

    #[msg("Nullifier already used")]
    NullifierAlreadyUsed,

    #[msg("Claim cooldown active")]
    CooldownActive,

    #[msg("Exceeds daily claim limit")]
    ExceedsDailyLimit,

    #[msg("Would exceed max supply")]
    SupplyCapExceeded,

    #[msg("Invalid user address")]
    InvalidUserAddress,

    #[msg("Reward type required")]
    RewardTypeRequired,

    #[msg("Reward too large")]
    RewardTooLarge,

    #[msg("Array length mismatch")]
    ArrayLengthMismatch,

    #[msg("Invalid array length")]
    InvalidArrayLength,

    #[msg("Individual reward too large")]
    IndividualRewardTooLarge,

    #[msg("Admin mint too large")]
    AdminMintTooLarge,

    #[msg("Invalid rate")]
    InvalidRate,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Insufficient allowance")]
    InsufficientAllowance,

    #[msg("Invalid recipient")]
    InvalidRecipient,

    #[msg("Balance account does not match batch recipient")]
    BalanceAccountMismatch,

    #[msg("Arithmetic overflow")]
    Overflow,
}
