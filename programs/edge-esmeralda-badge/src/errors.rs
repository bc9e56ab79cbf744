use anchor_lang::prelude::*;

#[error_code]
pub enum BadgeError {
    #[msg("Unauthorized: caller is not owner")]
    Unauthorized,
    #[msg("Invalid owner address")]
    InvalidOwnerAddress,
    #[msg("Invalid nullifier")]
    InvalidNullifier,
    #[msg("Invalid recipient")]
    InvalidRecipient,
    #[msg("Already minted")]
    AlreadyMinted,
    #[msg("Nullifier already used")]
    NullifierUsed,
    #[msg("Max supply reached")]
    SupplyCapExceeded,
    #[msg("Token is soulbound and cannot be transferred")]
    Soulbound,
    #[msg("Invalid token id")]
    InvalidTokenId,
    #[msg("Insufficient balance")]
    InsufficientBalance,
    #[msg("URI too long")]
    UriTooLong,
    #[msg("Arithmetic overflow")]
    Overflow,
}
