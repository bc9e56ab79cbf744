use anchor_lang::prelude::*;

#[event]
pub struct BadgeMinted {
    pub to: Pubkey,
    pub token_id: u64,
    pub nullifier_hash: [u8; 32],
}

#[event]
pub struct AdminBadgeMinted {
    pub to: Pubkey,
    pub token_id: u64,
    pub by: Pubkey,
}

#[event]
pub struct BadgeTransferred {
    pub from: Pubkey,
    pub to: Pubkey,
    pub token_id: u64,
    pub amount: u64,
}

#[event]
pub struct UriUpdated {
    pub uri: String,
}

#[event]
pub struct OwnershipTransferStarted {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
