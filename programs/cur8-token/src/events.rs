use anchor_lang::prelude::*;

#[event]
pub struct TokensClaimed {
    pub user: Pubkey,
    pub amount: u128,
    pub proof_points: u64,
    pub nullifier_hash: [u8; 32],
}

#[event]
pub struct RewardMinted {
    pub user: Pubkey,
    pub amount: u128,
    pub reward_type: String,
    pub minter: Pubkey,
}

#[event]
pub struct BatchRewardsMinted {
    pub recipients: u32,
    pub total_amount: u128,
    pub reward_type: String,
    pub minter: Pubkey,
}

#[event]
pub struct AdminMinted {
    pub user: Pubkey,
    pub amount: u128,
}

#[event]
pub struct MinterAuthorizationUpdated {
    pub minter: Pubkey,
    pub authorized: bool,
}

#[event]
pub struct ProofPointsRateUpdated {
    pub old_rate: u64,
    pub new_rate: u64,
}

#[event]
pub struct PauseStateChanged {
    pub paused: bool,
    pub by: Pubkey,
}

#[event]
pub struct TokensTransferred {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u128,
}

#[event]
pub struct Approval {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub amount: u128,
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
