pub const TOKEN_NAME: &str = "PhoenixProof Token";
pub const TOKEN_SYMBOL: &str = "CUR8";
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units.
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

pub const MAX_SUPPLY: u128 = 1_000_000_000 * TOKEN_UNIT;
/// Pre-minted to the owner at initialization.
pub const INITIAL_SUPPLY: u128 = 100_000_000 * TOKEN_UNIT;

pub const DEFAULT_PROOF_POINTS_PER_TOKEN: u64 = 100;
pub const MAX_PROOF_POINTS_PER_TOKEN: u64 = 1_000;
pub const MIN_PROOF_POINTS: u64 = 100;

pub const CLAIM_COOLDOWN: i64 = 24 * 60 * 60;
pub const DAILY_WINDOW: i64 = 24 * 60 * 60;
pub const MAX_CLAIM_PER_DAY: u128 = 1_000 * TOKEN_UNIT;

pub const MAX_REWARD_SIZE: u128 = 100 * TOKEN_UNIT;
pub const MAX_ADMIN_MINT: u128 = 1_000 * TOKEN_UNIT;
pub const MAX_BATCH_SIZE: usize = 100;
