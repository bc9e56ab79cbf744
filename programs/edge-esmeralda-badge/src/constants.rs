pub const BADGE_NAME: &str = "Edge Esmeralda Badge";

/// The single semi-fungible id this ledger issues.
pub const BADGE_TOKEN_ID: u64 = 1;
pub const MAX_SUPPLY: u64 = 2_000;
pub const MAX_URI_LEN: usize = 200;
