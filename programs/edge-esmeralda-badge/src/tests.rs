use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use proptest::prelude::*;

use crate::badge;
use crate::constants::*;
use crate::errors::BadgeError;
use crate::state::{BadgeConfig, BadgeHolder, NullifierRecord, TransferPolicy};

const NOW: i64 = 1_717_000_000;

fn null_hash(n: u16) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash[0] = 0xee;
    hash[30..].copy_from_slice(&n.to_be_bytes());
    hash
}

fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: BadgeError) {
    let expected: Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}

struct Badges {
    config: BadgeConfig,
    owner: Pubkey,
    holders: HashMap<Pubkey, BadgeHolder>,
    nullifiers: HashMap<[u8; 32], NullifierRecord>,
}

impl Badges {
    fn new() -> Self {
        let owner = Pubkey::new_unique();
        Self {
            config: BadgeConfig::new(owner, "ipfs://edge-esmeralda/{id}.json".to_string(), 255)
                .unwrap(),
            owner,
            holders: HashMap::new(),
            nullifiers: HashMap::new(),
        }
    }

    fn holder(&mut self, user: Pubkey) -> &mut BadgeHolder {
        let holder = self.holders.entry(user).or_default();
        holder.bind(user, 254);
        holder
    }

    fn mint(&mut self, to: Pubkey, hash: [u8; 32]) -> Result<u64> {
        let holder = self.holders.entry(to).or_default();
        holder.bind(to, 254);
        badge::mint_edge_esmeralda(
            &mut self.config,
            holder,
            self.nullifiers.entry(hash).or_default(),
            hash,
            NOW,
        )
    }

    fn admin_mint(&mut self, caller: Pubkey, to: Pubkey) -> Result<u64> {
        let holder = self.holders.entry(to).or_default();
        holder.bind(to, 254);
        badge::admin_mint(&mut self.config, &caller, holder, NOW)
    }

    fn has_minted(&self, user: &Pubkey) -> bool {
        self.holders.get(user).map(|h| h.has_minted).unwrap_or(false)
    }
}

#[test]
fn mint_issues_one_badge_and_spends_nullifier() {
    let mut badges = Badges::new();
    let user = Pubkey::new_unique();

    let token_id = badges.mint(user, null_hash(1)).unwrap();

    assert_eq!(token_id, BADGE_TOKEN_ID);
    assert_eq!(badges.holder(user).balance_of(BADGE_TOKEN_ID), 1);
    assert_eq!(badges.holder(user).balance_of(2), 0);
    assert!(badges.has_minted(&user));
    assert_eq!(badges.config.current_supply, 1);
    let nullifier = &badges.nullifiers[&null_hash(1)];
    assert!(nullifier.is_used);
    assert_eq!(nullifier.holder, user);
}

#[test]
fn second_mint_for_same_address_is_rejected() {
    let mut badges = Badges::new();
    let user = Pubkey::new_unique();
    badges.mint(user, null_hash(1)).unwrap();

    assert_err(badges.mint(user, null_hash(2)), BadgeError::AlreadyMinted);
    assert_err(badges.mint(user, null_hash(1)), BadgeError::AlreadyMinted);
    assert_eq!(badges.config.current_supply, 1);
    assert!(!badges.nullifiers[&null_hash(2)].is_used);
}

#[test]
fn nullifier_cannot_back_two_badges() {
    let mut badges = Badges::new();
    let (alice, bob) = (Pubkey::new_unique(), Pubkey::new_unique());
    badges.mint(alice, null_hash(7)).unwrap();

    assert_err(badges.mint(bob, null_hash(7)), BadgeError::NullifierUsed);
    assert!(!badges.has_minted(&bob));
    let config = badges.config.clone();
    assert!(badges.holder(bob).can_mint(&config));
}

#[test]
fn mint_input_validation() {
    let mut badges = Badges::new();

    assert_err(
        badges.mint(Pubkey::new_unique(), [0u8; 32]),
        BadgeError::InvalidNullifier,
    );
    assert_err(
        badges.mint(Pubkey::default(), null_hash(1)),
        BadgeError::InvalidRecipient,
    );
    assert_eq!(badges.config.current_supply, 0);
}

#[test]
fn supply_cap_stops_minting() {
    let mut badges = Badges::new();
    badges.config.current_supply = MAX_SUPPLY - 1;
    let (last, late) = (Pubkey::new_unique(), Pubkey::new_unique());

    badges.mint(last, null_hash(1)).unwrap();
    assert_eq!(badges.config.current_supply, MAX_SUPPLY);
    let config = badges.config.clone();
    assert!(!badges.holder(late).can_mint(&config));

    assert_err(badges.mint(late, null_hash(2)), BadgeError::SupplyCapExceeded);
    assert!(!badges.nullifiers[&null_hash(2)].is_used);
    let owner = badges.owner;
    assert_err(
        badges.admin_mint(owner, late),
        BadgeError::SupplyCapExceeded,
    );
    assert!(!badges.has_minted(&late));
}

#[test]
fn admin_mint_skips_proof_but_keeps_invariants() {
    let mut badges = Badges::new();
    let owner = badges.owner;
    let user = Pubkey::new_unique();

    assert_err(
        badges.admin_mint(user, user),
        BadgeError::Unauthorized,
    );
    badges.admin_mint(owner, user).unwrap();
    assert!(badges.has_minted(&user));
    assert_eq!(badges.config.current_supply, 1);

    assert_err(badges.admin_mint(owner, user), BadgeError::AlreadyMinted);
    assert_err(badges.mint(user, null_hash(3)), BadgeError::AlreadyMinted);
}

#[test]
fn soulbound_badge_never_transfers() {
    let mut badges = Badges::new();
    let (user, friend) = (Pubkey::new_unique(), Pubkey::new_unique());
    badges.mint(user, null_hash(1)).unwrap();
    let config = badges.config.clone();
    let mut from = badges.holder(user).clone();
    let mut to = badges.holder(friend).clone();

    assert_err(
        badge::transfer(&config, &mut from, &mut to, BADGE_TOKEN_ID, 1),
        BadgeError::Soulbound,
    );
    assert_eq!(from.balance, 1);
    assert_eq!(to.balance, 0);
    assert_eq!(BadgeError::Soulbound.to_string(), "Token is soulbound and cannot be transferred");
}

#[test]
fn transferable_policy_moves_balances() {
    let mut config = BadgeConfig::new(Pubkey::new_unique(), String::new(), 255).unwrap();
    config.transfer_policy = TransferPolicy::Transferable;
    let mut from = BadgeHolder::default();
    from.bind(Pubkey::new_unique(), 254);
    from.balance = 1;
    let mut to = BadgeHolder::default();
    to.bind(Pubkey::new_unique(), 253);

    assert_err(
        badge::transfer(&config, &mut from, &mut to, 9, 1),
        BadgeError::InvalidTokenId,
    );
    assert_err(
        badge::transfer(&config, &mut from, &mut to, BADGE_TOKEN_ID, 2),
        BadgeError::InsufficientBalance,
    );
    badge::transfer(&config, &mut from, &mut to, BADGE_TOKEN_ID, 1).unwrap();
    assert_eq!((from.balance, to.balance), (0, 1));
}

#[test]
fn config_administration() {
    let mut badges = Badges::new();
    let owner = badges.owner;
    let next = Pubkey::new_unique();

    assert_err(
        badges.config.set_uri(&next, "ipfs://other".to_string()),
        BadgeError::Unauthorized,
    );
    assert_err(
        badges.config.set_uri(&owner, "x".repeat(MAX_URI_LEN + 1)),
        BadgeError::UriTooLong,
    );
    badges.config.set_uri(&owner, "ipfs://other".to_string()).unwrap();
    assert_eq!(badges.config.uri, "ipfs://other");

    badges.config.begin_ownership_transfer(&owner, next).unwrap();
    assert_eq!(badges.config.accept_ownership(&next).unwrap(), owner);
    assert_err(badges.admin_mint(owner, next), BadgeError::Unauthorized);
    badges.admin_mint(next, next).unwrap();

    badges.config.renounce_ownership(&next).unwrap();
    assert_err(
        badges.admin_mint(next, Pubkey::new_unique()),
        BadgeError::Unauthorized,
    );
}

#[test]
fn badge_info_tracks_supply() {
    let mut badges = Badges::new();
    badges.mint(Pubkey::new_unique(), null_hash(1)).unwrap();
    badges.mint(Pubkey::new_unique(), null_hash(2)).unwrap();

    let info = badges.config.badge_info();
    assert_eq!(info.current_supply, 2);
    assert_eq!(info.max_supply, 2_000);
    assert_eq!(info.remaining, 1_998);
}

proptest! {
    #[test]
    fn at_most_one_badge_per_address(attempts in proptest::collection::vec((0usize..4, any::<bool>()), 1..40)) {
        let mut badges = Badges::new();
        let users: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let owner = badges.owner;

        for (i, (slot, by_admin)) in attempts.into_iter().enumerate() {
            let user = users[slot];
            let minted_before = badges.has_minted(&user);
            let result = if by_admin {
                badges.admin_mint(owner, user)
            } else {
                badges.mint(user, null_hash(i as u16 + 1))
            };
            prop_assert_eq!(result.is_ok(), !minted_before);
            prop_assert!(badges.has_minted(&user));
        }

        let minted = users.iter().filter(|u| badges.has_minted(u)).count() as u64;
        prop_assert_eq!(badges.config.current_supply, minted);
        for user in &users {
            prop_assert!(badges.holders.get(user).map(|h| h.balance).unwrap_or(0) <= 1);
        }
    }
}
