//! # Storage
//!
//! Typed helpers over the one storage space shared by every facet.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type               | Description                          |
//! |--------------------|--------------------|--------------------------------------|
//! | `Owner`            | `Address`          | Contract owner                       |
//! | `Paused`           | `bool`             | Pause flag                           |
//! | `Lock`             | `bool`             | Per-call reentrancy flag             |
//! | `Registry`         | `SelectorRegistry` | Selector ↔ facet maps, facet order   |
//! | `Facet(addr)`      | `FacetCode`        | Code bound to a facet address        |
//! | `Interfaces`       | `Map<BytesN<4>, bool>` | Supported interface ids          |
//! | `Config`           | `DiamondConfig`    | Project configuration                |
//! | `AcceptedCoins`    | `Vec<Address>`     | Coins accepted by `invest`           |
//! | `Window`           | `FundingWindow`    | Funding start/end                    |
//! | `MinThreshold`     | `i128`             | Minimum raised supply                |
//! | `ProjectOwnerAddr` | `Address`          | Payee of fees and raised funds       |
//! | `Allocated`        | `i128`             | Project coin held for investors      |
//! | `Supply`           | `i128`             | Curve supply counter                 |
//! | `TotalMinted`      | `i128`             | Curve units credited to investors    |
//! | `Pool(coin)`       | `CoinPool`         | Per-coin settlement pool             |
//! | `BondLaunch`       | `BondLaunch`       | One-shot bond issuance record        |
//! | `NextOfferId`      | `u64`              | Offer id counter                     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type         | Description               |
//! |----------------------------|--------------|---------------------------|
//! | `Investment(investor, coin)` | `Investment` | Investor bookkeeping    |
//! | `Offer(id)`                | `Offer`      | Bond offer book entry     |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env, Map, Vec};

use crate::registry::SelectorRegistry;
use crate::types::{BondLaunch, CoinPool, DiamondConfig, FacetCode, FundingWindow, Investment, Offer};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    Paused,
    Lock,
    Registry,
    Facet(BytesN<32>),
    Interfaces,
    Config,
    AcceptedCoins,
    Window,
    MinThreshold,
    ProjectOwnerAddr,
    Allocated,
    Supply,
    TotalMinted,
    Pool(Address),
    BondLaunch,
    NextOfferId,
    /// (investor, coin)
    Investment(Address, Address),
    Offer(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn get_i128(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

fn set_i128(env: &Env, key: &DataKey, value: i128) {
    env.storage().instance().set(key, &value);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

/// Sets the reentrancy flag. Fails if it is already held.
pub fn acquire_lock(env: &Env) -> Result<(), Error> {
    let held: bool = env.storage().instance().get(&DataKey::Lock).unwrap_or(false);
    if held {
        return Err(Error::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Lock, &true);
    Ok(())
}

pub fn release_lock(env: &Env) {
    env.storage().instance().remove(&DataKey::Lock);
}

pub fn load_registry(env: &Env) -> Option<SelectorRegistry> {
    env.storage().instance().get(&DataKey::Registry)
}

pub fn save_registry(env: &Env, registry: &SelectorRegistry) {
    env.storage().instance().set(&DataKey::Registry, registry);
}

pub fn facet_code(env: &Env, facet: &BytesN<32>) -> Option<FacetCode> {
    env.storage()
        .instance()
        .get(&DataKey::Facet(facet.clone()))
}

pub fn bind_facet(env: &Env, facet: &BytesN<32>, code: FacetCode) {
    env.storage()
        .instance()
        .set(&DataKey::Facet(facet.clone()), &code);
}

pub fn interfaces(env: &Env) -> Map<BytesN<4>, bool> {
    env.storage()
        .instance()
        .get(&DataKey::Interfaces)
        .unwrap_or_else(|| Map::new(env))
}

pub fn set_interfaces(env: &Env, interfaces: &Map<BytesN<4>, bool>) {
    env.storage().instance().set(&DataKey::Interfaces, interfaces);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Project configuration. Fails with `NotInitialized` before `init_diamond`.
pub fn get_config(env: &Env) -> Result<DiamondConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &DiamondConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn accepted_coins(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::AcceptedCoins)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_accepted_coins(env: &Env, coins: &Vec<Address>) {
    env.storage().instance().set(&DataKey::AcceptedCoins, coins);
}

pub fn get_window(env: &Env) -> Option<FundingWindow> {
    env.storage().instance().get(&DataKey::Window)
}

pub fn set_window(env: &Env, window: &FundingWindow) {
    env.storage().instance().set(&DataKey::Window, window);
}

/// Zero when unset.
pub fn get_min_threshold(env: &Env) -> i128 {
    get_i128(env, &DataKey::MinThreshold)
}

pub fn set_min_threshold(env: &Env, value: i128) {
    set_i128(env, &DataKey::MinThreshold, value);
}

pub fn get_project_owner_addr(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::ProjectOwnerAddr)
}

pub fn set_project_owner_addr(env: &Env, addr: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::ProjectOwnerAddr, addr);
}

pub fn get_allocated(env: &Env) -> i128 {
    get_i128(env, &DataKey::Allocated)
}

pub fn set_allocated(env: &Env, value: i128) {
    set_i128(env, &DataKey::Allocated, value);
}

pub fn get_supply(env: &Env) -> i128 {
    get_i128(env, &DataKey::Supply)
}

pub fn set_supply(env: &Env, value: i128) {
    set_i128(env, &DataKey::Supply, value);
}

pub fn get_total_minted(env: &Env) -> i128 {
    get_i128(env, &DataKey::TotalMinted)
}

pub fn set_total_minted(env: &Env, value: i128) {
    set_i128(env, &DataKey::TotalMinted, value);
}

pub fn get_pool(env: &Env, coin: &Address) -> CoinPool {
    env.storage()
        .instance()
        .get(&DataKey::Pool(coin.clone()))
        .unwrap_or_default()
}

pub fn set_pool(env: &Env, coin: &Address, pool: &CoinPool) {
    env.storage()
        .instance()
        .set(&DataKey::Pool(coin.clone()), pool);
}

pub fn get_bond_launch(env: &Env) -> Option<BondLaunch> {
    env.storage().instance().get(&DataKey::BondLaunch)
}

pub fn set_bond_launch(env: &Env, launch: &BondLaunch) {
    env.storage().instance().set(&DataKey::BondLaunch, launch);
}

pub fn next_offer_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextOfferId)
        .unwrap_or(0)
}

/// Atomically reads, increments, and stores the offer counter.
/// Returns the id to use for the *current* offer (pre-increment value).
pub fn get_and_increment_offer_id(env: &Env) -> Result<u64, Error> {
    let current = next_offer_id(env);
    let next = current.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::NextOfferId, &next);
    Ok(current)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Investment record of `investor` in `coin`; empty when none exists.
pub fn load_investment(env: &Env, investor: &Address, coin: &Address) -> Investment {
    let key = DataKey::Investment(investor.clone(), coin.clone());
    match env.storage().persistent().get::<_, Investment>(&key) {
        Some(record) => {
            bump_persistent(env, &key);
            record
        }
        None => Investment::default(),
    }
}

pub fn save_investment(env: &Env, investor: &Address, coin: &Address, record: &Investment) {
    let key = DataKey::Investment(investor.clone(), coin.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn remove_investment(env: &Env, investor: &Address, coin: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Investment(investor.clone(), coin.clone()));
}

pub fn load_offer(env: &Env, id: u64) -> Result<Offer, Error> {
    let key = DataKey::Offer(id);
    let offer: Offer = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::OfferNotFound)?;
    bump_persistent(env, &key);
    Ok(offer)
}

pub fn save_offer(env: &Env, offer: &Offer) {
    let key = DataKey::Offer(offer.id);
    env.storage().persistent().set(&key, offer);
    bump_persistent(env, &key);
}
