//! # Selectors
//!
//! Canonical function signatures routed by the diamond and their 4-byte
//! selectors. A selector is the first four bytes of `sha256(signature)`; the
//! signature lists argument types only, since the acting caller travels
//! separately in [`crate::router::CallContext`].
//!
//! An interface id is the XOR of the selectors that make up the interface.

use soroban_sdk::{BytesN, Env};

/// A routed function: its signature text and precomputed selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FunctionDef {
    pub signature: &'static str,
    pub selector: [u8; 4],
}

impl FunctionDef {
    pub const fn new(signature: &'static str, selector: [u8; 4]) -> Self {
        Self { signature, selector }
    }

    pub fn selector(&self, env: &Env) -> BytesN<4> {
        BytesN::from_array(env, &self.selector)
    }
}

/// XOR of the selectors in `defs`.
pub fn interface_id(env: &Env, defs: &[FunctionDef]) -> BytesN<4> {
    let mut id = [0u8; 4];
    for def in defs {
        for (byte, sel) in id.iter_mut().zip(def.selector.iter()) {
            *byte ^= sel;
        }
    }
    BytesN::from_array(env, &id)
}

// ── DiamondCut ───────────────────────────────────────────────────────

pub const DIAMOND_CUT: FunctionDef =
    FunctionDef::new("diamond_cut(Vec<FacetCut>,Option<InitCall>)", [0xe9, 0x32, 0xa5, 0x3d]);

// ── DiamondLoupe ─────────────────────────────────────────────────────

pub const FACETS: FunctionDef = FunctionDef::new("facets()", [0x64, 0x4f, 0xad, 0x82]);
pub const FACET_FUNCTION_SELECTORS: FunctionDef =
    FunctionDef::new("facet_function_selectors(BytesN<32>)", [0x23, 0x17, 0xeb, 0x8e]);
pub const FACET_ADDRESSES: FunctionDef =
    FunctionDef::new("facet_addresses()", [0xd9, 0x32, 0x17, 0xb0]);
pub const FACET_ADDRESS: FunctionDef =
    FunctionDef::new("facet_address(BytesN<4>)", [0x1c, 0xce, 0x80, 0x5d]);
pub const SUPPORTS_INTERFACE: FunctionDef =
    FunctionDef::new("supports_interface(BytesN<4>)", [0xde, 0x12, 0xf6, 0x11]);

// ── Ownership / Pausable ─────────────────────────────────────────────

pub const OWNER: FunctionDef = FunctionDef::new("owner()", [0x3f, 0xc2, 0xbc, 0xdd]);
pub const TRANSFER_OWNERSHIP: FunctionDef =
    FunctionDef::new("transfer_ownership(Address)", [0x66, 0x30, 0x18, 0xb2]);
pub const PAUSED: FunctionDef = FunctionDef::new("paused()", [0x5c, 0x0f, 0xf0, 0xee]);
pub const PAUSE: FunctionDef = FunctionDef::new("pause()", [0x21, 0x38, 0xec, 0x0c]);
pub const UNPAUSE: FunctionDef = FunctionDef::new("unpause()", [0x81, 0x44, 0x71, 0x1b]);

// ── Crowdfunding ─────────────────────────────────────────────────────

pub const PROJECT_NAME: FunctionDef = FunctionDef::new("project_name()", [0x08, 0xc6, 0x56, 0xf3]);
pub const PROJECT_COIN: FunctionDef = FunctionDef::new("project_coin()", [0x17, 0xdf, 0x4d, 0x86]);
pub const ACCEPTED_COINS: FunctionDef =
    FunctionDef::new("accepted_coins()", [0x4b, 0xa2, 0x3b, 0xa9]);
pub const ADD_ACCEPTED_COIN: FunctionDef =
    FunctionDef::new("add_accepted_coin(Address)", [0x96, 0x91, 0x39, 0xe8]);
pub const SET_FUNDING_DURATION: FunctionDef =
    FunctionDef::new("set_funding_duration(u64,u64)", [0xca, 0xe9, 0x6f, 0xb5]);
pub const FUNDING_WINDOW: FunctionDef =
    FunctionDef::new("funding_window()", [0xcd, 0x9e, 0x46, 0x61]);
pub const SET_MIN_FUNDING_THRESHOLD: FunctionDef =
    FunctionDef::new("set_min_funding_threshold(i128)", [0xca, 0x38, 0xf8, 0xdb]);
pub const MIN_FUNDING_THRESHOLD: FunctionDef =
    FunctionDef::new("min_funding_threshold()", [0x7c, 0x43, 0x35, 0xc1]);
pub const SET_PROJECT_OWNER_ADDR: FunctionDef =
    FunctionDef::new("set_project_owner_addr(Address)", [0x3f, 0xa6, 0xf1, 0x4f]);
pub const PROJECT_OWNER_ADDR: FunctionDef =
    FunctionDef::new("project_owner_addr()", [0xf5, 0xed, 0xd7, 0x04]);
pub const ALLOCATE_SUPPLY: FunctionDef =
    FunctionDef::new("allocate_supply(i128)", [0xe2, 0x7b, 0x09, 0x29]);
pub const ALLOCATED_SUPPLY: FunctionDef =
    FunctionDef::new("allocated_supply()", [0x6a, 0x42, 0x7b, 0xbb]);
pub const GET_BUY_PRICE: FunctionDef =
    FunctionDef::new("get_buy_price(i128)", [0x87, 0x0c, 0x18, 0x94]);
pub const GET_SELL_PRICE: FunctionDef =
    FunctionDef::new("get_sell_price(i128)", [0x10, 0xfb, 0x3c, 0xfb]);
pub const CURRENT_SUPPLY: FunctionDef =
    FunctionDef::new("current_supply()", [0x73, 0x33, 0xe4, 0x94]);
pub const TOTAL_MINTED: FunctionDef = FunctionDef::new("total_minted()", [0xbd, 0x2a, 0x48, 0xfd]);
pub const PHASE: FunctionDef = FunctionDef::new("phase()", [0x00, 0x67, 0xaa, 0x53]);
pub const INVESTMENT_OF: FunctionDef =
    FunctionDef::new("investment_of(Address,Address)", [0x4f, 0xa4, 0x9f, 0xea]);
pub const COIN_POOL: FunctionDef = FunctionDef::new("coin_pool(Address)", [0x23, 0xd0, 0x6c, 0x2b]);
pub const INVEST: FunctionDef = FunctionDef::new("invest(Address,i128)", [0xcd, 0x26, 0x52, 0x2c]);
pub const WITHDRAW_FUND: FunctionDef =
    FunctionDef::new("withdraw_fund(Address)", [0xbd, 0xb3, 0x9b, 0x7d]);
pub const RECLAIM_FUND: FunctionDef =
    FunctionDef::new("reclaim_fund(Address)", [0x95, 0x71, 0xd4, 0xc4]);
pub const CLAIM_COIN: FunctionDef = FunctionDef::new("claim_coin()", [0xa4, 0x62, 0xf4, 0xa2]);
pub const WITHDRAW_COIN: FunctionDef = FunctionDef::new("withdraw_coin()", [0xc3, 0x43, 0x97, 0x2d]);
pub const CLAIM_FEES: FunctionDef = FunctionDef::new("claim_fees()", [0x14, 0xa7, 0x5c, 0xa9]);
pub const CLAIM_FUND: FunctionDef = FunctionDef::new("claim_fund()", [0xb8, 0x65, 0x3c, 0xbc]);
pub const CLAIM_PLATFORM_FEES: FunctionDef =
    FunctionDef::new("claim_platform_fees()", [0x05, 0x14, 0x92, 0x57]);
pub const LAUNCH_BOND_INV: FunctionDef =
    FunctionDef::new("launch_bond_inv(u32)", [0xa9, 0xee, 0x8a, 0x4c]);

// ── Bondfunding ──────────────────────────────────────────────────────

pub const BOND_TOKEN: FunctionDef = FunctionDef::new("bond_token()", [0x90, 0x4f, 0x39, 0x50]);
pub const BOND_FEE_BPS: FunctionDef = FunctionDef::new("bond_fee_bps()", [0xc3, 0x42, 0x1b, 0xd9]);
pub const OFFER: FunctionDef = FunctionDef::new("offer(u64)", [0x62, 0x5f, 0x94, 0x49]);
pub const NEXT_OFFER_ID: FunctionDef =
    FunctionDef::new("next_offer_id()", [0x82, 0x5c, 0x63, 0x33]);
pub const CREATE_OFFER: FunctionDef =
    FunctionDef::new("create_offer(i128,Address,i128)", [0xf4, 0x7f, 0xc2, 0xd8]);
pub const EDIT_OFFER: FunctionDef =
    FunctionDef::new("edit_offer(u64,i128,Address,i128)", [0x45, 0xb2, 0xcc, 0x1a]);
pub const DELETE_OFFER: FunctionDef =
    FunctionDef::new("delete_offer(u64)", [0x90, 0xcd, 0x7b, 0xe2]);
pub const BUY_OFFER: FunctionDef =
    FunctionDef::new("buy_offer(u64,i128,Address,i128)", [0x17, 0xa4, 0x96, 0x92]);

// ── DiamondInit ──────────────────────────────────────────────────────

pub const INIT_DIAMOND: FunctionDef =
    FunctionDef::new("init_diamond(DiamondConfig)", [0x87, 0xc2, 0x6f, 0xee]);

// ── Interfaces ───────────────────────────────────────────────────────

pub const DIAMOND_CUT_INTERFACE: &[FunctionDef] = &[DIAMOND_CUT];
pub const DIAMOND_LOUPE_INTERFACE: &[FunctionDef] = &[
    FACETS,
    FACET_FUNCTION_SELECTORS,
    FACET_ADDRESSES,
    FACET_ADDRESS,
];
pub const OWNERSHIP_INTERFACE: &[FunctionDef] = &[OWNER, TRANSFER_OWNERSHIP];
pub const INTROSPECTION_INTERFACE: &[FunctionDef] = &[SUPPORTS_INTERFACE];
