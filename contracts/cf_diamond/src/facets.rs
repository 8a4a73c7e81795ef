//! # Facets
//!
//! Function tables of every [`FacetCode`] and deterministic facet deployment.
//!
//! | Code           | Module            | Functions |
//! |----------------|-------------------|-----------|
//! | `DiamondCut`   | [`crate::cut`]    | 1         |
//! | `DiamondLoupe` | [`crate::loupe`]  | 5         |
//! | `Ownership`    | [`crate::access`] | 2         |
//! | `Pausable`     | [`crate::access`] | 3         |
//! | `Crowdfunding` | [`crate::crowdfunding`] | 28  |
//! | `Bondfunding`  | [`crate::bondfunding`]  | 8   |
//! | `DiamondInit`  | [`crate::init`]   | 1         |
//!
//! A facet address is `sha256(code name ‖ salt as big-endian u32)`, so the
//! same code deployed under a new salt yields a new address to cut onto.

use soroban_sdk::{Bytes, BytesN, Env};

use crate::router::Handler;
use crate::selectors::{self as sel, FunctionDef};
use crate::types::FacetCode;
use crate::{access, bondfunding, crowdfunding, cut, events, init, loupe, storage};

/// One routed function of a facet.
pub struct FacetFunction {
    pub def: FunctionDef,
    pub handler: Handler,
}

impl FacetFunction {
    const fn new(def: FunctionDef, handler: Handler) -> Self {
        Self { def, handler }
    }
}

const DIAMOND_CUT: &[FacetFunction] = &[FacetFunction::new(sel::DIAMOND_CUT, cut::diamond_cut)];

const DIAMOND_LOUPE: &[FacetFunction] = &[
    FacetFunction::new(sel::FACETS, loupe::facets),
    FacetFunction::new(sel::FACET_FUNCTION_SELECTORS, loupe::facet_function_selectors),
    FacetFunction::new(sel::FACET_ADDRESSES, loupe::facet_addresses),
    FacetFunction::new(sel::FACET_ADDRESS, loupe::facet_address),
    FacetFunction::new(sel::SUPPORTS_INTERFACE, loupe::supports_interface),
];

const OWNERSHIP: &[FacetFunction] = &[
    FacetFunction::new(sel::OWNER, access::owner),
    FacetFunction::new(sel::TRANSFER_OWNERSHIP, access::transfer_ownership),
];

const PAUSABLE: &[FacetFunction] = &[
    FacetFunction::new(sel::PAUSED, access::paused),
    FacetFunction::new(sel::PAUSE, access::pause),
    FacetFunction::new(sel::UNPAUSE, access::unpause),
];

const CROWDFUNDING: &[FacetFunction] = &[
    FacetFunction::new(sel::PROJECT_NAME, crowdfunding::project_name),
    FacetFunction::new(sel::PROJECT_COIN, crowdfunding::project_coin),
    FacetFunction::new(sel::ACCEPTED_COINS, crowdfunding::accepted_coins),
    FacetFunction::new(sel::ADD_ACCEPTED_COIN, crowdfunding::add_accepted_coin),
    FacetFunction::new(sel::SET_FUNDING_DURATION, crowdfunding::set_funding_duration),
    FacetFunction::new(sel::FUNDING_WINDOW, crowdfunding::funding_window),
    FacetFunction::new(sel::SET_MIN_FUNDING_THRESHOLD, crowdfunding::set_min_funding_threshold),
    FacetFunction::new(sel::MIN_FUNDING_THRESHOLD, crowdfunding::min_funding_threshold),
    FacetFunction::new(sel::SET_PROJECT_OWNER_ADDR, crowdfunding::set_project_owner_addr),
    FacetFunction::new(sel::PROJECT_OWNER_ADDR, crowdfunding::project_owner_addr),
    FacetFunction::new(sel::ALLOCATE_SUPPLY, crowdfunding::allocate_supply),
    FacetFunction::new(sel::ALLOCATED_SUPPLY, crowdfunding::allocated_supply),
    FacetFunction::new(sel::GET_BUY_PRICE, crowdfunding::get_buy_price),
    FacetFunction::new(sel::GET_SELL_PRICE, crowdfunding::get_sell_price),
    FacetFunction::new(sel::CURRENT_SUPPLY, crowdfunding::current_supply),
    FacetFunction::new(sel::TOTAL_MINTED, crowdfunding::total_minted),
    FacetFunction::new(sel::PHASE, crowdfunding::phase),
    FacetFunction::new(sel::INVESTMENT_OF, crowdfunding::investment_of),
    FacetFunction::new(sel::COIN_POOL, crowdfunding::coin_pool),
    FacetFunction::new(sel::INVEST, crowdfunding::invest),
    FacetFunction::new(sel::WITHDRAW_FUND, crowdfunding::withdraw_fund),
    FacetFunction::new(sel::RECLAIM_FUND, crowdfunding::reclaim_fund),
    FacetFunction::new(sel::CLAIM_COIN, crowdfunding::claim_coin),
    FacetFunction::new(sel::WITHDRAW_COIN, crowdfunding::withdraw_coin),
    FacetFunction::new(sel::CLAIM_FEES, crowdfunding::claim_fees),
    FacetFunction::new(sel::CLAIM_FUND, crowdfunding::claim_fund),
    FacetFunction::new(sel::CLAIM_PLATFORM_FEES, crowdfunding::claim_platform_fees),
    FacetFunction::new(sel::LAUNCH_BOND_INV, crowdfunding::launch_bond_inv),
];

const BONDFUNDING: &[FacetFunction] = &[
    FacetFunction::new(sel::BOND_TOKEN, bondfunding::bond_token),
    FacetFunction::new(sel::BOND_FEE_BPS, bondfunding::bond_fee_bps),
    FacetFunction::new(sel::OFFER, bondfunding::offer),
    FacetFunction::new(sel::NEXT_OFFER_ID, bondfunding::next_offer_id),
    FacetFunction::new(sel::CREATE_OFFER, bondfunding::create_offer),
    FacetFunction::new(sel::EDIT_OFFER, bondfunding::edit_offer),
    FacetFunction::new(sel::DELETE_OFFER, bondfunding::delete_offer),
    FacetFunction::new(sel::BUY_OFFER, bondfunding::buy_offer),
];

const DIAMOND_INIT: &[FacetFunction] = &[FacetFunction::new(sel::INIT_DIAMOND, init::init_diamond)];

impl FacetCode {
    pub fn name(&self) -> &'static str {
        match self {
            FacetCode::DiamondCut => "DiamondCut",
            FacetCode::DiamondLoupe => "DiamondLoupe",
            FacetCode::Ownership => "Ownership",
            FacetCode::Pausable => "Pausable",
            FacetCode::Crowdfunding => "Crowdfunding",
            FacetCode::Bondfunding => "Bondfunding",
            FacetCode::DiamondInit => "DiamondInit",
        }
    }

    pub fn functions(&self) -> &'static [FacetFunction] {
        match self {
            FacetCode::DiamondCut => DIAMOND_CUT,
            FacetCode::DiamondLoupe => DIAMOND_LOUPE,
            FacetCode::Ownership => OWNERSHIP,
            FacetCode::Pausable => PAUSABLE,
            FacetCode::Crowdfunding => CROWDFUNDING,
            FacetCode::Bondfunding => BONDFUNDING,
            FacetCode::DiamondInit => DIAMOND_INIT,
        }
    }

    pub fn handler(&self, selector: &BytesN<4>) -> Option<Handler> {
        let wanted = selector.to_array();
        self.functions()
            .iter()
            .find(|f| f.def.selector == wanted)
            .map(|f| f.handler)
    }
}

/// Deterministic address of `code` deployed under `salt`.
pub fn facet_address(env: &Env, code: FacetCode, salt: u32) -> BytesN<32> {
    let mut preimage = Bytes::from_slice(env, code.name().as_bytes());
    preimage.extend_from_array(&salt.to_be_bytes());
    env.crypto().sha256(&preimage).to_bytes()
}

/// Bind `code` to its address for `salt`. Redeploying is a no-op.
pub fn deploy(env: &Env, code: FacetCode, salt: u32) -> BytesN<32> {
    let facet = facet_address(env, code, salt);
    if storage::facet_code(env, &facet).is_none() {
        storage::bind_facet(env, &facet, code);
        events::emit_facet_deployed(env, facet.clone(), code, salt);
    }
    facet
}

pub fn is_zero(facet: &BytesN<32>) -> bool {
    facet.to_array() == [0u8; 32]
}
