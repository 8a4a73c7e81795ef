//! # Events
//!
//! Every state change publishes exactly one event, emitted after any token
//! transfers of the same call. Topics are `(symbol, key)` where a natural key
//! exists (investor, offer id, facet) and `(symbol,)` otherwise.
//!
//! | Topic        | Payload                   |
//! |--------------|---------------------------|
//! | `cut`        | [`DiamondCutEvent`]       |
//! | `deployed`   | [`FacetDeployed`]         |
//! | `init`       | [`DiamondInitialized`]    |
//! | `own_xfer`   | [`OwnershipTransferred`]  |
//! | `paused`     | [`PauseToggled`]          |
//! | `unpaused`   | [`PauseToggled`]          |
//! | `coin_add`   | [`CoinAccepted`]          |
//! | `duration`   | [`FundingDurationSet`]    |
//! | `min_thr`    | [`MinThresholdSet`]       |
//! | `po_addr`    | [`ProjectOwnerSet`]       |
//! | `allocate`   | [`SupplyAllocated`]       |
//! | `invest`     | [`Invested`]              |
//! | `withdraw`   | [`FundReturned`]          |
//! | `reclaim`    | [`FundReturned`]          |
//! | `claim_cn`   | [`CoinClaimed`]           |
//! | `wd_coin`    | [`Settlement`]            |
//! | `fees`       | [`Settlement`]            |
//! | `fund`       | [`Settlement`]            |
//! | `pfees`      | [`Settlement`]            |
//! | `bond`       | [`BondLaunched`]          |
//! | `offer_new`  | [`OfferCreated`]          |
//! | `offer_edt`  | [`OfferEdited`]           |
//! | `offer_del`  | [`OfferDeleted`]          |
//! | `offer_buy`  | [`OfferBought`]           |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Vec};

use crate::types::{DiamondConfig, FacetCode, FacetCut, InitCall};

// ── Diamond core ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiamondCutEvent {
    pub cuts: Vec<FacetCut>,
    /// Facet and selector of the init call, when one ran.
    pub init_facet: Option<BytesN<32>>,
    pub init_selector: Option<BytesN<4>>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FacetDeployed {
    pub facet: BytesN<32>,
    pub code: FacetCode,
    pub salt: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiamondInitialized {
    pub project_name: String,
    pub project_coin: Address,
    pub stable_coin: Address,
    pub bond_token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggled {
    pub account: Address,
}

pub fn emit_diamond_cut(env: &Env, cuts: Vec<FacetCut>, init: Option<&InitCall>) {
    let (init_facet, init_selector) = match init {
        Some(call) => (Some(call.facet.clone()), Some(call.selector.clone())),
        None => (None, None),
    };
    env.events().publish(
        (symbol_short!("cut"),),
        DiamondCutEvent {
            cuts,
            init_facet,
            init_selector,
        },
    );
}

pub fn emit_facet_deployed(env: &Env, facet: BytesN<32>, code: FacetCode, salt: u32) {
    env.events().publish(
        (symbol_short!("deployed"), facet.clone()),
        FacetDeployed { facet, code, salt },
    );
}

pub fn emit_diamond_initialized(env: &Env, config: DiamondConfig) {
    env.events().publish(
        (symbol_short!("init"),),
        DiamondInitialized {
            project_name: config.project_name,
            project_coin: config.project_coin,
            stable_coin: config.stable_coin,
            bond_token: config.bond_token,
        },
    );
}

pub fn emit_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("own_xfer"),),
        OwnershipTransferred {
            previous_owner,
            new_owner,
        },
    );
}

pub fn emit_paused(env: &Env, account: Address) {
    env.events()
        .publish((symbol_short!("paused"),), PauseToggled { account });
}

pub fn emit_unpaused(env: &Env, account: Address) {
    env.events()
        .publish((symbol_short!("unpaused"),), PauseToggled { account });
}

// ── Crowdfunding ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoinAccepted {
    pub coin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingDurationSet {
    pub start: u64,
    pub end: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinThresholdSet {
    pub value: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectOwnerSet {
    pub project_owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SupplyAllocated {
    pub amount: i128,
    pub allocated: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invested {
    pub investor: Address,
    pub coin: Address,
    pub amount: i128,
    pub minted: i128,
}

/// Refund paid by `withdraw_fund` or `reclaim_fund`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundReturned {
    pub investor: Address,
    pub coin: Address,
    pub refund: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoinClaimed {
    pub investor: Address,
    pub amount: i128,
}

/// Owner-side payout: unsold supply, fees or raised funds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondLaunched {
    pub owner: Address,
    pub bond_token: Address,
    pub total_supply: i128,
    pub fee_bps: u32,
}

pub fn emit_coin_accepted(env: &Env, coin: Address) {
    env.events()
        .publish((symbol_short!("coin_add"),), CoinAccepted { coin });
}

pub fn emit_funding_duration_set(env: &Env, start: u64, end: u64) {
    env.events()
        .publish((symbol_short!("duration"),), FundingDurationSet { start, end });
}

pub fn emit_min_threshold_set(env: &Env, value: i128) {
    env.events()
        .publish((symbol_short!("min_thr"),), MinThresholdSet { value });
}

pub fn emit_project_owner_set(env: &Env, project_owner: Address) {
    env.events()
        .publish((symbol_short!("po_addr"),), ProjectOwnerSet { project_owner });
}

pub fn emit_supply_allocated(env: &Env, amount: i128, allocated: i128) {
    env.events().publish(
        (symbol_short!("allocate"),),
        SupplyAllocated { amount, allocated },
    );
}

pub fn emit_invested(env: &Env, investor: Address, coin: Address, amount: i128, minted: i128) {
    env.events().publish(
        (symbol_short!("invest"), investor.clone()),
        Invested {
            investor,
            coin,
            amount,
            minted,
        },
    );
}

pub fn emit_fund_withdrawn(env: &Env, investor: Address, coin: Address, refund: i128) {
    env.events().publish(
        (symbol_short!("withdraw"), investor.clone()),
        FundReturned {
            investor,
            coin,
            refund,
        },
    );
}

pub fn emit_fund_reclaimed(env: &Env, investor: Address, coin: Address, refund: i128) {
    env.events().publish(
        (symbol_short!("reclaim"), investor.clone()),
        FundReturned {
            investor,
            coin,
            refund,
        },
    );
}

pub fn emit_coin_claimed(env: &Env, investor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claim_cn"), investor.clone()),
        CoinClaimed { investor, amount },
    );
}

pub fn emit_coin_withdrawn(env: &Env, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("wd_coin"),), Settlement { to, amount });
}

pub fn emit_fees_claimed(env: &Env, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("fees"),), Settlement { to, amount });
}

pub fn emit_fund_claimed(env: &Env, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("fund"),), Settlement { to, amount });
}

pub fn emit_platform_fees_claimed(env: &Env, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("pfees"),), Settlement { to, amount });
}

pub fn emit_bond_launched(env: &Env, owner: Address, bond_token: Address, total_supply: i128, fee_bps: u32) {
    env.events().publish(
        (symbol_short!("bond"),),
        BondLaunched {
            owner,
            bond_token,
            total_supply,
            fee_bps,
        },
    );
}

// ── Bond marketplace ─────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferCreated {
    pub id: u64,
    pub provider: Address,
    pub amount: i128,
    pub coin: Address,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferEdited {
    pub id: u64,
    pub amount: i128,
    pub coin: Address,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferDeleted {
    pub id: u64,
    pub refunded: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OfferBought {
    pub id: u64,
    pub buyer: Address,
    pub amount: i128,
    pub coin: Address,
    pub total_price: i128,
    pub fee: i128,
}

pub fn emit_offer_created(env: &Env, id: u64, provider: Address, amount: i128, coin: Address, price: i128) {
    env.events().publish(
        (symbol_short!("offer_new"), id),
        OfferCreated {
            id,
            provider,
            amount,
            coin,
            price,
        },
    );
}

pub fn emit_offer_edited(env: &Env, id: u64, amount: i128, coin: Address, price: i128) {
    env.events().publish(
        (symbol_short!("offer_edt"), id),
        OfferEdited {
            id,
            amount,
            coin,
            price,
        },
    );
}

pub fn emit_offer_deleted(env: &Env, id: u64, refunded: i128) {
    env.events()
        .publish((symbol_short!("offer_del"), id), OfferDeleted { id, refunded });
}

pub fn emit_offer_bought(
    env: &Env,
    id: u64,
    buyer: Address,
    amount: i128,
    coin: Address,
    total_price: i128,
    fee: i128,
) {
    env.events().publish(
        (symbol_short!("offer_buy"), id),
        OfferBought {
            id,
            buyer,
            amount,
            coin,
            total_price,
            fee,
        },
    );
}
