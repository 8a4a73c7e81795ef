//! # Bondfunding facet
//!
//! Offer book over the bond token issued by `launch_bond_inv`.
//!
//! Providers escrow bond tokens in the diamond when they list an offer;
//! buyers pay the provider in the offer's coin and receive bond tokens from
//! escrow. Offer ids come from a counter that never goes back, so a deleted
//! offer's id is never handed out again.
//!
//! ```text
//! Open ──buy (remaining = 0)──► Filled
//!   └───────delete────────────► Cancelled
//! ```

use soroban_sdk::{token, Address, Env, Val, Vec};

use crate::crowdfunding::{bps_of, is_ongoing};
use crate::router::{arg, expect_args, ret, CallContext};
use crate::types::{BondLaunch, Offer, OfferStatus};
use crate::{access, events, storage, Error};

fn require_launched(env: &Env) -> Result<BondLaunch, Error> {
    storage::get_bond_launch(env).ok_or(Error::BondNotLaunched)
}

fn require_trading(env: &Env) -> Result<BondLaunch, Error> {
    let launch = require_launched(env)?;
    access::require_not_paused(env)?;
    if !is_ongoing(env) {
        return Err(Error::NotOngoing);
    }
    Ok(launch)
}

fn require_terms(amount: i128, price: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::ZeroAmount);
    }
    if price <= 0 {
        return Err(Error::ZeroPrice);
    }
    Ok(())
}

/// Load an open offer owned by `provider`.
fn load_own_offer(env: &Env, id: u64, provider: &Address) -> Result<Offer, Error> {
    let offer = storage::load_offer(env, id)?;
    if offer.provider != *provider {
        return Err(Error::NotOfferOwner);
    }
    if offer.status != OfferStatus::Open {
        return Err(Error::OfferClosed);
    }
    Ok(offer)
}

fn bond_client<'a>(env: &'a Env) -> Result<token::Client<'a>, Error> {
    let config = storage::get_config(env)?;
    Ok(token::Client::new(env, &config.bond_token))
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

/// `bond_token()`
pub fn bond_token(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    require_launched(env)?;
    ret(env, storage::get_config(env)?.bond_token)
}

/// `bond_fee_bps()`
pub fn bond_fee_bps(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, require_launched(env)?.fee_bps)
}

/// `offer(u64)`
pub fn offer(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let id: u64 = arg(env, args, 0)?;
    ret(env, storage::load_offer(env, id)?)
}

/// `next_offer_id()`
pub fn next_offer_id(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::next_offer_id(env))
}

// ─────────────────────────────────────────────────────────
// Provider operations
// ─────────────────────────────────────────────────────────

/// `create_offer(i128,Address,i128)`: (amount, coin, price). Returns the id.
pub fn create_offer(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 3)?;
    let amount: i128 = arg(env, args, 0)?;
    let coin: Address = arg(env, args, 1)?;
    let price: i128 = arg(env, args, 2)?;
    let provider = ctx.caller()?.clone();

    require_trading(env)?;
    require_terms(amount, price)?;

    let id = storage::get_and_increment_offer_id(env)?;
    storage::save_offer(
        env,
        &Offer {
            id,
            provider: provider.clone(),
            amount,
            coin: coin.clone(),
            price,
            status: OfferStatus::Open,
        },
    );

    bond_client(env)?.transfer(&provider, &env.current_contract_address(), &amount);
    events::emit_offer_created(env, id, provider, amount, coin, price);
    ret(env, id)
}

/// `edit_offer(u64,i128,Address,i128)`: (id, amount, coin, price)
///
/// Escrows or refunds the difference between the old and new amount.
pub fn edit_offer(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 4)?;
    let id: u64 = arg(env, args, 0)?;
    let amount: i128 = arg(env, args, 1)?;
    let coin: Address = arg(env, args, 2)?;
    let price: i128 = arg(env, args, 3)?;
    let provider = ctx.caller()?.clone();

    let mut offer = load_own_offer(env, id, &provider)?;
    require_trading(env)?;
    require_terms(amount, price)?;

    let delta = amount.checked_sub(offer.amount).ok_or(Error::Overflow)?;
    offer.amount = amount;
    offer.coin = coin.clone();
    offer.price = price;
    storage::save_offer(env, &offer);

    let diamond = env.current_contract_address();
    if delta > 0 {
        bond_client(env)?.transfer(&provider, &diamond, &delta);
    } else if delta < 0 {
        bond_client(env)?.transfer(&diamond, &provider, &-delta);
    }
    events::emit_offer_edited(env, id, amount, coin, price);
    ret(env, ())
}

/// `delete_offer(u64)`: refunds the remaining escrow.
pub fn delete_offer(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let id: u64 = arg(env, args, 0)?;
    let provider = ctx.caller()?.clone();

    let mut offer = load_own_offer(env, id, &provider)?;
    let refunded = offer.amount;
    offer.amount = 0;
    offer.status = OfferStatus::Cancelled;
    storage::save_offer(env, &offer);

    if refunded > 0 {
        bond_client(env)?.transfer(&env.current_contract_address(), &provider, &refunded);
    }
    events::emit_offer_deleted(env, id, refunded);
    ret(env, refunded)
}

// ─────────────────────────────────────────────────────────
// Buyer operations
// ─────────────────────────────────────────────────────────

/// `buy_offer(u64,i128,Address,i128)`: (id, amount, coin, total_price)
///
/// The buyer pays the whole `total_price`; the offer's `price` is only an
/// asking price. The marketplace fee goes to the project owner address, or
/// to the contract owner while none is set; the rest goes to the provider.
pub fn buy_offer(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 4)?;
    let id: u64 = arg(env, args, 0)?;
    let amount: i128 = arg(env, args, 1)?;
    let coin: Address = arg(env, args, 2)?;
    let total_price: i128 = arg(env, args, 3)?;
    let buyer = ctx.caller()?.clone();

    let launch = require_trading(env)?;
    let mut offer = storage::load_offer(env, id)?;
    if offer.status != OfferStatus::Open {
        return Err(Error::OfferClosed);
    }
    if offer.coin != coin {
        return Err(Error::CoinMismatch);
    }
    if amount <= 0 {
        return Err(Error::ZeroAmount);
    }
    if amount > offer.amount {
        return Err(Error::InsufficientOffer);
    }
    if total_price <= 0 {
        return Err(Error::InsufficientPayment);
    }

    let fee = bps_of(total_price, launch.fee_bps)?;
    let fee_to = match storage::get_project_owner_addr(env) {
        Some(addr) => addr,
        None => access::current_owner(env)?,
    };

    offer.amount -= amount;
    if offer.amount == 0 {
        offer.status = OfferStatus::Filled;
    }
    storage::save_offer(env, &offer);

    let payment = token::Client::new(env, &coin);
    if fee > 0 {
        payment.transfer(&buyer, &fee_to, &fee);
    }
    payment.transfer(&buyer, &offer.provider, &(total_price - fee));
    bond_client(env)?.transfer(&env.current_contract_address(), &buyer, &amount);

    events::emit_offer_bought(env, id, buyer, amount, coin, total_price, fee);
    ret(env, ())
}
