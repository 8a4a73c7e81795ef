//! # Crowdfunding facet
//!
//! Funding window, bonding-curve investments and settlement.
//!
//! | Step          | Who      | Entry point(s)                                         |
//! |---------------|----------|--------------------------------------------------------|
//! | Configure     | owner    | `set_funding_duration`, `set_min_funding_threshold`, `add_accepted_coin`, `set_project_owner_addr`, `allocate_supply` |
//! | Fund          | investor | `invest`, `withdraw_fund`                              |
//! | Below target  | investor | `reclaim_fund`                                         |
//! |               | owner    | `withdraw_coin`, `claim_platform_fees`                 |
//! | Above target  | investor | `claim_coin`                                           |
//! |               | owner    | `claim_fees`, `claim_fund`, `claim_platform_fees`, `launch_bond_inv` |
//!
//! The supply counter is the sum of the contributions of active investment
//! records; the minimum threshold is compared against it. Every investment
//! books the owner and platform fees up front, so a withdraw or reclaim
//! returns the contribution net of those fees and the fees stay in the
//! coin's [`CoinPool`].

use soroban_sdk::{token, Address, Env, Val, Vec};

use crate::router::{arg, expect_args, ret, CallContext};
use crate::types::{BondLaunch, CoinPool, FundingWindow, Investment, Phase};
use crate::{access, curve, events, storage, Error, BPS_DENOMINATOR};

/// Bond tokens minted to the owner at launch.
pub const BOND_TOTAL_SUPPLY: i128 = 100_000_000_000_000_000_000_000;

// ── Lifecycle ────────────────────────────────────────────────────────

fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

pub fn has_started(env: &Env) -> bool {
    storage::get_window(env)
        .map(|w| now(env) >= w.start)
        .unwrap_or(false)
}

pub fn is_ongoing(env: &Env) -> bool {
    let t = now(env);
    storage::get_allocated(env) > 0
        && storage::get_window(env)
            .map(|w| w.start <= t && t < w.end)
            .unwrap_or(false)
}

pub fn is_ended(env: &Env) -> bool {
    storage::get_window(env)
        .map(|w| now(env) >= w.end)
        .unwrap_or(false)
}

/// Latched once the bond has launched.
pub fn threshold_reached(env: &Env) -> bool {
    if storage::get_bond_launch(env).is_some() {
        return true;
    }
    let threshold = storage::get_min_threshold(env);
    threshold > 0 && storage::get_supply(env) >= threshold
}

pub fn current_phase(env: &Env) -> Phase {
    if storage::get_bond_launch(env).is_some() {
        return Phase::BondLaunched;
    }
    match storage::get_window(env) {
        None => Phase::Unconfigured,
        Some(_) if is_ended(env) => {
            if threshold_reached(env) {
                Phase::EndedAboveThreshold
            } else {
                Phase::EndedBelowThreshold
            }
        }
        Some(_) if is_ongoing(env) => Phase::Ongoing,
        Some(_) => Phase::Pending,
    }
}

// ── Arithmetic ───────────────────────────────────────────────────────

fn require_positive(amount: i128) -> Result<(), Error> {
    match amount {
        0 => Err(Error::ZeroAmount),
        a if a < 0 => Err(Error::InvalidArgument),
        _ => Ok(()),
    }
}

/// `amount × bps / 10_000`, truncated.
pub fn bps_of(amount: i128, bps: u32) -> Result<i128, Error> {
    Ok(amount.checked_mul(bps as i128).ok_or(Error::Overflow)? / BPS_DENOMINATOR as i128)
}

fn add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

fn sub(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_sub(b).ok_or(Error::Overflow)
}

fn pay(env: &Env, coin: &Address, to: &Address, amount: i128) {
    token::Client::new(env, coin).transfer(&env.current_contract_address(), to, &amount);
}

// ─────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────

/// `project_name()`
pub fn project_name(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_config(env)?.project_name)
}

/// `project_coin()`
pub fn project_coin(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_config(env)?.project_coin)
}

/// `accepted_coins()`
pub fn accepted_coins(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::accepted_coins(env))
}

/// `funding_window()`
pub fn funding_window(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_window(env))
}

/// `min_funding_threshold()`
pub fn min_funding_threshold(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_min_threshold(env))
}

/// `project_owner_addr()`
pub fn project_owner_addr(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_project_owner_addr(env))
}

/// `allocated_supply()`
pub fn allocated_supply(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_allocated(env))
}

/// `get_buy_price(i128)`
pub fn get_buy_price(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let supply: i128 = arg(env, args, 0)?;
    ret(env, curve::buy_price(supply)?)
}

/// `get_sell_price(i128)`
pub fn get_sell_price(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let supply: i128 = arg(env, args, 0)?;
    ret(env, curve::sell_price(supply)?)
}

/// `current_supply()`
pub fn current_supply(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_supply(env))
}

/// `total_minted()`
pub fn total_minted(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::get_total_minted(env))
}

/// `phase()`
pub fn phase(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, current_phase(env))
}

/// `investment_of(Address,Address)`: (investor, coin)
pub fn investment_of(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 2)?;
    let investor: Address = arg(env, args, 0)?;
    let coin: Address = arg(env, args, 1)?;
    ret(env, storage::load_investment(env, &investor, &coin))
}

/// `coin_pool(Address)`
pub fn coin_pool(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let coin: Address = arg(env, args, 0)?;
    ret(env, storage::get_pool(env, &coin))
}

// ─────────────────────────────────────────────────────────
// Owner configuration
// ─────────────────────────────────────────────────────────

/// `set_funding_duration(u64,u64)`
///
/// Allowed until the current window (if any) has started.
pub fn set_funding_duration(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 2)?;
    let start: u64 = arg(env, args, 0)?;
    let end: u64 = arg(env, args, 1)?;
    access::require_owner(env, ctx)?;

    if has_started(env) {
        return Err(Error::AlreadyStarted);
    }
    if start >= end {
        return Err(Error::InvalidDuration);
    }
    storage::set_window(env, &FundingWindow { start, end });
    events::emit_funding_duration_set(env, start, end);
    ret(env, ())
}

/// `set_min_funding_threshold(i128)`
pub fn set_min_funding_threshold(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let value: i128 = arg(env, args, 0)?;
    access::require_owner(env, ctx)?;

    if value <= 0 {
        return Err(Error::ZeroThreshold);
    }
    if has_started(env) {
        return Err(Error::AlreadyStarted);
    }
    storage::set_min_threshold(env, value);
    events::emit_min_threshold_set(env, value);
    ret(env, ())
}

/// `add_accepted_coin(Address)`
pub fn add_accepted_coin(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let coin: Address = arg(env, args, 0)?;
    access::require_owner(env, ctx)?;
    storage::get_config(env)?;

    if has_started(env) {
        return Err(Error::AlreadyStarted);
    }
    let mut coins = storage::accepted_coins(env);
    if coins.contains(&coin) {
        return Err(Error::InvalidArgument);
    }
    coins.push_back(coin.clone());
    storage::set_accepted_coins(env, &coins);
    events::emit_coin_accepted(env, coin);
    ret(env, ())
}

/// `set_project_owner_addr(Address)`
pub fn set_project_owner_addr(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let project_owner: Address = arg(env, args, 0)?;
    access::require_owner(env, ctx)?;

    storage::set_project_owner_addr(env, &project_owner);
    events::emit_project_owner_set(env, project_owner);
    ret(env, ())
}

/// `allocate_supply(i128)`
///
/// Pulls `amount` of the project coin from the owner into the diamond.
pub fn allocate_supply(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let amount: i128 = arg(env, args, 0)?;
    let owner = access::require_owner(env, ctx)?;
    let config = storage::get_config(env)?;

    require_positive(amount)?;
    if is_ended(env) {
        return Err(Error::NotOngoing);
    }
    let allocated = add(storage::get_allocated(env), amount)?;
    storage::set_allocated(env, allocated);

    token::Client::new(env, &config.project_coin).transfer(
        &owner,
        &env.current_contract_address(),
        &amount,
    );
    events::emit_supply_allocated(env, amount, allocated);
    ret(env, ())
}

// ─────────────────────────────────────────────────────────
// Investor operations
// ─────────────────────────────────────────────────────────

/// `invest(Address,i128)`: returns the curve units credited.
pub fn invest(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 2)?;
    let coin: Address = arg(env, args, 0)?;
    let amount: i128 = arg(env, args, 1)?;
    let investor = ctx.caller()?.clone();

    access::require_not_paused(env)?;
    let config = storage::get_config(env)?;
    if !storage::accepted_coins(env).contains(&coin) {
        return Err(Error::CoinNotAccepted);
    }
    if !is_ongoing(env) {
        return Err(Error::NotOngoing);
    }
    require_positive(amount)?;

    let supply = storage::get_supply(env);
    let minted = curve::tokens_for(supply, amount)?;
    let total_minted = add(storage::get_total_minted(env), minted)?;
    if total_minted > storage::get_allocated(env) {
        return Err(Error::SupplyExhausted);
    }
    let owner_fee = bps_of(amount, config.owner_fee_bps)?;
    let platform_fee = bps_of(amount, config.platform_fee_bps)?;

    let mut record = storage::load_investment(env, &investor, &coin);
    record.amount = add(record.amount, amount)?;
    record.minted = add(record.minted, minted)?;
    record.owner_fee = add(record.owner_fee, owner_fee)?;
    record.platform_fee = add(record.platform_fee, platform_fee)?;
    storage::save_investment(env, &investor, &coin, &record);

    let mut pool = storage::get_pool(env, &coin);
    pool.raised = add(pool.raised, amount)?;
    pool.net = add(pool.net, amount - owner_fee - platform_fee)?;
    pool.owner_fees = add(pool.owner_fees, owner_fee)?;
    pool.platform_fees = add(pool.platform_fees, platform_fee)?;
    storage::set_pool(env, &coin, &pool);

    storage::set_supply(env, add(supply, amount)?);
    storage::set_total_minted(env, total_minted);

    token::Client::new(env, &coin).transfer(&investor, &env.current_contract_address(), &amount);
    events::emit_invested(env, investor, coin, amount, minted);
    ret(env, minted)
}

/// Consume the investor's record for `coin` and return its net amount.
fn settle_refund(env: &Env, investor: &Address, coin: &Address) -> Result<i128, Error> {
    let record = storage::load_investment(env, investor, coin);
    if record.amount == 0 {
        return Err(Error::NoFund);
    }
    let refund = record.net();

    let mut pool: CoinPool = storage::get_pool(env, coin);
    pool.raised = sub(pool.raised, record.amount)?;
    pool.net = sub(pool.net, refund)?;
    storage::set_pool(env, coin, &pool);

    storage::set_supply(env, sub(storage::get_supply(env), record.amount)?);
    storage::set_total_minted(env, sub(storage::get_total_minted(env), record.minted)?);
    storage::remove_investment(env, investor, coin);

    pay(env, coin, investor, refund);
    Ok(refund)
}

/// `withdraw_fund(Address)`: leave while funding is ongoing and no bond
/// has launched.
pub fn withdraw_fund(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let coin: Address = arg(env, args, 0)?;
    let investor = ctx.caller()?.clone();

    if !is_ongoing(env) {
        return Err(Error::NotOngoing);
    }
    if storage::get_bond_launch(env).is_some() {
        return Err(Error::BondAlreadyLaunched);
    }
    let refund = settle_refund(env, &investor, &coin)?;
    events::emit_fund_withdrawn(env, investor, coin, refund);
    ret(env, refund)
}

/// `reclaim_fund(Address)`: recover funds after a failed raise.
pub fn reclaim_fund(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let coin: Address = arg(env, args, 0)?;
    let investor = ctx.caller()?.clone();

    if !is_ended(env) {
        return Err(Error::NotEnded);
    }
    if threshold_reached(env) {
        return Err(Error::ReachedMinThreshold);
    }
    let refund = settle_refund(env, &investor, &coin)?;
    events::emit_fund_reclaimed(env, investor, coin, refund);
    ret(env, refund)
}

/// `claim_coin()`
///
/// Pays `minted × allocated / total_minted` of the project coin, summed over
/// every coin the caller invested in. The total minted stays fixed so later
/// claimers get the same ratio.
pub fn claim_coin(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    let investor = ctx.caller()?.clone();
    let config = storage::get_config(env)?;

    if !threshold_reached(env) {
        return Err(Error::NotReachedMinThreshold);
    }
    if !is_ended(env) {
        return Err(Error::NotEnded);
    }

    let mut minted: i128 = 0;
    for coin in storage::accepted_coins(env).iter() {
        let record: Investment = storage::load_investment(env, &investor, &coin);
        if record.amount > 0 {
            minted = add(minted, record.minted)?;
            storage::remove_investment(env, &investor, &coin);
        }
    }
    if minted == 0 {
        return Err(Error::NoFund);
    }

    let share = minted
        .checked_mul(storage::get_allocated(env))
        .ok_or(Error::Overflow)?
        / storage::get_total_minted(env);

    pay(env, &config.project_coin, &investor, share);
    events::emit_coin_claimed(env, investor, share);
    ret(env, share)
}

// ─────────────────────────────────────────────────────────
// Owner settlement
// ─────────────────────────────────────────────────────────

/// `withdraw_coin()`: return the allocation after a failed raise.
pub fn withdraw_coin(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    let owner = access::require_owner(env, ctx)?;
    let config = storage::get_config(env)?;

    if !is_ended(env) {
        return Err(Error::NotEnded);
    }
    if threshold_reached(env) {
        return Err(Error::ReachedMinThreshold);
    }
    let allocated = storage::get_allocated(env);
    if allocated == 0 {
        return Err(Error::NoFund);
    }
    storage::set_allocated(env, 0);

    pay(env, &config.project_coin, &owner, allocated);
    events::emit_coin_withdrawn(env, owner, allocated);
    ret(env, allocated)
}

/// Guards shared by the owner's payouts after a successful raise.
fn require_successful_end(env: &Env) -> Result<Address, Error> {
    if !threshold_reached(env) {
        return Err(Error::NotReachedMinThreshold);
    }
    if !is_ended(env) {
        return Err(Error::NotEnded);
    }
    storage::get_project_owner_addr(env).ok_or(Error::ZeroAddress)
}

/// Payout bucket of a [`CoinPool`].
#[derive(Clone, Copy)]
enum PoolField {
    Net,
    OwnerFees,
    PlatformFees,
}

impl PoolField {
    fn take(self, pool: &mut CoinPool) -> i128 {
        let slot = match self {
            PoolField::Net => &mut pool.net,
            PoolField::OwnerFees => &mut pool.owner_fees,
            PoolField::PlatformFees => &mut pool.platform_fees,
        };
        core::mem::take(slot)
    }
}

/// Drain one bucket of every coin pool to `to`. Returns the total paid.
fn drain_pools(env: &Env, to: &Address, field: PoolField) -> Result<i128, Error> {
    let mut total: i128 = 0;
    for coin in storage::accepted_coins(env).iter() {
        let mut pool = storage::get_pool(env, &coin);
        let amount = field.take(&mut pool);
        if amount > 0 {
            storage::set_pool(env, &coin, &pool);
            pay(env, &coin, to, amount);
            total = add(total, amount)?;
        }
    }
    Ok(total)
}

/// `claim_fees()`: project owner fees to the project owner address.
pub fn claim_fees(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    access::require_owner(env, ctx)?;
    let to = require_successful_end(env)?;

    let total = drain_pools(env, &to, PoolField::OwnerFees)?;
    if total == 0 {
        return Err(Error::NoFund);
    }
    events::emit_fees_claimed(env, to, total);
    ret(env, total)
}

/// `claim_fund()`: raised funds net of fees to the project owner address.
pub fn claim_fund(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    access::require_owner(env, ctx)?;
    let to = require_successful_end(env)?;

    let total = drain_pools(env, &to, PoolField::Net)?;
    if total == 0 {
        return Err(Error::NoFund);
    }
    events::emit_fund_claimed(env, to, total);
    ret(env, total)
}

/// `claim_platform_fees()`
///
/// Platform fees go to the contract owner once the raise has ended. After a
/// failed raise the owner fees retained from refunds go with them.
pub fn claim_platform_fees(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    let owner = access::require_owner(env, ctx)?;

    if !is_ended(env) {
        return Err(Error::NotEnded);
    }
    let mut total = drain_pools(env, &owner, PoolField::PlatformFees)?;
    if !threshold_reached(env) {
        total = add(total, drain_pools(env, &owner, PoolField::OwnerFees)?)?;
    }
    if total == 0 {
        return Err(Error::NoFund);
    }
    events::emit_platform_fees_claimed(env, owner, total);
    ret(env, total)
}

/// `launch_bond_inv(u32)`
///
/// One-shot: mints [`BOND_TOTAL_SUPPLY`] bond tokens to the owner and opens
/// the offer book with a `fee_bps` marketplace fee. Requires the threshold
/// to be reached while funding is still ongoing.
pub fn launch_bond_inv(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let fee_bps: u32 = arg(env, args, 0)?;
    let owner = access::require_owner(env, ctx)?;
    let config = storage::get_config(env)?;

    if storage::get_bond_launch(env).is_some() {
        return Err(Error::BondAlreadyLaunched);
    }
    if fee_bps > BPS_DENOMINATOR {
        return Err(Error::InvalidFee);
    }
    if !threshold_reached(env) {
        return Err(Error::NotReachedMinThreshold);
    }
    if !is_ongoing(env) {
        return Err(Error::NotOngoing);
    }

    storage::set_bond_launch(
        env,
        &BondLaunch {
            fee_bps,
            total_supply: BOND_TOTAL_SUPPLY,
            launched_at: now(env),
        },
    );
    token::StellarAssetClient::new(env, &config.bond_token).mint(&owner, &BOND_TOTAL_SUPPLY);
    events::emit_bond_launched(env, owner, config.bond_token, BOND_TOTAL_SUPPLY, fee_bps);
    ret(env, ())
}
