//! # Bonding curve
//!
//! Unit price of the project coin as a function of the supply counter (the
//! cumulative contributions of active investments).
//!
//! Prices are kept in fixed point with [`PRICE_SCALE`] and follow a
//! piecewise-linear schedule through [`KNOTS`]. Between knots the price is
//! interpolated with truncating division; past the last knot the final
//! segment's slope continues. The sell price applies a [`SELL_SPREAD_BPS`]
//! discount to the buy price.
//!
//! ```text
//! buy_price(10_402)  = 10     sell_price(10_402)  = 9
//! buy_price(24_593)  = 80     sell_price(24_593)  = 72
//! buy_price(46_890)  = 365    sell_price(46_890)  = 328
//! buy_price(89_402)  = 1_645  sell_price(89_402)  = 1_480
//! ```

use crate::{Error, BPS_DENOMINATOR};

/// Fixed-point scale of curve prices.
pub const PRICE_SCALE: i128 = 1_000_000;

/// Buy/sell spread, in basis points of the buy price.
pub const SELL_SPREAD_BPS: i128 = 1_000;

/// `(supply, scaled buy price)`, strictly increasing in both coordinates.
pub const KNOTS: [(i128, i128); 9] = [
    (0, 0),
    (10_402, 10_173_000),
    (20_804, 53_035_000),
    (24_593, 80_500_000),
    (31_206, 137_500_000),
    (46_890, 365_500_000),
    (89_402, 1_645_300_000),
    (137_465, 4_491_050_000),
    (211_366, 12_323_200_000),
];

fn interpolate(supply: i128, (s0, p0): (i128, i128), (s1, p1): (i128, i128)) -> Result<i128, Error> {
    let rise = (p1 - p0)
        .checked_mul(supply - s0)
        .ok_or(Error::Overflow)?;
    p0.checked_add(rise / (s1 - s0)).ok_or(Error::Overflow)
}

/// Scaled buy price at `supply`.
pub fn buy_price_scaled(supply: i128) -> Result<i128, Error> {
    if supply < 0 {
        return Err(Error::InvalidArgument);
    }
    for pair in KNOTS.windows(2) {
        if supply <= pair[1].0 {
            return interpolate(supply, pair[0], pair[1]);
        }
    }
    let last = KNOTS.len() - 1;
    interpolate(supply, KNOTS[last - 1], KNOTS[last])
}

/// Scaled sell price at `supply`.
pub fn sell_price_scaled(supply: i128) -> Result<i128, Error> {
    let buy = buy_price_scaled(supply)?;
    let kept = BPS_DENOMINATOR as i128 - SELL_SPREAD_BPS;
    Ok(buy.checked_mul(kept).ok_or(Error::Overflow)? / BPS_DENOMINATOR as i128)
}

/// Buy price in whole coin units, truncated.
pub fn buy_price(supply: i128) -> Result<i128, Error> {
    Ok(buy_price_scaled(supply)? / PRICE_SCALE)
}

/// Sell price in whole coin units, truncated.
pub fn sell_price(supply: i128) -> Result<i128, Error> {
    Ok(sell_price_scaled(supply)? / PRICE_SCALE)
}

/// Curve units credited for contributing `amount` at `supply`.
///
/// The purchase is priced at the post-purchase supply. Fails with
/// `TooSmallInvestment` when the price is below one coin unit or the
/// credited amount truncates to zero.
pub fn tokens_for(supply: i128, amount: i128) -> Result<i128, Error> {
    if amount == 0 {
        return Err(Error::ZeroAmount);
    }
    if amount < 0 {
        return Err(Error::InvalidArgument);
    }
    let new_supply = supply.checked_add(amount).ok_or(Error::Overflow)?;
    let price = buy_price_scaled(new_supply)?;
    if price < PRICE_SCALE {
        return Err(Error::TooSmallInvestment);
    }
    let minted = amount.checked_mul(PRICE_SCALE).ok_or(Error::Overflow)? / price;
    if minted == 0 {
        return Err(Error::TooSmallInvestment);
    }
    Ok(minted)
}
