extern crate std;

use crate::curve::{self, buy_price, sell_price, tokens_for, KNOTS, PRICE_SCALE};
use crate::invariants::{assert_price_monotonic, assert_sell_below_buy};
use crate::selectors as sel;
use crate::test::Harness;
use crate::Error;

#[test]
fn test_buy_price_vectors() {
    assert_eq!(buy_price(10_402), Ok(10));
    assert_eq!(buy_price(24_593), Ok(80));
    assert_eq!(buy_price(46_890), Ok(365));
    assert_eq!(buy_price(89_402), Ok(1_645));
    assert_eq!(buy_price(137_465), Ok(4_491));
    assert_eq!(buy_price(211_366), Ok(12_323));
}

#[test]
fn test_sell_price_vectors() {
    assert_eq!(sell_price(10_402), Ok(9));
    assert_eq!(sell_price(24_593), Ok(72));
    assert_eq!(sell_price(46_890), Ok(328));
    assert_eq!(sell_price(89_402), Ok(1_480));
    assert_eq!(sell_price(211_366), Ok(11_090));
}

#[test]
fn test_zero_supply_is_free() {
    assert_eq!(buy_price(0), Ok(0));
    assert_eq!(sell_price(0), Ok(0));
}

#[test]
fn test_negative_supply_rejected() {
    assert_eq!(buy_price(-1), Err(Error::InvalidArgument));
    assert_eq!(sell_price(-1), Err(Error::InvalidArgument));
}

#[test]
fn test_price_is_monotonic_across_knots() {
    let mut supplies = std::vec::Vec::new();
    for (supply, _) in KNOTS.iter() {
        supplies.push(*supply);
        supplies.push(*supply + 1);
    }
    supplies.push(500_000);
    supplies.push(1_000_000);
    assert_price_monotonic(&supplies);
    for supply in supplies {
        assert_sell_below_buy(supply);
    }
}

#[test]
fn test_last_segment_slope_continues() {
    let (s0, p0) = KNOTS[KNOTS.len() - 2];
    let (s1, p1) = KNOTS[KNOTS.len() - 1];
    let step = s1 - s0;
    let extended = curve::buy_price_scaled(s1 + step).unwrap();
    assert_eq!(extended, p1 + (p1 - p0));
}

#[test]
fn test_huge_supply_overflows() {
    assert_eq!(curve::buy_price_scaled(i128::MAX / 2), Err(Error::Overflow));
}

#[test]
fn test_tokens_for_vectors() {
    assert_eq!(tokens_for(0, 10_402), Ok(1_022));
    assert_eq!(tokens_for(10_402, 10_402), Ok(196));
    assert_eq!(tokens_for(20_804, 10_402), Ok(75));
}

#[test]
fn test_tokens_for_rejects_small_and_zero() {
    assert_eq!(tokens_for(0, 0), Err(Error::ZeroAmount));
    assert_eq!(tokens_for(0, -5), Err(Error::InvalidArgument));
    assert_eq!(tokens_for(0, 1_000), Err(Error::TooSmallInvestment));
    // A single unit at a high price truncates to nothing.
    assert_eq!(tokens_for(100_000, 1), Err(Error::TooSmallInvestment));
}

#[test]
fn test_tokens_for_prices_at_post_purchase_supply() {
    let minted = tokens_for(0, 10_402).unwrap();
    let price = curve::buy_price_scaled(10_402).unwrap();
    assert_eq!(minted, 10_402 * PRICE_SCALE / price);
}

#[test]
fn test_price_queries_route_through_diamond() {
    let h = Harness::new();
    let buy: i128 = h.view(sel::GET_BUY_PRICE, args!(&h.env, 24_593i128));
    let sell: i128 = h.view(sel::GET_SELL_PRICE, args!(&h.env, 24_593i128));
    assert_eq!(buy, 80);
    assert_eq!(sell, 72);
}

#[test]
fn test_price_query_rejects_wrong_argument_type() {
    let h = Harness::new();
    let result = h
        .client
        .try_view(&sel::GET_BUY_PRICE.selector(&h.env), &args!(&h.env, 24_593u32));
    assert_eq!(result.unwrap_err(), Ok(Error::InvalidArgument));
}
