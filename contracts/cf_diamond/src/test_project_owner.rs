extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::assert_pool_backed;
use crate::selectors as sel;
use crate::test::{create_token, Harness, END, FUNDING_COIN_SUPPLY, START};
use crate::{CoinPool, Error, ErrorKind, FundingWindow};

fn with_project_owner(h: &Harness) -> Address {
    let project_owner = Address::generate(&h.env);
    let _: () = h.call(&h.owner, sel::SET_PROJECT_OWNER_ADDR, args!(&h.env, project_owner.clone()));
    project_owner
}

// ─────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────

#[test]
fn test_set_funding_duration() {
    let h = Harness::new();
    let env = &h.env;
    let intruder = Address::generate(env);

    assert_eq!(
        h.call_err(&intruder, sel::SET_FUNDING_DURATION, args!(env, START, END)),
        Error::NotContractOwner
    );
    assert_eq!(
        h.call_err(&h.owner, sel::SET_FUNDING_DURATION, args!(env, END, START)),
        Error::InvalidDuration
    );
    assert_eq!(
        h.call_err(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START, START)),
        Error::InvalidDuration
    );

    let _: () = h.call(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START, END));
    // Still pending, so the window can be moved.
    let _: () = h.call(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START, END + 100));
    let window: Option<FundingWindow> = h.view(sel::FUNDING_WINDOW, args!(env));
    assert_eq!(window, Some(FundingWindow { start: START, end: END + 100 }));

    h.at(START);
    let err = h.call_err(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START + 10, END));
    assert_eq!(err, Error::AlreadyStarted);
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_set_min_funding_threshold() {
    let h = Harness::new();
    let env = &h.env;

    assert_eq!(
        h.call_err(&h.owner, sel::SET_MIN_FUNDING_THRESHOLD, args!(env, 0i128)),
        Error::ZeroThreshold
    );
    let _: () = h.call(&h.owner, sel::SET_MIN_FUNDING_THRESHOLD, args!(env, 15_000i128));
    let threshold: i128 = h.view(sel::MIN_FUNDING_THRESHOLD, args!(env));
    assert_eq!(threshold, 15_000);

    let _: () = h.call(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START, END));
    h.at(START);
    assert_eq!(
        h.call_err(&h.owner, sel::SET_MIN_FUNDING_THRESHOLD, args!(env, 20_000i128)),
        Error::AlreadyStarted
    );
}

#[test]
fn test_add_accepted_coin_rules() {
    let h = Harness::new();
    let env = &h.env;
    let other = create_token(env, &Address::generate(env));

    assert_eq!(
        h.call_err(&h.owner, sel::ADD_ACCEPTED_COIN, args!(env, h.stable.address.clone())),
        Error::InvalidArgument
    );
    let _: () = h.call(&h.owner, sel::ADD_ACCEPTED_COIN, args!(env, other.address.clone()));

    h.open_funding(20_000);
    let late = create_token(env, &Address::generate(env));
    assert_eq!(
        h.call_err(&h.owner, sel::ADD_ACCEPTED_COIN, args!(env, late.address.clone())),
        Error::AlreadyStarted
    );
}

#[test]
fn test_allocate_supply() {
    let h = Harness::new();
    let env = &h.env;

    assert_eq!(
        h.call_err(&h.owner, sel::ALLOCATE_SUPPLY, args!(env, 0i128)),
        Error::ZeroAmount
    );

    let _: () = h.call(&h.owner, sel::ALLOCATE_SUPPLY, args!(env, 5_000i128));
    let _: () = h.call(&h.owner, sel::ALLOCATE_SUPPLY, args!(env, 5_000i128));
    let allocated: i128 = h.view(sel::ALLOCATED_SUPPLY, args!(env));
    assert_eq!(allocated, 10_000);
    assert_eq!(h.project_coin.balance(&h.client.address), 10_000);
    assert_eq!(h.project_coin.balance(&h.owner), FUNDING_COIN_SUPPLY - 10_000);

    let _: () = h.call(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START, END));
    h.end_funding();
    assert_eq!(
        h.call_err(&h.owner, sel::ALLOCATE_SUPPLY, args!(env, 5_000i128)),
        Error::NotOngoing
    );
}

#[test]
fn test_project_owner_addr() {
    let h = Harness::new();
    let unset: Option<Address> = h.view(sel::PROJECT_OWNER_ADDR, args!(&h.env));
    assert_eq!(unset, None);

    let project_owner = with_project_owner(&h);
    let set: Option<Address> = h.view(sel::PROJECT_OWNER_ADDR, args!(&h.env));
    assert_eq!(set, Some(project_owner));

    let intruder = Address::generate(&h.env);
    assert_eq!(
        h.call_err(&intruder, sel::SET_PROJECT_OWNER_ADDR, args!(&h.env, intruder.clone())),
        Error::NotContractOwner
    );
}

// ─────────────────────────────────────────────────────────
// Successful raise
// ─────────────────────────────────────────────────────────

#[test]
fn test_claim_fees_and_fund() {
    let h = Harness::new();
    h.two_investors_reached();
    let project_owner = with_project_owner(&h);

    assert_eq!(h.call_err(&h.owner, sel::CLAIM_FEES, args!(&h.env)), Error::NotEnded);
    assert_eq!(h.call_err(&h.owner, sel::CLAIM_FUND, args!(&h.env)), Error::NotEnded);

    h.end_funding();
    let fees: i128 = h.call(&h.owner, sel::CLAIM_FEES, args!(&h.env));
    assert_eq!(fees, 144);
    let fund: i128 = h.call(&h.owner, sel::CLAIM_FUND, args!(&h.env));
    assert_eq!(fund, 20_452);
    assert_eq!(h.stable.balance(&project_owner), 144 + 20_452);

    assert_eq!(h.call_err(&h.owner, sel::CLAIM_FEES, args!(&h.env)), Error::NoFund);
    assert_eq!(h.call_err(&h.owner, sel::CLAIM_FUND, args!(&h.env)), Error::NoFund);

    let coin = h.stable.address.clone();
    let pool: CoinPool = h.view(sel::COIN_POOL, args!(&h.env, coin.clone()));
    assert_eq!(pool.platform_fees, 208);
    assert_pool_backed(&h.env, &h.client.address, &coin, &pool);
}

#[test]
fn test_claims_need_project_owner_addr() {
    let h = Harness::new();
    h.two_investors_reached();
    h.end_funding();

    assert_eq!(h.call_err(&h.owner, sel::CLAIM_FEES, args!(&h.env)), Error::ZeroAddress);
    assert_eq!(h.call_err(&h.owner, sel::CLAIM_FUND, args!(&h.env)), Error::ZeroAddress);
}

#[test]
fn test_claims_are_owner_only() {
    let h = Harness::new();
    let (first, _) = h.two_investors_reached();
    with_project_owner(&h);
    h.end_funding();

    assert_eq!(h.call_err(&first, sel::CLAIM_FUND, args!(&h.env)), Error::NotContractOwner);
    assert_eq!(h.call_err(&first, sel::CLAIM_PLATFORM_FEES, args!(&h.env)), Error::NotContractOwner);
}

#[test]
fn test_claim_platform_fees_after_success() {
    let h = Harness::new();
    h.two_investors_reached();

    assert_eq!(h.call_err(&h.owner, sel::CLAIM_PLATFORM_FEES, args!(&h.env)), Error::NotEnded);

    h.end_funding();
    let fees: i128 = h.call(&h.owner, sel::CLAIM_PLATFORM_FEES, args!(&h.env));
    assert_eq!(fees, 208);
    assert_eq!(h.stable.balance(&h.owner), 208);
    assert_eq!(h.call_err(&h.owner, sel::CLAIM_PLATFORM_FEES, args!(&h.env)), Error::NoFund);
}

#[test]
fn test_withdraw_coin_rejected_after_success() {
    let h = Harness::new();
    h.two_investors_reached();
    h.end_funding();
    assert_eq!(
        h.call_err(&h.owner, sel::WITHDRAW_COIN, args!(&h.env)),
        Error::ReachedMinThreshold
    );
}

// ─────────────────────────────────────────────────────────
// Failed raise
// ─────────────────────────────────────────────────────────

#[test]
fn test_withdraw_coin_after_failure() {
    let h = Harness::new();
    h.open_funding(20_000);
    let investor = h.funded_account(10_402);
    h.invest(&investor, 10_402);

    assert_eq!(h.call_err(&h.owner, sel::WITHDRAW_COIN, args!(&h.env)), Error::NotEnded);

    h.end_funding();
    let returned: i128 = h.call(&h.owner, sel::WITHDRAW_COIN, args!(&h.env));
    assert_eq!(returned, 20_000);
    assert_eq!(h.project_coin.balance(&h.owner), FUNDING_COIN_SUPPLY);

    let allocated: i128 = h.view(sel::ALLOCATED_SUPPLY, args!(&h.env));
    assert_eq!(allocated, 0);
    assert_eq!(h.call_err(&h.owner, sel::WITHDRAW_COIN, args!(&h.env)), Error::NoFund);
}

#[test]
fn test_owner_claims_rejected_after_failure() {
    let h = Harness::new();
    h.open_funding(20_000);
    with_project_owner(&h);
    let investor = h.funded_account(10_402);
    h.invest(&investor, 10_402);
    h.end_funding();

    assert_eq!(
        h.call_err(&h.owner, sel::CLAIM_FUND, args!(&h.env)),
        Error::NotReachedMinThreshold
    );
    assert_eq!(
        h.call_err(&h.owner, sel::CLAIM_FEES, args!(&h.env)),
        Error::NotReachedMinThreshold
    );
}

#[test]
fn test_platform_takes_retained_fees_after_failure() {
    let h = Harness::new();
    h.open_funding(20_000);
    let investor = h.funded_account(10_402);
    h.invest(&investor, 10_402);
    h.end_funding();

    let coin = h.stable.address.clone();
    let _: i128 = h.call(&investor, sel::RECLAIM_FUND, args!(&h.env, coin.clone()));
    let fees: i128 = h.call(&h.owner, sel::CLAIM_PLATFORM_FEES, args!(&h.env));
    assert_eq!(fees, 72 + 104);

    let pool: CoinPool = h.view(sel::COIN_POOL, args!(&h.env, coin.clone()));
    assert_eq!(pool, CoinPool::default());
    assert_eq!(h.stable.balance(&h.client.address), 0);
}
