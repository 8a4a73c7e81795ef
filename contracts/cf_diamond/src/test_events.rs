extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, BytesN, Env, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    BondLaunched, CoinClaimed, DiamondCutEvent, DiamondInitialized, FacetDeployed, FundReturned,
    FundingDurationSet, Invested, MinThresholdSet, OfferBought, OfferCreated, OfferDeleted,
    OfferEdited, OwnershipTransferred, PauseToggled, ProjectOwnerSet, Settlement, SupplyAllocated,
};
use crate::selectors as sel;
use crate::test::{setup_bare, Harness, BOND_FEE_BPS, END, START};
use crate::{FacetCode, FacetCutAction, BOND_TOTAL_SUPPLY};

fn last_event(env: &Env) -> (Address, Vec<Val>, Val) {
    env.events().all().last().expect("No events found")
}

fn topics(env: &Env, name: Symbol) -> Vec<Val> {
    vec![env, name.into_val(env)]
}

fn keyed_topics<K: IntoVal<Env, Val>>(env: &Env, name: Symbol, key: K) -> Vec<Val> {
    vec![env, name.into_val(env), key.into_val(env)]
}

// ─────────────────────────────────────────────────────────
// Diamond core
// ─────────────────────────────────────────────────────────

#[test]
fn test_init_emits_cut_event() {
    let (env, client, _owner, cut) = setup_bare();
    let event = last_event(&env);

    assert_eq!(event.0, client.address);
    assert_eq!(event.1, topics(&env, symbol_short!("cut")));
    let data: DiamondCutEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(data.cuts.len(), 1);
    let first = data.cuts.get(0).unwrap();
    assert_eq!(first.facet_address, cut);
    assert_eq!(first.action, FacetCutAction::Add);
    assert_eq!(first.function_selectors, vec![&env, sel::DIAMOND_CUT.selector(&env)]);
    assert_eq!(data.init_facet, None);
    assert_eq!(data.init_selector, None);
}

#[test]
fn test_facet_deployed_event() {
    let (env, client, _owner, _cut) = setup_bare();
    let facet = client.deploy_facet(&FacetCode::Bondfunding, &3);
    let event = last_event(&env);

    assert_eq!(event.1, keyed_topics(&env, symbol_short!("deployed"), facet.clone()));
    let data: FacetDeployed = event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        FacetDeployed {
            facet,
            code: FacetCode::Bondfunding,
            salt: 3,
        }
    );
}

#[test]
fn test_cut_event_echoes_batch() {
    let h = Harness::new();
    let env = &h.env;
    let upgraded = h.client.deploy_facet(&FacetCode::Crowdfunding, &1);
    let cuts = vec![
        env,
        crate::FacetCut {
            facet_address: upgraded.clone(),
            action: FacetCutAction::Replace,
            function_selectors: vec![env, sel::PHASE.selector(env)],
        },
    ];
    let init: Option<crate::InitCall> = None;
    let _: () = h.call(&h.owner, sel::DIAMOND_CUT, args!(env, cuts.clone(), init));

    let event = last_event(env);
    assert_eq!(event.0, h.client.address);
    assert_eq!(event.1, topics(env, symbol_short!("cut")));
    let data: DiamondCutEvent = event.2.try_into_val(env).unwrap();
    assert_eq!(
        data,
        DiamondCutEvent {
            cuts,
            init_facet: None,
            init_selector: None,
        }
    );
}

#[test]
fn test_diamond_initialized_event() {
    let (env, client, owner, _cut) = setup_bare();
    let init_facet = client.deploy_facet(&FacetCode::DiamondInit, &0);
    let config = crate::DiamondConfig {
        project_name: soroban_sdk::String::from_str(&env, "Events"),
        project_coin: Address::generate(&env),
        stable_coin: Address::generate(&env),
        bond_token: Address::generate(&env),
        owner_fee_bps: 70,
        platform_fee_bps: 100,
    };
    let init = Some(crate::InitCall {
        facet: init_facet.clone(),
        selector: sel::INIT_DIAMOND.selector(&env),
        args: args!(&env, config.clone()),
    });
    let empty: Vec<crate::FacetCut> = Vec::new(&env);
    client.call(&owner, &sel::DIAMOND_CUT.selector(&env), &args!(&env, empty, init));

    // `init` is published before the closing `cut` event.
    let all = env.events().all();
    let init_event = all.get(all.len() - 2).unwrap();
    assert_eq!(init_event.1, topics(&env, symbol_short!("init")));
    let data: DiamondInitialized = init_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        DiamondInitialized {
            project_name: config.project_name,
            project_coin: config.project_coin,
            stable_coin: config.stable_coin,
            bond_token: config.bond_token,
        }
    );

    let cut_event = all.last().unwrap();
    assert_eq!(cut_event.1, topics(&env, symbol_short!("cut")));
    let cut: DiamondCutEvent = cut_event.2.try_into_val(&env).unwrap();
    assert!(cut.cuts.is_empty());
    assert_eq!(cut.init_facet, Some(init_facet));
    assert_eq!(cut.init_selector, Some(sel::INIT_DIAMOND.selector(&env)));
}

#[test]
fn test_ownership_transferred_event() {
    let h = Harness::new();
    let successor = Address::generate(&h.env);
    let _: () = h.call(&h.owner, sel::TRANSFER_OWNERSHIP, args!(&h.env, successor.clone()));

    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("own_xfer")));
    let data: OwnershipTransferred = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        data,
        OwnershipTransferred {
            previous_owner: h.owner.clone(),
            new_owner: successor,
        }
    );
}

#[test]
fn test_pause_events() {
    let h = Harness::new();
    let _: () = h.call(&h.owner, sel::PAUSE, args!(&h.env));
    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("paused")));
    let data: PauseToggled = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data.account, h.owner);

    let _: () = h.call(&h.owner, sel::UNPAUSE, args!(&h.env));
    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("unpaused")));
}

// ─────────────────────────────────────────────────────────
// Crowdfunding
// ─────────────────────────────────────────────────────────

#[test]
fn test_configuration_events() {
    let h = Harness::new();
    let env = &h.env;

    let _: () = h.call(&h.owner, sel::SET_FUNDING_DURATION, args!(env, START, END));
    let event = last_event(env);
    assert_eq!(event.1, topics(env, symbol_short!("duration")));
    let data: FundingDurationSet = event.2.try_into_val(env).unwrap();
    assert_eq!(data, FundingDurationSet { start: START, end: END });

    let _: () = h.call(&h.owner, sel::SET_MIN_FUNDING_THRESHOLD, args!(env, 20_000i128));
    let event = last_event(env);
    assert_eq!(event.1, topics(env, symbol_short!("min_thr")));
    let data: MinThresholdSet = event.2.try_into_val(env).unwrap();
    assert_eq!(data.value, 20_000);

    let project_owner = Address::generate(env);
    let _: () = h.call(&h.owner, sel::SET_PROJECT_OWNER_ADDR, args!(env, project_owner.clone()));
    let event = last_event(env);
    assert_eq!(event.1, topics(env, symbol_short!("po_addr")));
    let data: ProjectOwnerSet = event.2.try_into_val(env).unwrap();
    assert_eq!(data.project_owner, project_owner);

    let _: () = h.call(&h.owner, sel::ALLOCATE_SUPPLY, args!(env, 20_000i128));
    let event = last_event(env);
    assert_eq!(event.1, topics(env, symbol_short!("allocate")));
    let data: SupplyAllocated = event.2.try_into_val(env).unwrap();
    assert_eq!(data, SupplyAllocated { amount: 20_000, allocated: 20_000 });
}

#[test]
fn test_invested_event() {
    let h = Harness::new();
    h.open_funding(20_000);
    let investor = h.funded_account(10_402);
    h.invest(&investor, 10_402);

    let event = last_event(&h.env);
    assert_eq!(event.0, h.client.address);
    assert_eq!(
        event.1,
        keyed_topics(&h.env, symbol_short!("invest"), investor.clone())
    );
    let data: Invested = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        data,
        Invested {
            investor,
            coin: h.stable.address.clone(),
            amount: 10_402,
            minted: 1_022,
        }
    );
}

#[test]
fn test_withdraw_and_reclaim_events() {
    let h = Harness::new();
    h.open_funding(20_000);
    let investor = h.funded_account(20_804);
    let coin = h.stable.address.clone();

    h.invest(&investor, 10_402);
    let _: i128 = h.call(&investor, sel::WITHDRAW_FUND, args!(&h.env, coin.clone()));
    let event = last_event(&h.env);
    assert_eq!(
        event.1,
        keyed_topics(&h.env, symbol_short!("withdraw"), investor.clone())
    );
    let data: FundReturned = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data.refund, 10_226);

    h.invest(&investor, 10_402);
    h.end_funding();
    let _: i128 = h.call(&investor, sel::RECLAIM_FUND, args!(&h.env, coin.clone()));
    let event = last_event(&h.env);
    assert_eq!(
        event.1,
        keyed_topics(&h.env, symbol_short!("reclaim"), investor.clone())
    );
    let data: FundReturned = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        data,
        FundReturned {
            investor,
            coin,
            refund: 10_226,
        }
    );
}

#[test]
fn test_claim_coin_event() {
    let h = Harness::new();
    let (first, _) = h.two_investors_reached();
    h.end_funding();
    let _: i128 = h.call(&first, sel::CLAIM_COIN, args!(&h.env));

    let event = last_event(&h.env);
    assert_eq!(event.1, keyed_topics(&h.env, symbol_short!("claim_cn"), first.clone()));
    let data: CoinClaimed = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data, CoinClaimed { investor: first, amount: 16_781 });
}

#[test]
fn test_settlement_events() {
    let h = Harness::new();
    h.two_investors_reached();
    let project_owner = Address::generate(&h.env);
    let _: () = h.call(&h.owner, sel::SET_PROJECT_OWNER_ADDR, args!(&h.env, project_owner.clone()));
    h.end_funding();

    let _: i128 = h.call(&h.owner, sel::CLAIM_FEES, args!(&h.env));
    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("fees")));
    let data: Settlement = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data, Settlement { to: project_owner.clone(), amount: 144 });

    let _: i128 = h.call(&h.owner, sel::CLAIM_FUND, args!(&h.env));
    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("fund")));
    let data: Settlement = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data, Settlement { to: project_owner, amount: 20_452 });

    let _: i128 = h.call(&h.owner, sel::CLAIM_PLATFORM_FEES, args!(&h.env));
    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("pfees")));
    let data: Settlement = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data, Settlement { to: h.owner.clone(), amount: 208 });
}

#[test]
fn test_withdraw_coin_event() {
    let h = Harness::new();
    h.open_funding(20_000);
    h.end_funding();
    let _: i128 = h.call(&h.owner, sel::WITHDRAW_COIN, args!(&h.env));

    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("wd_coin")));
    let data: Settlement = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(data, Settlement { to: h.owner.clone(), amount: 20_000 });
}

// ─────────────────────────────────────────────────────────
// Bonds
// ─────────────────────────────────────────────────────────

#[test]
fn test_bond_launched_event() {
    let h = Harness::new();
    h.launched();

    let event = last_event(&h.env);
    assert_eq!(event.1, topics(&h.env, symbol_short!("bond")));
    let data: BondLaunched = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(
        data,
        BondLaunched {
            owner: h.owner.clone(),
            bond_token: h.bond.address.clone(),
            total_supply: BOND_TOTAL_SUPPLY,
            fee_bps: BOND_FEE_BPS,
        }
    );
}

#[test]
fn test_offer_lifecycle_events() {
    let h = Harness::new();
    h.launched();
    let env = &h.env;
    let coin = h.stable.address.clone();

    let id: u64 = h.call(&h.owner, sel::CREATE_OFFER, args!(env, 1_000i128, coin.clone(), 2i128));
    let event = last_event(env);
    assert_eq!(event.1, keyed_topics(env, symbol_short!("offer_new"), id));
    let data: OfferCreated = event.2.try_into_val(env).unwrap();
    assert_eq!(
        data,
        OfferCreated {
            id,
            provider: h.owner.clone(),
            amount: 1_000,
            coin: coin.clone(),
            price: 2,
        }
    );

    let _: () = h.call(&h.owner, sel::EDIT_OFFER, args!(env, id, 800i128, coin.clone(), 3i128));
    let event = last_event(env);
    assert_eq!(event.1, keyed_topics(env, symbol_short!("offer_edt"), id));
    let data: OfferEdited = event.2.try_into_val(env).unwrap();
    assert_eq!(data, OfferEdited { id, amount: 800, coin: coin.clone(), price: 3 });

    let buyer = h.funded_account(300);
    let _: () = h.call(&buyer, sel::BUY_OFFER, args!(env, id, 100i128, coin.clone(), 300i128));
    let event = last_event(env);
    assert_eq!(event.1, keyed_topics(env, symbol_short!("offer_buy"), id));
    let data: OfferBought = event.2.try_into_val(env).unwrap();
    assert_eq!(
        data,
        OfferBought {
            id,
            buyer,
            amount: 100,
            coin,
            total_price: 300,
            fee: 3,
        }
    );

    let _: i128 = h.call(&h.owner, sel::DELETE_OFFER, args!(env, id));
    let event = last_event(env);
    assert_eq!(event.1, keyed_topics(env, symbol_short!("offer_del"), id));
    let data: OfferDeleted = event.2.try_into_val(env).unwrap();
    assert_eq!(data, OfferDeleted { id, refunded: 700 });
}

#[test]
fn test_cut_facet_address_is_derived_from_name_and_salt() {
    let (env, client, _owner, cut) = setup_bare();
    let expected: BytesN<32> = env.as_contract(&client.address, || {
        crate::facets::facet_address(&env, FacetCode::DiamondCut, 0)
    });
    assert_eq!(cut, expected);
}
