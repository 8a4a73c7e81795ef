//! # CF Diamond Contract
//!
//! A crowdfunding platform laid out as a diamond: one contract, one storage
//! space, and a selector registry that routes every call to a swappable
//! facet. The contract itself exposes only bootstrap and routing entry
//! points; everything else is a facet function reached through [`CfDiamond::call`]
//! or [`CfDiamond::view`].
//!
//! | Phase        | Entry Point(s)                                     |
//! |--------------|----------------------------------------------------|
//! | Bootstrap    | [`CfDiamond::init`], [`CfDiamond::deploy_facet`]   |
//! | Upgrade      | `diamond_cut` (DiamondCut facet)                   |
//! | Introspection| `facets`, `facet_address`, ... (DiamondLoupe facet)|
//! | Access       | `owner`, `pause`, ... (Ownership / Pausable facets)|
//! | Funding      | `invest`, `withdraw_fund`, ... (Crowdfunding facet)|
//! | Bonds        | `create_offer`, `buy_offer`, ... (Bondfunding facet)|
//!
//! ## Architecture
//!
//! Routing lives in [`router`], the selector maps in [`registry`], the cut
//! protocol in [`cut`], and typed storage access in [`storage`]. Facets are
//! plain functions listed in the tables of [`facets`]; they share the
//! contract's storage directly.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, vec, Address, BytesN, Env, Val, Vec};

mod access;
mod bondfunding;
mod crowdfunding;
mod curve;
mod cut;
pub mod events;
mod facets;
mod init;
mod loupe;
mod registry;
mod router;
pub mod selectors;
mod storage;
mod types;

#[cfg(test)]
mod test_curve;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_project_owner;

pub use crowdfunding::BOND_TOTAL_SUPPLY;
pub use curve::PRICE_SCALE;
pub use registry::SelectorRegistry;
pub use types::{
    BondLaunch, CoinPool, DiamondConfig, Facet, FacetCode, FacetCut, FacetCutAction,
    FundingWindow, InitCall, Investment, Offer, OfferStatus, Phase,
};

/// Denominator of every basis-point rate.
pub const BPS_DENOMINATOR: u32 = 10_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Diamond core
    NotContractOwner              = 1,
    FunctionNotFound              = 2,
    NoSelectorsInFacetCut         = 3,
    FacetAddressIsZero            = 4,
    FacetHasNoCode                = 5,
    CannotAddExistingFunction     = 6,
    CannotReplaceWithSameFunction = 7,
    CannotReplaceMissingFunction  = 8,
    CannotRemoveMissingFunction   = 9,
    RemoveFacetAddressMustBeZero  = 10,
    InitHasNoCode                 = 11,
    InitCallFailed                = 12,
    AlreadyInitialized            = 13,
    NotInitialized                = 14,
    InvalidArgument               = 15,
    Reentrancy                    = 16,
    CallerRequired                = 17,
    // Pausable
    Paused                        = 20,
    NotPaused                     = 21,
    // Crowdfunding
    AlreadyStarted                = 30,
    InvalidDuration               = 31,
    ZeroThreshold                 = 32,
    ZeroAmount                    = 33,
    NotOngoing                    = 34,
    NotEnded                      = 35,
    TooSmallInvestment            = 36,
    NoFund                        = 37,
    NotReachedMinThreshold        = 38,
    ReachedMinThreshold           = 39,
    ZeroAddress                   = 40,
    CoinNotAccepted               = 41,
    SupplyExhausted               = 42,
    BondAlreadyLaunched           = 43,
    InvalidFee                    = 44,
    Overflow                      = 45,
    // Bondfunding
    BondNotLaunched               = 50,
    OfferNotFound                 = 51,
    NotOfferOwner                 = 52,
    CoinMismatch                  = 53,
    InsufficientOffer             = 54,
    InsufficientPayment           = 55,
    ZeroPrice                     = 56,
    OfferClosed                   = 57,
}

/// Coarse classification of [`Error`] codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    AccessDenied,
    InvalidState,
    InvalidArgument,
    InsufficientFunds,
    Unregistered,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            NotContractOwner | NotOfferOwner | CallerRequired | Reentrancy => ErrorKind::AccessDenied,
            FunctionNotFound | FacetHasNoCode | InitHasNoCode => ErrorKind::Unregistered,
            NoSelectorsInFacetCut | FacetAddressIsZero | InvalidArgument | ZeroAmount
            | ZeroAddress | ZeroPrice | InvalidFee | InvalidDuration | CoinNotAccepted
            | CoinMismatch | Overflow => ErrorKind::InvalidArgument,
            NoFund | InsufficientOffer | InsufficientPayment | SupplyExhausted => {
                ErrorKind::InsufficientFunds
            }
            CannotAddExistingFunction
            | CannotReplaceWithSameFunction
            | CannotReplaceMissingFunction
            | CannotRemoveMissingFunction
            | RemoveFacetAddressMustBeZero
            | InitCallFailed
            | AlreadyInitialized
            | NotInitialized
            | Paused
            | NotPaused
            | AlreadyStarted
            | ZeroThreshold
            | NotOngoing
            | NotEnded
            | TooSmallInvestment
            | NotReachedMinThreshold
            | ReachedMinThreshold
            | BondAlreadyLaunched
            | BondNotLaunched
            | OfferNotFound
            | OfferClosed => ErrorKind::InvalidState,
        }
    }
}

#[contract]
pub struct CfDiamond;

#[contractimpl]
impl CfDiamond {
    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────

    /// Initialise the diamond and set its owner.
    ///
    /// Deploys the DiamondCut facet (salt 0) and registers `diamond_cut` on
    /// it, so every further facet is attached through a cut. Returns the cut
    /// facet address. Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, owner: Address) -> Result<BytesN<32>, Error> {
        owner.require_auth();
        if storage::get_owner(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_owner(&env, &owner);

        let cut_facet = facets::deploy(&env, FacetCode::DiamondCut, 0);
        let selector = selectors::DIAMOND_CUT.selector(&env);
        let mut registry = SelectorRegistry::new(&env);
        registry.insert(&selector, &cut_facet);
        registry.save(&env);
        storage::bump_instance(&env);

        events::emit_diamond_cut(
            &env,
            vec![
                &env,
                FacetCut {
                    facet_address: cut_facet.clone(),
                    action: FacetCutAction::Add,
                    function_selectors: vec![&env, selector],
                },
            ],
            None,
        );
        Ok(cut_facet)
    }

    /// Bind `code` to its deterministic address for `salt` and return it.
    ///
    /// Deploying does not route anything; the owner attaches the facet's
    /// selectors with a cut. Only the diamond owner may deploy.
    pub fn deploy_facet(env: Env, code: FacetCode, salt: u32) -> Result<BytesN<32>, Error> {
        let owner = storage::get_owner(&env).ok_or(Error::NotInitialized)?;
        owner.require_auth();
        storage::bump_instance(&env);
        Ok(facets::deploy(&env, code, salt))
    }

    /// Code bound to `facet`, if any.
    pub fn facet_code(env: Env, facet: BytesN<32>) -> Option<FacetCode> {
        storage::facet_code(&env, &facet)
    }

    // ─────────────────────────────────────────────────────────
    // Routing
    // ─────────────────────────────────────────────────────────

    /// Route a state-changing call on behalf of `caller`.
    ///
    /// - `caller` must authorize the invocation.
    /// - Fails with `FunctionNotFound` when `selector` is not registered.
    pub fn call(env: Env, caller: Address, selector: BytesN<4>, args: Vec<Val>) -> Result<Val, Error> {
        caller.require_auth();
        storage::acquire_lock(&env)?;
        storage::bump_instance(&env);
        let result = router::dispatch(&env, Some(caller), &selector, &args);
        storage::release_lock(&env);
        result
    }

    /// Route a read-only call. Facet functions that need a caller fail with
    /// `CallerRequired`.
    pub fn view(env: Env, selector: BytesN<4>, args: Vec<Val>) -> Result<Val, Error> {
        router::dispatch(&env, None, &selector, &args)
    }
}
