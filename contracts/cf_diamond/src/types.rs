//! # Types
//!
//! Shared data structures used by the diamond core and by every facet.
//!
//! ## Design decisions
//!
//! ### Facets are code, addresses are bindings
//!
//! A facet is one of the closed set of [`FacetCode`] variants. Deploying a
//! facet binds a deterministic 32-byte address to a code variant, so the same
//! code may live at several addresses (an upgrade replaces selectors onto a
//! freshly deployed address). The all-zero address is the "no facet" sentinel
//! used by `Remove` cuts.
//!
//! ### Crowdfunding phase as a Finite-State Machine
//!
//! [`Phase`] is derived from the funding window, the ledger time, the raised
//! supply and the bond launch record. It is never stored:
//!
//! ```text
//! Unconfigured ──► Pending ──► Ongoing ──► EndedBelowThreshold
//!                                  │
//!                                  ├──────► EndedAboveThreshold
//!                                  └──────► BondLaunched
//! ```
//!
//! `BondLaunched` is one-shot and irreversible.

use soroban_sdk::{contracttype, Address, BytesN, String, Val, Vec};

// ── Diamond core ─────────────────────────────────────────────────────

/// Registry mutation requested by one entry of a diamond cut.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FacetCutAction {
    Add = 0,
    Replace = 1,
    Remove = 2,
}

/// One action of a diamond cut batch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FacetCut {
    /// Target facet; must be the zero address for `Remove`.
    pub facet_address: BytesN<32>,
    pub action: FacetCutAction,
    /// Must be non-empty.
    pub function_selectors: Vec<BytesN<4>>,
}

/// Optional initialisation call executed against the shared storage after
/// the registry has been mutated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitCall {
    pub facet: BytesN<32>,
    pub selector: BytesN<4>,
    pub args: Vec<Val>,
}

/// Loupe view of one facet and the selectors it currently owns.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Facet {
    pub facet_address: BytesN<32>,
    pub function_selectors: Vec<BytesN<4>>,
}

/// Logic modules that can be bound to a facet address.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FacetCode {
    DiamondCut,
    DiamondLoupe,
    Ownership,
    Pausable,
    Crowdfunding,
    Bondfunding,
    DiamondInit,
}

// ── Configuration ────────────────────────────────────────────────────

/// Project configuration written once by the `DiamondInit` facet.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiamondConfig {
    /// Human-readable project name.
    pub project_name: String,
    /// Token sold through the bonding curve and claimed by investors.
    pub project_coin: Address,
    /// Default accepted investment coin.
    pub stable_coin: Address,
    /// Stellar asset minted at bond launch; the diamond must be its admin.
    pub bond_token: Address,
    /// Project owner's cut of every investment, in basis points.
    pub owner_fee_bps: u32,
    /// Platform's cut of every investment, in basis points.
    pub platform_fee_bps: u32,
}

// ── Crowdfunding ─────────────────────────────────────────────────────

/// Funding window as ledger timestamps: open at `start`, closed from `end`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FundingWindow {
    pub start: u64,
    pub end: u64,
}

/// Derived lifecycle phase of the crowdfunding.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// No funding window set.
    Unconfigured,
    /// Window set but not started, or no supply allocated yet.
    Pending,
    /// Accepting investments.
    Ongoing,
    /// Window closed without reaching the minimum threshold.
    EndedBelowThreshold,
    /// Window closed with the minimum threshold reached.
    EndedAboveThreshold,
    /// Bond token issued; the offer book is open.
    BondLaunched,
}

/// Per (investor, coin) investment bookkeeping.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Investment {
    /// Contributed amount of the coin.
    pub amount: i128,
    /// Curve units credited against the contribution.
    pub minted: i128,
    /// Project owner fee booked on the contribution.
    pub owner_fee: i128,
    /// Platform fee booked on the contribution.
    pub platform_fee: i128,
}

impl Investment {
    /// Amount returned to the investor on withdraw or reclaim.
    pub fn net(&self) -> i128 {
        self.amount - self.owner_fee - self.platform_fee
    }
}

/// Settlement pool of one accepted coin.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CoinPool {
    /// Contributions from active investment records.
    pub raised: i128,
    /// Raised funds net of fees, payable to the project owner.
    pub net: i128,
    /// Unclaimed project owner fees.
    pub owner_fees: i128,
    /// Unclaimed platform fees.
    pub platform_fees: i128,
}

// ── Bond marketplace ─────────────────────────────────────────────────

/// Record of the one-shot bond issuance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondLaunch {
    /// Marketplace fee on every filled offer, in basis points.
    pub fee_bps: u32,
    pub total_supply: i128,
    pub launched_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OfferStatus {
    Open,
    Filled,
    Cancelled,
}

/// A provider's listing of escrowed bond tokens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    pub id: u64,
    pub provider: Address,
    /// Bond tokens still held in escrow for this offer.
    pub amount: i128,
    /// Coin the provider accepts as payment.
    pub coin: Address,
    /// Ask price per bond token, in `coin` units.
    pub price: i128,
    pub status: OfferStatus,
}
