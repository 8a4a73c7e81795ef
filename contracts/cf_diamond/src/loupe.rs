//! Loupe facet: read-only introspection of the selector registry.

use soroban_sdk::{BytesN, Env, Val, Vec};

use crate::registry::SelectorRegistry;
use crate::router::{arg, expect_args, ret, CallContext};
use crate::types::Facet;
use crate::{storage, Error};

/// `facets()`: every facet with its selectors, in registration order.
pub fn facets(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    let registry = SelectorRegistry::load(env);
    let mut out: Vec<Facet> = Vec::new(env);
    for facet_address in registry.facets().iter() {
        out.push_back(Facet {
            function_selectors: registry.selectors_of(&facet_address),
            facet_address,
        });
    }
    ret(env, out)
}

/// `facet_function_selectors(BytesN<32>)`
pub fn facet_function_selectors(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let facet: BytesN<32> = arg(env, args, 0)?;
    ret(env, SelectorRegistry::load(env).selectors_of(&facet))
}

/// `facet_addresses()`
pub fn facet_addresses(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, SelectorRegistry::load(env).facets())
}

/// `facet_address(BytesN<4>)`: `None` when the selector is unregistered.
pub fn facet_address(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let selector: BytesN<4> = arg(env, args, 0)?;
    ret(env, SelectorRegistry::load(env).facet_of(&selector))
}

/// `supports_interface(BytesN<4>)`
pub fn supports_interface(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let interface_id: BytesN<4> = arg(env, args, 0)?;
    let supported = storage::interfaces(env).get(interface_id).unwrap_or(false);
    ret(env, supported)
}
