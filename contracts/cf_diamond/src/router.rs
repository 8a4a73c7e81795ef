//! # Call Router
//!
//! Resolves a selector to its facet through the [`SelectorRegistry`], the
//! facet to its bound [`FacetCode`], and the code to a [`Handler`].
//! Handlers receive the raw argument vector and decode it themselves with
//! [`arg`], so every facet shares one calling convention.

use soroban_sdk::{Address, BytesN, Env, IntoVal, TryFromVal, Val, Vec};

use crate::registry::SelectorRegistry;
use crate::storage;
use crate::types::FacetCode;
use crate::Error;

/// Entry point of a facet function.
pub type Handler = fn(&Env, &CallContext, &Vec<Val>) -> Result<Val, Error>;

/// Identity of the current call as seen by a facet.
#[derive(Clone, Debug)]
pub struct CallContext {
    /// Authenticated caller; `None` for read-only views.
    pub caller: Option<Address>,
    /// Facet the call was routed to.
    pub facet: BytesN<32>,
}

impl CallContext {
    pub fn caller(&self) -> Result<&Address, Error> {
        self.caller.as_ref().ok_or(Error::CallerRequired)
    }
}

/// Look up the facet registered for `selector`.
pub fn route(env: &Env, selector: &BytesN<4>) -> Result<BytesN<32>, Error> {
    SelectorRegistry::load(env)
        .facet_of(selector)
        .ok_or(Error::FunctionNotFound)
}

/// Route and execute one call.
pub fn dispatch(
    env: &Env,
    caller: Option<Address>,
    selector: &BytesN<4>,
    args: &Vec<Val>,
) -> Result<Val, Error> {
    let facet = route(env, selector)?;
    let code = storage::facet_code(env, &facet).ok_or(Error::FunctionNotFound)?;
    let ctx = CallContext { caller, facet };
    execute(env, code, &ctx, selector, args)
}

/// Run the handler `code` provides for `selector`, bypassing the registry.
pub fn execute(
    env: &Env,
    code: FacetCode,
    ctx: &CallContext,
    selector: &BytesN<4>,
    args: &Vec<Val>,
) -> Result<Val, Error> {
    let handler = code.handler(selector).ok_or(Error::FunctionNotFound)?;
    handler(env, ctx, args)
}

// ── Argument helpers ─────────────────────────────────────────────────

/// Reject argument vectors of the wrong arity.
pub fn expect_args(args: &Vec<Val>, count: u32) -> Result<(), Error> {
    if args.len() != count {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// Decode argument `index` as `T`.
pub fn arg<T: TryFromVal<Env, Val>>(env: &Env, args: &Vec<Val>, index: u32) -> Result<T, Error> {
    let raw = args.get(index).ok_or(Error::InvalidArgument)?;
    T::try_from_val(env, &raw).map_err(|_| Error::InvalidArgument)
}

/// Encode a handler's return value.
pub fn ret<T: IntoVal<Env, Val>>(env: &Env, value: T) -> Result<Val, Error> {
    Ok(value.into_val(env))
}
