//! # Access control
//!
//! Ownership and Pausable facets, plus the checks the other facets consult.
//!
//! | Check                  | Error on failure    |
//! |------------------------|---------------------|
//! | [`require_owner`]      | `NotContractOwner`  |
//! | [`require_not_paused`] | `Paused`            |

use soroban_sdk::{Address, Env, Val, Vec};

use crate::router::{arg, expect_args, ret, CallContext};
use crate::{events, storage, Error};

/// Current owner. Fails before `init`.
pub fn current_owner(env: &Env) -> Result<Address, Error> {
    storage::get_owner(env).ok_or(Error::NotInitialized)
}

/// Ensure the call comes from the owner and return it.
pub fn require_owner(env: &Env, ctx: &CallContext) -> Result<Address, Error> {
    let caller = ctx.caller()?;
    let owner = current_owner(env)?;
    if *caller != owner {
        return Err(Error::NotContractOwner);
    }
    Ok(owner)
}

pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::Paused);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Ownership facet
// ─────────────────────────────────────────────────────────

/// `owner()`
pub fn owner(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, current_owner(env)?)
}

/// `transfer_ownership(Address)`
///
/// The previous owner loses every owner-gated right immediately.
pub fn transfer_ownership(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let new_owner: Address = arg(env, args, 0)?;
    let previous = require_owner(env, ctx)?;
    storage::set_owner(env, &new_owner);
    events::emit_ownership_transferred(env, previous, new_owner);
    ret(env, ())
}

// ─────────────────────────────────────────────────────────
// Pausable facet
// ─────────────────────────────────────────────────────────

/// `paused()`
pub fn paused(env: &Env, _ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    ret(env, storage::is_paused(env))
}

/// `pause()`
pub fn pause(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    let owner = require_owner(env, ctx)?;
    require_not_paused(env)?;
    storage::set_paused(env, true);
    events::emit_paused(env, owner);
    ret(env, ())
}

/// `unpause()`
pub fn unpause(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 0)?;
    let owner = require_owner(env, ctx)?;
    if !storage::is_paused(env) {
        return Err(Error::NotPaused);
    }
    storage::set_paused(env, false);
    events::emit_unpaused(env, owner);
    ret(env, ())
}
