//! # Diamond Cut
//!
//! Owner-gated, all-or-nothing mutation of the selector registry.
//!
//! Every action of a batch is applied to a loaded copy of the registry; the
//! copy is stored only after the whole batch validates. The optional init
//! call then runs inside the same invocation, and its failure fails the
//! invocation, which discards every write made so far.

use soroban_sdk::{BytesN, Env, Val, Vec};

use crate::registry::SelectorRegistry;
use crate::router::{self, arg, expect_args, ret, CallContext};
use crate::types::{FacetCut, FacetCutAction, InitCall};
use crate::{access, events, facets, storage, Error};

/// `diamond_cut(Vec<FacetCut>,Option<InitCall>)`
pub fn diamond_cut(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 2)?;
    let cuts: Vec<FacetCut> = arg(env, args, 0)?;
    let init: Option<InitCall> = arg(env, args, 1)?;
    apply(env, ctx, &cuts, &init)?;
    ret(env, ())
}

/// Validate and commit a cut batch, then run its init call.
pub fn apply(
    env: &Env,
    ctx: &CallContext,
    cuts: &Vec<FacetCut>,
    init: &Option<InitCall>,
) -> Result<(), Error> {
    access::require_owner(env, ctx)?;

    let mut staged = SelectorRegistry::load(env);
    for cut in cuts.iter() {
        apply_action(env, &mut staged, &cut)?;
    }
    staged.save(env);

    if let Some(call) = init {
        run_init(env, ctx, call)?;
    }

    events::emit_diamond_cut(env, cuts.clone(), init.as_ref());
    Ok(())
}

fn apply_action(env: &Env, registry: &mut SelectorRegistry, cut: &FacetCut) -> Result<(), Error> {
    if cut.function_selectors.is_empty() {
        return Err(Error::NoSelectorsInFacetCut);
    }
    match cut.action {
        FacetCutAction::Add => {
            require_code(env, &cut.facet_address)?;
            for selector in cut.function_selectors.iter() {
                if registry.facet_of(&selector).is_some() {
                    return Err(Error::CannotAddExistingFunction);
                }
                registry.insert(&selector, &cut.facet_address);
            }
        }
        FacetCutAction::Replace => {
            require_code(env, &cut.facet_address)?;
            for selector in cut.function_selectors.iter() {
                match registry.facet_of(&selector) {
                    None => return Err(Error::CannotReplaceMissingFunction),
                    Some(old) if old == cut.facet_address => {
                        return Err(Error::CannotReplaceWithSameFunction)
                    }
                    Some(_) => {
                        registry.remove(&selector);
                        registry.insert(&selector, &cut.facet_address);
                    }
                }
            }
        }
        FacetCutAction::Remove => {
            if !facets::is_zero(&cut.facet_address) {
                return Err(Error::RemoveFacetAddressMustBeZero);
            }
            for selector in cut.function_selectors.iter() {
                registry
                    .remove(&selector)
                    .ok_or(Error::CannotRemoveMissingFunction)?;
            }
        }
    }
    Ok(())
}

fn require_code(env: &Env, facet: &BytesN<32>) -> Result<(), Error> {
    if facets::is_zero(facet) {
        return Err(Error::FacetAddressIsZero);
    }
    if storage::facet_code(env, facet).is_none() {
        return Err(Error::FacetHasNoCode);
    }
    Ok(())
}

fn run_init(env: &Env, ctx: &CallContext, call: &InitCall) -> Result<(), Error> {
    let code = storage::facet_code(env, &call.facet).ok_or(Error::InitHasNoCode)?;
    let init_ctx = CallContext {
        caller: ctx.caller.clone(),
        facet: call.facet.clone(),
    };
    router::execute(env, code, &init_ctx, &call.selector, &call.args)
        .map_err(|_| Error::InitCallFailed)?;
    Ok(())
}
