//! DiamondInit facet, executed as the init call of the bootstrap cut.

use soroban_sdk::{vec, Env, Val, Vec};

use crate::router::{arg, expect_args, ret, CallContext};
use crate::selectors::{self as sel, interface_id};
use crate::types::DiamondConfig;
use crate::{access, events, storage, Error, BPS_DENOMINATOR};

/// `init_diamond(DiamondConfig)`
///
/// Stores the project configuration, seeds the accepted coins with the
/// stable coin and registers the interface ids the diamond answers to.
/// Runs at most once.
pub fn init_diamond(env: &Env, ctx: &CallContext, args: &Vec<Val>) -> Result<Val, Error> {
    expect_args(args, 1)?;
    let config: DiamondConfig = arg(env, args, 0)?;
    access::require_owner(env, ctx)?;

    if storage::has_config(env) {
        return Err(Error::AlreadyInitialized);
    }
    if config.owner_fee_bps.saturating_add(config.platform_fee_bps) > BPS_DENOMINATOR {
        return Err(Error::InvalidFee);
    }

    storage::set_config(env, &config);
    storage::set_accepted_coins(env, &vec![env, config.stable_coin.clone()]);

    let mut interfaces = storage::interfaces(env);
    for defs in [
        sel::DIAMOND_CUT_INTERFACE,
        sel::DIAMOND_LOUPE_INTERFACE,
        sel::OWNERSHIP_INTERFACE,
        sel::INTROSPECTION_INTERFACE,
    ] {
        interfaces.set(interface_id(env, defs), true);
    }
    storage::set_interfaces(env, &interfaces);

    events::emit_diamond_initialized(env, config);
    ret(env, ())
}
