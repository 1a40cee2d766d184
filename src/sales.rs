use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, StdResult, Storage};
use cw_utils::nonpayable;

use crate::error::ContractError;
use crate::guards;
use crate::offers;
use crate::prices;
use crate::state::{Listing, OfferPermissions, LISTINGS, LISTING_COUNTER};

pub fn execute_list(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collection: String,
    token_id: String,
    permissions: OfferPermissions,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;

    guards::assert_owner(&deps.querier, &collection, &token_id, &info.sender)?;
    guards::assert_not_listed(deps.storage, &collection, &token_id)?;
    guards::assert_transfer_approval(&deps.querier, &collection, &token_id, &env.contract.address)?;

    LISTINGS.save(
        deps.storage,
        (collection.clone(), token_id.clone()),
        &Listing { permissions },
    )?;
    LISTING_COUNTER.update(deps.storage, |counter: u128| -> StdResult<u128> {
        Ok(counter.saturating_add(1))
    })?;

    Ok(Response::new()
        .add_attribute("action", "list")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("seller", info.sender))
}

pub fn execute_unlist(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;

    guards::assert_owner(&deps.querier, &collection, &token_id, &info.sender)?;
    guards::load_listing(deps.storage, &collection, &token_id)?;

    // dependent records go first so the listing never outlives them
    offers::clear_offers(deps.storage, &collection, &token_id)?;
    prices::clear_prices(deps.storage, &collection, &token_id)?;
    remove_listing(deps.storage, &collection, &token_id)?;

    Ok(Response::new()
        .add_attribute("action", "unlist")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id))
}

pub fn remove_listing(
    storage: &mut dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> StdResult<()> {
    LISTINGS.remove(storage, (collection.clone(), token_id.to_string()));
    LISTING_COUNTER.update(storage, |counter: u128| -> StdResult<u128> {
        Ok(counter.saturating_sub(1))
    })?;
    Ok(())
}
