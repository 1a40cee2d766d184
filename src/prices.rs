use cosmwasm_std::{Addr, Deps, DepsMut, MessageInfo, Order, Response, StdResult, Storage, Uint128};
use cw_utils::nonpayable;

use crate::error::ContractError;
use crate::guards;
use crate::msg::FungiblePrice;
use crate::state::{FUNGIBLE_PRICES, NATIVE_PRICES};

/// Common gate for every price mutation: the listing must exist and the
/// caller must be the live owner of the listed token.
fn assert_seller(
    deps: Deps,
    sender: &Addr,
    collection: &Addr,
    token_id: &str,
) -> Result<(), ContractError> {
    guards::load_listing(deps.storage, collection, token_id)?;
    guards::assert_owner(&deps.querier, collection, token_id, sender)?;
    Ok(())
}

pub fn execute_set_native_price(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    // idempotent overwrite
    NATIVE_PRICES.save(deps.storage, (collection.clone(), token_id.clone()), &amount)?;

    Ok(Response::new()
        .add_attribute("action", "set_native_price")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("amount", amount))
}

pub fn execute_remove_native_price(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    NATIVE_PRICES.remove(deps.storage, (collection.clone(), token_id.clone()));

    Ok(Response::new()
        .add_attribute("action", "remove_native_price")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id))
}

pub fn execute_add_fungible_prices(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    prices: Vec<FungiblePrice>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    // batch upsert, one entry per token; existing entries are overwritten
    for price in &prices {
        let token = deps.api.addr_validate(&price.token)?;
        FUNGIBLE_PRICES.save(
            deps.storage,
            (collection.clone(), token_id.clone(), token),
            &price.amount,
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "add_fungible_prices")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("entries", prices.len().to_string()))
}

pub fn execute_add_fungible_price(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    let key = (collection.clone(), token_id.clone(), token.clone());
    if FUNGIBLE_PRICES.has(deps.storage, key.clone()) {
        return Err(ContractError::PriceAlreadySet {});
    }
    FUNGIBLE_PRICES.save(deps.storage, key, &amount)?;

    Ok(Response::new()
        .add_attribute("action", "add_fungible_price")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("amount", amount))
}

pub fn execute_change_fungible_price(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    let key = (collection.clone(), token_id.clone(), token.clone());
    if !FUNGIBLE_PRICES.has(deps.storage, key.clone()) {
        return Err(ContractError::PriceNotSet {});
    }
    FUNGIBLE_PRICES.save(deps.storage, key, &amount)?;

    Ok(Response::new()
        .add_attribute("action", "change_fungible_price")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("amount", amount))
}

pub fn execute_remove_fungible_price(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    let key = (collection.clone(), token_id.clone(), token.clone());
    if !FUNGIBLE_PRICES.has(deps.storage, key.clone()) {
        return Err(ContractError::PriceNotSet {});
    }
    FUNGIBLE_PRICES.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("action", "remove_fungible_price")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token))
}

pub fn execute_remove_all_prices(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    assert_seller(deps.as_ref(), &info.sender, &collection, &token_id)?;

    clear_prices(deps.storage, &collection, &token_id)?;

    Ok(Response::new()
        .add_attribute("action", "remove_all_prices")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id))
}

/// Drops the native entry and every fungible entry for a listing.
pub fn clear_prices(
    storage: &mut dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> StdResult<()> {
    NATIVE_PRICES.remove(storage, (collection.clone(), token_id.to_string()));

    let tokens: Vec<Addr> = FUNGIBLE_PRICES
        .prefix((collection.clone(), token_id.to_string()))
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;
    for token in tokens {
        FUNGIBLE_PRICES.remove(storage, (collection.clone(), token_id.to_string(), token));
    }
    Ok(())
}

pub fn load_native_price(
    storage: &dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> Result<Uint128, ContractError> {
    NATIVE_PRICES
        .may_load(storage, (collection.clone(), token_id.to_string()))?
        .ok_or(ContractError::PriceNotSet {})
}

pub fn load_fungible_price(
    storage: &dyn Storage,
    collection: &Addr,
    token_id: &str,
    token: &Addr,
) -> Result<Uint128, ContractError> {
    FUNGIBLE_PRICES
        .may_load(
            storage,
            (collection.clone(), token_id.to_string(), token.clone()),
        )?
        .ok_or(ContractError::PriceNotSet {})
}
