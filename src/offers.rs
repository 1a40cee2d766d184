use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Order, Response, StdResult, Storage, Uint128};
use cw_utils::nonpayable;

use crate::error::ContractError;
use crate::guards;
use crate::state::{TokenOffer, UniqueOffer, FUNGIBLE_OFFERS, NATIVE_OFFERS, UNIQUE_OFFERS};

pub fn execute_make_unique_offer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collection: String,
    token_id: String,
    offered_collection: String,
    offered_token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let offered_collection = deps.api.addr_validate(&offered_collection)?;

    let listing = guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_accepts_unique(&listing)?;

    let key = (collection.clone(), token_id.clone(), offered_collection.clone());
    let mut entries = UNIQUE_OFFERS.may_load(deps.storage, key.clone())?.unwrap_or_default();
    if entries.iter().any(|offer| offer.token_id == offered_token_id) {
        return Err(ContractError::OfferAlreadyExists {});
    }

    guards::assert_owner(&deps.querier, &offered_collection, &offered_token_id, &info.sender)?;
    guards::assert_transfer_approval(
        &deps.querier,
        &offered_collection,
        &offered_token_id,
        &env.contract.address,
    )?;

    entries.push(UniqueOffer {
        token_id: offered_token_id.clone(),
        offerer: info.sender.clone(),
    });
    UNIQUE_OFFERS.save(deps.storage, key, &entries)?;

    Ok(Response::new()
        .add_attribute("action", "make_unique_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("offered_collection", offered_collection)
        .add_attribute("offered_token_id", offered_token_id)
        .add_attribute("offerer", info.sender))
}

pub fn execute_remove_unique_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    offered_collection: String,
    offered_token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let offered_collection = deps.api.addr_validate(&offered_collection)?;

    let key = (collection.clone(), token_id.clone(), offered_collection.clone());
    let mut entries = UNIQUE_OFFERS.may_load(deps.storage, key.clone())?.unwrap_or_default();
    let position = entries
        .iter()
        .position(|offer| offer.token_id == offered_token_id)
        .ok_or(ContractError::OfferNotFound {})?;
    if entries[position].offerer != info.sender {
        return Err(ContractError::NotOwner {});
    }

    entries.remove(position);
    if entries.is_empty() {
        UNIQUE_OFFERS.remove(deps.storage, key);
    } else {
        UNIQUE_OFFERS.save(deps.storage, key, &entries)?;
    }

    Ok(Response::new()
        .add_attribute("action", "remove_unique_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("offered_collection", offered_collection)
        .add_attribute("offered_token_id", offered_token_id))
}

pub fn execute_make_fungible_offer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;

    let listing = guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_accepts_fungible(&listing)?;
    guards::assert_allowance_covers(
        &deps.querier,
        &token,
        &info.sender,
        &env.contract.address,
        amount,
    )?;

    let key = (collection.clone(), token_id.clone(), info.sender.clone());
    let mut entries = FUNGIBLE_OFFERS.may_load(deps.storage, key.clone())?.unwrap_or_default();
    // a repeated offer for the same token replaces the amount, never sums
    match entries.iter_mut().find(|offer| offer.token == token) {
        Some(existing) => existing.amount = amount,
        None => entries.push(TokenOffer {
            token: token.clone(),
            amount,
        }),
    }
    FUNGIBLE_OFFERS.save(deps.storage, key, &entries)?;

    Ok(Response::new()
        .add_attribute("action", "make_fungible_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("amount", amount)
        .add_attribute("offerer", info.sender))
}

pub fn execute_remove_fungible_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;

    remove_fungible_entry(deps.storage, &collection, &token_id, &info.sender, &token)?;

    Ok(Response::new()
        .add_attribute("action", "remove_fungible_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("offerer", info.sender))
}

pub fn execute_make_native_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    // escrow-free until acceptance, so no funds ride along
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;

    let listing = guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_accepts_native(&listing)?;

    NATIVE_OFFERS.save(
        deps.storage,
        (collection.clone(), token_id.clone(), info.sender.clone()),
        &amount,
    )?;

    Ok(Response::new()
        .add_attribute("action", "make_native_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("amount", amount)
        .add_attribute("offerer", info.sender))
}

pub fn execute_remove_native_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;

    let key = (collection.clone(), token_id.clone(), info.sender.clone());
    if !NATIVE_OFFERS.has(deps.storage, key.clone()) {
        return Err(ContractError::OfferNotFound {});
    }
    NATIVE_OFFERS.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("action", "remove_native_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("offerer", info.sender))
}

pub fn execute_reject_unique_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    offered_collection: String,
    offered_token_id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let offered_collection = deps.api.addr_validate(&offered_collection)?;

    guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_owner(&deps.querier, &collection, &token_id, &info.sender)?;

    let key = (collection.clone(), token_id.clone(), offered_collection.clone());
    let mut entries = UNIQUE_OFFERS.may_load(deps.storage, key.clone())?.unwrap_or_default();
    let position = entries
        .iter()
        .position(|offer| offer.token_id == offered_token_id)
        .ok_or(ContractError::OfferNotFound {})?;
    entries.remove(position);
    if entries.is_empty() {
        UNIQUE_OFFERS.remove(deps.storage, key);
    } else {
        UNIQUE_OFFERS.save(deps.storage, key, &entries)?;
    }

    Ok(Response::new()
        .add_attribute("action", "reject_unique_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("offered_collection", offered_collection)
        .add_attribute("offered_token_id", offered_token_id))
}

pub fn execute_reject_fungible_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    offerer: String,
    token: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let offerer = deps.api.addr_validate(&offerer)?;
    let token = deps.api.addr_validate(&token)?;

    guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_owner(&deps.querier, &collection, &token_id, &info.sender)?;

    remove_fungible_entry(deps.storage, &collection, &token_id, &offerer, &token)?;

    Ok(Response::new()
        .add_attribute("action", "reject_fungible_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("offerer", offerer))
}

pub fn execute_reject_native_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    offerer: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let offerer = deps.api.addr_validate(&offerer)?;

    guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_owner(&deps.querier, &collection, &token_id, &info.sender)?;

    let key = (collection.clone(), token_id.clone(), offerer.clone());
    if !NATIVE_OFFERS.has(deps.storage, key.clone()) {
        return Err(ContractError::OfferNotFound {});
    }
    NATIVE_OFFERS.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("action", "reject_native_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("offerer", offerer))
}

/// Shared removal path for an offerer's (token, amount) entry. Dropping the
/// last entry also drops the offerer from the listing's offerer set.
fn remove_fungible_entry(
    storage: &mut dyn Storage,
    collection: &Addr,
    token_id: &str,
    offerer: &Addr,
    token: &Addr,
) -> Result<(), ContractError> {
    let key = (collection.clone(), token_id.to_string(), offerer.clone());
    let mut entries = FUNGIBLE_OFFERS.may_load(storage, key.clone())?.unwrap_or_default();
    let position = entries
        .iter()
        .position(|offer| &offer.token == token)
        .ok_or(ContractError::OfferNotFound {})?;
    entries.remove(position);
    if entries.is_empty() {
        FUNGIBLE_OFFERS.remove(storage, key);
    } else {
        FUNGIBLE_OFFERS.save(storage, key, &entries)?;
    }
    Ok(())
}

pub fn unique_offer_exists(
    storage: &dyn Storage,
    collection: &Addr,
    token_id: &str,
    offered_collection: &Addr,
    offered_token_id: &str,
) -> StdResult<bool> {
    let entries = UNIQUE_OFFERS
        .may_load(
            storage,
            (collection.clone(), token_id.to_string(), offered_collection.clone()),
        )?
        .unwrap_or_default();
    Ok(entries.iter().any(|offer| offer.token_id == offered_token_id))
}

pub fn load_fungible_offer(
    storage: &dyn Storage,
    collection: &Addr,
    token_id: &str,
    offerer: &Addr,
    token: &Addr,
) -> Result<Uint128, ContractError> {
    let entries = FUNGIBLE_OFFERS
        .may_load(
            storage,
            (collection.clone(), token_id.to_string(), offerer.clone()),
        )?
        .unwrap_or_default();
    entries
        .iter()
        .find(|offer| &offer.token == token)
        .map(|offer| offer.amount)
        .ok_or(ContractError::OfferNotFound {})
}

/// Cascade drop of every offer record for a listing, all three kinds.
pub fn clear_offers(
    storage: &mut dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> StdResult<()> {
    let offered_collections: Vec<Addr> = UNIQUE_OFFERS
        .prefix((collection.clone(), token_id.to_string()))
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;
    for offered in offered_collections {
        UNIQUE_OFFERS.remove(storage, (collection.clone(), token_id.to_string(), offered));
    }

    let offerers: Vec<Addr> = FUNGIBLE_OFFERS
        .prefix((collection.clone(), token_id.to_string()))
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;
    for offerer in offerers {
        FUNGIBLE_OFFERS.remove(storage, (collection.clone(), token_id.to_string(), offerer));
    }

    let offerers: Vec<Addr> = NATIVE_OFFERS
        .prefix((collection.clone(), token_id.to_string()))
        .keys(storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;
    for offerer in offerers {
        NATIVE_OFFERS.remove(storage, (collection.clone(), token_id.to_string(), offerer));
    }
    Ok(())
}
