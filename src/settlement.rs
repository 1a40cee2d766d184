//! The four settlement flows. Every flow runs its preconditions first, then
//! retires the listing and all dependent records, and only then emits the
//! transfer messages. Messages dispatch after this state is committed, so a
//! reentrant call from a receiver finds the listing already gone.

use cosmwasm_std::{
    coins, to_json_binary, Addr, BankMsg, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdResult,
    Storage, SubMsg, WasmMsg,
};
use cw20::{Cw20Contract, Cw20ExecuteMsg};
use cw721::Cw721ExecuteMsg;
use cw_utils::{must_pay, nonpayable};

use crate::contract::{BARTER_REPLY, OFFER_REPLY, SALE_REPLY};
use crate::error::ContractError;
use crate::guards;
use crate::offers;
use crate::prices;
use crate::sales;
use crate::state::CONFIG;

pub fn execute_buy_with_native(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let collection = deps.api.addr_validate(&collection)?;

    let listing = guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_accepts_native(&listing)?;
    let price = prices::load_native_price(deps.storage, &collection, &token_id)?;

    let config = CONFIG.load(deps.storage)?;
    let paid = must_pay(&info, &config.native_denom)?;
    if paid != price {
        return Err(ContractError::InsufficientPayment { price });
    }

    let seller = guards::owner_of(&deps.querier, &collection, &token_id)?;

    clear_listing_state(deps.storage, &collection, &token_id)?;

    let transfer = SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: collection.to_string(),
            msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
                recipient: info.sender.to_string(),
                token_id: token_id.clone(),
            })?,
            funds: vec![],
        },
        SALE_REPLY,
    );
    let payment = CosmosMsg::Bank(BankMsg::Send {
        to_address: seller.clone(),
        amount: coins(paid.u128(), config.native_denom),
    });

    Ok(Response::new()
        .add_attribute("action", "buy_with_native")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("seller", seller)
        .add_attribute("buyer", info.sender)
        .add_submessage(transfer)
        .add_message(payment))
}

pub fn execute_buy_with_fungible(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;

    let listing = guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_accepts_fungible(&listing)?;
    let price = prices::load_fungible_price(deps.storage, &collection, &token_id, &token)?;

    guards::assert_balance_covers(&deps.querier, &token, info.sender.as_str(), price)?;
    guards::assert_allowance_covers(
        &deps.querier,
        &token,
        &info.sender,
        &env.contract.address,
        price,
    )?;

    let seller = guards::owner_of(&deps.querier, &collection, &token_id)?;

    clear_listing_state(deps.storage, &collection, &token_id)?;

    let payment = Cw20Contract(token.clone()).call(Cw20ExecuteMsg::TransferFrom {
        owner: info.sender.to_string(),
        recipient: seller.clone(),
        amount: price,
    })?;
    let transfer = SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: collection.to_string(),
            msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
                recipient: info.sender.to_string(),
                token_id: token_id.clone(),
            })?,
            funds: vec![],
        },
        SALE_REPLY,
    );

    Ok(Response::new()
        .add_attribute("action", "buy_with_fungible")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("seller", seller)
        .add_attribute("buyer", info.sender)
        .add_message(payment)
        .add_submessage(transfer))
}

pub fn execute_accept_unique_offer(
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
    if !offers::unique_offer_exists(
        deps.storage,
        &collection,
        &token_id,
        &offered_collection,
        &offered_token_id,
    )? {
        return Err(ContractError::OfferNotFound {});
    }

    // both sides resolve to whoever holds the tokens right now
    let counterparty = guards::owner_of(&deps.querier, &offered_collection, &offered_token_id)?;

    clear_listing_state(deps.storage, &collection, &token_id)?;

    let asked = SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: collection.to_string(),
            msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
                recipient: counterparty.clone(),
                token_id: token_id.clone(),
            })?,
            funds: vec![],
        },
        BARTER_REPLY,
    );
    let offered = SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: offered_collection.to_string(),
            msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
                recipient: info.sender.to_string(),
                token_id: offered_token_id.clone(),
            })?,
            funds: vec![],
        },
        BARTER_REPLY,
    );

    Ok(Response::new()
        .add_attribute("action", "accept_unique_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("offered_collection", offered_collection)
        .add_attribute("offered_token_id", offered_token_id)
        .add_attribute("counterparty", counterparty)
        .add_submessage(asked)
        .add_submessage(offered))
}

pub fn execute_accept_fungible_offer(
    deps: DepsMut,
    info: MessageInfo,
    collection: String,
    token_id: String,
    token: String,
    offerer: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;
    let offerer = deps.api.addr_validate(&offerer)?;

    let listing = guards::load_listing(deps.storage, &collection, &token_id)?;
    guards::assert_accepts_fungible(&listing)?;
    guards::assert_owner(&deps.querier, &collection, &token_id, &info.sender)?;

    let amount = offers::load_fungible_offer(deps.storage, &collection, &token_id, &offerer, &token)?;
    // the offerer may have spent funds since the offer was made
    guards::assert_balance_covers(&deps.querier, &token, offerer.as_str(), amount)?;

    clear_listing_state(deps.storage, &collection, &token_id)?;

    let transfer = SubMsg::reply_on_success(
        WasmMsg::Execute {
            contract_addr: collection.to_string(),
            msg: to_json_binary(&Cw721ExecuteMsg::TransferNft {
                recipient: offerer.to_string(),
                token_id: token_id.clone(),
            })?,
            funds: vec![],
        },
        OFFER_REPLY,
    );
    let payment = Cw20Contract(token.clone()).call(Cw20ExecuteMsg::TransferFrom {
        owner: offerer.to_string(),
        recipient: info.sender.to_string(),
        amount,
    })?;

    Ok(Response::new()
        .add_attribute("action", "accept_fungible_offer")
        .add_attribute("collection", collection)
        .add_attribute("token_id", token_id)
        .add_attribute("token", token)
        .add_attribute("offerer", offerer)
        .add_attribute("seller", info.sender)
        .add_submessage(transfer)
        .add_message(payment))
}

/// Strict retirement order: offers, then prices, then the listing itself, so
/// no intermediate state ever shows a listing with dangling dependents.
fn clear_listing_state(
    storage: &mut dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> StdResult<()> {
    offers::clear_offers(storage, collection, token_id)?;
    prices::clear_prices(storage, collection, token_id)?;
    sales::remove_listing(storage, collection, token_id)?;
    Ok(())
}
