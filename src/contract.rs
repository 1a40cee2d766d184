#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Reply, Response,
    StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use semver::Version;

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, FungiblePriceResponse, InstantiateMsg, ListingResponse, MigrateMsg,
    NativeOfferResponse, QueryMsg, UniqueOfferResponse,
};
use crate::state::{
    Config, TokenOffer, CONFIG, FUNGIBLE_OFFERS, FUNGIBLE_PRICES, LISTINGS, LISTING_COUNTER,
    NATIVE_OFFERS, NATIVE_PRICES, UNIQUE_OFFERS,
};
use crate::{offers, prices, sales, settlement};

pub const CONTRACT_NAME: &str = "crates.io:cw-trading-post";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SALE_REPLY: u64 = 1;
pub const BARTER_REPLY: u64 = 2;
pub const OFFER_REPLY: u64 = 3;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        native_denom: msg.native_denom,
    };
    CONFIG.save(deps.storage, &config)?;
    LISTING_COUNTER.save(deps.storage, &0u128)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("native_denom", config.native_denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::List {
            collection,
            token_id,
            permissions,
        } => sales::execute_list(deps, env, info, collection, token_id, permissions),
        ExecuteMsg::Unlist {
            collection,
            token_id,
        } => sales::execute_unlist(deps, info, collection, token_id),
        ExecuteMsg::SetNativePrice {
            collection,
            token_id,
            amount,
        } => prices::execute_set_native_price(deps, info, collection, token_id, amount),
        ExecuteMsg::RemoveNativePrice {
            collection,
            token_id,
        } => prices::execute_remove_native_price(deps, info, collection, token_id),
        ExecuteMsg::AddFungiblePrices {
            collection,
            token_id,
            prices,
        } => prices::execute_add_fungible_prices(deps, info, collection, token_id, prices),
        ExecuteMsg::AddFungiblePrice {
            collection,
            token_id,
            token,
            amount,
        } => prices::execute_add_fungible_price(deps, info, collection, token_id, token, amount),
        ExecuteMsg::ChangeFungiblePrice {
            collection,
            token_id,
            token,
            amount,
        } => prices::execute_change_fungible_price(deps, info, collection, token_id, token, amount),
        ExecuteMsg::RemoveFungiblePrice {
            collection,
            token_id,
            token,
        } => prices::execute_remove_fungible_price(deps, info, collection, token_id, token),
        ExecuteMsg::RemoveAllPrices {
            collection,
            token_id,
        } => prices::execute_remove_all_prices(deps, info, collection, token_id),
        ExecuteMsg::MakeUniqueOffer {
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        } => offers::execute_make_unique_offer(
            deps,
            env,
            info,
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        ),
        ExecuteMsg::RemoveUniqueOffer {
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        } => offers::execute_remove_unique_offer(
            deps,
            info,
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        ),
        ExecuteMsg::MakeFungibleOffer {
            collection,
            token_id,
            token,
            amount,
        } => offers::execute_make_fungible_offer(deps, env, info, collection, token_id, token, amount),
        ExecuteMsg::RemoveFungibleOffer {
            collection,
            token_id,
            token,
        } => offers::execute_remove_fungible_offer(deps, info, collection, token_id, token),
        ExecuteMsg::MakeNativeOffer {
            collection,
            token_id,
            amount,
        } => offers::execute_make_native_offer(deps, info, collection, token_id, amount),
        ExecuteMsg::RemoveNativeOffer {
            collection,
            token_id,
        } => offers::execute_remove_native_offer(deps, info, collection, token_id),
        ExecuteMsg::RejectUniqueOffer {
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        } => offers::execute_reject_unique_offer(
            deps,
            info,
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        ),
        ExecuteMsg::RejectFungibleOffer {
            collection,
            token_id,
            offerer,
            token,
        } => offers::execute_reject_fungible_offer(deps, info, collection, token_id, offerer, token),
        ExecuteMsg::RejectNativeOffer {
            collection,
            token_id,
            offerer,
        } => offers::execute_reject_native_offer(deps, info, collection, token_id, offerer),
        ExecuteMsg::BuyWithNative {
            collection,
            token_id,
        } => settlement::execute_buy_with_native(deps, info, collection, token_id),
        ExecuteMsg::BuyWithFungible {
            collection,
            token_id,
            token,
        } => settlement::execute_buy_with_fungible(deps, env, info, collection, token_id, token),
        ExecuteMsg::AcceptUniqueOffer {
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        } => settlement::execute_accept_unique_offer(
            deps,
            info,
            collection,
            token_id,
            offered_collection,
            offered_token_id,
        ),
        ExecuteMsg::AcceptFungibleOffer {
            collection,
            token_id,
            token,
            offerer,
        } => settlement::execute_accept_fungible_offer(
            deps, info, collection, token_id, token, offerer,
        ),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, reply: Reply) -> Result<Response, ContractError> {
    match reply.id {
        SALE_REPLY => Ok(Response::new().add_attribute("operation", "token sold")),
        BARTER_REPLY => Ok(Response::new().add_attribute("operation", "tokens bartered")),
        OFFER_REPLY => Ok(Response::new().add_attribute("operation", "offer settled")),
        _ => Err(ContractError::UnrecognizedReply {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::CannotMigrate {
            previous_contract: stored.contract,
        });
    }
    let version: Version = CONTRACT_VERSION.parse()?;
    let stored_version: Version = stored.version.parse()?;
    if stored_version >= version {
        return Err(ContractError::CannotMigrateVersion {
            previous_version: stored.version,
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsListed {
            collection,
            token_id,
        } => to_json_binary(&get_is_listed(deps, collection, token_id)?),
        QueryMsg::GetListing {
            collection,
            token_id,
        } => to_json_binary(&get_listing(deps, collection, token_id)?),
        QueryMsg::GetAllListings { from_index, limit } => {
            to_json_binary(&get_all_listings(deps, from_index, limit)?)
        }
        QueryMsg::GetListingCount {} => to_json_binary(&get_listing_count(deps)?),
        QueryMsg::GetNativePrice {
            collection,
            token_id,
        } => to_json_binary(&get_native_price(deps, collection, token_id)?),
        QueryMsg::GetFungiblePrice {
            collection,
            token_id,
            token,
        } => to_json_binary(&get_fungible_price(deps, collection, token_id, token)?),
        QueryMsg::GetFungiblePrices {
            collection,
            token_id,
        } => to_json_binary(&get_fungible_prices(deps, collection, token_id)?),
        QueryMsg::GetOfferedCollections {
            collection,
            token_id,
        } => to_json_binary(&get_offered_collections(deps, collection, token_id)?),
        QueryMsg::GetUniqueOffers {
            collection,
            token_id,
            offered_collection,
        } => to_json_binary(&get_unique_offers(deps, collection, token_id, offered_collection)?),
        QueryMsg::GetFungibleOfferers {
            collection,
            token_id,
        } => to_json_binary(&get_fungible_offerers(deps, collection, token_id)?),
        QueryMsg::GetFungibleOffers {
            collection,
            token_id,
            offerer,
        } => to_json_binary(&get_fungible_offers(deps, collection, token_id, offerer)?),
        QueryMsg::GetNativeOffers {
            collection,
            token_id,
        } => to_json_binary(&get_native_offers(deps, collection, token_id)?),
    }
}

pub fn get_is_listed(deps: Deps, collection: String, token_id: String) -> StdResult<bool> {
    let collection = deps.api.addr_validate(&collection)?;
    Ok(LISTINGS.has(deps.storage, (collection, token_id)))
}

pub fn get_listing(deps: Deps, collection: String, token_id: String) -> StdResult<ListingResponse> {
    let collection = deps.api.addr_validate(&collection)?;
    let listing = LISTINGS.load(deps.storage, (collection.clone(), token_id.clone()))?;
    Ok(ListingResponse {
        collection,
        token_id,
        permissions: listing.permissions,
    })
}

pub fn get_all_listings(
    deps: Deps,
    from_index: Option<u64>,
    limit: Option<u64>,
) -> StdResult<Vec<ListingResponse>> {
    let from_index = from_index.unwrap_or(0);
    let limit = limit.unwrap_or(10);

    LISTINGS
        .range(deps.storage, None, None, Order::Ascending)
        .skip(from_index as usize)
        .take(limit as usize)
        .map(|item| {
            item.map(|((collection, token_id), listing)| ListingResponse {
                collection,
                token_id,
                permissions: listing.permissions,
            })
        })
        .collect()
}

pub fn get_listing_count(deps: Deps) -> StdResult<u128> {
    LISTING_COUNTER.load(deps.storage)
}

pub fn get_native_price(
    deps: Deps,
    collection: String,
    token_id: String,
) -> StdResult<Option<Uint128>> {
    let collection = deps.api.addr_validate(&collection)?;
    NATIVE_PRICES.may_load(deps.storage, (collection, token_id))
}

pub fn get_fungible_price(
    deps: Deps,
    collection: String,
    token_id: String,
    token: String,
) -> StdResult<Option<Uint128>> {
    let collection = deps.api.addr_validate(&collection)?;
    let token = deps.api.addr_validate(&token)?;
    FUNGIBLE_PRICES.may_load(deps.storage, (collection, token_id, token))
}

pub fn get_fungible_prices(
    deps: Deps,
    collection: String,
    token_id: String,
) -> StdResult<Vec<FungiblePriceResponse>> {
    let collection = deps.api.addr_validate(&collection)?;
    FUNGIBLE_PRICES
        .prefix((collection, token_id))
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(token, amount)| FungiblePriceResponse { token, amount }))
        .collect()
}

pub fn get_offered_collections(
    deps: Deps,
    collection: String,
    token_id: String,
) -> StdResult<Vec<Addr>> {
    let collection = deps.api.addr_validate(&collection)?;
    UNIQUE_OFFERS
        .prefix((collection, token_id))
        .keys(deps.storage, None, None, Order::Ascending)
        .collect()
}

pub fn get_unique_offers(
    deps: Deps,
    collection: String,
    token_id: String,
    offered_collection: String,
) -> StdResult<Vec<UniqueOfferResponse>> {
    let collection = deps.api.addr_validate(&collection)?;
    let offered_collection = deps.api.addr_validate(&offered_collection)?;
    let entries = UNIQUE_OFFERS
        .may_load(deps.storage, (collection, token_id, offered_collection))?
        .unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|offer| UniqueOfferResponse {
            token_id: offer.token_id,
            offerer: offer.offerer,
        })
        .collect())
}

pub fn get_fungible_offerers(
    deps: Deps,
    collection: String,
    token_id: String,
) -> StdResult<Vec<Addr>> {
    let collection = deps.api.addr_validate(&collection)?;
    FUNGIBLE_OFFERS
        .prefix((collection, token_id))
        .keys(deps.storage, None, None, Order::Ascending)
        .collect()
}

pub fn get_fungible_offers(
    deps: Deps,
    collection: String,
    token_id: String,
    offerer: String,
) -> StdResult<Vec<TokenOffer>> {
    let collection = deps.api.addr_validate(&collection)?;
    let offerer = deps.api.addr_validate(&offerer)?;
    Ok(FUNGIBLE_OFFERS
        .may_load(deps.storage, (collection, token_id, offerer))?
        .unwrap_or_default())
}

pub fn get_native_offers(
    deps: Deps,
    collection: String,
    token_id: String,
) -> StdResult<Vec<NativeOfferResponse>> {
    let collection = deps.api.addr_validate(&collection)?;
    NATIVE_OFFERS
        .prefix((collection, token_id))
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(offerer, amount)| NativeOfferResponse { offerer, amount }))
        .collect()
}
