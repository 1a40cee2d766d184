use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub native_denom: String,
}

/// Payment kinds a seller is willing to entertain for a listed token.
#[cw_serde]
pub struct OfferPermissions {
    pub accepts_native: bool,
    pub accepts_fungible: bool,
    pub accepts_unique: bool,
}

#[cw_serde]
pub struct Listing {
    pub permissions: OfferPermissions,
}

/// A token proposed in barter against a listing. The offered collection is
/// part of the storage key; ownership is re-read from the ledger at
/// acceptance, the recorded offerer only gates removal.
#[cw_serde]
pub struct UniqueOffer {
    pub token_id: String,
    pub offerer: Addr,
}

/// One cw20 position inside an offerer's book entry. At most one per token;
/// a repeated offer replaces the amount.
#[cw_serde]
pub struct TokenOffer {
    pub token: Addr,
    pub amount: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const LISTINGS: Map<(Addr, String), Listing> = Map::new("listings"); // (collection, token_id)
pub const LISTING_COUNTER: Item<u128> = Item::new("listing_counter");

pub const NATIVE_PRICES: Map<(Addr, String), Uint128> = Map::new("native_prices"); // (collection, token_id)
pub const FUNGIBLE_PRICES: Map<(Addr, String, Addr), Uint128> = Map::new("fungible_prices"); // (collection, token_id, cw20)

pub const UNIQUE_OFFERS: Map<(Addr, String, Addr), Vec<UniqueOffer>> = Map::new("unique_offers"); // (collection, token_id, offered collection)
pub const FUNGIBLE_OFFERS: Map<(Addr, String, Addr), Vec<TokenOffer>> = Map::new("fungible_offers"); // (collection, token_id, offerer)
pub const NATIVE_OFFERS: Map<(Addr, String, Addr), Uint128> = Map::new("native_offers"); // (collection, token_id, offerer)
