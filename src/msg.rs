use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::state::{OfferPermissions, TokenOffer};

#[cw_serde]
pub struct InstantiateMsg {
    pub native_denom: String,
}

#[cw_serde]
pub struct FungiblePrice {
    pub token: String,
    pub amount: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    List {
        collection: String,
        token_id: String,
        permissions: OfferPermissions,
    },
    Unlist {
        collection: String,
        token_id: String,
    },
    SetNativePrice {
        collection: String,
        token_id: String,
        amount: Uint128,
    },
    RemoveNativePrice {
        collection: String,
        token_id: String,
    },
    AddFungiblePrices {
        collection: String,
        token_id: String,
        prices: Vec<FungiblePrice>,
    },
    AddFungiblePrice {
        collection: String,
        token_id: String,
        token: String,
        amount: Uint128,
    },
    ChangeFungiblePrice {
        collection: String,
        token_id: String,
        token: String,
        amount: Uint128,
    },
    RemoveFungiblePrice {
        collection: String,
        token_id: String,
        token: String,
    },
    RemoveAllPrices {
        collection: String,
        token_id: String,
    },
    MakeUniqueOffer {
        collection: String,
        token_id: String,
        offered_collection: String,
        offered_token_id: String,
    },
    RemoveUniqueOffer {
        collection: String,
        token_id: String,
        offered_collection: String,
        offered_token_id: String,
    },
    MakeFungibleOffer {
        collection: String,
        token_id: String,
        token: String,
        amount: Uint128,
    },
    RemoveFungibleOffer {
        collection: String,
        token_id: String,
        token: String,
    },
    MakeNativeOffer {
        collection: String,
        token_id: String,
        amount: Uint128,
    },
    RemoveNativeOffer {
        collection: String,
        token_id: String,
    },
    RejectUniqueOffer {
        collection: String,
        token_id: String,
        offered_collection: String,
        offered_token_id: String,
    },
    RejectFungibleOffer {
        collection: String,
        token_id: String,
        offerer: String,
        token: String,
    },
    RejectNativeOffer {
        collection: String,
        token_id: String,
        offerer: String,
    },
    BuyWithNative {
        collection: String,
        token_id: String,
    },
    BuyWithFungible {
        collection: String,
        token_id: String,
        token: String,
    },
    AcceptUniqueOffer {
        collection: String,
        token_id: String,
        offered_collection: String,
        offered_token_id: String,
    },
    AcceptFungibleOffer {
        collection: String,
        token_id: String,
        token: String,
        offerer: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(bool)]
    IsListed { collection: String, token_id: String },
    #[returns(ListingResponse)]
    GetListing { collection: String, token_id: String },
    #[returns(Vec<ListingResponse>)]
    GetAllListings {
        from_index: Option<u64>,
        limit: Option<u64>,
    },
    #[returns(u128)]
    GetListingCount {},
    #[returns(Option<Uint128>)]
    GetNativePrice { collection: String, token_id: String },
    #[returns(Option<Uint128>)]
    GetFungiblePrice {
        collection: String,
        token_id: String,
        token: String,
    },
    #[returns(Vec<FungiblePriceResponse>)]
    GetFungiblePrices { collection: String, token_id: String },
    #[returns(Vec<Addr>)]
    GetOfferedCollections { collection: String, token_id: String },
    #[returns(Vec<UniqueOfferResponse>)]
    GetUniqueOffers {
        collection: String,
        token_id: String,
        offered_collection: String,
    },
    #[returns(Vec<Addr>)]
    GetFungibleOfferers { collection: String, token_id: String },
    #[returns(Vec<TokenOffer>)]
    GetFungibleOffers {
        collection: String,
        token_id: String,
        offerer: String,
    },
    #[returns(Vec<NativeOfferResponse>)]
    GetNativeOffers { collection: String, token_id: String },
}

#[cw_serde]
pub struct ListingResponse {
    pub collection: Addr,
    pub token_id: String,
    pub permissions: OfferPermissions,
}

#[cw_serde]
pub struct FungiblePriceResponse {
    pub token: Addr,
    pub amount: Uint128,
}

#[cw_serde]
pub struct UniqueOfferResponse {
    pub token_id: String,
    pub offerer: Addr,
}

#[cw_serde]
pub struct NativeOfferResponse {
    pub offerer: Addr,
    pub amount: Uint128,
}

#[cw_serde]
pub struct MigrateMsg {}
