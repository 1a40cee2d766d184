use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Version(#[from] semver::Error),

    #[error("Caller is not the current owner of the token")]
    NotOwner {},

    #[error("Token is already listed for sale")]
    AlreadyListed {},

    #[error("Token is not listed for sale")]
    NotListed {},

    #[error("The listing does not accept this kind of offer")]
    OfferTypeNotAllowed {},

    #[error("No buyout price is set for this payment kind")]
    PriceNotSet {},

    #[error("A buyout price for this token is already set")]
    PriceAlreadySet {},

    #[error("Balance {balance} does not cover the required amount {required}")]
    InsufficientBalance { balance: Uint128, required: Uint128 },

    #[error("Payment does not match the asking price {price}")]
    InsufficientPayment { price: Uint128 },

    #[error("No such offer exists for this listing")]
    OfferNotFound {},

    #[error("An identical offer already exists for this listing")]
    OfferAlreadyExists {},

    #[error("Marketplace holds no transfer approval for the token")]
    NotApproved {},

    #[error("Allowance granted to the marketplace is below the offered amount")]
    InsufficientAllowance {},

    #[error("The reply ID is unrecognized")]
    UnrecognizedReply {},

    #[error("Cannot migrate from different contract type: {previous_contract}")]
    CannotMigrate { previous_contract: String },

    #[error("Cannot migrate from unsupported version: {previous_version}")]
    CannotMigrateVersion { previous_version: String },
}
