//! Stateless precondition checks. Ownership, approvals, balances and
//! allowances are always read live from the ledger contracts; nothing here
//! trusts a value cached at listing or offer time.

use cosmwasm_std::{Addr, QuerierWrapper, StdResult, Storage, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg};
use cw721::{ApprovalResponse, Cw721QueryMsg, OwnerOfResponse};

use crate::error::ContractError;
use crate::state::{Listing, LISTINGS};

pub fn owner_of(
    querier: &QuerierWrapper,
    collection: &Addr,
    token_id: &str,
) -> Result<String, ContractError> {
    let response: OwnerOfResponse = querier.query_wasm_smart(
        collection.to_string(),
        &Cw721QueryMsg::OwnerOf {
            token_id: token_id.to_string(),
            include_expired: Some(false),
        },
    )?;
    Ok(response.owner)
}

pub fn assert_owner(
    querier: &QuerierWrapper,
    collection: &Addr,
    token_id: &str,
    account: &Addr,
) -> Result<String, ContractError> {
    let owner = owner_of(querier, collection, token_id)?;
    if owner != account.as_str() {
        return Err(ContractError::NotOwner {});
    }
    Ok(owner)
}

/// The cw721 stand-in for issuing a transfer-authorization grant: approvals
/// come from the owner, so the engine verifies that it holds one.
pub fn assert_transfer_approval(
    querier: &QuerierWrapper,
    collection: &Addr,
    token_id: &str,
    operator: &Addr,
) -> Result<(), ContractError> {
    let approval: StdResult<ApprovalResponse> = querier.query_wasm_smart(
        collection.to_string(),
        &Cw721QueryMsg::Approval {
            token_id: token_id.to_string(),
            spender: operator.to_string(),
            include_expired: Some(false),
        },
    );
    if approval.is_err() {
        return Err(ContractError::NotApproved {});
    }
    Ok(())
}

pub fn token_balance(
    querier: &QuerierWrapper,
    token: &Addr,
    account: &str,
) -> Result<Uint128, ContractError> {
    let response: BalanceResponse = querier.query_wasm_smart(
        token.to_string(),
        &Cw20QueryMsg::Balance {
            address: account.to_string(),
        },
    )?;
    Ok(response.balance)
}

pub fn assert_balance_covers(
    querier: &QuerierWrapper,
    token: &Addr,
    account: &str,
    required: Uint128,
) -> Result<(), ContractError> {
    let balance = token_balance(querier, token, account)?;
    if balance < required {
        return Err(ContractError::InsufficientBalance { balance, required });
    }
    Ok(())
}

/// The cw20 stand-in for a fungible transfer-authorization grant.
pub fn assert_allowance_covers(
    querier: &QuerierWrapper,
    token: &Addr,
    owner: &Addr,
    spender: &Addr,
    required: Uint128,
) -> Result<(), ContractError> {
    let response: AllowanceResponse = querier.query_wasm_smart(
        token.to_string(),
        &Cw20QueryMsg::Allowance {
            owner: owner.to_string(),
            spender: spender.to_string(),
        },
    )?;
    if response.allowance < required {
        return Err(ContractError::InsufficientAllowance {});
    }
    Ok(())
}

pub fn load_listing(
    storage: &dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> Result<Listing, ContractError> {
    LISTINGS
        .may_load(storage, (collection.clone(), token_id.to_string()))?
        .ok_or(ContractError::NotListed {})
}

pub fn assert_not_listed(
    storage: &dyn Storage,
    collection: &Addr,
    token_id: &str,
) -> Result<(), ContractError> {
    if LISTINGS.has(storage, (collection.clone(), token_id.to_string())) {
        return Err(ContractError::AlreadyListed {});
    }
    Ok(())
}

pub fn assert_accepts_native(listing: &Listing) -> Result<(), ContractError> {
    if !listing.permissions.accepts_native {
        return Err(ContractError::OfferTypeNotAllowed {});
    }
    Ok(())
}

pub fn assert_accepts_fungible(listing: &Listing) -> Result<(), ContractError> {
    if !listing.permissions.accepts_fungible {
        return Err(ContractError::OfferTypeNotAllowed {});
    }
    Ok(())
}

pub fn assert_accepts_unique(listing: &Listing) -> Result<(), ContractError> {
    if !listing.permissions.accepts_unique {
        return Err(ContractError::OfferTypeNotAllowed {});
    }
    Ok(())
}
