//! Test-only stand-in for the external ledger contracts. Answers the cw721
//! and cw20 queries the guards issue against a plain in-memory map.

use std::collections::HashMap;

use cosmwasm_std::testing::{MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{
    from_json, to_json_binary, ContractResult, OwnedDeps, QuerierResult, SystemError, SystemResult,
    Uint128, WasmQuery,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg};
use cw721::{Approval, ApprovalResponse, Cw721QueryMsg, Expiration, OwnerOfResponse};

/// `install` snapshots the ledger into the querier; call it again after
/// mutating to simulate ownership or balance drift between operations.
#[derive(Clone, Default)]
pub struct MockLedger {
    nft_owners: HashMap<(String, String), String>,
    nft_approvals: HashMap<(String, String), String>,
    balances: HashMap<(String, String), Uint128>,
    allowances: HashMap<(String, String, String), Uint128>,
}

impl MockLedger {
    pub fn set_nft(&mut self, collection: &str, token_id: &str, owner: &str) {
        self.nft_owners
            .insert((collection.into(), token_id.into()), owner.into());
    }

    pub fn approve_nft(&mut self, collection: &str, token_id: &str, spender: &str) {
        self.nft_approvals
            .insert((collection.into(), token_id.into()), spender.into());
    }

    pub fn set_balance(&mut self, token: &str, account: &str, amount: u128) {
        self.balances
            .insert((token.into(), account.into()), Uint128::new(amount));
    }

    pub fn set_allowance(&mut self, token: &str, owner: &str, spender: &str, amount: u128) {
        self.allowances.insert(
            (token.into(), owner.into(), spender.into()),
            Uint128::new(amount),
        );
    }

    pub fn install(&self, deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier>) {
        let ledger = self.clone();
        deps.querier.update_wasm(move |query| ledger.handle(query));
    }

    fn handle(&self, query: &WasmQuery) -> QuerierResult {
        match query {
            WasmQuery::Smart { contract_addr, msg } => {
                if let Ok(nft_query) = from_json::<Cw721QueryMsg>(msg) {
                    return self.handle_nft(contract_addr, nft_query);
                }
                if let Ok(token_query) = from_json::<Cw20QueryMsg>(msg) {
                    return self.handle_token(contract_addr, token_query);
                }
                SystemResult::Err(SystemError::InvalidRequest {
                    error: "unhandled smart query".to_string(),
                    request: msg.clone(),
                })
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "non-smart wasm query".to_string(),
            }),
        }
    }

    fn handle_nft(&self, collection: &str, query: Cw721QueryMsg) -> QuerierResult {
        match query {
            Cw721QueryMsg::OwnerOf { token_id, .. } => {
                match self.nft_owners.get(&(collection.to_string(), token_id)) {
                    Some(owner) => SystemResult::Ok(ContractResult::Ok(
                        to_json_binary(&OwnerOfResponse {
                            owner: owner.clone(),
                            approvals: vec![],
                        })
                        .unwrap(),
                    )),
                    None => SystemResult::Ok(ContractResult::Err("token not found".to_string())),
                }
            }
            Cw721QueryMsg::Approval {
                token_id, spender, ..
            } => match self.nft_approvals.get(&(collection.to_string(), token_id)) {
                Some(granted) if *granted == spender => SystemResult::Ok(ContractResult::Ok(
                    to_json_binary(&ApprovalResponse {
                        approval: Approval {
                            spender,
                            expires: Expiration::Never {},
                        },
                    })
                    .unwrap(),
                )),
                _ => SystemResult::Ok(ContractResult::Err("approval not found".to_string())),
            },
            _ => SystemResult::Ok(ContractResult::Err("unsupported cw721 query".to_string())),
        }
    }

    fn handle_token(&self, token: &str, query: Cw20QueryMsg) -> QuerierResult {
        match query {
            Cw20QueryMsg::Balance { address } => {
                let balance = self
                    .balances
                    .get(&(token.to_string(), address))
                    .copied()
                    .unwrap_or_default();
                SystemResult::Ok(ContractResult::Ok(
                    to_json_binary(&BalanceResponse { balance }).unwrap(),
                ))
            }
            Cw20QueryMsg::Allowance { owner, spender } => {
                let allowance = self
                    .allowances
                    .get(&(token.to_string(), owner, spender))
                    .copied()
                    .unwrap_or_default();
                SystemResult::Ok(ContractResult::Ok(
                    to_json_binary(&AllowanceResponse {
                        allowance,
                        expires: Expiration::Never {},
                    })
                    .unwrap(),
                ))
            }
            _ => SystemResult::Ok(ContractResult::Err("unsupported cw20 query".to_string())),
        }
    }
}
