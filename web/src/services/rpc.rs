//! JSON-RPC calls against the configured node

use std::sync::atomic::{AtomicU64, Ordering};

use gloo_net::http::Request;
use shared::dto::rpc::{RpcRequest, RpcResponse};
use shared::utils::{is_valid_address, parse_hex_quantity};

use crate::error::{Result, WalletError};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Balance of `address` in wei at the latest block.
pub async fn get_balance(rpc_url: &str, address: &str) -> Result<u128> {
    let request = balance_request(NEXT_ID.fetch_add(1, Ordering::Relaxed), address)?;

    let response = Request::post(rpc_url).json(&request)?.send().await?;
    if !response.ok() {
        return Err(WalletError::Rpc(format!(
            "{} returned HTTP {}",
            rpc_url,
            response.status()
        )));
    }

    let body: RpcResponse<String> = response.json().await?;
    decode_balance(body)
}

fn balance_request(id: u64, address: &str) -> Result<RpcRequest> {
    if !is_valid_address(address) {
        return Err(WalletError::Rpc(format!("not an account address: {}", address)));
    }
    Ok(RpcRequest::get_balance(id, address))
}

fn decode_balance(body: RpcResponse<String>) -> Result<u128> {
    let quantity = body
        .into_result()
        .map_err(|e| WalletError::Rpc(format!("{} ({})", e.message, e.code)))?;
    parse_hex_quantity(&quantity)
        .ok_or_else(|| WalletError::Decode(format!("invalid balance quantity {}", quantity)))
}
