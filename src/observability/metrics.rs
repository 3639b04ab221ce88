//! Metrics collection.
//!
//! # Metrics
//! - `chain_api_configure_total` (counter): configurations stored
//! - `chain_api_create_total` (counter): `create` calls by outcome
//! - `chain_api_rpc_requests_total` (counter): RPC calls by method, outcome
//! - `chain_api_rpc_health` (gauge): 1=reachable, 0=unreachable

use metrics::{counter, gauge};

pub fn record_configure() {
    counter!("chain_api_configure_total").increment(1);
}

pub fn record_create(outcome: &'static str) {
    counter!("chain_api_create_total", "outcome" => outcome).increment(1);
}

pub fn record_rpc(method: &'static str, outcome: &'static str) {
    counter!("chain_api_rpc_requests_total", "method" => method, "outcome" => outcome).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    gauge!("chain_api_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
