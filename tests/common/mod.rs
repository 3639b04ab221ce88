//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type Handler = dyn Fn(&str, &Value) -> Option<Value> + Send + Sync;

/// Start a mock JSON-RPC endpoint on an ephemeral port.
///
/// `handler` maps `(method, params)` to a result; `None` answers with a
/// "method not found" error.
pub async fn start_rpc_server<F>(handler: F) -> SocketAddr
where
    F: Fn(&str, &Value) -> Option<Value> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler: Arc<Handler> = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, handler.as_ref()).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start an endpoint that accepts connections but never answers.
#[allow(dead_code)]
pub async fn start_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Results for a local Anvil-like chain at block 7.
#[allow(dead_code)]
pub fn anvil_handler(method: &str, _params: &Value) -> Option<Value> {
    match method {
        "eth_chainId" => Some(json!("0x7a69")),
        "eth_blockNumber" => Some(json!("0x7")),
        "eth_gasPrice" => Some(json!("0x3b9aca00")),
        "eth_getBalance" => Some(json!("0xde0b6b3a7640000")),
        "eth_getTransactionCount" => Some(json!("0x2")),
        _ => None,
    }
}

/// A mined EIP-1559 transfer receipt included in `block_number`.
#[allow(dead_code)]
pub fn receipt_json(tx_hash: &str, block_number: u64, success: bool) -> Value {
    let status = if success { "0x1" } else { "0x0" };
    json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "ab".repeat(32)),
        "blockNumber": format!("0x{:x}", block_number),
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x2",
        "status": status
    })
}

async fn serve_one(mut socket: TcpStream, handler: &Handler) -> std::io::Result<()> {
    let body = read_request_body(&mut socket).await?;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or_default();
    let params = request.get("params").cloned().unwrap_or(Value::Null);

    let response = match handler(method, &params) {
        Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {} not found", method) }
        }),
    };

    let payload = response.to_string();
    let raw = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    socket.write_all(raw.as_bytes()).await?;
    socket.shutdown().await
}

async fn read_request_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let body_start = header_end + 4;
        if buf.len() >= body_start + content_length {
            return Ok(buf[body_start..body_start + content_length].to_vec());
        }
    }
}
