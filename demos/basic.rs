use socket_relay::{RelayClient, RelayClientOptions};
use std::time::Duration;

/// Connect, listen for messages and send one.
///
/// Point RELAY_URL at any server speaking the `{event, payload}` JSON
/// envelope, e.g. `RELAY_URL=ws://localhost:9000 cargo run --example basic`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let url = std::env::var("RELAY_URL").unwrap_or_else(|_| "ws://127.0.0.1:9000".to_string());
    println!("Connecting to {url}\n");

    let client = RelayClient::new(url, RelayClientOptions::default())?;

    client
        .on("message", |payload| println!("message: {payload}"))
        .await;

    client.connect().await;
    client
        .emit("message", serde_json::json!({ "body": "hello from socket-relay" }))
        .await;

    tokio::time::sleep(Duration::from_secs(5)).await;

    client.disconnect().await;
    println!("Done.");

    Ok(())
}
