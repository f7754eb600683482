use socket_relay::{RelayClient, RelayClientOptions, RetryPolicy, SystemEvent};
use std::time::Duration;

/// Watch the retry loop in action: start this against a local server, kill
/// the server, then bring it back.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let url = std::env::var("RELAY_URL").unwrap_or_else(|_| "ws://127.0.0.1:9000".to_string());

    let client = RelayClient::new(
        url,
        RelayClientOptions {
            retry: RetryPolicy {
                delay: Duration::from_secs(1),
                ..Default::default()
            },
            ..Default::default()
        },
    )?;

    client
        .on(SystemEvent::Disconnect, |reason| {
            println!("link dropped: {reason}")
        })
        .await;
    client
        .on(SystemEvent::ReconnectAttempt, |attempt| {
            println!("retrying (attempt {attempt})")
        })
        .await;
    client
        .on(SystemEvent::Connect, |_| println!("link up"))
        .await;

    client.connect().await;

    println!("Monitoring for 30 seconds - interrupt the server to see the retry loop\n");
    for second in 1..=30 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let status = if client.is_connected().await {
            "connected"
        } else {
            "disconnected"
        };
        println!("{second:>2}s  {status}");
    }

    client.disconnect().await;
    Ok(())
}
