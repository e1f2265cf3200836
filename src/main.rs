// chirpstack-client - demonstration entry point
//
// Loads chirpstack_config.json, constructs the client, fetches the
// configured device and lists the application's devices. Configuration
// failure is fatal; operation failures print the error envelope.

use anyhow::Result;
use std::path::Path;

use chirpstack_client::config::load_config;
use chirpstack_client::types::DEFAULT_PAGE_SIZE;
use chirpstack_client::DeviceApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config_path = std::env::var("CHIRPSTACK_CLIENT_CONFIG")
        .unwrap_or_else(|_| "chirpstack_config.json".to_string());
    let config = load_config(Path::new(&config_path))?;
    println!("Configuration loaded from {config_path}");

    let client = DeviceApiClient::new(&config)?;

    println!("\nGetting device {}...", config.device_eui);
    match client.get_device(&config.device_eui).await {
        Ok(device) => println!("Device: {device:?}"),
        Err(err) => eprintln!("Failed to get device: {err}"),
    }

    println!("\nListing devices in application {}...", config.application_id);
    match client
        .list_devices(&config.application_id, DEFAULT_PAGE_SIZE, 0)
        .await
    {
        Ok(page) => {
            println!("{} devices total", page.total_count);
            for item in &page.result {
                println!("  {}  {}", item.dev_eui, item.name);
            }
        }
        Err(err) => eprintln!("Failed to list devices: {err}"),
    }

    Ok(())
}
