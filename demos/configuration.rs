//! Configuration example
//!
//! This example demonstrates various ways to configure the session manager,
//! including loading from environment variables and configuration files.

use instagram_web_session::{ConfigLoader, Settings};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt().init();

    println!("Instagram Web Session - Configuration Examples");
    println!("==============================================");

    // Example 1: Default configuration
    println!("\n1. Default Configuration:");
    let default_settings = Settings::default();
    println!("   Base URL: {}", default_settings.endpoints.base_url);
    println!(
        "   Settling delay: {} ms",
        default_settings.pacing.settle_delay_ms
    );
    println!(
        "   Request timeout: {} seconds",
        default_settings.http.request_timeout
    );

    // Example 2: Environment variable configuration
    println!("\n2. Environment Variable Configuration:");

    unsafe {
        env::set_var("IG_SETTLE_DELAY_MS", "500");
        env::set_var("IG_REQUEST_TIMEOUT", "20");
    }

    let config_loader = ConfigLoader::new();
    let env_settings = config_loader.from_env_only()?;

    println!(
        "   Settling delay (from IG_SETTLE_DELAY_MS): {} ms",
        env_settings.pacing.settle_delay_ms
    );
    println!(
        "   Request timeout (from IG_REQUEST_TIMEOUT): {} seconds",
        env_settings.http.request_timeout
    );

    // Example 3: Configuration file
    println!("\n3. Configuration File Example:");
    let config_toml = r#"
[endpoints]
base_url = "https://www.instagram.com/"

[http]
request_timeout = 45

[pacing]
settle_delay_ms = 2000

[logging]
level = "debug"
"#;

    let file_settings: Settings = toml::from_str(config_toml)?;
    file_settings.validate()?;
    println!("   Base URL: {}", file_settings.endpoints.base_url);
    println!(
        "   Settling delay: {} ms",
        file_settings.pacing.settle_delay_ms
    );
    println!("   Log level: {}", file_settings.logging.level);

    // Example 4: Derived endpoints
    println!("\n4. Derived Endpoints:");
    println!("   Login: {}", file_settings.endpoints.login_url());
    println!("   Logout: {}", file_settings.endpoints.logout_url());
    println!("   Tag: {}", file_settings.endpoints.tag_url("sunset"));

    Ok(())
}
