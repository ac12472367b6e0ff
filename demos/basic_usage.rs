//! Basic usage example for the Instagram web session manager
//!
//! This example demonstrates the full session lifecycle: login, a look at
//! the session state, and logout. Credentials come from the environment so
//! the example never hardcodes them.

use instagram_web_session::{Session, Settings};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt().init();

    // Create default settings
    let settings = Settings::default();

    // Create the session
    let mut session = Session::new(settings)?;

    let username = env::var("IG_USERNAME").unwrap_or_else(|_| "myuser".to_string());
    let password = env::var("IG_PASSWORD").unwrap_or_else(|_| "secret".to_string());

    // Perform login and inspect the outcome
    match session.login(&username, &password).await {
        Ok(true) => {
            println!("Logged in as {}", username);
            println!("CSRF token: {:?}", session.csrf_token());
            println!("Cookies in jar: {}", session.cookies().len());

            let status = session.logout().await?;
            println!("Logged out (status {})", status);
        }
        Ok(false) => {
            eprintln!("Login rejected for {}", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
