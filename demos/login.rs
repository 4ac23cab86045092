//! Walks through a login from the terminal.
//!
//! Open the printed URL, log in, then paste the full URL Steam redirected you to.
use std::io::BufRead;
use log::LevelFilter;
use steam_login::{CallbackParams, LoginSession, RequestContext, SteamLoginConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    simple_logging::log_to_stderr(LevelFilter::Debug);

    let site_root = std::env::var("SITE_ROOT").unwrap_or_else(|_| "http://localhost:8080".into());
    let config = SteamLoginConfig::from_env()?;
    let context = RequestContext::new(&site_root)?;
    let mut session = LoginSession::builder(context.clone())
        .config(config.clone())
        .build();
    let login_url = session.start_login("/")?;

    println!("Log in at:\n{login_url}\n\nPaste the URL Steam sent you back to:");

    let mut line = String::new();

    std::io::stdin().lock().read_line(&mut line)?;

    let callback = url::Url::parse(line.trim())?;
    let params = CallbackParams::from_query(callback.query().unwrap_or_default());
    let mut session = LoginSession::builder(context)
        .config(config)
        .build();
    let user = session.complete_login(&params).await?;

    println!("{}", serde_json::to_string_pretty(&user)?);
    println!("Returning to {}", session.resume_original_page());

    Ok(())
}
