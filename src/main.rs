use rocket::Config;
use tracing_subscriber::EnvFilter;

use std::error::Error;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    hackboard::build_rocket(Config::figment())?.launch().await?;

    Ok(())
}
