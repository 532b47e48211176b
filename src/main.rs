use anyhow::Result;
use scoped_i18n::config::Config;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load .env file (optional)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scoped_i18n=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Translating with locale '{}' and scope '{}'",
        config.locale, config.scope
    );

    if config.translation_files.is_empty() {
        warn!("I18N_FILES is empty, every key will translate to itself");
    }

    let translator = config.translator()?;

    for key in std::env::args().skip(1) {
        println!("{} => {}", key, translator.t(&key));
    }

    Ok(())
}
