use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Accounts, Oracle, Server, Settings};

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then an optional `config.toml`
/// file, then `PAPERTRADE_*` environment variables (e.g.
/// `PAPERTRADE_ORACLE__API_KEY` overrides `oracle.api_key`).
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.bind_addr", "127.0.0.1:8080")?
        .set_default("oracle.base_url", "https://finnhub.io/api/v1")?
        .set_default("oracle.request_timeout_ms", 3000i64)?
        .set_default("accounts.initial_balance", "100000")?
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(config::Environment::with_prefix("PAPERTRADE").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_complete_without_a_config_file() {
        let settings = load_config().expect("defaults should satisfy every field");
        assert_eq!(settings.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(settings.oracle.request_timeout_ms, 3000);
        assert_eq!(settings.accounts.initial_balance, dec!(100000));
    }
}
