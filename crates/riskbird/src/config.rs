use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use riskbird_fetch::ClientConfig;

use crate::cli::Cli;

const ENV_PREFIX: &str = "RISKBIRD_";
const DEFAULT_CONFIG_FILE: &str = "riskbird.toml";

/// The configuration file to read: an explicit `--config` path must exist,
/// the default one is optional.
fn config_file(cli: &Cli) -> anyhow::Result<&Path> {
    match &cli.config {
        Some(path) if !path.is_file() => bail!("config file {} not found", path.display()),
        Some(path) => Ok(path),
        None => Ok(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

/// Layered configuration: defaults, then the TOML file, then `RISKBIRD_*`
/// variables (`__` separates nested keys).
pub fn figment(cli: &Cli) -> anyhow::Result<Figment> {
    Ok(Figment::from(Serialized::defaults(ClientConfig::default()))
        .merge(Toml::file(config_file(cli)?))
        .merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// Resolve the client configuration, command-line flags winning last.
pub fn load(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config: ClientConfig = figment(cli)?
        .extract()
        .context("invalid configuration")?;

    if let Some(cookie) = &cli.cookie {
        config = config.cookie(cookie);
    }
    if let Some(proxy) = &cli.proxy {
        config = config.proxy(proxy);
    }
    if let Some(user_agent) = &cli.user_agent {
        config = config.user_agent(user_agent);
    }
    if let Some(delay) = cli.delay {
        config = config.delay_secs(delay);
    }
    if let Some(timeout) = cli.timeout {
        config = config.timeout_minutes(timeout);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use figment::Jail;
    use riskbird_fetch::{Backoff, SessionPolicy};

    fn parse(flags: &[&str]) -> Cli {
        let mut args = vec!["riskbird"];
        args.extend_from_slice(flags);
        args.extend(["info", "E1"]);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_| {
            let config = load(&parse(&[])).unwrap();
            assert_eq!(config, ClientConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_then_flags() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "riskbird.toml",
                r#"
                    cookie = "from-file"
                    delay_secs = 3
                    proxy = "http://file:8080"

                    [retry]
                    max_retries = 4
                    backoff = "linear"

                    [session]
                    mode = "cache"
                    ttl_secs = 120
                "#,
            )?;
            jail.set_env("RISKBIRD_DELAY_SECS", "7");
            jail.set_env("RISKBIRD_RETRY__COOLDOWN_SECS", "9");

            let config = load(&parse(&["--cookie", "from-flag"])).unwrap();

            assert_eq!(config.cookie.as_deref(), Some("from-flag"));
            assert_eq!(config.proxy.as_deref(), Some("http://file:8080"));
            assert_eq!(config.delay_secs, 7);
            assert_eq!(config.retry.max_retries, Some(4));
            assert_eq!(config.retry.cooldown_secs, 9);
            assert_eq!(config.retry.backoff, Backoff::Linear);
            assert_eq!(config.session, SessionPolicy::Cache { ttl_secs: 120 });
            Ok(())
        });
    }

    #[test]
    fn explicit_config_path() {
        Jail::expect_with(|jail| {
            jail.create_file("other.toml", "timeout_minutes = 0")?;
            let config = load(&parse(&["--config", "other.toml", "--delay", "0"])).unwrap();
            assert_eq!(config.timeout(), None);
            assert_eq!(config.delay_secs, 0);
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        Jail::expect_with(|_| {
            let err = load(&parse(&["--config", "typo.toml"])).unwrap_err();
            assert!(err.to_string().contains("typo.toml"), "{err}");
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("riskbird.toml", "delay_secs = \"soon\"")?;
            assert!(load(&parse(&[])).is_err());
            Ok(())
        });
    }
}
