use std::path::PathBuf;

use clap::{Parser, Subcommand};
use riskbird_fetch::Category;

#[derive(Debug, Parser)]
#[command(
    name = "riskbird",
    about = "Query the RiskBird business registry",
    version,
    after_help = "Results are printed to stdout as JSON; logs go to stderr."
)]
pub struct Cli {
    /// TOML configuration file. Must exist when given; otherwise
    /// `riskbird.toml` is read if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Cookie header copied from a logged-in browser session.
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    /// Proxy URL for every request.
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    /// Replace the built-in browser user agent.
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Seconds to wait before each request.
    #[arg(long, global = true, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Request timeout in minutes, 0 to disable.
    #[arg(long, global = true, value_name = "MINUTES")]
    pub timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search entities by keyword
    Search { keyword: String },

    /// Show the registration profile and category counts of an entity
    Info { entity: String },

    /// Fetch a single page of a category
    Page {
        entity: String,
        /// Category key or alias (icp, app, miniprogram, job, copyright, invest, branch, partner)
        category: Category,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Fetch every record of a category
    All { entity: String, category: Category },

    /// Fetch several categories, all of them when none is given
    Collect {
        entity: String,
        #[arg(long = "category", short = 'c')]
        categories: Vec<Category>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_category_alias_and_global_flags() {
        let cli = Cli::try_parse_from([
            "riskbird", "page", "E1", "icp", "--page", "3", "--cookie", "sid=1",
        ])
        .unwrap();

        assert_eq!(cli.cookie.as_deref(), Some("sid=1"));
        match cli.command {
            Command::Page { entity, category, page } => {
                assert_eq!(entity, "E1");
                assert_eq!(category, Category::PropertyIcp);
                assert_eq!(page, 3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn collect_accepts_repeated_categories() {
        let cli = Cli::try_parse_from([
            "riskbird", "collect", "E1", "-c", "job", "--category", "companyInvest",
        ])
        .unwrap();

        match cli.command {
            Command::Collect { categories, .. } => {
                assert_eq!(categories, [Category::PropertyJob, Category::CompanyInvest]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["riskbird", "all", "E1", "trademarks"]).is_err());
    }
}
