use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of ancillary record that can be listed for an entity.
///
/// Each variant maps to the `extractType` key the provider expects on the
/// company-info listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// ICP website filings.
    #[serde(rename = "propertyIcp")]
    PropertyIcp,
    /// Mobile apps.
    #[serde(rename = "propertyApp")]
    PropertyApp,
    /// WeChat mini programs.
    #[serde(rename = "propertyMiniprogram")]
    PropertyMiniprogram,
    /// Job postings.
    #[serde(rename = "propertyJob")]
    PropertyJob,
    /// Software copyrights.
    #[serde(rename = "propertyCopyright")]
    PropertyCopyright,
    /// Outbound investments.
    #[serde(rename = "companyInvest")]
    CompanyInvest,
    /// Branch offices.
    #[serde(rename = "propertyBranch")]
    PropertyBranch,
    /// Shareholders.
    #[serde(rename = "propertyPartner")]
    PropertyPartner,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::PropertyIcp,
        Category::PropertyApp,
        Category::PropertyMiniprogram,
        Category::PropertyJob,
        Category::PropertyCopyright,
        Category::CompanyInvest,
        Category::PropertyBranch,
        Category::PropertyPartner,
    ];

    /// The provider's `extractType` key.
    pub fn key(&self) -> &'static str {
        match self {
            Category::PropertyIcp => "propertyIcp",
            Category::PropertyApp => "propertyApp",
            Category::PropertyMiniprogram => "propertyMiniprogram",
            Category::PropertyJob => "propertyJob",
            Category::PropertyCopyright => "propertyCopyright",
            Category::CompanyInvest => "companyInvest",
            Category::PropertyBranch => "propertyBranch",
            Category::PropertyPartner => "propertyPartner",
        }
    }

    /// Short name accepted on the command line.
    pub fn alias(&self) -> &'static str {
        match self {
            Category::PropertyIcp => "icp",
            Category::PropertyApp => "app",
            Category::PropertyMiniprogram => "miniprogram",
            Category::PropertyJob => "job",
            Category::PropertyCopyright => "copyright",
            Category::CompanyInvest => "invest",
            Category::PropertyBranch => "branch",
            Category::PropertyPartner => "partner",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
