//! Typed views over the provider's raw record documents.
//!
//! The provider is loose about scalar types: the same field may arrive as a
//! string, a number or `null`. Scalar fields are therefore read leniently and
//! missing fields default to empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::category::Category;

/// A record type listed under a specific [`Category`].
pub trait CategoryRecord: DeserializeOwned {
    const CATEGORY: Category;
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// Registration profile of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub ent_name: String,
    /// Legal representative.
    #[serde(deserialize_with = "lenient_string")]
    pub person_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ent_status: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub tel_list: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub email_list: Vec<String>,
    /// Registered capital.
    #[serde(deserialize_with = "lenient_string")]
    pub rec_concat: String,
    /// Date of establishment.
    #[serde(deserialize_with = "lenient_string")]
    pub es_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub yr_address: String,
    /// Business scope.
    #[serde(deserialize_with = "lenient_string")]
    pub op_scope: String,
    /// Unified social credit code.
    #[serde(deserialize_with = "lenient_string")]
    pub uniscid: String,
    #[serde(rename = "entid", deserialize_with = "lenient_string")]
    pub ent_id: String,
    /// Session token issued alongside the profile.
    #[serde(deserialize_with = "lenient_string")]
    pub order_no: String,
}

/// Decoded entity-info response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub order_no: String,
    pub profile: CompanyInfo,
    /// Per-category record counts, as the provider reports them.
    pub counts: Value,
}

/// One hit of a keyword search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(rename = "ENTNAME", deserialize_with = "lenient_string")]
    pub ent_name: String,
    /// Legal representative.
    #[serde(rename = "faren", deserialize_with = "lenient_string")]
    pub legal_person: String,
    #[serde(rename = "ENTSTATUS", deserialize_with = "lenient_string")]
    pub ent_status: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub tels: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub emails: Vec<String>,
    #[serde(rename = "regConcat", deserialize_with = "lenient_string")]
    pub reg_concat: String,
    #[serde(rename = "esDate", deserialize_with = "lenient_string")]
    pub es_date: String,
    /// Registered address.
    #[serde(rename = "dom", deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(rename = "UNISCID", deserialize_with = "lenient_string")]
    pub uniscid: String,
    #[serde(rename = "entid", deserialize_with = "lenient_string")]
    pub ent_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcpInfo {
    #[serde(rename = "webname", deserialize_with = "lenient_string")]
    pub web_name: String,
    #[serde(rename = "hostname", deserialize_with = "lenient_string")]
    pub host_name: String,
    /// Filing or licence number.
    #[serde(rename = "icpnum", deserialize_with = "lenient_string")]
    pub icp_num: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    #[serde(rename = "appname", deserialize_with = "lenient_string")]
    pub app_name: String,
    #[serde(rename = "updateDateAndroid", deserialize_with = "lenient_string")]
    pub update_date_android: String,
    #[serde(deserialize_with = "lenient_string")]
    pub brief: String,
    #[serde(rename = "iconUrl", deserialize_with = "lenient_string")]
    pub icon_url: String,
    #[serde(rename = "downloadCountLevel", deserialize_with = "lenient_string")]
    pub download_count_level: String,
}

/// WeChat mini program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WxAppInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "cate", deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub logo: String,
    #[serde(rename = "qrcode", deserialize_with = "lenient_string")]
    pub qr_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(deserialize_with = "lenient_string")]
    pub education: String,
    #[serde(deserialize_with = "lenient_string")]
    pub region: String,
    #[serde(rename = "pdate", deserialize_with = "lenient_string")]
    pub published: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyrightInfo {
    #[serde(rename = "sname", deserialize_with = "lenient_string")]
    pub software_name: String,
    #[serde(rename = "snum", deserialize_with = "lenient_string")]
    pub registration_num: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub ent_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub person_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ent_status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub funder_ratio: String,
    #[serde(rename = "entid", deserialize_with = "lenient_string")]
    pub ent_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BranchInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub br_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub br_principal: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ent_status: String,
    #[serde(rename = "entid", deserialize_with = "lenient_string")]
    pub ent_id: String,
}

/// Shareholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartnerInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub sha_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub funded_ratio: String,
    /// Subscribed capital contribution.
    #[serde(deserialize_with = "lenient_string")]
    pub sub_con_am: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sha_id: String,
}

impl CategoryRecord for IcpInfo {
    const CATEGORY: Category = Category::PropertyIcp;
}

impl CategoryRecord for AppInfo {
    const CATEGORY: Category = Category::PropertyApp;
}

impl CategoryRecord for WxAppInfo {
    const CATEGORY: Category = Category::PropertyMiniprogram;
}

impl CategoryRecord for JobInfo {
    const CATEGORY: Category = Category::PropertyJob;
}

impl CategoryRecord for CopyrightInfo {
    const CATEGORY: Category = Category::PropertyCopyright;
}

impl CategoryRecord for InvestInfo {
    const CATEGORY: Category = Category::CompanyInvest;
}

impl CategoryRecord for BranchInfo {
    const CATEGORY: Category = Category::PropertyBranch;
}

impl CategoryRecord for PartnerInfo {
    const CATEGORY: Category = Category::PropertyPartner;
}
