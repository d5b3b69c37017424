//! Immutable data types for RiskBird retrieval.
//!
//! This module contains the configuration and policy types, the category
//! keys, the page shape returned by the provider, and the typed records that
//! raw provider documents can be mapped into. None of these types perform I/O.

pub mod category;
pub mod config;
pub mod page;
pub mod records;

pub use category::Category;
pub use config::{AbsorbPolicy, Backoff, ClientConfig, RetryPolicy, SessionPolicy};
pub use page::Page;
pub use records::{
    AppInfo, BranchInfo, CategoryRecord, CompanyInfo, CopyrightInfo, EntityInfo, IcpInfo,
    InvestInfo, JobInfo, PartnerInfo, SearchResult, WxAppInfo,
};
