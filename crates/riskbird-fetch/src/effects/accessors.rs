//! Named per-category shorthands for [`Client::fetch_page`] and
//! [`Client::fetch_all`].

use serde_json::Value;

use super::client::Client;
use super::http::HttpClient;
use crate::data::{Category, Page};
use crate::error::Result;

macro_rules! category_accessors {
    ($($category:ident => $page:ident, $all:ident;)*) => {
        impl<C: HttpClient> Client<C> {
            $(
                #[doc = concat!("One page of [`Category::", stringify!($category), "`] records.")]
                pub async fn $page(&self, entity: &str, page: u32) -> Result<Page> {
                    self.fetch_page(entity, page, Category::$category).await
                }

                #[doc = concat!("Every [`Category::", stringify!($category), "`] record.")]
                pub async fn $all(&self, entity: &str) -> Result<Vec<Value>> {
                    self.fetch_all(entity, Category::$category).await
                }
            )*
        }
    };
}

category_accessors! {
    PropertyIcp => icp_info, all_icp_info;
    PropertyApp => app_info, all_app_info;
    PropertyMiniprogram => wx_app_info, all_wx_app_info;
    PropertyJob => job_info, all_job_info;
    PropertyCopyright => copyright_info, all_copyright_info;
    CompanyInvest => invest_info, all_invest_info;
    PropertyBranch => branch_info, all_branch_info;
    PropertyPartner => partner_info, all_partner_info;
}
