use super::client::Client;
use super::http::HttpClient;
use crate::core::{ApiRequest, Endpoint, category_page_body, decode_category_page};
use crate::data::{Category, Page};
use crate::error::Result;

impl<C: HttpClient> Client<C> {
    /// Fetch page `page` (1-based) of `category` for `entity`.
    ///
    /// Resolves a session token first, then requests one page of
    /// [`ClientConfig::page_size`](crate::ClientConfig) records.
    pub async fn fetch_page(&self, entity: &str, page: u32, category: Category) -> Result<Page> {
        let order_no = self.resolve_session(entity).await?;
        let size = self.config.page_size.max(1);

        let request = ApiRequest::post(
            Endpoint::CategoryList.url(self.config.base()),
            category_page_body(&order_no, category, page, size),
        );
        let body = self.transport.send(&request).await?;

        decode_category_page(&body, page, size)
    }
}
