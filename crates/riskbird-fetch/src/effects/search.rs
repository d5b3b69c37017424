use super::client::Client;
use super::http::HttpClient;
use crate::core::{ApiRequest, Drain, DrainStep, Endpoint, decode_search_page, search_page_body};
use crate::data::SearchResult;
use crate::error::{Error, Result};

impl<C: HttpClient> Client<C> {
    /// Every entity matching `keyword`, across all result pages.
    ///
    /// Unlike category queries, an empty first page is an error
    /// ([`Error::KeywordNotFound`]). Hits that do not decode as a
    /// [`SearchResult`] are logged and skipped.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let url = Endpoint::Search.url(self.config.base());
        let mut drain = Drain::new();

        loop {
            let number = drain.page();
            let request = ApiRequest::post(url.clone(), search_page_body(keyword, number));
            let page = decode_search_page(&self.transport.send(&request).await?, number)?;

            match drain.accept(page) {
                DrainStep::Next(_) => self.pause().await,
                DrainStep::Done => break,
                DrainStep::Empty => return Err(Error::KeywordNotFound(keyword.to_string())),
            }
        }

        let results = drain
            .into_records()
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<SearchResult>(item) {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!(keyword, error = %e, "skipping malformed search result");
                    None
                }
            })
            .collect();

        Ok(results)
    }
}
