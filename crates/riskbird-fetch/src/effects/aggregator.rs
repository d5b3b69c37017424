use std::collections::BTreeMap;

use serde_json::Value;

use super::client::Client;
use super::http::HttpClient;
use crate::core::{Drain, DrainStep};
use crate::data::{Category, CategoryRecord};
use crate::error::{Error, Result};

impl<C: HttpClient> Client<C> {
    /// Every record of `category` for `entity`, in provider order.
    ///
    /// Pages are drained until the reported total is reached or a short page
    /// arrives. An empty first page is an empty result, and so is an
    /// unspecified server failure on the first page when the
    /// [`AbsorbPolicy`](crate::AbsorbPolicy) covers `category`.
    pub async fn fetch_all(&self, entity: &str, category: Category) -> Result<Vec<Value>> {
        let mut drain = Drain::new();

        loop {
            let page = match self.fetch_page(entity, drain.page(), category).await {
                Ok(page) => page,
                Err(e)
                    if drain.is_first_page()
                        && e.is_server_unknown()
                        && self.config.absorb.absorbs(category) =>
                {
                    tracing::debug!(entity, %category, error = %e, "first page failed, no records");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e),
            };

            match drain.accept(page) {
                DrainStep::Next(next) => {
                    tracing::debug!(entity, %category, page = next, collected = drain.records().len(), "next page");
                    self.pause().await;
                }
                DrainStep::Done => break,
                DrainStep::Empty => return Ok(Vec::new()),
            }
        }

        let records = drain.into_records();
        tracing::debug!(entity, %category, count = records.len(), "category drained");
        Ok(records)
    }

    /// [`fetch_all`](Self::fetch_all) decoded into `R`.
    pub async fn fetch_all_as<R: CategoryRecord>(&self, entity: &str) -> Result<Vec<R>> {
        self.fetch_all(entity, R::CATEGORY)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(Error::from))
            .collect()
    }

    /// Drain several categories one after another.
    ///
    /// The first failure aborts the pass.
    pub async fn collect(
        &self,
        entity: &str,
        categories: &[Category],
    ) -> Result<BTreeMap<Category, Vec<Value>>> {
        let mut collected = BTreeMap::new();
        for &category in categories {
            let records = self.fetch_all(entity, category).await?;
            collected.insert(category, records);
        }
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::Endpoint;
    use crate::data::{AbsorbPolicy, Category, ClientConfig, IcpInfo};
    use crate::effects::RawResponse;
    use crate::effects::client::test_support::{ENTITY, category_page, client, issue_session, sent_body};
    use crate::error::Error;

    #[tokio::test]
    async fn drains_two_pages_in_provider_order() {
        let client = client(ClientConfig::default().page_size(2));
        issue_session(&client, "ORD1");
        client
            .http()
            .push(
                Endpoint::CategoryList,
                category_page(3, vec![json!({ "id": 1 }), json!({ "id": 2 })]),
            )
            .push(Endpoint::CategoryList, category_page(3, vec![json!({ "id": 3 })]));

        let records = client.fetch_all(ENTITY, Category::PropertyIcp).await.unwrap();

        assert_eq!(records, vec![json!({ "id": 1 }), json!({ "id": 2 }), json!({ "id": 3 })]);
        assert_eq!(client.http().count(Endpoint::CategoryList), 2);
        assert_eq!(client.http().count(Endpoint::EntityQuery), 2);
        assert_eq!(sent_body(&client, Endpoint::CategoryList, 0)["page"], 1);
        assert_eq!(sent_body(&client, Endpoint::CategoryList, 1)["page"], 2);
        assert_eq!(sent_body(&client, Endpoint::CategoryList, 1)["size"], 2);
    }

    #[tokio::test]
    async fn empty_first_page_never_requests_page_two() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        client.http().push(Endpoint::CategoryList, category_page(0, Vec::new()));

        let records = client.fetch_all(ENTITY, Category::PropertyJob).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(client.http().count(Endpoint::CategoryList), 1);
    }

    #[tokio::test]
    async fn inflated_total_stops_on_short_page() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        let records: Vec<_> = (0..30).map(|i| json!({ "id": i })).collect();
        client
            .http()
            .push(Endpoint::CategoryList, category_page(50, records.clone()));

        let fetched = client.fetch_all(ENTITY, Category::PropertyCopyright).await.unwrap();

        assert_eq!(fetched, records);
        assert_eq!(client.http().count(Endpoint::CategoryList), 1);
    }

    #[tokio::test]
    async fn server_error_on_first_page_is_absorbed() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        client.http().push(
            Endpoint::CategoryList,
            RawResponse::json(&json!({ "code": "50000", "msg": "未知错误" })),
        );

        let records = client.fetch_all(ENTITY, Category::PropertyBranch).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn http_500_on_first_page_is_absorbed() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        client.http().push(Endpoint::CategoryList, RawResponse::empty(500));

        assert!(client.fetch_all(ENTITY, Category::PropertyPartner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exempt_category_propagates_server_error() {
        let absorb = AbsorbPolicy::default().exempt(Category::PropertyBranch);
        let client = client(ClientConfig::default().absorb(absorb));
        issue_session(&client, "ORD1");
        client.http().push(
            Endpoint::CategoryList,
            RawResponse::json(&json!({ "code": "50000", "msg": "未知错误" })),
        );

        let err = client.fetch_all(ENTITY, Category::PropertyBranch).await.unwrap_err();
        assert!(err.is_server_unknown());
    }

    #[tokio::test]
    async fn server_error_on_later_page_propagates() {
        let client = client(ClientConfig::default().page_size(1));
        issue_session(&client, "ORD1");
        client
            .http()
            .push(Endpoint::CategoryList, category_page(2, vec![json!(1)]))
            .push(Endpoint::CategoryList, RawResponse::empty(500));

        let err = client.fetch_all(ENTITY, Category::PropertyIcp).await.unwrap_err();
        assert!(matches!(err, Error::UnknownStatus(500)));
    }

    #[tokio::test]
    async fn access_errors_are_never_absorbed() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        client.http().push(Endpoint::CategoryList, RawResponse::empty(403));

        let err = client.fetch_all(ENTITY, Category::PropertyIcp).await.unwrap_err();
        assert!(matches!(err, Error::IpBlocked));
    }

    #[tokio::test]
    async fn typed_records() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        client.http().push(
            Endpoint::CategoryList,
            category_page(
                1,
                vec![json!({ "webname": "Acme", "hostname": "acme.example", "icpnum": 7 })],
            ),
        );

        let icp: Vec<IcpInfo> = client.fetch_all_as(ENTITY).await.unwrap();
        assert_eq!(icp.len(), 1);
        assert_eq!(icp[0].web_name, "Acme");
        assert_eq!(sent_body(&client, Endpoint::CategoryList, 0)["extractType"], "propertyIcp");
    }

    #[tokio::test]
    async fn collect_keys_results_by_category() {
        let client = client(ClientConfig::default());
        issue_session(&client, "ORD1");
        client
            .http()
            .push(Endpoint::CategoryList, category_page(1, vec![json!({ "a": 1 })]))
            .push(Endpoint::CategoryList, category_page(0, Vec::new()));

        let collected = client
            .collect(ENTITY, &[Category::PropertyApp, Category::CompanyInvest])
            .await
            .unwrap();

        assert_eq!(collected[&Category::PropertyApp], vec![json!({ "a": 1 })]);
        assert!(collected[&Category::CompanyInvest].is_empty());
    }
}
