use std::fmt;

use crate::data::ClientConfig;

/// Records requested per category page.
pub const CATEGORY_PAGE_SIZE: u32 = 100;

/// Hits requested per search page.
pub const SEARCH_PAGE_SIZE: u32 = 10;

const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.6367.60 Safari/537.36";

const SIGNATURE_HEADER: (&str, &str) = ("Xs-Content-Type", "application/json");

/// Provider endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /api/ent/query?entId=<id>`: entity profile and session token.
    EntityQuery,
    /// `POST /riskbird-api/companyInfo/list`: one page of a category.
    CategoryList,
    /// `POST /riskbird-api/newSearch`: one page of keyword hits.
    Search,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::EntityQuery, Endpoint::CategoryList, Endpoint::Search];

    /// The endpoint a request URL targets.
    pub fn of(url: &str) -> Option<Endpoint> {
        Endpoint::ALL.into_iter().find(|e| url.contains(e.path()))
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::EntityQuery => "/api/ent/query",
            Endpoint::CategoryList => "/riskbird-api/companyInfo/list",
            Endpoint::Search => "/riskbird-api/newSearch",
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A single request against the provider.
///
/// The method is implied by the body: no body (or an empty one) is a GET,
/// anything else is a JSON POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub body: Option<String>,
    /// Headers specific to this request, on top of the identity headers.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(url: impl Into<String>, body: Option<String>) -> Self {
        let url = url.into();
        let body = body.filter(|b| !b.is_empty());
        let mut headers = Vec::new();

        // The search endpoint rejects signed bodies.
        if body.is_some() && !url.contains(Endpoint::Search.path()) {
            headers.push((SIGNATURE_HEADER.0.to_string(), SIGNATURE_HEADER.1.to_string()));
        }

        Self { url, body, headers }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, None)
    }

    pub fn post(url: impl Into<String>, body: String) -> Self {
        Self::new(url, Some(body))
    }

    pub fn method(&self) -> HttpMethod {
        match self.body {
            Some(_) => HttpMethod::Post,
            None => HttpMethod::Get,
        }
    }

    pub fn entity_query(base: &str, entity: &str) -> Self {
        Self::get(format!(
            "{}?entId={}",
            Endpoint::EntityQuery.url(base),
            urlencoding::encode(entity)
        ))
    }
}

/// Browser identity headers sent with every request.
///
/// The provider's bot detection expects a desktop Chrome profile; a configured
/// user agent replaces the built-in one and a configured cookie is attached.
pub fn identity_headers(config: &ClientConfig) -> Vec<(String, String)> {
    let base = config.base();
    let user_agent = config.user_agent.as_deref().unwrap_or(CHROME_USER_AGENT);

    let mut headers = vec![
        ("User-Agent".to_string(), user_agent.to_string()),
        (
            "Accept".to_string(),
            "text/html,application/json,application/xhtml+xml, image/jxr, */*".to_string(),
        ),
        ("App-Device".to_string(), "WEB".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Origin".to_string(), base.to_string()),
        ("Referer".to_string(), format!("{base}/ent/")),
    ];

    if let Some(cookie) = config.cookie.as_deref().filter(|c| !c.is_empty()) {
        headers.push(("Cookie".to_string(), cookie.to_string()));
    }

    headers
}
