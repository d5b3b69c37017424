use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use super::http::{HttpClient, RawResponse};
use crate::core::{ApiRequest, Endpoint};

/// Network failure injected by [`MockHttpClient::push_failure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mock network failure: {0}")]
pub struct MockNetworkError(pub String);

type Scripted = Result<RawResponse, MockNetworkError>;

#[derive(Debug, Default)]
struct MockState {
    queues: HashMap<Endpoint, VecDeque<Scripted>>,
    fallback: HashMap<Endpoint, RawResponse>,
    requests: Vec<ApiRequest>,
}

/// Scripted [`HttpClient`] for tests.
///
/// Each endpoint has a queue of outcomes consumed in order. Once a queue is
/// empty the endpoint's [`always`](Self::always) response is served, and
/// without one the request gets a 404. Every request is recorded.
///
/// # Examples
///
/// ```
/// use riskbird_fetch::{Endpoint, MockHttpClient, RawResponse};
///
/// let mock = MockHttpClient::new();
/// mock.always(Endpoint::EntityQuery, RawResponse::ok(r#"{"orderNo":"ORD1"}"#));
/// mock.push_failure(Endpoint::CategoryList, "connection reset");
/// assert_eq!(mock.count(Endpoint::CategoryList), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockHttpClient {
    state: Mutex<MockState>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a response for the next unanswered request to `endpoint`.
    pub fn push(&self, endpoint: Endpoint, response: RawResponse) -> &Self {
        self.state()
            .queues
            .entry(endpoint)
            .or_default()
            .push_back(Ok(response));
        self
    }

    /// Queue a network failure for the next unanswered request to `endpoint`.
    pub fn push_failure(&self, endpoint: Endpoint, message: impl Into<String>) -> &Self {
        self.state()
            .queues
            .entry(endpoint)
            .or_default()
            .push_back(Err(MockNetworkError(message.into())));
        self
    }

    /// Response served for `endpoint` once its queue is drained.
    pub fn always(&self, endpoint: Endpoint, response: RawResponse) -> &Self {
        self.state().fallback.insert(endpoint, response);
        self
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// Requests seen so far for `endpoint`.
    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| Endpoint::of(&r.url) == Some(endpoint))
            .count()
    }

    fn answer(&self, request: &ApiRequest) -> Scripted {
        let mut state = self.state();
        state.requests.push(request.clone());

        let Some(endpoint) = Endpoint::of(&request.url) else {
            return Ok(RawResponse::empty(404));
        };

        if let Some(next) = state.queues.get_mut(&endpoint).and_then(VecDeque::pop_front) {
            return next;
        }

        Ok(state
            .fallback
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| RawResponse::empty(404)))
    }
}

impl HttpClient for MockHttpClient {
    type Error = MockNetworkError;

    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, Self::Error> {
        self.answer(request)
    }
}
