//! Pure transformations for RiskBird retrieval.
//!
//! Nothing in this module performs I/O: requests are described, responses are
//! classified and decoded, and the paging decision is a state machine fed with
//! pages fetched elsewhere.

mod classify;
mod drain;
mod envelope;
mod request;
mod retry;

pub use classify::classify;
pub use drain::{Drain, DrainStep};
pub use envelope::{
    category_page_body, decode_category_page, decode_entity_info, decode_search_page,
    decode_session_token, search_page_body,
};
pub use request::{
    ApiRequest, CATEGORY_PAGE_SIZE, Endpoint, HttpMethod, SEARCH_PAGE_SIZE, identity_headers,
};
pub use retry::retry_delay;
