//! Request bodies and response envelopes of the provider's JSON API.

use serde_json::{Value, json};

use super::request::SEARCH_PAGE_SIZE;
use crate::data::{Category, CompanyInfo, EntityInfo, Page};
use crate::error::{Error, Result};

const CATEGORY_SUCCESS_CODE: &str = "20000";

/// Scalar as text, the way the provider's own front-end reads it.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn array(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Body of a category page request.
pub fn category_page_body(order_no: &str, category: Category, page: u32, size: u32) -> String {
    json!({
        "filterCnd": 0,
        "page": page,
        "size": size,
        "orderNo": order_no,
        "extractType": category.key(),
        "sortField": "",
        "filterMap": {},
    })
    .to_string()
}

/// Body of a search page request. Every field is sent as a string, including
/// the filter blob, which is itself JSON encoded.
pub fn search_page_body(keyword: &str, page: u32) -> String {
    json!({
        "searchKey": keyword,
        "pageNo": page.to_string(),
        "range": SEARCH_PAGE_SIZE.to_string(),
        "referer": "search",
        "queryType": "1",
        "selectConditionData": r#"{"status":"","sort_field":""}"#,
    })
    .to_string()
}

/// The `orderNo` of an entity-info response, if one was issued. A body that
/// is not JSON (a login page, a captcha wall) carries no token.
pub fn decode_session_token(body: &str) -> Option<String> {
    let root: Value = serde_json::from_str(body).ok()?;
    root.get("orderNo").and_then(text)
}

pub fn decode_entity_info(body: &str) -> Result<EntityInfo> {
    let root: Value = serde_json::from_str(body)?;
    let order_no = root.get("orderNo").and_then(text).unwrap_or_default();

    let mut profile: CompanyInfo = match root.pointer("/basicResult/apiData/list/jbxxInfo") {
        Some(raw) if !raw.is_null() => serde_json::from_value(raw.clone())?,
        _ => CompanyInfo::default(),
    };
    profile.order_no = order_no.clone();

    let counts = root
        .pointer("/basicResult/apiData/count")
        .cloned()
        .unwrap_or(Value::Null);

    Ok(EntityInfo {
        order_no,
        profile,
        counts,
    })
}

/// Decode a category page requested with `size`; anything but code `20000`
/// is a failure.
pub fn decode_category_page(body: &str, number: u32, size: u32) -> Result<Page> {
    let root: Value = serde_json::from_str(body)?;
    let code = root.get("code").and_then(text).unwrap_or_default();

    if code != CATEGORY_SUCCESS_CODE {
        tracing::debug!(response = body, "category query rejected");
        return Err(Error::CategoryQueryFailed {
            code,
            message: root.get("msg").and_then(text).unwrap_or_default(),
        });
    }

    let data = root.get("data");
    Ok(Page::new(
        number,
        size,
        count(data.and_then(|d| d.get("totalCount"))),
        array(data.and_then(|d| d.get("apiData"))),
    ))
}

/// Decode a search page; `success` must be `true`.
pub fn decode_search_page(body: &str, number: u32) -> Result<Page> {
    let root: Value = serde_json::from_str(body)?;

    if root.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(Error::SearchFailed(
            root.get("msg").and_then(text).unwrap_or_default(),
        ));
    }

    let data = root.get("data");
    Ok(Page::new(
        number,
        SEARCH_PAGE_SIZE,
        count(data.and_then(|d| d.get("total"))),
        array(data.and_then(|d| d.get("list"))),
    ))
}
