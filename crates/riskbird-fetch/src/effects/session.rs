use std::time::Duration;

use tokio::time::Instant;

use super::client::{CachedSession, Client};
use super::http::HttpClient;
use crate::core::{ApiRequest, decode_entity_info, decode_session_token};
use crate::data::{CompanyInfo, EntityInfo};
use crate::error::{Error, Result};

impl<C: HttpClient> Client<C> {
    /// Profile, category counts and session token of `entity`.
    pub async fn entity_info(&self, entity: &str) -> Result<EntityInfo> {
        let request = ApiRequest::entity_query(self.config.base(), entity);
        let info = decode_entity_info(&self.transport.send(&request).await?)?;

        if !info.order_no.is_empty() {
            self.remember_session(entity, &info.order_no);
        }

        Ok(info)
    }

    /// Registration profile of `entity`, with its `orderNo` filled in.
    pub async fn company_info(&self, entity: &str) -> Result<CompanyInfo> {
        Ok(self.entity_info(entity).await?.profile)
    }

    /// Session token (`orderNo`) for category queries on `entity`.
    ///
    /// With [`SessionPolicy::AlwaysRefresh`](crate::SessionPolicy) every call
    /// asks the provider; with a cache policy a token younger than its TTL is
    /// reused.
    pub async fn resolve_session(&self, entity: &str) -> Result<String> {
        if let Some(token) = self.config.session.ttl().and_then(|ttl| self.cached_session(entity, ttl)) {
            tracing::debug!(entity, "reusing cached session token");
            return Ok(token);
        }

        let request = ApiRequest::entity_query(self.config.base(), entity);
        let body = self.transport.send(&request).await?;
        let token = decode_session_token(&body).ok_or_else(|| Error::MissingSession {
            entity: entity.to_string(),
        })?;

        self.remember_session(entity, &token);
        Ok(token)
    }

    fn cached_session(&self, entity: &str, ttl: Duration) -> Option<String> {
        let mut sessions = self.sessions();
        match sessions.get(entity) {
            Some(cached) if cached.issued.elapsed() < ttl => Some(cached.token.clone()),
            Some(_) => {
                sessions.remove(entity);
                None
            }
            None => None,
        }
    }

    /// Store `token` for `entity`, dropping every entry already past its TTL.
    fn remember_session(&self, entity: &str, token: &str) {
        let Some(ttl) = self.config.session.ttl() else {
            return;
        };
        let mut sessions = self.sessions();
        sessions.retain(|_, cached| cached.issued.elapsed() < ttl);
        sessions.insert(
            entity.to_string(),
            CachedSession {
                token: token.to_string(),
                issued: Instant::now(),
            },
        );
    }
}
