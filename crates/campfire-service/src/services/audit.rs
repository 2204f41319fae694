//! Audit log service
//!
//! Writes never fail the request that triggered them; a failed insert is
//! logged and dropped.

use campfire_core::{AuditLog, AuditLogQuery, Snowflake, User};
use serde_json::{json, Map, Value};
use tracing::{instrument, warn};
use validator::Validate;

use crate::dto::{AuditLogListQuery, AuditLogResponse, PaginatedResponse};

use super::access::require_admin;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Where a request came from, for audit details
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip: Option<String>,
    pub method: String,
    /// Route template, e.g. `/api/v1/admin/users/:id`
    pub endpoint: String,
    /// Concrete request path
    pub url: String,
    pub user_agent: Option<String>,
}

impl RequestMeta {
    /// `{endpoint, method, url}` followed by the fields of `extra`
    pub fn details(&self, extra: Value) -> Value {
        let mut details = Map::new();
        details.insert("endpoint".into(), json!(self.endpoint));
        details.insert("method".into(), json!(self.method));
        details.insert("url".into(), json!(self.url));
        if let Value::Object(fields) = extra {
            details.extend(fields);
        }
        Value::Object(details)
    }
}

pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, meta, extra))]
    pub async fn record(
        &self,
        user_id: Option<Snowflake>,
        action_type: &str,
        meta: &RequestMeta,
        extra: Value,
    ) {
        let entry = AuditLog::new(
            self.ctx.generate_id(),
            user_id,
            action_type,
            meta.details(extra),
            meta.ip.clone(),
        );

        if let Err(e) = self.ctx.audit_repo().append(&entry).await {
            warn!(action_type, error = %e, "Failed to write audit log");
        }
    }

    /// Newest first, filtered by action and user
    #[instrument(skip(self, actor))]
    pub async fn list(
        &self,
        actor: &User,
        query: AuditLogListQuery,
    ) -> ServiceResult<PaginatedResponse<AuditLogResponse>> {
        require_admin(actor)?;
        query.validate()?;

        let limit = query.limit.unwrap_or(50);
        let entries = self
            .ctx
            .audit_repo()
            .list(AuditLogQuery {
                action_type: query.action_type.filter(|a| !a.is_empty()),
                user_id: query.user_id,
                before: query.before,
                limit,
            })
            .await?;

        let next_before = next_cursor(entries.iter().map(|e| e.id), limit);
        Ok(PaginatedResponse::new(
            entries.into_iter().map(AuditLogResponse::from).collect(),
            next_before,
            limit,
        ))
    }
}

/// The last id of a full page, as the next `before` cursor
pub(crate) fn next_cursor(
    ids: impl ExactSizeIterator<Item = Snowflake>,
    limit: i64,
) -> Option<String> {
    let len = ids.len();
    if i64::try_from(len).ok()? < limit {
        return None;
    }
    ids.last().map(|id| id.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::testing::{self, admin, member, meta, MemoryStore};

    #[test]
    fn test_details_merge_request_fields_first() {
        let meta = RequestMeta {
            ip: Some("10.0.0.1".to_string()),
            method: "POST".to_string(),
            endpoint: "/api/v1/admin/users/:id/ban".to_string(),
            url: "/api/v1/admin/users/42/ban".to_string(),
            user_agent: None,
        };

        let details = meta.details(json!({ "target_user_id": "42", "duration_hours": 24 }));
        assert_eq!(details["method"], "POST");
        assert_eq!(details["url"], "/api/v1/admin/users/42/ban");
        assert_eq!(details["target_user_id"], "42");

        let plain = meta.details(Value::Null);
        assert_eq!(plain.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_next_cursor_only_on_full_pages() {
        let ids = [Snowflake::new(9), Snowflake::new(7)];
        assert_eq!(next_cursor(ids.into_iter(), 2).as_deref(), Some("7"));
        assert_eq!(next_cursor(ids.into_iter(), 3), None);
        assert_eq!(next_cursor(std::iter::empty::<Snowflake>(), 0), None);
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let store = Arc::new(MemoryStore::default());
        let ctx = testing::context(&store).await;
        let service = AuditService::new(&ctx);
        let root = admin(9, "root");

        for action in ["team_create", "user_ban", "team_create", "team_create"] {
            service
                .record(Some(root.id), action, &meta(), json!({ "n": 1 }))
                .await;
        }
        service.record(None, "team_create", &meta(), json!({})).await;

        let page = service
            .list(
                &root,
                AuditLogListQuery {
                    action_type: Some("team_create".to_string()),
                    user_id: Some(root.id),
                    limit: Some(2),
                    ..AuditLogListQuery::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].action_details["endpoint"], "/test");
        let before = page.pagination.next_before.clone().unwrap();

        let rest = service
            .list(
                &root,
                AuditLogListQuery {
                    action_type: Some("team_create".to_string()),
                    user_id: Some(root.id),
                    before: Some(Snowflake::parse(&before).unwrap()),
                    limit: Some(2),
                },
            )
            .await
            .unwrap();
        assert_eq!(rest.data.len(), 1);
        assert!(!rest.pagination.has_more);

        let err = service
            .list(&member(1, "alice", None), AuditLogListQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
