//! Customer identity extractor
//!
//! 认证由外部网关负责，这里只消费它注入的 `x-customer-id` 头，
//! 取值可以是纯 id ("123") 或带表前缀 ("user:123")。

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use surrealdb::RecordId;

use crate::utils::AppError;

pub const CUSTOMER_ID_HEADER: &str = "x-customer-id";

/// The calling customer, as a `user` record id
#[derive(Debug, Clone)]
pub struct CustomerIdentity {
    pub id: RecordId,
}

impl CustomerIdentity {
    fn parse(raw: &str) -> Option<RecordId> {
        if raw.contains(':') {
            let id: RecordId = raw.parse().ok()?;
            (id.table() == "user").then_some(id)
        } else {
            let key: i64 = raw.parse().ok()?;
            Some(RecordId::from(("user", key)))
        }
    }
}

impl<S> FromRequestParts<S> for CustomerIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CUSTOMER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::invalid(format!("Missing {CUSTOMER_ID_HEADER} header"))
            })?;

        let id = Self::parse(raw)
            .ok_or_else(|| AppError::invalid(format!("Invalid {CUSTOMER_ID_HEADER} header")))?;
        Ok(Self { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_prefixed_ids() {
        assert_eq!(
            CustomerIdentity::parse("42"),
            Some(RecordId::from(("user", 42_i64)))
        );
        assert_eq!(
            CustomerIdentity::parse("user:42"),
            Some(RecordId::from(("user", 42_i64)))
        );
        assert_eq!(CustomerIdentity::parse("employee:42"), None);
        assert_eq!(CustomerIdentity::parse("garbage"), None);
    }
}
