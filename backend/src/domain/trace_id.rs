//! Per-request correlation identifier.
//!
//! The [`crate::middleware::Trace`] middleware runs every request inside
//! [`TraceId::scope`], so log lines and [`crate::domain::Error`] values raised
//! while serving it can read the identifier without it being passed around.
//! Task-locals do not follow `tokio::spawn` or `spawn_blocking`; wrap such
//! work in `scope` again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Identifier correlating everything done for one request.
///
/// # Examples
/// ```
/// use campgrounds::TraceId;
///
/// let id: TraceId = "6f1c2b9e-3d4a-4c1e-9b7a-2f8d5e6a7b10".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2b9e-3d4a-4c1e-9b7a-2f8d5e6a7b10");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The identifier of the request being served, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn scope_sets_and_restores_the_current_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let (seen_outer, seen_inner) = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (TraceId::current(), nested)
        })
        .await;
        assert_eq!(seen_outer, Some(outer));
        assert_eq!(seen_inner, Some(inner));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_the_id() {
        let id = TraceId::generate();
        let spawned = TraceId::scope(id, async {
            tokio::spawn(async { TraceId::current() }).await
        })
        .await
        .expect("task joins");
        assert_eq!(spawned, None);
    }

    #[rstest]
    fn parsing_rejects_non_uuids() {
        assert!("trace-123".parse::<TraceId>().is_err());
        let id = TraceId::from_uuid(Uuid::nil());
        assert_eq!(id.as_uuid(), &Uuid::nil());
    }
}
