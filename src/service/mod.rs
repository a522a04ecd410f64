//! Service layer module.
//!
//! Thin operations over the document store: each call validates its input,
//! performs one store round-trip, and returns the store's result unmodified.

pub mod subject;
pub mod user;

use std::future::Future;

use crate::domain::{Document, DocumentId};
use crate::error::{Result, StorageError};

pub use subject::SubjectService;
pub use user::UserService;

/// Name of the per-operation counter.
pub const OPERATIONS_METRIC: &str = "subjects_api_operations_total";

/// Parse a raw path id for model `T`.
///
/// A malformed id is a store-level cast failure, not a missing record.
fn parse_id<T: Document>(raw: &str) -> Result<DocumentId> {
    raw.parse().map_err(|_| {
        StorageError::Cast {
            value: raw.to_string(),
            model: T::MODEL,
        }
        .into()
    })
}

/// Run an operation and count its outcome.
async fn observe<T, F>(operation: &'static str, op: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let result = op.await;
    let outcome = if result.is_ok() { "success" } else { "failure" };

    metrics::counter!(OPERATIONS_METRIC, "operation" => operation, "outcome" => outcome)
        .increment(1);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subject;
    use crate::error::AppError;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_parse_id() {
        let id = DocumentId::generate();
        assert_eq!(parse_id::<Subject>(&id.to_string()).unwrap(), id);

        let err = parse_id::<Subject>("not-an-id").unwrap_err();
        assert!(matches!(
            err,
            AppError::Storage(StorageError::Cast { model: "Subject", .. })
        ));
    }

    #[tokio::test]
    async fn test_observe_passes_result_through() {
        let ok = observe("noop", async { Ok::<_, AppError>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = observe("noop", async {
            Err::<(), _>(AppError::Internal("boom".to_string()))
        })
        .await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn test_observe_counts_outcomes() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        observe("get_subject", async { Ok::<_, AppError>(()) })
            .await
            .unwrap();
        observe("get_subject", async {
            Err::<(), _>(AppError::Internal("boom".to_string()))
        })
        .await
        .unwrap_err();

        let rendered = handle.render();
        assert!(rendered.contains(OPERATIONS_METRIC));
        assert!(rendered.contains(r#"operation="get_subject""#));
        assert!(rendered.contains(r#"outcome="success""#));
        assert!(rendered.contains(r#"outcome="failure""#));
    }
}
