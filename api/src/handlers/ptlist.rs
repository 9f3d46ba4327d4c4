use axum::extract::{Query, State};
use common::models::PtList;
use common::query::ListQueryParams;
use common::telemetry::{record_points, record_request, RequestOutcome};
use serde::Deserialize;

use crate::handlers::{ErrorResponse, SuccessResponse};
use crate::state::AppState;

/// Raw query string of `GET /ptlist`
///
/// Missing parameters deserialize as empty strings and are rejected by
/// [`ListQueryParams::parse`] with the matching error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PtListQuery {
    pub period: String,
    pub tz: String,
    pub t1: String,
    pub t2: String,
}

/// List the invocation timestamps of a periodic task
#[tracing::instrument(skip(state))]
pub async fn list_timestamps(
    State(state): State<AppState>,
    Query(query): Query<PtListQuery>,
) -> Result<SuccessResponse<PtList>, ErrorResponse> {
    let params = ListQueryParams::parse(&query.period, &query.tz, &query.t1, &query.t2)
        .map_err(|e| {
            tracing::warn!(error = %e, code = e.code(), "Could not parse query params");
            record_request(RequestOutcome::ClientError);
            ErrorResponse::from(e)
        })?;

    match state.service.get_list(&params) {
        Ok(list) => {
            tracing::info!(
                period = %params.period,
                timezone = %params.timezone,
                points = list.len(),
                "Timestamp list generated"
            );
            record_request(RequestOutcome::Success);
            record_points(list.len());
            Ok(SuccessResponse::new(list))
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, code = e.code(), "Rejected timestamp list request");
            record_request(RequestOutcome::ClientError);
            Err(e.into())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate timestamp list");
            record_request(RequestOutcome::ServerError);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Envelope;
    use crate::routes::create_router;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use common::config::Settings;
    use common::errors::PeriodicTaskError;
    use common::service::{PeriodicTaskService, PeriodicTaskUseCase};
    use mockall::mock;
    use std::sync::Arc;
    use tower::ServiceExt;

    mock! {
        pub Service {}

        impl PeriodicTaskService for Service {
            fn get_list(&self, params: &ListQueryParams) -> Result<PtList, PeriodicTaskError>;
        }
    }

    struct PanickingService;

    impl PeriodicTaskService for PanickingService {
        fn get_list(&self, _params: &ListQueryParams) -> Result<PtList, PeriodicTaskError> {
            panic!("cursor exploded")
        }
    }

    fn router_with(service: Arc<dyn PeriodicTaskService>) -> Router {
        create_router(AppState::new(Settings::default(), service, None))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Envelope<PtList>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_returns_list_from_service() {
        let mut service = MockService::new();
        service
            .expect_get_list()
            .times(1)
            .returning(|_| Ok(vec!["20210714T210000Z".to_string()]));

        let (status, body) = get(
            router_with(Arc::new(service)),
            "/ptlist?period=1h&tz=Europe/Athens&t1=20210714T204603Z&t2=20210714T220000Z",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "success");
        assert_eq!(body.data, Some(vec!["20210714T210000Z".to_string()]));
        assert_eq!(body.error, None);
    }

    #[tokio::test]
    async fn test_invalid_params_skip_service() {
        let mut service = MockService::new();
        service.expect_get_list().never();
        let app = router_with(Arc::new(service));

        let cases = [
            ("/ptlist?period=10w&tz=UTC&t1=20210714T204603Z&t2=20210715T123456Z", "invalid period"),
            ("/ptlist?period=1h&tz=WrongTZ&t1=20210714T204603Z&t2=20210715T123456Z", "invalid timezone"),
            ("/ptlist?period=1h&tz=UTC&t1=wrong&t2=20210715T123456Z", "invalid start point"),
            ("/ptlist?period=1h&tz=UTC&t1=20210714T204603Z&t2=2021-07-15", "invalid end point"),
            ("/ptlist", "invalid period"),
        ];

        for (uri, prefix) in cases {
            let (status, body) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body.status, "error");
            assert!(body.data.is_none());
            let error = body.error.unwrap();
            assert!(error.starts_with(prefix), "{}: {}", uri, error);
        }
    }

    #[tokio::test]
    async fn test_internal_service_error_is_500() {
        let mut service = MockService::new();
        service
            .expect_get_list()
            .returning(|_| Err(PeriodicTaskError::Internal("boom".to_string())));

        let (status, body) = get(
            router_with(Arc::new(service)),
            "/ptlist?period=1d&tz=UTC&t1=20210714T204603Z&t2=20210715T123456Z",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "error");
        assert_eq!(body.error.as_deref(), Some("something went wrong"));
    }

    #[tokio::test]
    async fn test_athens_daily_list() {
        let (status, body) = get(
            router_with(Arc::new(PeriodicTaskUseCase::new())),
            "/ptlist?period=1d&tz=Europe/Athens&t1=20211010T204603Z&t2=20211115T123456Z",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let list = body.data.unwrap();
        assert_eq!(list.len(), 36);
        assert_eq!(list[0], "20211010T210000Z");
        // Athens leaves summer time on 2021-10-31
        assert_eq!(list[20], "20211030T210000Z");
        assert_eq!(list[21], "20211031T220000Z");
        assert_eq!(list[35], "20211114T220000Z");
    }

    #[tokio::test]
    async fn test_too_many_points_is_client_error() {
        let service = PeriodicTaskUseCase::new().with_max_points(2);
        let (status, body) = get(
            router_with(Arc::new(service)),
            "/ptlist?period=1h&tz=UTC&t1=20210714T204603Z&t2=20210715T123456Z",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status, "error");
    }

    #[tokio::test]
    async fn test_only_get_is_allowed() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let mut service = MockService::new();
            service.expect_get_list().never();

            let response = router_with(Arc::new(service))
                .oneshot(
                    Request::builder()
                        .method(method.clone())
                        .uri("/ptlist?period=1h&tz=UTC&t1=20210714T204603Z&t2=20210715T123456Z")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        }
    }

    #[tokio::test]
    async fn test_service_panic_is_recovered() {
        let (status, body) = get(
            router_with(Arc::new(PanickingService)),
            "/ptlist?period=1h&tz=UTC&t1=20210714T204603Z&t2=20210715T123456Z",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "error");
        assert_eq!(body.error.as_deref(), Some("recovering from error"));
    }
}
