use crate::errors::ClientError;
use crate::metrics_defs::{API_PATCH_OPERATIONS, API_REQUEST_DURATION, API_REQUESTS};
use crate::patch::PatchOperation;
use crate::types::{ApiResponse, CreatedTest, Test, TestId, TestsData};
use async_trait::async_trait;
use http::StatusCode;
use http::header::CONTENT_TYPE;
use shared::{counter, histogram};
use std::time::Instant;
use url::Url;

/// Deployment of the Catchpoint API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Prod,
    Stage,
    Qa,
}

impl Environment {
    /// Unknown and empty names select production.
    pub fn from_name(name: &str) -> Self {
        match name {
            "stage" => Environment::Stage,
            "qa" => Environment::Qa,
            _ => Environment::Prod,
        }
    }

    pub const fn tests_url(self) -> &'static str {
        match self {
            Environment::Prod => "https://io.catchpoint.com/api/v2/tests",
            Environment::Stage => "https://iostage.catchpoint.com/api/v2/tests",
            Environment::Qa => "https://ioqa.catchpoint.com/api/v2/tests",
        }
    }
}

/// CRUD over test documents.
///
/// Every call is a single request. Nothing is retried and nothing is cached;
/// a read always fetches the full current document.
#[async_trait]
pub trait TestsApi: Send + Sync {
    /// Creates a test and returns the id the server assigned.
    async fn create_test(&self, test: &Test) -> Result<TestId, ClientError>;

    /// Fetches a test. `Ok(None)` means the test does not exist.
    async fn get_test(&self, id: TestId) -> Result<Option<Test>, ClientError>;

    async fn update_test(&self, id: TestId, patch: &[PatchOperation]) -> Result<(), ClientError>;

    async fn delete_test(&self, id: TestId) -> Result<(), ClientError>;
}

#[derive(Clone)]
pub struct CatchpointClient {
    client: reqwest::Client,
    tests_url: Url,
    api_token: String,
    log_json: bool,
}

impl CatchpointClient {
    pub fn new(
        api_token: impl Into<String>,
        environment: Environment,
        log_json: bool,
    ) -> Result<Self, ClientError> {
        let tests_url = Url::parse(environment.tests_url())?;
        Ok(Self::with_tests_url(api_token, tests_url, log_json))
    }

    /// Client against an explicit tests collection url.
    pub fn with_tests_url(api_token: impl Into<String>, tests_url: Url, log_json: bool) -> Self {
        CatchpointClient {
            client: reqwest::Client::new(),
            tests_url,
            api_token: api_token.into(),
            log_json,
        }
    }

    pub fn tests_url(&self) -> &Url {
        &self.tests_url
    }

    fn test_url(&self, id: TestId) -> String {
        format!("{}/{}", self.tests_url.as_str().trim_end_matches('/'), id)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, String), ClientError> {
        let start = Instant::now();
        let response = request
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await;
        histogram!(API_REQUEST_DURATION, "operation" => operation)
            .record(start.elapsed().as_secs_f64());

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                record_outcome(operation, "error");
                tracing::error!(error = %e, operation, "request to catchpoint API failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(operation, status = %status, "response code from catchpoint API");

        Ok((status, body))
    }

    fn rejected(operation: &'static str, status: StatusCode, body: String) -> ClientError {
        record_outcome(operation, "rejected");
        tracing::error!(operation, status = %status, body = %body, "catchpoint API rejected request");
        ClientError::Rejected {
            operation,
            status,
            body,
        }
    }

    fn malformed(operation: &'static str, reason: impl ToString) -> ClientError {
        record_outcome(operation, "malformed");
        ClientError::MalformedResponse {
            operation,
            reason: reason.to_string(),
        }
    }
}

fn record_outcome(operation: &'static str, outcome: &'static str) {
    counter!(API_REQUESTS, "operation" => operation, "outcome" => outcome).increment(1);
}

/// Reads `completed` from an envelope. A body that is not an envelope at all
/// counts as not completed.
fn is_completed(body: &str) -> bool {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .map(|response| response.completed)
        .unwrap_or(false)
}

#[async_trait]
impl TestsApi for CatchpointClient {
    async fn create_test(&self, test: &Test) -> Result<TestId, ClientError> {
        const OPERATION: &str = "create";

        let payload = serde_json::to_string(test)?;
        if self.log_json {
            tracing::debug!(payload = %payload, "test JSON");
        }

        tracing::debug!(test_name = %test.name, "creating test");
        let request = self.client.post(self.tests_url.clone()).body(payload);
        let (status, body) = self.send(OPERATION, request).await?;
        if status != StatusCode::OK {
            return Err(Self::rejected(OPERATION, status, body));
        }

        let response: ApiResponse<CreatedTest> =
            serde_json::from_str(&body).map_err(|e| Self::malformed(OPERATION, e))?;
        if !response.completed {
            return Err(Self::rejected(OPERATION, status, body));
        }

        let created = response
            .data
            .ok_or_else(|| Self::malformed(OPERATION, "response carries no test id"))?;
        record_outcome(OPERATION, "ok");
        tracing::info!(test_id = created.id, test_name = %test.name, "created test");

        Ok(created.id)
    }

    async fn get_test(&self, id: TestId) -> Result<Option<Test>, ClientError> {
        const OPERATION: &str = "get";

        tracing::debug!(test_id = id, "fetching test");
        let request = self
            .client
            .get(self.test_url(id))
            .query(&[("showInheritedProperties", "false")]);
        let (status, body) = self.send(OPERATION, request).await?;
        if status != StatusCode::OK {
            return Err(Self::rejected(OPERATION, status, body));
        }

        let response: ApiResponse<TestsData> =
            serde_json::from_str(&body).map_err(|e| Self::malformed(OPERATION, e))?;
        record_outcome(OPERATION, "ok");
        if !response.completed {
            tracing::debug!(test_id = id, "test not found");
            return Ok(None);
        }

        Ok(response.data.and_then(|data| data.tests.into_iter().next()))
    }

    async fn update_test(&self, id: TestId, patch: &[PatchOperation]) -> Result<(), ClientError> {
        const OPERATION: &str = "update";

        let payload = serde_json::to_string(patch)?;
        if self.log_json {
            tracing::debug!(test_id = id, payload = %payload, "updating test with JSON patch");
        }
        histogram!(API_PATCH_OPERATIONS).record(patch.len() as f64);

        tracing::debug!(test_id = id, "updating test");
        let request = self.client.patch(self.test_url(id)).body(payload);
        let (status, body) = self.send(OPERATION, request).await?;
        if !is_completed(&body) {
            return Err(Self::rejected(OPERATION, status, body));
        }

        record_outcome(OPERATION, "ok");
        Ok(())
    }

    async fn delete_test(&self, id: TestId) -> Result<(), ClientError> {
        const OPERATION: &str = "delete";

        tracing::debug!(test_id = id, "deleting test");
        let (status, body) = self
            .send(OPERATION, self.client.delete(self.test_url(id)))
            .await?;
        if !is_completed(&body) {
            return Err(Self::rejected(OPERATION, status, body));
        }

        record_outcome(OPERATION, "ok");
        tracing::info!(test_id = id, "deleted test");
        Ok(())
    }
}
