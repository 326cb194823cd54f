// Theta Lake REST client.
//
// Wraps `reqwest::Client` with bearer-token authentication, endpoint-relative
// URL construction and per-verb status classification. Every typed method
// below is a thin shape over `send`; the few endpoints whose contract is
// not a plain request/response pair (integration state, record review,
// case status and case-record links) carry their own sequencing here.

use reqwest::{Method, StatusCode};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{TransportConfig, accepts};
use crate::types::{
    Analysis, AnalysisPoliciesEnvelope, AnalysisPolicy, AuditLog, Case, CaseRecordRequest,
    CaseStatus, DirectoryGroup, Event, Export, IntegrationState, IntegrationStateEnvelope,
    IntegrationStateRequest, IntegrationStatus, LegalHold, PolicyHit, PolicyHitsEnvelope, Record,
    RetentionPolicy, ReviewStateRequest, SystemStatus, Tag, User,
};

/// Status and body of a completed HTTP exchange, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Async client for the Theta Lake API.
///
/// Holds no mutable state after construction, so a single instance can be
/// cloned and shared across concurrent operations.
#[derive(Clone)]
pub struct ThetaLakeClient {
    http: reqwest::Client,
    endpoint: String,
    token: SecretString,
}

impl std::fmt::Debug for ThetaLakeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThetaLakeClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ThetaLakeClient {
    /// Create a client for `endpoint`, authenticating with `token`.
    ///
    /// `endpoint` is the API base, e.g. `https://api.thetalake.com/api/v1`.
    /// A trailing `/` is stripped so resource paths can be appended verbatim.
    pub fn new(
        endpoint: &str,
        token: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, endpoint, token)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: &str,
        token: SecretString,
    ) -> Result<Self, Error> {
        let endpoint = normalize_endpoint(endpoint)?;
        if token.expose_secret().trim().is_empty() {
            return Err(Error::MissingToken);
        }
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// The normalized base endpoint, without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    // ── Request primitive ────────────────────────────────────────────

    /// Send one request and return its status and body unclassified.
    ///
    /// Every request carries the bearer token and a JSON content type, even
    /// when it has no body. On a status outside the verb's success set the
    /// body is read best-effort so it can be reported.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path);
        debug!("{method} {url}");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(self.token.expose_secret())
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = if accepts(&method, status) {
            resp.text().await.map_err(Error::Transport)?
        } else {
            resp.text().await.unwrap_or_default()
        };

        Ok(RawResponse { status, body })
    }

    /// `send`, then fail unless the status is in the verb's success set.
    async fn send_checked<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let resp = self.send(method.clone(), path, query, body).await?;
        if accepts(&method, resp.status) {
            Ok(resp)
        } else {
            Err(Error::UnexpectedStatus {
                method: method.to_string(),
                path: path.to_owned(),
                status: resp.status.as_u16(),
                body: resp.body,
            })
        }
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.send_checked::<()>(Method::GET, path, &[], None).await?;
        decode(&resp.body)
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let resp = self.send_checked(Method::POST, path, &[], Some(body)).await?;
        decode(&resp.body)
    }

    async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let resp = self.send_checked(Method::PUT, path, &[], Some(body)).await?;
        decode(&resp.body)
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send_checked::<()>(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    async fn delete_with_params(&self, path: &str, query: &[(&str, &str)]) -> Result<(), Error> {
        self.send_checked::<()>(Method::DELETE, path, query, None).await?;
        Ok(())
    }

    // ── Cases ────────────────────────────────────────────────────────

    pub async fn get_case(&self, id: &str) -> Result<Case, Error> {
        self.get(&format!("/cases/{id}")).await
    }

    pub async fn create_case(&self, case: &Case) -> Result<Case, Error> {
        self.post("/cases", case).await
    }

    pub async fn update_case(&self, id: &str, case: &Case) -> Result<Case, Error> {
        self.put(&format!("/cases/{id}"), case).await
    }

    pub async fn delete_case(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/cases/{id}")).await
    }

    /// Move a case to the status named by `status` (`OPEN` or `CLOSED`,
    /// any letter case). Anything else fails without a request.
    pub async fn update_case_status(&self, id: &str, status: &str) -> Result<(), Error> {
        let status: CaseStatus = status.parse()?;
        self.transition_case(id, status).await
    }

    /// `PUT /cases/{id}/open` or `PUT /cases/{id}/close`, without a body.
    pub async fn transition_case(&self, id: &str, status: CaseStatus) -> Result<(), Error> {
        let path = format!("/cases/{id}/{}", status.action());
        self.send_checked::<()>(Method::PUT, &path, &[], None).await?;
        Ok(())
    }

    /// Link an archived record to a case. The response body is ignored.
    pub async fn add_record_to_case(&self, case_id: &str, record_id: &str) -> Result<(), Error> {
        let path = format!("/cases/{case_id}/records");
        let body = CaseRecordRequest { record_id };
        self.send_checked(Method::POST, &path, &[], Some(&body)).await?;
        Ok(())
    }

    /// Unlink a record from a case. The record id travels as a query
    /// parameter, never as a path segment.
    pub async fn remove_record_from_case(
        &self,
        case_id: &str,
        record_id: &str,
    ) -> Result<(), Error> {
        self.delete_with_params(
            &format!("/cases/{case_id}/records"),
            &[("record_id", record_id)],
        )
        .await
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn get_user(&self, id: &str) -> Result<User, Error> {
        self.get(&format!("/users/{id}")).await
    }

    pub async fn create_user(&self, user: &User) -> Result<User, Error> {
        self.post("/users", user).await
    }

    pub async fn update_user(&self, id: &str, user: &User) -> Result<User, Error> {
        self.put(&format!("/users/{id}"), user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/users/{id}")).await
    }

    // ── Directory groups ─────────────────────────────────────────────

    pub async fn get_directory_group(&self, id: &str) -> Result<DirectoryGroup, Error> {
        self.get(&format!("/directory_groups/{id}")).await
    }

    pub async fn create_directory_group(
        &self,
        group: &DirectoryGroup,
    ) -> Result<DirectoryGroup, Error> {
        self.post("/directory_groups", group).await
    }

    pub async fn update_directory_group(
        &self,
        id: &str,
        group: &DirectoryGroup,
    ) -> Result<DirectoryGroup, Error> {
        self.put(&format!("/directory_groups/{id}"), group).await
    }

    pub async fn delete_directory_group(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/directory_groups/{id}")).await
    }

    // ── Retention policies ───────────────────────────────────────────

    pub async fn get_retention_policy(&self, id: &str) -> Result<RetentionPolicy, Error> {
        self.get(&format!("/retention_policies/{id}")).await
    }

    pub async fn create_retention_policy(
        &self,
        policy: &RetentionPolicy,
    ) -> Result<RetentionPolicy, Error> {
        self.post("/retention_policies", policy).await
    }

    pub async fn update_retention_policy(
        &self,
        id: &str,
        policy: &RetentionPolicy,
    ) -> Result<RetentionPolicy, Error> {
        self.put(&format!("/retention_policies/{id}"), policy).await
    }

    pub async fn delete_retention_policy(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/retention_policies/{id}")).await
    }

    // ── Legal holds ──────────────────────────────────────────────────

    pub async fn get_legal_hold(&self, id: &str) -> Result<LegalHold, Error> {
        self.get(&format!("/legal_holds/{id}")).await
    }

    pub async fn create_legal_hold(&self, hold: &LegalHold) -> Result<LegalHold, Error> {
        self.post("/legal_holds", hold).await
    }

    pub async fn update_legal_hold(&self, id: &str, hold: &LegalHold) -> Result<LegalHold, Error> {
        self.put(&format!("/legal_holds/{id}"), hold).await
    }

    pub async fn delete_legal_hold(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/legal_holds/{id}")).await
    }

    // ── Tags ─────────────────────────────────────────────────────────

    pub async fn get_tag(&self, id: &str) -> Result<Tag, Error> {
        self.get(&format!("/tags/{id}")).await
    }

    pub async fn create_tag(&self, tag: &Tag) -> Result<Tag, Error> {
        self.post("/tags", tag).await
    }

    pub async fn update_tag(&self, id: &str, tag: &Tag) -> Result<Tag, Error> {
        self.put(&format!("/tags/{id}"), tag).await
    }

    pub async fn delete_tag(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/tags/{id}")).await
    }

    // ── Exports ──────────────────────────────────────────────────────

    pub async fn get_export(&self, id: &str) -> Result<Export, Error> {
        self.get(&format!("/exports/{id}")).await
    }

    pub async fn create_export(&self, export: &Export) -> Result<Export, Error> {
        self.post("/exports", export).await
    }

    pub async fn delete_export(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/exports/{id}")).await
    }

    // ── Records ──────────────────────────────────────────────────────

    pub async fn get_record(&self, id: &str) -> Result<Record, Error> {
        self.get(&format!("/records/{id}")).await
    }

    /// Set a record's review state, then re-read the record.
    ///
    /// The PUT response is never trusted; the returned record always comes
    /// from the follow-up GET.
    pub async fn update_record_review_state(
        &self,
        id: &str,
        review_state: &str,
        comment: Option<&str>,
    ) -> Result<Record, Error> {
        let path = format!("/records/{id}/review_state");
        let body = ReviewStateRequest {
            review_state,
            comment,
        };
        self.send_checked(Method::PUT, &path, &[], Some(&body)).await?;
        self.get_record(id).await
    }

    // ── Integration state ────────────────────────────────────────────

    pub async fn get_integration_state(&self, id: &str) -> Result<IntegrationState, Error> {
        let envelope: IntegrationStateEnvelope = self
            .get(&format!("/ingestion/integration/{id}/state"))
            .await?;
        Ok(envelope.state)
    }

    /// Pause or resume an integration and return its resulting state.
    ///
    /// The PUT response is used when it parses as a complete state (one
    /// with `last_run`); otherwise the state is re-read with a GET.
    pub async fn set_integration_state(
        &self,
        id: &str,
        paused: bool,
    ) -> Result<IntegrationState, Error> {
        let path = format!("/ingestion/integration/{id}/state");
        let body = IntegrationStateRequest {
            status: IntegrationStatus::from_paused(paused),
        };
        let resp = self.send_checked(Method::PUT, &path, &[], Some(&body)).await?;

        if let Some(state) = complete_state(&resp.body) {
            return Ok(state);
        }
        debug!(integration = id, "state update response incomplete, re-reading state");
        self.get_integration_state(id).await
    }

    // ── Read-only aggregates ─────────────────────────────────────────

    pub async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, Error> {
        self.get("/audit_logs").await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, Error> {
        self.get("/events").await
    }

    pub async fn list_analysis_policies(&self) -> Result<Vec<AnalysisPolicy>, Error> {
        let envelope: AnalysisPoliciesEnvelope = self.get("/analysis/policies").await?;
        Ok(envelope.policies)
    }

    pub async fn list_policy_hits(&self) -> Result<Vec<PolicyHit>, Error> {
        let envelope: PolicyHitsEnvelope = self.get("/analysis/policy_hits").await?;
        Ok(envelope.hits)
    }

    pub async fn get_system_status(&self) -> Result<SystemStatus, Error> {
        self.get("/system/status").await
    }

    pub async fn get_analysis(&self, id: &str) -> Result<Analysis, Error> {
        self.get(&format!("/analysis/{id}")).await
    }
}

/// Validate `endpoint` as an absolute http(s) URL and strip trailing slashes.
fn normalize_endpoint(endpoint: &str) -> Result<String, Error> {
    let invalid = |reason: String| Error::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason,
    };

    let trimmed = endpoint.trim();
    let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

/// Parse a state-update response, keeping it only if it is complete.
fn complete_state(body: &str) -> Option<IntegrationState> {
    serde_json::from_str::<IntegrationStateEnvelope>(body)
        .ok()
        .map(|envelope| envelope.state)
        .filter(IntegrationState::is_complete)
}
