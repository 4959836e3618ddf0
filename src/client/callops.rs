//! Platform backend API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{
    AdminApi, AssistantApi, AuthApi, CalendarApi, DocumentApi, PaymentApi, PhoneApi, ReportApi,
};
use super::models::{
    Ack, AddPaymentMethodRequest, AdminUser, Assistant, AssistantUpdateRequest,
    AttachPhoneNumberRequest, BuyPhoneNumberRequest, CalendarIntegration, CallRecord,
    CallReportPage, Document, EventTypeLookup, ForgotPasswordRequest, ImpersonateRequest,
    PaymentMethod, PaymentReceipt, PaymentRequest, PhoneNumber, ResetPasswordRequest,
    SessionUser, SignInRequest, SignInResponse, SignUpRequest, TokenResponse, UsageSummary,
};
use super::pagination::{CallFilterParams, PagedResponse, PaginationParams};
use super::rate_limit::{EndpointCategory, RateLimiterSet};
use crate::error::{ApiError, Result};
use crate::notify::GENERIC_FAILURE;
use crate::session::{Credentials, SessionManager, SessionValidator, TokenRefresher, TokenStore};

/// Path of the token refresh endpoint; a 401 here is never retried
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Message used when the backend rejects a request without saying why

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body variants; kept owned so a request can be rebuilt for a retry
enum Payload {
    Empty,
    Json(Value),
    File { file_name: String, contents: Vec<u8> },
}

/// Whether a request carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// Client for the platform backend.
///
/// The refresh credential travels as a cookie in the client's jar; the access
/// token is owned by the embedded [`SessionManager`].
pub struct CallOpsClient {
    http: HttpClient,
    base_url: String,
    jar: Arc<Jar>,
    session: SessionManager,
    rate_limiters: Arc<RateLimiterSet>,
}

impl CallOpsClient {
    /// Create a client for `host`, restoring any session held by `store`
    pub fn new(host: &str, store: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = format!("{}/api", host.trim_end_matches('/'));
        let refresh_url = parse_url(&format!("{}{}", base_url, REFRESH_PATH))?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = store.load().and_then(|c| c.refresh_cookie) {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &refresh_url);
            }
        }

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let refresher = Arc::new(HttpRefresher {
            http: http.clone(),
            jar: Arc::clone(&jar),
            refresh_url,
        });

        Ok(Self {
            http,
            base_url,
            jar,
            session: SessionManager::new(refresher, store),
            rate_limiters: Arc::new(RateLimiterSet::new()),
        })
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cookie header the jar would send to the refresh endpoint
    fn refresh_cookie(&self) -> Option<String> {
        let url = Url::parse(&format!("{}{}", self.base_url, REFRESH_PATH)).ok()?;
        cookie_header(&self.jar, &url)
    }

    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        query: &[(&'static str, String)],
        payload: &Payload,
        token: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::File {
                file_name,
                contents,
            } => {
                let part = Part::bytes(contents.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime_for(file_name))
                    .map_err(ApiError::from)?;
                request.multipart(Form::new().part("file", part))
            }
        };

        Ok(request.send().await.map_err(ApiError::from)?)
    }

    /// Send a request, refreshing the session once on 401
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        payload: Payload,
        auth: Auth,
    ) -> Result<T> {
        let category = EndpointCategory::from_request(path, &method);
        self.rate_limiters.wait_for(category).await;

        let token = match auth {
            Auth::Bearer => Some(self.session.valid_token().await?),
            Auth::Anonymous => None,
        };

        let mut response = self
            .send_once(&method, path, query, &payload, token.as_deref())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED
            && auth == Auth::Bearer
            && path != REFRESH_PATH
        {
            debug!("{} {} returned 401, refreshing session", method, path);
            let fresh = self.session.refresh_after(token.as_deref()).await?;
            response = self
                .send_once(&method, path, query, &payload, Some(&fresh))
                .await?;
        }

        self.handle_response(response, category).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        category: EndpointCategory,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            self.rate_limiters.activate(category);
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into());
        }

        let body = response.text().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to read response: {}", e))
        })?;

        if status.is_success() {
            return decode_success(&body);
        }

        let detail = error_detail(&body);
        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(detail.unwrap_or_else(|| "Resource not found".to_string()))
            }
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                match detail {
                    Some(detail) => ApiError::Rejected(detail),
                    None => ApiError::BadRequest(body),
                }
            }
            s if s.is_server_error() => {
                ApiError::ServerError(detail.unwrap_or_else(|| format!("Server error: {}", s)))
            }
            s => ApiError::InvalidResponse(format!("Unexpected status code: {}", s)),
        };
        Err(err.into())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, &[], Payload::Empty, Auth::Bearer)
            .await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        self.execute(Method::GET, path, query, Payload::Empty, Auth::Bearer)
            .await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.execute(method, path, &[], Payload::Json(body), auth)
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::DELETE, path, &[], Payload::Empty, Auth::Bearer)
            .await
    }
}

/// Exchanges the refresh cookie for a new access token
struct HttpRefresher {
    http: HttpClient,
    jar: Arc<Jar>,
    refresh_url: Url,
}

#[async_trait]
impl TokenRefresher for HttpRefresher {
    async fn refresh(&self) -> std::result::Result<Credentials, ApiError> {
        let response = self
            .http
            .post(self.refresh_url.clone())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ApiError::ServerError(format!(
                "Token refresh failed with status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let token: TokenResponse = decode_success(&body).map_err(|e| match e {
            crate::error::Error::Api(api) => api,
            other => ApiError::InvalidResponse(other.to_string()),
        })?;

        Ok(Credentials {
            access_token: token.access_token,
            refresh_cookie: cookie_header(&self.jar, &self.refresh_url),
        })
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| ApiError::Network(format!("Invalid API host: {}", e)).into())
}

fn cookie_header(jar: &Jar, url: &Url) -> Option<String> {
    jar.cookies(url)
        .and_then(|value| value.to_str().ok().map(str::to_string))
}

/// Decode a 2xx body, honoring the `{success: false, detail}` convention
fn decode_success<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value = if body.trim().is_empty() {
        serde_json::json!({ "success": true })
    } else {
        serde_json::from_str(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?
    };

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let detail = value
            .get("detail")
            .and_then(detail_text)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(ApiError::Rejected(detail).into());
    }

    serde_json::from_value(value).map_err(|e| {
        ApiError::InvalidResponse(format!("Unexpected response shape: {}", e)).into()
    })
}

/// Pull a human-readable `detail` out of an error body
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("detail").and_then(detail_text)
}

/// `detail` is either a string or a list of `{msg}` validation entries
fn detail_text(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AuthApi for CallOpsClient {
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse> {
        let response: SignInResponse = self
            .send_json(Method::POST, "/auth/sign-in", request, Auth::Anonymous)
            .await?;

        self.session
            .set_credentials(Credentials {
                access_token: response.access_token.clone(),
                refresh_cookie: self.refresh_cookie(),
            })
            .await?;

        Ok(response)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Ack> {
        self.send_json(Method::POST, "/auth/sign-up", request, Auth::Anonymous)
            .await
    }

    async fn logout(&self) -> Result<Ack> {
        let outcome: Result<Ack> = self
            .execute(Method::POST, "/auth/logout", &[], Payload::Empty, Auth::Bearer)
            .await;

        // Local state goes regardless of what the backend said
        self.session.clear().await?;
        outcome
    }

    async fn validate_token(&self) -> Result<SessionUser> {
        #[derive(serde::Deserialize)]
        struct ValidateResponse {
            user: SessionUser,
        }

        let response: ValidateResponse = self.get("/auth/validate-token").await?;
        Ok(response.user)
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<Ack> {
        self.send_json(Method::POST, "/auth/forgot-password", request, Auth::Anonymous)
            .await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Ack> {
        self.send_json(Method::POST, "/auth/reset-password", request, Auth::Anonymous)
            .await
    }
}

#[async_trait]
impl SessionValidator for CallOpsClient {
    async fn validate_session(&self) -> Result<SessionUser> {
        self.validate_token().await
    }
}

#[async_trait]
impl AssistantApi for CallOpsClient {
    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        #[derive(serde::Deserialize)]
        struct AssistantsResponse {
            #[serde(default)]
            assistants: Vec<Assistant>,
        }

        let response: AssistantsResponse = self.get("/assistants").await?;
        Ok(response.assistants)
    }

    async fn get_assistant(&self, id: &str) -> Result<Assistant> {
        #[derive(serde::Deserialize)]
        struct AssistantResponse {
            assistant: Assistant,
        }

        let response: AssistantResponse = self.get(&format!("/assistants/{}", id)).await?;
        Ok(response.assistant)
    }

    async fn create_assistant(&self, request: &AssistantUpdateRequest) -> Result<Assistant> {
        #[derive(serde::Deserialize)]
        struct AssistantResponse {
            assistant: Assistant,
        }

        let response: AssistantResponse = self
            .send_json(Method::POST, "/assistants", request, Auth::Bearer)
            .await?;
        Ok(response.assistant)
    }

    async fn update_assistant(&self, id: &str, request: &AssistantUpdateRequest) -> Result<Ack> {
        self.send_json(
            Method::PUT,
            &format!("/assistants/{}", id),
            request,
            Auth::Bearer,
        )
        .await
    }

    async fn delete_assistant(&self, id: &str) -> Result<Ack> {
        self.delete(&format!("/assistants/{}", id)).await
    }
}

#[async_trait]
impl PhoneApi for CallOpsClient {
    async fn list_phone_numbers(&self) -> Result<Vec<PhoneNumber>> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PhoneNumbersResponse {
            #[serde(default)]
            phone_numbers: Vec<PhoneNumber>,
        }

        let response: PhoneNumbersResponse = self.get("/phone-numbers").await?;
        Ok(response.phone_numbers)
    }

    async fn buy_phone_number(&self, request: &BuyPhoneNumberRequest) -> Result<PhoneNumber> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PhoneNumberResponse {
            phone_number: PhoneNumber,
        }

        let response: PhoneNumberResponse = self
            .send_json(Method::POST, "/phone-numbers", request, Auth::Bearer)
            .await?;
        Ok(response.phone_number)
    }

    async fn attach_phone_number(
        &self,
        id: &str,
        request: &AttachPhoneNumberRequest,
    ) -> Result<Ack> {
        self.send_json(
            Method::PUT,
            &format!("/phone-numbers/{}", id),
            request,
            Auth::Bearer,
        )
        .await
    }

    async fn release_phone_number(&self, id: &str) -> Result<Ack> {
        self.delete(&format!("/phone-numbers/{}", id)).await
    }
}

#[async_trait]
impl DocumentApi for CallOpsClient {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        #[derive(serde::Deserialize)]
        struct DocumentsResponse {
            #[serde(default)]
            documents: Vec<Document>,
        }

        let response: DocumentsResponse = self.get("/documents").await?;
        Ok(response.documents)
    }

    async fn upload_document(&self, file_name: &str, contents: Vec<u8>) -> Result<Document> {
        #[derive(serde::Deserialize)]
        struct DocumentResponse {
            document: Document,
        }

        let payload = Payload::File {
            file_name: file_name.to_string(),
            contents,
        };
        let response: DocumentResponse = self
            .execute(Method::POST, "/documents", &[], payload, Auth::Bearer)
            .await?;
        Ok(response.document)
    }

    async fn delete_document(&self, id: &str) -> Result<Ack> {
        self.delete(&format!("/documents/{}", id)).await
    }
}

#[async_trait]
impl PaymentApi for CallOpsClient {
    async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct PaymentMethodsResponse {
            #[serde(default)]
            payment_methods: Vec<PaymentMethod>,
        }

        let response: PaymentMethodsResponse = self.get("/payment-methods").await?;
        Ok(response.payment_methods)
    }

    async fn add_payment_method(&self, request: &AddPaymentMethodRequest) -> Result<Ack> {
        self.send_json(Method::POST, "/payment-methods", request, Auth::Bearer)
            .await
    }

    async fn set_default_payment_method(&self, id: &str) -> Result<Ack> {
        self.execute(
            Method::PUT,
            &format!("/payment-methods/{}/default", id),
            &[],
            Payload::Empty,
            Auth::Bearer,
        )
        .await
    }

    async fn delete_payment_method(&self, id: &str) -> Result<Ack> {
        self.delete(&format!("/payment-methods/{}", id)).await
    }

    async fn pay(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        self.send_json(Method::POST, "/payments", request, Auth::Bearer)
            .await
    }
}

#[async_trait]
impl CalendarApi for CallOpsClient {
    async fn lookup_event_types(&self, api_key: &str) -> Result<EventTypeLookup> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct LookupRequest<'a> {
            api_key: &'a str,
        }

        self.send_json(
            Method::POST,
            "/calendar/event-types",
            &LookupRequest { api_key },
            Auth::Bearer,
        )
        .await
    }

    async fn get_calendar_integration(&self) -> Result<Option<CalendarIntegration>> {
        #[derive(serde::Deserialize)]
        struct IntegrationResponse {
            #[serde(default)]
            integration: Option<CalendarIntegration>,
        }

        let response: IntegrationResponse = self.get("/calendar/integration").await?;
        Ok(response.integration)
    }

    async fn save_calendar_integration(&self, integration: &CalendarIntegration) -> Result<Ack> {
        self.send_json(
            Method::PUT,
            "/calendar/integration",
            integration,
            Auth::Bearer,
        )
        .await
    }
}

#[async_trait]
impl ReportApi for CallOpsClient {
    async fn list_calls(
        &self,
        pagination: &PaginationParams,
        filters: &CallFilterParams,
    ) -> Result<PagedResponse<CallRecord>> {
        let mut query = pagination.to_query_params();
        query.extend(filters.to_query_params());

        let page: CallReportPage = self.get_with_query("/reports/calls", &query).await?;
        Ok(PagedResponse::new(
            page.calls,
            page.total_count,
            pagination.page.unwrap_or(1).max(1),
            pagination.effective_page_size(),
        ))
    }

    async fn usage_summary(&self, filters: &CallFilterParams) -> Result<UsageSummary> {
        self.get_with_query("/reports/usage", &filters.to_query_params())
            .await
    }
}

#[async_trait]
impl AdminApi for CallOpsClient {
    async fn list_users(&self) -> Result<Vec<AdminUser>> {
        #[derive(serde::Deserialize)]
        struct UsersResponse {
            #[serde(default)]
            users: Vec<AdminUser>,
        }

        let response: UsersResponse = self.get("/admin/users").await?;
        Ok(response.users)
    }

    async fn impersonate(&self, user_id: &str) -> Result<TokenResponse> {
        let request = ImpersonateRequest {
            user_id: user_id.to_string(),
        };
        self.send_json(Method::POST, "/admin/impersonate", &request, Auth::Bearer)
            .await
    }
}
