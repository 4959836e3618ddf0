//! Mock platform client for testing
//!
//! Implements every API trait in memory so command logic can be exercised
//! without a backend.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{
    AdminApi, AssistantApi, AuthApi, CalendarApi, DocumentApi, PaymentApi, PhoneApi, ReportApi,
};
use super::models::{
    Ack, AddPaymentMethodRequest, AdminUser, Assistant, AssistantUpdateRequest,
    AttachPhoneNumberRequest, BuyPhoneNumberRequest, CalendarIntegration, CallRecord, Document,
    EventTypeLookup, ForgotPasswordRequest, PaymentMethod, PaymentReceipt, PaymentRequest,
    PhoneNumber, ResetPasswordRequest, SessionUser, SignInRequest, SignInResponse, SignUpRequest,
    TokenResponse, UsageSummary,
};
use super::pagination::{CallFilterParams, PagedResponse, PaginationParams};
use crate::error::{ApiError, Result};
use crate::session::SessionValidator;

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockCallOpsClient::new()
///     .with_assistants(vec![assistant("asst-1", "Ava")])
///     .await;
///
/// let assistants = mock.list_assistants().await?;
/// assert_eq!(assistants.len(), 1);
/// ```
#[derive(Default)]
pub struct MockCallOpsClient {
    assistants: Arc<Mutex<Vec<Assistant>>>,
    phone_numbers: Arc<Mutex<Vec<PhoneNumber>>>,
    documents: Arc<Mutex<Vec<Document>>>,
    payment_methods: Arc<Mutex<Vec<PaymentMethod>>>,
    /// Call log, one inner vec per page (page 1 first)
    call_pages: Arc<Mutex<Vec<Vec<CallRecord>>>>,
    usage: Arc<Mutex<UsageSummary>>,
    users: Arc<Mutex<Vec<AdminUser>>>,
    integration: Arc<Mutex<Option<CalendarIntegration>>>,
    /// User returned from validate_token; `None` means no session
    session_user: Arc<Mutex<Option<SessionUser>>>,
    /// Error to return on the next call, consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Every call recorded in order
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "update_assistant")
    pub method: String,
    /// Resource ID the call targeted, if any
    pub id: Option<String>,
    /// Serialized request body, if any
    pub body: Option<Value>,
}

impl MockCallOpsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_assistants(self, assistants: Vec<Assistant>) -> Self {
        *self.assistants.lock().await = assistants;
        self
    }

    pub async fn with_phone_numbers(self, numbers: Vec<PhoneNumber>) -> Self {
        *self.phone_numbers.lock().await = numbers;
        self
    }

    pub async fn with_documents(self, documents: Vec<Document>) -> Self {
        *self.documents.lock().await = documents;
        self
    }

    pub async fn with_payment_methods(self, methods: Vec<PaymentMethod>) -> Self {
        *self.payment_methods.lock().await = methods;
        self
    }

    pub async fn with_call_pages(self, pages: Vec<Vec<CallRecord>>) -> Self {
        *self.call_pages.lock().await = pages;
        self
    }

    pub async fn with_users(self, users: Vec<AdminUser>) -> Self {
        *self.users.lock().await = users;
        self
    }

    pub async fn with_session_user(self, user: SessionUser) -> Self {
        *self.session_user.lock().await = Some(user);
        self
    }

    /// Configure an error to return on the next API call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Number of times `method` was called
    pub async fn call_count(&self, method: &str) -> usize {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    /// Record the call, then fail if an error is pending
    async fn record(&self, method: &str, id: Option<&str>, body: Option<Value>) -> Result<()> {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            id: id.map(str::to_string),
            body,
        });

        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

fn body_of<T: serde::Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockCallOpsClient {
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse> {
        self.record("sign_in", None, None).await?;

        let user = SessionUser {
            id: Some("user-1".to_string()),
            email: request.email.clone(),
            name: None,
            role: Some("user".to_string()),
        };
        *self.session_user.lock().await = Some(user.clone());

        Ok(SignInResponse {
            access_token: "mock-access-token".to_string(),
            user: Some(user),
        })
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Ack> {
        self.record("sign_up", None, body_of(request)).await?;
        Ok(Ack::ok("Account created"))
    }

    async fn logout(&self) -> Result<Ack> {
        self.record("logout", None, None).await?;
        *self.session_user.lock().await = None;
        Ok(Ack::ok("Signed out"))
    }

    async fn validate_token(&self) -> Result<SessionUser> {
        self.record("validate_token", None, None).await?;
        self.session_user
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::Unauthorized.into())
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<Ack> {
        self.record("forgot_password", None, body_of(request)).await?;
        Ok(Ack::ok("Reset email sent"))
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Ack> {
        self.record("reset_password", None, body_of(request)).await?;
        Ok(Ack::ok("Password updated"))
    }
}

#[async_trait]
impl SessionValidator for MockCallOpsClient {
    async fn validate_session(&self) -> Result<SessionUser> {
        self.validate_token().await
    }
}

// ============================================================================
// AssistantApi Implementation
// ============================================================================

#[async_trait]
impl AssistantApi for MockCallOpsClient {
    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        self.record("list_assistants", None, None).await?;
        Ok(self.assistants.lock().await.clone())
    }

    async fn get_assistant(&self, id: &str) -> Result<Assistant> {
        self.record("get_assistant", Some(id), None).await?;
        self.assistants
            .lock()
            .await
            .iter()
            .find(|a| a.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Assistant {}", id)).into())
    }

    async fn create_assistant(&self, request: &AssistantUpdateRequest) -> Result<Assistant> {
        let body = serde_json::to_value(request)?;
        self.record("create_assistant", None, Some(body.clone()))
            .await?;

        let mut assistants = self.assistants.lock().await;
        let mut created: Assistant = serde_json::from_value(body)?;
        created.id = Some(format!("asst-{}", assistants.len() + 1));
        assistants.push(created.clone());
        Ok(created)
    }

    async fn update_assistant(&self, id: &str, request: &AssistantUpdateRequest) -> Result<Ack> {
        let body = serde_json::to_value(request)?;
        self.record("update_assistant", Some(id), Some(body.clone()))
            .await?;

        let mut assistants = self.assistants.lock().await;
        let Some(existing) = assistants.iter_mut().find(|a| a.id.as_deref() == Some(id)) else {
            return Err(ApiError::NotFound(format!("Assistant {}", id)).into());
        };
        let mut updated: Assistant = serde_json::from_value(body)?;
        updated.id = existing.id.clone();
        updated.created_at = existing.created_at.clone();
        *existing = updated;
        Ok(Ack::ok("Assistant updated"))
    }

    async fn delete_assistant(&self, id: &str) -> Result<Ack> {
        self.record("delete_assistant", Some(id), None).await?;
        self.assistants
            .lock()
            .await
            .retain(|a| a.id.as_deref() != Some(id));
        Ok(Ack::ok("Assistant deleted"))
    }
}

// ============================================================================
// PhoneApi Implementation
// ============================================================================

#[async_trait]
impl PhoneApi for MockCallOpsClient {
    async fn list_phone_numbers(&self) -> Result<Vec<PhoneNumber>> {
        self.record("list_phone_numbers", None, None).await?;
        Ok(self.phone_numbers.lock().await.clone())
    }

    async fn buy_phone_number(&self, request: &BuyPhoneNumberRequest) -> Result<PhoneNumber> {
        self.record("buy_phone_number", None, body_of(request))
            .await?;

        let mut numbers = self.phone_numbers.lock().await;
        let number = PhoneNumber {
            id: format!("pn-{}", numbers.len() + 1),
            number: format!("+1{}5550100", request.area_code),
            assistant_id: request.assistant_id.clone(),
            provider: Some("mock".to_string()),
            created_at: None,
        };
        numbers.push(number.clone());
        Ok(number)
    }

    async fn attach_phone_number(
        &self,
        id: &str,
        request: &AttachPhoneNumberRequest,
    ) -> Result<Ack> {
        self.record("attach_phone_number", Some(id), body_of(request))
            .await?;

        let mut numbers = self.phone_numbers.lock().await;
        match numbers.iter_mut().find(|n| n.id == id) {
            Some(number) => {
                number.assistant_id = request.assistant_id.clone();
                Ok(Ack::ok("Phone number updated"))
            }
            None => Err(ApiError::NotFound(format!("Phone number {}", id)).into()),
        }
    }

    async fn release_phone_number(&self, id: &str) -> Result<Ack> {
        self.record("release_phone_number", Some(id), None).await?;
        self.phone_numbers.lock().await.retain(|n| n.id != id);
        Ok(Ack::ok("Phone number released"))
    }
}

// ============================================================================
// DocumentApi Implementation
// ============================================================================

#[async_trait]
impl DocumentApi for MockCallOpsClient {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        self.record("list_documents", None, None).await?;
        Ok(self.documents.lock().await.clone())
    }

    async fn upload_document(&self, file_name: &str, contents: Vec<u8>) -> Result<Document> {
        self.record("upload_document", None, None).await?;

        let mut documents = self.documents.lock().await;
        let document = Document {
            id: format!("doc-{}", documents.len() + 1),
            name: file_name.to_string(),
            size: Some(contents.len() as u64),
            mime_type: None,
            status: Some("processing".to_string()),
            created_at: None,
        };
        documents.push(document.clone());
        Ok(document)
    }

    async fn delete_document(&self, id: &str) -> Result<Ack> {
        self.record("delete_document", Some(id), None).await?;
        self.documents.lock().await.retain(|d| d.id != id);
        Ok(Ack::ok("Document deleted"))
    }
}

// ============================================================================
// PaymentApi Implementation
// ============================================================================

#[async_trait]
impl PaymentApi for MockCallOpsClient {
    async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        self.record("list_payment_methods", None, None).await?;
        Ok(self.payment_methods.lock().await.clone())
    }

    async fn add_payment_method(&self, request: &AddPaymentMethodRequest) -> Result<Ack> {
        self.record("add_payment_method", None, body_of(request))
            .await?;
        Ok(Ack::ok("Payment method added"))
    }

    async fn set_default_payment_method(&self, id: &str) -> Result<Ack> {
        self.record("set_default_payment_method", Some(id), None)
            .await?;
        for method in self.payment_methods.lock().await.iter_mut() {
            method.is_default = method.id == id;
        }
        Ok(Ack::ok("Default payment method updated"))
    }

    async fn delete_payment_method(&self, id: &str) -> Result<Ack> {
        self.record("delete_payment_method", Some(id), None).await?;
        self.payment_methods.lock().await.retain(|m| m.id != id);
        Ok(Ack::ok("Payment method removed"))
    }

    async fn pay(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        self.record("pay", None, body_of(request)).await?;
        Ok(PaymentReceipt {
            payment_id: Some("pay-1".to_string()),
            status: Some("succeeded".to_string()),
            detail: None,
        })
    }
}

// ============================================================================
// CalendarApi Implementation
// ============================================================================

#[async_trait]
impl CalendarApi for MockCallOpsClient {
    async fn lookup_event_types(&self, _api_key: &str) -> Result<EventTypeLookup> {
        self.record("lookup_event_types", None, None).await?;
        Ok(EventTypeLookup {
            event_types: Vec::new(),
            timezone: None,
        })
    }

    async fn get_calendar_integration(&self) -> Result<Option<CalendarIntegration>> {
        self.record("get_calendar_integration", None, None).await?;
        Ok(self.integration.lock().await.clone())
    }

    async fn save_calendar_integration(&self, integration: &CalendarIntegration) -> Result<Ack> {
        self.record("save_calendar_integration", None, body_of(integration))
            .await?;
        *self.integration.lock().await = Some(integration.clone());
        Ok(Ack::ok("Calendar connected"))
    }
}

// ============================================================================
// ReportApi Implementation
// ============================================================================

#[async_trait]
impl ReportApi for MockCallOpsClient {
    async fn list_calls(
        &self,
        pagination: &PaginationParams,
        _filters: &CallFilterParams,
    ) -> Result<PagedResponse<CallRecord>> {
        let page = pagination.page.unwrap_or(1).max(1);
        self.record("list_calls", Some(&page.to_string()), None)
            .await?;

        // Seeded pages set the default size; a requested page size re-slices them
        let pages = self.call_pages.lock().await;
        let page_size = pagination
            .page_size
            .unwrap_or_else(|| pages.first().map_or(1, Vec::len))
            .max(1);
        let all: Vec<CallRecord> = pages.iter().flatten().cloned().collect();
        let items = all
            .chunks(page_size)
            .nth(page - 1)
            .map(<[CallRecord]>::to_vec)
            .unwrap_or_default();
        Ok(PagedResponse::new(items, Some(all.len()), page, page_size))
    }

    async fn usage_summary(&self, _filters: &CallFilterParams) -> Result<UsageSummary> {
        self.record("usage_summary", None, None).await?;
        Ok(self.usage.lock().await.clone())
    }
}

// ============================================================================
// AdminApi Implementation
// ============================================================================

#[async_trait]
impl AdminApi for MockCallOpsClient {
    async fn list_users(&self) -> Result<Vec<AdminUser>> {
        self.record("list_users", None, None).await?;
        Ok(self.users.lock().await.clone())
    }

    async fn impersonate(&self, user_id: &str) -> Result<TokenResponse> {
        self.record("impersonate", Some(user_id), None).await?;
        Ok(TokenResponse {
            access_token: format!("mock-token-for-{}", user_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::AssistantDraft;

    fn assistant(id: &str, name: &str) -> Assistant {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
    }

    #[tokio::test]
    async fn test_one_shot_error_is_consumed() {
        let mock = MockCallOpsClient::new()
            .with_error(ApiError::ServerError("down".to_string()))
            .await;

        assert!(mock.list_assistants().await.is_err());
        assert!(mock.list_assistants().await.is_ok());
        assert_eq!(mock.call_count("list_assistants").await, 2);
    }

    #[tokio::test]
    async fn test_update_preserves_identity() {
        let mock = MockCallOpsClient::new()
            .with_assistants(vec![assistant("asst-1", "Ava")])
            .await;

        let mut draft = AssistantDraft::from(assistant("asst-1", "Ava"));
        draft.name = "Ava 2".to_string();
        mock.update_assistant("asst-1", &draft.to_update_request())
            .await
            .unwrap();

        let updated = mock.get_assistant("asst-1").await.unwrap();
        assert_eq!(updated.name, "Ava 2");
        assert_eq!(updated.id.as_deref(), Some("asst-1"));
    }

    #[tokio::test]
    async fn test_call_pages() {
        let call = |id: &str| -> CallRecord {
            serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
        };
        let mock = MockCallOpsClient::new()
            .with_call_pages(vec![vec![call("c1"), call("c2")], vec![call("c3")]])
            .await;

        let first = mock
            .list_calls(&PaginationParams::new(), &CallFilterParams::default())
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.remaining_pages(), vec![2]);
    }

    #[tokio::test]
    async fn test_validate_without_session_is_unauthorized() {
        let mock = MockCallOpsClient::new();
        assert!(matches!(
            mock.validate_token().await,
            Err(crate::error::Error::Api(ApiError::Unauthorized))
        ));
    }
}
