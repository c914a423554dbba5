//! reqwest adapter for the marketplace REST backend

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::application::AuthContext;
use crate::domain::{
    BookingGateway, BookingRecord, BookingRequest, FavoritesGateway, Property, PropertyGateway,
};
use crate::shared::errors::GatewayError;
use crate::shared::types::wire::{IdFields, WireId};

/// Talks to `{base_url}/properties`, `/bookings` and `/favorites`.
///
/// No client-side timeout and no retries: failures are whatever the
/// transport reports.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    auth: Option<AuthContext>,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: None,
        }
    }

    /// Attach the signed-in user's bearer token to every request.
    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(auth) => match auth.token().await {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, GatewayError> {
        let res = self.authorized(request).await.send().await.map_err(|e| {
            error!(error = %e, "Backend connection error");
            GatewayError::Transport(e)
        })?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            error!(status = status.as_u16(), %body, "Backend request failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PropertyGateway for HttpBackend {
    async fn get_property(&self, id: &str) -> Result<Property, GatewayError> {
        debug!(property_id = %id, "GET property");
        let url = self.url(&format!("properties/{id}"));
        self.send_json(self.client.get(url)).await
    }
}

#[async_trait]
impl BookingGateway for HttpBackend {
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingRecord, GatewayError> {
        debug!(property_id = %request.property_id, total = request.total_amount, "POST booking");
        let url = self.url("bookings");
        self.send_json(self.client.post(url).json(request)).await
    }
}

/// `/favorites` returns either bare ids or populated property objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum FavoriteEntry {
    Id(WireId),
    Populated(IdFields),
}

impl FavoriteEntry {
    fn into_id(self) -> Result<String, String> {
        match self {
            Self::Id(id) => Ok(id.into()),
            Self::Populated(fields) => fields.resolve(),
        }
    }
}

#[async_trait]
impl FavoritesGateway for HttpBackend {
    async fn list_favorites(&self) -> Result<Vec<String>, GatewayError> {
        let url = self.url("favorites");
        let entries: Vec<FavoriteEntry> = self.send_json(self.client.get(url)).await?;
        entries
            .into_iter()
            .map(|entry| {
                entry
                    .into_id()
                    .map_err(|e| GatewayError::Serialization(serde::de::Error::custom(e)))
            })
            .collect()
    }

    async fn add_favorite(&self, property_id: &str) -> Result<(), GatewayError> {
        let url = self.url("favorites");
        let body = serde_json::json!({ "propertyId": property_id });
        self.send(self.client.post(url).json(&body)).await.map(|_| ())
    }

    async fn remove_favorite(&self, property_id: &str) -> Result<(), GatewayError> {
        let url = self.url(&format!("favorites/{property_id}"));
        self.send(self.client.delete(url)).await.map(|_| ())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::domain::{CurrentUser, GuestCount, PaymentMethod, UserRole};
    use crate::infrastructure::storage::MemorySessionStore;

    /// Accept one connection, answer with `status` and `body`, and hand back
    /// the raw request text.
    async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (format!("http://{addr}/api/"), handle)
    }

    fn request() -> BookingRequest {
        BookingRequest {
            property_id: "p-42".into(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            guests: GuestCount::new(2),
            payment_method: PaymentMethod::Upi,
            total_amount: 7680,
        }
    }

    #[tokio::test]
    async fn create_booking_posts_json_and_decodes_record() {
        let (base, server) = serve_once(201, r#"{"id":"b-77","status":"pending"}"#).await;
        let backend = HttpBackend::new(base);

        let record = backend.create_booking(&request()).await.unwrap();
        assert_eq!(record.id, "b-77");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/bookings HTTP/1.1"));
        assert!(raw.contains(r#""totalAmount":7680"#));
        assert!(raw.contains(r#""paymentMethod":"upi""#));
    }

    #[tokio::test]
    async fn accepted_booking_with_id_virtual_is_confirmed() {
        let (base, server) =
            serve_once(201, r#"{"_id":"65f","id":"65f","status":"pending"}"#).await;
        let backend = HttpBackend::new(base);

        let record = backend.create_booking(&request()).await.unwrap();
        assert_eq!(record.id, "65f");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, server) = serve_once(409, r#"{"message":"dates taken"}"#).await;
        let backend = HttpBackend::new(base);

        let err = backend.create_booking(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 409, ref body } if body.contains("dates taken")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn missing_property_is_not_found() {
        let (base, server) = serve_once(404, r#"{"message":"no such property"}"#).await;
        let backend = HttpBackend::new(base);

        let err = backend.get_property("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(server.await.unwrap().starts_with("GET /api/properties/nope HTTP/1.1"));
    }

    #[tokio::test]
    async fn signed_in_requests_carry_bearer_token() {
        let auth = AuthContext::new(Arc::new(MemorySessionStore::new()));
        auth.sign_in(CurrentUser {
            id: "u-1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: UserRole::Guest,
            token: "tok-123".into(),
        })
        .await
        .unwrap();

        let (base, server) = serve_once(200, r#"["p-1", {"_id": "p-2"}, {"id": 3}, {"_id": "p-4", "id": "p-4"}]"#).await;
        let backend = HttpBackend::new(base).with_auth(auth);

        let ids = backend.list_favorites().await.unwrap();
        assert_eq!(ids, vec!["p-1", "p-2", "3", "p-4"]);

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(raw.contains("authorization: bearer tok-123"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(format!("http://{addr}"));
        let err = backend.get_property("p-1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
