use std::sync::Arc;

use log::*;
use osync_common::Secret;
use reqwest::{header::HeaderValue, Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::SpApiConfig,
    data_objects::{OrdersPage, OrdersQuery, OrdersResponse},
    SpApiError,
};

/// The header SP-API expects the Login-with-Amazon access token in.
pub const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";

#[derive(Clone)]
pub struct SpApi {
    config: SpApiConfig,
    client: Arc<Client>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<Secret<String>>,
    token_type: Option<String>,
    expires_in: Option<u64>,
}

impl SpApi {
    pub fn new(config: SpApiConfig) -> Result<Self, SpApiError> {
        let client = Client::builder()
            .user_agent(concat!("order_sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &SpApiConfig {
        &self.config
    }

    /// Exchanges the configured refresh token for a short-lived access token.
    ///
    /// Anything other than an HTTP 200 carrying an `access_token` field is an [`SpApiError::AuthError`]. The error
    /// message includes the body of the response so that the reason for the rejection is visible to the operator.
    pub async fn access_token(&self) -> Result<Secret<String>, SpApiError> {
        let credentials = &self.config.credentials;
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.reveal().as_str()),
            ("refresh_token", credentials.refresh_token.reveal().as_str()),
        ];
        debug!("🔑️ Requesting access token from {}", self.config.token_endpoint);
        let response = self
            .client
            .post(&self.config.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| SpApiError::AuthError(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| SpApiError::AuthError(e.to_string()))?;
        if status != StatusCode::OK {
            return Err(SpApiError::AuthError(format!("Error {}. {body}", status.as_u16())));
        }
        let token = serde_json::from_str::<TokenResponse>(&body)
            .map_err(|e| SpApiError::AuthError(format!("Token response is not valid JSON. {e}")))?;
        let access_token = token
            .access_token
            .filter(|t| !t.reveal().is_empty())
            .ok_or_else(|| SpApiError::AuthError(format!("Token response did not contain an access_token. {body}")))?;
        info!(
            "🔑️ Access token {access_token} obtained. Type: {}, expires in {}s",
            token.token_type.as_deref().unwrap_or("unknown"),
            token.expires_in.map(|t| t.to_string()).unwrap_or_else(|| "?".to_string())
        );
        Ok(access_token)
    }

    /// Fetches a single page of orders. Pass `None` as the cursor for the first page, and the `next_token` of the
    /// previous page for every page after that.
    pub async fn fetch_orders_page(
        &self,
        access_token: &Secret<String>,
        query: &OrdersQuery,
        cursor: Option<&str>,
    ) -> Result<OrdersPage, SpApiError> {
        let page_size = query.page_size.to_string();
        let mut params = vec![
            ("MarketplaceIds", query.marketplace_id.as_str()),
            ("CreatedAfter", query.created_after.as_str()),
            ("MaxResultsPerPage", page_size.as_str()),
        ];
        if let Some(token) = cursor {
            params.push(("NextToken", token));
        }
        let token = HeaderValue::from_str(access_token.reveal().as_str())
            .map_err(|e| SpApiError::Initialization(format!("Access token is not a valid header value. {e}")))?;
        trace!("📦️ Fetching orders from {}. Cursor: {cursor:?}", self.config.orders_endpoint);
        let response = self
            .client
            .get(&self.config.orders_endpoint)
            .header(ACCESS_TOKEN_HEADER, token)
            .query(&params)
            .send()
            .await
            .map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
        let status = response.status();
        if status == StatusCode::OK {
            let page = response
                .json::<OrdersResponse>()
                .await
                .map(OrdersPage::from)
                .map_err(|e| SpApiError::JsonError(e.to_string()))?;
            debug!(
                "📦️ Fetched {} orders. More pages: {}",
                page.orders.len(),
                if page.next_token.is_some() { "yes" } else { "no" }
            );
            Ok(page)
        } else {
            let message = response.text().await.map_err(|e| SpApiError::RestResponseError(e.to_string()))?;
            Err(SpApiError::FetchError { status: status.as_u16(), message })
        }
    }
}

#[cfg(test)]
mod test {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use actix_web::{http::StatusCode as ActixStatus, web, App, HttpRequest, HttpResponse, HttpServer};

    use super::*;
    use crate::SpApiCredentials;

    #[derive(Debug, Clone)]
    struct OrdersCall {
        access_token: Option<String>,
        params: HashMap<String, String>,
    }

    /// A stand-in for the LWA token endpoint and the orders endpoint. Order pages are served in sequence; the last one
    /// is repeated if more calls are made than there are pages.
    #[derive(Clone)]
    struct MockSpApi {
        token_response: (u16, String),
        pages: Vec<(u16, String)>,
        token_forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
        orders_calls: Arc<Mutex<Vec<OrdersCall>>>,
    }

    impl MockSpApi {
        fn new(token_response: (u16, &str), pages: &[(u16, &str)]) -> Self {
            Self {
                token_response: (token_response.0, token_response.1.to_string()),
                pages: pages.iter().map(|(s, b)| (*s, b.to_string())).collect(),
                token_forms: Arc::new(Mutex::new(Vec::new())),
                orders_calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        async fn start(&self) -> SpApi {
            let state = self.clone();
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(web::Data::new(state.clone()))
                    .route("/auth/o2/token", web::post().to(token_handler))
                    .route("/orders/v0/orders", web::get().to(orders_handler))
            })
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("Could not bind mock server");
            let addr = server.addrs()[0];
            actix_web::rt::spawn(server.run());
            let credentials = SpApiCredentials::new("client-id", "client-secret", "Atzr|refresh");
            let config = SpApiConfig::new(credentials).with_endpoints(
                &format!("http://{addr}/auth/o2/token"),
                &format!("http://{addr}/orders/v0/orders"),
            );
            SpApi::new(config).expect("Could not create client")
        }

        fn orders_calls(&self) -> Vec<OrdersCall> {
            self.orders_calls.lock().unwrap().clone()
        }
    }

    async fn token_handler(state: web::Data<MockSpApi>, form: web::Form<HashMap<String, String>>) -> HttpResponse {
        state.token_forms.lock().unwrap().push(form.into_inner());
        let (status, body) = state.token_response.clone();
        HttpResponse::build(ActixStatus::from_u16(status).unwrap()).content_type("application/json").body(body)
    }

    async fn orders_handler(
        state: web::Data<MockSpApi>,
        req: HttpRequest,
        query: web::Query<HashMap<String, String>>,
    ) -> HttpResponse {
        let access_token =
            req.headers().get(ACCESS_TOKEN_HEADER).and_then(|v| v.to_str().ok()).map(|s| s.to_string());
        let mut calls = state.orders_calls.lock().unwrap();
        calls.push(OrdersCall { access_token, params: query.into_inner() });
        let index = (calls.len() - 1).min(state.pages.len() - 1);
        let (status, body) = state.pages[index].clone();
        HttpResponse::build(ActixStatus::from_u16(status).unwrap()).content_type("application/json").body(body)
    }

    const TOKEN_OK: &str = r#"{"access_token":"Atza|access","refresh_token":"Atzr|refresh","token_type":"bearer","expires_in":3600}"#;
    const PAGE_1: &str = include_str!("./test_assets/orders_page.json");
    const PAGE_2: &str = r#"{"payload":{"Orders":[{"AmazonOrderId":"114-0000000-0000001","OrderStatus":"Unshipped"}]}}"#;

    fn query() -> OrdersQuery {
        OrdersQuery::new("ATVPDKIKX0DER", "2023-12-31", 100)
    }

    #[actix_web::test]
    async fn access_token_is_exchanged() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, TOKEN_OK), &[(200, "{}")]);
        let api = mock.start().await;
        let token = api.access_token().await.expect("Expected an access token");
        assert_eq!(token.reveal(), "Atza|access");
        let forms = mock.token_forms.lock().unwrap().clone();
        assert_eq!(forms.len(), 1);
        let form = &forms[0];
        assert_eq!(form["grant_type"], "refresh_token");
        assert_eq!(form["client_id"], "client-id");
        assert_eq!(form["client_secret"], "client-secret");
        assert_eq!(form["refresh_token"], "Atzr|refresh");
    }

    #[actix_web::test]
    async fn rejected_token_request_is_an_auth_error() {
        let _ = env_logger::try_init();
        let body = r#"{"error":"invalid_client","error_description":"Client authentication failed"}"#;
        let mock = MockSpApi::new((401, body), &[(200, "{}")]);
        let api = mock.start().await;
        match api.access_token().await {
            Err(SpApiError::AuthError(msg)) => {
                assert!(msg.contains("401"), "{msg}");
                assert!(msg.contains("Client authentication failed"), "{msg}");
            },
            other => panic!("Expected an AuthError, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn token_response_without_access_token() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, r#"{"token_type":"bearer"}"#), &[(200, "{}")]);
        let api = mock.start().await;
        let err = api.access_token().await.unwrap_err();
        assert!(matches!(err, SpApiError::AuthError(_)), "{err}");
    }

    #[actix_web::test]
    async fn token_response_is_not_json() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, "<html>Service Unavailable</html>"), &[(200, "{}")]);
        let api = mock.start().await;
        let err = api.access_token().await.unwrap_err();
        assert!(matches!(err, SpApiError::AuthError(_)), "{err}");
    }

    #[actix_web::test]
    async fn first_page_has_no_cursor() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, TOKEN_OK), &[(200, PAGE_1)]);
        let api = mock.start().await;
        let token = Secret::new("Atza|access".to_string());
        let page = api.fetch_orders_page(&token, &query(), None).await.expect("Expected a page");
        assert_eq!(page.orders.len(), 2);
        assert_eq!(page.next_token.as_deref(), Some("2YgYW55IGNhcm5hbCBwbGVhc3VyZS4="));
        let calls = mock.orders_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].access_token.as_deref(), Some("Atza|access"));
        assert_eq!(calls[0].params["MarketplaceIds"], "ATVPDKIKX0DER");
        assert_eq!(calls[0].params["CreatedAfter"], "2023-12-31");
        assert_eq!(calls[0].params["MaxResultsPerPage"], "100");
        assert!(!calls[0].params.contains_key("NextToken"));
    }

    #[actix_web::test]
    async fn cursor_is_sent_as_next_token() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, TOKEN_OK), &[(200, PAGE_2)]);
        let api = mock.start().await;
        let token = Secret::new("Atza|access".to_string());
        let page = api.fetch_orders_page(&token, &query(), Some("abc+/=")).await.expect("Expected a page");
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.orders[0].amazon_order_id.as_deref(), Some("114-0000000-0000001"));
        assert!(page.next_token.is_none());
        let calls = mock.orders_calls();
        assert_eq!(calls[0].params["NextToken"], "abc+/=");
    }

    #[actix_web::test]
    async fn throttled_fetch_is_a_fetch_error() {
        let _ = env_logger::try_init();
        let body = r#"{"errors":[{"code":"QuotaExceeded","message":"You exceeded your quota for the requested resource."}]}"#;
        let mock = MockSpApi::new((200, TOKEN_OK), &[(429, body)]);
        let api = mock.start().await;
        let token = Secret::new("Atza|access".to_string());
        match api.fetch_orders_page(&token, &query(), None).await {
            Err(SpApiError::FetchError { status, message }) => {
                assert_eq!(status, 429);
                assert!(message.contains("QuotaExceeded"));
            },
            other => panic!("Expected a FetchError, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn malformed_page_is_a_json_error() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, TOKEN_OK), &[(200, r#"{"payload":{"Orders":"nope"}}"#)]);
        let api = mock.start().await;
        let token = Secret::new("Atza|access".to_string());
        let err = api.fetch_orders_page(&token, &query(), None).await.unwrap_err();
        assert!(matches!(err, SpApiError::JsonError(_)), "{err}");
    }

    #[actix_web::test]
    async fn null_orders_is_the_last_page() {
        let _ = env_logger::try_init();
        let mock = MockSpApi::new((200, TOKEN_OK), &[(200, r#"{"payload":{"Orders":null}}"#)]);
        let api = mock.start().await;
        let token = Secret::new("Atza|access".to_string());
        let page = api.fetch_orders_page(&token, &query(), None).await.expect("Expected an empty page");
        assert!(page.orders.is_empty());
        assert!(page.next_token.is_none());
    }
}
