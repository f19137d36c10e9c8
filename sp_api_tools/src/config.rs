use log::*;
use osync_common::{helpers::non_blank, Secret};

use crate::SpApiError;

pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://api.amazon.com/auth/o2/token";
pub const DEFAULT_ORDERS_ENDPOINT: &str = "https://sellingpartnerapi-na.amazon.com/orders/v0/orders";

/// The Login-with-Amazon credentials used to mint access tokens.
#[derive(Debug, Clone, Default)]
pub struct SpApiCredentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub refresh_token: Secret<String>,
}

impl SpApiCredentials {
    pub fn new(client_id: &str, client_secret: &str, refresh_token: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: Secret::new(client_secret.to_string()),
            refresh_token: Secret::new(refresh_token.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpApiConfig {
    pub token_endpoint: String,
    pub orders_endpoint: String,
    pub credentials: SpApiCredentials,
}

impl SpApiConfig {
    pub fn new(credentials: SpApiCredentials) -> Self {
        Self {
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            orders_endpoint: DEFAULT_ORDERS_ENDPOINT.to_string(),
            credentials,
        }
    }

    pub fn with_endpoints(mut self, token_endpoint: &str, orders_endpoint: &str) -> Self {
        self.token_endpoint = token_endpoint.to_string();
        self.orders_endpoint = orders_endpoint.to_string();
        self
    }

    /// Loads the configuration from the environment.
    ///
    /// `AMAZON_OAUTH_CLIENT_ID`, `AMAZON_OAUTH_CLIENT_SECRET` and `AMAZON_OAUTH_REFRESH_TOKEN` are mandatory. The
    /// endpoints can be overridden with `OSYNC_TOKEN_ENDPOINT` and `OSYNC_ORDERS_ENDPOINT`.
    pub fn try_from_env() -> Result<Self, SpApiError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, SpApiError>
    where F: Fn(&str) -> Option<String> {
        let required = |name: &str| {
            non_blank(var(name)).ok_or_else(|| SpApiError::Initialization(format!("{name} is not set")))
        };
        let client_id = required("AMAZON_OAUTH_CLIENT_ID")?;
        let client_secret = Secret::new(required("AMAZON_OAUTH_CLIENT_SECRET")?);
        let refresh_token = Secret::new(required("AMAZON_OAUTH_REFRESH_TOKEN")?);
        let token_endpoint = non_blank(var("OSYNC_TOKEN_ENDPOINT")).unwrap_or_else(|| {
            debug!("🪛️ OSYNC_TOKEN_ENDPOINT not set, using {DEFAULT_TOKEN_ENDPOINT}");
            DEFAULT_TOKEN_ENDPOINT.to_string()
        });
        let orders_endpoint = non_blank(var("OSYNC_ORDERS_ENDPOINT")).unwrap_or_else(|| {
            debug!("🪛️ OSYNC_ORDERS_ENDPOINT not set, using {DEFAULT_ORDERS_ENDPOINT}");
            DEFAULT_ORDERS_ENDPOINT.to_string()
        });
        let credentials = SpApiCredentials { client_id, client_secret, refresh_token };
        Ok(Self { token_endpoint, orders_endpoint, credentials })
    }
}
