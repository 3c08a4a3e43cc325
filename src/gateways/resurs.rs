use crate::domain::credentials::Credentials;
use crate::domain::payment_method::RemoteMethod;
use crate::domain::request::RequestPayload;
use crate::error::{GatewayError, Result};
use crate::gateways::{ApiSession, EnvironmentUrls, ResursApi};
use serde_json::json;

pub struct ResursHttpClient {
    pub urls: EnvironmentUrls,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl ResursHttpClient {
    fn request(&self, method: reqwest::Method, session: &ApiSession, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", session.base_url.trim_end_matches('/'), path);
        let mut builder = self
            .client
            .request(method, url)
            .basic_auth(
                session.credentials.username(),
                Some(session.credentials.password()),
            )
            .timeout(std::time::Duration::from_millis(self.timeout_ms));
        if let Some(country) = session.credentials.country() {
            builder = builder.header("X-Country", country);
        }
        builder
    }
}

#[async_trait::async_trait]
impl ResursApi for ResursHttpClient {
    fn name(&self) -> &'static str {
        "resurs_http"
    }

    async fn connect(&self, credentials: &Credentials) -> Result<ApiSession> {
        let base_url = self.urls.for_environment(credentials.environment());
        if base_url.trim().is_empty() {
            return Err(GatewayError::Api(format!(
                "no base url configured for {} environment",
                credentials.environment().as_str()
            )));
        }

        Ok(ApiSession {
            credentials: credentials.clone(),
            base_url: base_url.to_string(),
        })
    }

    async fn fetch_methods(&self, session: &ApiSession) -> Result<Vec<RemoteMethod>> {
        let resp = self
            .request(reqwest::Method::GET, session, "/v1/payment-methods")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api(format!(
                "HTTP_{} while fetching payment methods: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        let methods: Vec<RemoteMethod> = resp.json().await?;
        Ok(methods)
    }

    async fn authorize(
        &self,
        session: &ApiSession,
        payload: &RequestPayload,
    ) -> Result<serde_json::Value> {
        let body = json!({
            "reference": payload.reference,
            "orderLines": payload.line_items,
        });

        let resp = self
            .request(
                reqwest::Method::POST,
                session,
                &format!("/v1/payments/{}/authorize", payload.reference),
            )
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api(format!(
                "HTTP_{} from authorize: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(resp.json().await?)
    }
}
