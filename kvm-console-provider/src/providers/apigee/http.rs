//! Apigee HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{self, RetryPolicy};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{ApigeeErrorResponse, ApigeeProvider};

impl ApigeeProvider {
    /// 发送请求并返回成功响应的原始文本
    ///
    /// 4xx/5xx 响应按 Google 错误信封解析后交给错误映射。
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let url = format!("{}{path_and_query}", self.base_url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.credentials.token);

        if let Some(body) = body {
            let json = serde_json::to_string(body).map_err(|e| {
                ProviderError::SerializationError {
                    detail: e.to_string(),
                }
            })?;
            log::debug!("Request Body: {json}");
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json);
        }

        let label = format!("{method} {url}");
        let response =
            http_client::send(request, &label, RetryPolicy::new(self.max_retries)).await?;

        if response.is_error() {
            let status = response.status;
            let raw = match serde_json::from_str::<ApigeeErrorResponse>(&response.body) {
                Ok(resp) => {
                    let message = if resp.error.message.is_empty() {
                        format!("HTTP {status}")
                    } else {
                        resp.error.message
                    };
                    match resp.error.status {
                        Some(s) => RawApiError::with_status(status, s, message),
                        None => RawApiError::new(status, message),
                    }
                }
                Err(_) => RawApiError::new(status, format!("HTTP {status}")),
            };
            let err = self.map_error(raw, ctx);
            if err.is_expected() {
                log::warn!("API error: {err}");
            } else {
                log::error!("API error: {err}");
            }
            return Err(err);
        }

        Ok(response.body)
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let text = self
            .send::<()>(Method::GET, path_and_query, None, ctx)
            .await?;
        http_client::parse_json(&text)
    }

    /// 执行 POST 请求，返回响应正文（可能为空）
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<String> {
        self.send(Method::POST, path, Some(body), ctx).await
    }

    /// 执行 DELETE 请求，忽略响应正文
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None, ctx)
            .await
            .map(|_| ())
    }
}
