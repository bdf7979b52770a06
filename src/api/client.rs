//! HTTP client for the quiz backend.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RequestError;
use crate::models::{Question, QuestionDraft, QuestionUpdate, QuestionWithAnswer, TestResult};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Serialize)]
struct SubmitRequest<'a> {
    answers: &'a [usize],
}

/// Typed access to the admin and test endpoints.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `/admin/questions`
    pub async fn list_questions_with_answers(
        &self,
    ) -> Result<Vec<QuestionWithAnswer>, RequestError> {
        let response = self.execute(self.request(Method::GET, "/admin/questions")).await?;
        decode(response).await
    }

    /// GET `/admin/questions/{id}`
    pub async fn get_question_with_answer(
        &self,
        id: i64,
    ) -> Result<QuestionWithAnswer, RequestError> {
        let path = format!("/admin/questions/{}", id);
        let response = self.execute(self.request(Method::GET, &path)).await?;
        decode(response).await
    }

    /// POST `/admin/questions`
    pub async fn create_question(
        &self,
        draft: &QuestionDraft,
    ) -> Result<QuestionWithAnswer, RequestError> {
        let request = self.request(Method::POST, "/admin/questions").json(draft);
        let response = self.execute(request).await?;
        decode(response).await
    }

    /// PATCH `/admin/questions/{id}`
    pub async fn update_question(
        &self,
        id: i64,
        update: &QuestionUpdate,
    ) -> Result<QuestionWithAnswer, RequestError> {
        let path = format!("/admin/questions/{}", id);
        let request = self.request(Method::PATCH, &path).json(update);
        let response = self.execute(request).await?;
        decode(response).await
    }

    /// DELETE `/admin/questions/{id}`. Any response body is ignored.
    pub async fn delete_question(&self, id: i64) -> Result<(), RequestError> {
        let path = format!("/admin/questions/{}", id);
        self.execute(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// GET `/test/questions`. The server strips the answer key.
    pub async fn list_test_questions(&self) -> Result<Vec<Question>, RequestError> {
        let response = self.execute(self.request(Method::GET, "/test/questions")).await?;
        decode(response).await
    }

    /// POST `/test/submit`
    pub async fn submit_test(&self, answers: &[usize]) -> Result<TestResult, RequestError> {
        let request = self
            .request(Method::POST, "/test/submit")
            .json(&SubmitRequest { answers });
        let response = self.execute(request).await?;
        decode(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");
        self.http.request(method, url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, RequestError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("request failed before a response arrived: {}", e);
            RequestError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            tracing::warn!(status = status.as_u16(), %url, "server rejected request");
            return Err(RequestError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    let url = response.url().to_string();
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(%url, "could not decode response body: {}", e);
        RequestError::Decode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_submit_body_shape() {
        let json = serde_json::to_string(&SubmitRequest { answers: &[0, 3, 1] }).unwrap();
        assert_eq!(json, r#"{"answers":[0,3,1]}"#);
    }
}
