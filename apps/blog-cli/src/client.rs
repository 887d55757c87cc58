//! Thin HTTP client over the blog endpoints.

use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;
use tokio::sync::OnceCell;

use blog_shared::dto::{
    AuthResponse, BlogListQuery, BlogRequest, DateQuery, DateRangeQuery, LoginRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Status and decoded body of one API call.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    /// Fail unless the server answered with a 2xx status.
    pub fn success(self) -> anyhow::Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            let detail = self
                .body
                .get("detail")
                .or_else(|| self.body.get("title"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            anyhow::bail!("server answered {}: {}", self.status, detail)
        }
    }
}

pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    token: OnceCell<String>,
}

impl BlogClient {
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            token: OnceCell::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exchange the configured credentials for a bearer token, once per client.
    pub async fn token(&self) -> anyhow::Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| async {
                let credentials = self
                    .credentials
                    .as_ref()
                    .context("credentials required: set --username and --password")?;

                let login = LoginRequest {
                    username: credentials.username.clone(),
                    password: credentials.password.clone(),
                };
                let reply = self
                    .send(self.http.post(self.url("auth/token")).json(&login))
                    .await?
                    .success()
                    .context("login failed")?;

                let auth: AuthResponse =
                    serde_json::from_value(reply.body).context("unexpected token response")?;
                anyhow::Ok(auth.access_token)
            })
            .await?;

        Ok(token.as_str())
    }

    pub async fn me(&self) -> anyhow::Result<Reply> {
        let req = self.authorized(Method::GET, "auth/me").await?;
        self.send(req).await
    }

    pub async fn list(&self, query: &BlogListQuery) -> anyhow::Result<Reply> {
        self.send(self.http.get(self.url("blogs")).query(query)).await
    }

    pub async fn get(&self, id: i64) -> anyhow::Result<Reply> {
        self.send(self.http.get(self.url(&format!("blogs/{id}")))).await
    }

    pub async fn create(&self, blog: &BlogRequest) -> anyhow::Result<Reply> {
        let req = self.authorized(Method::POST, "blogs").await?.json(blog);
        self.send(req).await
    }

    pub async fn update(&self, id: i64, blog: &BlogRequest) -> anyhow::Result<Reply> {
        let req = self
            .authorized(Method::PUT, &format!("blogs/{id}"))
            .await?
            .json(blog);
        self.send(req).await
    }

    pub async fn delete(&self, id: i64) -> anyhow::Result<Reply> {
        let req = self.authorized(Method::DELETE, &format!("blogs/{id}")).await?;
        self.send(req).await
    }

    pub async fn by_date(&self, date: &str) -> anyhow::Result<Reply> {
        self.date_query("blogs/by_date", date).await
    }

    pub async fn by_date_range(&self, start: &str, end: &str) -> anyhow::Result<Reply> {
        let query = DateRangeQuery {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        };
        self.send(self.http.get(self.url("blogs/by_date_range")).query(&query))
            .await
    }

    pub async fn created_after(&self, date: &str) -> anyhow::Result<Reply> {
        self.date_query("blogs/created_after_date", date).await
    }

    pub async fn created_before(&self, date: &str) -> anyhow::Result<Reply> {
        self.date_query("blogs/created_before_date", date).await
    }

    async fn date_query(&self, path: &str, date: &str) -> anyhow::Result<Reply> {
        let query = DateQuery {
            date: Some(date.to_string()),
        };
        self.send(self.http.get(self.url(path)).query(&query)).await
    }

    async fn authorized(&self, method: Method, path: &str) -> anyhow::Result<RequestBuilder> {
        let token = self.token().await?;
        Ok(self.http.request(method, self.url(path)).bearer_auth(token))
    }

    async fn send(&self, req: RequestBuilder) -> anyhow::Result<Reply> {
        let res = req.send().await.context("request failed")?;
        let status = res.status();
        tracing::debug!(url = %res.url(), %status, "API call finished");

        let text = res.text().await.context("failed to read response body")?;
        Ok(Reply {
            status,
            body: decode_body(&text),
        })
    }
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let client = BlogClient::new("http://localhost:8080/api/", None).unwrap();
        assert_eq!(client.url("/blogs"), "http://localhost:8080/api/blogs");
        assert_eq!(client.url("blogs/3"), "http://localhost:8080/api/blogs/3");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("[]"), serde_json::json!([]));
        assert_eq!(decode_body("oops"), Value::String("oops".to_string()));
    }

    #[test]
    fn test_success_surfaces_problem_detail() {
        let reply = Reply {
            status: StatusCode::FORBIDDEN,
            body: serde_json::json!({"title": "Forbidden", "detail": "not yours"}),
        };
        let err = reply.success().unwrap_err();
        assert_eq!(err.to_string(), "server answered 403 Forbidden: not yours");
    }

    #[tokio::test]
    async fn test_token_requires_credentials() {
        let client = BlogClient::new("http://localhost:8080/api", None).unwrap();
        assert!(client.token().await.is_err());
    }
}
