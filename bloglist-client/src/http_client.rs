use crate::error::ClientError;
use crate::models::{
    Blog, ErrorResponse, LoginRequest, LoginResponse, NewBlog, RegisterRequest, User,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    // ============== Users ==============

    pub async fn register(
        &self,
        username: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<User, ClientError> {
        let req = RegisterRequest {
            username: username.into(),
            name: name.into(),
            password: password.into(),
        };

        tracing::debug!("Registering user {}", req.username);

        let response = self
            .client
            .post(self.url("/api/users"))
            .json(&req)
            .send()
            .await?;
        parse_json(response).await
    }

    /// Logs in and keeps the issued token for later requests.
    pub async fn login(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<LoginResponse, ClientError> {
        let req = LoginRequest {
            username: username.into(),
            password: password.into(),
        };

        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&req)
            .send()
            .await?;
        let login: LoginResponse = parse_json(response).await?;

        self.set_token(login.token.clone());
        Ok(login)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.client.get(self.url("/api/users")).send().await?;
        parse_json(response).await
    }

    // ============== Blogs ==============

    pub async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError> {
        let response = self.client.get(self.url("/api/blogs")).send().await?;
        parse_json(response).await
    }

    pub async fn get_blog(&self, id: Uuid) -> Result<Blog, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/blogs/{}", id)))
            .send()
            .await?;
        parse_json(response).await
    }

    pub async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, ClientError> {
        let response = self
            .add_auth_header(self.client.post(self.url("/api/blogs")))
            .json(blog)
            .send()
            .await?;
        parse_json(response).await
    }

    pub async fn replace_blog(&self, id: Uuid, blog: &NewBlog) -> Result<Blog, ClientError> {
        let response = self
            .add_auth_header(self.client.put(self.url(&format!("/api/blogs/{}", id))))
            .json(blog)
            .send()
            .await?;
        parse_json(response).await
    }

    /// Reads the blog and writes it back with one more like. Two concurrent
    /// likes can race; the server only offers full replacement.
    pub async fn like_blog(&self, id: Uuid) -> Result<Blog, ClientError> {
        let blog = self.get_blog(id).await?;
        let mut replacement = NewBlog::from(&blog);
        replacement.likes = Some(blog.likes + 1);
        self.replace_blog(id, &replacement).await
    }

    pub async fn delete_blog(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .add_auth_header(self.client.delete(self.url(&format!("/api/blogs/{}", id))))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.status().is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(error_from(response).await)
    }
}

async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error.message)
        .unwrap_or(text);

    tracing::debug!("Request failed with {}: {}", status, message);

    match status {
        StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Unprocessable(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_surfaces_builder_result() {
        let client = HttpClient::new("http://localhost:3003");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://localhost:3003");
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = HttpClient::new("http://localhost:3003/").unwrap();
        assert_eq!(client.url("/api/blogs"), "http://localhost:3003/api/blogs");
        assert_eq!(client.url("api/login"), "http://localhost:3003/api/login");
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let mut client = HttpClient::new("http://localhost:3003").unwrap();
        assert!(client.token().is_none());
        client.set_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.clear_token();
        assert!(client.token().is_none());
    }
}
