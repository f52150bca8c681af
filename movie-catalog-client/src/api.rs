use gloo_net::http::{Request, Response};
use movie_catalog_common::data::{
    movie::{Movie, MovieRequest},
    person::{EntityKind, Person, PersonRequest},
    user::{ApiMessage, Credentials, LoginResponse, Registration, User},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Clone, Copy)]
pub struct UnauthorizedApi {
    url: &'static str,
}

impl UnauthorizedApi {
    pub const fn new(url: &'static str) -> Self {
        Self { url }
    }

    /// Exchange `credentials` for a bearer token
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let url = format!("{}/users/login", self.url);
        let response = Request::post(&url).json(credentials)?.send().await?;
        let login = parse_response::<LoginResponse>(response).await?;
        Ok(login.into_token())
    }

    /// Create an account, returning the confirmation message of the backend
    pub async fn signup(&self, registration: &Registration) -> Result<String> {
        let url = format!("{}/users/signup", self.url);
        let response = Request::post(&url).json(registration)?.send().await?;
        let ApiMessage { message } = parse_response::<ApiMessage>(response).await?;
        Ok(message)
    }

    pub fn authorize(&self, token: String) -> AuthorizedApi {
        AuthorizedApi::new(self.url, token)
    }
}

#[derive(Clone)]
pub struct AuthorizedApi {
    url: &'static str,
    token: String,
}

impl AuthorizedApi {
    pub fn new(url: &'static str, token: String) -> Self {
        Self { url, token }
    }

    pub async fn user_info(&self) -> Result<User> {
        let url = format!("{}/users", self.url);
        self.send(Request::get(&url)).await
    }

    pub async fn movies(&self) -> Result<Vec<Movie>> {
        let url = format!("{}/movies", self.url);
        self.send(Request::get(&url)).await
    }

    pub async fn movie(&self, id: &str) -> Result<Movie> {
        let url = format!("{}/movies/{id}", self.url);
        self.send(Request::get(&url)).await
    }

    pub async fn add_movie(&self, request: &MovieRequest) -> Result<()> {
        let url = format!("{}/movies/add-movie", self.url);
        self.send_ignoring_body(Request::post(&url).json(request)?)
            .await
    }

    pub async fn edit_movie(&self, id: &str, request: &MovieRequest) -> Result<()> {
        let url = format!("{}/movies/edit-movie/{id}", self.url);
        self.send_ignoring_body(Request::put(&url).json(request)?)
            .await
    }

    /// Every actor or producer known to the backend
    pub async fn people(&self, kind: EntityKind) -> Result<Vec<Person>> {
        let url = format!("{}/{}", self.url, collection_path(kind));
        self.send(Request::get(&url)).await
    }

    pub async fn add_person(&self, kind: EntityKind, request: &PersonRequest) -> Result<()> {
        let url = format!("{}/{}/{}", self.url, collection_path(kind), add_path(kind));
        self.send_ignoring_body(Request::post(&url).json(request)?)
            .await
    }

    fn auth_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn dispatch(&self, req: Request) -> Result<Response> {
        let response = req
            .header("Authorization", &self.auth_header_value())
            .send()
            .await?;
        Ok(response)
    }

    async fn send<T>(&self, req: Request) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch(req).await?;
        parse_response(response).await
    }

    async fn send_ignoring_body(&self, req: Request) -> Result<()> {
        let response = self.dispatch(req).await?;
        if response.ok() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }
}

const fn collection_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Actor => "actors",
        EntityKind::Producer => "producers",
    }
}

const fn add_path(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Actor => "add-actor",
        EntityKind::Producer => "add-producer",
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] gloo_net::Error),
    #[error("{0}")]
    ApiError(String),
}

async fn parse_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.ok() {
        Ok(response.json::<T>().await?)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> Error {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(error) => {
            log::warn!("Could not read error body. {error}");
            String::new()
        }
    };
    Error::ApiError(error_message(status, &body))
}

/// Message of a failed response: the payload's `message` field when present, otherwise a
/// generic description of the status
fn error_message(status: u16, body: &str) -> String {
    ApiMessage::from_body(body).unwrap_or_else(|| format!("Request failed with status code {status}"))
}
