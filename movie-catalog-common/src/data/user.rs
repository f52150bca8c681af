use serde::{Deserialize, Serialize};

use crate::validation::{schemas, FormValues};

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Trimmed email address
    pub email: String,
    /// Password exactly as typed
    pub password: String,
}

impl From<&FormValues> for Credentials {
    fn from(values: &FormValues) -> Self {
        Self {
            email: values.text(schemas::EMAIL).trim().to_owned(),
            password: values.text(schemas::PASSWORD).to_owned(),
        }
    }
}

/// Sign up request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Trimmed display name
    pub name: String,
    /// Trimmed email address, unique per account
    pub email: String,
    /// Password exactly as typed
    pub password: String,
}

impl From<&FormValues> for Registration {
    fn from(values: &FormValues) -> Self {
        Self {
            name: values.text(schemas::NAME).trim().to_owned(),
            email: values.text(schemas::EMAIL).trim().to_owned(),
            password: values.text(schemas::PASSWORD).to_owned(),
        }
    }
}

/// Profile of the logged in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier, not returned by every profile endpoint
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name used in the greeting
    pub name: String,
    /// Email address of the account
    #[serde(default)]
    pub email: String,
}

/// Body of a successful login. The backend either wraps the token in an object or returns the
/// bare token as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    /// `{ "token": "..." }`
    Session {
        /// Bearer token
        token: String,
    },
    /// `"..."`
    Token(String),
}

impl LoginResponse {
    /// Bearer token regardless of the response shape
    pub fn into_token(self) -> String {
        match self {
            Self::Session { token } | Self::Token(token) => token,
        }
    }
}

/// Message payload used by the backend for sign up confirmations and for errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Human readable text, shown as is
    pub message: String,
}

impl ApiMessage {
    /// Extract the `message` field of a response body. Returns [None] if the body is not a JSON
    /// message payload or the message is empty.
    pub fn from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .map(|payload| payload.message)
            .filter(|message| !message.trim().is_empty())
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::{ApiMessage, Credentials, LoginResponse, User};
    use crate::validation::{schemas, FormValues};

    #[rstest]
    #[case::object(r#"{"token":"abc.def"}"#)]
    #[case::bare_string(r#""abc.def""#)]
    fn login_response_should_accept_both_token_shapes(#[case] body: &str) {
        let response: LoginResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.into_token(), "abc.def");
    }

    #[rstest]
    #[case(r#"{"message":"Invalid credentials"}"#, Some("Invalid credentials"))]
    #[case(r#"{"message":""}"#, None)]
    #[case("Internal Server Error", None)]
    #[case(r#"{"error":"nope"}"#, None)]
    fn api_message_should_read_message_field(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(ApiMessage::from_body(body).as_deref(), expected);
    }

    #[test]
    fn credentials_should_trim_email_but_not_password() {
        let values = FormValues::new()
            .with(schemas::EMAIL, " someone@example.com ")
            .with(schemas::PASSWORD, " secret ");

        let credentials = Credentials::from(&values);

        assert_eq!(credentials.email, "someone@example.com");
        assert_eq!(credentials.password, " secret ");
    }

    #[test]
    fn user_should_deserialize_profile() {
        let body = r#"{"_id":"u1","name":"Jane","email":"jane@example.com","password":"hash"}"#;

        let user: User = serde_json::from_str(body).unwrap();

        assert_eq!(user.id.as_deref(), Some("u1"));
        assert_eq!(user.name, "Jane");
    }
}
