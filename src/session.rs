//! Authenticated session and where it is persisted.

use crate::config::{TOKEN_KEY, USERNAME_KEY};
use crate::error::{SessionError, ValidationError};
use crate::models::{AuthResponse, Credentials};
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    /// Session carried by a login response, if the server issued a token.
    pub fn from_auth(response: &AuthResponse, fallback_username: &str) -> Option<Self> {
        let token = response.token.as_deref().filter(|t| !t.is_empty())?;
        Some(Self {
            token: token.to_string(),
            username: response
                .username
                .clone()
                .unwrap_or_else(|| fallback_username.to_string()),
        })
    }
}

/// Where the session survives page reloads.
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    fn clear(&self);
}

/// `localStorage`, under the `token` and `username` keys.
///
/// Values are stored as plain strings, not JSON, so sessions written by
/// other clients of the same origin are picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<Session> {
        let storage = LocalStorage::raw();
        let token = storage.get_item(TOKEN_KEY).ok().flatten();
        let username = storage.get_item(USERNAME_KEY).ok().flatten();
        session_from_items(token, username)
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let storage = LocalStorage::raw();
        storage
            .set_item(TOKEN_KEY, &session.token)
            .and_then(|_| storage.set_item(USERNAME_KEY, &session.username))
            .map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(USERNAME_KEY);
    }
}

/// Session from the raw stored values. A missing or blank token means none.
fn session_from_items(token: Option<String>, username: Option<String>) -> Option<Session> {
    let token = token.filter(|t| !t.trim().is_empty())?;
    Some(Session {
        token,
        username: username.unwrap_or_default(),
    })
}

/// Check the login form before posting it.
pub fn login_credentials(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(Credentials {
        username: username.trim().to_string(),
        password: password.to_string(),
    })
}

/// Check the registration form before posting it.
pub fn registration_credentials(
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<Credentials, ValidationError> {
    let credentials = login_credentials(username, password)?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(credentials)
}

/// Message for a login response that carried no token.
pub fn login_failure_message(response: &AuthResponse) -> String {
    response
        .error
        .clone()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "Login failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_are_read_verbatim() {
        assert_eq!(
            session_from_items(Some("abc.def".into()), Some("sam".into())),
            Some(Session { token: "abc.def".into(), username: "sam".into() })
        );
        // quotes are part of the value, not JSON framing
        assert_eq!(
            session_from_items(Some("\"abc\"".into()), None),
            Some(Session { token: "\"abc\"".into(), username: String::new() })
        );
    }

    #[test]
    fn blank_or_missing_token_is_no_session() {
        assert_eq!(session_from_items(None, Some("sam".into())), None);
        assert_eq!(session_from_items(Some("  ".into()), Some("sam".into())), None);
    }

    #[test]
    fn session_requires_a_token() {
        let ok = AuthResponse {
            token: Some("jwt".into()),
            username: Some("sam".into()),
            error: None,
        };
        assert_eq!(
            Session::from_auth(&ok, "typed"),
            Some(Session { token: "jwt".into(), username: "sam".into() })
        );

        let missing_name = AuthResponse { token: Some("jwt".into()), ..Default::default() };
        assert_eq!(Session::from_auth(&missing_name, "typed").unwrap().username, "typed");

        let rejected = AuthResponse { error: Some("Invalid credentials".into()), ..Default::default() };
        assert_eq!(Session::from_auth(&rejected, "typed"), None);
        assert_eq!(login_failure_message(&rejected), "Invalid credentials");
        assert_eq!(login_failure_message(&AuthResponse::default()), "Login failed");
    }

    #[test]
    fn credentials_are_checked_locally() {
        assert_eq!(
            login_credentials("  ", "pw").unwrap_err(),
            ValidationError::MissingCredentials
        );
        assert_eq!(
            login_credentials("sam", "").unwrap_err(),
            ValidationError::MissingCredentials
        );
        assert_eq!(login_credentials(" sam ", "pw").unwrap().username, "sam");
        assert_eq!(
            registration_credentials("sam", "pw", "pw2").unwrap_err(),
            ValidationError::PasswordMismatch
        );
        assert!(registration_credentials("sam", "pw", "pw").is_ok());
    }
}
