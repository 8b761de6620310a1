use crate::error::{ErrorKind, Result};

/// Student id and password used for a login.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(ErrorKind::InvalidArgument("username").into());
        }
        if password.is_empty() {
            return Err(ErrorKind::InvalidArgument("password").into());
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of the token exchange request
#[derive(Debug, Clone)]
pub struct LoginParams<'a> {
    pub username: &'a str,
    pub encrypted_password: &'a str,
    pub captcha: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_named_in_the_error() {
        let err = Credentials::new("", "pwd").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument("username")));
        let err = Credentials::new("2196113760", "").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument("password")));
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("2196113760", "hunter2").unwrap();
        let printed = format!("{creds:?}");
        assert!(printed.contains("2196113760"));
        assert!(!printed.contains("hunter2"));
    }
}
