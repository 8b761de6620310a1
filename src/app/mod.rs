//! Application module - login and catalog workflow
//!
//! [`Ehall`] owns one portal session (through its [`EhallApi`]) and runs the
//! login handshake and the catalog scrape on top of it.

mod auth;
mod captcha;
mod catalog;

pub use captcha::{CaptchaSolver, ConsoleSolver};

use crate::config::Config;
use crate::error::Result;
use crate::model::Credentials;
use crate::request::EhallApi;
use serde_json::Value;

/// One login session against the ehall portal
pub struct Ehall<A, S> {
    api: A,
    solver: S,
    credentials: Credentials,
    config: Config,
}

impl<A: EhallApi, S: CaptchaSolver> Ehall<A, S> {
    /// Fails when `config` does not pass [`Config::validate`].
    pub fn new(api: A, solver: S, credentials: Credentials, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api,
            solver,
            credentials,
            config,
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

/// Text of a JSON scalar; the portal sends ids both as strings and numbers.
fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_are_read_from_strings_and_numbers() {
        assert_eq!(json_text(&json!("42")), Some("42".to_string()));
        assert_eq!(json_text(&json!(42)), Some("42".to_string()));
        assert_eq!(json_text(&json!("")), None);
        assert_eq!(json_text(&Value::Null), None);
    }

    #[test]
    fn truthiness_follows_the_probe_payload() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
    }
}
