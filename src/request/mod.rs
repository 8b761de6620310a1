//! Request module - the HTTP surface of the ehall portal
//!
//! Every endpoint the workflow touches is one method of [`EhallApi`], so the
//! login and scrape logic in `app` can be driven by the real reqwest client or
//! by a recording stand-in.

#![allow(async_fn_in_trait)] // 允许在内部 trait 中使用 async fn

use crate::error::Result;
use crate::model::LoginParams;
use serde_json::Value;
use std::fmt;

mod http;
pub use http::HttpEhallApi;

pub const ORG_BASE: &str = "https://org.xjtu.edu.cn";
pub const EHALL_BASE: &str = "http://ehall.xjtu.edu.cn";

/// Application id of the course query app (课程查询)
pub const COURSE_APP_ID: &str = "4766853624865322";

/// Millisecond timestamp sent as the `_` cache-buster
pub fn timestamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Named step of the login or scrape, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StartAuthorize,
    CaptchaProbe,
    CaptchaImage,
    TokenExchange,
    UserIdentity,
    RedirectUrl,
    EnterHome,
    Enter(EnterStep),
    QueryPage(u32),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::StartAuthorize => f.write_str("start authorization"),
            Step::CaptchaProbe => f.write_str("get captcha"),
            Step::CaptchaImage => f.write_str("get captcha image"),
            Step::TokenExchange => f.write_str("get token"),
            Step::UserIdentity => f.write_str("enter homepage 1"),
            Step::RedirectUrl => f.write_str("enter homepage 2"),
            Step::EnterHome => f.write_str("enter homepage 3"),
            Step::Enter(step) => write!(f, "enter course query {}", step.ordinal()),
            Step::QueryPage(page) => write!(f, "get batch {page}"),
        }
    }
}

/// Priming requests that make the course query app accept data requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterStep {
    AppIntroduction,
    SendRecUseApp,
    AppConfig,
    PublicPermissions,
    PageLogConfig,
    ModuleMeta,
    SearchMeta,
}

impl EnterStep {
    pub const ALL: [EnterStep; 7] = [
        EnterStep::AppIntroduction,
        EnterStep::SendRecUseApp,
        EnterStep::AppConfig,
        EnterStep::PublicPermissions,
        EnterStep::PageLogConfig,
        EnterStep::ModuleMeta,
        EnterStep::SearchMeta,
    ];

    /// 1-based position in [`EnterStep::ALL`]
    pub fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i + 1)
    }
}

/// Common interface for all HTTP operations
pub trait EhallApi {
    /// Install a cookie on both portal hosts
    fn set_cookie(&self, name: &str, value: &str) -> Result<()>;

    /// Open the OAuth authorize page for the ehall application
    async fn start_authorize(&self) -> Result<()>;

    /// Ask whether `username` must solve a captcha
    async fn probe_captcha(&self, username: &str) -> Result<Value>;

    /// Fetch a base64 captcha image
    async fn get_captcha(&self) -> Result<Value>;

    /// Send login request with credentials
    async fn send_login_request(&self, params: LoginParams<'_>) -> Result<Value>;

    /// Look up the identities attached to a member id
    async fn get_user_identity(&self, member_id: &str) -> Result<Value>;

    /// Resolve the ehall landing URL for an identity
    async fn get_redirect_url(&self, user_type: &str, person_no: &str) -> Result<Value>;

    /// Visit the landing URL so the application host issues its session
    async fn enter_home(&self, url: &str) -> Result<()>;

    /// Send one priming request of the course query app
    async fn enter_app(&self, step: EnterStep) -> Result<()>;

    /// Fetch one page of the course catalog
    async fn query_courses(&self, page_size: u32, page_number: u32) -> Result<Value>;
}
