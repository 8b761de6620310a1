//! reqwest implementation of [`EhallApi`]
//!
//! One client and one cookie jar per instance. The jar is the login session.

use crate::error::{ErrorKind, Result};
use crate::model::LoginParams;
use reqwest::{
    Client, RequestBuilder, Response, Url,
    cookie::{CookieStore, Jar},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use super::{COURSE_APP_ID, EHALL_BASE, EhallApi, EnterStep, ORG_BASE, Step, timestamp};

const AUTH_APP_ID: &str = "1030";
const AUTH_REDIRECT_URI: &str = "http://ehall.xjtu.edu.cn/amp-auth-adapter/loginSuccess";
const LOGIN_TYPE: i64 = 1;

/// HTTP client bound to one portal session
#[derive(Debug, Clone)]
pub struct HttpEhallApi {
    client: Client,
    jar: Arc<Jar>,
    org_base: Url,
    ehall_base: Url,
}

impl HttpEhallApi {
    pub fn new() -> Result<Self> {
        Self::with_bases(ORG_BASE, EHALL_BASE)
    }

    /// Client talking to the given identity-provider and application hosts
    pub fn with_bases(org_base: &str, ehall_base: &str) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            client,
            jar,
            org_base: parse_base(org_base)?,
            ehall_base: parse_base(ehall_base)?,
        })
    }

    /// `Cookie` header the jar would send to `url`
    pub fn cookies_for(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|v| v.to_str().ok().map(str::to_owned))
    }

    fn org(&self, path: &str) -> String {
        join(&self.org_base, path)
    }

    fn ehall(&self, path: &str) -> String {
        join(&self.ehall_base, path)
    }
}

fn join(base: &Url, path: &str) -> String {
    format!("{}{path}", base.as_str().trim_end_matches('/'))
}

fn parse_base(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| ErrorKind::Fatal(format!("bad base url {url}: {e}")).into())
}

/// Sends `req` and turns any non-2xx status into [`ErrorKind::Status`].
async fn send_checked(step: Step, req: RequestBuilder) -> Result<Response> {
    let resp = req.send().await?;
    let status = resp.status();
    debug!(%step, %status, url = %resp.url(), "response");
    if !status.is_success() {
        return Err(ErrorKind::Status { step, status }.into());
    }
    Ok(resp)
}

impl EhallApi for HttpEhallApi {
    fn set_cookie(&self, name: &str, value: &str) -> Result<()> {
        let cookie = format!("{name}={value}; Path=/");
        self.jar.add_cookie_str(&cookie, &self.org_base);
        self.jar.add_cookie_str(&cookie, &self.ehall_base);
        Ok(())
    }

    async fn start_authorize(&self) -> Result<()> {
        let req = self.client.get(self.org("/openplatform/oauth/authorize")).query(&[
            ("appID", AUTH_APP_ID),
            ("redirectUri", AUTH_REDIRECT_URI),
            ("scope", "user_info"),
        ]);
        send_checked(Step::StartAuthorize, req).await?;
        Ok(())
    }

    async fn probe_captcha(&self, username: &str) -> Result<Value> {
        let req = self
            .client
            .get(self.org("/openplatform/g/admin/getIsShowJcaptchaCode"))
            .query(&[("userName", username.to_string()), ("_", timestamp().to_string())]);
        let resp = send_checked(Step::CaptchaProbe, req).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn get_captcha(&self) -> Result<Value> {
        let req = self
            .client
            .post(self.org("/openplatform/g/admin/getJcaptchaCode"))
            .header("Content-Type", "application/json;charset=UTF-8");
        let resp = send_checked(Step::CaptchaImage, req).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn send_login_request(&self, params: LoginParams<'_>) -> Result<Value> {
        let body = json!({
            "username": params.username,
            "pwd": params.encrypted_password,
            "loginType": LOGIN_TYPE,
            "jcaptchaCode": params.captcha,
        });
        let req = self
            .client
            .post(self.org("/openplatform/g/admin/login"))
            .header("Content-Type", "application/json;charset=utf-8")
            .body(body.to_string());
        let resp = send_checked(Step::TokenExchange, req).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn get_user_identity(&self, member_id: &str) -> Result<Value> {
        let req = self
            .client
            .get(self.org("/openplatform/g/admin/getUserIdentity"))
            .query(&[("memberId", member_id.to_string()), ("_", timestamp().to_string())]);
        let resp = send_checked(Step::UserIdentity, req).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn get_redirect_url(&self, user_type: &str, person_no: &str) -> Result<Value> {
        let req = self
            .client
            .get(self.org("/openplatform/oauth/auth/getRedirectUrl"))
            .query(&[
                ("userType", user_type.to_string()),
                ("personNo", person_no.to_string()),
                ("_", timestamp().to_string()),
            ]);
        let resp = send_checked(Step::RedirectUrl, req).await?;
        Ok(resp.json::<Value>().await?)
    }

    async fn enter_home(&self, url: &str) -> Result<()> {
        send_checked(Step::EnterHome, self.client.get(url)).await?;
        Ok(())
    }

    async fn enter_app(&self, step: EnterStep) -> Result<()> {
        let req = match step {
            EnterStep::AppIntroduction => self
                .client
                .get(self.ehall("/jsonp/appIntroduction.json"))
                .query(&[("appId", COURSE_APP_ID.to_string()), ("_", timestamp().to_string())]),
            EnterStep::SendRecUseApp => self
                .client
                .get(self.ehall("/jsonp/sendRecUseApp.json"))
                .query(&[("appId", COURSE_APP_ID.to_string()), ("_", timestamp().to_string())]),
            EnterStep::AppConfig => self
                .client
                .get(self.ehall(&format!(
                    "/jwapp/sys/funauthapp/api/getAppConfig/kccx-{COURSE_APP_ID}.do"
                )))
                .query(&[("v", "07488889075885421")]),
            EnterStep::PublicPermissions => self
                .client
                .post(self.ehall("/jwapp/sys/jwpubapp/modules/bb/cxjwggbbdqx.do"))
                .query(&[("SFQY", "1"), ("APP", COURSE_APP_ID)]),
            EnterStep::PageLogConfig => self
                .client
                .get(self.ehall("/jwapp/sys/emappagelog/config/kccx.do")),
            EnterStep::ModuleMeta => self
                .client
                .post(self.ehall("/jwapp/sys/kccx/modules/kccx.do"))
                .form(&[("*json", "1")]),
            EnterStep::SearchMeta => self
                .client
                .post(self.ehall("/jwapp/sys/kccx/modules/kccx/kcxxcx.do"))
                .form(&[("*searchMeta", "1")]),
        };
        send_checked(Step::Enter(step), req).await?;
        Ok(())
    }

    async fn query_courses(&self, page_size: u32, page_number: u32) -> Result<Value> {
        let req = self
            .client
            .post(self.ehall("/jwapp/sys/kccx/modules/kccx/kcxxcx.do"))
            .form(&[
                ("KCZTDM", "1".to_string()),
                ("pageSize", page_size.to_string()),
                ("pageNumber", page_number.to_string()),
            ]);
        let resp = send_checked(Step::QueryPage(page_number), req).await?;
        Ok(resp.json::<Value>().await?)
    }
}
