use super::{CaptchaSolver, Ehall, is_truthy, json_text};
use crate::{
    crypto,
    error::{ErrorKind, Result},
    model::LoginParams,
    request::{EhallApi, Step},
};
use tracing::{debug, error, info, warn};

/// Selects the ehall application on the identity provider
const APP_SELECTOR_COOKIE: (&str, &str) = ("cur_appId_", "GRt5IN2Ni3M=");
const TOKEN_COOKIE: &str = "open_Platform_User";
const MEMBER_COOKIE: &str = "memberId";

impl<A: EhallApi, S: CaptchaSolver> Ehall<A, S> {
    /// Runs the login handshake, logging the failing step on error.
    pub async fn login(&self) -> bool {
        match self.try_login().await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "Ehall 登录失败!");
                false
            }
        }
    }

    /// Runs the login handshake and returns the member id.
    ///
    /// Steps run strictly in order and the first failure ends the attempt.
    pub async fn try_login(&self) -> Result<String> {
        let (name, value) = APP_SELECTOR_COOKIE;
        self.api.set_cookie(name, value)?;

        self.api.start_authorize().await?;
        debug!("authorization started");

        self.prepare_captcha().await?;
        let member_id = self.exchange_token().await?;
        self.enter_home(&member_id).await?;

        info!(username = self.credentials.username(), %member_id, "logged in");
        Ok(member_id)
    }

    /// Writes the challenge image when the server wants one for this user.
    async fn prepare_captcha(&self) -> Result<()> {
        let path = &self.config.captcha_path;
        // A leftover image would make the next step prompt for nothing.
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        let probe = self.api.probe_captcha(self.credentials.username()).await?;
        if !is_truthy(&probe["data"]) {
            debug!("captcha not required");
            return Ok(());
        }

        let resp = self.api.get_captcha().await?;
        let image_b64 = resp["data"].as_str().ok_or(ErrorKind::MissingField {
            step: Step::CaptchaImage,
            field: "data",
        })?;
        let image = crypto::decode_captcha_image(image_b64)?;
        std::fs::write(path, image)?;
        warn!(path = %path.display(), "captcha required");
        Ok(())
    }

    async fn exchange_token(&self) -> Result<String> {
        let path = &self.config.captcha_path;
        let captcha = if path.exists() {
            self.solver.solve(path)?.trim().to_string()
        } else {
            String::new()
        };

        let encrypted_password =
            crypto::encrypt_password(self.credentials.password(), self.config.aes_key.as_bytes())?;
        let resp = self
            .api
            .send_login_request(LoginParams {
                username: self.credentials.username(),
                encrypted_password: &encrypted_password,
                captcha: &captcha,
            })
            .await?;

        if resp["code"].as_i64() != Some(0) {
            let message = resp["message"]
                .as_str()
                .or_else(|| resp["msg"].as_str())
                .map_or_else(|| format!("code {}", resp["code"]), str::to_string);
            return Err(ErrorKind::Rejected {
                step: Step::TokenExchange,
                message,
            }
            .into());
        }

        let token = json_text(&resp["data"]["tokenKey"]).ok_or(ErrorKind::MissingField {
            step: Step::TokenExchange,
            field: "data.tokenKey",
        })?;
        let member_id =
            json_text(&resp["data"]["orgInfo"]["memberId"]).ok_or(ErrorKind::MissingField {
                step: Step::TokenExchange,
                field: "data.orgInfo.memberId",
            })?;

        self.api.set_cookie(TOKEN_COOKIE, &token)?;
        self.api.set_cookie(MEMBER_COOKIE, &member_id)?;
        Ok(member_id)
    }

    async fn enter_home(&self, member_id: &str) -> Result<()> {
        let identity = self.api.get_user_identity(member_id).await?;
        let first = &identity["data"][0];
        let user_type = json_text(&first["userType"]).ok_or(ErrorKind::MissingField {
            step: Step::UserIdentity,
            field: "data[0].userType",
        })?;
        let person_no = json_text(&first["personNo"]).ok_or(ErrorKind::MissingField {
            step: Step::UserIdentity,
            field: "data[0].personNo",
        })?;

        let redirect = self.api.get_redirect_url(&user_type, &person_no).await?;
        let home_url = redirect["data"]
            .as_str()
            .filter(|url| !url.is_empty())
            .ok_or(ErrorKind::MissingField {
                step: Step::RedirectUrl,
                field: "data",
            })?;

        self.api.enter_home(home_url).await
    }
}
