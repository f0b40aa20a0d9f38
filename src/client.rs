//! Exposes a `Client` struct to interact with the web interface.

use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use reqwest::{Method, RequestBuilder};

use crate::config::Config;
use crate::data::{DslData, DslInfo, LogData, Logs, Response, StatusSnapshot, TrafficStats};
use crate::error::{DecodeError, Error, Result};
use crate::login::{Session, SessionInfo};

const LOGIN_PATH: &str = "/login_sid.lua";
const DATA_PATH: &str = "/data.lua";
const MONITOR_PATH: &str = "/internet/inetstat_monitor.lua";
const FIRMWARECFG_PATH: &str = "/cgi-bin/firmwarecfg";

/// Body of a successful command on `inetstat_monitor.lua`
const COMMAND_DONE: &str = "done:0";

fn elapsed_ms(start: &Instant) -> u128 {
    start.elapsed().as_millis()
}

/// `t{unixtime}=nocache`, keeps the FRITZ!Box from answering from its cache
fn cache_buster() -> String {
    format!("t{}", Utc::now().timestamp())
}

#[derive(Debug, Clone)]
pub struct Client {
    /// Use to make REST requests, pools connections
    http: reqwest::Client,
    /// Example: `http://fritz.box` or `https://192.168.178.1`
    endpoint: String,
    /// `lang` parameter, inherited by sessions
    language: String,
}

impl Client {
    pub fn new(endpoint: impl Into<String>) -> Result<Client> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, endpoint))
    }

    /// Use an already configured transport.
    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Client {
        Client {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            language: crate::config::defaults::LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Client {
        self.language = language.into();
        self
    }

    /// Build the transport as described by `config`.
    ///
    /// Without a root certificate invalid certificates are accepted, the
    /// FRITZ!Box uses a self-signed one.
    pub async fn from_config(config: &Config) -> anyhow::Result<Client> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        match config.root_cert_path.as_ref() {
            None => {
                if config.endpoint.starts_with("https://") {
                    log::warn!("no root cert configured, accepting invalid certs");
                }
                builder = builder.danger_accept_invalid_certs(true);
            }
            Some(path) => {
                let pem = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("couldn't read root cert at {}", path.display()))?;
                let cert =
                    reqwest::Certificate::from_pem(&pem).context("certificate is invalid")?;
                builder = builder.add_root_certificate(cert);
            }
        }

        let http = builder
            .build()
            .context("invalid http client configuration")?;

        Ok(Client::with_http(http, config.endpoint.as_str())
            .with_language(config.language.as_str()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Example: `client.make_url("/login_sid.lua")` will produce
    /// `{endpoint}/login_sid.lua`
    fn make_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn send<F>(
        &self,
        name: &str,
        method: Method,
        url: &str,
        func: F,
    ) -> Result<reqwest::Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let now = Instant::now();
        let builder = func(self.http.request(method.clone(), url));
        let resp = builder.send().await?;

        // only the path, the query carries the session id
        log::info!(
            "{} request to {} ({} - {}) took {}ms",
            name,
            resp.url().path(),
            method,
            resp.status().as_u16(),
            elapsed_ms(&now),
        );

        Ok(resp.error_for_status()?)
    }

    async fn request_text<F>(
        &self,
        name: &str,
        method: Method,
        url: &str,
        func: F,
    ) -> Result<String>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        Ok(self.send(name, method, url, func).await?.text().await?)
    }

    async fn request_with_query(
        &self,
        name: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String> {
        self.request_text(name, Method::GET, url, |req| req.query(query))
            .await
    }

    async fn request_with_form(
        &self,
        name: &str,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<String> {
        self.request_text(name, Method::POST, url, |req| req.form(form))
            .await
    }

    /// Get the login challenge.
    pub async fn login_challenge(&self) -> Result<SessionInfo> {
        let url = self.make_url(LOGIN_PATH);

        let text = self
            .request_text("login-challenge", Method::GET, &url, |req| req)
            .await?;

        Ok(SessionInfo::from_xml(&text)?)
    }

    /// Answer the challenge of `challenge` for `username`.
    pub async fn login_response(
        &self,
        challenge: &SessionInfo,
        username: &str,
        password: &str,
    ) -> Result<SessionInfo> {
        let response = challenge.challenge.make_response(password).to_string();
        let url = self.make_url(LOGIN_PATH);
        let query: [(&str, &str); 2] = [("response", &response), ("username", username)];

        let text = self
            .request_with_query("login-response", &url, &query)
            .await?;

        Ok(SessionInfo::from_xml(&text)?)
    }

    /// Create a new session.
    ///
    /// Fails with [`Error::AuthenticationFailed`] if the FRITZ!Box answers
    /// with the zero session id, the caller has to wait `block_time` seconds
    /// before trying again.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        // get the challenge
        let challenge = self.login_challenge().await?;
        if challenge.block_time > 0 {
            log::warn!(
                "login is blocked for another {} second(s)",
                challenge.block_time
            );
        }
        if !challenge.users.is_empty() && !challenge.has_user(username) {
            log::debug!("{:?} is not in {:?}", username, challenge.users);
        }

        // respond with the correct response
        let response = self.login_response(&challenge, username, password).await?;

        // check returned session id
        if !response.session_id.is_valid() {
            return Err(Error::AuthenticationFailed {
                block_time: response.block_time,
            });
        }

        Ok(Session::new(
            response.session_id,
            challenge.challenge,
            self.endpoint.as_str(),
            response.block_time,
            self.language.as_str(),
        ))
    }

    /// Ask the FRITZ!Box whether `session` is still valid.
    pub async fn session_valid(&self, session: &Session) -> Result<bool> {
        let url = session.url(LOGIN_PATH);
        let sid = session.to_string();
        let form: [(&str, &str); 1] = [("sid", &sid)];

        let text = self
            .request_text("check-session", Method::POST, &url, |req| req.form(&form))
            .await?;
        let resp_session_id = SessionInfo::from_xml(&text)?.session_id;

        Ok(resp_session_id.is_valid() && resp_session_id == session.session_id())
    }

    /// Destroy the session.
    pub async fn logout(&self, session: Session) -> Result<()> {
        let url = session.url(LOGIN_PATH);
        let sid = session.to_string();
        let form: [(&str, &str); 2] = [("logout", "1"), ("sid", &sid)];

        let _ = self
            .request_text("logout", Method::POST, &url, |req| req.form(&form))
            .await?;

        Ok(())
    }

    /// Fetch the overview page with the derived connection fields filled in.
    pub async fn status(&self, session: &Session) -> Result<StatusSnapshot> {
        let url = session.url(DATA_PATH);
        let sid = session.to_string();
        let query: [(&str, &str); 7] = [
            ("sid", &sid),
            ("xhr", "1"),
            ("lang", session.language()),
            ("page", "overview"),
            ("xhrId", "first"),
            ("noMenuRef", "1"),
            ("no_sidrenew", ""),
        ];

        let text = self.request_with_query("status", &url, &query).await?;

        let mut status = serde_json::from_str::<Response<StatusSnapshot>>(&text)?.data;
        status.normalize()?;
        Ok(status)
    }

    /// Fetch the data behind the online monitor graph.
    pub async fn traffic_stats(&self, session: &Session) -> Result<TrafficStats> {
        let url = session.url(MONITOR_PATH);
        let sid = session.to_string();
        let cache_buster = cache_buster();
        let query: [(&str, &str); 6] = [
            ("sid", &sid),
            ("myXhr", "1"),
            ("action", "get_graphic"),
            ("useajax", "1"),
            ("xhr", "1"),
            (&cache_buster, "nocache"),
        ];

        let text = self
            .request_with_query("traffic-stats", &url, &query)
            .await?;

        let mut stats = serde_json::from_str::<Vec<TrafficStats>>(&text)?
            .into_iter()
            .next()
            .ok_or(DecodeError::EmptyStats)?;
        stats.compute_totals();
        Ok(stats)
    }

    /// Fetch the logs.
    ///
    /// API returns logs ordered from **new to old** so the **newest log is at index 0**.
    pub async fn logs(&self, session: &Session) -> Result<Logs> {
        let url = session.url(DATA_PATH);
        let sid = session.to_string();
        let form: [(&str, &str); 5] = [
            ("sid", &sid),
            ("page", "log"),
            ("lang", session.language()),
            ("xhr", "1"),
            ("xhrId", "all"),
        ];

        let text = self.request_with_form("logs", &url, &form).await?;

        Ok(serde_json::from_str::<Response<LogData>>(&text)?
            .data
            .logs
            .ok_or(DecodeError::MissingField("log"))?)
    }

    /// Fetch the DSL line overview.
    pub async fn dsl_info(&self, session: &Session) -> Result<DslInfo> {
        let url = session.url(DATA_PATH);
        let sid = session.to_string();
        let form: [(&str, &str); 5] = [
            ("xhr", "1"),
            ("sid", &sid),
            ("lang", session.language()),
            ("page", "dslOv"),
            ("xhrId", "all"),
        ];

        let text = self.request_with_form("dsl-info", &url, &form).await?;

        Ok(serde_json::from_str::<Response<DslData>>(&text)?
            .data
            .connection_data
            .ok_or(DecodeError::MissingField("connectionData"))?)
    }

    /// Download the support data export, used to draw the HLog/QLN graphs.
    ///
    /// The body is returned as is.
    pub async fn support_data(&self, session: &Session) -> Result<Vec<u8>> {
        let url = session.url(FIRMWARECFG_PATH);
        let form = reqwest::multipart::Form::new()
            .text("sid", session.to_string())
            .text("SupportData", "");

        let resp = self
            .send("support-data", Method::POST, &url, |req| req.multipart(form))
            .await?;

        Ok(resp.bytes().await?.to_vec())
    }

    /// Disconnect the FRITZ!Box from the internet, usually to get a new IP address.
    ///
    /// Returns as soon as the FRITZ!Box acknowledged the command, reconnecting
    /// can take up to 30 seconds after that.
    pub async fn disconnect(&self, session: &Session) -> Result<()> {
        let url = session.url(MONITOR_PATH);
        let sid = session.to_string();
        let cache_buster = cache_buster();
        let query: [(&str, &str); 6] = [
            ("sid", &sid),
            ("myXhr", "1"),
            ("action", "disconnect"),
            ("useajax", "1"),
            ("xhr", "1"),
            (&cache_buster, "nocache"),
        ];

        let body = self.request_with_query("disconnect", &url, &query).await?;

        if body == COMMAND_DONE {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: "disconnect",
                body,
            })
        }
    }
}
