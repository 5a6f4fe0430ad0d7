/// 选举结果 API 客户端
///
/// 封装对结果后端 getScopeDataMap 接口的调用逻辑
use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::models::outcome::{EmptyReason, FailureCause, FetchOutcome};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, REFERER};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 选举结果客户端
pub struct ResultsClient {
    http: reqwest::Client,
    base_url: String,
    scope: u32,
}

impl ResultsClient {
    /// 创建新的结果客户端
    ///
    /// 固定请求头和会话 Cookie 在这里一次性设置
    pub fn new(config: &Config) -> Result<Self> {
        let cookie = config.require_session_cookie()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            header_value("Accept-Language", &config.accept_language)?,
        );
        headers.insert(reqwest::header::ORIGIN, header_value("Origin", &base_url)?);
        headers.insert(HeaderName::from_static("sec-fetch-dest"), HeaderValue::from_static("empty"));
        headers.insert(HeaderName::from_static("sec-fetch-mode"), HeaderValue::from_static("cors"));
        headers.insert(HeaderName::from_static("sec-fetch-site"), HeaderValue::from_static("same-origin"));
        headers.insert(HeaderName::from_static("priority"), HeaderValue::from_static("u=1, i"));
        let mut cookie = header_value("Cookie", cookie)?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            scope: config.scope,
        })
    }

    /// 某个投票桌哈希的结果地址
    pub fn scope_data_url(&self, hash: &str) -> String {
        format!(
            "{}/backend-difu/scope/data/getScopeDataMap/{}/{}/0/-1",
            self.base_url, hash, self.scope
        )
    }

    /// Referer 中携带参议员 ID
    pub fn referer(&self, id_senador: i64) -> String {
        format!("{}/resultados/0/{}/-1", self.base_url, id_senador)
    }

    /// 抓取一个投票桌的结果，只请求一次，不重试
    ///
    /// # 参数
    /// - `hash`: 结构文档中的哈希
    /// - `id_senador`: 参议员 ID
    ///
    /// # 返回
    /// 返回分类后的结果，网络错误也归入 FetchOutcome
    pub async fn fetch_scope_data(&self, hash: &str, id_senador: i64) -> FetchOutcome {
        let url = self.scope_data_url(hash);
        debug!("GET {} (ID:{})", url, id_senador);

        let response = match self
            .http
            .get(&url)
            .header(REFERER, self.referer(id_senador))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return FetchOutcome::OtherError(FailureCause::Transport(transport_message(&e))),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return classify(status, "");
        }

        match response.text().await {
            Ok(body) => classify(status, &body),
            Err(e) => FetchOutcome::OtherError(FailureCause::Transport(transport_message(&e))),
        }
    }
}

/// 根据状态码和响应体对结果分类
pub fn classify(status: StatusCode, body: &str) -> FetchOutcome {
    match status {
        StatusCode::OK => classify_body(body),
        StatusCode::FORBIDDEN => FetchOutcome::Forbidden,
        other => FetchOutcome::OtherError(FailureCause::Status(other.as_u16())),
    }
}

fn classify_body(body: &str) -> FetchOutcome {
    if body.is_empty() {
        return FetchOutcome::EmptyResult(EmptyReason::EmptyBody);
    }

    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(_) => return FetchOutcome::EmptyResult(EmptyReason::InvalidJson),
    };

    match data.get("partidos").and_then(Value::as_array).map(Vec::len) {
        Some(partidos) if partidos > 0 => FetchOutcome::Success { data, partidos },
        _ => FetchOutcome::EmptyResult(EmptyReason::NoPartidos),
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "timeout".to_string()
    } else if e.is_connect() {
        "connection error".to_string()
    } else {
        e.to_string()
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ScrapeError::Config(format!("请求头 {} 含有非法字符", name)))
}
