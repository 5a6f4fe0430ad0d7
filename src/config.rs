use crate::error::{Result, ScrapeError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 结果后端 ---
    /// 结果站点根地址
    pub base_url: String,
    /// 选举范围（5 = 省参议员）
    pub scope: u32,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 两次请求之间的固定间隔（毫秒）
    pub request_delay_ms: u64,
    /// 会话 Cookie，只能从环境变量或文件提供
    #[serde(skip)]
    pub session_cookie: Option<String>,
    pub user_agent: String,
    pub accept_language: String,

    // --- 批处理 ---
    /// 抽样测试的投票桌数量
    pub sample_size: usize,
    /// 每处理多少条打印一次进度
    pub progress_interval: usize,
    /// 跳过交互式确认
    pub auto_confirm: bool,

    // --- ID 提取文件 ---
    pub nomenclator_file: String,
    pub mesas_file: String,
    pub extracted_ids_file: String,

    // --- 结果抓取文件 ---
    pub structure_file: String,
    pub results_file: String,
    pub errors_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://resultados.eleccionesbonaerenses.gba.gob.ar".to_string(),
            scope: 5,
            request_timeout_secs: 10,
            request_delay_ms: 100,
            session_cookie: None,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36".to_string(),
            accept_language: "es-419,es;q=0.9,en;q=0.8".to_string(),
            sample_size: 20,
            progress_interval: 100,
            auto_confirm: false,
            nomenclator_file: "getNomenclator.json".to_string(),
            mesas_file: "mesas_con_ids_y_cos.csv".to_string(),
            extracted_ids_file: "cos_con_ids_extraidos.csv".to_string(),
            structure_file: "response_structure.json".to_string(),
            results_file: "resultados_senador_mesas.json".to_string(),
            errors_file: "errores_senador.json".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺失字段使用默认值，随后应用环境变量覆盖
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScrapeError::io(path.display().to_string(), e))?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ScrapeError::Config(format!("无法解析配置文件 {}: {}", path.display(), e))
        })?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            base_url: env("RESULTS_BASE_URL").unwrap_or(self.base_url),
            scope: env("RESULTS_SCOPE").and_then(|v| v.parse().ok()).unwrap_or(self.scope),
            request_timeout_secs: env("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            request_delay_ms: env("REQUEST_DELAY_MS").and_then(|v| v.parse().ok()).unwrap_or(self.request_delay_ms),
            session_cookie: load_session_cookie().or(self.session_cookie),
            user_agent: env("USER_AGENT").unwrap_or(self.user_agent),
            accept_language: env("ACCEPT_LANGUAGE").unwrap_or(self.accept_language),
            sample_size: env("SAMPLE_SIZE").and_then(|v| v.parse().ok()).unwrap_or(self.sample_size),
            progress_interval: env("PROGRESS_INTERVAL").and_then(|v| v.parse().ok()).unwrap_or(self.progress_interval),
            auto_confirm: env("AUTO_CONFIRM").and_then(|v| v.parse().ok()).unwrap_or(self.auto_confirm),
            nomenclator_file: env("NOMENCLATOR_FILE").unwrap_or(self.nomenclator_file),
            mesas_file: env("MESAS_FILE").unwrap_or(self.mesas_file),
            extracted_ids_file: env("EXTRACTED_IDS_FILE").unwrap_or(self.extracted_ids_file),
            structure_file: env("STRUCTURE_FILE").unwrap_or(self.structure_file),
            results_file: env("RESULTS_FILE").unwrap_or(self.results_file),
            errors_file: env("ERRORS_FILE").unwrap_or(self.errors_file),
        }
    }

    /// 取出会话 Cookie，未配置时报错
    pub fn require_session_cookie(&self) -> Result<&str> {
        self.session_cookie.as_deref().ok_or_else(|| {
            ScrapeError::Config(
                "未提供会话 Cookie，请设置 SESSION_COOKIE 或 SESSION_COOKIE_FILE".to_string(),
            )
        })
    }
}

/// SESSION_COOKIE 优先，其次读取 SESSION_COOKIE_FILE 指向的文件
fn load_session_cookie() -> Option<String> {
    if let Ok(cookie) = std::env::var("SESSION_COOKIE") {
        let cookie = cookie.trim().to_string();
        if !cookie.is_empty() {
            return Some(cookie);
        }
    }

    let path = std::env::var("SESSION_COOKIE_FILE").ok()?;
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cookie = content.trim().to_string();
            (!cookie.is_empty()).then_some(cookie)
        }
        Err(e) => {
            tracing::warn!("无法读取 Cookie 文件 {}: {}", path, e);
            None
        }
    }
}
