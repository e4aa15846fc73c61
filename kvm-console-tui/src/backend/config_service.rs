//! 配置服务
//!
//! 启动时读取一次 JSON 配置，之后视为只读。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use kvm_console_provider::{ApigeeCredentials, ApigeeProvider, DEFAULT_BASE_URL};

use crate::view::theme::Theme;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "KVM_CONSOLE_CONFIG";
/// 覆盖配置文件中的 token
pub const TOKEN_ENV: &str = "KVM_CONSOLE_TOKEN";

/// 获取默认配置目录
fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kvm-console")
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    pub organization: String,
    /// 为空时仍可启动，第一次请求会提示凭证错误
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub theme: Theme,
}

impl ConsoleConfig {
    /// 解析配置文本，`token_override` 非空时替换 token
    pub fn parse(text: &str, token_override: Option<String>) -> Result<Self> {
        let mut config: Self = serde_json::from_str(text).context("Invalid config document")?;

        config.organization = config.organization.trim().to_string();
        if config.organization.is_empty() {
            bail!("Config is missing 'organization'");
        }
        if let Some(token) = token_override.filter(|t| !t.trim().is_empty()) {
            config.token = token;
        }
        config.token = config.token.trim().to_string();
        Ok(config)
    }

    /// 导出目录：配置值，否则下载目录，否则当前目录
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn build_provider(&self) -> Result<ApigeeProvider> {
        let mut builder = ApigeeProvider::builder(ApigeeCredentials {
            organization: self.organization.clone(),
            token: self.token.clone(),
        })
        .base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .max_retries(self.max_retries);

        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        builder.build().context("Failed to create Apigee client")
    }
}

/// 基于 JSON 文件的配置服务
pub struct FileConfigService {
    path: PathBuf,
}

impl FileConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$KVM_CONSOLE_CONFIG`，否则 `{config_dir}/kvm-console/config.json`
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| get_config_dir().join("config.json"), PathBuf::from);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ConsoleConfig> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config file {}", self.path.display()))?;
        ConsoleConfig::parse(&text, std::env::var(TOKEN_ENV).ok())
    }
}
