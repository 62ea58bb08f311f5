//! Service Center 配置模块
//!
//! 该模块提供应用配置管理功能，包括：
//! - 配置文件加载和解析（TOML）
//! - 发现配置与 TLS 证书材料配置定义
//! - 进程级全局配置实例

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::warn;

use crate::tls::KeyStoreKind;

/// 全局应用配置实例，使用 OnceLock 确保只初始化一次
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

fn default_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 注册中心发现配置
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryProperties {
    /// 是否启用服务发现（默认启用）
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 注册中心地址，支持逗号/分号分隔的多地址
    #[serde(default)]
    pub address: String,
}

impl Default for DiscoveryProperties {
    fn default() -> Self {
        Self {
            enabled: true,
            address: String::new(),
        }
    }
}

/// TLS 证书材料配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TlsMaterialProperties {
    /// 密钥库容器格式
    #[serde(default)]
    pub keystore_kind: KeyStoreKind,
    /// 密钥库路径
    #[serde(default)]
    pub keystore: String,
    /// 密钥库口令
    #[serde(default)]
    pub keystore_value: String,
    /// 信任库路径
    #[serde(default)]
    pub truststore: String,
    /// 信任库口令
    #[serde(default)]
    pub truststore_value: String,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 是否输出 target
    #[serde(default)]
    pub with_target: bool,
    /// 是否输出线程 ID
    #[serde(default)]
    pub with_thread_ids: bool,
    /// 是否输出文件名
    #[serde(default)]
    pub with_file: bool,
    /// 是否输出行号
    #[serde(default)]
    pub with_line_number: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: true,
            with_thread_ids: false,
            with_file: false,
            with_line_number: false,
        }
    }
}

/// 应用配置主结构体
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 发现配置
    #[serde(default)]
    pub discovery: DiscoveryProperties,
    /// TLS 证书材料配置
    #[serde(default)]
    pub tls: TlsMaterialProperties,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 加载配置
///
/// 依次尝试候选路径，全部失败时退回默认配置。结果写入进程级
/// 全局实例，后续调用返回首次加载的结果。
pub fn load_config(path: Option<&str>) -> &'static AppConfig {
    let candidates: Vec<PathBuf> = match path {
        Some(p) => vec![PathBuf::from(p)],
        None => vec![
            PathBuf::from("config.toml"),
            PathBuf::from("config/discovery.toml"),
        ],
    };

    APP_CONFIG.get_or_init(|| load_with_fallback(&candidates))
}

/// 获取应用配置
pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get().expect("configuration not initialised")
}

/// 使用备选方案加载配置
fn load_with_fallback(candidates: &[PathBuf]) -> AppConfig {
    for path in candidates {
        match load_config_from_file(path) {
            Ok(cfg) => return cfg,
            Err(err) => {
                warn!("failed to load config from {}: {err}", path.display());
            }
        }
    }

    warn!("no configuration source succeeded, falling back to defaults");
    AppConfig::default()
}

/// 从文件加载配置
fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(anyhow!(
            "configuration path {} does not exist",
            path.display()
        ));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read config file: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&content)
        .with_context(|| format!("invalid config format: {}", path.display()))?;
    Ok(cfg)
}
