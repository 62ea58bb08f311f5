//! 注册中心端点解析模块
//!
//! 按以下顺序解析端点列表：
//! 1. 环境变量 `SERVICE_CENTER_ADDRESS`（进程级覆盖），非空时原样使用
//! 2. 配置文件中的 `address` 字段，按逗号/分号拆分
//!
//! 解析结果连同固定的租户标识 `"default"` 一起包装为 [`EndpointSet`]。

use std::env;

use tracing::debug;
use url::Url;

use crate::config::DiscoveryProperties;
use crate::error::{DiscoveryError, Result};

/// 端点列表环境变量，优先级高于配置文件
pub const SERVICE_CENTER_ADDRESS_ENV: &str = "SERVICE_CENTER_ADDRESS";

/// 固定租户（project）标识
pub const DEFAULT_PROJECT: &str = "default";

/// 注册中心端点集合
///
/// 不变式：端点列表非空
#[derive(Debug, Clone)]
pub struct EndpointSet {
    project: String,
    endpoints: Vec<String>,
}

impl EndpointSet {
    /// 构造端点集合，列表为空时返回配置错误
    pub fn new(project: impl Into<String>, endpoints: Vec<String>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(DiscoveryError::configuration(
                "service center address list must not be empty",
            ));
        }

        Ok(Self {
            project: project.into(),
            endpoints,
        })
    }

    /// 租户标识
    pub fn project(&self) -> &str {
        &self.project
    }

    /// 有序端点列表
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// 任一端点使用 https 协议时返回 true
    pub fn ssl_enabled(&self) -> bool {
        self.endpoints.iter().any(|endpoint| {
            Url::parse(endpoint)
                .map(|url| url.scheme().eq_ignore_ascii_case("https"))
                .unwrap_or(false)
        })
    }
}

/// 拆分多地址字符串
///
/// 按逗号/分号拆分、去除首尾空白、丢弃空项、保持顺序
pub fn split_multi_url(address: &str) -> Vec<String> {
    address
        .split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// 读取环境变量中的端点列表
fn env_server_urls() -> Vec<String> {
    env::var(SERVICE_CENTER_ADDRESS_ENV)
        .map(|value| split_multi_url(&value))
        .unwrap_or_default()
}

/// 解析注册中心端点集合
///
/// 环境变量优先于配置文件；两者都解析为空时返回配置错误
pub fn resolve_endpoints(properties: &DiscoveryProperties) -> Result<EndpointSet> {
    let mut endpoints = env_server_urls();
    if endpoints.is_empty() {
        endpoints = split_multi_url(&properties.address);
    } else {
        debug!(
            env = SERVICE_CENTER_ADDRESS_ENV,
            "service center address taken from environment"
        );
    }

    EndpointSet::new(DEFAULT_PROJECT, endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ENV_GUARD;

    fn properties(address: &str) -> DiscoveryProperties {
        DiscoveryProperties {
            enabled: true,
            address: address.to_string(),
        }
    }

    #[test]
    fn test_split_multi_url() {
        // 测试：逗号分隔
        assert_eq!(
            split_multi_url("http://a:30100,http://b:30100"),
            vec!["http://a:30100", "http://b:30100"]
        );

        // 测试：分号分隔 + 空白
        assert_eq!(
            split_multi_url(" http://a:30100 ; http://b:30100 "),
            vec!["http://a:30100", "http://b:30100"]
        );

        // 测试：空项被丢弃，顺序保持
        assert_eq!(
            split_multi_url("http://a:30100,,;http://b:30100,"),
            vec!["http://a:30100", "http://b:30100"]
        );

        assert!(split_multi_url("").is_empty());
    }

    #[test]
    fn test_resolve_endpoints_from_config() {
        let _guard = ENV_GUARD.lock().unwrap();
        unsafe {
            env::remove_var(SERVICE_CENTER_ADDRESS_ENV);
        }

        let set = resolve_endpoints(&properties("http://a:30100,http://b:30100"))
            .expect("resolution succeeds");

        assert_eq!(set.endpoints(), ["http://a:30100", "http://b:30100"]);
        // 测试：租户固定为 default
        assert_eq!(set.project(), DEFAULT_PROJECT);
    }

    #[test]
    fn test_environment_overrides_config() {
        let _guard = ENV_GUARD.lock().unwrap();
        unsafe {
            env::set_var(SERVICE_CENTER_ADDRESS_ENV, "http://env:30100;http://env2:30100");
        }

        let set = resolve_endpoints(&properties("http://ignored:30100"))
            .expect("resolution succeeds");

        // 测试：环境变量完全覆盖配置文件
        assert_eq!(set.endpoints(), ["http://env:30100", "http://env2:30100"]);
        assert_eq!(set.project(), DEFAULT_PROJECT);

        unsafe {
            env::remove_var(SERVICE_CENTER_ADDRESS_ENV);
        }
    }

    #[test]
    fn test_empty_resolution_fails() {
        let _guard = ENV_GUARD.lock().unwrap();
        unsafe {
            env::remove_var(SERVICE_CENTER_ADDRESS_ENV);
        }

        let err = resolve_endpoints(&properties("  ,; ")).expect_err("empty list rejected");
        assert!(matches!(err, DiscoveryError::Configuration(_)));
    }

    #[test]
    fn test_ssl_enabled_mirrors_scheme() {
        // 测试：全部 http 时为 false
        let plain = EndpointSet::new(
            DEFAULT_PROJECT,
            vec!["http://a:30100".to_string(), "http://b:30100".to_string()],
        )
        .unwrap();
        assert!(!plain.ssl_enabled());

        // 测试：任一 https 时为 true
        let secure = EndpointSet::new(
            DEFAULT_PROJECT,
            vec!["http://a:30100".to_string(), "https://b:30100".to_string()],
        )
        .unwrap();
        assert!(secure.ssl_enabled());
    }
}
