//! 传输层 TLS 配置装配模块
//!
//! 根据解析出的端点集合与用户提供的证书材料配置，装配传输层使用的
//! TLS 配置包。`enabled` 标志与端点是否使用安全协议保持一致；
//! 信任材料容器固定为 PEM（rustls 生态的原生容器格式）。

use std::sync::Arc;

use serde::Deserialize;

use crate::config::TlsMaterialProperties;
use crate::endpoint::EndpointSet;
use crate::error::{DiscoveryError, Result};

/// 信任库固定使用的容器格式
pub const TRUST_STORE_KIND: KeyStoreKind = KeyStoreKind::Pem;

/// 密钥库容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStoreKind {
    /// PEM 编码（默认）
    #[default]
    Pem,
    /// PKCS#12 容器
    Pkcs12,
    /// Java 密钥库容器
    Jks,
}

/// TLS 口令扩展点
///
/// 默认实现原样返回口令；集成方可实现该 trait 支持口令解密。
pub trait TlsCustom: Send + Sync {
    /// 解密配置中的口令
    fn decrypt_password(&self, value: &str) -> String {
        value.to_string()
    }
}

/// 默认口令实现（恒等）
#[derive(Debug, Default)]
pub struct DefaultTlsCustom;

impl TlsCustom for DefaultTlsCustom {}

/// TLS 证书材料选项
#[derive(Debug, Clone)]
pub struct TlsOptions {
    /// 密钥库容器格式
    pub keystore_kind: KeyStoreKind,
    /// 密钥库路径
    pub keystore: String,
    /// 密钥库口令
    pub keystore_value: String,
    /// 信任库容器格式（固定为 PEM）
    pub truststore_kind: KeyStoreKind,
    /// 信任库路径
    pub truststore: String,
    /// 信任库口令
    pub truststore_value: String,
}

/// 传输层 TLS 配置包
#[derive(Clone)]
pub struct TlsBundle {
    /// 是否启用 TLS
    pub enabled: bool,
    /// 证书材料选项
    pub options: TlsOptions,
    /// 口令扩展
    pub custom: Arc<dyn TlsCustom>,
}

impl std::fmt::Debug for TlsBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsBundle")
            .field("enabled", &self.enabled)
            .field("options", &self.options)
            .field("custom", &"<dyn TlsCustom>")
            .finish()
    }
}

impl TlsBundle {
    /// 经扩展点处理后的密钥库口令
    pub fn keystore_password(&self) -> String {
        self.custom.decrypt_password(&self.options.keystore_value)
    }

    /// 经扩展点处理后的信任库口令
    pub fn truststore_password(&self) -> String {
        self.custom.decrypt_password(&self.options.truststore_value)
    }
}

/// 装配 TLS 配置包（使用默认口令扩展）
pub fn build_tls_bundle(
    endpoints: &EndpointSet,
    material: &TlsMaterialProperties,
) -> Result<TlsBundle> {
    build_tls_bundle_with_custom(endpoints, material, Arc::new(DefaultTlsCustom))
}

/// 装配 TLS 配置包（使用指定口令扩展）
///
/// `enabled` 与端点集合是否包含安全端点保持一致；证书材料原样拷贝，
/// 信任库容器格式固定为 PEM。安全端点缺少信任库路径视为配置错误。
/// 此处不校验文件是否存在，由传输层构建时处理。
pub fn build_tls_bundle_with_custom(
    endpoints: &EndpointSet,
    material: &TlsMaterialProperties,
    custom: Arc<dyn TlsCustom>,
) -> Result<TlsBundle> {
    let enabled = endpoints.ssl_enabled();

    if enabled && material.truststore.trim().is_empty() {
        return Err(DiscoveryError::configuration(
            "secure service center endpoint requires a truststore path",
        ));
    }

    Ok(TlsBundle {
        enabled,
        options: TlsOptions {
            keystore_kind: material.keystore_kind,
            keystore: material.keystore.clone(),
            keystore_value: material.keystore_value.clone(),
            truststore_kind: TRUST_STORE_KIND,
            truststore: material.truststore.clone(),
            truststore_value: material.truststore_value.clone(),
        },
        custom,
    })
}
