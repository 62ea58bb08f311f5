//! Service Center 服务发现接入库
//!
//! 提供统一的配置加载和 Service Center 客户端装配功能：
//! - 注册中心端点解析（环境变量优先于配置文件）
//! - 传输层 TLS 配置装配
//! - 认证头组合（按注册顺序聚合认证头提供者）
//! - 请求客户端与 Watch 客户端的构建与进程级注册

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod tls;
pub mod tracing;
pub mod transport;
pub mod watch;
pub mod wire;

pub use auth::{AuthHeaderProvider, RequestAuthHeaderSource, SignRequest};
pub use client::ServiceCenterClient;
pub use config::{
    AppConfig, DiscoveryProperties, LoggingConfig, TlsMaterialProperties, app_config, load_config,
};
pub use endpoint::{
    DEFAULT_PROJECT, EndpointSet, SERVICE_CENTER_ADDRESS_ENV, resolve_endpoints, split_multi_url,
};
pub use error::{DiscoveryError, Result};
pub use tls::{
    DefaultTlsCustom, KeyStoreKind, TRUST_STORE_KIND, TlsBundle, TlsCustom, TlsOptions,
    build_tls_bundle, build_tls_bundle_with_custom,
};
pub use transport::build_http_client;
pub use watch::ServiceCenterWatch;
pub use wire::{DiscoveryComponents, DiscoveryWiring, GlobalDiscovery};
