//! Wire 风格的依赖注入模块
//!
//! 按依赖顺序装配 Service Center 请求客户端与 Watch 客户端。
//! 装配只在进程启动时执行一次；未启用服务发现时不构建任何客户端。

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::auth::{AuthHeaderProvider, RequestAuthHeaderSource};
use crate::client::ServiceCenterClient;
use crate::config::AppConfig;
use crate::endpoint::{DEFAULT_PROJECT, EndpointSet, resolve_endpoints};
use crate::error::Result;
use crate::tls::{TlsBundle, build_tls_bundle};
use crate::watch::ServiceCenterWatch;

/// 装配完成的发现组件集合
#[derive(Clone)]
pub struct DiscoveryComponents {
    /// 请求客户端
    pub client: Arc<ServiceCenterClient>,
    /// Watch 客户端
    pub watch: Arc<ServiceCenterWatch>,
}

/// 发现组件装配器
///
/// 认证头提供者在装配前注册；若集成方已自行构建某个客户端，可通过
/// `with_client` / `with_watch` 提供，装配时不再重复构建。
#[derive(Default)]
pub struct DiscoveryWiring {
    providers: Vec<Arc<dyn AuthHeaderProvider>>,
    client: Option<Arc<ServiceCenterClient>>,
    watch: Option<Arc<ServiceCenterWatch>>,
}

impl DiscoveryWiring {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个认证头提供者（按注册顺序聚合）
    pub fn with_auth_provider(mut self, provider: Arc<dyn AuthHeaderProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// 使用集成方提供的请求客户端
    pub fn with_client(mut self, client: Arc<ServiceCenterClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// 使用集成方提供的 Watch 客户端
    pub fn with_watch(mut self, watch: Arc<ServiceCenterWatch>) -> Self {
        self.watch = Some(watch);
        self
    }

    /// 装配发现组件
    ///
    /// 未启用服务发现时返回 `Ok(None)`。两个客户端使用相同的输入各自
    /// 解析端点集合，互不共享连接与故障转移状态。构造错误原样向上
    /// 传播，由进程启动流程终止启动。
    pub fn initialize(self, config: &AppConfig) -> Result<Option<DiscoveryComponents>> {
        if !config.discovery.enabled {
            info!("service center discovery disabled, skipping client construction");
            return Ok(None);
        }

        let header_source = RequestAuthHeaderSource::new(self.providers);

        let client = match self.client {
            Some(client) => client,
            None => {
                let (endpoints, tls) = assemble_transport_inputs(config)?;
                let client = Arc::new(ServiceCenterClient::new(
                    endpoints,
                    tls,
                    header_source.clone(),
                    DEFAULT_PROJECT,
                    HashMap::new(),
                )?);
                info!(
                    endpoints = ?client.endpoints().endpoints(),
                    tls_enabled = client.tls().enabled,
                    "✅ service center client constructed"
                );
                client
            }
        };

        let watch = match self.watch {
            Some(watch) => watch,
            None => {
                let (endpoints, tls) = assemble_transport_inputs(config)?;
                let watch = Arc::new(ServiceCenterWatch::new(
                    endpoints,
                    tls,
                    header_source,
                    DEFAULT_PROJECT,
                    HashMap::new(),
                )?);
                info!(
                    endpoints = ?watch.endpoints().endpoints(),
                    tls_enabled = watch.tls().enabled,
                    "✅ service center watch constructed"
                );
                watch
            }
        };

        Ok(Some(DiscoveryComponents { client, watch }))
    }
}

/// 为单个客户端装配端点集合与 TLS 配置包
fn assemble_transport_inputs(config: &AppConfig) -> Result<(EndpointSet, TlsBundle)> {
    let endpoints = resolve_endpoints(&config.discovery)?;
    let tls = build_tls_bundle(&endpoints, &config.tls)?;
    Ok((endpoints, tls))
}

static GLOBAL_COMPONENTS: OnceCell<DiscoveryComponents> = OnceCell::new();

/// 进程级发现组件注册表
pub struct GlobalDiscovery;

impl GlobalDiscovery {
    /// 注册发现组件（先注册者生效）
    pub fn init(components: DiscoveryComponents) -> DiscoveryComponents {
        GLOBAL_COMPONENTS.get_or_init(|| components).clone()
    }

    /// 获取已注册的发现组件
    pub fn get() -> Option<DiscoveryComponents> {
        GLOBAL_COMPONENTS.get().cloned()
    }
}
