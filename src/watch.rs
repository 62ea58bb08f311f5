//! Service Center Watch 客户端
//!
//! 接收注册中心实例变更推送通知的长连接客户端，与请求客户端使用
//! 完全相同的构造参数，但各自独立持有连接与故障转移状态。

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::auth::{RequestAuthHeaderSource, SignRequest};
use crate::endpoint::EndpointSet;
use crate::error::{DiscoveryError, Result};
use crate::tls::TlsBundle;
use crate::transport::build_http_client;

/// Service Center Watch 客户端
#[derive(Debug)]
pub struct ServiceCenterWatch {
    endpoints: EndpointSet,
    tls: TlsBundle,
    header_source: RequestAuthHeaderSource,
    project: String,
    static_headers: HashMap<String, String>,
    http: OnceCell<reqwest::Client>,
}

impl ServiceCenterWatch {
    /// 构造 Watch 客户端，参数约定与请求客户端一致
    pub fn new(
        endpoints: EndpointSet,
        tls: TlsBundle,
        header_source: RequestAuthHeaderSource,
        project: impl Into<String>,
        static_headers: HashMap<String, String>,
    ) -> Result<Self> {
        let project = project.into();
        if project.trim().is_empty() {
            return Err(DiscoveryError::configuration(
                "service center watch requires a non-empty project",
            ));
        }

        Ok(Self {
            endpoints,
            tls,
            header_source,
            project,
            static_headers,
            http: OnceCell::new(),
        })
    }

    /// 端点集合
    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// TLS 配置包
    pub fn tls(&self) -> &TlsBundle {
        &self.tls
    }

    /// 租户标识
    pub fn project(&self) -> &str {
        &self.project
    }

    /// 静态请求头
    pub fn static_headers(&self) -> &HashMap<String, String> {
        &self.static_headers
    }

    /// 组装建立 Watch 连接时携带的完整请求头
    pub fn request_headers(&self, sign_request: &SignRequest) -> HashMap<String, String> {
        let mut headers = self.static_headers.clone();
        headers.extend(self.header_source.load_auth_headers(sign_request));
        headers
    }

    /// 惰性构建的 HTTP 传输，与请求客户端互不共享
    pub fn http_client(&self) -> Result<&reqwest::Client> {
        self.http.get_or_try_init(|| {
            debug!(project = %self.project, "building service center watch transport");
            build_http_client(&self.tls)
        })
    }
}
