//! Service Center 请求客户端
//!
//! 承载注册、心跳、查询等即时操作的客户端。本 crate 只负责装配：
//! 端点集合、TLS 配置包、认证头组合器、租户与静态头在构造时固定，
//! 传输在首次使用时惰性构建。

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::auth::{RequestAuthHeaderSource, SignRequest};
use crate::endpoint::EndpointSet;
use crate::error::{DiscoveryError, Result};
use crate::tls::TlsBundle;
use crate::transport::build_http_client;

/// Service Center 请求客户端
#[derive(Debug)]
pub struct ServiceCenterClient {
    endpoints: EndpointSet,
    tls: TlsBundle,
    header_source: RequestAuthHeaderSource,
    project: String,
    static_headers: HashMap<String, String>,
    http: OnceCell<reqwest::Client>,
}

impl ServiceCenterClient {
    /// 构造请求客户端
    ///
    /// 端点集合、TLS 配置包、认证头组合器、租户标识与静态头在构造时
    /// 固定。租户标识为空视为配置错误。
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
                "service center client requires a non-empty project",
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

    /// 组装一次请求携带的完整请求头
    ///
    /// 静态头在前，认证头在后（同名键认证头覆盖静态头）
    pub fn request_headers(&self, sign_request: &SignRequest) -> HashMap<String, String> {
        let mut headers = self.static_headers.clone();
        headers.extend(self.header_source.load_auth_headers(sign_request));
        headers
    }

    /// 惰性构建的 HTTP 传输，各客户端实例独立持有连接状态
    pub fn http_client(&self) -> Result<&reqwest::Client> {
        self.http.get_or_try_init(|| {
            debug!(project = %self.project, "building service center client transport");
            build_http_client(&self.tls)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::AuthHeaderProvider;
    use crate::config::TlsMaterialProperties;
    use crate::endpoint::DEFAULT_PROJECT;
    use crate::tls::build_tls_bundle;

    struct TokenProvider;

    impl AuthHeaderProvider for TokenProvider {
        fn auth_headers(&self) -> HashMap<String, String> {
            HashMap::from([("Authorization".to_string(), "Bearer token".to_string())])
        }
    }

    fn plain_inputs() -> (EndpointSet, TlsBundle) {
        let endpoints =
            EndpointSet::new(DEFAULT_PROJECT, vec!["http://a:30100".to_string()]).unwrap();
        let tls = build_tls_bundle(&endpoints, &TlsMaterialProperties::default()).unwrap();
        (endpoints, tls)
    }

    #[test]
    fn test_empty_project_is_rejected() {
        let (endpoints, tls) = plain_inputs();
        let err = ServiceCenterClient::new(
            endpoints,
            tls,
            RequestAuthHeaderSource::new(Vec::new()),
            "  ",
            HashMap::new(),
        )
        .expect_err("empty project rejected");
        assert!(matches!(err, DiscoveryError::Configuration(_)));
    }

    #[test]
    fn test_request_headers_merge_static_and_auth() {
        let (endpoints, tls) = plain_inputs();
        let static_headers = HashMap::from([
            ("x-domain-name".to_string(), "default".to_string()),
            ("Authorization".to_string(), "stale".to_string()),
        ]);
        let client = ServiceCenterClient::new(
            endpoints,
            tls,
            RequestAuthHeaderSource::new(vec![Arc::new(TokenProvider)]),
            DEFAULT_PROJECT,
            static_headers,
        )
        .unwrap();

        let headers = client.request_headers(&SignRequest::new("PUT", "http://a:30100/heartbeat"));

        assert_eq!(headers.get("x-domain-name"), Some(&"default".to_string()));
        // 测试：认证头覆盖同名静态头
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer token".to_string())
        );
    }

    #[test]
    fn test_transport_is_lazily_built() {
        let (endpoints, tls) = plain_inputs();
        let client = ServiceCenterClient::new(
            endpoints,
            tls,
            RequestAuthHeaderSource::new(Vec::new()),
            DEFAULT_PROJECT,
            HashMap::new(),
        )
        .unwrap();

        assert!(client.http_client().is_ok());
    }
}
