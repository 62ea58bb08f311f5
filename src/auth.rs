//! 认证头组合模块

use std::collections::HashMap;
use std::sync::Arc;

/// 待签名请求描述
#[derive(Debug, Clone, Default)]
pub struct SignRequest {
    pub method: String,
    pub endpoint: String,
    pub headers: HashMap<String, String>,
    pub content: Vec<u8>,
}

impl SignRequest {
    pub fn new(method: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            content: Vec::new(),
        }
    }
}

/// 认证头提供者
///
/// 每个提供者独立负责自身的线程安全
pub trait AuthHeaderProvider: Send + Sync {
    /// 返回该提供者贡献的认证头
    fn auth_headers(&self) -> HashMap<String, String>;
}

/// 认证头组合器
///
/// 持有不可变的提供者列表，按注册顺序聚合各提供者返回的认证头，
/// 同名键后注册者覆盖先注册者。无可变状态，可并发调用。
#[derive(Clone)]
pub struct RequestAuthHeaderSource {
    providers: Arc<[Arc<dyn AuthHeaderProvider>]>,
}

impl std::fmt::Debug for RequestAuthHeaderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthHeaderSource")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl RequestAuthHeaderSource {
    pub fn new(providers: Vec<Arc<dyn AuthHeaderProvider>>) -> Self {
        Self {
            providers: providers.into(),
        }
    }

    /// 聚合全部提供者的认证头
    ///
    /// 默认组合忽略请求描述；需要读取请求内容的提供者通过独立契约获取
    pub fn load_auth_headers(&self, _sign_request: &SignRequest) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        for provider in self.providers.iter() {
            headers.extend(provider.auth_headers());
        }
        headers
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}
