//! 错误类型模块
//!
//! 装配过程只产生一类错误：配置错误。所有错误向上传播至进程启动
//! 流程，本地不做任何恢复。

use thiserror::Error;

/// 装配统一结果类型
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// 服务发现装配错误
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// 配置错误：端点解析为空、安全端点缺少必要的 TLS 字段、
    /// 或客户端构造参数非法
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DiscoveryError {
    /// 构造配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
