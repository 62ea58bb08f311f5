//! 传输层构建模块
//!
//! 将 TLS 配置包转化为 reqwest 客户端。证书文件在此处读取与校验。

use std::fs;

use crate::error::{DiscoveryError, Result};
use crate::tls::{KeyStoreKind, TlsBundle};

/// 根据 TLS 配置包构建 HTTP 客户端
///
/// 未启用 TLS 时返回普通客户端；启用时加载 PEM 信任材料，并在配置了
/// 密钥库时加载 PEM 客户端身份。rustls 传输不支持容器格式
/// （PKCS#12 / JKS）的密钥库。
pub fn build_http_client(bundle: &TlsBundle) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().use_rustls_tls();

    if bundle.enabled {
        let ca = fs::read(&bundle.options.truststore).map_err(|err| {
            DiscoveryError::configuration(format!(
                "unable to read truststore {}: {}",
                bundle.options.truststore, err
            ))
        })?;
        let certificate = reqwest::Certificate::from_pem(&ca).map_err(|err| {
            DiscoveryError::configuration(format!(
                "invalid PEM truststore {}: {}",
                bundle.options.truststore, err
            ))
        })?;
        builder = builder.add_root_certificate(certificate);

        if !bundle.options.keystore.trim().is_empty() {
            builder = builder.identity(load_identity(bundle)?);
        }
    }

    builder
        .build()
        .map_err(|err| DiscoveryError::configuration(format!("unable to build http client: {err}")))
}

/// 加载 PEM 客户端身份
///
/// rustls 要求身份材料为未加密 PEM；口令字段只对容器格式有意义
fn load_identity(bundle: &TlsBundle) -> Result<reqwest::Identity> {
    match bundle.options.keystore_kind {
        KeyStoreKind::Pem => {
            let pem = fs::read(&bundle.options.keystore).map_err(|err| {
                DiscoveryError::configuration(format!(
                    "unable to read keystore {}: {}",
                    bundle.options.keystore, err
                ))
            })?;
            reqwest::Identity::from_pem(&pem).map_err(|err| {
                DiscoveryError::configuration(format!(
                    "invalid PEM keystore {}: {}",
                    bundle.options.keystore, err
                ))
            })
        }
        kind @ (KeyStoreKind::Pkcs12 | KeyStoreKind::Jks) => Err(DiscoveryError::configuration(
            format!("keystore kind {kind:?} is not supported by the rustls transport"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{DEFAULT_PROJECT, EndpointSet};
    use crate::tls::build_tls_bundle;
    use crate::config::TlsMaterialProperties;

    #[test]
    fn test_disabled_bundle_builds_plain_client() {
        let endpoints =
            EndpointSet::new(DEFAULT_PROJECT, vec!["http://a:30100".to_string()]).unwrap();
        let bundle =
            build_tls_bundle(&endpoints, &TlsMaterialProperties::default()).unwrap();

        assert!(build_http_client(&bundle).is_ok());
    }

    #[test]
    fn test_missing_truststore_file_is_configuration_error() {
        let endpoints =
            EndpointSet::new(DEFAULT_PROJECT, vec!["https://a:30100".to_string()]).unwrap();
        let material = TlsMaterialProperties {
            truststore: "/nonexistent/ca.pem".to_string(),
            ..Default::default()
        };
        let bundle = build_tls_bundle(&endpoints, &material).unwrap();

        let err = build_http_client(&bundle).expect_err("missing file rejected");
        assert!(matches!(err, DiscoveryError::Configuration(_)));
    }

    #[test]
    fn test_container_keystore_kind_is_rejected() {
        let endpoints =
            EndpointSet::new(DEFAULT_PROJECT, vec!["https://a:30100".to_string()]).unwrap();
        let material = TlsMaterialProperties {
            keystore_kind: KeyStoreKind::Pkcs12,
            keystore: "/etc/cert/client.p12".to_string(),
            truststore: "/etc/cert/ca.pem".to_string(),
            ..Default::default()
        };
        let bundle = build_tls_bundle(&endpoints, &material).unwrap();

        let err = load_identity(&bundle).expect_err("container keystore rejected");
        assert!(err.to_string().contains("not supported"));
    }
}
