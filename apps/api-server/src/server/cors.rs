//! # CORS ポリシー
//!
//! Origin ヘッダなし (curl・サーバ間通信) はこの層では制限されない。
//! ブラウザからはローカル開発オリジンと、デプロイ先サフィックスに一致する
//! オリジンだけを許可する。

use axum::http::request::Parts;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::AppConfig;

pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    let dev_origin = cfg.allowed_dev_origin.clone();
    let suffix = cfg.allowed_origin_suffix.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
            origin
                .to_str()
                .map(|o| origin_allowed(o, &dev_origin, &suffix))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

fn origin_allowed(origin: &str, dev_origin: &str, deploy_suffix: &str) -> bool {
    origin == dev_origin || origin.ends_with(deploy_suffix)
}
