//! アプリ設定。環境変数と任意の `config.toml` から読み込む。

use serde::Deserialize;

/// リッスンポートは 5000 固定 (設定不可)
pub const HTTP_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite データベースファイル
    pub database_path: String,
    /// CORS で許可するローカル開発オリジン
    pub allowed_dev_origin: String,
    /// CORS で許可するデプロイ先オリジンのサフィックス
    pub allowed_origin_suffix: String,
}

impl AppConfig {
    /// 設定をファイルまたは環境変数から読み込む
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            // デフォルト値の設定 (環境変数があればそちらを優先)
            .set_default(
                "database_path",
                std::env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "contacts_db.sqlite".to_string()),
            )?
            .set_default(
                "allowed_dev_origin",
                std::env::var("CORS_DEV_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            )?
            .set_default(
                "allowed_origin_suffix",
                std::env::var("CORS_ORIGIN_SUFFIX")
                    .unwrap_or_else(|_| ".vercel.app".to_string()),
            )?
            // config.toml があれば読み込む
            .add_source(config::File::with_name("config").required(false))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_file() {
        let cfg = AppConfig::load().expect("defaults should always load");
        assert_eq!(cfg.allowed_origin_suffix, ".vercel.app");
        assert!(!cfg.database_path.is_empty());
    }
}
