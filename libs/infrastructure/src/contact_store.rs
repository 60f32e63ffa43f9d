//! # ContactStore — SQLite 永続化実装
//!
//! `contact-core` の `ContactStore` トレイトを SQLite (WAL モード) 上に実装する。
//! スキーマはアプリ層で強制する。DB エンジン側の制約は最小限。

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use contact_core::contracts::{Contact, ContactDraft, ValidContact};
use contact_core::error::ContactError;
use contact_core::traits::ContactStore;

/// SQLite を WAL モードで使用する ContactStore。
/// busy_timeout により並行アクセス時のロック競合を回避する。
#[derive(Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// DB へ接続し、WAL モードとスキーマを初期化する
    pub async fn new(db_path: &str) -> Result<Self, ContactError> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(5000));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| ContactError::Storage {
                reason: format!("Failed to connect to SQLite: {e}"),
            })?;

        let store = Self { pool };
        store.init_db().await?;
        Ok(store)
    }

    async fn init_db(&self) -> Result<(), ContactError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                message TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::Storage {
            reason: format!("Failed to create contacts table: {e}"),
        })?;

        Ok(())
    }

    /// シャットダウン時にプールを解放する
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn create(&self, draft: ContactDraft) -> Result<Contact, ContactError> {
        let ValidContact {
            name,
            email,
            phone,
            message,
        } = draft.validate().map_err(ContactError::Validation)?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let now_text = now.to_rfc3339();

        sqlx::query(
            "INSERT INTO contacts (id, name, email, phone, message, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&name)
        .bind(&email)
        .bind(&phone)
        .bind(&message)
        .bind(&now_text)
        .bind(&now_text)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::Storage {
            reason: format!("Failed to insert contact: {e}"),
        })?;

        Ok(Contact {
            id,
            name,
            email,
            phone,
            message,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ContactError> {
        // created_at は RFC 3339 UTC テキストのため辞書順 = 時系列順
        let rows = sqlx::query(
            "SELECT id, name, email, phone, message, created_at, updated_at
             FROM contacts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::Storage {
            reason: format!("Failed to fetch contacts: {e}"),
        })?;

        rows.iter().map(row_to_contact).collect()
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), ContactError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ContactError::Storage {
                reason: format!("Failed to delete contact {id}: {e}"),
            })?;

        // 不正形式の ID はどの行にも一致しないので、自然に NotFound になる
        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound);
        }
        Ok(())
    }
}

fn row_to_contact(row: &SqliteRow) -> Result<Contact, ContactError> {
    Ok(Contact {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        message: row.get("message"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

fn parse_timestamp(raw: String) -> Result<DateTime<Utc>, ContactError> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ContactError::Storage {
            reason: format!("Corrupt timestamp '{raw}' in contacts table: {e}"),
        })
}
