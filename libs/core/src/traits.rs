//! # ドメイントレイト定義
//!
//! Contact ストアのインターフェースを定義する。
//! 具体実装は `libs/infrastructure` に配置する（依存性逆転の原則）。

use async_trait::async_trait;

use crate::contracts::{Contact, ContactDraft};
use crate::error::ContactError;

/// Contact の永続化プリミティブ
///
/// バリデーションもストアの責務。`create` は draft を検証してから保存する。
/// 更新操作は存在しない。削除は終端で取り消し不能。
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// draft を検証し、ID とタイムスタンプを付与して保存したレコードを返す
    async fn create(&self, draft: ContactDraft) -> Result<Contact, ContactError>;

    /// 全レコードを作成日時の降順 (新しい順) で返す。ページネーションなし
    async fn list_all(&self) -> Result<Vec<Contact>, ContactError>;

    /// 指定 ID のレコードを削除する。該当なし (不正形式の ID 含む) は NotFound
    async fn delete_by_id(&self, id: &str) -> Result<(), ContactError>;
}
