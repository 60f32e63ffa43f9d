//! # ドメインエラー型
//!
//! `thiserror` を使い、すべてのドメインエラーに明確な型を付与する。
//! ハンドラ層はこの型だけを見て HTTP ステータスへ変換する。

use thiserror::Error;

/// 単一フィールドの制約違反
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// 違反したフィールド名 (例: "email")
    pub field: &'static str,
    /// 人間可読な要求事項
    pub requirement: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.requirement)
    }
}

/// Contact API のドメインエラー
#[derive(Debug, Error)]
pub enum ContactError {
    /// 作成時の入力バリデーション違反。違反したフィールドをすべて列挙する
    #[error("Contact validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// 削除対象が存在しない。不正形式のIDも同じ扱い
    #[error("Contact not found")]
    NotFound,

    /// DB接続・インフラ障害
    #[error("storage error: {reason}")]
    Storage { reason: String },
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
