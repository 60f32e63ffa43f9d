//! # The Contract — 入力と保存レコードの契約
//!
//! HTTP 層とストア層のやり取りを型安全に定義する。
//! リクエストボディは `ContactDraft` としてそのまま受け取り、
//! `validate()` の明示的な一段階で `ValidContact` へ昇格させる。
//! スキーマライブラリの副作用に頼らない。

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldViolation;

/// メールアドレス形式 (local@domain.tld)
const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";
/// インド携帯番号形式 (6〜9 始まりの10桁)
const PHONE_PATTERN: &str = r"^[6-9][0-9]{9}$";

/// 名前の長さ制約 (トリム後の文字数)
const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
/// メッセージの最大長 (トリム後の文字数)
const MESSAGE_MAX_CHARS: usize = 500;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap())
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(PHONE_PATTERN).unwrap())
}

/// 受信したままのフォーム入力。全フィールド任意、未知フィールドは無視
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// バリデーション済みのフィールド一式。ストアが ID とタイムスタンプを付与する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
}

/// 永続化済みレコード。JSON では camelCase (createdAt / updatedAt)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactDraft {
    /// 全フィールドを検証し、違反をまとめて返す。
    /// name / email はトリム、email はさらに小文字化して保存形に揃える。
    pub fn validate(self) -> Result<ValidContact, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let name = self.name.as_deref().map(str::trim).unwrap_or("").to_string();
        if name.is_empty() {
            violations.push(FieldViolation {
                field: "name",
                requirement: "Name is required".to_string(),
            });
        } else {
            let chars = name.chars().count();
            if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
                violations.push(FieldViolation {
                    field: "name",
                    requirement: format!(
                        "Name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
                    ),
                });
            }
        }

        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .to_lowercase();
        if email.is_empty() {
            violations.push(FieldViolation {
                field: "email",
                requirement: "Email is required".to_string(),
            });
        } else if !email_re().is_match(&email) {
            violations.push(FieldViolation {
                field: "email",
                requirement: "Please enter a valid email".to_string(),
            });
        }

        let phone = self.phone.as_deref().map(str::trim).unwrap_or("").to_string();
        if phone.is_empty() {
            violations.push(FieldViolation {
                field: "phone",
                requirement: "Phone is required".to_string(),
            });
        } else if !phone_re().is_match(&phone) {
            violations.push(FieldViolation {
                field: "phone",
                requirement: "Please enter a valid Indian phone number".to_string(),
            });
        }

        let message = self.message.as_deref().map(str::trim).map(str::to_string);
        if let Some(body) = &message {
            if body.chars().count() > MESSAGE_MAX_CHARS {
                violations.push(FieldViolation {
                    field: "message",
                    requirement: format!("Message must not exceed {MESSAGE_MAX_CHARS} characters"),
                });
            }
        }

        if violations.is_empty() {
            Ok(ValidContact {
                name,
                email,
                phone,
                message,
            })
        } else {
            Err(violations)
        }
    }
}
