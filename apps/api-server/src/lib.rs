//! # api-server — Contact API の HTTP 層
//!
//! ルーター・CORS・設定をライブラリとして公開し、`main.rs` と
//! 統合テストの両方から同じ構成でアプリを組み立てられるようにする。

pub mod config;
pub mod server;
