// src/config/mod.rs
//! 画面レイアウトの定数と、バックエンド接続の設定。

pub mod api;
pub mod layout;

pub use api::ApiConfig;
