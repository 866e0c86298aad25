// src/error.rs
//! クレート全体で使うエラー型たち。

use thiserror::Error;

/// バックエンドとの通信で起こりうるエラーだよ。📡
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// fetch 自体が失敗した (ネットワーク断、CORS など)
    #[error("transport error: {0}")]
    Transport(String),

    /// サーバーが 2xx 以外を返した。`message` はレスポンスの `error` フィールド (あれば)
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    /// `success: false` が返ってきた場合
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    #[error("no player is logged in")]
    NotLoggedIn,
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e.to_string())
    }
}

/// 庭の進行に関するエラー。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("garden is already at max level {0}")]
    Maxed(u32),
}

/// アイテムを庭にドロップした時の「消費処理」が失敗した理由。
/// コーディネーター側では全部 `false` 扱いになる。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropError {
    #[error("item {0} is not in the inventory")]
    UnknownItem(String),

    #[error("item {0} has no units left")]
    Exhausted(String),

    #[error("player has no active garden")]
    NoGarden,

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// ドラッグ開始を断った理由。どれも致命的じゃなくて、単に無視される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    /// 別のアイテムをドラッグ中 (または結果待ち)
    #[error("item {active} is already being dragged")]
    Conflict { active: String },

    /// 個数 0 のアイテムは持ち上げられない
    #[error("item {0} has no units to drag")]
    Unavailable(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
