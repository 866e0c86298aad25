// src/protocol.rs

// クライアント(WASM)とバックエンド(REST API)の間でやり取りする
// JSON の形を定義するファイルだよ！💌
// フィールド名はバックエンドに合わせてあるので、camelCase と snake_case が混ざってるのに注意。
use serde::{Deserialize, Serialize};

use crate::components::player::Player;
use crate::components::task::{Task, TaskCategory};
use crate::error::ApiError;

// --- リクエスト (クライアント → サーバー) ---

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub player_name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    pub titulo: String,
    pub tipo: TaskCategory,
    #[serde(rename = "playerId")]
    pub player_id: u64,
}

/// インベントリの増減。報酬なら +1、庭にあげたら -1。
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct InventoryDeltaRequest {
    #[serde(rename = "consumableId")]
    pub consumable_id: u32,
    pub quantity: i32,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ProgressRequest {
    pub level: u32,
    #[serde(rename = "gardenId")]
    pub garden_id: u64,
    pub progress: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GardenChangeRequest {
    #[serde(rename = "gardenName")]
    pub garden_name: String,
}

// --- レスポンス (サーバー → クライアント) ---

/// ログイン / 新規登録 / 庭の変更 の返事。
/// `success: false` の時は `error` に理由が入ってる (はず)。
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PlayerEnvelope {
    /// 成功していてプレイヤーが入っていれば取り出す。
    pub fn into_player(self) -> Result<Player, ApiError> {
        match (self.success, self.player) {
            (true, Some(player)) => Ok(player),
            _ => Err(ApiError::Rejected(self.error.unwrap_or_default())),
        }
    }
}

/// 進捗保存の返事。こっちは `success` を返さない。
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProgressResponse {
    pub player: Player,
}

/// 2xx 以外の時のボディ。
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

pub type TaskList = Vec<Task>;

// --- プレイヤー JSON の中身 ---

/// `INVENTORYs` 配列の1要素。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InventoryEntryData {
    #[serde(default)]
    pub player_id: Option<u64>,
    pub consumable_id: u32,
    #[serde(default)]
    pub quantity: u32,
    #[serde(rename = "CONSUMABLES", default)]
    pub consumable: ConsumableData,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ConsumableData {
    #[serde(default)]
    pub consumable_id: u32,
    #[serde(default)]
    pub consumable_name: String,
    #[serde(default)]
    pub consumable_img: Option<String>,
}
