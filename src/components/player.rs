// src/components/player.rs

use serde::{Deserialize, Serialize};

use crate::config::layout::{DEFAULT_GARDEN, PROGRESS_PER_LEVEL};
use crate::protocol::InventoryEntryData;

/// 今育てている庭の状態だよ！🌿
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenProgress {
    #[serde(default)]
    pub garden_id: u64,
    pub garden_name: String,
    #[serde(default = "first_level")]
    pub level: u32,
    /// 今のレベル内での進み具合 (0..PROGRESS_PER_LEVEL)
    #[serde(default)]
    pub progress: u32,
}

fn first_level() -> u32 {
    1
}

impl GardenProgress {
    pub fn fresh(garden_id: u64, garden_name: impl Into<String>) -> Self {
        Self { garden_id, garden_name: garden_name.into(), level: 1, progress: 0 }
    }

    /// 進捗バーの埋まり具合 (0.0 ～ 1.0)
    pub fn progress_fraction(&self) -> f32 {
        (self.progress.min(PROGRESS_PER_LEVEL) as f32) / PROGRESS_PER_LEVEL as f32
    }

    /// 画像ファイル名のベース (例: `jungle_1`)
    pub fn label(&self) -> String {
        format!("{}_{}", self.garden_name, self.level)
    }
}

/// ログイン中のプレイヤー。👤
/// バックエンドの JSON そのままの形で受け取るよ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: u64,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub current_garden_id: Option<u64>,
    #[serde(default)]
    pub current_garden: Option<GardenProgress>,
    #[serde(rename = "INVENTORYs", default)]
    pub inventory: Vec<InventoryEntryData>,
}

impl Player {
    pub fn garden_name(&self) -> &str {
        self.current_garden
            .as_ref()
            .map(|g| g.garden_name.as_str())
            .unwrap_or(DEFAULT_GARDEN)
    }

    pub fn garden_id(&self) -> Option<u64> {
        self.current_garden
            .as_ref()
            .map(|g| g.garden_id)
            .or(self.current_garden_id)
    }
}
