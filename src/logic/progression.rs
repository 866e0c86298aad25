// src/logic/progression.rs
//! 庭の成長ルール。アイテムを1個あげるごとに progress +1、
//! PROGRESS_PER_LEVEL たまるとレベルアップ。MAX_LEVEL に着いたらそれ以上は育たない。

use crate::components::player::GardenProgress;
use crate::config::layout::{MAX_LEVEL, PROGRESS_PER_LEVEL};
use crate::error::ProgressionError;
use crate::protocol::ProgressRequest;

/// 1回あげた後の状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GardenStep {
    pub level: u32,
    pub progress: u32,
    pub leveled_up: bool,
}

impl GardenStep {
    pub fn to_request(self, garden_id: u64) -> ProgressRequest {
        ProgressRequest { level: self.level, garden_id, progress: self.progress }
    }
}

pub fn is_maxed(garden: &GardenProgress) -> bool {
    garden.level >= MAX_LEVEL
}

/// アイテムを1個あげた結果を計算する。もう最大レベルなら拒否。
pub fn advance(garden: &GardenProgress) -> Result<GardenStep, ProgressionError> {
    if is_maxed(garden) {
        return Err(ProgressionError::Maxed(MAX_LEVEL));
    }
    let progress = garden.progress + 1;
    if progress >= PROGRESS_PER_LEVEL {
        Ok(GardenStep { level: garden.level + 1, progress: 0, leveled_up: true })
    } else {
        Ok(GardenStep { level: garden.level, progress, leveled_up: false })
    }
}

/// 「進捗リセット」と「庭の変更」はどちらもレベル1・進捗0に戻す。
pub fn reset_request(garden_id: u64) -> ProgressRequest {
    ProgressRequest { level: 1, garden_id, progress: 0 }
}
