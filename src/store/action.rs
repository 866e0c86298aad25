// src/store/action.rs

use crate::components::consumable::Consumable;
use crate::components::inventory_item::InventoryItem;
use crate::components::player::Player;
use crate::components::task::Task;

/// ストアに送れる操作の一覧。
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoginPending,
    LoginSuccess(Player),
    LoginFailure(String),
    RegisterPending,
    RegisterSuccess(Player),
    RegisterFailure(String),
    Logout,
    /// 保存済みセッションの復元結果。None なら未ログイン。
    RestoreSession(Option<Player>),
    /// プレイヤー情報だけ差し替える (庭の変更・進捗の保存の後)
    UpdatePlayerData(Player),
    /// 庭の進捗をその場で進める (保存の返事を待たずに)
    GardenAdvanced { level: u32, progress: u32 },
    InventoryLoaded(Vec<InventoryItem>),
    InventoryAdjusted { id: String, delta: i32 },
    RewardGranted(Consumable),
    TasksLoaded(Vec<Task>),
    TaskAdded(Task),
    TaskRemoved(u64),
    EffectFailed(String),
}
