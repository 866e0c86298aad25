// src/store/state.rs

use serde::Serialize;

use crate::components::inventory_item::InventoryItem;
use crate::components::player::Player;
use crate::components::task::Task;

/// ログインまわりの状態。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthState {
    pub player: Option<Player>,
    pub is_logged_in: bool,
    /// 起動直後はセッション復元待ちなので true から始まる
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { player: None, is_logged_in: false, is_loading: true, error: None }
    }
}

/// アプリ全体の状態だよ！🌳
/// サーバー側の状態の鏡で、変更は必ず `Action` 経由。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub auth: AuthState,
    /// 個数 0 のエントリも含む。パネルに渡す時に絞り込む。
    pub inventory: Vec<InventoryItem>,
    pub tasks: Vec<Task>,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn player_id(&self) -> Option<u64> {
        self.auth.player.as_ref().map(|p| p.player_id)
    }
}
