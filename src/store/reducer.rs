// src/store/reducer.rs

use crate::components::player::Player;
use crate::logic::inventory;
use crate::store::action::Action;
use crate::store::state::{AppState, AuthState};

/// 今の状態とアクションから次の状態を作る。副作用なし。
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::LoginPending | Action::RegisterPending => {
            next.auth.is_loading = true;
            next.auth.error = None;
        }
        Action::LoginSuccess(player) | Action::RegisterSuccess(player) => {
            apply_session(&mut next, Some(player));
        }
        Action::RestoreSession(player) => {
            apply_session(&mut next, player.as_ref());
        }
        Action::UpdatePlayerData(player) => {
            next.auth.player = Some(player.clone());
        }
        Action::GardenAdvanced { level, progress } => {
            match next.auth.player.as_mut().and_then(|p| p.current_garden.as_mut()) {
                Some(garden) => {
                    garden.level = *level;
                    garden.progress = *progress;
                }
                None => log::warn!("reduce: GardenAdvanced without an active garden"),
            }
        }
        Action::LoginFailure(message) | Action::RegisterFailure(message) => {
            next.auth = AuthState {
                player: None,
                is_logged_in: false,
                is_loading: false,
                error: Some(message.clone()),
            };
            next.inventory.clear();
        }
        Action::Logout => {
            next = AppState::default();
            next.auth.is_loading = false;
        }
        Action::InventoryLoaded(items) => {
            next.inventory = items.clone();
        }
        Action::InventoryAdjusted { id, delta } => {
            if !inventory::apply_delta(&mut next.inventory, id, *delta) {
                log::warn!("reduce: InventoryAdjusted for unknown item {}", id);
            }
        }
        Action::RewardGranted(consumable) => {
            inventory::add_reward(&mut next.inventory, consumable);
        }
        Action::TasksLoaded(tasks) => {
            next.tasks = tasks.clone();
        }
        Action::TaskAdded(task) => {
            next.tasks.push(task.clone());
        }
        Action::TaskRemoved(task_id) => {
            next.tasks.retain(|task| task.task_id != *task_id);
        }
        Action::EffectFailed(message) => {
            next.last_error = Some(message.clone());
        }
    }
    next
}

/// ログイン成功・登録成功・セッション復元の共通処理。
/// プレイヤーがいればログイン済みになり、インベントリも読み込む。
fn apply_session(next: &mut AppState, player: Option<&Player>) {
    next.auth = AuthState {
        player: player.cloned(),
        is_logged_in: player.is_some(),
        is_loading: false,
        error: None,
    };
    next.inventory = player.map(|p| inventory::from_backend(&p.inventory)).unwrap_or_default();
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::consumable::FERTILIZER;
    use crate::components::inventory_item::InventoryItem;
    use crate::components::player::GardenProgress;
    use crate::components::task::{Task, TaskCategory};

    fn player() -> Player {
        serde_json::from_str(
            r#"{"player_id":7,"player_name":"Mateo","INVENTORYs":[{"consumable_id":1,"quantity":2}]}"#,
        )
        .unwrap()
    }

    fn task(id: u64) -> Task {
        Task {
            task_id: id,
            player_id: 7,
            titulo: format!("tarea {}", id),
            tipo: TaskCategory::Ejercicio,
            completed_flag: false,
            eliminated_flag: false,
        }
    }

    #[test]
    fn initial_state_is_loading() {
        let state = AppState::default();
        assert!(state.auth.is_loading);
        assert!(!state.auth.is_logged_in);
        assert_eq!(state.player_id(), None);
    }

    #[test]
    fn login_flow() {
        let state = reduce(&AppState::default(), &Action::LoginPending);
        assert!(state.auth.is_loading);

        let state = reduce(&state, &Action::LoginSuccess(player()));
        assert!(state.auth.is_logged_in);
        assert!(!state.auth.is_loading);
        assert_eq!(state.player_id(), Some(7));
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(state.inventory[0].kind, "agua");

        let failed = reduce(&state, &Action::LoginFailure("Error de conexión".to_string()));
        assert!(!failed.auth.is_logged_in);
        assert_eq!(failed.auth.player, None);
        assert_eq!(failed.auth.error.as_deref(), Some("Error de conexión"));
        assert!(failed.inventory.is_empty());
    }

    #[test]
    fn restore_without_player_is_logged_out() {
        let state = reduce(&AppState::default(), &Action::RestoreSession(None));
        assert!(!state.auth.is_loading);
        assert!(!state.auth.is_logged_in);

        let state = reduce(&state, &Action::RestoreSession(Some(player())));
        assert!(state.auth.is_logged_in);
    }

    #[test]
    fn logout_resets_but_is_not_loading() {
        let mut state = reduce(&AppState::default(), &Action::RegisterSuccess(player()));
        state = reduce(&state, &Action::TaskAdded(task(1)));
        let state = reduce(&state, &Action::Logout);
        assert!(!state.auth.is_loading);
        assert!(state.tasks.is_empty());
        assert!(state.inventory.is_empty());
        assert_eq!(state.auth.player, None);
    }

    #[test]
    fn update_player_keeps_login_and_inventory() {
        let state = reduce(&AppState::default(), &Action::LoginSuccess(player()));
        let mut renamed = player();
        renamed.player_name = "Mati".to_string();
        renamed.inventory.clear();
        let state = reduce(&state, &Action::UpdatePlayerData(renamed));
        assert!(state.auth.is_logged_in);
        assert_eq!(state.auth.player.as_ref().map(|p| p.player_name.as_str()), Some("Mati"));
        assert_eq!(state.inventory.len(), 1);
    }

    #[test]
    fn garden_advances_in_place() {
        let mut with_garden = player();
        with_garden.current_garden = Some(GardenProgress::fresh(3, "peach"));
        let state = reduce(&AppState::default(), &Action::LoginSuccess(with_garden));
        let state = reduce(&state, &Action::GardenAdvanced { level: 2, progress: 0 });
        let garden = state.auth.player.as_ref().and_then(|p| p.current_garden.clone()).unwrap();
        assert_eq!((garden.garden_id, garden.level, garden.progress), (3, 2, 0));

        // 庭がなければ何も変わらない
        let bare = reduce(&AppState::default(), &Action::LoginSuccess(player()));
        assert_eq!(reduce(&bare, &Action::GardenAdvanced { level: 2, progress: 0 }), bare);
    }

    #[test]
    fn inventory_and_tasks() {
        let mut state = AppState::default();
        state = reduce(&state, &Action::InventoryLoaded(vec![InventoryItem::new("1", "agua", 1)]));
        state = reduce(&state, &Action::InventoryAdjusted { id: "1".to_string(), delta: -1 });
        assert_eq!(state.inventory[0].quantity, 0);
        state = reduce(&state, &Action::RewardGranted(FERTILIZER));
        assert_eq!(state.inventory.len(), 2);

        state = reduce(&state, &Action::TasksLoaded(vec![task(1), task(2)]));
        state = reduce(&state, &Action::TaskRemoved(1));
        assert_eq!(state.tasks, vec![task(2)]);

        state = reduce(&state, &Action::EffectFailed("boom".to_string()));
        assert_eq!(state.last_error.as_deref(), Some("boom"));
    }

    #[test]
    fn reduce_does_not_touch_input() {
        let before = AppState::default();
        let _ = reduce(&before, &Action::Logout);
        assert_eq!(before, AppState::default());
    }
}
