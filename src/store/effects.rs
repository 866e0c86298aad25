// src/store/effects.rs
//! バックエンドと話して、その結果をアクションとして dispatch する非同期処理たち。
//!
//! どの関数も await の前後でストアのロックを持ち越さない。
//! (ロックは「読む」「dispatch する」の一瞬だけ)

use std::rc::Rc;

use log::{debug, info, warn};

use crate::components::consumable::Consumable;
use crate::components::inventory_item::InventoryItem;
use crate::components::player::Player;
use crate::components::task::{Task, TaskCategory};
use crate::error::{ApiError, ApiResult, DropError};
use crate::logic::{inventory, progression};
use crate::network::GardenBackend;
use crate::store::{dispatch, lock, Action, SharedStore};

pub type SharedBackend = Rc<dyn GardenBackend>;

const LOGIN_FAILED: &str = "Error al iniciar sesión";
const REGISTER_FAILED: &str = "Error al registrarse";
const CONNECTION_FAILED: &str = "Error de conexión";

/// 画面に出すエラーメッセージ。バックエンドが理由をくれていればそれを使う。
fn failure_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Transport(_) => CONNECTION_FAILED.to_string(),
        ApiError::Rejected(message) | ApiError::Status { message, .. } if !message.is_empty() => {
            message.clone()
        }
        _ => fallback.to_string(),
    }
}

fn current_player_id(store: &SharedStore) -> ApiResult<u64> {
    lock(store).state().player_id().ok_or(ApiError::NotLoggedIn)
}

/// 失敗をストアに記録してからそのまま返す。
fn record<T>(store: &SharedStore, context: &str, result: ApiResult<T>) -> ApiResult<T> {
    if let Err(e) = &result {
        warn!("{} failed: {}", context, e);
        dispatch(store, Action::EffectFailed(e.to_string()));
    }
    result
}

// --- 認証 ---

pub async fn login(store: SharedStore, backend: SharedBackend, email: String, password: String) -> ApiResult<Player> {
    dispatch(&store, Action::LoginPending);
    match backend.login(&email, &password).await {
        Ok(player) => {
            info!("login: player {} logged in", player.player_id);
            dispatch(&store, Action::LoginSuccess(player.clone()));
            // タスクの読み込みに失敗してもログイン自体は成功
            let _ = fetch_tasks(store, backend).await;
            Ok(player)
        }
        Err(e) => {
            warn!("login failed: {}", e);
            dispatch(&store, Action::LoginFailure(failure_message(&e, LOGIN_FAILED)));
            Err(e)
        }
    }
}

pub async fn register(
    store: SharedStore,
    backend: SharedBackend,
    email: String,
    password: String,
    player_name: String,
) -> ApiResult<Player> {
    dispatch(&store, Action::RegisterPending);
    match backend.register(&email, &password, &player_name).await {
        Ok(player) => {
            info!("register: player {} created", player.player_id);
            dispatch(&store, Action::RegisterSuccess(player.clone()));
            let _ = fetch_tasks(store, backend).await;
            Ok(player)
        }
        Err(e) => {
            warn!("register failed: {}", e);
            dispatch(&store, Action::RegisterFailure(failure_message(&e, REGISTER_FAILED)));
            Err(e)
        }
    }
}

pub fn logout(store: &SharedStore) {
    info!("logout");
    dispatch(store, Action::Logout);
}

// --- アジェンダ ---

pub async fn fetch_tasks(store: SharedStore, backend: SharedBackend) -> ApiResult<()> {
    let player_id = lock(&store).state().player_id();
    let Some(player_id) = player_id else {
        dispatch(&store, Action::TasksLoaded(Vec::new()));
        return Ok(());
    };
    let result = backend.fetch_tasks(player_id).await;
    let tasks = record(&store, "fetch_tasks", result)?;
    info!("fetch_tasks: {} tasks", tasks.len());
    dispatch(&store, Action::TasksLoaded(tasks));
    Ok(())
}

/// 空白だけのタイトルは無視して Ok(None)。
pub async fn add_task(
    store: SharedStore,
    backend: SharedBackend,
    titulo: String,
    tipo: TaskCategory,
) -> ApiResult<Option<Task>> {
    let titulo = titulo.trim().to_string();
    if titulo.is_empty() {
        return Ok(None);
    }
    let player_id = record(&store, "add_task", current_player_id(&store))?;
    let result = backend.create_task(player_id, &titulo, tipo).await;
    let task = record(&store, "add_task", result)?;
    dispatch(&store, Action::TaskAdded(task.clone()));
    Ok(Some(task))
}

/// ごほうびなしで消す。
pub async fn delete_task(store: SharedStore, backend: SharedBackend, task_id: u64) -> ApiResult<()> {
    let result = backend.delete_task(task_id).await;
    record(&store, "delete_task", result)?;
    dispatch(&store, Action::TaskRemoved(task_id));
    Ok(())
}

/// タスク完了: ごほうびを +1 してインベントリに入れ、タスクを消す。
/// ないタスクなら何もしないで Ok(None)。
pub async fn complete_task(
    store: SharedStore,
    backend: SharedBackend,
    task_id: u64,
    reward: Consumable,
) -> ApiResult<Option<Consumable>> {
    let exists = lock(&store).state().tasks.iter().any(|t| t.task_id == task_id);
    if !exists {
        return Ok(None);
    }
    let player_id = record(&store, "complete_task", current_player_id(&store))?;

    info!("complete_task: granting +1 {} (id {})", reward.name, reward.id);
    let result = backend.adjust_inventory(player_id, reward.id, 1).await;
    record(&store, "complete_task", result)?;
    dispatch(&store, Action::RewardGranted(reward));

    // ごほうびはもう渡したので、削除の失敗は記録するだけ
    if delete_task(store, backend, task_id).await.is_err() {
        warn!("complete_task: reward granted but task {} was not removed", task_id);
    }
    Ok(Some(reward))
}

// --- 庭 ---

/// 別の庭に切り替える。レベル1・進捗0からやり直しになる。
/// 今と同じ庭なら何もしない。
pub async fn change_garden(store: SharedStore, backend: SharedBackend, garden_name: String) -> ApiResult<bool> {
    let (player_id, current) = {
        let guard = lock(&store);
        let player = guard.state().auth.player.as_ref();
        (
            player.map(|p| p.player_id),
            player.map(|p| p.garden_name().to_string()),
        )
    };
    let player_id = record(&store, "change_garden", player_id.ok_or(ApiError::NotLoggedIn))?;
    if current.as_deref() == Some(garden_name.as_str()) {
        return Ok(false);
    }
    let result = backend.change_garden(player_id, &garden_name).await;
    let player = record(&store, "change_garden", result)?;
    info!("change_garden: now {}", player.garden_name());
    dispatch(&store, Action::UpdatePlayerData(player));
    Ok(true)
}

/// 今の庭をレベル1・進捗0に戻す。
pub async fn reset_progress(store: SharedStore, backend: SharedBackend) -> ApiResult<()> {
    let ids = {
        let guard = lock(&store);
        guard.state().auth.player.as_ref().map(|p| (p.player_id, p.garden_id()))
    };
    let (player_id, garden_id) = record(&store, "reset_progress", ids.ok_or(ApiError::NotLoggedIn))?;
    let garden_id = record(
        &store,
        "reset_progress",
        garden_id.ok_or_else(|| ApiError::Rejected("no active garden".to_string())),
    )?;
    let result = backend.save_progress(player_id, progression::reset_request(garden_id)).await;
    let player = record(&store, "reset_progress", result)?;
    dispatch(&store, Action::UpdatePlayerData(player));
    Ok(())
}

/// 庭にアイテムを1個あげる (インベントリパネルの onItemDrop の中身)。
///
/// 消費が確定したら Ok(true)。在庫なし・最大レベル・通信失敗は Err。
/// インベントリの -1 が通った後の進捗保存の失敗は記録だけして成功扱い。
///
/// キャンセル後の次のドラッグと並んで走ることがあるので、進捗は -1 が通った時点の
/// ストアの値から計算し、読むのと書くのを同じロックの中で済ませる。
pub async fn consume_item(store: SharedStore, backend: SharedBackend, item: InventoryItem) -> Result<bool, DropError> {
    let (player, stored) = {
        let guard = lock(&store);
        let state = guard.state();
        (state.auth.player.clone(), inventory::find(&state.inventory, &item.id).cloned())
    };
    let player = player.ok_or(ApiError::NotLoggedIn)?;
    let stored = stored.ok_or_else(|| DropError::UnknownItem(item.id.clone()))?;
    if !stored.is_available() {
        return Err(DropError::Exhausted(item.id));
    }
    // 最大レベルならアイテムを使う前に断る
    let garden = player.current_garden.clone().ok_or(DropError::NoGarden)?;
    progression::advance(&garden)?;
    let consumable_id: u32 = item
        .id
        .parse()
        .map_err(|_| DropError::UnknownItem(item.id.clone()))?;

    backend.adjust_inventory(player.player_id, consumable_id, -1).await?;

    let advanced = {
        let mut guard = lock(&store);
        guard.dispatch(Action::InventoryAdjusted { id: item.id.clone(), delta: -1 });
        let current = guard.state().auth.player.as_ref().and_then(|p| p.current_garden.clone());
        match current.map(|garden| progression::advance(&garden).map(|step| (garden, step))) {
            Some(Ok((garden, step))) => {
                guard.dispatch(Action::GardenAdvanced { level: step.level, progress: step.progress });
                Some((garden, step))
            }
            Some(Err(e)) => {
                warn!("consume_item: {} spent but garden not advanced: {}", item.kind, e);
                None
            }
            None => {
                warn!("consume_item: {} spent but the garden is gone", item.kind);
                None
            }
        }
    };
    let Some((garden, step)) = advanced else {
        return Ok(true);
    };
    info!(
        "consume_item: {} used on {} -> level {} progress {}{}",
        item.kind,
        garden.garden_name,
        step.level,
        step.progress,
        if step.leveled_up { " (level up!)" } else { "" }
    );

    let saved = backend
        .save_progress(player.player_id, step.to_request(garden.garden_id))
        .await;
    if let Ok(updated) = record(&store, "consume_item (save progress)", saved) {
        let mut guard = lock(&store);
        let latest = guard
            .state()
            .auth
            .player
            .as_ref()
            .and_then(|p| p.current_garden.as_ref())
            .map(|g| (g.level, g.progress));
        // 後から進んだ分を古い返事で巻き戻さない
        if latest == Some((step.level, step.progress)) {
            guard.dispatch(Action::UpdatePlayerData(updated));
        } else {
            debug!("consume_item: stale progress reply for level {} progress {}", step.level, step.progress);
        }
    }
    Ok(true)
}

#[cfg(test)]
#[path = "effects_tests.rs"]
mod tests;
