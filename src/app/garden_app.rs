// src/app/garden_app.rs

// --- 必要なものをインポート ---
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use js_sys::{Error, Promise};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::app::browser_event_manager::{self, DragListeners};
use crate::app::garden_drop_handler::GardenDropHandler;
use crate::app::inventory_panel::{lock_panel, InventoryPanel, SharedPanel};
use crate::components::drop_zone::DropZone;
use crate::components::player::Player;
use crate::components::point::Point;
use crate::components::task::TaskCategory;
use crate::config::ApiConfig;
use crate::logic::reward::roll_reward;
use crate::network::HttpBackend;
use crate::store::effects::{self, SharedBackend};
use crate::store::{dispatch, lock, Action, SharedStore, Store};

/// JS に渡すエラー。
fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from(Error::new(&e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_json::to_string(value)
        .map(|json| JsValue::from_str(&json))
        .map_err(js_error)
}

// --- 庭の画面全体をまとめる構造体 ---
// ストアの変化は tick() の時にパネルへ流し込む。
#[wasm_bindgen]
pub struct GardenApp {
    store: SharedStore,
    backend: SharedBackend,
    panel: SharedPanel,
    rng: StdRng,
    /// パネルに最後に渡したストアのバージョン
    seen_version: u64,
    listeners: DragListeners,
}

#[wasm_bindgen]
impl GardenApp {
    /// `config_json` は `{"baseUrl": "..."}`。省略したらデフォルトの接続先。
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GardenApp, JsValue> {
        let config = match config_json {
            Some(json) => ApiConfig::from_json(&json).map_err(js_error)?,
            None => ApiConfig::default(),
        };
        info!("GardenApp: initializing with {}", config.base_url);

        let store = Store::new().shared();
        let backend: SharedBackend = Rc::new(HttpBackend::new(config));
        let handler = Rc::new(GardenDropHandler::new(Arc::clone(&store), Rc::clone(&backend)));
        let panel = Arc::new(Mutex::new(InventoryPanel::new(DropZone::default(), handler)));

        Ok(Self {
            store,
            backend,
            panel,
            rng: StdRng::from_entropy(),
            seen_version: 0,
            listeners: DragListeners::default(),
        })
    }

    // --- 認証 ---

    /// 成功したらプレイヤーの JSON で resolve。
    pub fn login(&self, email: String, password: String) -> Promise {
        let (store, backend) = self.handles();
        future_to_promise(async move {
            let player = effects::login(store, backend, email, password).await.map_err(js_error)?;
            to_json(&player)
        })
    }

    pub fn register(&self, email: String, password: String, player_name: String) -> Promise {
        let (store, backend) = self.handles();
        future_to_promise(async move {
            let player = effects::register(store, backend, email, password, player_name)
                .await
                .map_err(js_error)?;
            to_json(&player)
        })
    }

    pub fn logout(&mut self) {
        self.drop_listeners();
        effects::logout(&self.store);
        self.sync_inventory();
    }

    /// 保存しておいたプレイヤーの JSON (なければ null) でセッションを戻す。
    pub fn restore_session(&mut self, player_json: Option<String>) -> Result<(), JsValue> {
        let player = match player_json {
            Some(json) => serde_json::from_str::<Option<Player>>(&json).map_err(js_error)?,
            None => None,
        };
        dispatch(&self.store, Action::RestoreSession(player));
        self.sync_inventory();
        Ok(())
    }

    // --- アジェンダ ---

    pub fn fetch_tasks(&self) -> Promise {
        let (store, backend) = self.handles();
        future_to_promise(async move {
            effects::fetch_tasks(store, backend).await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// `tipo` は "Productividad" / "Alimentación" / "Ejercicio" / "SaludMental"。
    /// 作られたタスクの JSON (空白タイトルなら null) で resolve。
    pub fn add_task(&self, titulo: String, tipo: String) -> Result<Promise, JsValue> {
        let tipo: TaskCategory =
            serde_json::from_value(serde_json::Value::String(tipo)).map_err(js_error)?;
        let (store, backend) = self.handles();
        Ok(future_to_promise(async move {
            match effects::add_task(store, backend, titulo, tipo).await.map_err(js_error)? {
                Some(task) => to_json(&task),
                None => Ok(JsValue::NULL),
            }
        }))
    }

    pub fn delete_task(&self, task_id: usize) -> Promise {
        let (store, backend) = self.handles();
        future_to_promise(async move {
            effects::delete_task(store, backend, task_id as u64).await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// もらったごほうびの JSON (タスクがなければ null) で resolve。
    pub fn complete_task(&mut self, task_id: usize) -> Promise {
        let reward = roll_reward(&mut self.rng);
        let (store, backend) = self.handles();
        future_to_promise(async move {
            match effects::complete_task(store, backend, task_id as u64, reward).await.map_err(js_error)? {
                Some(reward) => to_json(&reward),
                None => Ok(JsValue::NULL),
            }
        })
    }

    // --- 庭 ---

    /// 切り替えたら true、同じ庭なら false で resolve。
    pub fn change_garden(&self, garden_name: String) -> Promise {
        let (store, backend) = self.handles();
        future_to_promise(async move {
            let changed = effects::change_garden(store, backend, garden_name).await.map_err(js_error)?;
            Ok(JsValue::from_bool(changed))
        })
    }

    pub fn reset_progress(&self) -> Promise {
        let (store, backend) = self.handles();
        future_to_promise(async move {
            effects::reset_progress(store, backend).await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// 庭の見た目用: `{label, level, progress, fraction}`。庭がなければ null。
    pub fn get_garden_json(&self) -> Result<JsValue, JsValue> {
        let garden = {
            let guard = lock(&self.store);
            guard.state().auth.player.as_ref().and_then(|p| p.current_garden.clone())
        };
        match garden {
            Some(garden) => to_json(&serde_json::json!({
                "label": garden.label(),
                "level": garden.level,
                "progress": garden.progress,
                "fraction": garden.progress_fraction(),
            })),
            None => Ok(JsValue::NULL),
        }
    }

    // --- インベントリパネル ---

    pub fn set_inventory_open(&mut self, open: bool) {
        self.sync_inventory();
        lock_panel(&self.panel).set_open(open);
    }

    /// 開閉を切り替えて、切り替え後の状態を返す。
    pub fn toggle_inventory(&mut self) -> bool {
        let open = !lock_panel(&self.panel).is_open();
        self.set_inventory_open(open);
        open
    }

    /// 庭の矩形 (ページ座標)。レイアウトが変わるたびに呼んでもらう。
    pub fn set_garden_bounds(&self, top: f32, bottom: f32, left: f32, right: f32) {
        lock_panel(&self.panel).set_drop_zone(DropZone::new(top, bottom, left, right));
    }

    /// アイテムを押した。ドラッグが始まったら window のリスナーも付ける。
    pub fn pointer_down(&mut self, item_id: String, x: f32, y: f32) -> bool {
        self.sync_inventory();
        let started = lock_panel(&self.panel).pointer_down(&item_id, Point::new(x, y));
        if started {
            if let Err(e) = browser_event_manager::attach_drag_listeners(&self.panel, &self.listeners) {
                error!("GardenApp: failed to attach drag listeners: {:?}", e);
            }
        }
        started
    }

    pub fn pointer_move(&self, x: f32, y: f32) -> bool {
        lock_panel(&self.panel).pointer_move(Point::new(x, y))
    }

    pub fn pointer_up(&self, x: f32, y: f32) {
        browser_event_manager::release_pointer(&self.panel, Point::new(x, y));
        self.drop_listeners();
    }

    pub fn pointer_cancel(&self) -> bool {
        let cancelled = lock_panel(&self.panel).pointer_cancel();
        self.drop_listeners();
        cancelled
    }

    /// requestAnimationFrame から毎フレーム呼ぶ。
    pub fn tick(&mut self, dt_ms: f32) {
        self.sync_inventory();
        lock_panel(&self.panel).tick(dt_ms);
    }

    // --- スナップショット ---

    pub fn get_state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(lock(&self.store).state()).map_err(js_error)
    }

    pub fn get_panel_view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&lock_panel(&self.panel).view()).map_err(js_error)
    }
}

impl GardenApp {
    fn handles(&self) -> (SharedStore, SharedBackend) {
        (Arc::clone(&self.store), Rc::clone(&self.backend))
    }

    /// ストアのインベントリが変わっていたらパネルに渡す。
    fn sync_inventory(&mut self) {
        let (version, items) = {
            let guard = lock(&self.store);
            (guard.version(), guard.state().inventory.clone())
        };
        if version == self.seen_version {
            return;
        }
        self.seen_version = version;
        lock_panel(&self.panel).set_inventory(items);
    }

    fn drop_listeners(&self) {
        if let Err(e) = browser_event_manager::detach_drag_listeners(&self.listeners) {
            error!("GardenApp: failed to detach drag listeners: {:?}", e);
        }
    }
}

impl Drop for GardenApp {
    fn drop(&mut self) {
        self.drop_listeners();
    }
}
