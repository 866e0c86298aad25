// src/store/fake_backend.rs
// テスト用の偽バックエンド。呼ばれた順に記録して、指定した操作だけ失敗させられる。

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::task::Poll;

use futures::future;
use futures::FutureExt;

use crate::components::player::{GardenProgress, Player};
use crate::components::task::{Task, TaskCategory};
use crate::error::ApiError;
use crate::network::{BackendFuture, GardenBackend};
use crate::protocol::{ConsumableData, InventoryEntryData, ProgressRequest};
use crate::store::{Action, Store};

pub(crate) struct FakeBackend {
    pub player: RefCell<Player>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<&'static str, ApiError>>,
    next_task_id: Cell<u64>,
    yielding: Cell<bool>,
}

/// 1回だけ Pending を返してから終わる。並んで走る Future の順番を入れ替えるため。
fn yield_once() -> impl Future<Output = ()> {
    let mut yielded = false;
    future::poll_fn(move |cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
}

impl FakeBackend {
    pub fn new(player: Player) -> Self {
        Self {
            player: RefCell::new(player),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
            next_task_id: Cell::new(100),
            yielding: Cell::new(false),
        }
    }

    /// `op` (トレイトのメソッド名) を次から失敗させる。
    pub fn failing(self, op: &'static str, error: ApiError) -> Self {
        self.failures.borrow_mut().insert(op, error);
        self
    }

    /// どの返事も一度 await を挟んでから返す。
    pub fn yielding(self) -> Self {
        self.yielding.set(true);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn reply<T: 'static>(&self, op: &'static str, call: String, value: impl FnOnce() -> T) -> BackendFuture<T> {
        self.calls.borrow_mut().push(call);
        let result = match self.failures.borrow().get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(value()),
        };
        if self.yielding.get() {
            return async move {
                yield_once().await;
                result
            }
            .boxed_local();
        }
        future::ready(result).boxed_local()
    }
}

impl GardenBackend for FakeBackend {
    fn login(&self, email: &str, _password: &str) -> BackendFuture<Player> {
        let player = self.player.borrow().clone();
        self.reply("login", format!("login {}", email), move || player)
    }

    fn register(&self, email: &str, _password: &str, player_name: &str) -> BackendFuture<Player> {
        let mut player = self.player.borrow().clone();
        player.player_name = player_name.to_string();
        self.reply("register", format!("register {}", email), move || player)
    }

    fn fetch_tasks(&self, player_id: u64) -> BackendFuture<Vec<Task>> {
        self.reply("fetch_tasks", format!("fetch_tasks {}", player_id), move || {
            vec![sample_task(1, player_id), sample_task(2, player_id)]
        })
    }

    fn create_task(&self, player_id: u64, titulo: &str, tipo: TaskCategory) -> BackendFuture<Task> {
        let task_id = self.next_task_id.get();
        self.next_task_id.set(task_id + 1);
        let task = Task {
            task_id,
            player_id,
            titulo: titulo.to_string(),
            tipo,
            completed_flag: false,
            eliminated_flag: false,
        };
        self.reply("create_task", format!("create_task {}", titulo), move || task)
    }

    fn delete_task(&self, task_id: u64) -> BackendFuture<()> {
        self.reply("delete_task", format!("delete_task {}", task_id), || ())
    }

    fn adjust_inventory(&self, _player_id: u64, consumable_id: u32, delta: i32) -> BackendFuture<()> {
        self.reply("adjust_inventory", format!("adjust_inventory {} {:+}", consumable_id, delta), || ())
    }

    fn save_progress(&self, _player_id: u64, progress: ProgressRequest) -> BackendFuture<Player> {
        let call = format!("save_progress {} {}", progress.level, progress.progress);
        if !self.failures.borrow().contains_key("save_progress") {
            if let Some(garden) = self.player.borrow_mut().current_garden.as_mut() {
                garden.level = progress.level;
                garden.progress = progress.progress;
            }
        }
        let player = self.player.borrow().clone();
        self.reply("save_progress", call, move || player)
    }

    fn change_garden(&self, _player_id: u64, garden_name: &str) -> BackendFuture<Player> {
        let call = format!("change_garden {}", garden_name);
        if !self.failures.borrow().contains_key("change_garden") {
            let mut player = self.player.borrow_mut();
            let next_id = player.garden_id().unwrap_or(0) + 1;
            player.current_garden = Some(GardenProgress::fresh(next_id, garden_name));
            player.current_garden_id = Some(next_id);
        }
        let player = self.player.borrow().clone();
        self.reply("change_garden", call, move || player)
    }
}

fn entry(id: u32, name: &str, quantity: u32) -> InventoryEntryData {
    InventoryEntryData {
        player_id: Some(7),
        consumable_id: id,
        quantity,
        consumable: ConsumableData {
            consumable_id: id,
            consumable_name: name.to_string(),
            consumable_img: None,
        },
    }
}

/// agua 2個・polvo 0個を持った、jungle レベル1のプレイヤー。
pub(crate) fn sample_player() -> Player {
    Player {
        player_id: 7,
        player_name: "Mateo".to_string(),
        email: Some("mateo@example.com".to_string()),
        current_garden_id: Some(3),
        current_garden: Some(GardenProgress::fresh(3, "jungle")),
        inventory: vec![entry(1, "agua", 2), entry(2, "polvo", 0)],
    }
}

pub(crate) fn sample_task(task_id: u64, player_id: u64) -> Task {
    Task {
        task_id,
        player_id,
        titulo: format!("tarea {}", task_id),
        tipo: TaskCategory::Productividad,
        completed_flag: false,
        eliminated_flag: false,
    }
}

/// `player` でログイン済みのストア。
pub(crate) fn logged_in_store(player: Player) -> Store {
    let mut store = Store::new();
    store.dispatch(Action::LoginSuccess(player));
    store
}
