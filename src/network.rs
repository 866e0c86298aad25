// src/network.rs

// バックエンド (REST API) との通信を担当するモジュールだよ！📡
// ブラウザの fetch API を `web_sys` 経由で呼んで、
// 返ってきた Promise を `wasm_bindgen_futures::JsFuture` で await する。
//
// 画面側のロジックは `GardenBackend` トレイト越しにしか通信しないので、
// テストでは偽物のバックエンドに差し替えられる。
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::components::player::Player;
use crate::components::task::{Task, TaskCategory};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    CreateTaskRequest, ErrorBody, GardenChangeRequest, InventoryDeltaRequest, LoginRequest,
    PlayerEnvelope, ProgressRequest, ProgressResponse, RegisterRequest, TaskList,
};

pub type BackendFuture<T> = LocalBoxFuture<'static, ApiResult<T>>;

/// 画面側から見たバックエンド。返す Future は `'static` なので、
/// 引数は呼び出し時にコピーしておくこと。
pub trait GardenBackend {
    fn login(&self, email: &str, password: &str) -> BackendFuture<Player>;
    fn register(&self, email: &str, password: &str, player_name: &str) -> BackendFuture<Player>;
    fn fetch_tasks(&self, player_id: u64) -> BackendFuture<Vec<Task>>;
    fn create_task(&self, player_id: u64, titulo: &str, tipo: TaskCategory) -> BackendFuture<Task>;
    fn delete_task(&self, task_id: u64) -> BackendFuture<()>;
    /// `delta` は +1 (報酬) か -1 (消費)
    fn adjust_inventory(&self, player_id: u64, consumable_id: u32, delta: i32) -> BackendFuture<()>;
    fn save_progress(&self, player_id: u64, progress: ProgressRequest) -> BackendFuture<Player>;
    fn change_garden(&self, player_id: u64, garden_name: &str) -> BackendFuture<Player>;
}

/// fetch の結果をそのまま持っておく入れ物。
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

impl HttpReply {
    /// 2xx ならボディを `T` として読む。それ以外はエラー本文から ApiError::Status を作る。
    pub fn parse<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.check()?;
        Ok(serde_json::from_str(&self.body)?)
    }

    /// ボディを読まずに、ステータスだけ確認する。
    pub fn check(&self) -> ApiResult<()> {
        if self.ok {
            return Ok(());
        }
        let message = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_default();
        Err(ApiError::Status { status: self.status, message })
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// 1回分のリクエストを投げて、レスポンスの本文まで読み切る。
async fn send(method: &'static str, url: String, body: Option<String>) -> ApiResult<HttpReply> {
    debug!("HTTP {} {}", method, url);
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_string()))?;
    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = response_value.dyn_into().map_err(js_error)?;
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;

    let reply = HttpReply {
        status: response.status(),
        ok: response.ok(),
        body: text.as_string().unwrap_or_default(),
    };
    debug!("HTTP {} {} -> {}", method, url, reply.status);
    Ok(reply)
}

fn to_body<T: Serialize>(payload: &T) -> ApiResult<Option<String>> {
    Ok(Some(serde_json::to_string(payload)?))
}

/// 本物のバックエンド。ブラウザの fetch を使う。
#[derive(Debug, Clone, Default)]
pub struct HttpBackend {
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        info!("HttpBackend: using API at {}", config.base_url);
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl GardenBackend for HttpBackend {
    fn login(&self, email: &str, password: &str) -> BackendFuture<Player> {
        let url = self.config.login_url();
        let payload = LoginRequest { email: email.to_string(), password: password.to_string() };
        async move {
            let reply = send("POST", url, to_body(&payload)?).await?;
            reply.parse::<PlayerEnvelope>()?.into_player()
        }
        .boxed_local()
    }

    fn register(&self, email: &str, password: &str, player_name: &str) -> BackendFuture<Player> {
        let url = self.config.register_url();
        let payload = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            player_name: player_name.to_string(),
        };
        async move {
            let reply = send("POST", url, to_body(&payload)?).await?;
            reply.parse::<PlayerEnvelope>()?.into_player()
        }
        .boxed_local()
    }

    fn fetch_tasks(&self, player_id: u64) -> BackendFuture<Vec<Task>> {
        let url = self.config.tasks_url(player_id);
        async move {
            let reply = send("GET", url, None).await?;
            reply.parse::<TaskList>()
        }
        .boxed_local()
    }

    fn create_task(&self, player_id: u64, titulo: &str, tipo: TaskCategory) -> BackendFuture<Task> {
        let url = self.config.create_task_url();
        let payload = CreateTaskRequest { titulo: titulo.to_string(), tipo, player_id };
        async move {
            let reply = send("POST", url, to_body(&payload)?).await?;
            reply.parse::<Task>()
        }
        .boxed_local()
    }

    fn delete_task(&self, task_id: u64) -> BackendFuture<()> {
        let url = self.config.task_url(task_id);
        async move { send("DELETE", url, None).await?.check() }.boxed_local()
    }

    fn adjust_inventory(&self, player_id: u64, consumable_id: u32, delta: i32) -> BackendFuture<()> {
        let url = self.config.inventory_url(player_id);
        let payload = InventoryDeltaRequest { consumable_id, quantity: delta };
        async move { send("POST", url, to_body(&payload)?).await?.check() }.boxed_local()
    }

    fn save_progress(&self, player_id: u64, progress: ProgressRequest) -> BackendFuture<Player> {
        let url = self.config.progress_url(player_id);
        async move {
            let reply = send("PATCH", url, to_body(&progress)?).await?;
            Ok::<_, ApiError>(reply.parse::<ProgressResponse>()?.player)
        }
        .boxed_local()
    }

    fn change_garden(&self, player_id: u64, garden_name: &str) -> BackendFuture<Player> {
        let url = self.config.garden_url(player_id);
        let payload = GardenChangeRequest { garden_name: garden_name.to_string() };
        async move {
            let reply = send("PATCH", url, to_body(&payload)?).await?;
            reply.parse::<PlayerEnvelope>()?.into_player()
        }
        .boxed_local()
    }
}
