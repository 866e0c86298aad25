// src/config/api.rs
//! バックエンド (REST API) の接続先設定。
//! JS 側から JSON で渡してもらうこともできるよ。

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// `{"baseUrl": "..."}` 形式の JSON から作る。
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: ApiConfig = serde_json::from_str(json)?;
        Ok(Self::new(config.base_url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn login_url(&self) -> String {
        self.url("/auth/login")
    }

    pub fn register_url(&self) -> String {
        self.url("/auth/register")
    }

    pub fn tasks_url(&self, player_id: u64) -> String {
        self.url(&format!("/tasks?playerId={}", player_id))
    }

    pub fn create_task_url(&self) -> String {
        self.url("/tasks")
    }

    pub fn task_url(&self, task_id: u64) -> String {
        self.url(&format!("/tasks/{}", task_id))
    }

    pub fn inventory_url(&self, player_id: u64) -> String {
        self.url(&format!("/garden/player/{}/inventory", player_id))
    }

    pub fn progress_url(&self, player_id: u64) -> String {
        self.url(&format!("/garden/player/{}/progress", player_id))
    }

    pub fn garden_url(&self, player_id: u64) -> String {
        self.url(&format!("/garden/player/{}/garden", player_id))
    }
}
