// src/app/mod.rs
//! GardenApp とインベントリパネルの内部ロジックを役割ごとに分割して置くモジュールだよ！

pub mod browser_event_manager;
pub mod drag_apply_handler;
pub mod drag_handler;
pub mod garden_app;
pub mod garden_drop_handler;
pub mod inventory_panel;
pub mod pointer_tracker;

pub use garden_app::GardenApp;
pub use inventory_panel::{InventoryPanel, PanelView};
