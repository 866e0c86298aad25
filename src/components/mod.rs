// src/components/mod.rs

// データモデルのモジュールたち！
pub mod consumable;
pub mod drag_session;
pub mod drop_zone;
pub mod inventory_item;
pub mod player;
pub mod point;
pub mod task;

pub use consumable::Consumable;
pub use drag_session::{DragPhase, DragSession, ItemTransform};
pub use drop_zone::DropZone;
pub use inventory_item::{ImageRef, InventoryItem};
pub use player::{GardenProgress, Player};
pub use point::Point;
pub use task::{Task, TaskCategory};
