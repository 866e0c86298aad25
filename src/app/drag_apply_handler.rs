// src/app/drag_apply_handler.rs
//! 離した位置を判定して、当たっていればホスト側の onItemDrop に消費を頼む。
//! 結果は必ず bool に丸めるので、エラーもパニックも状態機械には届かない。

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use log::{debug, warn};

use crate::components::drop_zone::DropZone;
use crate::components::inventory_item::InventoryItem;
use crate::components::point::Point;
use crate::error::DropError;

pub type DropFuture = LocalBoxFuture<'static, Result<bool, DropError>>;

/// ホスト (庭の画面) が実装する「アイテムを庭にあげる」処理。
/// `x`, `y` は離した位置 (ドロップゾーンと同じ座標系)。
pub trait ItemDropHandler {
    fn on_item_drop(&self, item: &InventoryItem, x: f32, y: f32) -> DropFuture;
}

impl<F> ItemDropHandler for F
where
    F: Fn(&InventoryItem, f32, f32) -> DropFuture,
{
    fn on_item_drop(&self, item: &InventoryItem, x: f32, y: f32) -> DropFuture {
        self(item, x, y)
    }
}

pub struct ConsumptionCoordinator {
    drop_zone: DropZone,
    handler: Rc<dyn ItemDropHandler>,
}

impl ConsumptionCoordinator {
    pub fn new(drop_zone: DropZone, handler: Rc<dyn ItemDropHandler>) -> Self {
        Self { drop_zone, handler }
    }

    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    /// ホストがレイアウトを測り直したら差し替える。
    pub fn set_drop_zone(&mut self, drop_zone: DropZone) {
        self.drop_zone = drop_zone;
    }

    pub fn set_handler(&mut self, handler: Rc<dyn ItemDropHandler>) {
        self.handler = handler;
    }

    /// 外れ・個数0なら何もせずに false。当たりならハンドラの結果を返す。
    pub fn attempt_consume(&self, item: &InventoryItem, point: Point) -> LocalBoxFuture<'static, bool> {
        if !self.drop_zone.is_hit(point) {
            debug!("attempt_consume: ({}, {}) missed the garden", point.x, point.y);
            return future::ready(false).boxed_local();
        }
        if item.quantity == 0 {
            debug!("attempt_consume: item {} has nothing left", item.id);
            return future::ready(false).boxed_local();
        }

        let handler = &self.handler;
        let produced = panic::catch_unwind(AssertUnwindSafe(|| handler.on_item_drop(item, point.x, point.y)));
        let pending = match produced {
            Ok(pending) => pending,
            Err(_) => {
                warn!("attempt_consume: drop handler panicked for item {}", item.id);
                return future::ready(false).boxed_local();
            }
        };

        let item_id = item.id.clone();
        AssertUnwindSafe(pending)
            .catch_unwind()
            .map(move |outcome| match outcome {
                Ok(Ok(consumed)) => consumed,
                Ok(Err(e)) => {
                    warn!("attempt_consume: item {} was not consumed: {}", item_id, e);
                    false
                }
                Err(_) => {
                    warn!("attempt_consume: drop handler future panicked for item {}", item_id);
                    false
                }
            })
            .boxed_local()
    }
}
