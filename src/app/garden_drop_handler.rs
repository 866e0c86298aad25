// src/app/garden_drop_handler.rs
//! 庭の画面がパネルに渡す onItemDrop。ストアとバックエンドを使って1個消費する。🌱

use futures::FutureExt;

use crate::app::drag_apply_handler::{DropFuture, ItemDropHandler};
use crate::components::inventory_item::InventoryItem;
use crate::store::effects::{self, SharedBackend};
use crate::store::SharedStore;

pub struct GardenDropHandler {
    store: SharedStore,
    backend: SharedBackend,
}

impl GardenDropHandler {
    pub fn new(store: SharedStore, backend: SharedBackend) -> Self {
        Self { store, backend }
    }
}

impl ItemDropHandler for GardenDropHandler {
    // 座標はもうドロップゾーンで判定済みなので使わない
    fn on_item_drop(&self, item: &InventoryItem, _x: f32, _y: f32) -> DropFuture {
        effects::consume_item(self.store.clone(), self.backend.clone(), item.clone()).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;
    use crate::app::drag_apply_handler::ConsumptionCoordinator;
    use crate::components::drop_zone::DropZone;
    use crate::components::point::Point;
    use crate::error::DropError;
    use crate::logic::inventory;
    use crate::store::fake_backend::{logged_in_store, sample_player, FakeBackend};
    use crate::store::lock;

    fn setup() -> (SharedStore, Rc<FakeBackend>, GardenDropHandler) {
        let store = logged_in_store(sample_player()).shared();
        let fake = Rc::new(FakeBackend::new(sample_player()));
        let backend: SharedBackend = fake.clone();
        let handler = GardenDropHandler::new(store.clone(), backend);
        (store, fake, handler)
    }

    #[test]
    fn drop_spends_one_item_in_the_store() {
        let (store, fake, handler) = setup();
        let agua = inventory::find(&lock(&store).state().inventory, "1").cloned().unwrap();

        assert_eq!(block_on(handler.on_item_drop(&agua, 150.0, 200.0)), Ok(true));
        let left = inventory::find(&lock(&store).state().inventory, "1").map(|i| i.quantity);
        assert_eq!(left, Some(1));
        assert_eq!(fake.calls(), vec!["adjust_inventory 1 -1", "save_progress 1 1"]);
    }

    #[test]
    fn empty_item_is_refused_through_the_coordinator() {
        let (store, fake, handler) = setup();
        let polvo = inventory::find(&lock(&store).state().inventory, "2").cloned().unwrap();

        assert_eq!(
            block_on(handler.on_item_drop(&polvo, 150.0, 200.0)),
            Err(DropError::Exhausted("2".to_string()))
        );

        // パネル経由だと個数0は呼ばれもしない
        let coordinator = ConsumptionCoordinator::new(DropZone::new(100.0, 300.0, 50.0, 250.0), Rc::new(handler));
        assert!(!block_on(coordinator.attempt_consume(&polvo, Point::new(150.0, 200.0))));
        assert!(fake.calls().is_empty());
    }
}
