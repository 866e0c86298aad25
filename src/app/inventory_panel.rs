// src/app/inventory_panel.rs
//! インベントリパネル: アイテムを並べて、ドラッグで庭にあげられるようにする。🎒
//!
//! ポインタ入力 → `PointerTracker` → `DragSessionController` と流れて、
//! 離した時だけ `ConsumptionCoordinator` が呼ばれる。
//! 消費の Future はパネルの外で await してもらい、結果は `complete_drop` で戻す。

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::LocalBoxFuture;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::animation::{Channel, Timeline, TransitionKind};
use crate::app::drag_apply_handler::{ConsumptionCoordinator, ItemDropHandler};
use crate::app::drag_handler::DragSessionController;
use crate::app::pointer_tracker::{self, Completion, GestureClaim, GestureEvent, PointerTracker};
use crate::components::drag_session::{DragPhase, DragSession};
use crate::components::drop_zone::DropZone;
use crate::components::inventory_item::InventoryItem;
use crate::components::point::Point;
use crate::config::layout::PANEL_HIDDEN_OFFSET;
use crate::logic::inventory;

/// 画面とウィンドウのイベントリスナーの両方から触るので共有する。
pub type SharedPanel = Arc<Mutex<InventoryPanel>>;

pub fn lock_panel(panel: &SharedPanel) -> MutexGuard<'_, InventoryPanel> {
    match panel.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("InventoryPanel mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

/// 離した後の消費処理。`future` を最後まで待って、結果を
/// `InventoryPanel::complete_drop(generation, result)` に渡すこと。
pub struct PendingDrop {
    pub generation: u64,
    pub future: LocalBoxFuture<'static, bool>,
}

/// JS 側が描画に使うスナップショット。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub items: Vec<InventoryItem>,
    pub is_open: bool,
    /// パネルの translateY
    pub offset: f32,
    pub opacity: f32,
    pub scroll_enabled: bool,
    pub session: DragSession,
    /// キャンセルでフェードアウト中のアイテム
    pub fading_item: Option<InventoryItem>,
    pub transition: Option<TransitionKind>,
}

pub struct InventoryPanel {
    items: Vec<InventoryItem>,
    trackers: HashMap<String, PointerTracker>,
    claim: GestureClaim,
    controller: DragSessionController,
    coordinator: ConsumptionCoordinator,
    is_open: bool,
    offset: f32,
    opacity: f32,
    slide: Option<Timeline>,
}

impl InventoryPanel {
    /// 閉じた状態で作る。
    pub fn new(drop_zone: DropZone, handler: Rc<dyn ItemDropHandler>) -> Self {
        Self {
            items: Vec::new(),
            trackers: HashMap::new(),
            claim: pointer_tracker::new_claim(),
            controller: DragSessionController::new(),
            coordinator: ConsumptionCoordinator::new(drop_zone, handler),
            is_open: false,
            offset: PANEL_HIDDEN_OFFSET,
            opacity: 0.0,
            slide: None,
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn session(&self) -> &DragSession {
        self.controller.session()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// ドラッグ中・結果待ちの間はスクロールさせない。
    pub fn scroll_enabled(&self) -> bool {
        !self.controller.is_busy()
    }

    pub fn drop_zone(&self) -> DropZone {
        self.coordinator.drop_zone()
    }

    pub fn set_drop_zone(&mut self, drop_zone: DropZone) {
        self.coordinator.set_drop_zone(drop_zone);
    }

    pub fn set_handler(&mut self, handler: Rc<dyn ItemDropHandler>) {
        self.coordinator.set_handler(handler);
    }

    /// インベントリを差し替える。個数0のものは並べない。
    ///
    /// ドラッグ中のアイテムが消えたら、キャンセルと同じ扱いでセッションを打ち切る。
    /// 結果待ち中に消えるのは消費の結果なので、そのまま退場アニメーションを続ける。
    pub fn set_inventory(&mut self, items: Vec<InventoryItem>) {
        self.items = inventory::draggable(&items);

        let active = self.session().active_item_id().map(str::to_string);
        if let Some(active) = active {
            let still_here = inventory::find(&self.items, &active).is_some();
            if !still_here && self.controller.phase() == DragPhase::Dragging {
                warn!("InventoryPanel: item {} disappeared mid-drag, aborting", active);
                self.abort_gesture();
            }
        }

        let claim = &self.claim;
        let mut previous = std::mem::take(&mut self.trackers);
        self.trackers = self
            .items
            .iter()
            .map(|item| {
                let tracker = previous
                    .remove(&item.id)
                    .unwrap_or_else(|| PointerTracker::new(item.id.clone(), claim.clone()));
                (item.id.clone(), tracker)
            })
            .collect();
        // 残り (もう並ばないアイテム) はここで drop され、claim も解放される
    }

    /// パネルを開閉する。スライドは今の位置から始まる。
    pub fn set_open(&mut self, open: bool) {
        if self.is_open == open {
            return;
        }
        self.is_open = open;
        self.slide = Some(Timeline::panel_slide(open, self.offset, self.opacity));
        info!("InventoryPanel: {}", if open { "opening" } else { "closing" });
    }

    /// アイテムを押した。ドラッグが始まったら true。
    pub fn pointer_down(&mut self, item_id: &str, point: Point) -> bool {
        if !self.is_open {
            return false;
        }
        let Some(item) = inventory::find(&self.items, item_id).cloned() else {
            debug!("InventoryPanel: pointer_down on unknown item {}", item_id);
            return false;
        };
        let Some(tracker) = self.trackers.get_mut(item_id) else {
            return false;
        };
        if tracker.press(point).is_none() {
            return false;
        }
        match self.controller.begin(item, point) {
            Ok(()) => true,
            Err(e) => {
                debug!("InventoryPanel: {}", e);
                // claim だけ握りっぱなしにならないように返す
                let _ = tracker.cancel();
                false
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.active_tracker().and_then(|t| t.move_to(point)) {
            Some(GestureEvent::Moved(point)) => self.controller.drag_to(point),
            _ => false,
        }
    }

    /// 離した。消費を試すべきなら PendingDrop を返す。
    pub fn pointer_up(&mut self, point: Point) -> Option<PendingDrop> {
        match self.active_tracker().and_then(|t| t.release(point))? {
            GestureEvent::Ended { point, completion: Completion::Completed } => {
                let ticket = self.controller.release(point)?;
                let future = self.coordinator.attempt_consume(&ticket.item, ticket.point);
                Some(PendingDrop { generation: ticket.generation, future })
            }
            _ => None,
        }
    }

    /// OS やブラウザにジェスチャーを取り上げられた。
    pub fn pointer_cancel(&mut self) -> bool {
        self.abort_gesture()
    }

    /// 消費の結果を戻す。キャンセル済みのセッションなら無視。
    pub fn complete_drop(&mut self, generation: u64, consumed: bool) -> bool {
        self.controller.resolve(generation, consumed)
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.controller.tick(dt_ms);
        if let Some(slide) = self.slide.as_mut() {
            let finished = slide.tick(dt_ms);
            if let Some(offset) = slide.sample(Channel::PanelOffset) {
                self.offset = offset;
            }
            if let Some(opacity) = slide.sample(Channel::Opacity) {
                self.opacity = opacity;
            }
            if finished {
                self.slide = None;
            }
        }
    }

    pub fn view(&self) -> PanelView {
        PanelView {
            items: self.items.clone(),
            is_open: self.is_open,
            offset: self.offset,
            opacity: self.opacity,
            scroll_enabled: self.scroll_enabled(),
            session: self.session().clone(),
            fading_item: self.controller.fading_item().cloned(),
            transition: self.controller.transition_kind(),
        }
    }

    fn active_tracker(&mut self) -> Option<&mut PointerTracker> {
        let owner = pointer_tracker::lock_claim(&self.claim).clone()?;
        self.trackers.get_mut(&owner)
    }

    fn abort_gesture(&mut self) -> bool {
        if let Some(tracker) = self.active_tracker() {
            let _ = tracker.cancel();
        }
        self.controller.cancel()
    }
}

#[cfg(test)]
#[path = "inventory_panel_tests.rs"]
mod tests;
