// src/app/drag_handler.rs
//! ドラッグセッションの状態機械 (持ち上げ → 追従 → 結果待ち → 退場)。

use log::{debug, info};

use crate::animation::{Timeline, TransitionKind};
use crate::components::drag_session::{DragPhase, DragSession, ItemTransform};
use crate::components::inventory_item::InventoryItem;
use crate::components::point::Point;
use crate::config::layout::DRAG_CENTER_OFFSET;
use crate::error::DragError;

/// 離した時に作られる「消費してみて」の依頼票。
/// `generation` が今のセッションと一致する結果だけが受け付けられる。
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTicket {
    pub generation: u64,
    pub item: InventoryItem,
    pub point: Point,
}

fn center_offset() -> Point {
    Point::new(DRAG_CENTER_OFFSET, DRAG_CENTER_OFFSET)
}

#[derive(Debug, Default)]
pub struct DragSessionController {
    session: DragSession,
    generation: u64,
    /// 結果待ちのセッション番号
    awaiting: Option<u64>,
    transition: Option<Timeline>,
    /// キャンセルでフェードアウト中のアイテム (セッションはもう Idle)
    fading: Option<InventoryItem>,
}

impl DragSessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn phase(&self) -> DragPhase {
        self.session.phase
    }

    /// Dragging / Resolving の間は true (パネルのスクロールを止める)。
    pub fn is_busy(&self) -> bool {
        self.session.phase.is_busy()
    }

    /// キャンセルのフェードが終わるまで、消えていく画像を描けるように残しておく。
    pub fn fading_item(&self) -> Option<&InventoryItem> {
        self.fading.as_ref()
    }

    pub fn transition_kind(&self) -> Option<TransitionKind> {
        self.transition.as_ref().map(|t| t.kind())
    }

    /// アイテムを持ち上げる。Idle 以外なら今のセッションには触らずに断る。
    pub fn begin(&mut self, item: InventoryItem, press: Point) -> Result<(), DragError> {
        if let Some(active) = self.session.active_item_id() {
            if self.is_busy() {
                return Err(DragError::Conflict { active: active.to_string() });
            }
        }
        if !item.is_available() {
            return Err(DragError::Unavailable(item.id));
        }

        self.generation += 1;
        self.awaiting = None;
        self.fading = None;
        let origin = press - center_offset();
        debug!("DragSession #{}: begin {} at ({}, {})", self.generation, item.id, press.x, press.y);
        self.session = DragSession {
            active_item: Some(item),
            origin_point: origin,
            current_point: press,
            phase: DragPhase::Dragging,
            transform: ItemTransform { position: origin, scale: 1.0, opacity: 0.0 },
        };
        self.transition = Some(Timeline::enter());
        Ok(())
    }

    /// ポインタに 1:1 で追従。Dragging 以外では無視して false。
    pub fn drag_to(&mut self, point: Point) -> bool {
        if self.session.phase != DragPhase::Dragging {
            return false;
        }
        self.session.current_point = point;
        self.session.transform.position = point - center_offset();
        true
    }

    /// 指を離した。Resolving に入って依頼票を返す。見た目は離した位置で止まる。
    pub fn release(&mut self, point: Point) -> Option<ResolutionTicket> {
        if self.session.phase != DragPhase::Dragging {
            return None;
        }
        self.drag_to(point);
        let item = self.session.active_item.clone()?;
        self.session.phase = DragPhase::Resolving;
        self.awaiting = Some(self.generation);
        debug!("DragSession #{}: released {} at ({}, {})", self.generation, item.id, point.x, point.y);
        Some(ResolutionTicket { generation: self.generation, item, point })
    }

    /// 消費の結果を受け取って退場アニメーションを始める。
    /// キャンセル済みや別セッションの結果なら無視して false。
    pub fn resolve(&mut self, generation: u64, consumed: bool) -> bool {
        if self.awaiting != Some(generation) || self.session.phase != DragPhase::Resolving {
            debug!("DragSession: ignoring stale result for #{}", generation);
            return false;
        }
        self.awaiting = None;
        let transform = self.session.transform;
        self.transition = Some(if consumed {
            Timeline::consumed(&transform)
        } else {
            Timeline::rejected(&transform, self.session.origin_point)
        });
        info!(
            "DragSession #{}: {}",
            generation,
            if consumed { "consumed" } else { "rejected, returning to origin" }
        );
        true
    }

    /// プラットフォームによるキャンセル。すぐ Idle になって、素早くフェードアウトするだけ。
    pub fn cancel(&mut self) -> bool {
        if !self.is_busy() {
            return false;
        }
        debug!("DragSession #{}: cancelled", self.generation);
        let transform = self.session.transform;
        self.fading = self.session.active_item.take();
        self.session.reset();
        self.session.transform = transform;
        self.awaiting = None;
        self.transition = Some(Timeline::cancelled(&transform));
        true
    }

    /// 1フレーム分アニメーションを進める。
    pub fn tick(&mut self, dt_ms: f32) {
        let Some(timeline) = self.transition.as_mut() else {
            return;
        };
        let finished = timeline.tick(dt_ms);
        timeline.apply_to(&mut self.session.transform);
        if !finished {
            return;
        }
        let kind = timeline.kind();
        self.transition = None;
        match kind {
            TransitionKind::Consumed | TransitionKind::Rejected => {
                debug!("DragSession #{}: back to idle", self.generation);
                self.session.reset();
            }
            TransitionKind::Cancelled => {
                self.fading = None;
                self.session.transform = ItemTransform::default();
            }
            TransitionKind::Enter | TransitionKind::PanelSlide => {}
        }
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::{CANCELLED_FADE_MS, CONSUMED_MS, DRAG_SCALE, ENTER_TOTAL_MS, REJECTED_MS};

    fn agua(quantity: u32) -> InventoryItem {
        InventoryItem::new("1", "agua", quantity)
    }

    fn dragging_controller() -> DragSessionController {
        let mut controller = DragSessionController::new();
        controller.begin(agua(2), Point::new(100.0, 400.0)).unwrap();
        controller
    }

    #[test]
    fn begin_centers_item_under_pointer() {
        let controller = dragging_controller();
        let session = controller.session();
        assert_eq!(session.phase, DragPhase::Dragging);
        assert_eq!(session.origin_point, Point::new(70.0, 370.0));
        assert_eq!(session.current_point, Point::new(100.0, 400.0));
        assert_eq!(session.transform.position, Point::new(70.0, 370.0));
        assert_eq!(controller.transition_kind(), Some(TransitionKind::Enter));
    }

    #[test]
    fn enter_transition_lifts_the_item() {
        let mut controller = dragging_controller();
        controller.tick(ENTER_TOTAL_MS);
        let transform = controller.session().transform;
        assert_eq!(transform.opacity, 1.0);
        assert_eq!(transform.scale, DRAG_SCALE);
        assert_eq!(controller.transition_kind(), None);
        assert_eq!(controller.phase(), DragPhase::Dragging);
    }

    #[test]
    fn quantity_zero_cannot_be_dragged() {
        let mut controller = DragSessionController::new();
        assert_eq!(
            controller.begin(agua(0), Point::new(0.0, 0.0)),
            Err(DragError::Unavailable("1".to_string()))
        );
        assert!(controller.session().is_idle());
    }

    #[test]
    fn conflicting_begin_leaves_session_untouched() {
        let mut controller = dragging_controller();
        controller.drag_to(Point::new(200.0, 200.0));
        let before = controller.session().clone();

        let polvo = InventoryItem::new("2", "polvo", 1);
        assert_eq!(
            controller.begin(polvo.clone(), Point::new(5.0, 5.0)),
            Err(DragError::Conflict { active: "1".to_string() })
        );
        assert_eq!(controller.session(), &before);

        controller.release(Point::new(200.0, 200.0));
        assert!(controller.begin(polvo, Point::new(5.0, 5.0)).is_err());
        assert_eq!(controller.session().active_item_id(), Some("1"));
    }

    #[test]
    fn drag_follows_pointer_exactly() {
        let mut controller = dragging_controller();
        assert!(controller.drag_to(Point::new(123.5, 456.25)));
        assert_eq!(controller.session().current_point, Point::new(123.5, 456.25));
        assert_eq!(controller.session().transform.position, Point::new(93.5, 426.25));
    }

    #[test]
    fn release_freezes_until_resolved_then_consumed_goes_idle() {
        let mut controller = dragging_controller();
        let ticket = controller.release(Point::new(150.0, 200.0)).unwrap();
        assert_eq!(ticket.point, Point::new(150.0, 200.0));
        assert_eq!(ticket.item.id, "1");
        assert_eq!(controller.phase(), DragPhase::Resolving);

        // 結果待ちの間は動かない
        assert!(!controller.drag_to(Point::new(0.0, 0.0)));
        assert_eq!(controller.session().transform.position, Point::new(120.0, 170.0));

        assert!(controller.resolve(ticket.generation, true));
        assert_eq!(controller.transition_kind(), Some(TransitionKind::Consumed));
        assert_eq!(controller.phase(), DragPhase::Resolving);

        controller.tick(CONSUMED_MS);
        assert!(controller.session().is_idle());
        assert_eq!(controller.session(), &DragSession::default());
    }

    #[test]
    fn rejected_springs_back_then_goes_idle() {
        let mut controller = dragging_controller();
        let ticket = controller.release(Point::new(10.0, 10.0)).unwrap();
        assert!(controller.resolve(ticket.generation, false));
        assert_eq!(controller.transition_kind(), Some(TransitionKind::Rejected));

        controller.tick(REJECTED_MS - 1.0);
        assert_eq!(controller.phase(), DragPhase::Resolving);
        controller.tick(1.0);
        assert!(controller.session().is_idle());
        assert_eq!(controller.session().active_item, None);
        assert_eq!(controller.session().transform, ItemTransform::default());
    }

    #[test]
    fn cancel_is_immediate_and_late_results_are_ignored() {
        let mut controller = dragging_controller();
        let ticket = controller.release(Point::new(150.0, 200.0)).unwrap();
        assert!(controller.cancel());
        assert!(controller.session().is_idle());
        assert_eq!(controller.session().active_item, None);
        assert_eq!(controller.transition_kind(), Some(TransitionKind::Cancelled));

        assert!(!controller.resolve(ticket.generation, true));
        assert_eq!(controller.transition_kind(), Some(TransitionKind::Cancelled));
        assert_eq!(controller.fading_item().map(|i| i.id.as_str()), Some("1"));

        controller.tick(CANCELLED_FADE_MS);
        assert_eq!(controller.session(), &DragSession::default());
        assert_eq!(controller.fading_item(), None);
        assert!(!controller.cancel());
    }

    #[test]
    fn new_drag_replaces_the_fading_item() {
        let mut controller = dragging_controller();
        controller.tick(ENTER_TOTAL_MS);
        assert!(controller.cancel());
        assert_eq!(controller.fading_item(), Some(&agua(2)));
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(controller.session().transform.opacity > 0.0);

        let polvo = InventoryItem::new("2", "polvo", 1);
        controller.begin(polvo, Point::new(5.0, 5.0)).unwrap();
        assert_eq!(controller.fading_item(), None);
        assert_eq!(controller.session().active_item_id(), Some("2"));
    }

    #[test]
    fn result_for_previous_session_is_ignored() {
        let mut controller = dragging_controller();
        let old = controller.release(Point::new(1.0, 1.0)).unwrap();
        controller.cancel();
        controller.begin(agua(2), Point::new(50.0, 50.0)).unwrap();
        let current = controller.release(Point::new(2.0, 2.0)).unwrap();
        assert_ne!(old.generation, current.generation);

        assert!(!controller.resolve(old.generation, true));
        assert_eq!(controller.phase(), DragPhase::Resolving);
        assert!(controller.resolve(current.generation, false));
        // 同じ結果は2回受け付けない
        assert!(!controller.resolve(current.generation, true));
    }
}
