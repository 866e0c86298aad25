// src/app/pointer_tracker.rs
//! 1アイテム分のポインタジェスチャーを追いかける。
//!
//! パネル内の全トラッカーは同じ `GestureClaim` を共有していて、
//! 押した瞬間にそれを取れたトラッカーだけがイベントを出せる。
//! 見た目の状態は一切持たない。

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error};

use crate::components::point::Point;

/// 今ジェスチャーを持っているアイテムの id。誰も持っていなければ None。
pub type GestureClaim = Arc<Mutex<Option<String>>>;

pub fn new_claim() -> GestureClaim {
    Arc::new(Mutex::new(None))
}

/// ロックを取る。毒化していたら中身を取り出して続行。
pub(crate) fn lock_claim(claim: &GestureClaim) -> MutexGuard<'_, Option<String>> {
    match claim.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("Gesture claim mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

/// ジェスチャーの終わり方。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 指を離した
    Completed,
    /// OS やブラウザに取り上げられた
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Started(Point),
    Moved(Point),
    /// 1ジェスチャーにつきちょうど1回だけ出る
    Ended { point: Point, completion: Completion },
}

#[derive(Debug)]
pub struct PointerTracker {
    item_id: String,
    claim: GestureClaim,
    start: Option<Point>,
    last: Point,
}

impl PointerTracker {
    pub fn new(item_id: impl Into<String>, claim: GestureClaim) -> Self {
        Self { item_id: item_id.into(), claim, start: None, last: Point::ORIGIN }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// ジェスチャー中かどうか。
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.start
    }

    pub fn last_point(&self) -> Point {
        self.last
    }

    /// 押した。ほかのトラッカーが持っていれば何もしないで None。
    pub fn press(&mut self, point: Point) -> Option<GestureEvent> {
        if self.is_active() {
            return None;
        }
        {
            let mut owner = lock_claim(&self.claim);
            if let Some(other) = owner.as_ref() {
                debug!("PointerTracker {}: press ignored, {} owns the gesture", self.item_id, other);
                return None;
            }
            *owner = Some(self.item_id.clone());
        }
        self.start = Some(point);
        self.last = point;
        Some(GestureEvent::Started(point))
    }

    pub fn move_to(&mut self, point: Point) -> Option<GestureEvent> {
        if !self.is_active() {
            return None;
        }
        self.last = point;
        Some(GestureEvent::Moved(point))
    }

    pub fn release(&mut self, point: Point) -> Option<GestureEvent> {
        self.last = point;
        self.finish(Completion::Completed)
    }

    /// キャンセルは最後に分かっている座標を運ぶ。
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.finish(Completion::Cancelled)
    }

    fn finish(&mut self, completion: Completion) -> Option<GestureEvent> {
        self.start.take()?;
        let mut owner = lock_claim(&self.claim);
        if owner.as_deref() == Some(self.item_id.as_str()) {
            *owner = None;
        }
        Some(GestureEvent::Ended { point: self.last, completion })
    }
}

impl Drop for PointerTracker {
    // ジェスチャー中に捨てられても claim を握りっぱなしにしない
    fn drop(&mut self) {
        if self.is_active() {
            let _ = self.cancel();
        }
    }
}
