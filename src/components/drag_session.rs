// src/components/drag_session.rs

use serde::{Deserialize, Serialize};

use crate::components::inventory_item::InventoryItem;
use crate::components::point::Point;

/// ドラッグセッションの状態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    /// 何もドラッグしていない
    #[default]
    Idle,
    /// 指の動きにアイテムが追従している
    Dragging,
    /// 指を離して、消費処理の結果 (と退場アニメーション) を待っている
    Resolving,
}

impl DragPhase {
    /// Dragging か Resolving の間はパネルのスクロールを止める。
    pub fn is_busy(self) -> bool {
        !matches!(self, DragPhase::Idle)
    }
}

/// ドラッグ中アイテムの見た目 (位置・拡大率・不透明度)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    /// 描画位置 (アイテム左上)
    pub position: Point,
    pub scale: f32,
    pub opacity: f32,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self { position: Point::ORIGIN, scale: 1.0, opacity: 0.0 }
    }
}

/// ドラッグ中のアイテムに関する情報だよ！🖱️➡️💧
/// パネルごとにちょうど1つ存在して、Idle に戻るたびに中身がリセットされる。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DragSession {
    pub active_item: Option<InventoryItem>,
    /// 押した位置からセンタリング分ずらした、描画上の「元の位置」
    pub origin_point: Point,
    /// 最後に受け取ったポインタ座標 (生の値)
    pub current_point: Point,
    pub phase: DragPhase,
    pub transform: ItemTransform,
}

impl DragSession {
    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    pub fn active_item_id(&self) -> Option<&str> {
        self.active_item.as_ref().map(|item| item.id.as_str())
    }

    /// 状態を全部デフォルトに戻す。
    pub fn reset(&mut self) {
        *self = DragSession::default();
    }
}
