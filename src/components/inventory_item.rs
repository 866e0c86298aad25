// src/components/inventory_item.rs

use serde::{Deserialize, Serialize};

use crate::components::consumable::Consumable;

/// 画像アセットへの不透明なハンドル。中身はアセットのパスだけど、
/// Rust 側では読み込まずに JS 側にそのまま渡すよ。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageRef(pub Option<String>);

impl ImageRef {
    pub fn asset(path: impl Into<String>) -> Self {
        ImageRef(Some(path.into()))
    }

    pub fn none() -> Self {
        ImageRef(None)
    }
}

/// インベントリの1エントリ (アイテムの種類 + 個数) だよ！🎒
///
/// 持ち主はストア (画面側の状態)。ドラッグ処理はクローンを借りて表示するだけで、
/// `quantity` を直接書き換えることはない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// consumable_id を文字列にしたもの
    pub id: String,
    /// 表示名 / カテゴリ (agua, polvo, ...)
    pub kind: String,
    pub quantity: u32,
    pub image_ref: ImageRef,
}

impl InventoryItem {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            quantity,
            image_ref: ImageRef::none(),
        }
    }

    pub fn from_consumable(consumable: &Consumable, quantity: u32) -> Self {
        Self {
            id: consumable.id.to_string(),
            kind: consumable.name.to_string(),
            quantity,
            image_ref: ImageRef::asset(consumable.image),
        }
    }

    /// パネルでドラッグできるのは 1 個以上あるアイテムだけ。
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::consumable::WATER;

    #[test]
    fn create_inventory_item() {
        let item = InventoryItem::from_consumable(&WATER, 2);
        assert_eq!(item.id, "1");
        assert_eq!(item.kind, "agua");
        assert_eq!(item.image_ref, ImageRef::asset("Consumables/water.png"));
        assert!(item.is_available());

        let empty = InventoryItem::new("2", "polvo", 0);
        assert!(!empty.is_available());
        assert_eq!(empty.image_ref, ImageRef::none());
    }
}
