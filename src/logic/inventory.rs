// src/logic/inventory.rs

use crate::components::consumable::{self, Consumable};
use crate::components::inventory_item::{ImageRef, InventoryItem};
use crate::protocol::InventoryEntryData;

/// プレイヤー JSON の `INVENTORYs` を画面用のアイテムに変換する。
/// 画像はカタログにあればそっちを優先するよ。
pub fn from_backend(entries: &[InventoryEntryData]) -> Vec<InventoryItem> {
    entries
        .iter()
        .map(|entry| {
            let known = consumable::by_id(entry.consumable_id);
            let kind = match (&known, entry.consumable.consumable_name.is_empty()) {
                (_, false) => entry.consumable.consumable_name.clone(),
                (Some(c), true) => c.name.to_string(),
                (None, true) => format!("consumable-{}", entry.consumable_id),
            };
            let image_ref = match known {
                Some(c) => ImageRef::asset(c.image),
                None => ImageRef(entry.consumable.consumable_img.clone()),
            };
            InventoryItem {
                id: entry.consumable_id.to_string(),
                kind,
                quantity: entry.quantity,
                image_ref,
            }
        })
        .collect()
}

/// パネルに並べていいのは 1 個以上あるアイテムだけ。
pub fn draggable(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items.iter().filter(|item| item.is_available()).cloned().collect()
}

pub fn find<'a>(items: &'a [InventoryItem], id: &str) -> Option<&'a InventoryItem> {
    items.iter().find(|item| item.id == id)
}

/// 個数を増減する。0 未満にはならない。アイテムがなければ false。
pub fn apply_delta(items: &mut [InventoryItem], id: &str, delta: i32) -> bool {
    match items.iter_mut().find(|item| item.id == id) {
        Some(item) => {
            let next = i64::from(item.quantity) + i64::from(delta);
            item.quantity = next.clamp(0, i64::from(u32::MAX)) as u32;
            true
        }
        None => false,
    }
}

/// ごほうびを1個追加。持っていれば +1、なければ新しく並べる。
pub fn add_reward(items: &mut Vec<InventoryItem>, reward: &Consumable) {
    let id = reward.id.to_string();
    if !apply_delta(items, &id, 1) {
        items.push(InventoryItem::from_consumable(reward, 1));
    }
}
