// src/components/consumable.rs

use serde::Serialize;

/// 庭にあげられる消費アイテムの種類だよ。💧🦴🌱
/// `id` はバックエンドの consumable_id と同じ値。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Consumable {
    pub id: u32,
    pub name: &'static str,
    pub image: &'static str,
}

pub const WATER: Consumable = Consumable { id: 1, name: "agua", image: "Consumables/water.png" };
pub const BONE_POWDER: Consumable = Consumable { id: 2, name: "polvo", image: "Consumables/bone_powder.png" };
pub const FERTILIZER: Consumable = Consumable { id: 3, name: "fertilizante", image: "Consumables/fertilizer.png" };

/// タスク完了の報酬はこの3種類から等確率で選ばれる。
pub const ALL_CONSUMABLES: [Consumable; 3] = [WATER, BONE_POWDER, FERTILIZER];

pub fn by_id(id: u32) -> Option<Consumable> {
    ALL_CONSUMABLES.iter().copied().find(|c| c.id == id)
}

pub fn by_name(name: &str) -> Option<Consumable> {
    ALL_CONSUMABLES.iter().copied().find(|c| c.name == name)
}
