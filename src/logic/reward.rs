// src/logic/reward.rs

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::consumable::{Consumable, ALL_CONSUMABLES, WATER};

/// タスク完了のごほうびを1つ選ぶ関数だよ！🎁
///
/// カタログ (agua / polvo / fertilizante) から等確率で選ぶ。
/// 乱数生成器は外から渡すので、テストでは種を固定できる。
pub fn roll_reward<R: Rng + ?Sized>(rng: &mut R) -> Consumable {
    // カタログは空じゃないので None にはならない
    ALL_CONSUMABLES.choose(rng).copied().unwrap_or(WATER)
}
