// src/config/layout.rs
//! インベントリパネルとドラッグ演出に関する定数を定義するよ！
//! 座標は全部スクリーン座標 (px)、時間はミリ秒。

pub const ITEM_SIZE: f32 = 60.0; // アイテム画像の一辺
/// ドラッグ中のアイテムをポインタの中心に置くためのオフセット (ITEM_SIZE の半分)
pub const DRAG_CENTER_OFFSET: f32 = ITEM_SIZE / 2.0;
pub const DRAG_SCALE: f32 = 1.2; // 持ち上げた時の拡大率

// --- パネル ---
pub const PANEL_HEIGHT: f32 = 150.0;
pub const PANEL_HIDDEN_OFFSET: f32 = PANEL_HEIGHT; // 閉じている時の translateY
pub const PANEL_SLIDE_MS: f32 = 450.0;
pub const PANEL_SPRING_FRICTION: f32 = 7.0;

// --- ドラッグの各トランジション ---
pub const ENTER_FADE_MS: f32 = 100.0;
pub const ENTER_TOTAL_MS: f32 = 300.0; // スケールのバネが落ち着くまで
pub const ENTER_SPRING_FRICTION: f32 = 3.0;

pub const CONSUMED_MS: f32 = 200.0;

pub const REJECTED_MS: f32 = 300.0;
pub const REJECTED_SPRING_FRICTION: f32 = 5.0;

pub const CANCELLED_FADE_MS: f32 = 120.0;

// --- 庭の進行 ---
pub const PROGRESS_PER_LEVEL: u32 = 3; // 3回あげるとレベルアップ
pub const MAX_LEVEL: u32 = 5;
pub const DEFAULT_GARDEN: &str = "jungle";
/// 設定画面で選べる庭
pub const GARDEN_NAMES: [&str; 3] = ["jungle", "peach", "valley"];
