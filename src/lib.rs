// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod animation;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod logger;
pub mod logic;
pub mod network;
pub mod protocol;
pub mod store;

pub use app::GardenApp;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug);
    log::info!("Panic hook and logger set!");
}
