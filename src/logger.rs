// src/logger.rs
//! `log` クレートのマクロ (info!, warn! ...) の出力先をつなぐ。
//! wasm ではブラウザの console (console_log)、ネイティブ (テスト時) では env_logger。

use log::{LevelFilter, SetLoggerError};

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) -> Result<(), SetLoggerError> {
    match level.to_level() {
        Some(level) => console_log::init_with_level(level),
        None => {
            log::set_max_level(LevelFilter::Off);
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new().filter_level(level).is_test(true).try_init()
}

/// ロガーをインストールする。二回目以降の呼び出しは何もしない。
pub fn init(level: LevelFilter) {
    if install(level).is_err() {
        log::debug!("logger already installed");
    }
}
