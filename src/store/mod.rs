// src/store/mod.rs
//! クライアント側のグローバルストア。
//! 状態は `reduce` でしか変わらず、`dispatch` した順に同期的に適用される。

pub mod action;
pub mod effects;
pub mod reducer;
pub mod state;

#[cfg(test)]
pub(crate) mod fake_backend;

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error};

pub use action::Action;
pub use reducer::reduce;
pub use state::{AppState, AuthState};

/// 画面と非同期エフェクトの両方から触るので Arc<Mutex<>> で共有する。
pub type SharedStore = Arc<Mutex<Store>>;

#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    version: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state, version: 0 }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// dispatch されるたびに 1 増える。画面側はこれを見て再描画を判断する。
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("Store: dispatch {:?}", action);
        self.state = reduce(&self.state, &action);
        self.version += 1;
    }
}

/// ロックを取る。毒化していても中身を取り出して続行する。
pub fn lock(store: &SharedStore) -> MutexGuard<'_, Store> {
    match store.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("Store mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

/// ロックを取って dispatch するだけの近道。ロックはすぐ外れる。
pub fn dispatch(store: &SharedStore, action: Action) {
    lock(store).dispatch(action);
}
