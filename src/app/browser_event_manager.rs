// src/app/browser_event_manager.rs
//! ドラッグ中だけ window に pointermove / pointerup / pointercancel のリスナーを付ける。
//! 指がアイテムの外に出ても追いかけられるようにするためだよ。

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Event, MouseEvent};

use crate::app::inventory_panel::{lock_panel, PendingDrop, SharedPanel};
use crate::components::point::Point;

type Listener = Closure<dyn FnMut(Event)>;
pub type ListenerSlot = Arc<Mutex<Option<Listener>>>;

/// window に付けたリスナーの置き場。
#[derive(Clone, Default)]
pub struct DragListeners {
    pointermove: ListenerSlot,
    pointerup: ListenerSlot,
    pointercancel: ListenerSlot,
    /// 外したリスナー。自分自身の呼び出し中に drop しないよう、次に付ける時まで取っておく
    retired: Arc<Mutex<Vec<Listener>>>,
}

fn lock_slot<T>(slot: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("Listener slot mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

/// ページ座標。ドロップゾーンもページ座標で測ってもらう。
fn event_point(event: &Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(mouse.page_x() as f32, mouse.page_y() as f32))
}

fn add_listener(slot: &ListenerSlot, name: &str, listener: Listener) -> Result<(), JsValue> {
    let window = window().ok_or("Failed to get window")?;
    window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
    *lock_slot(slot) = Some(listener);
    Ok(())
}

fn remove_listener(slot: &ListenerSlot, name: &str, retired: &mut Vec<Listener>) -> Result<(), JsValue> {
    let Some(listener) = lock_slot(slot).take() else {
        return Ok(());
    };
    let result = match window() {
        Some(window) => window.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref()),
        None => Err(JsValue::from_str("Failed to get window")),
    };
    retired.push(listener);
    result
}

/// 離した位置でドロップを確定させる。消費の結果は非同期で戻ってくる。
/// await の間パネルのロックは持たない。
pub(crate) fn release_pointer(panel: &SharedPanel, point: Point) {
    let pending = lock_panel(panel).pointer_up(point);
    let Some(PendingDrop { generation, future }) = pending else {
        return;
    };
    let panel = Arc::clone(panel);
    spawn_local(async move {
        let consumed = future.await;
        if !lock_panel(&panel).complete_drop(generation, consumed) {
            debug!("release_pointer: result for drag #{} arrived after cancel", generation);
        }
    });
}

/// ドラッグが始まったら呼ぶ。前のリスナーが残っていれば先に外す。
pub(crate) fn attach_drag_listeners(panel: &SharedPanel, listeners: &DragListeners) -> Result<(), JsValue> {
    detach_drag_listeners(listeners)?;
    lock_slot(&listeners.retired).clear();

    let move_panel = Arc::clone(panel);
    let on_move = Closure::wrap(Box::new(move |event: Event| {
        if let Some(point) = event_point(&event) {
            lock_panel(&move_panel).pointer_move(point);
        }
    }) as Box<dyn FnMut(Event)>);
    add_listener(&listeners.pointermove, "pointermove", on_move)?;

    let up_panel = Arc::clone(panel);
    let up_listeners = listeners.clone();
    let on_up = Closure::wrap(Box::new(move |event: Event| {
        match event_point(&event) {
            Some(point) => release_pointer(&up_panel, point),
            None => {
                error!("pointerup without coordinates, cancelling drag");
                lock_panel(&up_panel).pointer_cancel();
            }
        }
        if let Err(e) = detach_drag_listeners(&up_listeners) {
            error!("Error detaching listeners in pointerup: {:?}", e);
        }
    }) as Box<dyn FnMut(Event)>);
    add_listener(&listeners.pointerup, "pointerup", on_up)?;

    let cancel_panel = Arc::clone(panel);
    let cancel_listeners = listeners.clone();
    let on_cancel = Closure::wrap(Box::new(move |_event: Event| {
        lock_panel(&cancel_panel).pointer_cancel();
        if let Err(e) = detach_drag_listeners(&cancel_listeners) {
            error!("Error detaching listeners in pointercancel: {:?}", e);
        }
    }) as Box<dyn FnMut(Event)>);
    add_listener(&listeners.pointercancel, "pointercancel", on_cancel)?;

    debug!("Attached drag listeners");
    Ok(())
}

/// 3つとも外す。付いていなければ何もしない。
pub(crate) fn detach_drag_listeners(listeners: &DragListeners) -> Result<(), JsValue> {
    let mut retired = lock_slot(&listeners.retired);
    remove_listener(&listeners.pointermove, "pointermove", &mut retired)?;
    remove_listener(&listeners.pointerup, "pointerup", &mut retired)?;
    remove_listener(&listeners.pointercancel, "pointercancel", &mut retired)?;
    Ok(())
}
