// src/animation/timeline.rs
//! 名前付きのドライバー値 (0.0 → 1.0) と、それを各チャンネルに写すトラックの組。
//!
//! ドラッグ中アイテムの出入り演出も、パネルのスライドも全部これで表現するよ。
//! `tick(dt)` で時間を進めて、`sample(channel)` で今の値を読む。
//!
//! # Invariants
//!
//! 1. `progress()` は常に 0.0～1.0。
//! 2. 終了後 (`is_finished()`) の各トラックの値はちょうど `to`。
//! 3. 長さ 0 のタイムラインは作った瞬間から終了扱い。

use serde::Serialize;

use crate::animation::easing::Easing;
use crate::components::drag_session::ItemTransform;
use crate::components::point::Point;
use crate::config::layout::{
    CANCELLED_FADE_MS, CONSUMED_MS, DRAG_SCALE, ENTER_FADE_MS, ENTER_SPRING_FRICTION,
    ENTER_TOTAL_MS, PANEL_HIDDEN_OFFSET, PANEL_SLIDE_MS, PANEL_SPRING_FRICTION, REJECTED_MS,
    REJECTED_SPRING_FRICTION,
};

/// どの見た目の値を動かすか。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    Opacity,
    Scale,
    X,
    Y,
    /// パネルの translateY
    PanelOffset,
}

/// タイムラインの名前 (= 何の演出か)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionKind {
    Enter,
    Consumed,
    Rejected,
    Cancelled,
    PanelSlide,
}

/// ドライバーの一部区間 [start, end] を `from` → `to` に写す。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub channel: Channel,
    pub from: f32,
    pub to: f32,
    /// ドライバー上の開始位置 (0.0～1.0)
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Track {
    /// ドライバー全体を使うトラック。
    pub fn full(channel: Channel, from: f32, to: f32, easing: Easing) -> Self {
        Self { channel, from, to, start: 0.0, end: 1.0, easing }
    }

    /// ドライバーの [start, end] だけを使うトラック。
    pub fn window(mut self, start: f32, end: f32) -> Self {
        self.start = start.clamp(0.0, 1.0);
        self.end = end.clamp(self.start, 1.0);
        self
    }

    pub fn value_at(&self, driver: f32) -> f32 {
        let span = self.end - self.start;
        let local = if span <= f32::EPSILON {
            if driver >= self.end { 1.0 } else { 0.0 }
        } else {
            ((driver - self.start) / span).clamp(0.0, 1.0)
        };
        self.from + (self.to - self.from) * self.easing.apply(local)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    kind: TransitionKind,
    duration_ms: f32,
    elapsed_ms: f32,
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new(kind: TransitionKind, duration_ms: f32) -> Self {
        Self {
            kind,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            tracks: Vec::new(),
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// ドライバー値 (0.0～1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// 時間を進める。負の dt は無視。終わったら true を返す。
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
        self.is_finished()
    }

    /// 終点まで一気に進める。
    pub fn finish(&mut self) {
        self.elapsed_ms = self.duration_ms;
    }

    /// そのチャンネルの今の値。トラックがなければ None。
    /// 同じチャンネルに複数トラックがある時は後に追加した方が勝つ。
    pub fn sample(&self, channel: Channel) -> Option<f32> {
        let driver = self.progress();
        self.tracks
            .iter()
            .rev()
            .find(|track| track.channel == channel)
            .map(|track| track.value_at(driver))
    }

    /// トラックがあるチャンネルだけ transform に書き込む。
    pub fn apply_to(&self, transform: &mut ItemTransform) {
        if let Some(opacity) = self.sample(Channel::Opacity) {
            transform.opacity = opacity;
        }
        if let Some(scale) = self.sample(Channel::Scale) {
            transform.scale = scale;
        }
        if let Some(x) = self.sample(Channel::X) {
            transform.position.x = x;
        }
        if let Some(y) = self.sample(Channel::Y) {
            transform.position.y = y;
        }
    }

    // --- ドラッグ演出のプリセット ---

    /// 持ち上げ: 100ms でフェードイン、バネで 1.0 → 1.2 に膨らむ。
    pub fn enter() -> Self {
        Timeline::new(TransitionKind::Enter, ENTER_TOTAL_MS)
            .with_track(
                Track::full(Channel::Opacity, 0.0, 1.0, Easing::Linear)
                    .window(0.0, ENTER_FADE_MS / ENTER_TOTAL_MS),
            )
            .with_track(Track::full(
                Channel::Scale,
                1.0,
                DRAG_SCALE,
                Easing::Spring { friction: ENTER_SPRING_FRICTION },
            ))
    }

    /// 消費成功: その場でフェードアウトしながら縮んで消える。
    pub fn consumed(from: &ItemTransform) -> Self {
        Timeline::new(TransitionKind::Consumed, CONSUMED_MS)
            .with_track(Track::full(Channel::Opacity, from.opacity, 0.0, Easing::Linear))
            .with_track(Track::full(Channel::Scale, from.scale, 0.0, Easing::EaseIn))
    }

    /// 消費失敗: バネで元の位置に戻りつつ、フェードアウトして大きさも戻す。
    pub fn rejected(from: &ItemTransform, origin: Point) -> Self {
        let spring = Easing::Spring { friction: REJECTED_SPRING_FRICTION };
        Timeline::new(TransitionKind::Rejected, REJECTED_MS)
            .with_track(Track::full(Channel::X, from.position.x, origin.x, spring))
            .with_track(Track::full(Channel::Y, from.position.y, origin.y, spring))
            .with_track(Track::full(Channel::Opacity, from.opacity, 0.0, Easing::EaseIn))
            .with_track(Track::full(Channel::Scale, from.scale, 1.0, Easing::EaseOut))
    }

    /// プラットフォームによるキャンセル: 位置は動かさず素早く消すだけ。
    pub fn cancelled(from: &ItemTransform) -> Self {
        Timeline::new(TransitionKind::Cancelled, CANCELLED_FADE_MS)
            .with_track(Track::full(Channel::Opacity, from.opacity, 0.0, Easing::Linear))
    }

    /// パネルの開閉。今の位置から目標まで動かすので、途中で逆向きにしても跳ばない。
    pub fn panel_slide(open: bool, current_offset: f32, current_opacity: f32) -> Self {
        let (offset_to, opacity_to) = if open { (0.0, 1.0) } else { (PANEL_HIDDEN_OFFSET, 0.0) };
        Timeline::new(TransitionKind::PanelSlide, PANEL_SLIDE_MS)
            .with_track(Track::full(
                Channel::PanelOffset,
                current_offset,
                offset_to,
                Easing::Spring { friction: PANEL_SPRING_FRICTION },
            ))
            .with_track(Track::full(Channel::Opacity, current_opacity, opacity_to, Easing::EaseOut))
    }
}
