// src/components/point.rs

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// スクリーン上の座標 (x, y) だよ！📍
///
/// ポインタイベントの座標も、ドラッグ中アイテムの描画位置も、
/// ドロップゾーンの矩形も、全部この同じ座標系 (ページ絶対座標) で扱うよ。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 2点の線形補間。t=0 で self、t=1 で other。
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
