// src/components/drop_zone.rs

use serde::{Deserialize, Serialize};

use crate::components::point::Point;

/// アイテムを落とせる矩形エリア (= 庭の表示範囲) だよ。🌳
///
/// 値を決めるのは庭のレイアウトを知っている画面側で、リサイズのたびに作り直して
/// パネルに渡し直す。ドラッグ処理からは読むだけ。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DropZone {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl DropZone {
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self { top, bottom, left, right }
    }

    /// `point` がゾーン内 (境界を含む) にあるかどうか。
    ///
    /// `point` とゾーンは同じ絶対座標系であること。ここではチェックしない。
    pub fn is_hit(&self, point: Point) -> bool {
        self.left <= point.x && point.x <= self.right && self.top <= point.y && point.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn garden() -> DropZone {
        DropZone::new(100.0, 300.0, 50.0, 250.0)
    }

    #[test]
    fn inside_points_hit() {
        let zone = garden();
        assert!(zone.is_hit(Point::new(150.0, 200.0)));
        assert!(zone.is_hit(Point::new(51.0, 101.0)));
        assert!(zone.is_hit(Point::new(249.9, 299.9)));
    }

    #[test]
    fn boundary_points_hit() {
        let zone = garden();
        assert!(zone.is_hit(Point::new(50.0, 100.0)), "左上の角");
        assert!(zone.is_hit(Point::new(250.0, 300.0)), "右下の角");
        assert!(zone.is_hit(Point::new(50.0, 200.0)));
        assert!(zone.is_hit(Point::new(150.0, 300.0)));
    }

    #[test]
    fn any_coordinate_outside_misses() {
        let zone = garden();
        assert!(!zone.is_hit(Point::new(10.0, 10.0)));
        assert!(!zone.is_hit(Point::new(49.99, 200.0)));
        assert!(!zone.is_hit(Point::new(250.01, 200.0)));
        assert!(!zone.is_hit(Point::new(150.0, 99.99)));
        assert!(!zone.is_hit(Point::new(150.0, 300.01)));
    }

    #[test]
    fn hit_test_is_repeatable() {
        let zone = garden();
        let p = Point::new(250.0, 99.0);
        let first = zone.is_hit(p);
        for _ in 0..10 {
            assert_eq!(zone.is_hit(p), first);
        }
        assert_eq!(zone.width(), 200.0);
        assert_eq!(zone.height(), 200.0);
        println!("DropZone テスト、成功！🎉");
    }
}
