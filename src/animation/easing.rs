// src/animation/easing.rs
//! 0.0～1.0 の進み具合を、見た目用のカーブに変換するイージング関数たち。

use std::f32::consts::PI;

/// トラックごとのイージング。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// 減衰振動するバネ。`friction` が大きいほど早く落ち着く。
    /// 少しだけ目標を行き過ぎてから戻ってくるのが特徴だよ。🌀
    Spring { friction: f32 },
}

impl Easing {
    /// `t` (0.0～1.0 に丸められる) を変換する。
    /// どのカーブも t=0 で 0.0、t=1 でちょうど 1.0 を返す。
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Spring { friction } => {
                if t >= 1.0 {
                    return 1.0;
                }
                // 閉じた式のバネ: 指数で減衰しつつ 1.5 往復する
                let decay = (-2.0 * friction.max(0.0) * t).exp();
                1.0 - decay * (3.0 * PI * t).cos()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::Spring { friction: 3.0 },
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
            // 範囲外は丸められる
            assert_eq!(easing.apply(2.0), 1.0);
            assert!(easing.apply(-1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn spring_overshoots_and_friction_damps_it() {
        let loose = Easing::Spring { friction: 1.0 };
        let stiff = Easing::Spring { friction: 5.0 };
        // cos(3πt) が -1 になる t=1/3 あたりで行き過ぎる
        assert!(loose.apply(1.0 / 3.0) > 1.0);
        assert!(stiff.apply(1.0 / 3.0) > 1.0);
        assert!(loose.apply(1.0 / 3.0) > stiff.apply(1.0 / 3.0));
    }

    #[test]
    fn ease_in_and_out_are_monotonic() {
        let mut prev_in = 0.0;
        let mut prev_out = 0.0;
        for i in 1..=10 {
            let t = i as f32 / 10.0;
            let v_in = Easing::EaseIn.apply(t);
            let v_out = Easing::EaseOut.apply(t);
            assert!(v_in >= prev_in);
            assert!(v_out >= prev_out);
            assert!(v_out >= v_in);
            prev_in = v_in;
            prev_out = v_out;
        }
    }
}
