//! 水面材质的纹理滚动

use crate::core::math::utils::wrap_unit;

/// 纹理坐标偏移动画
///
/// 每帧按速度平移材质的纹理坐标，偏移量保持在 `[0, 1)`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureScroll {
    offset: [f32; 2],
    velocity: [f32; 2],
}

impl Default for TextureScroll {
    fn default() -> Self {
        Self::new([0.1, 0.02])
    }
}

impl TextureScroll {
    pub fn new(velocity: [f32; 2]) -> Self {
        Self {
            offset: [0.0, 0.0],
            velocity,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.offset[0] = wrap_unit(self.offset[0] + self.velocity[0] * dt);
        self.offset[1] = wrap_unit(self.offset[1] + self.velocity[1] * dt);
    }

    /// 当前偏移 `(tu, tv)`，写入材质变换矩阵的平移分量
    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::utils::approx_eq;

    #[test]
    fn test_scroll_wraps() {
        let mut scroll = TextureScroll::default();
        for _ in 0..1000 {
            scroll.advance(1.0 / 60.0);
            let [u, v] = scroll.offset();
            assert!((0.0..1.0).contains(&u));
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_scroll_rate() {
        let mut scroll = TextureScroll::default();
        scroll.advance(2.0);
        let [u, v] = scroll.offset();
        assert!(approx_eq(u, 0.2, 1e-6));
        assert!(approx_eq(v, 0.04, 1e-6));
    }
}
