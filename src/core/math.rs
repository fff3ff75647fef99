//! 数学工具模块
//!
//! 基于 `nalgebra` 的类型别名与模拟中用到的少量工具函数。

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 数学常量
pub mod constants {
    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;

    /// 世界空间的上方向
    pub const UP: [f32; 3] = [0.0, 1.0, 0.0];
}

/// 数学工具函数
pub mod utils {
    use super::Vector3;

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 把值包裹到 `[0, 1)`
    pub fn wrap_unit(value: f32) -> f32 {
        let wrapped = value - value.floor();
        // -0.0 和舍入误差可能产生 1.0
        if wrapped >= 1.0 { 0.0 } else { wrapped }
    }

    /// 归一化，零向量返回 `fallback`
    pub fn normalize_or(v: Vector3, fallback: Vector3) -> Vector3 {
        v.try_normalize(super::constants::EPSILON).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_unit() {
        assert!(utils::approx_eq(utils::wrap_unit(1.25), 0.25, 1e-6));
        assert!(utils::approx_eq(utils::wrap_unit(-0.25), 0.75, 1e-6));
        assert_eq!(utils::wrap_unit(1.0), 0.0);
    }

    #[test]
    fn test_normalize_or() {
        let up = Vector3::new(0.0, 1.0, 0.0);
        let n = utils::normalize_or(Vector3::new(3.0, 4.0, 0.0), up);
        assert!(utils::approx_eq(n.norm(), 1.0, 1e-6));
        assert_eq!(utils::normalize_or(Vector3::zeros(), up), up);
    }
}
