//! 水面周围的丘陵地形
//!
//! 地形高度由解析函数 `h(x, z) = 0.3 * (z * sin(0.1x) + x * cos(0.1z))` 给出，
//! 法线取 `(-∂h/∂x, 1, -∂h/∂z)` 归一化。

use super::grid::create_grid;
use super::mesh::MeshData;

/// 地形高度
pub fn hills_height(x: f32, z: f32) -> f32 {
    0.3 * (z * (0.1 * x).sin() + x * (0.1 * z).cos())
}

/// 地形单位法线
pub fn hills_normal(x: f32, z: f32) -> [f32; 3] {
    let n = [
        -0.03 * z * (0.1 * x).cos() - 0.3 * (0.1 * z).cos(),
        1.0,
        -0.3 * (0.1 * x).sin() + 0.03 * x * (0.1 * z).sin(),
    ];

    // y 分量恒为 1，长度不会为零
    let inv_len = 1.0 / (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    [n[0] * inv_len, n[1] * inv_len, n[2] * inv_len]
}

/// 构建地形网格
///
/// 在 `create_grid` 生成的平面上逐顶点应用高度函数与法线。
pub fn build_land_mesh(width: f32, depth: f32, m: usize, n: usize) -> MeshData {
    let mut mesh = create_grid(width, depth, m, n);
    mesh.name = Some("land".to_string());

    for v in mesh.vertices.iter_mut() {
        let [x, _, z] = v.position;
        v.position[1] = hills_height(x, z);
        v.normal = hills_normal(x, z);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::utils::approx_eq;

    #[test]
    fn test_hills_height_origin() {
        assert_eq!(hills_height(0.0, 0.0), 0.0);
        assert!(approx_eq(hills_height(10.0, 0.0), 3.0, 1e-5));
    }

    #[test]
    fn test_hills_normal_matches_finite_difference() {
        let (x, z) = (12.0, -7.5);
        let h = 1e-2;
        let dhdx = (hills_height(x + h, z) - hills_height(x - h, z)) / (2.0 * h);
        let dhdz = (hills_height(x, z + h) - hills_height(x, z - h)) / (2.0 * h);
        let len = (dhdx * dhdx + 1.0 + dhdz * dhdz).sqrt();

        let n = hills_normal(x, z);
        assert!(approx_eq(n[0], -dhdx / len, 1e-3));
        assert!(approx_eq(n[1], 1.0 / len, 1e-3));
        assert!(approx_eq(n[2], -dhdz / len, 1e-3));
    }

    #[test]
    fn test_land_mesh_normals_are_unit() {
        let mesh = build_land_mesh(160.0, 160.0, 50, 50);

        assert_eq!(mesh.vertex_count(), 2500);
        assert!(mesh.indices16().is_ok());
        for v in &mesh.vertices {
            let len = (v.normal[0] * v.normal[0] + v.normal[1] * v.normal[1] + v.normal[2] * v.normal[2]).sqrt();
            assert!(approx_eq(len, 1.0, 1e-5));
            assert!(approx_eq(v.position[1], hills_height(v.position[0], v.position[2]), 1e-5));
        }
    }
}
