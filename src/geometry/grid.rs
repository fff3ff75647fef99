//! 平面网格生成
//!
//! 行 `i` 沿 -z 方向排列，列 `j` 沿 +x 方向排列，采样点 `(i, j)` 的扁平索引为 `i * n + j`。
//! 水面模拟与地形网格共用这一布局。

use super::mesh::MeshData;
use super::vertex::Vertex;
use crate::core::math::constants::UP;

/// 为 `rows x cols` 的网格生成三角形列表索引
///
/// 每个四边形拆成两个三角形：
///
/// ```text
/// (i,j) ---- (i,j+1)
///   |      /    |
///   |    /      |
/// (i+1,j) -- (i+1,j+1)
/// ```
///
/// 返回 `6 * (rows-1) * (cols-1)` 个索引。行或列少于 2 时返回空数组。
pub fn grid_indices(rows: usize, cols: usize) -> Vec<u32> {
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(6 * (rows - 1) * (cols - 1));
    let n = cols as u32;

    for i in 0..(rows as u32 - 1) {
        for j in 0..(n - 1) {
            indices.extend_from_slice(&[
                i * n + j,
                i * n + j + 1,
                (i + 1) * n + j,
                (i + 1) * n + j,
                i * n + j + 1,
                (i + 1) * n + j + 1,
            ]);
        }
    }

    indices
}

/// 创建以原点为中心、位于 xz 平面的网格
///
/// # 参数
///
/// - `width`: x 方向总宽度
/// - `depth`: z 方向总深度
/// - `m`: 行数（z 方向采样数），至少为 2
/// - `n`: 列数（x 方向采样数），至少为 2
///
/// 纹理坐标从 `(0, 0)` 拉伸到 `(1, 1)` 覆盖整个网格。
pub fn create_grid(width: f32, depth: f32, m: usize, n: usize) -> MeshData {
    let mut mesh = MeshData::with_capacity(m * n, 6 * m.saturating_sub(1) * n.saturating_sub(1));
    if m < 2 || n < 2 {
        return mesh;
    }

    let half_width = 0.5 * width;
    let half_depth = 0.5 * depth;

    let dx = width / (n - 1) as f32;
    let dz = depth / (m - 1) as f32;
    let du = 1.0 / (n - 1) as f32;
    let dv = 1.0 / (m - 1) as f32;

    for i in 0..m {
        let z = half_depth - i as f32 * dz;
        for j in 0..n {
            let x = -half_width + j as f32 * dx;
            mesh.vertices.push(Vertex::new(
                [x, 0.0, z],
                UP,
                [j as f32 * du, i as f32 * dv],
            ));
        }
    }

    mesh.indices = grid_indices(m, n);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indices_count_and_range() {
        let indices = grid_indices(4, 5);
        assert_eq!(indices.len(), 6 * 3 * 4);
        assert!(indices.iter().all(|&i| i < 20));

        // 第一个四边形
        assert_eq!(&indices[..6], &[0, 1, 5, 5, 1, 6]);
    }

    #[test]
    fn test_grid_indices_degenerate() {
        assert!(grid_indices(1, 10).is_empty());
        assert!(grid_indices(10, 0).is_empty());
    }

    #[test]
    fn test_create_grid_extent() {
        let mesh = create_grid(10.0, 4.0, 3, 6);

        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.triangle_count(), 2 * 2 * 5);
        assert!(mesh.validate().is_ok());

        let first = mesh.vertices[0];
        let last = mesh.vertices[17];
        assert_eq!(first.position, [-5.0, 0.0, 2.0]);
        assert_eq!(last.position, [5.0, 0.0, -2.0]);
        assert_eq!(first.texcoord, [0.0, 0.0]);
        assert_eq!(last.texcoord, [1.0, 1.0]);
    }
}
