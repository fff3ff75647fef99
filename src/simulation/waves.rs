//! 波浪高度场
//!
//! 在固定尺寸网格上用有限差分近似带阻尼的二维波动方程：
//!
//! ```text
//! next[i,j] = k1 * prev[i,j] + k2 * curr[i,j]
//!           + k3 * (curr[i+1,j] + curr[i-1,j] + curr[i,j+1] + curr[i,j-1])
//! ```
//!
//! 边界行列的高度恒为 0（Dirichlet 边界）。三个高度缓冲区按索引轮换角色，
//! 积分过程中不复制也不重新分配。
//!
//! # 使用示例
//!
//! ```
//! use dist_waves::simulation::WaveField;
//!
//! let mut waves = WaveField::new(17, 17, 1.0, 0.03, 3.25, 0.4)?;
//! waves.disturb(8, 8, 1.0)?;
//! waves.update(0.03)?;
//!
//! for i in 0..waves.vertex_count() {
//!     let _p = waves.position(i);
//!     let _n = waves.normal(i);
//! }
//! # Ok::<(), dist_waves::core::DistWavesError>(())
//! ```

use crate::core::config::WaveConfig;
use crate::core::error::{Result, SimulationError};
use crate::core::math::{utils::normalize_or, Vector3};
use crate::{sim_debug, sim_warn};

/// 波浪高度场
///
/// 独占所有缓冲区，调用者只能拿到只读视图。
/// `disturb` 与 `update` 需要 `&mut self`，因此读取顶点数据与积分不可能并发发生。
#[derive(Debug, Clone)]
pub struct WaveField {
    rows: usize,
    cols: usize,
    spatial_step: f32,
    time_step: f32,

    // 有限差分系数
    k1: f32,
    k2: f32,
    k3: f32,

    /// 尚未消耗的时间
    accumulator: f32,

    /// 三个高度缓冲区，`current` 指向当前解；
    /// 上一步解位于 `(current + 2) % 3`，下一步写入 `(current + 1) % 3`
    heights: [Vec<f32>; 3],
    current: usize,

    positions: Vec<Vector3>,
    normals: Vec<Vector3>,
    tangents: Vec<Vector3>,
}

impl WaveField {
    /// 创建高度场
    ///
    /// # 参数
    ///
    /// - `rows`, `cols`: 网格尺寸，必须都大于 2
    /// - `spatial_step`: 相邻采样点间距
    /// - `time_step`: 每个内部积分步的时长
    /// - `speed`: 波速
    /// - `damping`: 阻尼系数
    ///
    /// # 错误
    ///
    /// 尺寸过小、参数非有限值、或 `speed²·dt²/dx² > 0.5`（积分发散）时返回
    /// `ConfigError::InvalidValue`。
    pub fn new(
        rows: usize,
        cols: usize,
        spatial_step: f32,
        time_step: f32,
        speed: f32,
        damping: f32,
    ) -> Result<Self> {
        Self::from_config(&WaveConfig {
            rows,
            cols,
            spatial_step,
            time_step,
            speed,
            damping,
        })
    }

    /// 从配置创建高度场
    pub fn from_config(config: &WaveConfig) -> Result<Self> {
        config.validate()?;

        let WaveConfig {
            rows,
            cols,
            spatial_step,
            time_step,
            damping,
            ..
        } = *config;

        let e = config.courant_squared();
        let d = damping * time_step + 2.0;
        let k1 = (damping * time_step - 2.0) / d;
        let k2 = (4.0 - 8.0 * e) / d;
        let k3 = (2.0 * e) / d;

        let count = rows * cols;
        let mut field = Self {
            rows,
            cols,
            spatial_step,
            time_step,
            k1,
            k2,
            k3,
            accumulator: 0.0,
            heights: [vec![0.0; count], vec![0.0; count], vec![0.0; count]],
            current: 0,
            positions: Vec::with_capacity(count),
            normals: vec![Vector3::y(); count],
            tangents: vec![Vector3::x(); count],
        };
        field.positions = field.planar_positions();

        sim_debug!(rows, cols, spatial_step, time_step, k1, k2, k3, "Wave field created");

        Ok(field)
    }

    /// 以原点为中心的平面采样坐标，y 为 0
    fn planar_positions(&self) -> Vec<Vector3> {
        let half_width = 0.5 * self.width();
        let half_depth = 0.5 * self.depth();

        (0..self.rows)
            .flat_map(|i| {
                let z = half_depth - i as f32 * self.spatial_step;
                (0..self.cols).map(move |j| (j, z))
            })
            .map(|(j, z)| Vector3::new(-half_width + j as f32 * self.spatial_step, 0.0, z))
            .collect()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.rows * self.cols
    }

    /// 三角形数量，每个网格四边形两个
    #[inline]
    pub fn triangle_count(&self) -> usize {
        2 * (self.rows - 1) * (self.cols - 1)
    }

    /// x 方向总宽度 `(cols-1) * spatial_step`
    #[inline]
    pub fn width(&self) -> f32 {
        (self.cols - 1) as f32 * self.spatial_step
    }

    /// z 方向总深度 `(rows-1) * spatial_step`
    #[inline]
    pub fn depth(&self) -> f32 {
        (self.rows - 1) as f32 * self.spatial_step
    }

    #[inline]
    pub fn spatial_step(&self) -> f32 {
        self.spatial_step
    }

    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// 有限差分系数 `(k1, k2, k3)`
    pub fn coefficients(&self) -> (f32, f32, f32) {
        (self.k1, self.k2, self.k3)
    }

    /// 扁平索引 `i = row * cols + col` 处的位置
    #[inline]
    pub fn position(&self, i: usize) -> &Vector3 {
        &self.positions[i]
    }

    /// 扁平索引处的单位法线
    #[inline]
    pub fn normal(&self, i: usize) -> &Vector3 {
        &self.normals[i]
    }

    /// 扁平索引处沿 +x 方向的单位切线
    #[inline]
    pub fn tangent_x(&self, i: usize) -> &Vector3 {
        &self.tangents[i]
    }

    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// 当前时刻的高度缓冲区
    pub fn heights(&self) -> &[f32] {
        &self.heights[self.current]
    }

    /// 当前时刻 `(row, col)` 处的高度
    #[inline]
    pub fn height(&self, row: usize, col: usize) -> f32 {
        self.heights[self.current][row * self.cols + col]
    }

    /// 当前高度绝对值的最大值
    pub fn max_abs_height(&self) -> f32 {
        self.heights().iter().fold(0.0_f32, |acc, h| acc.max(h.abs()))
    }

    #[inline]
    fn is_interior(&self, row: usize, col: usize) -> bool {
        (1..self.rows - 1).contains(&row) && (1..self.cols - 1).contains(&col)
    }

    /// 在内部采样点 `(row, col)` 注入一个局部脉冲
    ///
    /// 中心加 `magnitude`，上下左右四个相邻点各加 `magnitude / 2`；
    /// 相邻点位于边界时不写入。
    /// 同样的增量也加到上一步缓冲区，使脉冲以零初速度开始传播。
    /// 位置和法线在下一次 `update` 时刷新。
    ///
    /// # 错误
    ///
    /// - `row` 不在 `[1, rows-2]` 或 `col` 不在 `[1, cols-2]`：`SimulationError::DisturbOutOfRange`
    /// - `magnitude` 不是有限值：`SimulationError::InvalidMagnitude`
    ///
    /// 出错时不修改任何缓冲区。
    pub fn disturb(&mut self, row: usize, col: usize, magnitude: f32) -> Result<()> {
        if !self.is_interior(row, col) {
            let err = SimulationError::DisturbOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            };
            sim_warn!(%err, "Rejected disturb");
            return Err(err.into());
        }

        if !magnitude.is_finite() {
            sim_warn!(magnitude, "Rejected disturb with non-finite magnitude");
            return Err(SimulationError::InvalidMagnitude(magnitude).into());
        }

        let n = self.cols;
        let center = row * n + col;
        let half = 0.5 * magnitude;
        let prev = (self.current + 2) % 3;

        // 落在边界上的相邻点跳过，边界高度必须保持为 0
        let neighbors = [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
            .map(|(r, c)| self.is_interior(r, c).then_some(r * n + c));

        for buffer in [self.current, prev] {
            let h = &mut self.heights[buffer];
            h[center] += magnitude;
            for &idx in neighbors.iter().flatten() {
                h[idx] += half;
            }
        }

        Ok(())
    }

    /// 推进模拟
    ///
    /// `dt` 累加到内部时间；每累计满一个 `time_step` 做一次积分并轮换缓冲区，
    /// 剩余的不足一步的时间留到下次调用。之后刷新所有位置的 y 分量、法线和切线。
    ///
    /// 返回本次执行的积分步数。
    ///
    /// # 错误
    ///
    /// `dt` 为负或不是有限值时返回 `SimulationError::InvalidTimeStep`，不修改任何状态。
    pub fn update(&mut self, dt: f32) -> Result<usize> {
        if !(dt.is_finite() && dt >= 0.0) {
            sim_warn!(dt, "Rejected update");
            return Err(SimulationError::InvalidTimeStep(dt).into());
        }

        self.accumulator += dt;

        // 步数一次算出；逐步相减在累计值很大时会因舍入停滞
        let steps = (self.accumulator / self.time_step).floor() as usize;
        for _ in 0..steps {
            self.step();
        }
        self.accumulator = (self.accumulator - steps as f32 * self.time_step).max(0.0);

        self.refresh_surface();

        if steps > 0 {
            tracing::trace!(target: "distwaves::sim", steps, leftover = self.accumulator, "Wave field advanced");
        }

        Ok(steps)
    }

    /// 单个积分步：写入下一缓冲区的内部采样点，然后轮换
    fn step(&mut self) {
        let n = self.cols;
        let next_index = (self.current + 1) % 3;
        let prev_index = (self.current + 2) % 3;

        // 下一缓冲区就是过期的上上步解，边界始终为 0，只覆盖内部
        let mut next = std::mem::take(&mut self.heights[next_index]);
        let prev = &self.heights[prev_index];
        let curr = &self.heights[self.current];

        for i in 1..self.rows - 1 {
            for j in 1..n - 1 {
                let idx = i * n + j;
                next[idx] = self.k1 * prev[idx]
                    + self.k2 * curr[idx]
                    + self.k3 * (curr[idx + n] + curr[idx - n] + curr[idx + 1] + curr[idx - 1]);
            }
        }

        self.heights[next_index] = next;
        self.current = next_index;
    }

    /// 由当前高度重算位置、法线和切线
    ///
    /// 使用中心差分；边缘处把越界的邻居钳制到自身，退化为单侧差分。
    fn refresh_surface(&mut self) {
        let (m, n) = (self.rows, self.cols);
        let dx = self.spatial_step;
        let h = &self.heights[self.current];

        for i in 0..m {
            let top = i.saturating_sub(1);
            let bottom = (i + 1).min(m - 1);
            // 行号增大时 z 减小
            let span_z = (bottom - top) as f32 * dx;

            for j in 0..n {
                let left = j.saturating_sub(1);
                let right = (j + 1).min(n - 1);
                let span_x = (right - left) as f32 * dx;

                let idx = i * n + j;
                let dhdx = (h[i * n + right] - h[i * n + left]) / span_x;
                let dhdz = (h[top * n + j] - h[bottom * n + j]) / span_z;

                self.positions[idx].y = h[idx];
                self.normals[idx] = normalize_or(Vector3::new(-dhdx, 1.0, -dhdz), Vector3::y());
                self.tangents[idx] = normalize_or(Vector3::new(1.0, dhdx, 0.0), Vector3::x());
            }
        }
    }

    /// 清零所有高度与累计时间，恢复平面
    pub fn reset(&mut self) {
        for buffer in self.heights.iter_mut() {
            buffer.fill(0.0);
        }
        self.accumulator = 0.0;
        self.current = 0;

        for p in self.positions.iter_mut() {
            p.y = 0.0;
        }
        self.normals.fill(Vector3::y());
        self.tangents.fill(Vector3::x());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::utils::approx_eq;

    fn small_field() -> WaveField {
        WaveField::new(17, 17, 1.0, 0.03, 3.25, 0.4).unwrap()
    }

    #[test]
    fn test_rejects_small_grid() {
        assert!(WaveField::new(2, 10, 1.0, 0.03, 4.0, 0.2).is_err());
        assert!(WaveField::new(10, 2, 1.0, 0.03, 4.0, 0.2).is_err());
        assert!(WaveField::new(3, 3, 1.0, 0.03, 4.0, 0.2).is_ok());
    }

    #[test]
    fn test_rejects_unstable_parameters() {
        // e = (25 * 0.03)^2 = 0.5625
        assert!(WaveField::new(8, 8, 1.0, 0.03, 25.0, 0.2).is_err());
        // e = (23 * 0.03)^2 = 0.4761
        assert!(WaveField::new(8, 8, 1.0, 0.03, 23.0, 0.2).is_ok());
    }

    #[test]
    fn test_coefficient_identity() {
        let field = small_field();
        let (k1, k2, k3) = field.coefficients();
        assert!(approx_eq(k1 + k2 + 4.0 * k3, 1.0, 1e-6));
        assert!(k1 < 0.0 && k2 > 0.0 && k3 > 0.0);
    }

    #[test]
    fn test_initial_state() {
        let field = small_field();

        assert_eq!(field.vertex_count(), 289);
        assert_eq!(field.triangle_count(), 512);
        assert_eq!(field.width(), 16.0);
        assert_eq!(field.depth(), 16.0);
        assert!(field.heights().iter().all(|&h| h == 0.0));
        assert!(field.normals().iter().all(|n| *n == Vector3::y()));

        // 第 0 行位于 +z，第 0 列位于 -x
        assert_eq!(*field.position(0), Vector3::new(-8.0, 0.0, 8.0));
        assert_eq!(*field.position(288), Vector3::new(8.0, 0.0, -8.0));
        assert_eq!(*field.position(8 * 17 + 8), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_reuses_buffers() {
        let mut field = small_field();
        let ptrs: Vec<*const f32> = field.heights.iter().map(|b| b.as_ptr()).collect();

        field.disturb(8, 8, 1.0).unwrap();
        let steps = field.update(0.03 * 4.0 + 0.001).unwrap();
        assert_eq!(steps, 4);
        assert_eq!(field.current, 1);

        let after: Vec<*const f32> = field.heights.iter().map(|b| b.as_ptr()).collect();
        assert_eq!(ptrs, after);
    }

    #[test]
    fn test_sub_step_dt_only_accumulates() {
        let mut field = small_field();
        field.disturb(8, 8, 1.0).unwrap();

        assert_eq!(field.update(0.01).unwrap(), 0);
        assert_eq!(field.height(8, 8), 1.0);
        // 没有积分，但表面已经反映了扰动
        assert_eq!(field.position(8 * 17 + 8).y, 1.0);
    }

    #[test]
    fn test_normals_tilt_away_from_peak() {
        let mut field = small_field();
        field.disturb(8, 8, 1.0).unwrap();
        field.update(0.03).unwrap();

        let center = field.normal(8 * 17 + 8);
        assert!(approx_eq(center.x, 0.0, 1e-6));
        assert!(approx_eq(center.z, 0.0, 1e-6));

        // 峰值右侧的表面向 +x 倾斜，上方一行（+z）向 +z 倾斜
        assert!(field.normal(8 * 17 + 9).x > 0.0);
        assert!(field.normal(7 * 17 + 8).z > 0.0);

        for n in field.normals() {
            assert!(approx_eq(n.norm(), 1.0, 1e-5));
        }
        for i in 0..field.vertex_count() {
            assert!(approx_eq(field.tangent_x(i).norm(), 1.0, 1e-5));
            assert!(approx_eq(field.tangent_x(i).dot(field.normal(i)), 0.0, 1e-5));
        }
    }

    #[test]
    fn test_disturb_next_to_edge_skips_boundary() {
        let mut field = WaveField::new(5, 5, 1.0, 0.03, 4.0, 0.2).unwrap();
        field.disturb(1, 2, 1.0).unwrap();

        assert_eq!(field.height(1, 2), 1.0);
        assert_eq!(field.height(2, 2), 0.5);
        assert_eq!(field.height(1, 1), 0.5);
        assert_eq!(field.height(1, 3), 0.5);
        assert_eq!(field.height(0, 2), 0.0);

        for _ in 0..6 {
            field.update(0.03).unwrap();
            assert_eq!(field.height(0, 2), 0.0);
        }
    }

    #[test]
    fn test_large_dt_runs_to_completion() {
        // 2^19 处 f32 的间隔为 0.0625，逐步减去 0.03 不会改变累计值
        let mut field = WaveField::new(3, 3, 1.0, 0.03, 4.0, 0.2).unwrap();
        field.disturb(1, 1, 1.0).unwrap();

        let dt = 524_288.0_f32;
        let steps = field.update(dt).unwrap();
        let expected = (dt / 0.03).floor() as usize;

        assert_eq!(steps, expected);
        assert!(field.accumulator >= 0.0 && field.accumulator < 1.0);
        assert!(field.heights().iter().all(|h| h.is_finite()));
        assert_eq!(field.height(0, 1), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut field = small_field();
        field.disturb(8, 8, 1.0).unwrap();
        field.update(0.1).unwrap();
        field.reset();

        assert_eq!(field.max_abs_height(), 0.0);
        assert!(field.positions().iter().all(|p| p.y == 0.0));
        assert_eq!(field.update(0.02).unwrap(), 0);
    }
}
