//! 波浪驱动
//!
//! 每帧的固定流程：按时间间隔在随机内部采样点注入扰动，调用一次
//! `WaveField::update`，再把位置、法线和由位置推导的纹理坐标写入顶点数组，
//! 供渲染器上传到动态顶点缓冲区。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::animation::TextureScroll;
use super::waves::WaveField;
use crate::core::config::DisturbConfig;
use crate::core::error::Result;
use crate::core::math::Vector2;
use crate::geometry::{grid_indices, MeshData, Vertex};

/// 单帧统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStats {
    /// 本帧注入的扰动次数
    pub disturbances: usize,
    /// 本帧执行的积分步数
    pub steps: usize,
    /// 更新后的最大高度绝对值
    pub max_height: f32,
}

/// 波浪驱动
pub struct WaveDriver {
    field: WaveField,
    config: DisturbConfig,
    rng: StdRng,
    /// 距上次扰动经过的时间
    since_disturb: f32,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    scroll: TextureScroll,
}

impl WaveDriver {
    /// 创建驱动
    ///
    /// `seed` 为 `None` 时使用系统熵，否则扰动序列完全可复现。
    pub fn new(field: WaveField, config: DisturbConfig, seed: Option<u64>) -> Result<Self> {
        config.validate_for(field.row_count(), field.column_count())?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let indices = grid_indices(field.row_count(), field.column_count());
        let mut driver = Self {
            vertices: vec![Vertex::default(); field.vertex_count()],
            field,
            config,
            rng,
            since_disturb: 0.0,
            indices,
            scroll: TextureScroll::default(),
        };
        driver.refill_vertices();

        Ok(driver)
    }

    /// 推进一帧
    pub fn tick(&mut self, dt: f32) -> Result<TickStats> {
        let mut disturbances = 0;
        // dt 的合法性由 update 检查，这里只避免负值触发扰动
        if dt.is_finite() && dt >= 0.0 {
            let interval = self.config.interval;
            self.since_disturb += dt;
            disturbances = (self.since_disturb / interval).floor() as usize;
            self.since_disturb = (self.since_disturb - disturbances as f32 * interval).max(0.0);
            for _ in 0..disturbances {
                self.random_disturb()?;
            }
        }

        let steps = self.field.update(dt)?;
        self.scroll.advance(dt);
        self.refill_vertices();

        Ok(TickStats {
            disturbances,
            steps,
            max_height: self.field.max_abs_height(),
        })
    }

    fn random_disturb(&mut self) -> Result<()> {
        let margin = self.config.margin;
        let row = self
            .rng
            .gen_range(margin..=self.field.row_count() - 1 - margin);
        let col = self
            .rng
            .gen_range(margin..=self.field.column_count() - 1 - margin);
        let magnitude = self
            .rng
            .gen_range(self.config.magnitude_min..=self.config.magnitude_max);

        tracing::trace!(target: "distwaves::driver", row, col, magnitude, "Random disturb");
        self.field.disturb(row, col, magnitude)
    }

    /// 纹理坐标把 `[-w/2, w/2]` 映射到 `[0, 1]`：`u = 0.5 + x/w`，`v = 0.5 - z/d`
    fn refill_vertices(&mut self) {
        let width = self.field.width();
        let depth = self.field.depth();

        for (i, v) in self.vertices.iter_mut().enumerate() {
            let p = self.field.position(i);
            let texcoord = Vector2::new(0.5 + p.x / width, 0.5 - p.z / depth);
            *v = Vertex::from_vectors(p, self.field.normal(i), texcoord);
        }
    }

    /// 最近一次 `tick` 之后的顶点数据
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// 水面网格的三角形列表索引，构造时生成一次
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// 当前帧水面网格的快照
    pub fn mesh(&self) -> MeshData {
        MeshData {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
            name: Some("waves".to_string()),
        }
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    pub fn texture_scroll(&self) -> &TextureScroll {
        &self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::utils::approx_eq;

    fn driver(seed: u64) -> WaveDriver {
        let field = WaveField::new(33, 33, 1.0, 0.03, 4.0, 0.2).unwrap();
        WaveDriver::new(field, DisturbConfig::default(), Some(seed)).unwrap()
    }

    #[test]
    fn test_rejects_margin_too_large() {
        let field = WaveField::new(8, 8, 1.0, 0.03, 4.0, 0.2).unwrap();
        let config = DisturbConfig { margin: 4, ..DisturbConfig::default() };
        assert!(WaveDriver::new(field, config, Some(1)).is_err());
    }

    #[test]
    fn test_disturb_interval() {
        let mut driver = driver(1);

        // 0.25 秒间隔，0.125 秒一帧：每两帧触发一次
        let counts: Vec<usize> = (0..5)
            .map(|_| driver.tick(0.125).unwrap().disturbances)
            .collect();
        assert_eq!(counts, vec![0, 1, 0, 1, 0]);

        // 一帧跨过多个间隔时补齐所有扰动
        assert_eq!(driver.tick(0.75).unwrap().disturbances, 3);
    }

    #[test]
    fn test_long_tick_catches_up() {
        let field = WaveField::new(9, 9, 1.0, 0.5, 1.0, 0.2).unwrap();
        let config = DisturbConfig { margin: 1, ..DisturbConfig::default() };
        let mut driver = WaveDriver::new(field, config, Some(6)).unwrap();

        // 一帧 100 秒：400 次扰动，200 个积分步，不留余量
        let stats = driver.tick(100.0).unwrap();
        assert_eq!(stats.disturbances, 400);
        assert_eq!(stats.steps, 200);
        assert_eq!(driver.since_disturb, 0.0);

        assert_eq!(driver.tick(0.125).unwrap().disturbances, 0);
        assert_eq!(driver.tick(0.125).unwrap().disturbances, 1);
    }

    #[test]
    fn test_texcoords_span_unit_square() {
        let driver = driver(2);
        let vertices = driver.vertices();

        assert_eq!(vertices.len(), 33 * 33);
        assert!(approx_eq(vertices[0].texcoord[0], 0.0, 1e-6));
        assert!(approx_eq(vertices[0].texcoord[1], 0.0, 1e-6));
        let last = vertices[vertices.len() - 1];
        assert!(approx_eq(last.texcoord[0], 1.0, 1e-6));
        assert!(approx_eq(last.texcoord[1], 1.0, 1e-6));
    }

    #[test]
    fn test_vertices_follow_field() {
        let mut driver = driver(3);
        for _ in 0..30 {
            driver.tick(1.0 / 60.0).unwrap();
        }

        let field = driver.field();
        for (i, v) in driver.vertices().iter().enumerate() {
            assert_eq!(v.position[1], field.position(i).y);
            assert_eq!(v.normal[1], field.normal(i).y);
        }
        assert!(driver.field().max_abs_height() > 0.0);
    }

    #[test]
    fn test_mesh_snapshot_is_valid() {
        let driver = driver(4);
        let mesh = driver.mesh();

        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.triangle_count(), driver.field().triangle_count());
        assert!(mesh.indices16().is_ok());
    }
}
