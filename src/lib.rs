//! DistWaves - 波浪高度场模拟
//!
//! 为 DistRender 的水面演示提供 CPU 侧的波浪模拟：固定尺寸网格上的
//! 二维波动方程有限差分积分、局部扰动，以及每帧供渲染器上传的顶点数据。
//!
//! # 模块结构
//!
//! - `core`: 数学、日志、配置、错误处理
//! - `geometry`: 顶点、网格容器、平面网格与地形
//! - `simulation`: 高度场、驱动、纹理动画
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_waves::core::DisturbConfig;
//! use dist_waves::simulation::{WaveDriver, WaveField};
//!
//! let field = WaveField::new(128, 128, 1.0, 0.03, 4.0, 0.2)?;
//! let mut driver = WaveDriver::new(field, DisturbConfig::default(), Some(7))?;
//!
//! let stats = driver.tick(1.0 / 60.0)?;
//! let bytes = dist_waves::geometry::Vertex::as_bytes(driver.vertices());
//! println!("{} steps, {} bytes", stats.steps, bytes.len());
//! # Ok::<(), dist_waves::core::DistWavesError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod simulation;
