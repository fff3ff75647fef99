//! 波浪模拟模块
//!
//! - `waves`: 高度场本身，唯一包含数值算法的部分
//! - `driver`: 每帧随机扰动、推进、重建顶点数组
//! - `animation`: 水面材质的纹理滚动
//!
//! ```text
//! 驱动 (每帧)
//!   ├─ disturb(row, col, magnitude)  × 0..n
//!   ├─ update(dt)                    × 1
//!   └─ position(i) / normal(i)       → 顶点数组 → 渲染器
//! ```

pub mod waves;
pub mod driver;
pub mod animation;

pub use waves::WaveField;
pub use driver::{TickStats, WaveDriver};
pub use animation::TextureScroll;
