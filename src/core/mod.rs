//! 核心功能模块
//!
//! 提供数学类型、日志、配置和错误处理。这些模块与具体的模拟逻辑解耦。
//!
//! - `math`：数学类型别名与工具函数
//! - `log`：日志系统初始化
//! - `config`：配置管理，支持从 TOML 文件加载
//! - `error`：统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod error;

pub use math::{Vector2, Vector3};
pub use error::{Result, DistWavesError, ConfigError, SimulationError, MeshLoadError};
pub use config::{Config, WaveConfig, DisturbConfig, RunConfig, LogLevel};
