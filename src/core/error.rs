//! 错误处理模块
//!
//! 定义了波浪模拟中使用的统一错误类型。
//!
//! # 错误分类
//!
//! - 构造错误：网格尺寸或物理参数无效，在 `WaveField::new` 时拒绝
//! - 前置条件错误：`disturb` 坐标越界、`update` 时间步为负等，调用失败且不修改任何状态
//! - 几何错误：网格索引超出 16 位范围等

use std::fmt;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, DistWavesError>;

/// 顶层错误类型
#[derive(Debug)]
pub enum DistWavesError {
    /// 配置错误
    Config(ConfigError),

    /// 模拟调用错误
    Simulation(SimulationError),

    /// 几何数据错误
    Geometry(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 模拟调用的前置条件错误
///
/// 这些错误都在修改缓冲区之前检测，返回错误时场的状态保持不变。
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// 扰动坐标不在内部区域 `[1, rows-2] x [1, cols-2]`
    DisturbOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// 扰动幅度不是有限值
    InvalidMagnitude(f32),

    /// 时间增量为负或不是有限值
    InvalidTimeStep(f32),
}

/// 网格数据相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 数据验证失败
    ValidationError(String),

    /// 几何数据无效
    InvalidGeometry(String),
}

impl fmt::Display for DistWavesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistWavesError::Config(e) => write!(f, "Configuration error: {}", e),
            DistWavesError::Simulation(e) => write!(f, "Simulation error: {}", e),
            DistWavesError::Geometry(e) => write!(f, "Geometry error: {}", e),
            DistWavesError::Io(e) => write!(f, "IO error: {}", e),
            DistWavesError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::DisturbOutOfRange { row, col, rows, cols } => write!(
                f,
                "Disturb at ({}, {}) is outside the interior [1, {}] x [1, {}]",
                row,
                col,
                rows.saturating_sub(2),
                cols.saturating_sub(2)
            ),
            SimulationError::InvalidMagnitude(m) => {
                write!(f, "Disturb magnitude must be finite, got {}", m)
            }
            SimulationError::InvalidTimeStep(dt) => {
                write!(f, "Update dt must be finite and non-negative, got {}", dt)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl std::error::Error for DistWavesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistWavesError::Config(e) => Some(e),
            DistWavesError::Simulation(e) => Some(e),
            DistWavesError::Geometry(e) => Some(e),
            DistWavesError::Io(e) => Some(e),
            DistWavesError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for SimulationError {}
impl std::error::Error for MeshLoadError {}

impl From<std::io::Error> for DistWavesError {
    fn from(err: std::io::Error) -> Self {
        DistWavesError::Io(err)
    }
}

impl From<ConfigError> for DistWavesError {
    fn from(err: ConfigError) -> Self {
        DistWavesError::Config(err)
    }
}

impl From<SimulationError> for DistWavesError {
    fn from(err: SimulationError) -> Self {
        DistWavesError::Simulation(err)
    }
}

impl From<MeshLoadError> for DistWavesError {
    fn from(err: MeshLoadError) -> Self {
        DistWavesError::Geometry(err)
    }
}

impl ConfigError {
    /// 构造 `InvalidValue` 的便捷函数
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl DistWavesError {
    /// 若为模拟前置条件错误则返回其引用
    pub fn as_simulation(&self) -> Option<&SimulationError> {
        match self {
            DistWavesError::Simulation(e) => Some(e),
            _ => None,
        }
    }
}
