//! 配置管理模块
//!
//! 提供模拟参数、扰动驱动、运行参数与日志设置的加载和校验。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (waves.toml)
//!
//! ```toml
//! [simulation]
//! rows = 128
//! cols = 128
//! spatial_step = 1.0
//! time_step = 0.03
//! speed = 4.0
//! damping = 0.2
//!
//! [disturbance]
//! interval = 0.25
//! margin = 4
//! magnitude_min = 0.2
//! magnitude_max = 0.5
//! seed = 7            # 可选，省略时使用系统熵
//!
//! [run]
//! ticks = 600
//! tick_rate = 60.0
//! report_every = 60
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 稳定性上限：`speed²·dt²/dx²` 不能超过该值
pub const STABILITY_LIMIT: f32 = 0.5;

/// 顶层配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 波浪网格参数
    #[serde(default)]
    pub simulation: WaveConfig,

    /// 随机扰动参数
    #[serde(default)]
    pub disturbance: DisturbConfig,

    /// 无窗口运行参数
    #[serde(default)]
    pub run: RunConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 波浪网格参数
///
/// 构造后不可变，对应 `WaveField::new` 的六个参数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// 行数（沿 z 方向的采样数）
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// 列数（沿 x 方向的采样数）
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// 相邻采样点间距
    #[serde(default = "default_spatial_step")]
    pub spatial_step: f32,

    /// 每个内部积分步的固定时长（秒）
    #[serde(default = "default_time_step")]
    pub time_step: f32,

    /// 波速
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// 阻尼系数，0 表示无阻尼
    #[serde(default = "default_damping")]
    pub damping: f32,
}

/// 随机扰动参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisturbConfig {
    /// 两次扰动之间的时间间隔（秒）
    #[serde(default = "default_interval")]
    pub interval: f32,

    /// 随机坐标与网格边缘保持的最小距离
    #[serde(default = "default_margin")]
    pub margin: usize,

    /// 扰动幅度下限
    #[serde(default = "default_magnitude_min")]
    pub magnitude_min: f32,

    /// 扰动幅度上限
    #[serde(default = "default_magnitude_max")]
    pub magnitude_max: f32,

    /// 随机种子
    #[serde(default)]
    pub seed: Option<u64>,
}

/// 无窗口运行参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 总帧数
    #[serde(default = "default_ticks")]
    pub ticks: u32,

    /// 每秒帧数，决定每帧的 dt
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,

    /// 每隔多少帧输出一次统计
    #[serde(default = "default_report_every")]
    pub report_every: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值取自 TexWaves 演示
fn default_rows() -> usize { 128 }
fn default_cols() -> usize { 128 }
fn default_spatial_step() -> f32 { 1.0 }
fn default_time_step() -> f32 { 0.03 }
fn default_speed() -> f32 { 4.0 }
fn default_damping() -> f32 { 0.2 }
fn default_interval() -> f32 { 0.25 }
fn default_margin() -> usize { 4 }
fn default_magnitude_min() -> f32 { 0.2 }
fn default_magnitude_max() -> f32 { 0.5 }
fn default_ticks() -> u32 { 600 }
fn default_tick_rate() -> f32 { 60.0 }
fn default_report_every() -> u32 { 60 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_log_file() -> String { "distwaves.log".to_string() }

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            spatial_step: default_spatial_step(),
            time_step: default_time_step(),
            speed: default_speed(),
            damping: default_damping(),
        }
    }
}

impl Default for DisturbConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            margin: default_margin(),
            magnitude_min: default_magnitude_min(),
            magnitude_max: default_magnitude_max(),
            seed: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            tick_rate: default_tick_rate(),
            report_every: default_report_every(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_file: default_log_file(),
        }
    }
}

impl WaveConfig {
    /// 有限差分的 Courant 数平方 `e = speed²·dt²/dx²`
    pub fn courant_squared(&self) -> f32 {
        let c = self.speed * self.time_step / self.spatial_step;
        c * c
    }

    /// 校验网格参数
    ///
    /// 显式积分只有在 `e <= 0.5` 时才稳定，这里在所有构建模式下都强制检查。
    pub fn validate(&self) -> Result<()> {
        if self.rows <= 2 || self.cols <= 2 {
            return Err(ConfigError::invalid(
                "simulation.rows/cols",
                format!(
                    "grid must be larger than 2x2 to have an interior, got {}x{}",
                    self.rows, self.cols
                ),
            )
            .into());
        }

        if !(self.spatial_step.is_finite() && self.spatial_step > 0.0) {
            return Err(ConfigError::invalid(
                "simulation.spatial_step",
                format!("must be finite and positive, got {}", self.spatial_step),
            )
            .into());
        }

        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::invalid(
                "simulation.time_step",
                format!("must be finite and positive, got {}", self.time_step),
            )
            .into());
        }

        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::invalid(
                "simulation.speed",
                format!("must be finite and non-negative, got {}", self.speed),
            )
            .into());
        }

        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ConfigError::invalid(
                "simulation.damping",
                format!("must be finite and non-negative, got {}", self.damping),
            )
            .into());
        }

        let e = self.courant_squared();
        if e > STABILITY_LIMIT {
            return Err(ConfigError::invalid(
                "simulation.speed",
                format!(
                    "speed^2*time_step^2/spatial_step^2 = {} exceeds the stability limit {}",
                    e, STABILITY_LIMIT
                ),
            )
            .into());
        }

        Ok(())
    }
}

impl DisturbConfig {
    /// 校验扰动参数是否适配给定网格
    pub fn validate_for(&self, rows: usize, cols: usize) -> Result<()> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(ConfigError::invalid(
                "disturbance.interval",
                format!("must be finite and positive, got {}", self.interval),
            )
            .into());
        }

        // 随机范围 [margin, n-1-margin] 必须非空且落在内部区域
        let fits = |n: usize| self.margin >= 1 && 2 * self.margin < n.saturating_sub(1);
        if !fits(rows) || !fits(cols) {
            return Err(ConfigError::invalid(
                "disturbance.margin",
                format!("margin {} leaves no interior cells on a {}x{} grid", self.margin, rows, cols),
            )
            .into());
        }

        let finite = self.magnitude_min.is_finite() && self.magnitude_max.is_finite();
        if !finite || self.magnitude_min < 0.0 || self.magnitude_min > self.magnitude_max {
            return Err(ConfigError::invalid(
                "disturbance.magnitude_min/max",
                format!(
                    "expected 0 <= min <= max, got [{}, {}]",
                    self.magnitude_min, self.magnitude_max
                ),
            )
            .into());
        }

        Ok(())
    }
}

impl Config {
    /// 从配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--rows <value>` / `--cols <value>`: 网格尺寸
    /// - `--speed <value>` / `--damping <value>`: 物理参数
    /// - `--ticks <value>`: 运行帧数
    /// - `--seed <value>`: 随机种子
    ///
    /// 无法解析的值会被忽略。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        fn value_of<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
            let idx = args.iter().position(|a| a == flag)?;
            args.get(idx + 1)?.parse().ok()
        }

        if let Some(rows) = value_of(&args, "--rows") {
            self.simulation.rows = rows;
        }
        if let Some(cols) = value_of(&args, "--cols") {
            self.simulation.cols = cols;
        }
        if let Some(speed) = value_of(&args, "--speed") {
            self.simulation.speed = speed;
        }
        if let Some(damping) = value_of(&args, "--damping") {
            self.simulation.damping = damping;
        }
        if let Some(ticks) = value_of(&args, "--ticks") {
            self.run.ticks = ticks;
        }
        if let Some(seed) = value_of(&args, "--seed") {
            self.disturbance.seed = Some(seed);
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.disturbance
            .validate_for(self.simulation.rows, self.simulation.cols)?;

        if !(self.run.tick_rate.is_finite() && self.run.tick_rate > 0.0) {
            return Err(ConfigError::invalid(
                "run.tick_rate",
                format!("must be finite and positive, got {}", self.run.tick_rate),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.rows, 128);
        assert_eq!(config.simulation.cols, 128);
        assert_eq!(config.disturbance.margin, 4);
        assert!(config.disturbance.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.simulation.rows = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.speed = 100.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.damping = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_margin_must_fit_grid() {
        let mut config = Config::default();
        config.simulation.rows = 8;
        config.simulation.cols = 8;
        config.disturbance.margin = 4;
        assert!(config.validate().is_err());

        config.disturbance.margin = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [simulation]
            rows = 17
            cols = 33

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.rows, 17);
        assert_eq!(config.simulation.cols, 33);
        assert_eq!(config.simulation.time_step, 0.03);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.run.ticks, 600);
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["dist_waves", "--rows", "64", "--seed", "42", "--ticks", "abc"]);

        assert_eq!(config.simulation.rows, 64);
        assert_eq!(config.disturbance.seed, Some(42));
        assert_eq!(config.run.ticks, 600);
    }
}
