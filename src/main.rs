//! DistWaves - 无窗口波浪模拟
//!
//! 按配置的帧率推进水面模拟，并周期性输出统计信息。
//! 渲染器缺席时，这个程序就是每帧驱动高度场的那一方。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件 waves.toml（不存在时使用默认值）
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --rows 64 --cols 64 --ticks 1200 --seed 7
//! ```

use anyhow::Context;
use tracing::{debug, info};

use dist_waves::app_info;
use dist_waves::core::{log, Config};
use dist_waves::geometry::terrain;
use dist_waves::simulation::{WaveDriver, WaveField};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（waves.toml）
/// 2. 应用命令行参数覆盖并校验
/// 3. 初始化日志系统
/// 4. 构建地形与水面
/// 5. 运行固定帧数
fn main() -> anyhow::Result<()> {
    let mut config = Config::from_file_or_default("waves.toml");
    config.apply_args(std::env::args());
    config.validate().context("invalid configuration")?;

    let log_file = config
        .logging
        .file_output
        .then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)
        .context("failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "DistWaves starting...");
    info!(
        rows = config.simulation.rows,
        cols = config.simulation.cols,
        spatial_step = config.simulation.spatial_step,
        time_step = config.simulation.time_step,
        speed = config.simulation.speed,
        damping = config.simulation.damping,
        "Simulation configuration"
    );

    let land = terrain::build_land_mesh(160.0, 160.0, 50, 50);
    let land_indices = land.indices16().context("land mesh does not fit 16-bit indices")?;
    debug!(
        vertices = land.vertex_count(),
        indices = land_indices.len(),
        "Land mesh built"
    );

    let field = WaveField::from_config(&config.simulation).context("failed to create wave field")?;
    let seed = config.disturbance.seed;
    let mut driver = WaveDriver::new(field, config.disturbance.clone(), seed)
        .context("failed to create wave driver")?;
    let water_indices = driver
        .mesh()
        .indices16()
        .context("wave grid does not fit 16-bit indices")?;
    debug!(
        vertices = driver.vertices().len(),
        indices = water_indices.len(),
        "Wave mesh built"
    );

    let dt = 1.0 / config.run.tick_rate;
    let report_every = config.run.report_every.max(1);
    let mut total_steps = 0;
    let mut total_disturbances = 0;

    info!(ticks = config.run.ticks, dt, "Entering main loop...");

    for tick in 1..=config.run.ticks {
        let stats = driver.tick(dt).with_context(|| format!("tick {} failed", tick))?;
        total_steps += stats.steps;
        total_disturbances += stats.disturbances;

        if tick % report_every == 0 {
            let [tu, tv] = driver.texture_scroll().offset();
            app_info!(
                tick,
                time = tick as f32 * dt,
                max_height = stats.max_height,
                tu,
                tv,
                "Wave status"
            );
        }
    }

    info!(
        steps = total_steps,
        disturbances = total_disturbances,
        upload_bytes = dist_waves::geometry::Vertex::as_bytes(driver.vertices()).len(),
        "Simulation finished"
    );

    Ok(())
}
