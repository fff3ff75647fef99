/// 地形与水面示例
///
/// 构建丘陵地形网格和波浪网格，运行几秒模拟并打印水面状态。
///
/// 运行方式：
/// ```
/// cargo run --example land_and_waves
/// ```

use dist_waves::core::DisturbConfig;
use dist_waves::geometry::terrain;
use dist_waves::simulation::{WaveDriver, WaveField};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== DistWaves 地形与水面示例 ===\n");

    let land = terrain::build_land_mesh(160.0, 160.0, 50, 50);
    println!("地形网格:");
    println!("  顶点数: {}", land.vertex_count());
    println!("  三角形数: {}", land.triangle_count());

    let (min_h, max_h) = land
        .vertices
        .iter()
        .map(|v| v.position[1])
        .fold((f32::MAX, f32::MIN), |(lo, hi), h| (lo.min(h), hi.max(h)));
    println!("  高度范围: [{:.2}, {:.2}]", min_h, max_h);

    let field = WaveField::new(128, 128, 1.0, 0.03, 4.0, 0.2)?;
    let mut driver = WaveDriver::new(field, DisturbConfig::default(), Some(2024))?;

    println!("\n水面网格:");
    println!("  顶点数: {}", driver.field().vertex_count());
    println!("  三角形数: {}", driver.field().triangle_count());
    println!(
        "  尺寸: {:.1} x {:.1}",
        driver.field().width(),
        driver.field().depth()
    );

    println!("\n模拟（60 帧/秒）:");
    for second in 1..=5 {
        let mut disturbances = 0;
        let mut max_height = 0.0;
        for _ in 0..60 {
            let stats = driver.tick(1.0 / 60.0)?;
            disturbances += stats.disturbances;
            max_height = stats.max_height;
        }
        println!(
            "  第 {} 秒: 扰动 {} 次, 最大高度 {:.3}",
            second, disturbances, max_height
        );
    }

    let center = driver.field().vertex_count() / 2 + driver.field().column_count() / 2;
    let v = driver.vertices()[center];
    println!("\n中心附近顶点:");
    println!("  位置: [{:.3}, {:.3}, {:.3}]", v.position[0], v.position[1], v.position[2]);
    println!("  法线: [{:.3}, {:.3}, {:.3}]", v.normal[0], v.normal[1], v.normal[2]);
    println!("  UV: [{:.3}, {:.3}]", v.texcoord[0], v.texcoord[1]);

    Ok(())
}
