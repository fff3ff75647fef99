/// 几何数据模块
///
/// 提供 GPU 布局的顶点类型、CPU 侧网格容器、平面网格生成以及地形网格。
///
/// # 模块结构
///
/// - `vertex`: 顶点数据结构定义
/// - `mesh`: 网格数据容器与 16 位索引转换
/// - `grid`: 平面网格与三角形索引生成
/// - `terrain`: 丘陵地形高度函数与地形网格

pub mod vertex;
pub mod mesh;
pub mod grid;
pub mod terrain;

pub use vertex::Vertex;
pub use mesh::MeshData;
pub use grid::{create_grid, grid_indices};
