/// 网格数据结构模块
///
/// CPU 侧的网格数据容器。水面网格的索引在启动时生成一次，
/// 顶点则每帧由驱动重写。

use super::vertex::Vertex;
use crate::core::error::{DistWavesError, MeshLoadError, Result};

/// CPU 侧网格数据
///
/// 简单的数据持有者，不包含 GPU 资源。
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 三角形列表索引，每 3 个索引定义一个三角形
    pub indices: Vec<u32>,

    /// 网格名称（可选），用于调试和日志
    pub name: Option<String>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 创建一个带容量预分配的网格数据
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            name: None,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 验证网格数据的有效性
    ///
    /// 检查索引数量是 3 的倍数，且所有索引都在顶点范围内。
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshLoadError::ValidationError(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ))
            .into());
        }

        let vertex_count = self.vertices.len();
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshLoadError::ValidationError(format!(
                "index {} at position {} is out of range for {} vertices",
                index, i, vertex_count
            ))
            .into());
        }

        Ok(())
    }

    /// 转换为 16 位索引
    ///
    /// 顶点数超过 65536（`u16` 可寻址范围）时返回 `MeshLoadError::InvalidGeometry`。
    pub fn indices16(&self) -> Result<Vec<u16>> {
        if self.vertices.len() > u16::MAX as usize + 1 {
            return Err(MeshLoadError::InvalidGeometry(format!(
                "{} vertices cannot be addressed with 16-bit indices",
                self.vertices.len()
            ))
            .into());
        }

        self.indices
            .iter()
            .map(|&i| {
                u16::try_from(i).map_err(|_| {
                    DistWavesError::from(MeshLoadError::InvalidGeometry(format!(
                        "index {} exceeds u16",
                        i
                    )))
                })
            })
            .collect()
    }
}
