/// 顶点定义模块
///
/// 定义水面和地形共用的顶点结构，每帧由驱动写入动态顶点缓冲区。

use bytemuck::{Pod, Zeroable};

use crate::core::math::{Vector2, Vector3};

/// 位置、法线、纹理坐标顶点
///
/// 内存布局与 GPU 输入布局一致，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - **总计**: 32 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 单位法线 (nx, ny, nz)
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],
}

impl Vertex {
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// 从数学库类型构造
    ///
    /// `nalgebra` 的向量类型无法实现 `Pod`，所以顶点字段保持原始数组。
    #[inline]
    pub fn from_vectors(position: &Vector3, normal: &Vector3, texcoord: Vector2) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            texcoord: [texcoord.x, texcoord.y],
        }
    }

    /// 以字节视图返回顶点数组，用于上传到 GPU 缓冲区
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
