use bytemuck::{Pod, Zeroable};

/// Position + texture coordinate, tightly packed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<Vertex>() == Vertex::SIZE as usize);

impl Vertex {
    pub const SIZE: u64 = 16;

    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub const fn new(position: [f32; 2], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }

    /// Single interleaved layout: position at location 0, texcoord at location 1.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Two triangles covering NDC `[-1, 1]²`, texcoords `[0, 1]²` with +V up.
pub const QUAD_VERTICES: [Vertex; QUAD_VERTEX_COUNT as usize] = [
    Vertex::new([-1.0, 1.0], [0.0, 1.0]),
    Vertex::new([1.0, 1.0], [1.0, 1.0]),
    Vertex::new([-1.0, -1.0], [0.0, 0.0]),
    Vertex::new([-1.0, -1.0], [0.0, 0.0]),
    Vertex::new([1.0, 1.0], [1.0, 1.0]),
    Vertex::new([1.0, -1.0], [1.0, 0.0]),
];
