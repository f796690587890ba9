use std::num::NonZeroU64;

use crate::geometry::Vertex;
use crate::shader::Shader;
use crate::uniforms::UniformBlock;

use super::ResourceFactory;

const UNIFORM_BINDING_SIZE: NonZeroU64 = match NonZeroU64::new(UniformBlock::SIZE as u64) {
    Some(size) => size,
    None => panic!("uniform block has zero size"),
};

/// One binding: the uniform block at slot 0, read by the fragment stage only.
pub fn uniform_layout_entries() -> [wgpu::BindGroupLayoutEntry; 1] {
    [wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(UNIFORM_BINDING_SIZE),
        },
        count: None,
    }]
}

/// Fixed draw state of the demo pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PipelineSettings {
    pub alpha_blend: bool,
    pub depth_test: bool,
    pub depth_write: bool,
    pub depth_compare: wgpu::CompareFunction,
    pub cull_mode: Option<wgpu::Face>,
    pub polygon_mode: wgpu::PolygonMode,
    pub front_face: wgpu::FrontFace,
    pub depth_clip: bool,
    pub topology: wgpu::PrimitiveTopology,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            alpha_blend: true,
            depth_test: true,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            front_face: wgpu::FrontFace::Cw,
            depth_clip: true,
            topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

impl PipelineSettings {
    /// Straight (non-premultiplied) alpha blending on color and alpha.
    pub fn blend_state(&self) -> Option<wgpu::BlendState> {
        if !self.alpha_blend {
            return None;
        }
        let component = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        };
        Some(wgpu::BlendState {
            color: component,
            alpha: component,
        })
    }

    /// Depth state; a disabled test maps to `Always` so writes still follow `depth_write`.
    pub fn depth_stencil(&self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: self.depth_write,
            depth_compare: if self.depth_test {
                self.depth_compare
            } else {
                wgpu::CompareFunction::Always
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }

    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.topology,
            strip_index_format: None,
            front_face: self.front_face,
            cull_mode: self.cull_mode,
            polygon_mode: self.polygon_mode,
            unclipped_depth: !self.depth_clip,
            conservative: false,
        }
    }

    /// Builds the immutable pipeline used for every draw.
    pub fn build(
        &self,
        factory: &mut ResourceFactory<'_>,
        layout: &wgpu::PipelineLayout,
        vertex: &Shader,
        fragment: &Shader,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let vertex_layouts = [Vertex::layout()];
        let targets = [Some(wgpu::ColorTargetState {
            format: color_format,
            blend: self.blend_state(),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        factory.create_render_pipeline(
            "pipeline",
            wgpu::RenderPipelineDescriptor {
                label: None,
                layout: Some(layout),

                vertex: wgpu::VertexState {
                    module: &vertex.module,
                    entry_point: vertex.pipeline_entry_point(),
                    compilation_options: Default::default(),
                    buffers: &vertex_layouts,
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fragment.module,
                    entry_point: fragment.pipeline_entry_point(),
                    compilation_options: Default::default(),
                    targets: &targets,
                }),

                primitive: self.primitive_state(),
                depth_stencil: Some(self.depth_stencil(depth_format)),
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_binding_is_fragment_only() {
        let [entry] = uniform_layout_entries();
        assert_eq!(entry.binding, 0);
        assert_eq!(entry.visibility, wgpu::ShaderStages::FRAGMENT);
        match entry.ty {
            wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                min_binding_size,
                ..
            } => assert_eq!(min_binding_size.map(NonZeroU64::get), Some(64)),
            other => panic!("unexpected binding type {other:?}"),
        }
    }

    #[test]
    fn default_depth_state() {
        let depth = PipelineSettings::default().depth_stencil(wgpu::TextureFormat::Depth32Float);
        assert!(depth.depth_write_enabled);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::LessEqual);
    }

    #[test]
    fn default_raster_state() {
        let p = PipelineSettings::default().primitive_state();
        assert_eq!(p.cull_mode, None);
        assert_eq!(p.front_face, wgpu::FrontFace::Cw);
        assert_eq!(p.polygon_mode, wgpu::PolygonMode::Fill);
        assert_eq!(p.topology, wgpu::PrimitiveTopology::TriangleList);
        assert!(!p.unclipped_depth);
    }

    #[test]
    fn blend_uses_source_alpha() {
        let blend = PipelineSettings::default().blend_state().unwrap();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.alpha.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn disabled_depth_test_always_passes() {
        let settings = PipelineSettings {
            depth_test: false,
            ..PipelineSettings::default()
        };
        let depth = settings.depth_stencil(wgpu::TextureFormat::Depth32Float);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Always);
    }

    #[test]
    fn opaque_settings_have_no_blend() {
        let settings = PipelineSettings {
            alpha_blend: false,
            ..PipelineSettings::default()
        };
        assert!(settings.blend_state().is_none());
    }
}
