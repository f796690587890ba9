use wgpu::util::DeviceExt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Buffer,
    Shader,
    ResourceLayout,
    ResourceSet,
    PipelineLayout,
    Pipeline,
}

/// One entry of the factory's creation ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub label: String,
    pub size: Option<u64>,
}

/// Creates labelled GPU objects and records every one of them.
///
/// The objects themselves end up in [`DemoResources`], which releases them together.
pub struct ResourceFactory<'d> {
    device: &'d wgpu::Device,
    ledger: Vec<ResourceRecord>,
}

impl<'d> ResourceFactory<'d> {
    pub fn new(device: &'d wgpu::Device) -> Self {
        Self {
            device,
            ledger: Vec::new(),
        }
    }

    fn record(&mut self, kind: ResourceKind, label: &str, size: Option<u64>) -> String {
        let label = format!("arrayuniform {label}");
        log::debug!("creating {kind:?} '{label}'");
        self.ledger.push(ResourceRecord {
            kind,
            label: label.clone(),
            size,
        });
        label
    }

    /// Static vertex buffer initialised with `contents`; never written again.
    pub fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> wgpu::Buffer {
        let label = self.record(ResourceKind::Buffer, label, Some(contents.len() as u64));
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    /// Uniform buffer rewritten from the host every frame.
    pub fn create_uniform_buffer(&mut self, label: &str, size: u64) -> wgpu::Buffer {
        let label = self.record(ResourceKind::Buffer, label, Some(size));
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&label),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn create_shader(&mut self, label: &str, source: wgpu::ShaderSource<'_>) -> wgpu::ShaderModule {
        let label = self.record(ResourceKind::Shader, label, None);
        self.device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&label),
                source,
            })
    }

    pub fn create_resource_layout(
        &mut self,
        label: &str,
        entries: &[wgpu::BindGroupLayoutEntry],
    ) -> wgpu::BindGroupLayout {
        let label = self.record(ResourceKind::ResourceLayout, label, None);
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&label),
                entries,
            })
    }

    pub fn create_resource_set(
        &mut self,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        entries: &[wgpu::BindGroupEntry<'_>],
    ) -> wgpu::BindGroup {
        let label = self.record(ResourceKind::ResourceSet, label, None);
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout,
            entries,
        })
    }

    pub fn create_pipeline_layout(
        &mut self,
        label: &str,
        layouts: &[&wgpu::BindGroupLayout],
    ) -> wgpu::PipelineLayout {
        let label = self.record(ResourceKind::PipelineLayout, label, None);
        self.device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&label),
                bind_group_layouts: layouts,
                immediate_size: 0,
            })
    }

    /// Creates a render pipeline; the descriptor's label is replaced by the ledger label.
    pub fn create_render_pipeline(
        &mut self,
        label: &str,
        desc: wgpu::RenderPipelineDescriptor<'_>,
    ) -> wgpu::RenderPipeline {
        let label = self.record(ResourceKind::Pipeline, label, None);
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            ..desc
        })
    }

    pub fn into_ledger(self) -> Vec<ResourceRecord> {
        self.ledger
    }
}

/// Sole owner of every GPU object the demo uses.
///
/// Created once during initialisation; all objects are released together on drop.
pub struct DemoResources {
    pub vertex_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub vertex_shader: wgpu::ShaderModule,
    pub fragment_shader: wgpu::ShaderModule,
    pub resource_layout: wgpu::BindGroupLayout,
    pub resource_set: wgpu::BindGroup,
    pub pipeline_layout: wgpu::PipelineLayout,
    pub pipeline: wgpu::RenderPipeline,
    pub ledger: Vec<ResourceRecord>,
}

impl Drop for DemoResources {
    fn drop(&mut self) {
        log::debug!("releasing {} GPU resources", self.ledger.len());
    }
}
