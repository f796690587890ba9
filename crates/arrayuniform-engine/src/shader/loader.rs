use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::device::GraphicsBackend;
use crate::error::{EngineError, EngineResult};
use crate::render::ResourceFactory;

const SPIRV_MAGIC: u32 = 0x0723_0203;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry-point name convention shared by every backend's artifacts.
    pub fn entry_point(self) -> &'static str {
        match self {
            Self::Vertex => "VS",
            Self::Fragment => "FS",
        }
    }

    fn to_naga(self) -> wgpu::naga::ShaderStage {
        match self {
            Self::Vertex => wgpu::naga::ShaderStage::Vertex,
            Self::Fragment => wgpu::naga::ShaderStage::Fragment,
        }
    }
}

/// How a backend's shader artifact is encoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderFormat {
    /// Precompiled bytecode blob (Direct3D). wgpu ingests it as SPIR-V words.
    Precompiled,
    /// SPIR-V intermediate bytecode (Vulkan).
    SpirV,
    /// GLSL source text (OpenGL).
    Glsl,
}

impl ShaderFormat {
    pub fn for_backend(backend: GraphicsBackend) -> Self {
        match backend {
            GraphicsBackend::Direct3D => Self::Precompiled,
            GraphicsBackend::Vulkan => Self::SpirV,
            GraphicsBackend::OpenGl => Self::Glsl,
        }
    }

    /// File extension for artifacts of this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Precompiled => "hlsl.bytes",
            Self::SpirV => "spv",
            Self::Glsl => "glsl",
        }
    }
}

/// Raw shader artifact plus everything needed to turn it into a module.
#[derive(Debug, Clone)]
pub struct ShaderDescription {
    pub stage: ShaderStage,
    pub format: ShaderFormat,
    pub entry_point: &'static str,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl ShaderDescription {
    /// Validates the artifact and borrows it as a wgpu shader source.
    pub fn source(&self) -> EngineResult<wgpu::ShaderSource<'_>> {
        match self.format {
            ShaderFormat::Precompiled | ShaderFormat::SpirV => {
                check_spirv(&self.bytes).map_err(|reason| EngineError::InvalidShader {
                    path: self.path.clone(),
                    reason,
                })?;
                Ok(wgpu::util::make_spirv(&self.bytes))
            }
            ShaderFormat::Glsl => {
                let text = std::str::from_utf8(&self.bytes).map_err(|_| {
                    EngineError::InvalidShader {
                        path: self.path.clone(),
                        reason: "GLSL source is not valid UTF-8",
                    }
                })?;
                Ok(wgpu::ShaderSource::Glsl {
                    shader: Cow::Borrowed(text),
                    stage: self.stage.to_naga(),
                    defines: Default::default(),
                })
            }
        }
    }
}

fn check_spirv(bytes: &[u8]) -> Result<(), &'static str> {
    if bytes.is_empty() || bytes.len() % 4 != 0 {
        return Err("SPIR-V blob is not a whole number of 32-bit words");
    }
    let head = [bytes[0], bytes[1], bytes[2], bytes[3]];
    let word = u32::from_le_bytes(head);
    if word != SPIRV_MAGIC && word != SPIRV_MAGIC.swap_bytes() {
        return Err("missing SPIR-V magic number");
    }
    Ok(())
}

/// A compiled shader module and the entry point to bind it with.
#[derive(Debug)]
pub struct Shader {
    pub module: wgpu::ShaderModule,
    pub stage: ShaderStage,
    pub format: ShaderFormat,
    pub entry_point: &'static str,
}

impl Shader {
    /// Entry point passed to the pipeline.
    ///
    /// GLSL modules carry a single `main` per stage, which wgpu resolves itself.
    pub fn pipeline_entry_point(&self) -> Option<&'static str> {
        match self.format {
            ShaderFormat::Glsl => None,
            ShaderFormat::Precompiled | ShaderFormat::SpirV => Some(self.entry_point),
        }
    }
}

/// Resolves and reads shader artifacts below a root directory.
#[derive(Debug, Clone)]
pub struct ShaderLoader {
    root: PathBuf,
}

impl ShaderLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loader rooted at `<directory of the running executable>/Shaders`.
    pub fn from_app_base() -> anyhow::Result<Self> {
        let exe = std::env::current_exe().context("failed to locate the running executable")?;
        let base = exe
            .parent()
            .context("executable path has no parent directory")?;
        Ok(Self::new(base.join("Shaders")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artifact for `name` on `backend`.
    pub fn path_for(&self, name: &str, backend: GraphicsBackend) -> PathBuf {
        let ext = ShaderFormat::for_backend(backend).extension();
        self.root.join(format!("{name}.{ext}"))
    }

    /// Reads the artifact; a missing or unreadable file is fatal.
    pub fn read(
        &self,
        name: &str,
        stage: ShaderStage,
        backend: GraphicsBackend,
    ) -> EngineResult<ShaderDescription> {
        let path = self.path_for(name, backend);
        let bytes = std::fs::read(&path).map_err(|source| EngineError::ShaderIo {
            path: path.clone(),
            source,
        })?;

        log::debug!("read shader {} ({} bytes)", path.display(), bytes.len());

        Ok(ShaderDescription {
            stage,
            format: ShaderFormat::for_backend(backend),
            entry_point: stage.entry_point(),
            path,
            bytes,
        })
    }

    /// Reads the artifact and creates the shader module through `factory`.
    pub fn load(
        &self,
        factory: &mut ResourceFactory<'_>,
        name: &str,
        stage: ShaderStage,
        backend: GraphicsBackend,
    ) -> EngineResult<Shader> {
        let desc = self.read(name, stage, backend)?;
        let module = factory.create_shader(name, desc.source()?);

        Ok(Shader {
            module,
            stage,
            format: desc.format,
            entry_point: desc.entry_point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spirv_header() -> Vec<u8> {
        let mut bytes = SPIRV_MAGIC.to_le_bytes().to_vec();
        bytes.extend_from_slice(&0x0001_0000u32.to_le_bytes());
        bytes
    }

    #[test]
    fn extensions_per_backend() {
        let loader = ShaderLoader::new("/app/Shaders");
        assert_eq!(
            loader.path_for("Vertex", GraphicsBackend::Direct3D),
            Path::new("/app/Shaders/Vertex.hlsl.bytes")
        );
        assert_eq!(
            loader.path_for("Vertex", GraphicsBackend::Vulkan),
            Path::new("/app/Shaders/Vertex.spv")
        );
        assert_eq!(
            loader.path_for("Fragment", GraphicsBackend::OpenGl),
            Path::new("/app/Shaders/Fragment.glsl")
        );
    }

    #[test]
    fn entry_points_follow_stage() {
        assert_eq!(ShaderStage::Vertex.entry_point(), "VS");
        assert_eq!(ShaderStage::Fragment.entry_point(), "FS");
    }

    #[test]
    fn read_fills_description_for_every_backend() {
        let dir = tempfile::tempdir().unwrap();
        for backend in GraphicsBackend::ALL {
            let ext = ShaderFormat::for_backend(backend).extension();
            std::fs::write(dir.path().join(format!("Fragment.{ext}")), spirv_header()).unwrap();
        }

        let loader = ShaderLoader::new(dir.path());
        for backend in GraphicsBackend::ALL {
            let desc = loader.read("Fragment", ShaderStage::Fragment, backend).unwrap();
            assert_eq!(desc.entry_point, "FS");
            assert_eq!(desc.format, ShaderFormat::for_backend(backend));
            assert_eq!(desc.bytes, spirv_header());
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ShaderLoader::new(dir.path());
        let err = loader
            .read("Vertex", ShaderStage::Vertex, GraphicsBackend::Vulkan)
            .unwrap_err();
        match err {
            EngineError::ShaderIo { path, .. } => assert!(path.ends_with("Vertex.spv")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_spirv_is_rejected() {
        let desc = ShaderDescription {
            stage: ShaderStage::Vertex,
            format: ShaderFormat::SpirV,
            entry_point: "VS",
            path: PathBuf::from("Vertex.spv"),
            bytes: vec![0x03, 0x02, 0x23],
        };
        assert!(matches!(desc.source(), Err(EngineError::InvalidShader { .. })));
    }

    #[test]
    fn spirv_without_magic_is_rejected() {
        assert!(check_spirv(&[0u8; 8]).is_err());
    }

    #[test]
    fn big_endian_magic_is_accepted() {
        let mut bytes = SPIRV_MAGIC.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0, 1, 0, 0]);
        assert!(check_spirv(&bytes).is_ok());
    }

    #[test]
    fn glsl_source_is_passed_with_stage() {
        let desc = ShaderDescription {
            stage: ShaderStage::Fragment,
            format: ShaderFormat::Glsl,
            entry_point: "FS",
            path: PathBuf::from("Fragment.glsl"),
            bytes: b"#version 450\nvoid main() {}\n".to_vec(),
        };
        match desc.source().unwrap() {
            wgpu::ShaderSource::Glsl { shader, stage, .. } => {
                assert!(shader.starts_with("#version 450"));
                assert_eq!(stage, wgpu::naga::ShaderStage::Fragment);
            }
            _ => panic!("expected GLSL source"),
        }
    }

    #[test]
    fn non_utf8_glsl_is_rejected() {
        let desc = ShaderDescription {
            stage: ShaderStage::Vertex,
            format: ShaderFormat::Glsl,
            entry_point: "VS",
            path: PathBuf::from("Vertex.glsl"),
            bytes: vec![0xff, 0xfe, 0x00],
        };
        assert!(matches!(desc.source(), Err(EngineError::InvalidShader { .. })));
    }
}
