mod app;

use anyhow::Result;
use arrayuniform_engine::device::GpuInit;
use arrayuniform_engine::logging::{LoggingConfig, init_logging};
use arrayuniform_engine::shader::ShaderLoader;
use arrayuniform_engine::window::{Runtime, RuntimeConfig};

use app::UniformArrayDemo;

const WINDOW_TITLE: &str = "arrayuniform - uniform buffer holding an array of structs";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let shaders = ShaderLoader::from_app_base()?;

    let config = RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), UniformArrayDemo::new(shaders))
}
