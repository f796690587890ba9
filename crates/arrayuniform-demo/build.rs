//! Compiles `Shaders/*.glsl` into the bytecode variants and stages every artifact
//! in `<target profile dir>/Shaders`, next to the built executable.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

const SHADERS: [(&str, naga::ShaderStage, &str); 2] = [
    ("Vertex", naga::ShaderStage::Vertex, "VS"),
    ("Fragment", naga::ShaderStage::Fragment, "FS"),
];

fn main() -> Result<()> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let source_dir = manifest_dir.join("Shaders");
    println!("cargo:rerun-if-changed={}", source_dir.display());

    // OUT_DIR is <profile>/build/<pkg>-<hash>/out.
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let profile_dir = out_dir
        .ancestors()
        .nth(3)
        .context("OUT_DIR is not inside a target profile directory")?;
    let dest = profile_dir.join("Shaders");
    std::fs::create_dir_all(&dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;
    println!("cargo:rustc-env=ARRAYUNIFORM_SHADER_DIR={}", dest.display());

    for (name, stage, entry_point) in SHADERS {
        let src_path = source_dir.join(format!("{name}.glsl"));
        let source = std::fs::read_to_string(&src_path)
            .with_context(|| format!("failed to read {}", src_path.display()))?;

        let words = compile(&source, stage, entry_point)
            .with_context(|| format!("failed to compile {}", src_path.display()))?;
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();

        std::fs::write(dest.join(format!("{name}.spv")), &bytes)?;
        std::fs::write(dest.join(format!("{name}.hlsl.bytes")), &bytes)?;
        std::fs::copy(&src_path, dest.join(format!("{name}.glsl")))?;
    }

    Ok(())
}

fn compile(source: &str, stage: naga::ShaderStage, entry_point: &str) -> Result<Vec<u32>> {
    let mut frontend = naga::front::glsl::Frontend::default();
    let mut module = frontend
        .parse(&naga::front::glsl::Options::from(stage), source)
        .map_err(|e| anyhow!("{e:?}"))?;

    for ep in module.entry_points.iter_mut() {
        ep.name = entry_point.to_string();
    }

    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow!("{e:?}"))?;

    naga::back::spv::write_vec(&module, &info, &naga::back::spv::Options::default(), None)
        .map_err(|e| anyhow!("{e:?}"))
}
