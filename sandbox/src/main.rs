mod world;

use anyhow::Context;
use log::error;
use raytracer::config::render_config::RenderConfig;
use raytracer::gpu::wgpu_backend::WgpuBackend;
use raytracer::RayTracer;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "assets/render_config.json";
const ASSETS_FOLDER: &str = "assets";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(format!("info,{}", RayTracer::<WgpuBackend>::get_reasonable_log_filter())))
        .init();

    let config_path = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = RenderConfig::from_file(&config_path)?;

    let camera = config.camera.to_camera()?;
    let scene = world::make_festive_box(camera, Path::new(ASSETS_FOLDER))?;
    let size = config.quality.frame_size()?;

    let mut tracer = RayTracer::new_headless(scene, size, config.quality.bounces).context("failed to start the tracer")?;

    let outcome = tracer.render_until_saved(&mut config.savepoints);
    if let Err(render_error) = &outcome {
        error!("rendering stopped after {} frames: {render_error}", tracer.frames_rendered());
    }
    tracer.dispose();
    outcome.context("rendering failed")
}
