use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use scene_datagen::{AppConfig, DatasetLoader, DescriptorImporter, ManifestRenderer, Renderer};

/// Prepares camera, light and spp sets for a path-tracing dataset run
#[derive(Parser, Debug)]
#[command(name = "scene-datagen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (mesh/scene description)
    #[arg(long)]
    scene_file: PathBuf,

    /// Light set XML (<light_list>)
    #[arg(long)]
    light_file: PathBuf,

    /// Camera set XML (<cam_list>)
    #[arg(long)]
    camera_file: PathBuf,

    /// Samples-per-pixel XML (<spp_list>)
    #[arg(long)]
    spp_file: PathBuf,

    /// Existing directory receiving the dataset
    #[arg(long)]
    output_dir: PathBuf,

    #[arg(long)]
    width: usize,

    #[arg(long)]
    height: usize,

    #[arg(long, default_value_t = 5)]
    num_bounces: u32,

    #[arg(long, default_value_t = 0)]
    device_idx: u32,

    /// Number of shards the camera set is split into
    #[arg(long, default_value_t = 1)]
    split_num: usize,

    /// Shard handled by this process
    #[arg(long, default_value_t = 0)]
    split_idx: usize,

    /// Added to camera indices in output file names
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset_idx: i32,

    #[arg(long)]
    gamma_correction: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            scene_file: args.scene_file,
            light_file: args.light_file,
            camera_file: args.camera_file,
            spp_file: args.spp_file,
            output_dir: args.output_dir,
            width: args.width,
            height: args.height,
            num_bounces: args.num_bounces,
            device_idx: args.device_idx,
            gamma_correction: args.gamma_correction,
            split_num: args.split_num,
            split_idx: args.split_idx,
            offset_idx: args.offset_idx,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("status=running start_ts={}", timestamp());
    if let Err(err) = run(args.into()) {
        error!("status=failed end_ts={}", timestamp());
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
    info!("status=finished end_ts={}", timestamp());
}

fn run(config: AppConfig) -> Result<()> {
    let loader = DatasetLoader::load(config, &mut DescriptorImporter)
        .context("failed to load dataset inputs")?;

    let source = loader.scene_source();
    println!(
        "Loaded scene {} ({} cameras, {} lights, {} spp values)",
        source.scene_file.display(),
        loader.cameras().len(),
        loader.lights().len(),
        loader.spp().len()
    );
    if let Some(overrides) = &source.materials {
        println!(
            " - material override: {}",
            overrides.materials_file.display()
        );
    }
    for light in loader.lights() {
        println!(
            " - {} light pos=({:.2}, {:.2}, {:.2})",
            light.kind(),
            light.position.x,
            light.position.y,
            light.position.z
        );
    }

    let result = ManifestRenderer::new()
        .submit(&loader.render_params())
        .context("failed to prepare dataset")?;
    println!(
        "Planned {} outputs for {} cameras in {}",
        result.outputs.len(),
        result.cameras,
        loader.config().output_dir.display()
    );
    Ok(())
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
