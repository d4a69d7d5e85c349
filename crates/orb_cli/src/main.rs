mod cli;
mod preset;
mod scene;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use orb_renderer::{render_parallel, save_image, write_ppm, CameraFrame, Hittable, ImageBuffer};

use crate::cli::Args;
use crate::scene::{load_scene, Scene};

fn load(args: &Args) -> Result<Scene> {
    match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display())),
        None => {
            log::info!("Using preset {:?}", args.preset);
            Ok(args.preset.build(args.seed))
        }
    }
}

/// Render on a pool of `threads` workers, or on the global pool when unset.
///
/// The image depends only on `seed`, whatever the thread count.
fn render_image(
    frame: &CameraFrame,
    world: &dyn Hittable,
    seed: u64,
    threads: Option<usize>,
) -> Result<ImageBuffer> {
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to build thread pool")?;
            Ok(pool.install(|| render_parallel(frame, world, seed)))
        }
        None => Ok(render_parallel(frame, world, seed)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting orb {}", env!("CARGO_PKG_VERSION"));

    let scene = load(&args)?;
    let camera = args.apply_overrides(scene.camera);
    camera.validate().context("Invalid camera settings")?;
    let frame = camera.initialize();

    let image = render_image(&frame, &scene.world, args.seed, args.threads)?;

    if args.writes_to_stdout() {
        write_ppm(&image, &mut io::stdout().lock()).context("Failed to write image to stdout")?;
    } else {
        save_image(&image, &args.output)
            .with_context(|| format!("Failed to save {}", args.output.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;

    #[test]
    fn test_thread_count_does_not_change_image() {
        let scene = Preset::Quickstart.build(0);
        let frame = scene
            .camera
            .with_image(16.0 / 9.0, 32)
            .with_quality(2, 6)
            .initialize();

        let single = render_image(&frame, &scene.world, 17, Some(1)).unwrap();
        let several = render_image(&frame, &scene.world, 17, Some(3)).unwrap();
        let global = render_image(&frame, &scene.world, 17, None).unwrap();

        assert_eq!(single, several);
        assert_eq!(single, global);
        assert_eq!((single.width, single.height), (32, 18));
    }
}
