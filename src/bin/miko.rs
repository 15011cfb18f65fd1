use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;

use miko::{
    Camera, Engine, EngineOpts, Light, LitShader, Matrix4x4, Model, Projection, Texture, Vector3,
    Vector4, primitives,
};

/// Render a lit, textured cube to a PNG.
#[derive(Parser, Debug)]
#[command(name = "miko", version)]
struct Cli {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Image height in pixels.
    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Use an orthographic instead of a perspective camera.
    #[arg(long)]
    orthographic: bool,

    /// Texture image applied to every face; a flat white texture when omitted.
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Worker threads (defaults to the number of cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Rotation of the cube around the Y axis, in degrees.
    #[arg(long, default_value_t = 30.0)]
    spin: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let texture = match &cli.texture {
        Some(path) => Texture::open(path)
            .with_context(|| format!("load texture '{}'", path.display()))?,
        None => Texture::solid(Vector4::ONE),
    };

    let opts = EngineOpts {
        background: Vector4::new(0.07, 0.08, 0.11, 1.0),
        threads: cli.threads,
        ..EngineOpts::default()
    };
    let mut engine = Engine::with_opts(cli.height, cli.width, opts)?;

    let aspect = cli.width as f32 / cli.height as f32;
    let camera = if cli.orthographic {
        Camera {
            position: Vector3::new(2.0, 1.5, 3.0),
            width: 2.4 * aspect,
            height: 2.4,
            projection: Projection::Orthographic,
            ..Camera::default()
        }
    } else {
        Camera {
            position: Vector3::new(2.0, 1.5, 3.0),
            width: 0.8 * aspect,
            height: 0.8,
            ..Camera::default()
        }
    };

    let shader = LitShader::new(Arc::new(texture)).with_smoothness(0.8);
    let transform = Matrix4x4::rotation_y(cli.spin.to_radians());
    engine
        .set_camera(camera)?
        .add_light(Light::point(
            Vector3::new(2.5, 3.0, 2.0),
            Vector3::new(1.0, 0.95, 0.9),
            12.0,
        ))?
        .add_light(Light::directional(
            Vector3::new(-0.3, -1.0, -0.5),
            Vector3::new(0.4, 0.5, 0.7),
            0.3,
        ))?
        .add_light(Light::area(Vector3::ONE, 0.1))?
        .add_model(Model::new(primitives::cube(), shader)?.with_transform(transform));

    let frame = engine.get_frame()?;
    frame
        .to_image()?
        .save(&cli.out)
        .with_context(|| format!("write '{}'", cli.out.display()))?;

    println!(
        "wrote {}x{} frame to {}",
        frame.width(),
        frame.height(),
        cli.out.display()
    );
    Ok(())
}
