use std::path::PathBuf;

use clap::Parser;
use orbview::options::Options;
use orbview::viewer::DEFAULT_MESH;
use orbview::Viewer;

/// Orbit-camera mesh viewer with a live lighting panel.
#[derive(Parser)]
#[command(name = "orbview", version, about)]
struct Cli {
    /// Wavefront OBJ file to display
    #[arg(default_value = DEFAULT_MESH)]
    mesh: PathBuf,

    /// TOML options file (partial files are fine)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// WGSL file replacing the built-in model shader
    #[arg(long, value_name = "FILE")]
    shader: Option<PathBuf>,

    /// Where screenshots are written
    #[arg(long, value_name = "DIR")]
    screenshot_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let options = match cli.options.as_deref().map(Options::load).transpose() {
        Ok(options) => options.unwrap_or_default(),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut builder = Viewer::builder().with_mesh(cli.mesh).with_options(options);
    if let Some(shader) = cli.shader {
        builder = builder.with_shader(shader);
    }
    if let Some(dir) = cli.screenshot_dir {
        builder = builder.with_screenshot_dir(dir);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
