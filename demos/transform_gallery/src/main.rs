use argh::FromArgs;
use std::path::PathBuf;

use glam::DMat3;
use planar::transforms::builders::{affine_matrix, affinity, isometry, projectivity, similarity};
use planar::viz::{render_figure, save_figure, FigureSpec};

#[derive(FromArgs)]
/// Render one before/after PNG per transformation family.
struct Args {
    /// directory to write the figures into
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    out_dir: PathBuf,

    /// lower bound of the displayed axis range
    #[argh(option, default = "-2.0")]
    axis_min: f64,

    /// upper bound of the displayed axis range
    #[argh(option, default = "2.0")]
    axis_max: f64,
}

fn gallery() -> Vec<(&'static str, DMat3)> {
    let theta = 30f64.to_radians();
    vec![
        ("isometry", isometry(1.0, theta, 0.25, 0.1)),
        ("mirror", isometry(-1.0, theta, 0.25, 0.1)),
        ("similarity", similarity(1.25, theta, -0.5, 0.25)),
        (
            "affinity",
            affinity(affine_matrix(theta, 15f64.to_radians(), 1.5, 0.6), 0.0, 0.0),
        ),
        (
            "projectivity",
            projectivity(
                affine_matrix(theta, 0.0, 1.0, 1.0),
                0.0,
                0.0,
                0.4,
                0.1,
                1.0,
            ),
        ),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let spec = FigureSpec {
        axis_range: (args.axis_min, args.axis_max),
        ..Default::default()
    };

    std::fs::create_dir_all(&args.out_dir)?;

    for (name, h) in gallery() {
        let img = render_figure(&h, None, &spec)?;
        let path = args.out_dir.join(format!("{name}.png"));
        save_figure(&img, &path)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
