use argh::FromArgs;
use eframe::egui;
use glam::{DMat2, DMat3};

use planar_transforms::builders::{affine_matrix, affinity, isometry, projectivity, similarity};
use planar_viz::app::FigureApp;

#[derive(FromArgs)]
/// Interactive before/after figure for a 2D projective transformation.
struct Args {
    /// transform family: isometry, mirror, similarity, affinity or projectivity
    #[argh(option, short = 't', default = "String::from(\"projectivity\")")]
    transform: String,

    /// rotation angle in degrees
    #[argh(option, default = "30.0")]
    theta: f64,

    /// scaling-axis orientation in degrees (affinity)
    #[argh(option, default = "0.0")]
    phi: f64,

    /// isotropic scale (similarity) or first scale factor (affinity)
    #[argh(option, short = 's', default = "1.25")]
    scale: f64,

    /// second scale factor (affinity)
    #[argh(option, default = "0.6")]
    scale2: f64,

    /// translation in the x direction
    #[argh(option, default = "0.25")]
    tx: f64,

    /// translation in the y direction
    #[argh(option, default = "0.1")]
    ty: f64,

    /// first vanishing-point control (projectivity)
    #[argh(option, default = "0.4")]
    v1: f64,

    /// second vanishing-point control (projectivity)
    #[argh(option, default = "0.0")]
    v2: f64,
}

fn build_transform(args: &Args) -> DMat3 {
    let theta = args.theta.to_radians();
    let phi = args.phi.to_radians();
    match args.transform.as_str() {
        "isometry" => isometry(1.0, theta, args.tx, args.ty),
        "mirror" => isometry(-1.0, theta, args.tx, args.ty),
        "similarity" => similarity(args.scale, theta, args.tx, args.ty),
        "affinity" => affinity(
            affine_matrix(theta, phi, args.scale, args.scale2),
            args.tx,
            args.ty,
        ),
        "projectivity" => projectivity(
            affine_matrix(theta, phi, args.scale, args.scale2),
            args.tx,
            args.ty,
            args.v1,
            args.v2,
            1.0,
        ),
        other => {
            log::warn!("unknown transform family '{other}', falling back to projectivity");
            projectivity(DMat2::IDENTITY, args.tx, args.ty, args.v1, args.v2, 1.0)
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let h = build_transform(&args);
    log::info!("transform family: {}", args.transform);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 680.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Planar Figure",
        options,
        Box::new(move |_cc| Ok(Box::new(FigureApp::new(h, None)))),
    )
}
