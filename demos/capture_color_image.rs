//! One-shot capture with a manually tuned parameter set, the way the
//! camera is used on an inspection bench: open, override a few settings,
//! take one picture, close.

fn main() -> pylonapi::Result<()> {
    env_logger::init();

    let mut cam = pylonapi::open_first_device()?;
    println!("Using device {}", cam.model_name()?);

    cam.set_exposure(5037.0)?;
    cam.set_gamma(1.134)?;
    cam.set_brightness(-0.1)?;
    cam.set_contrast(0.14)?;
    cam.set_sharpness(0.5)?;

    std::fs::create_dir_all("captures").expect("Could not create output directory!");
    let path = cam.capture_image("captures", "ink_circle_4", image::ImageFormat::Jpeg)?;
    println!("Saved {}", path.display());

    cam.close()
}
