fn main() -> pylonapi::Result<()> {
    env_logger::init();

    let mut cam = pylonapi::open_first_device()?;
    println!("Using device {}", cam.model_name()?);

    let frame = cam.grab_frame(None)?;
    match frame.pixel(0, 0) {
        Some(rgb) => println!(
            "Frame {}x{}, first pixel: {:?}",
            frame.width(),
            frame.height(),
            rgb
        ),
        None => unreachable!("Could not get pixel value from frame!"),
    }

    cam.close()
}
