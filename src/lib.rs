//! High-level bindings for operating a Basler camera through the pylon
//! C API.
//!
//! The crate is a thin facade: device discovery, buffer management,
//! triggering, timeout handling and pixel format conversion are all done
//! by the vendor runtime, reached through [`pylonapi_sys`]. What this
//! crate adds is safe ownership of the device handle, typed parameter
//! accessors, and a one-shot capture that lands on disk as a color image.
//!
//! ```no_run
//! # fn main() -> pylonapi::Result<()> {
//! let mut cam = pylonapi::open_first_device()?;
//! cam.set_exposure(5037.0)?;
//! cam.set_gamma(1.134)?;
//! let path = cam.capture_image("captures", "ink_circle_4", image::ImageFormat::Jpeg)?;
//! println!("saved {}", path.display());
//! cam.close()
//! # }
//! ```

pub use camera::*;
pub use error::{Error, Result};
pub use self::image::Frame;
pub use settings::CameraSettings;

pub mod camera;
pub mod error;
pub mod image;
pub mod settings;

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serial_test::file_serial;

    use crate::open_first_device;

    #[test]
    #[ignore = "requires a connected Basler camera"]
    #[file_serial]
    fn open_and_close_first_device() -> crate::Result<()> {
        let cam = open_first_device()?;
        assert!(!cam.model_name()?.is_empty());
        cam.close()
    }

    #[test]
    #[ignore = "requires a connected Basler camera"]
    #[file_serial]
    fn exposure_round_trips_through_the_device() -> crate::Result<()> {
        let mut cam = open_first_device()?;
        cam.set_exposure(5037.0)?;
        assert_relative_eq!(cam.exposure()?, 5037.0, max_relative = 0.01);
        cam.close()
    }

    #[test]
    #[ignore = "requires a connected Basler camera"]
    #[file_serial]
    fn grab_returns_a_color_frame() -> crate::Result<()> {
        let mut cam = open_first_device()?;
        let frame = cam.grab_frame(None)?;
        assert!(frame.width() > 0);
        assert!(frame.height() > 0);
        assert!(frame.pixel(0, 0).is_some());
        cam.close()
    }

    #[cfg(feature = "image")]
    #[test]
    #[ignore = "requires a connected Basler camera"]
    #[file_serial]
    fn capture_writes_an_image_file() -> crate::Result<()> {
        let mut cam = open_first_device()?;
        let path = cam.capture_image(
            std::env::temp_dir(),
            "pylonapi_capture_test",
            image::ImageFormat::Jpeg,
        )?;
        assert!(path.exists());
        std::fs::remove_file(path).ok();
        cam.close()
    }
}
