use std::mem::MaybeUninit;
use std::sync::Once;

#[cfg(feature = "image")]
use std::path::{Path, PathBuf};

use libc::{c_char, c_void, size_t};
use pylonapi_sys::*;

#[cfg(feature = "image")]
use image::{ImageBuffer, ImageFormat, Rgb};

use crate::error::{check, first_error, Error, Result};
use crate::image::Frame;
#[cfg(feature = "image")]
use crate::image::output_path;
use crate::settings::CameraSettings;

/// How long a single-frame grab waits for the sensor before giving up.
pub const DEFAULT_GRAB_TIMEOUT_MS: u32 = 5000;

/// Nul-terminated GenICam feature name, usable as a `*const c_char`.
macro_rules! cstr {
    ($s:literal) => {
        concat!($s, "\0").as_ptr() as *const c_char
    };
}

/// Generates a getter/setter pair for a float GenICam feature.
///
/// No range validation happens on this side; the device knows its own
/// limits and rejects values outside them.
macro_rules! float_feature {
    ($(#[$meta:meta])* $name:ident => $feature:literal) => {
        paste::paste! {
            $(#[$meta])*
            pub fn $name(&self) -> Result<f64> {
                let mut value = f64::NAN;
                check(unsafe {
                    PylonDeviceGetFloatFeature(self.device_handle, cstr!($feature), &mut value)
                })?;
                Ok(value)
            }

            #[doc = "Writes the `" $feature "` feature on the device."]
            pub fn [<set_ $name>](&mut self, value: f64) -> Result<()> {
                check(unsafe {
                    PylonDeviceSetFloatFeature(self.device_handle, cstr!($feature), value)
                })
            }
        }
    };
}

static RUNTIME_INIT: Once = Once::new();

// The runtime stays up for the rest of the process; PylonTerminate is
// never called.
fn ensure_runtime() {
    RUNTIME_INIT.call_once(|| {
        let code = unsafe { PylonInitialize() };
        if code != GENAPI_E_OK {
            log::error!("PylonInitialize failed with code {code:#010x}");
        }
    });
}

/// Connected camera with exclusive ownership of the device handle and the
/// pixel format converter used for color output.
pub struct Camera {
    device_handle: PYLON_DEVICE_HANDLE,
    converter_handle: PYLON_IMAGE_FORMAT_CONVERTER_HANDLE,
}

/// Opens the first camera the transport layer can find and puts it into a
/// known manual state: RGB output where available, all automatic gain,
/// exposure and white balance turned off, and [`CameraSettings::default`]
/// applied.
///
/// Any SDK failure on the way is logged and returned unchanged.
pub fn open_first_device() -> Result<Camera> {
    open_first_device_inner().map_err(|err| {
        log::error!("camera construction failed: {err}");
        err
    })
}

fn open_first_device_inner() -> Result<Camera> {
    ensure_runtime();

    let mut num_devices: size_t = 0;
    check(unsafe { PylonEnumerateDevices(&mut num_devices) })?;
    if num_devices == 0 {
        return Err(Error::NoDevice);
    }

    let mut device_handle: PYLON_DEVICE_HANDLE = PYLONC_INVALID_HANDLE;
    check(unsafe { PylonCreateDeviceByIndex(0, &mut device_handle) })?;

    // From here on Drop releases whatever was acquired if setup fails.
    let mut camera = Camera {
        device_handle,
        converter_handle: PYLONC_INVALID_HANDLE,
    };
    check(unsafe {
        PylonDeviceOpen(
            camera.device_handle,
            PYLONC_ACCESS_MODE_CONTROL | PYLONC_ACCESS_MODE_STREAM,
        )
    })?;

    camera.configure_acquisition()?;
    camera.apply_settings(&CameraSettings::default())?;

    let mut converter_handle: PYLON_IMAGE_FORMAT_CONVERTER_HANDLE = PYLONC_INVALID_HANDLE;
    check(unsafe { PylonImageFormatConverterCreate(&mut converter_handle) })?;
    camera.converter_handle = converter_handle;
    check(unsafe {
        PylonImageFormatConverterSetOutputPixelFormat(
            camera.converter_handle,
            EPylonPixelType::PixelType_RGB8packed,
        )
    })?;

    Ok(camera)
}

impl Camera {
    float_feature! {
        /// Analog gain in dB. The daA2500-14uc accepts 0 to 24 dB.
        gain => "Gain"
    }
    float_feature! {
        /// Exposure time in microseconds, 10 to 1000000 on the daA2500-14uc.
        exposure => "ExposureTime"
    }
    float_feature! {
        /// Brightness, -1 to 1.
        brightness => "BslBrightness"
    }
    float_feature! {
        /// Contrast, -1 to 1.
        contrast => "BslContrast"
    }
    float_feature! {
        /// Black level offset in DN.
        black_level => "BlackLevel"
    }
    float_feature! {
        /// Gamma correction exponent, 0.25 to 2 on the daA2500-14uc.
        gamma => "Gamma"
    }
    float_feature! {
        /// Hue shift in degrees, -180 to 180.
        hue => "BslHueValue"
    }
    float_feature! {
        /// Color saturation factor, 0 to 4.
        saturation => "BslSaturationValue"
    }
    float_feature! {
        /// Sharpness enhancement, 0 to 1.
        sharpness => "SharpnessEnhancement"
    }

    /// Sets the white balance ratio for each channel that is given.
    /// Channels passed as `None` keep their current ratio.
    pub fn set_white_balance(
        &mut self,
        red: Option<f64>,
        green: Option<f64>,
        blue: Option<f64>,
    ) -> Result<()> {
        if let Some(red) = red {
            self.set_balance_ratio(cstr!("Red"), red)?;
        }
        if let Some(green) = green {
            self.set_balance_ratio(cstr!("Green"), green)?;
        }
        if let Some(blue) = blue {
            self.set_balance_ratio(cstr!("Blue"), blue)?;
        }
        Ok(())
    }

    fn set_balance_ratio(&mut self, channel: *const c_char, value: f64) -> Result<()> {
        self.set_enum_feature(cstr!("BalanceRatioSelector"), channel)?;
        check(unsafe {
            PylonDeviceSetFloatFeature(self.device_handle, cstr!("BalanceRatio"), value)
        })
    }

    /// Writes a complete parameter set to the device.
    pub fn apply_settings(&mut self, settings: &CameraSettings) -> Result<()> {
        self.set_gain(settings.gain_db)?;
        self.set_black_level(settings.black_level)?;
        self.set_gamma(settings.gamma)?;
        self.set_exposure(settings.exposure_us)?;
        self.set_white_balance(
            Some(settings.balance_red),
            Some(settings.balance_green),
            Some(settings.balance_blue),
        )?;
        self.set_hue(settings.hue)?;
        self.set_saturation(settings.saturation)?;
        self.set_contrast(settings.contrast)?;
        self.set_brightness(settings.brightness)
    }

    /// Model name reported by the device, e.g. `daA2500-14uc`.
    pub fn model_name(&self) -> Result<String> {
        let name = cstr!("DeviceModelName");
        let mut len: size_t = 0;
        check(unsafe {
            PylonDeviceFeatureToString(self.device_handle, name, std::ptr::null_mut(), &mut len)
        })?;
        let mut buf = vec![0u8; len];
        check(unsafe {
            PylonDeviceFeatureToString(self.device_handle, name, buf.as_mut_ptr() as *mut c_char, &mut len)
        })?;
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
    }

    /// Grabs one frame, blocking the calling thread until the sensor
    /// delivers it or the timeout elapses
    /// ([`DEFAULT_GRAB_TIMEOUT_MS`] when `None`).
    ///
    /// The raw transport buffer is converted to interleaved RGB8 before
    /// being returned, so the resulting [`Frame`] is independent of any
    /// SDK-owned memory.
    pub fn grab_frame(&mut self, timeout_ms: Option<u32>) -> Result<Frame> {
        let timeout_ms = timeout_ms.unwrap_or(DEFAULT_GRAB_TIMEOUT_MS);

        let mut payload_size: i64 = 0;
        check(unsafe {
            PylonDeviceGetIntegerFeature(self.device_handle, cstr!("PayloadSize"), &mut payload_size)
        })?;
        let mut transport = transport_buffer(payload_size)?;

        let mut grab_result = MaybeUninit::<PylonGrabResult_t>::zeroed();
        let mut ready = false;
        check(unsafe {
            PylonDeviceGrabSingleFrame(
                self.device_handle,
                0,
                transport.as_mut_ptr() as *mut c_void,
                transport.len(),
                grab_result.as_mut_ptr(),
                &mut ready,
                timeout_ms,
            )
        })?;
        if !ready {
            return Err(Error::Timeout { timeout_ms });
        }
        let grab_result = unsafe { grab_result.assume_init() };
        if grab_result.Status != EPylonGrabStatus::Grabbed {
            return Err(Error::GrabFailed {
                status: grab_result.Status,
                error_code: grab_result.ErrorCode,
            });
        }
        self.convert(&transport, &grab_result)
    }

    fn convert(&mut self, transport: &[u8], grab: &PylonGrabResult_t) -> Result<Frame> {
        let width = grab.SizeX as u32;
        let height = grab.SizeY as u32;

        let mut converted_size: size_t = 0;
        check(unsafe {
            PylonImageFormatConverterGetBufferSizeForConversion(
                self.converter_handle,
                grab.PixelType,
                width,
                height,
                &mut converted_size,
            )
        })?;
        let mut converted = vec![0u8; converted_size];
        check(unsafe {
            PylonImageFormatConverterConvert(
                self.converter_handle,
                converted.as_mut_ptr() as *mut c_void,
                converted.len(),
                transport.as_ptr() as *const c_void,
                transport.len(),
                grab.PixelType,
                width,
                height,
                grab.PaddingX as size_t,
                EPylonImageOrientation::ImageOrientation_TopDown,
            )
        })?;
        // Converter output is packed, no row padding.
        Ok(Frame::from_parts(converted, width, height, 0))
    }

    /// Grabs one frame and writes it to `dir/name.ext`, with the extension
    /// taken from `format`. Returns the path of the written file.
    #[cfg(feature = "image")]
    pub fn capture_image<P: AsRef<Path>>(
        &mut self,
        dir: P,
        name: &str,
        format: ImageFormat,
    ) -> Result<PathBuf> {
        let frame = self.grab_frame(None)?;
        let path = output_path(dir.as_ref(), name, format);
        let buffer = ImageBuffer::<Rgb<u8>, Vec<u8>>::try_from(frame)?;
        buffer.save_with_format(&path, format)?;
        log::debug!("wrote capture to {}", path.display());
        Ok(path)
    }

    /// Closes and destroys the device and converter. Prefer this over
    /// relying on `Drop` when release errors matter.
    ///
    /// Every release step runs even if an earlier one fails, so a
    /// converter error cannot leave the device open; the first failure
    /// is the one reported.
    pub fn close(mut self) -> Result<()> {
        let device = std::mem::replace(&mut self.device_handle, PYLONC_INVALID_HANDLE);
        let converter = std::mem::replace(&mut self.converter_handle, PYLONC_INVALID_HANDLE);
        let converter_destroyed = if converter.is_null() {
            Ok(())
        } else {
            check(unsafe { PylonImageFormatConverterDestroy(converter) })
        };
        let device_closed = check(unsafe { PylonDeviceClose(device) });
        let device_destroyed = check(unsafe { PylonDestroyDevice(device) });
        first_error([converter_destroyed, device_closed, device_destroyed])
    }

    /// Fixed acquisition setup, applied once at construction: RGB pixel
    /// format when the device offers it, sRGB color space, rolling
    /// shutter, and all automatic adjustments off.
    fn configure_acquisition(&mut self) -> Result<()> {
        if self.feature_available(cstr!("EnumEntry_PixelFormat_RGB8")) {
            self.set_enum_feature(cstr!("PixelFormat"), cstr!("RGB8"))?;
        }
        self.set_enum_feature(cstr!("BslColorSpaceMode"), cstr!("sRGB"))?;
        self.set_enum_feature(cstr!("SensorShutterMode"), cstr!("Rolling"))?;
        self.set_enum_feature(cstr!("GainAuto"), cstr!("Off"))?;
        self.set_enum_feature(cstr!("ExposureAuto"), cstr!("Off"))?;
        self.set_enum_feature(cstr!("BalanceWhiteAuto"), cstr!("Off"))?;
        self.set_enum_feature(cstr!("BslContrastMode"), cstr!("Linear"))
    }

    fn set_enum_feature(&mut self, name: *const c_char, value: *const c_char) -> Result<()> {
        check(unsafe { PylonDeviceFeatureFromString(self.device_handle, name, value) })
    }

    fn feature_available(&self, name: *const c_char) -> bool {
        unsafe { PylonDeviceFeatureIsAvailable(self.device_handle, name) }
    }
}

/// Allocates the transport buffer for one grab. `PayloadSize` comes from
/// the device as a signed 64-bit value; anything nonpositive or wider
/// than the address space is rejected rather than wrapped into an
/// allocation.
fn transport_buffer(payload_size: i64) -> Result<Vec<u8>> {
    let size: usize = payload_size.try_into().map_err(|_| Error::BufferLayout)?;
    if size == 0 {
        return Err(Error::BufferLayout);
    }
    Ok(vec![0u8; size])
}

impl Drop for Camera {
    fn drop(&mut self) {
        if !self.converter_handle.is_null() {
            unsafe {
                PylonImageFormatConverterDestroy(self.converter_handle);
            }
            self.converter_handle = PYLONC_INVALID_HANDLE;
        }
        if !self.device_handle.is_null() {
            unsafe {
                PylonDeviceClose(self.device_handle);
                PylonDestroyDevice(self.device_handle);
            }
            self.device_handle = PYLONC_INVALID_HANDLE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::transport_buffer;
    use crate::error::Error;

    #[test]
    fn transport_buffer_matches_reported_payload_size() {
        let buffer = transport_buffer(64).unwrap();
        assert_eq!(buffer.len(), 64);
    }

    #[test]
    fn negative_payload_size_is_rejected() {
        assert!(matches!(transport_buffer(-1), Err(Error::BufferLayout)));
    }

    #[test]
    fn zero_payload_size_is_rejected() {
        assert!(matches!(transport_buffer(0), Err(Error::BufferLayout)));
    }
}
