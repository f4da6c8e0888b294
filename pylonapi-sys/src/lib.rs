//! Hand-maintained declarations for the subset of the pylon C API
//! (`pylonc.h` / `PylonC`) used by the `pylonapi` crate.
//!
//! Naming follows the C headers, so the usual lint exceptions apply.

#![allow(non_camel_case_types, non_upper_case_globals, non_snake_case)]

use libc::{c_char, c_int, c_uint, c_void, size_t};

/// Result code shared by the pylon and GenApi C entry points.
/// Zero is success, anything else is an error code whose human-readable
/// form is available through [`GenApiGetLastErrorMessage`].
pub type GENAPIC_RESULT = c_uint;

pub const GENAPI_E_OK: GENAPIC_RESULT = 0;

/// Opaque device handle.
pub type PYLON_DEVICE_HANDLE = *mut c_void;
/// Opaque stream buffer handle, reported back in [`PylonGrabResult_t`].
pub type PYLON_STREAMBUFFER_HANDLE = *mut c_void;
/// Opaque pixel format converter handle.
pub type PYLON_IMAGE_FORMAT_CONVERTER_HANDLE = *mut c_void;

pub const PYLONC_INVALID_HANDLE: *mut c_void = std::ptr::null_mut();

// Device access mode flags for PylonDeviceOpen.
pub const PYLONC_ACCESS_MODE_MONITOR: c_int = 0x0001;
pub const PYLONC_ACCESS_MODE_CONTROL: c_int = 0x0002;
pub const PYLONC_ACCESS_MODE_STREAM: c_int = 0x0004;
pub const PYLONC_ACCESS_MODE_EVENT: c_int = 0x0008;
pub const PYLONC_ACCESS_MODE_EXCLUSIVE: c_int = 0x0010;

pub mod EPylonGrabStatus {
    pub type Type = i32;
    pub const UndefinedGrabStatus: Type = -1;
    pub const Idle: Type = 0;
    pub const Queued: Type = 1;
    pub const Grabbed: Type = 2;
    pub const Canceled: Type = 3;
    pub const Failed: Type = 4;
}

pub mod EPylonPayloadType {
    pub type Type = i32;
    pub const PayloadType_Undefined: Type = -1;
    pub const PayloadType_Image: Type = 0;
    pub const PayloadType_RawData: Type = 1;
    pub const PayloadType_File: Type = 2;
    pub const PayloadType_ChunkData: Type = 3;
}

/// GenICam PFNC pixel type codes.
pub mod EPylonPixelType {
    pub type Type = i32;
    pub const PixelType_Undefined: Type = -1;
    pub const PixelType_Mono8: Type = 0x0108_0001;
    pub const PixelType_Mono16: Type = 0x0110_0007;
    pub const PixelType_BayerGR8: Type = 0x0108_0008;
    pub const PixelType_BayerRG8: Type = 0x0108_0009;
    pub const PixelType_BayerGB8: Type = 0x0108_000A;
    pub const PixelType_BayerBG8: Type = 0x0108_000B;
    pub const PixelType_RGB8packed: Type = 0x0218_0014;
    pub const PixelType_BGR8packed: Type = 0x0218_0015;
}

pub mod EPylonImageOrientation {
    pub type Type = i32;
    pub const ImageOrientation_TopDown: Type = 0;
    pub const ImageOrientation_BottomUp: Type = 1;
}

/// Result of a finished grab, as filled in by [`PylonDeviceGrabSingleFrame`].
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PylonGrabResult_t {
    pub Context: *mut c_void,
    pub hBuffer: PYLON_STREAMBUFFER_HANDLE,
    pub pBuffer: *const c_void,
    pub Status: EPylonGrabStatus::Type,
    pub PayloadType: EPylonPayloadType::Type,
    pub PixelType: EPylonPixelType::Type,
    pub TimeStamp: u64,
    pub SizeX: c_int,
    pub SizeY: c_int,
    pub OffsetX: c_int,
    pub OffsetY: c_int,
    pub PaddingX: c_int,
    pub PaddingY: c_int,
    pub PayloadSize: u64,
    pub ErrorCode: c_uint,
    pub BlockID: u64,
}

extern "C" {
    pub fn PylonInitialize() -> GENAPIC_RESULT;
    pub fn PylonTerminate() -> GENAPIC_RESULT;

    pub fn PylonEnumerateDevices(numDevices: *mut size_t) -> GENAPIC_RESULT;
    pub fn PylonCreateDeviceByIndex(
        index: size_t,
        phDev: *mut PYLON_DEVICE_HANDLE,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceOpen(hDev: PYLON_DEVICE_HANDLE, accessMode: c_int) -> GENAPIC_RESULT;
    pub fn PylonDeviceClose(hDev: PYLON_DEVICE_HANDLE) -> GENAPIC_RESULT;
    pub fn PylonDestroyDevice(hDev: PYLON_DEVICE_HANDLE) -> GENAPIC_RESULT;

    pub fn PylonDeviceFeatureIsAvailable(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
    ) -> bool;
    pub fn PylonDeviceFeatureIsWritable(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
    ) -> bool;
    pub fn PylonDeviceFeatureFromString(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        pValue: *const c_char,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceFeatureToString(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        pBuf: *mut c_char,
        pBufLen: *mut size_t,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceSetFloatFeature(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        value: f64,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceGetFloatFeature(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        pValue: *mut f64,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceSetIntegerFeature(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        value: i64,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceGetIntegerFeature(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        pValue: *mut i64,
    ) -> GENAPIC_RESULT;
    pub fn PylonDeviceSetBooleanFeature(
        hDev: PYLON_DEVICE_HANDLE,
        pName: *const c_char,
        value: bool,
    ) -> GENAPIC_RESULT;

    pub fn PylonDeviceGrabSingleFrame(
        hDev: PYLON_DEVICE_HANDLE,
        channel: size_t,
        pBuffer: *mut c_void,
        bufferSize: size_t,
        pGrabResult: *mut PylonGrabResult_t,
        pReady: *mut bool,
        timeout: u32,
    ) -> GENAPIC_RESULT;

    pub fn PylonImageFormatConverterCreate(
        phConv: *mut PYLON_IMAGE_FORMAT_CONVERTER_HANDLE,
    ) -> GENAPIC_RESULT;
    pub fn PylonImageFormatConverterSetOutputPixelFormat(
        hConv: PYLON_IMAGE_FORMAT_CONVERTER_HANDLE,
        pixelType: EPylonPixelType::Type,
    ) -> GENAPIC_RESULT;
    pub fn PylonImageFormatConverterGetBufferSizeForConversion(
        hConv: PYLON_IMAGE_FORMAT_CONVERTER_HANDLE,
        sourcePixelType: EPylonPixelType::Type,
        sourceWidth: u32,
        sourceHeight: u32,
        pBufSize: *mut size_t,
    ) -> GENAPIC_RESULT;
    pub fn PylonImageFormatConverterConvert(
        hConv: PYLON_IMAGE_FORMAT_CONVERTER_HANDLE,
        pTargetBuffer: *mut c_void,
        targetBufferSize: size_t,
        pSourceBuffer: *const c_void,
        sourceBufferSize: size_t,
        sourcePixelType: EPylonPixelType::Type,
        sourceWidth: u32,
        sourceHeight: u32,
        sourcePaddingX: size_t,
        sourceOrientation: EPylonImageOrientation::Type,
    ) -> GENAPIC_RESULT;
    pub fn PylonImageFormatConverterDestroy(
        hConv: PYLON_IMAGE_FORMAT_CONVERTER_HANDLE,
    ) -> GENAPIC_RESULT;

    pub fn GenApiGetLastErrorMessage(pBuf: *mut c_char, pBufLen: *mut size_t) -> GENAPIC_RESULT;
    pub fn GenApiGetLastErrorDetail(pBuf: *mut c_char, pBufLen: *mut size_t) -> GENAPIC_RESULT;
}
