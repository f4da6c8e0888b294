use std::ffi::CStr;

use libc::{c_char, size_t};
use pylonapi_sys::{GenApiGetLastErrorMessage, GENAPIC_RESULT, GENAPI_E_OK};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the facade. SDK failures pass through unmodified,
/// carrying the code and the runtime's own description of what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pylon SDK call failed with code {code:#010x}: {message}")]
    Sdk { code: GENAPIC_RESULT, message: String },

    #[error("no camera device connected")]
    NoDevice,

    #[error("no frame received within {timeout_ms} ms")]
    Timeout { timeout_ms: u32 },

    #[error("grab finished with status {status} (device error code {error_code:#010x})")]
    GrabFailed { status: i32, error_code: u32 },

    #[error("buffer size does not match the frame layout")]
    BufferLayout,

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Maps a raw result code to `Result`, attaching the SDK's last error
/// message on failure.
pub(crate) fn check(code: GENAPIC_RESULT) -> Result<()> {
    if code == GENAPI_E_OK {
        Ok(())
    } else {
        Err(Error::Sdk {
            code,
            message: last_error_message(),
        })
    }
}

/// Collapses a sequence of already-evaluated release results into the
/// first failure. Used by teardown, where every release step must run
/// regardless of earlier failures.
pub(crate) fn first_error<I>(results: I) -> Result<()>
where
    I: IntoIterator<Item = Result<()>>,
{
    results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
}

/// Fetches the human-readable message for the most recent error on this
/// thread. Best effort: a failure here degrades to a placeholder rather
/// than masking the original error.
fn last_error_message() -> String {
    let mut len: size_t = 0;
    let res = unsafe { GenApiGetLastErrorMessage(std::ptr::null_mut(), &mut len) };
    if res != GENAPI_E_OK || len == 0 {
        return String::from("<no error message available>");
    }
    let mut buf = vec![0u8; len];
    let res = unsafe { GenApiGetLastErrorMessage(buf.as_mut_ptr() as *mut c_char, &mut len) };
    if res != GENAPI_E_OK {
        return String::from("<no error message available>");
    }
    match CStr::from_bytes_until_nul(&buf) {
        Ok(message) => message.to_string_lossy().into_owned(),
        Err(_) => String::from("<no error message available>"),
    }
}

#[cfg(test)]
mod tests {
    use super::{first_error, Error};

    #[test]
    fn timeout_display_names_the_deadline() {
        let err = Error::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "no frame received within 5000 ms");
    }

    #[test]
    fn sdk_display_carries_code_and_message() {
        let err = Error::Sdk {
            code: 0xC100_0001,
            message: String::from("Node is not writable"),
        };
        let text = err.to_string();
        assert!(text.contains("0xc1000001"));
        assert!(text.contains("Node is not writable"));
    }

    #[test]
    fn grab_failed_display_carries_status_and_device_code() {
        let err = Error::GrabFailed {
            status: 4,
            error_code: 0xE100_0014,
        };
        let text = err.to_string();
        assert!(text.contains("status 4"));
        assert!(text.contains("0xe1000014"));
    }

    #[test]
    fn no_device_display_is_self_explanatory() {
        assert_eq!(Error::NoDevice.to_string(), "no camera device connected");
    }

    #[test]
    fn first_error_reports_the_earliest_failure() {
        let combined = first_error([
            Ok(()),
            Err(Error::Timeout { timeout_ms: 5000 }),
            Err(Error::NoDevice),
        ]);
        assert!(matches!(combined, Err(Error::Timeout { timeout_ms: 5000 })));
    }

    #[test]
    fn first_error_of_all_ok_is_ok() {
        assert!(first_error([Ok(()), Ok(()), Ok(())]).is_ok());
    }
}
