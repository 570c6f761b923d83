//! hidapi-backed transport and device discovery.

use std::ffi::CStr;

use hidapi::{HidApi, HidDevice};
use tracing::debug;

use hid_sidewinder_protocol::{SIDEWINDER_VENDOR_ID, STRATEGIC_COMMANDER_PRODUCT_ID};

use crate::transport::{HidTransport, ReadMode};
use crate::{DeviceError, DeviceResult, TransportError};

/// Paths of all connected Strategic Commanders, in enumeration order.
pub fn enumerate(api: &HidApi) -> Vec<std::ffi::CString> {
    api.device_list()
        .filter(|info| {
            info.vendor_id() == SIDEWINDER_VENDOR_ID
                && info.product_id() == STRATEGIC_COMMANDER_PRODUCT_ID
        })
        .map(|info| info.path().to_owned())
        .collect()
}

/// A real device handle behind the [`HidTransport`] seam.
pub struct HidapiTransport {
    device: HidDevice,
    /// Last blocking mode pushed to hidapi, to skip redundant mode switches.
    blocking: Option<bool>,
}

impl HidapiTransport {
    /// Open the first connected Strategic Commander.
    ///
    /// # Errors
    ///
    /// [`DeviceError::NotFound`] when no matching device is enumerated;
    /// [`DeviceError::Transport`] when the path failed to open (the device
    /// may have vanished between enumeration and open).
    pub fn open_first(api: &HidApi) -> DeviceResult<Self> {
        let paths = enumerate(api);
        let path = paths.first().ok_or(DeviceError::NotFound)?;
        Ok(Self::open_path(api, path)?)
    }

    /// Open a device on an explicit platform path.
    pub fn open_path(api: &HidApi, path: &CStr) -> Result<Self, TransportError> {
        debug!(?path, "opening Strategic Commander");
        let device = api
            .open_path(path)
            .map_err(|e| TransportError::Open(e.to_string()))?;
        Ok(Self {
            device,
            blocking: None,
        })
    }

    fn set_blocking(&mut self, blocking: bool) -> Result<(), TransportError> {
        if self.blocking != Some(blocking) {
            self.device
                .set_blocking_mode(blocking)
                .map_err(|e| TransportError::Read(e.to_string()))?;
            self.blocking = Some(blocking);
        }
        Ok(())
    }
}

impl HidTransport for HidapiTransport {
    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        // hidapi surfaces partial feature writes as errors, so success
        // means the whole report went out.
        self.device
            .send_feature_report(data)
            .map_err(|e| TransportError::Write(e.to_string()))?;
        Ok(data.len())
    }

    fn get_feature_report(
        &mut self,
        report_id: u8,
        buf: &mut [u8],
    ) -> Result<usize, TransportError> {
        if let Some(first) = buf.first_mut() {
            *first = report_id;
        }
        self.device
            .get_feature_report(buf)
            .map_err(|e| TransportError::Read(e.to_string()))
    }

    fn read_input_report(
        &mut self,
        buf: &mut [u8],
        mode: ReadMode,
    ) -> Result<usize, TransportError> {
        match mode {
            ReadMode::Blocking => {
                self.set_blocking(true)?;
                self.device.read(buf)
            }
            ReadMode::Timeout(ms) => {
                self.set_blocking(true)?;
                self.device.read_timeout(buf, ms.min(i32::MAX as u32) as i32)
            }
            ReadMode::NonBlocking => {
                self.set_blocking(false)?;
                self.device.read(buf)
            }
        }
        .map_err(|e| TransportError::Read(e.to_string()))
    }
}
