//! Vendor protocol configuration surface.
//!
//! The device advertises which protocol functions it supports through a
//! per-page table built once at boot and handed to the USB collaborator.
//! Nothing in this core re-reads or mutates it afterwards.

/// Protocol function pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FunctionPage {
    Info = 0,
    Mouse = 1,
    Debug = 2,
}

/// Number of function pages a device can populate.
pub const FUNCTION_PAGE_COUNT: usize = 3;

/// Function IDs on the Info page.
pub mod info {
    pub const VERSION: u8 = 0x00;
    pub const FW_INFO: u8 = 0x01;
    pub const SUPPORTED_FUNCTION_PAGES: u8 = 0x02;
    pub const SUPPORTED_FUNCTIONS: u8 = 0x03;
}

/// Immutable boot-time protocol configuration.
///
/// Pages left unset report an empty function list rather than an error;
/// a host probing an unsupported page just sees zero length.
pub struct ProtocolConfig {
    device_name: &'static str,
    functions: [&'static [u8]; FUNCTION_PAGE_COUNT],
}

impl ProtocolConfig {
    pub const fn new(device_name: &'static str) -> Self {
        Self {
            device_name,
            functions: [&[]; FUNCTION_PAGE_COUNT],
        }
    }

    /// Register the ordered function-ID list for one page.
    pub fn set_functions(&mut self, page: FunctionPage, ids: &'static [u8]) {
        self.functions[page as usize] = ids;
    }

    pub fn device_name(&self) -> &'static str {
        self.device_name
    }

    /// Ordered function IDs supported on `page`.
    pub fn functions(&self, page: FunctionPage) -> &'static [u8] {
        self.functions[page as usize]
    }

    /// Byte length of the function list on `page`.
    pub fn functions_len(&self, page: FunctionPage) -> usize {
        self.functions[page as usize].len()
    }
}
