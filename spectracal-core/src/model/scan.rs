//! Scan configuration and raw scan data records
//!
//! A scan configuration tells the acquisition layer which patterns to project;
//! a scan data record is what comes back: detector samples plus the
//! environment they were taken in and the configuration that produced them.
//! Text fields are fixed-size NUL-padded byte arrays so records keep one
//! stored layout.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use heapless::Vec;

use crate::{
    constants::{ADC_DATA_LEN, CONFIG_NAME_LEN, SCAN_NAME_LEN, SERIAL_NUMBER_LEN, TIMESTAMP_LEN},
    errors::{CalError, CalResult},
    model::FrameBufferDescriptor,
    traits::Validate,
};

/// Pattern sequence used for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ScanType {
    /// One column pattern per spectral point
    Column = 0,
    /// Hadamard-encoded column patterns
    Hadamard = 1,
    /// Multiple sections, each with its own width and range
    Slew = 2,
}

impl ScanType {
    /// Decode a stored scan type byte
    pub fn from_u8(raw: u8) -> CalResult<Self> {
        match raw {
            0 => Ok(Self::Column),
            1 => Ok(Self::Hadamard),
            2 => Ok(Self::Slew),
            _ => Err(CalError::IllegalScanType {
                reason: "unknown scan type",
            }),
        }
    }

    /// Stored scan type byte
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Scan configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Pattern sequence
    pub scan_type: ScanType,
    /// Slot the configuration is stored in on the instrument
    pub config_index: u16,
    /// Serial number of the instrument the configuration was made for
    pub serial_number: [u8; SERIAL_NUMBER_LEN],
    /// Human readable name, NUL padded
    pub config_name: [u8; CONFIG_NAME_LEN],
    /// First wavelength of the scan in nm
    pub wavelength_start_nm: u16,
    /// Last wavelength of the scan in nm
    pub wavelength_end_nm: u16,
    /// Width of each projected pattern in DMD columns
    pub width_px: u8,
    /// Number of spectral points (patterns) across the range
    pub num_patterns: u16,
    /// Scans averaged into one result
    pub num_repeats: u16,
}

impl ScanConfig {
    /// Column scan with the given range and pattern geometry
    pub fn column(
        wavelength_start_nm: u16,
        wavelength_end_nm: u16,
        width_px: u8,
        num_patterns: u16,
    ) -> Self {
        Self {
            scan_type: ScanType::Column,
            config_index: 0,
            serial_number: [0; SERIAL_NUMBER_LEN],
            config_name: [0; CONFIG_NAME_LEN],
            wavelength_start_nm,
            wavelength_end_nm,
            width_px,
            num_patterns,
            num_repeats: 1,
        }
    }

    /// Set the configuration name, truncating at [`CONFIG_NAME_LEN`] bytes
    pub fn with_name(mut self, name: &str) -> Self {
        self.config_name = padded(name);
        self
    }

    /// Set the serial number, truncating at [`SERIAL_NUMBER_LEN`] bytes
    pub fn with_serial(mut self, serial: &str) -> Self {
        self.serial_number = padded(serial);
        self
    }

    /// Configuration name up to the first NUL, if it is valid UTF-8
    pub fn name(&self) -> Option<&str> {
        trimmed(&self.config_name)
    }

    /// Check the patterns fit the frame buffers the display path provides
    pub fn check_pattern_capacity(&self, frame_buffers: &FrameBufferDescriptor) -> CalResult<()> {
        let required = self.num_patterns as usize;
        let available = frame_buffers.pattern_capacity() as usize;
        if required > available {
            return Err(CalError::InsufficientMemory {
                required,
                available,
            });
        }
        Ok(())
    }
}

impl Validate for ScanConfig {
    fn validate(&self) -> CalResult<()> {
        if self.wavelength_start_nm >= self.wavelength_end_nm {
            return Err(CalError::invalid("scan wavelength range is empty"));
        }
        if self.width_px == 0 {
            return Err(CalError::invalid("pattern width is zero"));
        }
        if self.num_patterns == 0 {
            return Err(CalError::invalid("scan has no patterns"));
        }
        if self.num_repeats == 0 {
            return Err(CalError::invalid("scan has no repeats"));
        }
        Ok(())
    }
}

/// Packed wall-clock time of a scan, as kept by the instrument RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanTimestamp {
    /// Years since 2000
    pub year: u8,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-6, Sunday = 0
    pub day_of_week: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl ScanTimestamp {
    /// Stored byte order
    pub const fn to_bytes(self) -> [u8; TIMESTAMP_LEN] {
        [
            self.year,
            self.month,
            self.day,
            self.day_of_week,
            self.hour,
            self.minute,
            self.second,
        ]
    }

    /// Inverse of [`ScanTimestamp::to_bytes`]
    pub const fn from_bytes(bytes: [u8; TIMESTAMP_LEN]) -> Self {
        Self {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            day_of_week: bytes[3],
            hour: bytes[4],
            minute: bytes[5],
            second: bytes[6],
        }
    }
}

/// Raw detector samples of one scan plus acquisition context
#[derive(Debug, Clone, PartialEq)]
pub struct ScanData {
    /// Scan name, NUL padded
    pub scan_name: [u8; SCAN_NAME_LEN],
    /// When the scan was taken
    pub timestamp: ScanTimestamp,
    /// Detector temperature in hundredths of °C
    pub detector_temp_hundredths: i16,
    /// Relative humidity in hundredths of %RH
    pub humidity_hundredths: u16,
    /// Lamp photodiode reading
    pub lamp_pd: u16,
    /// Programmable gain amplifier setting
    pub pga_gain: u8,
    /// Configuration the scan was taken with
    pub config: ScanConfig,
    /// ADC samples, one per projected pattern and repeat
    pub adc_data: Vec<i32, ADC_DATA_LEN>,
}

impl ScanData {
    /// Empty scan for a configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            scan_name: [0; SCAN_NAME_LEN],
            timestamp: ScanTimestamp::default(),
            detector_temp_hundredths: 0,
            humidity_hundredths: 0,
            lamp_pd: 0,
            pga_gain: 1,
            config,
            adc_data: Vec::new(),
        }
    }

    /// Set the scan name, truncating at [`SCAN_NAME_LEN`] bytes
    pub fn with_name(mut self, name: &str) -> Self {
        self.scan_name = padded(name);
        self
    }

    /// Scan name up to the first NUL, if it is valid UTF-8
    pub fn name(&self) -> Option<&str> {
        trimmed(&self.scan_name)
    }

    /// Copy samples in, failing if they exceed [`ADC_DATA_LEN`]
    pub fn set_samples(&mut self, samples: &[i32]) -> CalResult<()> {
        self.adc_data.clear();
        self.adc_data
            .extend_from_slice(samples)
            .map_err(|_| CalError::InsufficientMemory {
                required: samples.len(),
                available: ADC_DATA_LEN,
            })
    }

    /// Detector temperature in °C
    pub fn detector_temp_c(&self) -> f64 {
        f64::from(self.detector_temp_hundredths) / 100.0
    }
}

impl Validate for ScanData {
    fn validate(&self) -> CalResult<()> {
        self.config.validate()
    }
}

/// NUL-padded copy of `text`, cut at the last char boundary that fits
fn padded<const N: usize>(text: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let mut len = text.len().min(N);
    while !text.is_char_boundary(len) {
        len -= 1;
    }
    out[..len].copy_from_slice(&text.as_bytes()[..len]);
    out
}

fn trimmed(bytes: &[u8]) -> Option<&str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    core::str::from_utf8(&bytes[..end]).ok()
}
