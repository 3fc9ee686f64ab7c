//! Scan configuration images (`cvc#c#vvcvv`)
//!
//! The same field run is embedded in scan data images, so the field readers
//! and writers are shared with [`super::scan`].

use spectracal_core::{
    constants::{CONFIG_NAME_LEN, SERIAL_NUMBER_LEN},
    CalError, CalResult, ScanConfig, ScanType, Validate,
};

use crate::{
    format::FormatDescriptor,
    image::{self, ByteReader, ByteWriter},
};

/// Layout descriptor
pub const FORMAT: FormatDescriptor = FormatDescriptor::CONFIG;

/// Extents of the two counted fields: serial number and name
pub(crate) const EXTENTS: [u32; 2] = [SERIAL_NUMBER_LEN as u32, CONFIG_NAME_LEN as u32];

/// Image size in bytes
pub fn encoded_len() -> CalResult<usize> {
    image::image_len(&FORMAT, &EXTENTS)
}

/// Write `config` into `out`, returning the image length
pub fn encode(config: &ScanConfig, out: &mut [u8]) -> CalResult<usize> {
    config.validate()?;
    let (mut w, len) = super::begin(out, &FORMAT, &EXTENTS)?;
    write_fields(&mut w, config)?;
    super::finish(w.position(), len)
}

/// Read a configuration back from an image
pub fn decode(image: &[u8]) -> CalResult<ScanConfig> {
    let header = image::read_header(image, &FORMAT)?;
    check_extents(&header.extents)?;

    let mut r = header.payload;
    let config = read_fields(&mut r)?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn check_extents(extents: &[u32]) -> CalResult<()> {
    if extents != EXTENTS {
        return Err(CalError::Fail {
            reason: "scan configuration field sizes",
        });
    }
    Ok(())
}

pub(crate) fn write_fields(w: &mut ByteWriter<'_>, config: &ScanConfig) -> CalResult<()> {
    w.put_u8(config.scan_type.as_u8())?;
    w.put_u16(config.config_index)?;
    w.put_bytes(&config.serial_number)?;
    w.put_bytes(&config.config_name)?;
    w.put_u16(config.wavelength_start_nm)?;
    w.put_u16(config.wavelength_end_nm)?;
    w.put_u8(config.width_px)?;
    w.put_u16(config.num_patterns)?;
    w.put_u16(config.num_repeats)
}

pub(crate) fn read_fields(r: &mut ByteReader<'_>) -> CalResult<ScanConfig> {
    Ok(ScanConfig {
        scan_type: ScanType::from_u8(r.u8()?)?,
        config_index: r.u16()?,
        serial_number: r.array()?,
        config_name: r.array()?,
        wavelength_start_nm: r.u16()?,
        wavelength_end_nm: r.u16()?,
        width_px: r.u8()?,
        num_patterns: r.u16()?,
        num_repeats: r.u16()?,
    })
}
