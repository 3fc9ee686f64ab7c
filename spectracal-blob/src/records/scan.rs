//! Scan data images (`c#c#jvvccvc#c#vvcvvi#`)
//!
//! The only library record with a variable extent: the sample count.

use spectracal_core::{
    constants::{ADC_DATA_LEN, CONFIG_NAME_LEN, SCAN_NAME_LEN, SERIAL_NUMBER_LEN, TIMESTAMP_LEN},
    CalError, CalResult, ScanData, ScanTimestamp, Validate,
};

use crate::{format::FormatDescriptor, image};

/// Layout descriptor
pub const FORMAT: FormatDescriptor = FormatDescriptor::SCAN_DATA;

fn extents(samples: usize) -> [u32; 5] {
    [
        SCAN_NAME_LEN as u32,
        TIMESTAMP_LEN as u32,
        SERIAL_NUMBER_LEN as u32,
        CONFIG_NAME_LEN as u32,
        samples as u32,
    ]
}

/// Image size in bytes for a scan holding `samples` ADC samples
pub fn encoded_len(samples: usize) -> CalResult<usize> {
    image::image_len(&FORMAT, &extents(samples))
}

/// Write `scan` into `out`, returning the image length
pub fn encode(scan: &ScanData, out: &mut [u8]) -> CalResult<usize> {
    scan.validate()?;
    let (mut w, len) = super::begin(out, &FORMAT, &extents(scan.adc_data.len()))?;

    w.put_bytes(&scan.scan_name)?;
    w.put_bytes(&scan.timestamp.to_bytes())?;
    w.put_i16(scan.detector_temp_hundredths)?;
    w.put_u16(scan.humidity_hundredths)?;
    w.put_u16(scan.lamp_pd)?;
    w.put_u8(scan.pga_gain)?;
    super::config::write_fields(&mut w, &scan.config)?;
    for &sample in &scan.adc_data {
        w.put_i32(sample)?;
    }
    super::finish(w.position(), len)
}

/// Read a scan back from an image
pub fn decode(image: &[u8]) -> CalResult<ScanData> {
    let header = image::read_header(image, &FORMAT)?;
    let ext = &header.extents;
    if ext[..4] != extents(0)[..4] {
        return Err(CalError::Fail {
            reason: "scan data field sizes",
        });
    }
    let samples = ext[4] as usize;
    if samples > ADC_DATA_LEN {
        return Err(CalError::Fail {
            reason: "scan data sample count",
        });
    }

    let mut r = header.payload;
    let scan_name = r.array()?;
    let timestamp = ScanTimestamp::from_bytes(r.array()?);
    let detector_temp_hundredths = r.i16()?;
    let humidity_hundredths = r.u16()?;
    let lamp_pd = r.u16()?;
    let pga_gain = r.u8()?;
    let config = super::config::read_fields(&mut r)?;

    let mut scan = ScanData {
        scan_name,
        timestamp,
        detector_temp_hundredths,
        humidity_hundredths,
        lamp_pd,
        pga_gain,
        config,
        adc_data: heapless::Vec::new(),
    };
    for _ in 0..samples {
        scan.adc_data.push(r.i32()?).map_err(|_| CalError::Fail {
            reason: "scan data sample count",
        })?;
    }
    scan.validate()?;
    Ok(scan)
}
