//! Factory Round-Trip Example
//!
//! Walks through what happens to calibration data between the factory
//! characterization station and a scan on the instrument.
//!
//! ## What You'll Learn
//!
//! - Encoding calibration records into storage images
//! - Laying several images out in one storage partition
//! - Reading them back and turning a raw scan into a labeled spectrum
//! - Picking a reference curve for a pattern width the factory never measured
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_factory_roundtrip
//! ```

use spectracal_blob::{Blob, BlobCodec, BlobType, Decoded, Record, VendorTag};
use spectracal_core::{
    interp, transform, CalibrationCoefficients, InstrumentClass, ReferenceCalibrationMatrix,
    ScanConfig, SpectralPoint,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("SpectraCal Factory Round-Trip Example");
    println!("=====================================\n");

    // Factory output
    let coeffs = CalibrationCoefficients::new([-3.5, 0.018, -1.2e-5], [901.2, 0.981, -1.48e-4]);
    let matrix = factory_matrix()?;
    let config = ScanConfig::column(950, 1600, 7, 228).with_name("Column 7px");

    // Vendors keep their own records next to ours
    let lamp_hours = VendorTag::new(0xC0)?;
    let codec = BlobCodec::new().register_vendor(lamp_hours, 16)?;

    println!("Storage Partition:");
    println!("------------------");
    let hours = 1200u32.to_le_bytes();
    let mut partition = vec![0u8; 4096];
    let mut used = 0;
    let records = [
        (BlobType::Calibration, Record::Calibration(&coeffs)),
        (BlobType::ReferenceMatrix, Record::ReferenceMatrix(&matrix)),
        (BlobType::Config, Record::Config(&config)),
        (BlobType::Vendor(lamp_hours), Record::Vendor(&hours)),
    ];
    for (tag, record) in records {
        let blob = codec.encode_to_vec(tag, Some(record))?;
        let written = blob.as_blob().write_frame(&mut partition[used..])?;
        println!(
            "  tag {:>3}: {:>5} bytes (budget {})",
            tag.as_u8(),
            blob.as_blob().len(),
            codec.size_of(tag)?
        );
        used += written;
    }
    println!("  partition used: {} bytes", used);

    println!("\nInstrument Boot:");
    println!("----------------");
    let mut stored_coeffs = None;
    let mut stored_matrix = None;
    let mut stored_config = None;
    let mut rest = &partition[..used];
    while !rest.is_empty() {
        let (blob, next) = Blob::from_frame(rest)?;
        rest = next;
        match codec.decode(&blob)?.1 {
            Decoded::Calibration(c) => stored_coeffs = Some(c),
            Decoded::ReferenceMatrix(m) => stored_matrix = Some(m),
            Decoded::Config(c) => stored_config = Some(c),
            Decoded::Vendor(bytes) => println!("  vendor record: {:02x?}", bytes),
            Decoded::ScanData(_) => {}
        }
    }
    let coeffs = stored_coeffs.ok_or("calibration missing")?;
    let matrix = stored_matrix.ok_or("reference matrix missing")?;
    let config = stored_config.ok_or("scan configuration missing")?;
    println!("  loaded '{}'", config.name().unwrap_or("?"));

    println!("\nScan:");
    println!("-----");
    let start_nm = f64::from(config.wavelength_start_nm);
    let end_nm = f64::from(config.wavelength_end_nm);
    let first = transform::wavelength_to_pixel(start_nm, &coeffs, 0.0, 853.0)?;
    let last = transform::wavelength_to_pixel(end_nm, &coeffs, 0.0, 853.0)?;
    println!("  {start_nm} nm .. {end_nm} nm -> columns {first:.1} .. {last:.1}");

    let raw: Vec<u16> = (0..8).map(|i| 12_000 + 350 * i).collect();
    let mut spectrum = [SpectralPoint::default(); 8];
    let n = transform::label_spectrum(&raw, &coeffs, first, &mut spectrum)?;
    for point in &spectrum[..n] {
        println!("  {:8.2} nm  {:>8.0}", point.wavelength_nm, point.intensity);
    }

    println!("\nReference For 7 px Patterns:");
    println!("----------------------------");
    let reference = interp::interpret_for_config(&matrix, &config, &InstrumentClass::default())?;
    println!("  quality: {:?}", reference.quality);
    for (nm, counts) in reference.wavelengths.iter().zip(&reference.intensities).step_by(10) {
        println!("  {:7.1} nm  {:8.1}", nm, counts);
    }

    Ok(())
}

fn factory_matrix() -> Result<ReferenceCalibrationMatrix, spectracal_core::CalError> {
    let widths = core::array::from_fn(|i| 2 + 2 * i as u8);
    let wavelengths = core::array::from_fn(|i| 900.0 + 16.0 * i as f64);
    let intensities = core::array::from_fn(|k| {
        core::array::from_fn(|j| {
            let lamp = 1.0 - ((j as f64 - 20.0) / 30.0).powi(2);
            (400.0 * (2.0 + 2.0 * k as f64) * lamp.max(0.05)) as u16
        })
    });
    ReferenceCalibrationMatrix::new(widths, wavelengths, intensities)
}
