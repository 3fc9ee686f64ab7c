//! Codec integration tests: every record type through encode, frame and decode

mod common;

use common::*;
use proptest::prelude::*;

use spectracal_blob::{
    constants::FRAME_HEADER_LEN, Blob, BlobCodec, BlobType, Decoded, Record, VendorTag,
};
use spectracal_core::{constants::ADC_DATA_LEN, CalError, CalibrationCoefficients};

fn encode_decode(codec: &BlobCodec, tag: BlobType, record: Record<'_>) -> Decoded<'static> {
    let owned = codec.encode_to_vec(tag, Some(record)).unwrap();
    let bytes: &'static [u8] = Box::leak(owned.into_bytes().into_boxed_slice());
    let (decoded_tag, decoded) = codec.decode(&Blob::new(tag, bytes)).unwrap();
    assert_eq!(decoded_tag, tag);
    decoded
}

#[test]
fn every_library_record_round_trips() {
    let codec = BlobCodec::new();

    let coeffs = factory_coefficients();
    assert_eq!(
        encode_decode(&codec, BlobType::Calibration, Record::Calibration(&coeffs)),
        Decoded::Calibration(coeffs)
    );

    let matrix = factory_matrix();
    assert_eq!(
        encode_decode(&codec, BlobType::ReferenceMatrix, Record::ReferenceMatrix(&matrix)),
        Decoded::ReferenceMatrix(matrix)
    );

    let config = column_config();
    assert_eq!(
        encode_decode(&codec, BlobType::Config, Record::Config(&config)),
        Decoded::Config(config)
    );

    let scan = column_scan(228);
    assert_eq!(
        encode_decode(&codec, BlobType::ScanData, Record::ScanData(&scan)),
        Decoded::ScanData(scan)
    );
}

#[test]
fn reference_matrix_fits_storage_budget() {
    let codec = BlobCodec::new();
    assert_eq!(codec.size_of(BlobType::ReferenceMatrix), Ok(2428));

    let matrix = factory_matrix();
    let mut buf = vec![0u8; 2428];
    let blob = codec
        .encode(BlobType::ReferenceMatrix, Some(Record::ReferenceMatrix(&matrix)), &mut buf)
        .unwrap();
    assert!(blob.len() <= 2428);
}

#[test]
fn full_scan_fits_worst_case_size() {
    let codec = BlobCodec::new();
    let scan = column_scan(ADC_DATA_LEN);
    let mut buf = vec![0u8; codec.size_of(BlobType::ScanData).unwrap()];
    let blob = codec
        .encode(BlobType::ScanData, Some(Record::ScanData(&scan)), &mut buf)
        .unwrap();
    assert_eq!(blob.len(), buf.len());
}

#[test]
fn short_buffer_reports_sizes() {
    let codec = BlobCodec::new();
    let config = column_config();
    let mut buf = [0u8; 40];
    assert_eq!(
        codec.encode(BlobType::Config, Some(Record::Config(&config)), &mut buf),
        Err(CalError::InsufficientMemory { required: 88, available: 40 })
    );
}

#[test]
fn unrecognized_tags_rejected() {
    let codec = BlobCodec::new();
    let coeffs = factory_coefficients();
    let image = codec
        .encode_to_vec(BlobType::Calibration, Some(Record::Calibration(&coeffs)))
        .unwrap()
        .into_bytes();

    // Unregistered vendor tag
    assert!(matches!(
        codec.decode_raw(200, &image),
        Err(CalError::InvalidInput { .. })
    ));
    // Reserved library tag
    assert!(matches!(
        codec.decode_raw(5, &image),
        Err(CalError::InvalidInput { .. })
    ));
    assert!(matches!(
        codec.decode_raw(127, &image),
        Err(CalError::InvalidInput { .. })
    ));
}

#[test]
fn image_under_wrong_tag_fails() {
    let codec = BlobCodec::new();
    let config = column_config();
    let image = codec
        .encode_to_vec(BlobType::Config, Some(Record::Config(&config)))
        .unwrap()
        .into_bytes();

    assert!(matches!(
        codec.decode(&Blob::new(BlobType::Calibration, &image)),
        Err(CalError::Fail { .. })
    ));
}

#[test]
fn corrupted_layout_fails() {
    let codec = BlobCodec::new();
    let matrix = factory_matrix();
    let image = codec
        .encode_to_vec(BlobType::ReferenceMatrix, Some(Record::ReferenceMatrix(&matrix)))
        .unwrap()
        .into_bytes();
    let decode = |bytes: &[u8]| codec.decode_raw(3, bytes).map(|_| ());

    let mut bad_magic = image.clone();
    bad_magic[1] = b'q';
    assert!(matches!(decode(&bad_magic), Err(CalError::Fail { .. })));

    let mut big_endian = image.clone();
    big_endian[3] = 1;
    assert!(matches!(decode(&big_endian), Err(CalError::Fail { .. })));

    let mut bad_format = image.clone();
    bad_format[8] = b'f';
    assert!(matches!(decode(&bad_format), Err(CalError::Fail { .. })));

    // Width extent claims 18 rows
    let mut bad_extent = image.clone();
    bad_extent[16] = 18;
    assert!(matches!(decode(&bad_extent), Err(CalError::Fail { .. })));

    assert!(matches!(decode(&image[..image.len() - 1]), Err(CalError::Fail { .. })));
}

#[test]
fn two_coefficient_image_is_invalid_input() {
    // "f#f#" with extents [2, 2]: well-formed layout, wrong arity
    let mut image = Vec::new();
    image.extend_from_slice(b"tpl\0");
    image.extend_from_slice(&53u32.to_le_bytes());
    image.extend_from_slice(b"f#f#\0");
    image.extend_from_slice(&2u32.to_le_bytes());
    image.extend_from_slice(&2u32.to_le_bytes());
    for v in [0.0f64, 0.01, 900.0, 1.0] {
        image.extend_from_slice(&v.to_le_bytes());
    }
    assert_eq!(image.len(), 53);

    let codec = BlobCodec::new();
    assert!(matches!(
        codec.decode_raw(2, &image),
        Err(CalError::InvalidInput { .. })
    ));
}

#[test]
fn decoded_matrix_that_breaks_invariants_is_invalid_input() {
    let codec = BlobCodec::new();
    let matrix = factory_matrix();
    let mut image = codec
        .encode_to_vec(BlobType::ReferenceMatrix, Some(Record::ReferenceMatrix(&matrix)))
        .unwrap()
        .into_bytes();

    // Header is 32 bytes; make the second width equal the first
    image[33] = image[32];
    assert!(matches!(
        codec.decode_raw(3, &image),
        Err(CalError::InvalidInput { .. })
    ));
}

#[test]
fn vendor_records_pass_through_frames() {
    let vendor = VendorTag::new(0xA0).unwrap();
    let codec = BlobCodec::new().register_vendor(vendor, 32).unwrap();
    let coeffs = factory_coefficients();

    let cal = codec
        .encode_to_vec(BlobType::Calibration, Some(Record::Calibration(&coeffs)))
        .unwrap();
    let extra = codec
        .encode_to_vec(BlobType::Vendor(vendor), Some(Record::Vendor(b"\x01\x02lamp-hours=1200")))
        .unwrap();

    let mut partition = vec![0u8; 256];
    let mut at = cal.as_blob().write_frame(&mut partition).unwrap();
    at += extra.as_blob().write_frame(&mut partition[at..]).unwrap();
    assert_eq!(at, 2 * FRAME_HEADER_LEN + 69 + 17);

    let (first, rest) = Blob::from_frame(&partition[..at]).unwrap();
    let (second, rest) = Blob::from_frame(rest).unwrap();
    assert!(rest.is_empty());

    assert_eq!(
        codec.decode(&first).unwrap().1,
        Decoded::Calibration(coeffs)
    );
    assert_eq!(
        codec.decode(&second).unwrap(),
        (BlobType::Vendor(vendor), Decoded::Vendor(&b"\x01\x02lamp-hours=1200"[..]))
    );
}

#[test]
fn coefficients_serialize_to_json() {
    let coeffs = factory_coefficients();
    let json = serde_json::to_string(&coeffs).unwrap();
    let back: CalibrationCoefficients = serde_json::from_str(&json).unwrap();
    assert_eq!(back, coeffs);
}

proptest! {
    #[test]
    fn coefficients_are_bit_exact(coeffs in arb_coefficients()) {
        let codec = BlobCodec::new();
        let mut buf = [0u8; 69];
        let blob = codec
            .encode(BlobType::Calibration, Some(Record::Calibration(&coeffs)), &mut buf)
            .unwrap();
        let Decoded::Calibration(back) = codec.decode(&blob).unwrap().1 else {
            panic!("wrong record kind");
        };
        for (a, b) in back.shift_vector.iter().zip(&coeffs.shift_vector) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
        for (a, b) in back.pixel_to_wavelength.iter().zip(&coeffs.pixel_to_wavelength) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn matrices_round_trip(matrix in arb_matrix()) {
        let codec = BlobCodec::new();
        let mut buf = vec![0u8; 2428];
        let blob = codec
            .encode(BlobType::ReferenceMatrix, Some(Record::ReferenceMatrix(&matrix)), &mut buf)
            .unwrap();
        prop_assert_eq!(codec.decode(&blob).unwrap().1, Decoded::ReferenceMatrix(matrix));
    }

    #[test]
    fn scans_round_trip(scan in arb_scan()) {
        let codec = BlobCodec::new();
        let owned = codec
            .encode_to_vec(BlobType::ScanData, Some(Record::ScanData(&scan)))
            .unwrap();
        prop_assert_eq!(owned.as_blob().len(), 144 + 4 * scan.adc_data.len());
        prop_assert_eq!(
            codec.decode(&owned.as_blob()).unwrap().1,
            Decoded::ScanData(scan)
        );
    }

    #[test]
    fn truncated_images_never_decode(cut in 0usize..69) {
        let codec = BlobCodec::new();
        let coeffs = factory_coefficients();
        let mut buf = [0u8; 69];
        codec
            .encode(BlobType::Calibration, Some(Record::Calibration(&coeffs)), &mut buf)
            .unwrap();
        let result = codec.decode_raw(2, &buf[..cut]);
        if cut == 0 {
            prop_assert!(
                matches!(result, Err(CalError::NullPointer { .. })),
                "expected NullPointer, got {:?}",
                result
            );
        } else {
            prop_assert!(
                matches!(result, Err(CalError::Fail { .. })),
                "expected Fail at {} bytes, got {:?}",
                cut,
                result
            );
        }
    }
}
