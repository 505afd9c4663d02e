use iclass_core::IdentifierKind;
use iclass_scan::{
    decode_identifier_from_image, ImageSource, QrDecoder, RqrrDecoder, ScanOutcome,
};
use iclass_test_utils::{qr_raster, sign_in_raster, LumaImage, NUMERIC_ID, UUID_ID};

fn luma_source(raster: LumaImage) -> ImageSource {
    ImageSource::Luma {
        width: raster.width,
        height: raster.height,
        pixels: raster.pixels,
    }
}

#[tokio::test]
async fn test_numeric_sign_in_code_scans_back_to_identifier() {
    let image = luma_source(sign_in_raster(NUMERIC_ID));

    let outcome = decode_identifier_from_image(&RqrrDecoder::new(), &image).await;

    assert_eq!(outcome, ScanOutcome::Found(NUMERIC_ID.to_string()));
}

#[tokio::test]
async fn test_uuid_sign_in_code_scans_back_to_identifier() {
    let image = luma_source(sign_in_raster(UUID_ID));

    let outcome = decode_identifier_from_image(&RqrrDecoder::new(), &image).await;

    assert_eq!(outcome.identifier().unwrap(), UUID_ID);
}

#[tokio::test]
async fn test_bare_identifier_code_is_returned_raw() {
    let image = luma_source(qr_raster("42424242", IdentifierKind::Numeric));

    let outcome = decode_identifier_from_image(&RqrrDecoder::new(), &image).await;

    assert_eq!(outcome, ScanOutcome::Found("42424242".to_string()));
}

#[tokio::test]
async fn test_decoder_reports_metadata() {
    let image = luma_source(qr_raster("hello", IdentifierKind::Numeric));

    let payload = RqrrDecoder::new().decode(&image).await.unwrap().unwrap();

    assert_eq!(payload.text, "hello");
    assert!(payload.version.is_some());
}

#[tokio::test]
async fn test_png_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("code.png");
    let raster = sign_in_raster(NUMERIC_ID);
    let side = u32::try_from(raster.width).unwrap();
    image::GrayImage::from_raw(side, side, raster.pixels)
        .unwrap()
        .save(&path)
        .unwrap();

    let outcome = decode_identifier_from_image(&RqrrDecoder::new(), &ImageSource::path(&path)).await;

    assert_eq!(outcome.into_raw().as_deref(), Some(NUMERIC_ID));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let outcome =
        decode_identifier_from_image(&RqrrDecoder::new(), &ImageSource::path("/nonexistent/qr.png"))
            .await;

    assert_eq!(outcome, ScanOutcome::NotFound);
}

#[tokio::test]
async fn test_blank_image_is_not_found() {
    let image = ImageSource::Luma {
        width: 100,
        height: 100,
        pixels: vec![255; 100 * 100],
    };

    let outcome = decode_identifier_from_image(&RqrrDecoder::new(), &image).await;

    assert!(!outcome.is_found());
}
