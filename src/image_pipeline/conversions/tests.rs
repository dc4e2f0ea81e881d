use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, Rgb, RgbImage};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::conversions::{BatchConverter, ConversionReport, ImageToSheetPipeline, Stage};
use crate::image_pipeline::decode::{SourceImage, SourceImageReader};
use crate::image_pipeline::sheet::{DocumentWriter, GridDocument};

struct MockReader {
    should_fail: bool,
    mock_image: Option<RgbImage>,
}

impl SourceImageReader for MockReader {
    fn read_image(&self, _data: &[u8], _config: &ConversionConfig) -> Result<SourceImage> {
        if self.should_fail {
            return Err(ConversionError::DecodeError("Mock decode error".to_string()));
        }
        let image = self
            .mock_image
            .clone()
            .unwrap_or_else(|| RgbImage::from_pixel(4, 2, Rgb([255, 255, 255])));
        Ok(SourceImage::new("MOCK", DynamicImage::ImageRgb8(image)))
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<GridDocument>>>,
}

impl DocumentWriter for MockWriter {
    fn extension(&self) -> &'static str {
        "mock"
    }

    fn write_document(&self, document: &GridDocument, output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        output.write_all(b"mock document")?;
        self.written.lock().unwrap().push(document.clone());
        Ok(())
    }
}

fn build_pipeline(
    reader: MockReader,
    writer_fails: bool,
    config: ConversionConfig,
) -> (ImageToSheetPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<GridDocument>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter {
        should_fail: writer_fails,
        written: written.clone(),
    };
    (ImageToSheetPipeline::with_custom(reader, writer, config), written)
}

fn convert(pipeline: &ImageToSheetPipeline<MockReader, MockWriter>) -> Result<ConversionReport> {
    let mut output = Cursor::new(Vec::new());
    pipeline.convert(Path::new("in.png"), b"fake image data", Path::new("in.mock"), &mut output)
}

#[test]
fn test_successful_conversion() {
    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, written) = build_pipeline(reader, false, ConversionConfig::default());

    let report = convert(&pipeline).unwrap();

    assert_eq!(report.original_size, (4, 2));
    assert_eq!(report.resized_size, (4, 2));
    assert_eq!(report.stage, Stage::Done);
    assert_eq!(
        report.timings.stages(),
        vec![
            Stage::Loading,
            Stage::Planning,
            Stage::Normalizing,
            Stage::Populating,
            Stage::StylingMetadata,
            Stage::Persisting,
        ]
    );

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    let document = &written[0];
    assert_eq!((document.grid.columns(), document.grid.rows()), (12, 2));
    assert_eq!(document.rules.len(), 3);
    assert_eq!(document.layout.metadata.get("Format"), Some("MOCK"));
    assert_eq!(document.layout.metadata.get("File Size"), Some("15"));
}

#[test]
fn test_light_coral_end_to_end() {
    let reader = MockReader {
        should_fail: false,
        mock_image: Some(RgbImage::from_pixel(1, 1, Rgb([240, 128, 128]))),
    };
    let (pipeline, written) = build_pipeline(reader, false, ConversionConfig::default());

    convert(&pipeline).unwrap();

    let written = written.lock().unwrap();
    let document = &written[0];
    assert_eq!((document.grid.columns(), document.grid.rows()), (3, 1));
    assert_eq!(document.grid.get(0, 0), Some(240));
    assert_eq!(document.grid.get(1, 0), Some(128));
    assert_eq!(document.grid.get(2, 0), Some(128));
    let metadata = &document.layout.metadata;
    assert_eq!(metadata.get("Resized Resolution (W x H)"), Some("1 x 1"));
    assert_eq!(metadata.get("Resizing Factor"), Some("100.0%"));
}

#[test]
fn test_reduces_to_desired_size() {
    let reader = MockReader {
        should_fail: false,
        mock_image: Some(RgbImage::from_pixel(40, 20, Rgb([10, 20, 30]))),
    };
    let config = ConversionConfig::builder().output_size(10.0, 10.0).build();
    let (pipeline, written) = build_pipeline(reader, false, config);

    let report = convert(&pipeline).unwrap();

    assert_eq!(report.resized_size, (10, 5));
    assert_eq!(report.scale_factor, 0.25);
    let written = written.lock().unwrap();
    assert_eq!(written[0].grid.columns(), 30);
    assert_eq!(written[0].layout.metadata.get("Resizing Factor"), Some("25.0%"));
}

#[test]
fn test_reader_failure() {
    let reader = MockReader { should_fail: true, mock_image: None };
    let (pipeline, written) = build_pipeline(reader, false, ConversionConfig::default());

    let result = convert(&pipeline);

    assert!(matches!(result.unwrap_err(), ConversionError::DecodeError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, true, ConversionConfig::default());

    let result = convert(&pipeline);

    let err = result.unwrap_err();
    assert!(matches!(err, ConversionError::EncodeError(_)));
    assert!(err.is_output());
}

#[test]
fn test_oversized_image_rejected_before_population() {
    let reader = MockReader {
        should_fail: false,
        mock_image: Some(RgbImage::new(10, 10)),
    };
    let config = ConversionConfig::builder().max_image_pixels(99).build();
    let (pipeline, written) = build_pipeline(reader, false, config);

    let result = convert(&pipeline);

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::ImageTooLarge { pixels: 100, limit: 99 }
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_grid_too_wide_for_worksheet() {
    let reader = MockReader {
        should_fail: false,
        mock_image: Some(RgbImage::new(6000, 1)),
    };
    let config = ConversionConfig::builder().output_size(6000.0, 1.0).build();
    let (pipeline, written) = build_pipeline(reader, false, config);

    let result = convert(&pipeline);

    assert!(matches!(
        result.unwrap_err(),
        ConversionError::GridTooLarge { columns: 18000, rows: 1 }
    ));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_derived_output_path() {
    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, false, ConversionConfig::default());
    assert_eq!(
        pipeline.derive_output_path(Path::new("pics/cat.photo.jpg")),
        Path::new("pics/cat.photo.mock")
    );
}

#[test]
fn test_convert_file_writes_derived_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cat.png");
    std::fs::write(&input, b"fake image data").unwrap();

    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, false, ConversionConfig::default());

    let report = pipeline.convert_file(&input, None).unwrap();

    assert_eq!(report.output_path, dir.path().join("cat.mock"));
    assert_eq!(std::fs::read(&report.output_path).unwrap(), b"mock document");
    // only the input and the finished document remain
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_convert_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, false, ConversionConfig::default());

    let err = pipeline.convert_file(&dir.path().join("missing.png"), None).unwrap_err();
    assert!(matches!(err, ConversionError::InputNotFound(_)));
    assert!(err.is_input());
}

#[test]
fn test_convert_file_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cat.png");
    std::fs::write(&input, b"fake image data").unwrap();
    let output = dir.path().join("no_such_dir").join("cat.xlsx");

    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, false, ConversionConfig::default());

    let err = pipeline.convert_file(&input, Some(&output)).unwrap_err();
    assert!(matches!(err, ConversionError::OutputPathNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_failed_write_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cat.png");
    std::fs::write(&input, b"fake image data").unwrap();

    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, true, ConversionConfig::default());

    assert!(pipeline.convert_file(&input, None).is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_batch_continues_after_failure() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    for name in ["a.png", "b.png", "c.png"] {
        std::fs::write(input_dir.path().join(name), b"fake image data").unwrap();
    }
    std::fs::create_dir(input_dir.path().join("skipped")).unwrap();

    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, written) = build_pipeline(reader, false, ConversionConfig::default());
    let summary = BatchConverter::new(&pipeline)
        .run(input_dir.path(), Some(output_dir.path()))
        .unwrap();

    assert_eq!(summary.files_seen, 3);
    assert_eq!(summary.files_processed, 3);
    assert_eq!(written.lock().unwrap().len(), 3);
    assert!(output_dir.path().join("b.mock").is_file());

    let reader = MockReader { should_fail: true, mock_image: None };
    let (failing, _) = build_pipeline(reader, false, ConversionConfig::default());
    let summary = BatchConverter::new(&failing).run(input_dir.path(), None).unwrap();
    assert_eq!(summary.files_seen, 3);
    assert_eq!(summary.files_processed, 0);
}

#[test]
fn test_batch_rejects_missing_paths() {
    let dir = tempfile::tempdir().unwrap();
    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, false, ConversionConfig::default());
    let batch = BatchConverter::new(&pipeline);

    let err = batch.run(&dir.path().join("missing"), None).unwrap_err();
    assert!(matches!(err, ConversionError::InputNotFound(_)));

    let err = batch
        .run(dir.path(), Some(&dir.path().join("missing_out")))
        .unwrap_err();
    assert!(matches!(err, ConversionError::OutputPathNotFound(_)));
}

#[test]
fn test_single_file_job_keeps_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cat.png");
    std::fs::write(&input, b"fake image data").unwrap();
    let output = dir.path().join("custom.xlsx");

    let reader = MockReader { should_fail: false, mock_image: None };
    let (pipeline, _) = build_pipeline(reader, false, ConversionConfig::default());
    let jobs = BatchConverter::new(&pipeline).plan_jobs(&input, Some(&output)).unwrap();

    assert_eq!(jobs, vec![(input.clone(), Some(output.clone()))]);
}
