use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use image2sheet::image_pipeline::{ConversionConfig, ImageToSheetPipeline};
use std::io::Cursor;
use std::path::Path;

fn generate_mock_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut data = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .expect("encode benchmark image");
    data
}

fn benchmark_conversion_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion_by_size");

    let sizes = vec![
        (32, 24, "32x24"),
        (160, 120, "160x120"),
        (320, 240, "320x240"),
    ];

    for (width, height, label) in sizes {
        let mock_data = generate_mock_png(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &mock_data,
            |b, data| {
                let config = ConversionConfig::default();
                let pipeline = ImageToSheetPipeline::new(config);

                b.iter(|| {
                    let mut output = Cursor::new(Vec::new());
                    let _ = pipeline.convert(
                        Path::new("bench.png"),
                        black_box(data),
                        Path::new("bench.xlsx"),
                        &mut output,
                    );
                });
            },
        );
    }

    group.finish();
}

fn benchmark_downscaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("downscale_to_fit");
    let mock_data = generate_mock_png(1280, 960);

    for (width, height, label) in [(80.0, 60.0, "tiny"), (320.0, 240.0, "medium")] {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &mock_data,
            |b, data| {
                let config = ConversionConfig::builder()
                    .output_size(width, height)
                    .build();
                let pipeline = ImageToSheetPipeline::new(config);

                b.iter(|| {
                    let mut output = Cursor::new(Vec::new());
                    let _ = pipeline.convert(
                        Path::new("bench.png"),
                        black_box(data),
                        Path::new("bench.xlsx"),
                        &mut output,
                    );
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_conversion_sizes, benchmark_downscaling);
criterion_main!(benches);
