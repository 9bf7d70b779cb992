//! End-to-end report generation benchmarks
//!
//! Measures both backends from report fields to finished bytes, with a
//! growing number of evidence images.

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dossier::types::{EvidenceImage, ReportFields, Severity, SocAction};
use dossier::{DocxReportService, PdfReportService, ReportConfig, ReportRenderer};
use image::{ImageBuffer, Rgba};
use std::hint::black_box;
use std::io::Cursor;

fn fields() -> ReportFields {
    let at = Utc.with_ymd_and_hms(2025, 2, 1, 22, 15, 0).unwrap();
    let mut fields = ReportFields::new("ALT-2025-0042", "Impossible travel sign-in", at);
    fields.executive_summary = "A privileged account signed in from two countries within ten minutes. ".repeat(6);
    fields.severity = Severity::High;
    fields.mitre_tactics = vec!["TA0001".into(), "TA0006".into()];
    fields.event_summary = "Sign-in from Lisbon followed by Singapore.\n".repeat(10);
    fields.soc_action = SocAction::Both;
    fields.soc_assessment = "Likely token theft.".into();
    fields.soc_actions_taken = Some("Sessions revoked.".into());
    fields.recommended_actions = Some("- Reset password\n  - Notify user\n- Rotate key\n- Review sign-in policy".into());
    fields
}

fn screenshot(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn evidence(count: usize) -> Vec<EvidenceImage> {
    let data = screenshot(800, 450);
    (1..=count)
        .map(|i| EvidenceImage::new(format!("screenshot-{}.png", i), data.clone()))
        .collect()
}

fn bench_backends(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig::default()
        .with_template_path(dir.path().join("incident_report_template.docx"))
        .with_organization("Acme SOC");
    let services: Vec<(&str, Box<dyn ReportRenderer>)> = vec![
        ("docx", Box::new(DocxReportService::new(&config).unwrap())),
        ("pdf", Box::new(PdfReportService::new(&config))),
    ];
    let fields = fields();

    let mut group = c.benchmark_group("report_generation");
    group.sample_size(20);
    for image_count in [0usize, 2, 8] {
        let images = evidence(image_count);
        for (name, service) in &services {
            group.bench_with_input(BenchmarkId::new(*name, image_count), &images, |b, images| {
                b.iter(|| {
                    let report = service.render(black_box(&fields), black_box(images)).unwrap();
                    black_box(report.bytes.len())
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
