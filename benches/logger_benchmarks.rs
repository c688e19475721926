//! Criterion benchmarks for logaroo

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use logaroo::core::format_spec::FormatSpec;
use logaroo::core::markup;
use logaroo::prelude::*;
use logaroo::{args, Template};
use std::io;
use std::sync::Arc;

fn sink_logger() -> Logger {
    Logger::builder()
        .console(WriterConsole::new(io::sink()))
        .build()
        .expect("default configuration is valid")
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("default", |b| {
        b.iter(|| black_box(sink_logger()));
    });

    group.bench_function("add_level", |b| {
        let logger = sink_logger();
        b.iter(|| {
            logger
                .add_level(black_box("time"), 23, "[cyan]", "\u{23F0}", false)
                .unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger();
    logger.set_level("trace").unwrap();

    group.bench_function("plain_message", |b| {
        b.iter(|| {
            logger.info(black_box("Plain message"), args!()).unwrap();
        });
    });

    group.bench_function("named_args", |b| {
        b.iter(|| {
            logger
                .info(
                    black_box("User {user} made {count:,} requests in {secs:.2f}s"),
                    args!(user = "ada", count = 12345, secs = 1.5),
                )
                .unwrap();
        });
    });

    group.bench_function("dispatch_by_name", |b| {
        b.iter(|| {
            logger.call(black_box("success"), "Dispatched", args!()).unwrap();
        });
    });

    group.bench_function("escalating", |b| {
        b.iter(|| {
            let _ = black_box(logger.critical("Escalated", args!()));
        });
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(sink_logger());

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"), args!()).unwrap();
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger();
    logger.set_level("warning").unwrap();

    group.bench_function("below_threshold", |b| {
        b.iter(|| {
            logger.debug(black_box("This should be filtered"), args!()).unwrap();
        });
    });

    group.bench_function("below_threshold_lazy", |b| {
        b.iter(|| {
            logger
                .debug(
                    "Expensive {report}",
                    args!(report => (0..1000).map(|i| i.to_string()).collect::<String>()),
                )
                .unwrap();
        });
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| {
            logger.error(black_box("This should be logged"), args!()).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    group.bench_function("template_parse", |b| {
        b.iter(|| {
            Template::parse(black_box(
                "[green]{time}[/] | {level:<8} | {color}{icon} {message}",
            ))
        });
    });

    let spec = FormatSpec::parse(">+12,.3f").unwrap();
    let value = Value::from(1234567.891);
    group.bench_function("format_spec_apply", |b| {
        b.iter(|| spec.apply(black_box(&value)));
    });

    group.bench_function("markup_strip", |b| {
        b.iter(|| {
            markup::strip(black_box(
                "[green]2024-01-01 00:00:00[/] | INFO     | [white on red]boom",
            ))
        });
    });

    let logger = sink_logger();
    group.bench_function("render_plain", |b| {
        b.iter(|| logger.format("warning", black_box("Careful"), args!(), RenderMode::Plain));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_concurrent_logging,
    bench_level_filtering,
    bench_formatting
);

criterion_main!(benches);
