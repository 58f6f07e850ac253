use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fix256::bench::{bench_div_wide, bench_mul_wide};
use fix256::{Fix256, FormatOpts};

// Establish a baseline by comparing with a single fpu multiply

fn baseline_fpu_mul_f64(c: &mut Criterion) {
  c.bench_function("baseline_fpu_mul_f64", |b| {
    b.iter(|| black_box(3.14) * black_box(69.420));
  });
}

const NUMS: [Fix256; 4] = [
  Fix256::from_parts(0x2b97_6f63_2963_7dfa_1b7c_1e70_4c25_9e11, 0x0000_0000_0000_0000_0000_0000_0000_0003),
  Fix256::from_parts(0x0000_0000_0000_0000_0000_0001_5af1_d78b, 0x0000_0000_0000_0000_0000_0000_0000_0000),
  Fix256::from_parts(0x8a51_72aa_f929_73c1_b86d_12a0_bd9a_14cf, 0xffff_ffff_ffff_ffff_ffff_fffa_9b02_35c7),
  Fix256::from_parts(0x0000_0000_0000_0000_1234_5678_9abc_def0, 0x0000_0000_0000_0000_0000_5de0_b6b3_a763),
];

fn kernels(c: &mut Criterion) {
  let mut g = c.benchmark_group("kernels");
  g.throughput(Throughput::Elements(1));
  g.bench_function("mul_wide", |b| {
    b.iter(|| bench_mul_wide(black_box(0x1234_5678_9abc_def0), black_box(u128::MAX - 7)));
  });
  g.bench_function("div_wide", |b| {
    b.iter(|| bench_div_wide(black_box(41), black_box(0x1234_5678), black_box(u128::MAX >> 9)));
  });
  g.finish();
}

fn arithmetic(c: &mut Criterion) {
  for (name, f) in [
    ("add", (|a, b| a + b) as fn(Fix256, Fix256) -> Fix256),
    ("mul", |a, b| a * b),
    ("div", |a, b| a / b),
  ] {
    let mut g = c.benchmark_group(name);
    for (i, (x, y)) in NUMS.iter().zip(NUMS.iter().rev()).enumerate() {
      g.throughput(Throughput::Elements(1));
      g.bench_with_input(BenchmarkId::from_parameter(i), &(*x, *y), |b, &(x, y)| {
        b.iter(|| f(black_box(x), black_box(y)));
      });
    }
    g.finish();
  }
}

fn roots(c: &mut Criterion) {
  let mut g = c.benchmark_group("roots");
  for (i, x) in NUMS.iter().enumerate() {
    let x = x.abs();
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::new("sqrt", i), &x, |b, &x| {
      b.iter(|| black_box(x).sqrt());
    });
    g.bench_with_input(BenchmarkId::new("rsqrt", i), &x, |b, &x| {
      b.iter(|| black_box(x).rsqrt());
    });
  }
  g.finish();
}

fn strings(c: &mut Criterion) {
  let mut g = c.benchmark_group("strings");
  let opts = FormatOpts::default();
  let mut buf = [0u8; 128];
  for (i, x) in NUMS.iter().enumerate() {
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::new("format", i), x, |b, x| {
      b.iter(|| x.write_to(black_box(&mut buf), &opts));
    });
    let n = x.write_to(&mut buf, &opts);
    let s = core::str::from_utf8(&buf[..n]).unwrap().to_owned();
    g.bench_with_input(BenchmarkId::new("parse", i), &s, |b, s| {
      b.iter(|| Fix256::parse_prefix(black_box(s)));
    });
  }
  g.finish();
}

criterion_group!(benches, baseline_fpu_mul_f64, kernels, arithmetic, roots, strings);
criterion_main!(benches);
