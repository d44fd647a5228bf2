// Quote 性能基准测试
//
// 测试项目:
// 1. 内置目录解析
// 2. 单个 GPU 报价排序
// 3. 全部 GPU 型号报价

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gpu_pricing::pricing::{list_gpu_models, quote};
use gpu_pricing::ProviderCatalog;

fn benchmark_parse_builtin(c: &mut Criterion) {
    c.bench_function("parse_builtin_catalog", |b| {
        b.iter(|| ProviderCatalog::builtin().unwrap());
    });
}

fn benchmark_quote(c: &mut Criterion) {
    let catalog = ProviderCatalog::builtin().unwrap();

    c.bench_function("quote_h100_pcie", |b| {
        b.iter(|| quote(black_box(&catalog), black_box("H100 PCIe"), black_box("72")));
    });

    let models = list_gpu_models(&catalog);
    c.bench_function("quote_all_models", |b| {
        b.iter(|| {
            for model in &models {
                black_box(quote(&catalog, model, "24"));
            }
        });
    });
}

criterion_group!(benches, benchmark_parse_builtin, benchmark_quote);
criterion_main!(benches);
