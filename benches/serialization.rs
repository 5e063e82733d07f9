use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use serde_yaml_emit::analyzer::analyze;
use serde_yaml_emit::{
    node_to_string, to_string, to_string_with_comments, CommentStore, EmitterOptions, Node,
};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_serialize_nested(c: &mut Criterion) {
    let data = NestedData {
        id: 1,
        metadata: Metadata {
            created: "2024-01-01".to_string(),
            updated: "2024-06-01".to_string(),
            version: 3,
        },
        tags: vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
    };

    c.bench_function("serialize_nested", |b| b.iter(|| to_string(black_box(&data))));
}

fn benchmark_scalar_styles(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_styles");
    let inputs = [
        ("plain", "just some plain words".to_string()),
        ("quoted", "needs: quoting, # here".to_string()),
        ("escaped", "tab\there\u{1}and\u{7f}".to_string()),
        ("long", "word ".repeat(200)),
    ];

    for (name, text) in &inputs {
        group.bench_with_input(BenchmarkId::new("analyze", name), text, |b, text| {
            b.iter(|| analyze(black_box(text), true))
        });
        group.bench_with_input(BenchmarkId::new("emit", name), text, |b, text| {
            b.iter(|| to_string(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_shared_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_nodes");

    for size in [10, 100, 1000].iter() {
        let shared = Node::map(vec![
            (Node::from("host"), Node::from("localhost")),
            (Node::from("port"), Node::from(8080)),
        ]);
        let doc = Node::seq(vec![shared; *size]);

        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| node_to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_comments(c: &mut Criterion) {
    let products: Vec<Product> = (0..50)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 1.5 * f64::from(i),
            quantity: i,
        })
        .collect();

    let mut comments = CommentStore::new();
    comments.insert_dotted("", "Inventory snapshot");
    comments.insert_dotted("sku", "Stock keeping unit");
    comments.insert_dotted("price", "Unit price\nin euros");
    let options = EmitterOptions::new().with_long_comments(2, "=");

    c.bench_function("serialize_with_comments", |b| {
        b.iter(|| to_string_with_comments(black_box(&products), &comments, options.clone()))
    });
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("yaml_vs_json");
    let users: Vec<User> = (0..100)
        .map(|i| User {
            id: i,
            name: format!("User {}", i),
            email: format!("user{}@example.com", i),
            active: i % 2 == 0,
        })
        .collect();

    group.bench_function("yaml", |b| b.iter(|| to_string(black_box(&users))));
    group.bench_function("json", |b| {
        b.iter(|| serde_json::to_string(black_box(&users)))
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_serialize_array,
    benchmark_serialize_nested,
    benchmark_scalar_styles,
    benchmark_shared_nodes,
    benchmark_comments,
    benchmark_comparison_with_json
);
criterion_main!(benches);
