//! Benchmarks for the one-directional matcher and the unifier
//!
//! These isolate `match_atom` / `unify` from spaces, rule ordering and
//! evaluation so the cost of the matching walk itself can be profiled.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mettacore::{match_atom, unify, Atom};
use std::time::Duration;

fn var(name: &str) -> Atom {
    Atom::var(name)
}

fn sym(name: &str) -> Atom {
    Atom::sym(name)
}

fn expr(items: Vec<Atom>) -> Atom {
    Atom::expr(items)
}

/// Pattern: $x, value: 42
fn bench_simple_variable(c: &mut Criterion) {
    let pattern = var("x");
    let value = Atom::int(42);

    c.bench_function("simple_variable", |b| {
        b.iter(|| black_box(match_atom(black_box(&value), black_box(&pattern))))
    });
}

/// Pattern: ($a $b $c), value: (1 2 3)
fn bench_multiple_variables(c: &mut Criterion) {
    let pattern = expr(vec![var("a"), var("b"), var("c")]);
    let value = expr(vec![Atom::int(1), Atom::int(2), Atom::int(3)]);

    c.bench_function("multiple_variables_3", |b| {
        b.iter(|| black_box(match_atom(black_box(&value), black_box(&pattern))))
    });
}

/// Flat patterns with 1..=25 variables; crosses the inline bindings capacity
fn bench_variable_count_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("variable_count_scaling");
    group.measurement_time(Duration::from_secs(10));

    for count in [1, 4, 8, 9, 16, 25] {
        let pattern = expr((0..count).map(|i| var(&format!("v{}", i))).collect());
        let value = expr((0..count).map(|i| Atom::int(i as i64)).collect());

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(match_atom(black_box(&value), black_box(&pattern))))
        });
    }

    group.finish();
}

/// (wrap (wrap ... $x)) against the same depth of ground data
fn bench_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");

    for depth in [1, 5, 10, 20] {
        let mut pattern = var("x");
        let mut value = sym("leaf");
        for _ in 0..depth {
            pattern = expr(vec![sym("wrap"), pattern]);
            value = expr(vec![sym("wrap"), value]);
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(match_atom(black_box(&value), black_box(&pattern))))
        });
    }

    group.finish();
}

/// A repeated variable forces a consistency check against the existing binding
fn bench_existing_binding(c: &mut Criterion) {
    let shared = expr(vec![sym("point"), Atom::int(1), Atom::int(2)]);
    let pattern = expr(vec![sym("same"), var("p"), var("p")]);
    let value = expr(vec![sym("same"), shared.clone(), shared]);

    c.bench_function("existing_binding", |b| {
        b.iter(|| black_box(match_atom(black_box(&value), black_box(&pattern))))
    });
}

/// Early and late mismatches
fn bench_failures(c: &mut Criterion) {
    let mut group = c.benchmark_group("failures");

    let pattern = expr(vec![sym("f"), var("a"), var("b"), sym("end")]);
    let head_mismatch = expr(vec![sym("g"), Atom::int(1), Atom::int(2), sym("end")]);
    let tail_mismatch = expr(vec![sym("f"), Atom::int(1), Atom::int(2), sym("other")]);
    let arity_mismatch = expr(vec![sym("f"), Atom::int(1)]);

    group.bench_function("head", |b| {
        b.iter(|| black_box(match_atom(black_box(&head_mismatch), black_box(&pattern))))
    });
    group.bench_function("tail", |b| {
        b.iter(|| black_box(match_atom(black_box(&tail_mismatch), black_box(&pattern))))
    });
    group.bench_function("arity", |b| {
        b.iter(|| black_box(match_atom(black_box(&arity_mismatch), black_box(&pattern))))
    });

    group.finish();
}

/// Two-sided unification with variables on both sides and a binding chain
fn bench_unify(c: &mut Criterion) {
    let left = expr(vec![sym("f"), var("x"), var("y"), expr(vec![sym("g"), var("x")])]);
    let right = expr(vec![
        sym("f"),
        var("y"),
        Atom::int(3),
        expr(vec![sym("g"), Atom::int(3)]),
    ]);

    c.bench_function("unify_chain", |b| {
        b.iter(|| black_box(unify(black_box(&left), black_box(&right))))
    });
}

criterion_group!(
    benches,
    bench_simple_variable,
    bench_multiple_variables,
    bench_variable_count_scaling,
    bench_nesting_depth,
    bench_existing_binding,
    bench_failures,
    bench_unify,
);
criterion_main!(benches);
