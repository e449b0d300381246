use criterion::{criterion_group, criterion_main, Criterion};
use nanosat::sat::dimacs::parse_dimacs_text;
use nanosat::sat::solver::Solver;
use std::hint::black_box;

const EASY_SAT: &str = "p cnf 3 2\n1 2 3 0\n-1 -2 3 0\n";

const FORCED_CHAIN: &str = "p cnf 6 6\n\
    1 1 1 0\n\
    -1 2 2 0\n\
    -2 3 3 0\n\
    -3 4 4 0\n\
    -4 5 5 0\n\
    -5 6 6 0\n";

const UNSAT: &str = "p cnf 2 4\n1 1 1 0\n-1 -1 -1 0\n2 2 2 0\n-2 -2 -2 0\n";

fn bench_solve(c: &mut Criterion) {
    let easy = parse_dimacs_text(EASY_SAT).unwrap();
    let chain = parse_dimacs_text(FORCED_CHAIN).unwrap();
    let unsat = parse_dimacs_text(UNSAT).unwrap();

    c.bench_function("easy sat", |b| {
        b.iter(|| {
            let mut solver = Solver::new(easy.clone());
            black_box(solver.solve());
        })
    });

    c.bench_function("forced chain", |b| {
        b.iter(|| {
            let mut solver = Solver::new(chain.clone());
            black_box(solver.solve());
        })
    });

    c.bench_function("unsat", |b| {
        b.iter(|| {
            let mut solver = Solver::new(unsat.clone());
            black_box(solver.solve());
        })
    });
}

fn bench_exhaustive(c: &mut Criterion) {
    let easy = parse_dimacs_text(EASY_SAT).unwrap();

    c.bench_function("easy sat exhaustive", |b| {
        b.iter(|| {
            let mut solver = Solver::new(easy.clone());
            black_box(solver.solve_exhaustive());
        })
    });
}

criterion_group!(benches, bench_solve, bench_exhaustive);

criterion_main!(benches);
