//! Benchmarks for the bytecode compiler and virtual machine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use juno::bytecode::{Compiler, Machine, PRINT_NATIVE_ID};
use juno::lexer::Scanner;
use juno::parser::Parser;

/// Parse source into an AST.
fn parse(source: &str) -> Vec<juno::ast::Stmt> {
    let tokens = Scanner::new(source).scan_tokens().expect("lexer error");
    Parser::new(tokens).parse().expect("parser error")
}

/// Compile and execute, with print silenced so the benchmark measures the
/// VM rather than stdout.
fn run_vm(source: &str) -> u32 {
    let ast = parse(source);
    let program = Compiler::new().compile(&ast).expect("compile error");

    let mut machine = Machine::new();
    machine.load_program(program);
    machine.register_native(PRINT_NATIVE_ID, Box::new(|_, _, _, _| {}));
    machine.execute().expect("vm runtime error")
}

const FIB_RECURSIVE: &str = "
    fn fib(n: int) -> int {
        if (n < 2) { return n; }
        return fib(n - 1) + fib(n - 2);
    }
    print(fib(18));
";

const ARITHMETIC_CHAIN: &str = "
    let a = 1;
    let b = 2;
    a += b; a *= 3; a -= 1; a /= 2;
    let c = a + b * 2 - 1;
    print(c);
";

fn compile_benchmark(c: &mut Criterion) {
    let ast = parse(FIB_RECURSIVE);
    c.bench_function("compile_fib", |b| {
        b.iter(|| {
            Compiler::new()
                .compile(black_box(&ast))
                .expect("compile error")
        })
    });
}

fn fib_benchmark(c: &mut Criterion) {
    c.bench_function("vm_fib_recursive", |b| {
        b.iter(|| run_vm(black_box(FIB_RECURSIVE)))
    });
}

fn arithmetic_benchmark(c: &mut Criterion) {
    c.bench_function("vm_arithmetic", |b| {
        b.iter(|| run_vm(black_box(ARITHMETIC_CHAIN)))
    });
}

criterion_group!(
    benches,
    compile_benchmark,
    fib_benchmark,
    arithmetic_benchmark
);
criterion_main!(benches);
