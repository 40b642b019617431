use criterion::{Criterion, black_box, criterion_group, criterion_main};

use dendron::ast::Program;
use dendron::backend::machine::Machine;
use dendron::backend::{bytecode, interpreter};
use dendron::lexer;
use dendron::parser;

fn workload_source(statements: usize) -> String {
    let mut source = String::from(":= seed 9\n");
    for index in 0..statements {
        source.push_str(&format!(":= v{index} + * seed 3 / {} 7\n", index + 1));
        source.push_str(&format!("# v{index}\n"));
    }
    source
}

fn workload_program(statements: usize) -> Program {
    let source = workload_source(statements);
    parser::parse(&mut lexer::tokenize(&source)).expect("parse workload")
}

fn bench_backends(c: &mut Criterion) {
    let source = workload_source(200);
    let program = workload_program(200);

    c.bench_function("frontend_parse", |b| {
        b.iter(|| {
            let program = parser::parse(&mut lexer::tokenize(black_box(&source))).expect("parse");
            black_box(program);
        })
    });

    c.bench_function("interpreter_run", |b| {
        b.iter(|| {
            let execution = interpreter::interpret(black_box(&program)).expect("interpret");
            black_box(execution);
        })
    });

    c.bench_function("machine_compile_only", |b| {
        b.iter(|| {
            let compiled = bytecode::compile(black_box(&program));
            black_box(compiled);
        })
    });

    c.bench_function("machine_execute_prepared", |b| {
        let compiled = bytecode::compile(&program);
        let machine = Machine::new();
        b.iter(|| {
            let execution = machine.execute(black_box(&compiled)).expect("execute");
            black_box(execution);
        })
    });

    c.bench_function("machine_total", |b| {
        let machine = Machine::new();
        b.iter(|| {
            let compiled = bytecode::compile(black_box(&program));
            let execution = machine.execute(&compiled).expect("execute");
            black_box(execution);
        })
    });
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
