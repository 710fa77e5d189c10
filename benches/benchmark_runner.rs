/// Benchmark runner for the class composition engine.
///
/// Times class definition, instantiation and super-dispatch workloads and
/// verifies the values they produce.

extern crate blend;

use blend::runner::api::Engine;
use blend::runner::builder::definition::ClassDefinition;
use blend::runner::ds::value::Value;
use std::time::{Duration, Instant};

const CHAIN_DEPTH: usize = 10;

/// Run a workload `iterations` times and return the total time.
fn run_benchmark<F: Fn()>(workload: F, iterations: u32) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        workload();
    }
    start.elapsed()
}

// ============================================================================
// Workloads
// ============================================================================

fn chain_class_name(level: usize) -> String {
    format!("Bench.chain.Level{}", level)
}

/// Defines `depth` classes, each extending the previous one and adding one
/// to the result of its parent's `depth` method.
fn define_chain(engine: &mut Engine, depth: usize) -> Result<(), String> {
    engine
        .define_class(
            &chain_class_name(0),
            ClassDefinition::new().method("depth", |_| Ok(Value::from(0))),
            None,
        )
        .map_err(|e| e.to_string())?;
    for level in 1..depth {
        let def = ClassDefinition::new()
            .extend(&chain_class_name(level - 1))
            .chained("depth", |ctx| {
                let below = ctx.call_parent(vec![])?.as_i64().unwrap_or(0);
                Ok(Value::from(below + 1))
            });
        engine
            .define_class(&chain_class_name(level), def, None)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Stacks `count` overrides on one class, each appending a letter.
fn define_overrides(engine: &mut Engine, count: usize) -> Result<(), String> {
    engine
        .define_class(
            "Bench.Target",
            ClassDefinition::new().method("tag", |_| Ok(Value::from(""))),
            None,
        )
        .map_err(|e| e.to_string())?;
    for n in 0..count {
        let def = ClassDefinition::new()
            .overrides("Bench.Target")
            .chained("tag", |ctx| {
                Ok(Value::from(format!("{}o", ctx.call_parent(vec![])?)))
            });
        engine
            .define_class(&format!("Bench.override.Target{}", n), def, None)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn define_person(engine: &mut Engine) -> Result<(), String> {
    let def = ClassDefinition::new()
        .config("firstname", "john")
        .config("lastname", "doe")
        .config("age", 0)
        .method("onPropertyChange", |_| Ok(Value::Undefined));
    engine
        .define_class("Bench.Person", def, None)
        .map_err(|e| e.to_string())
}

fn define_mixins(engine: &mut Engine, count: usize) -> Result<(), String> {
    let mut host = ClassDefinition::new();
    for n in 0..count {
        let name = format!("Bench.mixin.M{}", n);
        let method = format!("m{}", n);
        engine
            .define_class(
                &name,
                ClassDefinition::new()
                    .member(&format!("v{}", n), n as i64)
                    .method(&method, move |_| Ok(Value::from(n as i64))),
                None,
            )
            .map_err(|e| e.to_string())?;
        host = host.mixin(&format!("mx{}", n), &name);
    }
    engine
        .define_class("Bench.mixin.Host", host, None)
        .map_err(|e| e.to_string())
}

fn bench_define_chain() {
    let mut engine = Engine::new();
    let _ = define_chain(&mut engine, CHAIN_DEPTH);
}

fn bench_define_overrides() {
    let mut engine = Engine::new();
    let _ = define_overrides(&mut engine, CHAIN_DEPTH);
}

fn bench_define_mixins() {
    let mut engine = Engine::new();
    let _ = define_mixins(&mut engine, 8);
}

fn bench_create_person(engine: &Engine) {
    let config = Value::object_from(vec![("firstname", "Sally")]);
    let _ = engine.create("Bench.Person", config);
}

fn bench_call_chain(engine: &Engine) {
    if let Ok(deepest) = engine.create(&chain_class_name(CHAIN_DEPTH - 1), Value::Undefined) {
        for _ in 0..100 {
            let _ = engine.call(&deepest, "depth", vec![]);
        }
    }
}

fn bench_call_overrides(engine: &Engine) {
    if let Ok(target) = engine.create("Bench.Target", Value::Undefined) {
        for _ in 0..100 {
            let _ = engine.call(&target, "tag", vec![]);
        }
    }
}

fn bench_create_by_alias_list(engine: &Engine) {
    let items: Vec<Value> = (0..CHAIN_DEPTH).map(|l| Value::from(chain_class_name(l))).collect();
    let _ = engine.create_all(&items, None);
}

fn prepared_engine() -> Result<Engine, String> {
    let mut engine = Engine::new();
    define_chain(&mut engine, CHAIN_DEPTH)?;
    define_overrides(&mut engine, CHAIN_DEPTH)?;
    define_person(&mut engine)?;
    define_mixins(&mut engine, 8)?;
    Ok(engine)
}

fn main() {
    println!("=======================================================");
    println!("  Blend Class Engine - Performance Benchmarks");
    println!("=======================================================\n");

    let engine = match prepared_engine() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to prepare benchmark classes: {}", e);
            std::process::exit(1);
        }
    };

    let timings: Vec<(&str, Duration)> = vec![
        ("Define chain (depth 10)", run_benchmark(bench_define_chain, 200)),
        ("Define overrides (10)", run_benchmark(bench_define_overrides, 200)),
        ("Define host (8 mixins)", run_benchmark(bench_define_mixins, 200)),
        ("Create person (3 configs)", run_benchmark(|| bench_create_person(&engine), 5000)),
        ("call_parent chain (x100)", run_benchmark(|| bench_call_chain(&engine), 200)),
        ("Override chain (x100)", run_benchmark(|| bench_call_overrides(&engine), 200)),
        ("Create list (10 names)", run_benchmark(|| bench_create_by_alias_list(&engine), 1000)),
    ];

    println!("{:<30} {:>14}", "Benchmark", "Time");
    println!("{}", "-".repeat(46));

    let mut total = Duration::ZERO;
    for (name, duration) in &timings {
        total += *duration;
        println!("{:<30} {:>12.2?}", name, duration);
    }

    println!("{}", "-".repeat(46));
    println!("{:<30} {:>12.2?}", "TOTAL", total);

    // Verify correctness
    println!("\n=======================================================");
    println!("  Correctness Verification");
    println!("=======================================================\n");

    let call_on = |class: &str, method: &str| -> Value {
        engine
            .create(class, Value::Undefined)
            .and_then(|inst| engine.call(&inst, method, vec![]))
            .unwrap_or(Value::Undefined)
    };

    let verifications: Vec<(&str, Value, Value)> = vec![
        (
            "Chain depth",
            Value::from((CHAIN_DEPTH - 1) as i64),
            call_on(&chain_class_name(CHAIN_DEPTH - 1), "depth"),
        ),
        (
            "Override stack",
            Value::from("o".repeat(CHAIN_DEPTH)),
            call_on("Bench.Target", "tag"),
        ),
        ("Mixin method", Value::from(7), call_on("Bench.mixin.Host", "m7")),
        (
            "Person getter",
            Value::from("john"),
            call_on("Bench.Person", "getFirstname"),
        ),
    ];

    println!("{:<20} {:>12} {:>12}", "Test", "Expected", "Actual");
    println!("{}", "-".repeat(50));

    for (name, expected, actual) in verifications {
        let status = if actual == expected { "✓" } else { "✗" };
        println!("{:<20} {:>12} {:>4} {:>7}", name, expected, status, actual);
    }
}
