//! CLI wrapper running the hello-world application on the blend engine.
//!
//! Usage:
//!   blend                         # Greets "World"
//!   blend --entity Sally          # Greets "Sally"
//!   blend --config blend.toml     # Engine settings from a TOML file
//!
//! `Hello.app.Main` only declares that it requires `Hello.app.Greeter`; the
//! greeter is defined lazily from a class catalog when `Main` is defined.

use std::path::PathBuf;
use std::process;

use blend::runner::api::Engine;
use blend::runner::builder::definition::ClassDefinition;
use blend::runner::ds::value::Value;
use blend::runner::loader::catalog::ClassCatalog;
use blend::runner::loader::catalog_resolver::CatalogResolver;
use blend::runner::loader::config::EngineConfig;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blend")]
#[command(about = "Runs the hello-world application through the class engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Who to greet
    #[arg(short, long, default_value = "World")]
    entity: String,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let mut engine = match Engine::with_config(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    engine.add_resolver(CatalogResolver::new(hello_catalog()));

    match run(&mut engine, &cli.entity) {
        Ok(greeting) => info!("{}", greeting),
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            process::exit(1);
        }
    }
}

fn hello_catalog() -> ClassCatalog {
    ClassCatalog::new().with("Hello.app.Greeter", || {
        ClassDefinition::new()
            .member("entity", Value::Null)
            .method("sayHello", |ctx| {
                let greeting = format!("Hello {}!", ctx.get("entity")?);
                println!("{}", greeting);
                Ok(Value::from(greeting))
            })
    })
}

fn run(engine: &mut Engine, entity: &str) -> Result<Value, blend::runner::ds::error::ClassError> {
    let entity = entity.to_string();
    engine.define_class(
        "Hello.app.Main",
        ClassDefinition::new()
            .requires("Hello.app.Greeter")
            .method("run", move |ctx| {
                let greeter = ctx.engine().create(
                    "Hello.app.Greeter",
                    Value::object_from(vec![("entity", entity.as_str())]),
                )?;
                ctx.engine().call(&greeter, "sayHello", vec![])
            }),
        None,
    )?;

    let main = engine.create("Hello.app.Main", Value::Undefined)?;
    engine.call(&main, "run", vec![])
}
