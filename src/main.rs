use clap::Parser;
use forerunner::{
    ActionOutcome, AppConfig, Context, Controller, ControllerRegistry, Front, RouteTable,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve and dispatch a request path through a sample application.
#[derive(Parser)]
#[command(name = "forerunner", version, about)]
struct Cli {
    /// Request path to handle, e.g. /blog/42 or /index/hello/name/ada
    path: String,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the registered routes before dispatching
    #[arg(long)]
    dump_routes: bool,
}

struct IndexController;

impl Controller for IndexController {
    fn has_action(&self, action: &str) -> bool {
        matches!(action, "index" | "hello")
    }

    fn invoke(&mut self, action: &str, ctx: &mut Context) -> ActionOutcome {
        match action {
            "hello" => {
                let name = ctx.param_text("name").unwrap_or("stranger").to_string();
                ctx.assign("body", format!("Hello, {name}!"));
            }
            _ => ctx.assign("body", "Welcome to forerunner."),
        }
        ActionOutcome::Render
    }

    fn render(&mut self, ctx: &mut Context) -> String {
        ctx.get("body").unwrap_or_default().to_string()
    }
}

struct BlogController;

impl Controller for BlogController {
    fn has_action(&self, action: &str) -> bool {
        matches!(action, "view" | "error")
    }

    fn invoke(&mut self, action: &str, ctx: &mut Context) -> ActionOutcome {
        match action {
            "view" => match ctx.param_text("id") {
                Some(id) => {
                    ctx.assign("body", format!("Blog post #{id}"));
                    ActionOutcome::Render
                }
                None => ActionOutcome::forward("error"),
            },
            _ => {
                ctx.assign("body", "That blog post does not exist.");
                ActionOutcome::Render
            }
        }
    }

    fn render(&mut self, ctx: &mut Context) -> String {
        ctx.get("body").unwrap_or_default().to_string()
    }
}

struct ErrorController;

impl Controller for ErrorController {
    fn has_action(&self, action: &str) -> bool {
        matches!(action, "notFound" | "error")
    }

    fn invoke(&mut self, _action: &str, ctx: &mut Context) -> ActionOutcome {
        ctx.assign("body", "404: page not found");
        ActionOutcome::Render
    }

    fn render(&mut self, ctx: &mut Context) -> String {
        ctx.get("body").unwrap_or_default().to_string()
    }
}

fn bootstrap_routes() -> anyhow::Result<RouteTable> {
    let mut table = RouteTable::new();
    table
        .register("BlogPost")?
        .pattern("blog/:id")
        .constrain("id", r"\d+")
        .endpoint("Blog", "view");
    table
        .register("BlogLatest")?
        .pattern("blog")
        .endpoint("Blog", "view");
    Ok(table)
}

fn bootstrap_controllers() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.register("Index", || IndexController);
    registry.register("Blog", || BlogController);
    registry.register("Error", || ErrorController);
    registry
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .with_env_overrides();

    let front = Front::new(config, bootstrap_routes()?, bootstrap_controllers());

    if cli.dump_routes {
        front.router().dump_routes();
    }

    let page = front.handle(&cli.path)?;
    println!("{} -> {}::{}", cli.path, page.controller, page.action);
    println!("{}", page.body);

    Ok(())
}
