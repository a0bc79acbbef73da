//! End-to-end tests through the front controller.
//!
//! A real route table and controller registry are assembled the way an
//! application bootstrap would, then request paths run the whole
//! pipeline: path-root stripping, routing, dispatch, render.

use forerunner::{
    ActionOutcome, AppConfig, Context, Controller, ControllerRegistry, EventListener, Front,
    Params, RouteTable,
};
use std::sync::{Arc, Mutex};

struct GreetController;

impl Controller for GreetController {
    fn has_action(&self, action: &str) -> bool {
        matches!(action, "show" | "index")
    }

    fn invoke(&mut self, _action: &str, ctx: &mut Context) -> ActionOutcome {
        let name = ctx.param_text("name").unwrap_or("world").to_string();
        ctx.assign("body", format!("hello, {name}"));
        ActionOutcome::Render
    }

    fn render(&mut self, ctx: &mut Context) -> String {
        ctx.get("body").unwrap_or_default().to_string()
    }
}

struct ErrorController;

impl Controller for ErrorController {
    fn has_action(&self, action: &str) -> bool {
        action == "notFound"
    }

    fn invoke(&mut self, _action: &str, _ctx: &mut Context) -> ActionOutcome {
        ActionOutcome::Render
    }

    fn render(&mut self, _ctx: &mut Context) -> String {
        "not found".to_string()
    }
}

fn sample_table() -> RouteTable {
    let mut table = RouteTable::new();
    table
        .register("Greeting")
        .expect("register")
        .pattern("greet/:name")
        .endpoint("Greet", "show");
    table
}

fn sample_registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.register("Greet", || GreetController);
    registry.register("Error", || ErrorController);
    registry
}

fn sample_front(config: AppConfig) -> Front {
    Front::new(config, sample_table(), sample_registry())
}

#[test]
fn routed_request_renders_through_the_pipeline() {
    let front = sample_front(AppConfig::default());

    let page = front.handle("/greet/rust").expect("dispatch");
    assert_eq!(page.controller, "Greet");
    assert_eq!(page.action, "show");
    assert_eq!(page.body, "hello, rust");
}

#[test]
fn unrouted_request_lands_on_the_error_controller() {
    let front = sample_front(AppConfig::default());

    let page = front.handle("/no/such/thing").expect("dispatch");
    assert_eq!(page.controller, "Error");
    assert_eq!(page.action, "notFound");
    assert_eq!(page.body, "not found");
}

#[test]
fn path_root_is_stripped_before_routing() {
    let config = AppConfig {
        path_root: "/myapp".to_string(),
        ..AppConfig::default()
    };
    let front = sample_front(config);

    let page = front.handle("/myapp/greet/rust").expect("dispatch");
    assert_eq!(page.body, "hello, rust");
}

#[test]
fn trailing_slash_on_path_root_is_tolerated() {
    let config = AppConfig {
        path_root: "/myapp/".to_string(),
        ..AppConfig::default()
    };
    let front = sample_front(config);

    let page = front.handle("/myapp/greet/rust").expect("dispatch");
    assert_eq!(page.body, "hello, rust");
}

#[test]
fn paths_outside_the_root_pass_through_unchanged() {
    let config = AppConfig {
        path_root: "/myapp".to_string(),
        ..AppConfig::default()
    };
    let front = sample_front(config);

    // No prefix to strip; the raw path is routed as-is.
    let page = front.handle("/greet/rust").expect("dispatch");
    assert_eq!(page.body, "hello, rust");
}

#[test]
fn seeded_params_reach_the_controller() {
    let front = sample_front(AppConfig::default());

    let mut seed = Params::new();
    seed.push("name", "from-query");

    // /greet alone is too short for the route, so it resolves
    // positionally; nothing in the path binds :name and the controller
    // sees the seeded value.
    let page = front.handle_with("/greet", seed).expect("dispatch");
    assert_eq!(page.body, "hello, from-query");

    let mut seed = Params::new();
    seed.push("name", "from-query");

    // A matched route variable shadows the seed.
    let page = front.handle_with("/greet/path", seed).expect("dispatch");
    assert_eq!(page.body, "hello, path");
}

#[test]
fn reverse_routing_is_reachable_through_the_front() {
    let front = sample_front(AppConfig::default());

    let url = front
        .router()
        .table()
        .reverse("Greeting", &[("name", "ada")])
        .expect("reverse");
    assert_eq!(url, "greet/ada");
}

#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl EventListener for RecordingListener {
    fn request_initialised(&self, controller: &str, action: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("request:{controller}:{action}"));
    }

    fn controller_initialised(&self, controller: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("controller:{controller}"));
    }
}

#[test]
fn request_initialised_fires_before_controller_construction() {
    let listener = Arc::new(RecordingListener::default());
    let front = Front::with_listener(
        AppConfig::default(),
        sample_table(),
        sample_registry(),
        Arc::clone(&listener) as Arc<dyn EventListener>,
    );

    front.handle("/greet/rust").expect("dispatch");

    let events = listener.events.lock().expect("lock");
    assert_eq!(
        *events,
        vec![
            "request:Greet:show".to_string(),
            "controller:Greet".to_string(),
        ]
    );
}

#[test]
fn config_file_drives_the_front_controller() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.toml");
    std::fs::write(
        &path,
        r#"
        project = "sample"
        path_root = "/sample"
        "#,
    )
    .expect("write config");

    let config = AppConfig::load(&path).expect("load");
    assert_eq!(config.project, "sample");

    let front = sample_front(config);
    let page = front.handle("/sample/greet/rust").expect("dispatch");
    assert_eq!(page.body, "hello, rust");
}
