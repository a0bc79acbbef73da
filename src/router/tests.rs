use super::matcher::match_path;
use crate::request::ParamValue;
use crate::route::RouteTable;

fn single_route_table(pattern: &str) -> RouteTable {
    let mut table = RouteTable::new();
    table
        .register("Test")
        .expect("register")
        .pattern(pattern)
        .endpoint("Test", "run");
    table
}

#[test]
fn literal_match_is_case_sensitive() {
    let table = single_route_table("foo/bar");
    let route = table.get("Test").expect("route");
    assert!(match_path(route, &["foo", "bar"]).is_some());
    assert!(match_path(route, &["Foo", "bar"]).is_none());
    assert!(match_path(route, &["foo", "BAR"]).is_none());
}

#[test]
fn shorter_request_never_matches() {
    let table = single_route_table("foo/bar/acme");
    let route = table.get("Test").expect("route");
    assert!(match_path(route, &["foo"]).is_none());
    assert!(match_path(route, &["foo", "bar"]).is_none());
    assert!(match_path(route, &["foo", "bar", "acme"]).is_some());
}

#[test]
fn trailing_request_segments_are_ignored() {
    let table = single_route_table("foo");
    let route = table.get("Test").expect("route");
    let matched = match_path(route, &["foo", "bar", "baz"]).expect("match");
    assert_eq!(matched.consumed, 1);
    assert_eq!(matched.consumed_prefix, "/foo");
}

#[test]
fn variable_binds_under_default_constraint() {
    let table = single_route_table("foo/:bar");
    let route = table.get("Test").expect("route");
    let matched = match_path(route, &["foo", "hello-world_9"]).expect("match");
    assert_eq!(matched.variables.get("bar"), Some(&ParamValue::Text("hello-world_9".into())));
    // Default constraint rejects tokens with other punctuation.
    assert!(match_path(route, &["foo", "he!!o"]).is_none());
}

#[test]
fn explicit_constraint_overrides_default() {
    let mut table = RouteTable::new();
    table
        .register("Test")
        .expect("register")
        .pattern("foo/:bar")
        .constrain("bar", r"\d+");
    let route = table.get("Test").expect("route");
    assert!(match_path(route, &["foo", "123"]).is_some());
    assert!(match_path(route, &["foo", "12a"]).is_none());
    assert!(match_path(route, &["foo", "a12"]).is_none());
}

#[test]
fn constraint_is_case_insensitive() {
    let mut table = RouteTable::new();
    table
        .register("Test")
        .expect("register")
        .pattern(":word")
        .constrain("word", "[a-z]+");
    let route = table.get("Test").expect("route");
    assert!(match_path(route, &["HELLO"]).is_some());
}

#[test]
fn constraint_anchors_to_single_segment_only() {
    let mut table = RouteTable::new();
    table
        .register("Test")
        .expect("register")
        .pattern("foo/:bar")
        .constrain("bar", r"\d+");
    let route = table.get("Test").expect("route");
    // The digit constraint applies to segment 1 alone; later segments
    // are free-form and never tested against it.
    let matched = match_path(route, &["foo", "123", "anything"]).expect("match");
    assert_eq!(matched.consumed, 2);
    assert_eq!(matched.consumed_prefix, "/foo/123");
}

#[test]
fn empty_pattern_matches_vacuously() {
    let table = single_route_table("");
    let route = table.get("Test").expect("route");
    let matched = match_path(route, &["anything", "at", "all"]).expect("match");
    assert_eq!(matched.consumed, 0);
    assert_eq!(matched.consumed_prefix, "");
    assert!(matched.variables.is_empty());
}

#[test]
fn consumed_prefix_holds_request_values() {
    let table = single_route_table("blog/:id");
    let route = table.get("Test").expect("route");
    let matched = match_path(route, &["blog", "42", "draft"]).expect("match");
    assert_eq!(matched.consumed_prefix, "/blog/42");
}
