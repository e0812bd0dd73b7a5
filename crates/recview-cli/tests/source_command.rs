use assert_cmd::Command;
use predicates::prelude::*;
use recview_testing::TestWorld;

#[test]
fn test_source_marks_the_method_line() {
    let world = TestWorld::new().with_sample_bundle("shop.json");

    let result = world.run(&["source", "shop.json", "3"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let stdout = result.stdout();
    assert!(stdout.starts_with("com.example.shop.Cart :: add\n"), "{}", stdout);

    let marked: Vec<&str> = stdout.lines().filter(|line| line.starts_with('>')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("public boolean add(String item, int count)"));
}

#[test]
fn test_source_reaches_nested_calls() {
    let world = TestWorld::new().with_sample_bundle("shop.json");

    let result = world.run(&["source", "shop.json", "5"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(
        result.stdout(),
        "No source available for com.example.shop.PriceList (method prices)\n"
    );
}

#[test]
fn test_source_outside_class_path_is_not_shown() {
    let world = TestWorld::new().with_sample_bundle("shop.json");

    let result = world.run(&["source", "shop.json", "6"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result
        .stdout()
        .contains("No source available for com.example.shop.Checkout (method pay)"));
}

#[test]
fn test_source_json_includes_method_line() {
    let world = TestWorld::new()
        .with_format("json")
        .with_sample_bundle("shop.json");

    let result = world.run(&["source", "shop.json", "3"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json().unwrap();
    assert_eq!(json["content"]["call_id"], 3);
    assert_eq!(json["content"]["method_line"], 3);
    assert!(json["content"]["text"].as_str().unwrap().contains("class Cart"));
}

#[test]
#[allow(deprecated)]
fn test_unknown_call_id_fails() {
    let world = TestWorld::new().with_sample_bundle("shop.json");
    let mut cmd = Command::cargo_bin("recview").unwrap();
    world.configure_command(&mut cmd);

    cmd.args(["source", "shop.json", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No call 99"));
}
