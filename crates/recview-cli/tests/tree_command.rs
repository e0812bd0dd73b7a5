use assert_cmd::Command;
use predicates::prelude::*;
use recview_testing::builders::{call, values};
use recview_testing::fixtures::{bundle, deep_recording, sample_metadata};
use recview_testing::TestWorld;

#[test]
fn test_tree_prints_requested_depth() {
    let world = TestWorld::new().with_sample_bundle("shop.json");

    let result = world.run(&["tree", "shop.json", "--depth", "1"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    insta::assert_snapshot!(result.stdout(), @r#"
    recording-42 (6 calls)
    ▾ App.main()  #1
        new Cart()  #2
        Cart.add("apple", 3) -> true  #3
      ▸ Cart.total() -> 7  #4
        Checkout.pay(7) !! IllegalStateException: "card declined"  #6
    1 of 6 calls hidden; raise --depth to show them
    "#);
}

#[test]
fn test_tree_expands_everything_by_default() {
    let world = TestWorld::new().with_sample_bundle("shop.json");

    let result = world.run(&["tree", "shop.json"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("▾ Cart.total() -> 7  #4"));
    assert!(result.stdout().contains("PriceList.prices()"));
    assert!(!result.stdout().contains("hidden"));
}

#[test]
fn test_tree_json_carries_rows_and_labels() {
    let world = TestWorld::new()
        .with_format("json")
        .with_sample_bundle("shop.json");

    let result = world.run(&["tree", "shop.json", "--depth", "1"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let json = result.json().unwrap();
    let rows = json["content"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(json["content"]["call_count"], 6);
    assert_eq!(rows[2]["text"], "Cart.add(\"apple\", 3) -> true");
    assert_eq!(rows[3]["has_children"], true);
    assert_eq!(rows[3]["expanded"], false);
    assert!(rows[0].get("painted").is_none());
    assert_eq!(json["notes"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_full_type_names_flag_overrides_config() {
    let world = TestWorld::new()
        .with_config("[render]\nshow_full_type_names = false\n")
        .with_sample_bundle("shop.json");

    let result = world
        .run(&["tree", "shop.json", "--depth", "1", "--full-type-names"])
        .unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("com.example.shop.Cart.add("));
}

#[test]
fn test_deeply_nested_bundle_loads() {
    let deep = bundle(&deep_recording(9, 2_000), &sample_metadata(), &[]).unwrap();
    let world = TestWorld::new().with_bundle("deep.json", &deep);

    let result = world.run(&["tree", "deep.json", "--depth", "1"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    let stdout = result.stdout();
    assert!(stdout.starts_with("recording-9 (2000 calls)\n"), "{}", stdout);
    assert!(stdout.contains("1998 of 2000 calls hidden"), "{}", stdout);

    let result = world.run(&["source", "deep.json", "2000"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert_eq!(
        result.stdout(),
        "No source available for com.example.Walker (method descend)\n"
    );
}

#[test]
fn test_dangling_parent_fails_the_command() {
    let world = TestWorld::new().with_file(
        "dangling.json",
        r#"{
            "recording": {
                "id": 4,
                "calls": [
                    { "id": 1, "method": { "declaring_type": "com.example.App", "name": "main" } },
                    { "id": 2, "parent": 7, "method": { "declaring_type": "com.example.App", "name": "run" } }
                ]
            }
        }"#,
    );

    let result = world.run(&["tree", "dangling.json"]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr().contains("Failed to parse bundle")
            && result.stderr().contains("unknown parent"),
        "stderr: {}",
        result.stderr()
    );
}

#[test]
fn test_malformed_value_fails_the_command() {
    let recording = call(1, "com.example.App", "main")
        .arg(values::array(-1, vec![]))
        .recording(7);
    let broken = bundle(&recording, &sample_metadata(), &[]).unwrap();
    let world = TestWorld::new().with_bundle("broken.json", &broken);

    let result = world.run(&["tree", "broken.json"]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr().contains("Malformed record"),
        "stderr: {}",
        result.stderr()
    );
}

#[test]
#[allow(deprecated)]
fn test_missing_bundle_names_the_file() {
    let world = TestWorld::new();
    let mut cmd = Command::cargo_bin("recview").unwrap();
    world.configure_command(&mut cmd);

    cmd.args(["tree", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read bundle").and(predicate::str::contains("nowhere.json")));
}

#[test]
#[allow(deprecated)]
fn test_unparseable_bundle_is_reported() {
    let world = TestWorld::new().with_file("junk.json", "{ not json");
    let mut cmd = Command::cargo_bin("recview").unwrap();
    world.configure_command(&mut cmd);

    cmd.args(["tree", "junk.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse bundle"));
}
