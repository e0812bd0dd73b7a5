use recview_testing::TestWorld;

#[test]
fn test_styles_scale_with_font_size() {
    let world = TestWorld::new();

    let result = world.run(&["styles", "--font-size", "1.5"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("font-size: 1.5em;"));
    assert!(result.stdout().contains("height: 3.0em;"));
    assert!(result.stdout().contains("font-size: 1.2em;"));
}

#[test]
fn test_styles_use_configured_font() {
    let world = TestWorld::new().with_config("[font]\nsize = 2.0\nname = \"Iosevka\"\n");

    let result = world.run(&["styles"]).unwrap();

    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("font-family: \"Iosevka\";"));
    assert!(result.stdout().contains("font-size: 2.0em;"));
}

#[test]
fn test_config_from_environment_variable() {
    let world = TestWorld::new();
    let config = world.temp_dir().join("elsewhere.toml");
    std::fs::write(&config, "[font]\nname = \"Fira Code\"\n").unwrap();

    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_recview"));
    cmd.arg("styles")
        .current_dir(world.temp_dir())
        .env("RECVIEW_CONFIG", &config);
    let output = cmd.output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("\"Fira Code\""));
}

#[test]
fn test_invalid_font_size_is_rejected() {
    let world = TestWorld::new();

    let result = world.run(&["styles", "--font-size", "0"]).unwrap();

    assert!(!result.success());
    assert!(result.stderr().contains("Invalid font"), "stderr: {}", result.stderr());
}

#[test]
fn test_invalid_config_is_rejected() {
    let world = TestWorld::new().with_config("[font]\nsize = -1.0\n");

    let result = world.run(&["styles"]).unwrap();

    assert!(!result.success());
    assert!(
        result.stderr().contains("Configuration error"),
        "stderr: {}",
        result.stderr()
    );
}
