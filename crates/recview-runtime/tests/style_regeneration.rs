use recview_runtime::{
    Error, FontCommand, FontSettings, LookAndFeel, Result, STYLE_TAG_PREFIX, StyleRef,
    StyleRegenerator,
};
use tempfile::TempDir;

fn base_styles() -> Vec<StyleRef> {
    vec![
        StyleRef::new("app://styles/base.css"),
        StyleRef::new("app://styles/tree.css"),
    ]
}

fn font_style_positions(styles: &[StyleRef]) -> Vec<usize> {
    styles
        .iter()
        .enumerate()
        .filter(|(_, style)| style.is_font_style())
        .map(|(index, _)| index)
        .collect()
}

#[test]
fn test_repeated_regeneration_keeps_one_entry_in_place() -> Result<()> {
    let dir = TempDir::new()?;
    let mut regenerator = StyleRegenerator::in_dir(dir.path());
    let mut styles = base_styles();

    regenerator.regenerate(&mut styles, 1.0, "monospace")?;
    styles.push(StyleRef::new("app://styles/theme.css"));
    assert_eq!(font_style_positions(&styles), vec![2]);

    for size in [2.0, 3.5, 1.25, 9.0] {
        let style = regenerator.regenerate(&mut styles, size, "monospace")?;
        assert_eq!(font_style_positions(&styles), vec![2]);
        assert_eq!(styles[2], style);
        assert_eq!(styles.len(), 4);
    }
    assert_eq!(styles[3].as_str(), "app://styles/theme.css");
    Ok(())
}

#[test]
fn test_written_sheet_matches_requested_font() -> Result<()> {
    let dir = TempDir::new()?;
    let mut regenerator = StyleRegenerator::in_dir(dir.path());
    let mut styles = Vec::new();

    let style = regenerator.regenerate(&mut styles, 1.5, "JetBrains Mono")?;
    let path = style.path().expect("file reference");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("utf-8 file name");
    assert!(file_name.starts_with(STYLE_TAG_PREFIX));
    assert!(file_name.ends_with(".css"));

    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("font-family: \"JetBrains Mono\";"));
    assert!(text.contains("font-size: 1.5em;"));
    assert!(text.contains("height: 3.0em;"));
    assert!(text.contains("font-size: 1.2em;"));
    Ok(())
}

#[test]
fn test_superseded_sheets_live_until_teardown() -> Result<()> {
    let dir = TempDir::new()?;
    let mut regenerator = StyleRegenerator::in_dir(dir.path());
    let mut styles = base_styles();

    let first = regenerator.regenerate(&mut styles, 1.0, "monospace")?;
    let second = regenerator.regenerate(&mut styles, 2.0, "monospace")?;
    let first_path = first.path().expect("file reference");
    let second_path = second.path().expect("file reference");

    assert_eq!(regenerator.resource_count(), 2);
    assert!(first_path.exists());
    assert!(second_path.exists());

    drop(regenerator);
    assert!(!first_path.exists());
    assert!(!second_path.exists());
    Ok(())
}

#[test]
fn test_write_failure_leaves_styles_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("does-not-exist");
    let mut regenerator = StyleRegenerator::in_dir(&missing);
    let mut styles = base_styles();
    styles.insert(
        1,
        StyleRef::new(format!("file:///tmp/{}old.css", STYLE_TAG_PREFIX)),
    );
    let before = styles.clone();

    let err = regenerator
        .regenerate(&mut styles, 2.0, "monospace")
        .expect_err("directory is missing");

    assert!(matches!(err, Error::StyleWrite(_)));
    assert!(err.to_string().starts_with("Could not write style sheet"));
    assert_eq!(styles, before);
    assert_eq!(regenerator.resource_count(), 0);
    Ok(())
}

#[test]
fn test_font_commands_step_and_rerender() -> Result<()> {
    let dir = TempDir::new()?;
    let mut look = LookAndFeel::new(
        FontSettings::new(1.0, "monospace"),
        StyleRegenerator::in_dir(dir.path()),
        base_styles(),
    );
    look.apply_current()?;

    assert_eq!(look.adjust(FontCommand::Increase)?.size, 2.0);
    assert_eq!(look.adjust(FontCommand::Increase)?.size, 3.0);
    assert_eq!(look.adjust(FontCommand::Decrease)?.size, 2.0);
    assert_eq!(font_style_positions(look.styles()), vec![2]);
    assert_eq!(look.styles().len(), 3);

    let text = std::fs::read_to_string(look.styles()[2].path().expect("file reference"))?;
    assert!(text.contains("font-size: 2.0em;"));
    assert!(text.contains("height: 4.0em;"));
    Ok(())
}

#[test]
fn test_failed_font_change_keeps_previous_font() -> Result<()> {
    let dir = TempDir::new()?;
    let styles_dir = dir.path().join("styles");
    std::fs::create_dir(&styles_dir)?;
    let mut look = LookAndFeel::new(
        FontSettings::new(2.0, "monospace"),
        StyleRegenerator::in_dir(&styles_dir),
        base_styles(),
    );
    let active = look.apply_current()?;

    std::fs::remove_dir_all(&styles_dir)?;
    let err = look
        .adjust(FontCommand::Increase)
        .expect_err("style directory removed");

    assert!(matches!(err, Error::StyleWrite(_)));
    assert_eq!(look.font().size, 2.0);
    assert_eq!(look.styles()[2], active);
    Ok(())
}
