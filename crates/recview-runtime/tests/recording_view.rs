use recview_engine::RenderSettings;
use futures::FutureExt;
use recview_runtime::{
    CompletionOutcome, Error, LocateFuture, RecordingView, Result, SelectionEnrichment,
    SourceLocator,
};
use recview_testing::fixtures::{sample_metadata, sample_recording};
use recview_testing::{call, values, PaneEvent, RecordingPane, StaticLocator};
use recview_types::{CallRecord, CallRecordId, Method, Recording};
use std::sync::Arc;
use tokio::runtime::Handle;

fn new_view(recording: Recording) -> RecordingView {
    let enrichment = SelectionEnrichment::new(Arc::new(StaticLocator::new()), Handle::current());
    RecordingView::new(
        recording,
        sample_metadata(),
        enrichment,
        RenderSettings::default(),
    )
}

/// The sample recording with one more call recorded under `Cart.total`.
fn grown_recording() -> Recording {
    let mut recording = sample_recording();
    let total = &mut recording.root.children[2];
    total.children.push(
        call(7, "com.example.shop.Discounts", "apply")
            .arg(values::int(7))
            .returns(values::int(6))
            .build(),
    );
    recording
}

#[tokio::test]
async fn test_init_runs_once() -> Result<()> {
    let mut view = new_view(sample_recording());
    assert!(matches!(view.tree(), Err(Error::NotInitialized(_))));

    assert!(view.init()?);
    let root = view.tree()?.root();
    let children = view.expand(root)?;

    assert!(!view.init()?);
    assert_eq!(view.tree()?.children(root)?, Some(children.as_slice()));
    Ok(())
}

#[tokio::test]
async fn test_selected_without_selection_is_recoverable() -> Result<()> {
    let mut view = new_view(sample_recording());
    view.init()?;

    let err = view.selected().expect_err("nothing selected");
    assert!(err.is_no_selection());
    assert_eq!(view.selected_call_id(), None);
    Ok(())
}

#[tokio::test]
async fn test_labels_render_through_view_settings() -> Result<()> {
    let mut view = new_view(sample_recording());
    view.init()?;
    let root = view.tree()?.root();
    let children = view.expand(root)?;

    let labels: Vec<String> = children
        .iter()
        .map(|node| view.label(*node).map(|label| label.plain_text()))
        .collect::<Result<_>>()?;
    insta::assert_debug_snapshot!(labels, @r#"
    [
        "new Cart()",
        "Cart.add(\"apple\", 3) -> true",
        "Cart.total() -> 7",
        "Checkout.pay(7) !! IllegalStateException: \"card declined\"",
    ]
    "#);
    Ok(())
}

#[tokio::test]
async fn test_refresh_keeps_expanded_nodes_and_adds_new_calls() -> Result<()> {
    let mut view = new_view(sample_recording());
    let mut pane = RecordingPane::new();
    view.init()?;
    let root = view.tree()?.root();
    let children = view.expand(root)?;
    let total = children[2];
    let price_list = view.expand(total)?;
    view.select(Some(price_list[0]), &mut pane)?;

    let unchanged = view.refresh(&mut pane)?;
    assert_eq!(unchanged.added, 0);
    assert_eq!(unchanged.dropped, 0);
    assert_eq!(view.tree()?.children(root)?, Some(children.as_slice()));

    view.update(grown_recording())?;
    let summary = view.refresh(&mut pane)?;
    assert_eq!(summary.added, 1);
    assert!(!summary.selection_cleared);

    let tree = view.tree()?;
    let total_children = tree.children(total)?.expect("still expanded");
    assert_eq!(total_children.len(), 2);
    assert_eq!(total_children[0], price_list[0]);
    assert_eq!(tree.call_id(total_children[1])?, CallRecordId(7));
    assert_eq!(view.selected()?, price_list[0]);
    Ok(())
}

#[tokio::test]
async fn test_refresh_clears_enrichment_when_selected_call_vanishes() -> Result<()> {
    let mut view = new_view(grown_recording());
    let mut pane = RecordingPane::new();
    view.init()?;
    let root = view.tree()?.root();
    let total = view.expand(root)?[2];
    let discount = view.expand(total)?[1];
    view.select(Some(discount), &mut pane)?;

    view.update(sample_recording())?;
    let summary = view.refresh(&mut pane)?;

    assert!(summary.selection_cleared);
    assert!(view.selected().expect_err("selection gone").is_no_selection());
    assert_eq!(pane.last(), Some(&PaneEvent::Cleared));
    Ok(())
}

#[tokio::test]
async fn test_update_rejects_other_recordings() -> Result<()> {
    let mut view = new_view(sample_recording());
    view.init()?;

    let other = call(1, "com.example.Other", "main").recording(7);
    let err = view.update(other).expect_err("different recording");
    assert!(matches!(
        err,
        Error::Engine(recview_engine::Error::RecordingMismatch { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_refresh_before_init_builds_tree() -> Result<()> {
    let mut view = new_view(sample_recording());
    let mut pane = RecordingPane::new();

    view.update(grown_recording())?;
    view.refresh(&mut pane)?;

    assert!(view.is_initialized());
    assert_eq!(view.tree()?.arena().len(), 7);
    Ok(())
}

/// A recursive descent `depth` calls deep, as recorded from a program
/// that recursed that far.
fn deep_recording(depth: u64) -> Recording {
    let mut current = CallRecord::new(depth, Method::new("com.example.Parser", "descend"));
    for id in (1..depth).rev() {
        let mut parent = CallRecord::new(id, Method::new("com.example.Parser", "descend"));
        parent.children.push(current);
        current = parent;
    }
    Recording::new(42, current)
}

#[tokio::test]
async fn test_deep_recording_survives_init_refresh_and_dispose() -> Result<()> {
    let depth = 100_000;
    let mut view = new_view(deep_recording(depth));
    let mut pane = RecordingPane::new();

    assert!(view.init()?);
    assert_eq!(view.tree()?.arena().len(), depth as usize);

    let root = view.tree()?.root();
    let first = view.expand(root)?;
    view.select(Some(first[0]), &mut pane)?;

    view.update(deep_recording(depth + 1))?;
    let summary = view.refresh(&mut pane)?;
    assert_eq!(summary.retained, 2);
    assert!(!summary.selection_cleared);
    assert_eq!(view.tree()?.arena().len(), depth as usize + 1);

    view.dispose();
    assert!(!view.is_initialized());
    Ok(())
}

#[tokio::test]
async fn test_disposed_view_rebuilds_only_from_a_new_snapshot() -> Result<()> {
    let mut view = new_view(sample_recording());
    view.init()?;
    view.dispose();

    assert!(matches!(view.init(), Err(Error::NotInitialized(_))));

    view.update(grown_recording())?;
    assert!(view.init()?);
    assert_eq!(view.tree()?.arena().len(), 7);
    Ok(())
}

struct BrokenLocator;

impl SourceLocator for BrokenLocator {
    fn locate(&self, type_name: &str) -> LocateFuture {
        let type_name = type_name.to_string();
        async move {
            if type_name.is_empty() {
                return Ok(None);
            }
            panic!("index for {} is corrupt", type_name)
        }
        .boxed()
    }
}

#[tokio::test]
async fn test_panicking_locator_leaves_no_source_in_pane() -> Result<()> {
    let enrichment = SelectionEnrichment::new(Arc::new(BrokenLocator), Handle::current());
    let mut view = RecordingView::new(
        sample_recording(),
        sample_metadata(),
        enrichment,
        RenderSettings::default(),
    );
    let mut pane = RecordingPane::new();
    view.init()?;
    let root = view.tree()?.root();
    view.select(Some(root), &mut pane)?;

    let outcome = view.wait_enrichment(&mut pane).await;

    assert_eq!(outcome, Some(CompletionOutcome::Applied));
    assert_eq!(pane.shown_types(), vec![None]);

    let cart = view.expand(root)?[0];
    view.select(Some(cart), &mut pane)?;
    assert_eq!(view.wait_enrichment(&mut pane).await, Some(CompletionOutcome::Applied));
    assert_eq!(pane.shown_types(), vec![None, None]);
    Ok(())
}
