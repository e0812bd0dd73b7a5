use crate::bundle::RecordingBundle;
use crate::presentation::renderers::{TuiRenderer, ViewerApp};
use anyhow::{Context, Result};
use recview_runtime::{
    LookAndFeel, RecordingView, SelectionEnrichment, StyleRegenerator, ViewerConfig,
};
use std::path::Path;
use std::sync::Arc;

pub fn handle(config: &ViewerConfig, bundle_path: &Path) -> Result<()> {
    let bundle = RecordingBundle::load(bundle_path)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.enrichment.worker_threads)
        .thread_name("recview-enrichment")
        .enable_all()
        .build()
        .context("Failed to start source lookup workers")?;

    let locator = Arc::new(bundle.locator());
    tracing::info!(
        recording = %bundle.recording.id,
        sources = locator.len(),
        "opening viewer"
    );

    let enrichment = SelectionEnrichment::new(locator, runtime.handle().clone());
    let view = RecordingView::new(
        bundle.recording,
        bundle.metadata,
        enrichment,
        config.render.clone(),
    );
    let look = LookAndFeel::new(config.font.clone(), StyleRegenerator::new(), Vec::new());

    let mut app = ViewerApp::new(view, look, bundle_path.to_path_buf());
    let result = TuiRenderer::new().run(&mut app);

    app.dispose();
    drop(app);
    runtime.shutdown_background();
    result
}
