//! Loads features from a WFS server, or shows the demo data if the server is not available, and prints what the
//! map would display.
//!
//! Usage: `cargo run --example load_features [endpoint]`

use std::sync::Arc;

use wfs_map::config::WfsConfig;
use wfs_map::control::{FallbackController, InteractionEngine, MapState, UserEvent};
use wfs_map::popup::detail_panel;

#[tokio::main]
async fn main() -> Result<(), wfs_map::error::MapError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = WfsConfig::default();
    if let Some(endpoint) = std::env::args().nth(1) {
        config = config.with_endpoint(endpoint);
    }

    let controller = FallbackController::from_config(&config)?;
    let engine = Arc::new(InteractionEngine::new(controller.state()));
    controller.subscribe(engine.clone());
    controller.subscribe(Arc::new(|state: &Arc<MapState>| {
        log::info!("Map state: {:?}", state.phase());
    }));

    let state = controller.init().await;
    let status = state.status();
    println!(
        "{} ({}): {} features",
        status.badge_text, status.data_kind_label, status.feature_count
    );
    if let Some(error) = state.diagnostic_error() {
        println!("Last error: {error}");
    }

    for item in engine.feature_layer().render_items() {
        println!(
            "  {} [{}] stroke {} fill {}",
            item.feature.title(),
            item.feature.id,
            item.style.stroke_color.to_hex(),
            item.style.fill_color.to_hex()
        );
    }

    let first = state
        .store()
        .iter()
        .next()
        .map(|feature| feature.id.clone());
    if let Some(id) = first {
        engine.handle(&UserEvent::FeatureClick(id));
        if let Some(feature) = engine.selection().feature() {
            let panel = detail_panel(feature);
            println!("{}", panel.title);
            for entry in &panel.entries {
                println!("  {}: {}", entry.key, entry.value);
            }
            if let Some(more) = panel.more_label() {
                println!("  {more}");
            }
        }
    }

    Ok(())
}
