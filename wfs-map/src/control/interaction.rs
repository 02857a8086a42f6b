use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use wfs_map_types::Feature;

use crate::control::{EventPropagation, MapState, UserEvent, UserEventHandler};
use crate::layer::FeatureLayer;
use crate::observer::StateObserver;
use crate::popup::Popup;

/// Feature selected by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    /// Nothing is selected.
    #[default]
    None,
    /// The feature is selected and its popup is open.
    Selected(Feature),
}

impl SelectionState {
    /// Selected feature, if any.
    pub fn feature(&self) -> Option<&Feature> {
        match self {
            SelectionState::None => None,
            SelectionState::Selected(feature) => Some(feature),
        }
    }
}

/// State changed by the [`UserEventHandler`]s.
#[derive(Debug, Clone)]
pub struct InteractionState {
    map_state: Arc<MapState>,
    selection: SelectionState,
    hovered: Option<String>,
}

impl InteractionState {
    /// Map state the interaction works with.
    pub fn map_state(&self) -> &Arc<MapState> {
        &self.map_state
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Id of the feature under the pointer.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Selects the feature.
    pub fn select(&mut self, feature: Feature) {
        debug!("Feature {} selected", feature.id);
        self.selection = SelectionState::Selected(feature);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection = SelectionState::None;
    }

    /// Sets the feature under the pointer.
    pub fn set_hovered(&mut self, id: Option<String>) {
        self.hovered = id;
    }

    /// Feature layer of the map state with the hover applied.
    pub fn feature_layer(&self) -> FeatureLayer {
        let mut layer = self.map_state.feature_layer();
        layer.set_hovered(self.hovered.clone());
        layer
    }
}

/// Handles clicks and pointer movement over the features.
///
/// A hit feature is selected and the event is stopped, so that the handlers after this one (the
/// [`MapClickHandler`] by default) do not clear the selection.
#[derive(Debug, Default, Copy, Clone)]
pub struct FeatureClickHandler;

impl UserEventHandler for FeatureClickHandler {
    fn handle(&self, event: &UserEvent, state: &mut InteractionState) -> EventPropagation {
        match event {
            UserEvent::FeatureClick(id) => {
                match state.map_state.store().find(id).cloned() {
                    Some(feature) => {
                        state.select(feature);
                        EventPropagation::Stop
                    }
                    None => EventPropagation::Propagate,
                }
            }
            UserEvent::Click {
                position,
                tolerance,
            } => {
                let hit = state
                    .map_state
                    .feature_layer()
                    .features_at(position, *tolerance)
                    .first()
                    .map(|feature| (*feature).clone());
                match hit {
                    Some(feature) => {
                        state.select(feature);
                        EventPropagation::Stop
                    }
                    None => EventPropagation::Propagate,
                }
            }
            UserEvent::PointerEnter(id) => {
                state.set_hovered(Some(id.clone()));
                EventPropagation::Stop
            }
            UserEvent::PointerLeave(id) => {
                if state.hovered() == Some(id.as_str()) {
                    state.set_hovered(None);
                }
                EventPropagation::Stop
            }
            UserEvent::PopupClosed => {
                state.clear_selection();
                EventPropagation::Stop
            }
            UserEvent::BackgroundClick => EventPropagation::Propagate,
        }
    }
}

/// Clears the selection when the map background is clicked.
#[derive(Debug, Default, Copy, Clone)]
pub struct MapClickHandler;

impl UserEventHandler for MapClickHandler {
    fn handle(&self, event: &UserEvent, state: &mut InteractionState) -> EventPropagation {
        match event {
            UserEvent::BackgroundClick | UserEvent::Click { .. } => {
                state.clear_selection();
                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }
}

/// Keeps the selection and hover state and routes user events to the handlers.
///
/// The engine observes the [`FallbackController`](crate::control::FallbackController): when the dataset is replaced
/// the selection and the hover are cleared, since they may refer to features that are not shown anymore.
pub struct InteractionEngine {
    state: RwLock<InteractionState>,
    handlers: Vec<Box<dyn UserEventHandler>>,
}

impl InteractionEngine {
    /// Creates a new engine with the [`FeatureClickHandler`] followed by the [`MapClickHandler`].
    pub fn new(map_state: Arc<MapState>) -> Self {
        Self {
            state: RwLock::new(InteractionState {
                map_state,
                selection: SelectionState::None,
                hovered: None,
            }),
            handlers: vec![Box::new(FeatureClickHandler), Box::new(MapClickHandler)],
        }
    }

    /// Adds a handler at the end of the handler list.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Gives the event to the handlers in order until one of them returns [`EventPropagation::Stop`].
    pub fn handle(&self, event: &UserEvent) -> EventPropagation {
        let mut state = self.state.write();
        for handler in &self.handlers {
            if handler.handle(event, &mut state) == EventPropagation::Stop {
                return EventPropagation::Stop;
            }
        }

        EventPropagation::Propagate
    }

    /// Current selection.
    pub fn selection(&self) -> SelectionState {
        self.state.read().selection.clone()
    }

    /// Id of the feature under the pointer.
    pub fn hovered(&self) -> Option<String> {
        self.state.read().hovered.clone()
    }

    /// Popup of the selected feature.
    pub fn popup(&self) -> Option<Popup> {
        self.state
            .read()
            .selection
            .feature()
            .map(Popup::for_feature)
    }

    /// Feature layer to draw, with the hover applied.
    pub fn feature_layer(&self) -> FeatureLayer {
        self.state.read().feature_layer()
    }
}

impl StateObserver for InteractionEngine {
    fn state_changed(&self, map_state: &Arc<MapState>) {
        let mut state = self.state.write();
        if map_state.sequence() <= state.map_state.sequence() {
            debug!(
                "Ignoring state {}, engine already has state {}",
                map_state.sequence(),
                state.map_state.sequence()
            );
            return;
        }

        if map_state.store().revision() != state.map_state.store().revision() {
            state.clear_selection();
            state.set_hovered(None);
        }
        state.map_state = map_state.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ActiveLayerState, Transition};
    use crate::Color;
    use wfs_map_types::latlon;

    fn demo_state() -> Arc<MapState> {
        Arc::new(
            MapState::default()
                .apply(Transition::DemoRequested)
                .expect("demo"),
        )
    }

    #[test]
    fn click_selects_and_background_clears() {
        let engine = InteractionEngine::new(demo_state());

        let propagation = engine.handle(&UserEvent::FeatureClick("kazan".into()));
        assert_eq!(propagation, EventPropagation::Stop);
        assert_eq!(
            engine.selection().feature().map(|f| f.id.as_str()),
            Some("kazan")
        );
        assert_eq!(
            engine.popup().map(|p| p.content.title),
            Some("Kazan".to_string())
        );

        engine.handle(&UserEvent::BackgroundClick);
        assert_eq!(engine.selection(), SelectionState::None);
        assert_eq!(engine.popup(), None);
    }

    #[test]
    fn feature_click_is_not_seen_by_background_handler() {
        let mut engine = InteractionEngine::new(demo_state());
        let background_calls = Arc::new(parking_lot::Mutex::new(0));
        let counter = background_calls.clone();
        engine.add_handler(move |event: &UserEvent, _: &mut InteractionState| {
            if matches!(event, UserEvent::FeatureClick(_)) {
                *counter.lock() += 1;
            }
            EventPropagation::Propagate
        });

        engine.handle(&UserEvent::FeatureClick("moscow".into()));
        assert_eq!(*background_calls.lock(), 0);
        assert!(engine.selection().feature().is_some());

        engine.handle(&UserEvent::FeatureClick("unknown".into()));
        assert_eq!(*background_calls.lock(), 1);
    }

    #[test]
    fn click_by_position() {
        let engine = InteractionEngine::new(demo_state());

        engine.handle(&UserEvent::Click {
            position: latlon!(55.75, 37.6),
            tolerance: 0.0,
        });
        assert_eq!(
            engine.selection().feature().map(|f| f.id.as_str()),
            Some("moscow")
        );

        engine.handle(&UserEvent::Click {
            position: latlon!(0.0, 0.0),
            tolerance: 0.0,
        });
        assert_eq!(engine.selection(), SelectionState::None);
    }

    #[test]
    fn popup_closed() {
        let engine = InteractionEngine::new(demo_state());
        engine.handle(&UserEvent::FeatureClick("spb".into()));
        engine.handle(&UserEvent::PopupClosed);
        assert_eq!(engine.selection(), SelectionState::None);
    }

    #[test]
    fn hover_restores_style() {
        let engine = InteractionEngine::new(demo_state());
        let base = engine.feature_layer().render_items()[0].style;
        assert_eq!(base.fill_color, Color::from_hex("#27ae60"));

        engine.handle(&UserEvent::PointerEnter("moscow".into()));
        let hovered = engine.feature_layer().render_items()[0].style;
        assert_eq!(hovered.stroke_width, 4.0);
        assert_eq!(hovered.fill_opacity, 0.3);
        assert_eq!(engine.selection(), SelectionState::None);

        engine.handle(&UserEvent::PointerLeave("moscow".into()));
        assert_eq!(engine.feature_layer().render_items()[0].style, base);
    }

    #[test]
    fn reload_clears_selection() {
        let state = demo_state();
        let engine = InteractionEngine::new(state.clone());
        engine.handle(&UserEvent::FeatureClick("ekb".into()));
        engine.handle(&UserEvent::PointerEnter("ekb".into()));

        let same_revision = Arc::new(
            state
                .apply(Transition::LoadStarted {
                    endpoint: "http://localhost/wfs".into(),
                })
                .expect("started"),
        );
        engine.state_changed(&same_revision);
        assert!(engine.selection().feature().is_some());

        let reloaded = Arc::new(
            same_revision
                .apply(Transition::DemoRequested)
                .expect("demo"),
        );
        engine.state_changed(&reloaded);
        assert_eq!(engine.selection(), SelectionState::None);
        assert_eq!(engine.hovered(), None);
        assert_eq!(
            engine.feature_layer().active_layer(),
            ActiveLayerState::Demo
        );
    }

    #[test]
    fn older_state_is_ignored() {
        let first = demo_state();
        let second = Arc::new(first.apply(Transition::DemoRequested).expect("demo"));
        let engine = InteractionEngine::new(second.clone());
        engine.handle(&UserEvent::FeatureClick("kazan".into()));

        engine.state_changed(&first);
        assert_eq!(
            engine.selection().feature().map(|f| f.id.as_str()),
            Some("kazan")
        );
        assert_eq!(engine.state.read().map_state.sequence(), second.sequence());

        engine.state_changed(&second);
        assert!(engine.selection().feature().is_some());
    }
}
