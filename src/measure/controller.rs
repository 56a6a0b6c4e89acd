//! Measurement session controller.
//!
//! Owns the feature collection and the session flags, and is the only writer
//! of measurement data to the render surface.
//!
//! ```text
//! IDLE --toggle--> ARMED(start_new=true)
//! ARMED(start_new=true)  --click--> ARMED(start_new=false)   new group
//! ARMED(start_new=false) --click--> ARMED(start_new=false)   group extended
//! ARMED(*) --escape--> ARMED(start_new=true)                  partial group pruned
//! ARMED(*) --toggle--> IDLE                                   cleared, torn down
//! ```

use bevy::prelude::*;

use super::error::{MeasureError, MeasureResult};
use super::geodesy::path_length_km;
use super::geometry::{create_line, create_point, push_to_surface};
use super::ids::{IdSource, ProcessSequence};
use super::label::{refresh_label, remove_label};
use super::layers::{register_layers, unregister_layers};
use super::styles::{MEASUREMENT_SOURCE, POINTS_LAYER};
use super::surface::{CursorStyle, RenderSurface, SurfaceEvent};
use super::types::{Coordinate, GroupId, MeasurementCollection, SessionState};

type StateObserver = Box<dyn FnMut(SessionState) + Send + Sync>;

#[derive(Resource)]
pub struct MeasurementController {
    state: SessionState,
    collection: MeasurementCollection,
    ids: Box<dyn IdSource>,
    observers: Vec<StateObserver>,
}

impl Default for MeasurementController {
    fn default() -> Self {
        Self::with_id_source(Box::new(ProcessSequence))
    }
}

impl MeasurementController {
    pub fn with_id_source(ids: Box<dyn IdSource>) -> Self {
        Self {
            state: SessionState::default(),
            collection: MeasurementCollection::new(),
            ids,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_measuring(&self) -> bool {
        self.state.is_measuring
    }

    pub fn collection(&self) -> &MeasurementCollection {
        &self.collection
    }

    /// Register a callback that receives every state change.
    pub fn observe(&mut self, observer: impl FnMut(SessionState) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Length of every group that has a line, in collection order.
    pub fn group_lengths_km(&self) -> Vec<(GroupId, f64)> {
        self.collection
            .lines()
            .filter_map(|line| {
                line.line_coordinates()
                    .map(|coords| (line.group(), path_length_km(coords)))
            })
            .collect()
    }

    fn set_state(&mut self, state: SessionState) {
        if state == self.state {
            return;
        }
        self.state = state;
        for observer in &mut self.observers {
            observer(state);
        }
    }

    /// Register the measurement source and layers, and subscribe to input.
    pub fn initialize(&mut self, surface: &mut impl RenderSurface) -> MeasureResult<()> {
        register_layers(surface, &self.collection)?;
        surface.subscribe(SurfaceEvent::Click);
        surface.subscribe(SurfaceEvent::PointerMove);
        debug!("Measurement layers registered");
        Ok(())
    }

    /// Initialize only if the source is not registered (e.g. after a toggle-off).
    pub fn ensure_initialized(&mut self, surface: &mut impl RenderSurface) -> MeasureResult<()> {
        if surface.has_source(MEASUREMENT_SOURCE) {
            return Ok(());
        }
        self.initialize(surface)
    }

    pub fn toggle(&mut self, surface: &mut impl RenderSurface) -> MeasureResult<()> {
        if self.state.is_measuring {
            self.set_state(SessionState::default());
            self.teardown(surface)?;
            info!("Measuring disarmed");
        } else {
            surface.set_cursor_style(CursorStyle::Crosshair);
            self.set_state(SessionState {
                is_measuring: true,
                start_new_measurement: true,
            });
            info!("Measuring armed");
        }
        Ok(())
    }

    fn teardown(&mut self, surface: &mut impl RenderSurface) -> MeasureResult<()> {
        surface.set_cursor_style(CursorStyle::Default);
        for group in self.collection.groups() {
            remove_label(surface, group)?;
        }
        self.collection.clear();
        if surface.has_source(MEASUREMENT_SOURCE) {
            push_to_surface(surface, &self.collection)?;
        }
        unregister_layers(surface)
    }

    pub fn handle_click(
        &mut self,
        surface: &mut impl RenderSurface,
        coordinate: Coordinate,
    ) -> MeasureResult<()> {
        if !self.state.is_measuring {
            return Ok(());
        }
        // Fail before touching the model so it never runs ahead of the surface
        if !surface.has_source(MEASUREMENT_SOURCE) || !surface.is_style_loaded() {
            return Err(MeasureError::SurfaceNotReady(format!(
                "source '{}' is not registered or style not loaded",
                MEASUREMENT_SOURCE
            )));
        }

        let continuing = if self.state.start_new_measurement {
            None
        } else {
            self.collection.last_group()
        };

        match continuing {
            None => {
                let point = create_point(coordinate, None, self.ids.as_mut());
                debug!(
                    "Started measurement group {} at ({:.5}, {:.5})",
                    point.group(),
                    coordinate.lng,
                    coordinate.lat
                );
                self.collection.push(point);
                self.set_state(SessionState {
                    start_new_measurement: false,
                    ..self.state
                });
            }
            Some(group) => {
                let point = create_point(coordinate, Some(group), self.ids.as_mut());
                self.collection.push(point);
                self.regenerate_line(surface, group)?;
            }
        }

        push_to_surface(surface, &self.collection)
    }

    fn regenerate_line(
        &mut self,
        surface: &mut impl RenderSurface,
        group: GroupId,
    ) -> MeasureResult<()> {
        let points = self.collection.points_in_group(group);
        if points.len() < 2 {
            return Ok(());
        }
        let line = create_line(&points, group)?;
        let measurement = refresh_label(surface, &line, group)?;

        self.collection.remove_line_for_group(group);
        self.collection.push(line);

        debug!(
            "Group {} now {:.3} km ({:.3} mi), label at ({:.5}, {:.5})",
            group,
            measurement.kilometers,
            measurement.miles,
            measurement.anchor.lng,
            measurement.anchor.lat
        );
        Ok(())
    }

    /// End the current group, dropping points whose group never got a line.
    pub fn handle_escape(&mut self, surface: &mut impl RenderSurface) -> MeasureResult<()> {
        if !self.state.is_measuring {
            return Ok(());
        }
        self.set_state(SessionState {
            start_new_measurement: true,
            ..self.state
        });

        let completed: Vec<GroupId> = self.collection.lines().map(|l| l.group()).collect();
        let before = self.collection.len();
        self.collection
            .features
            .retain(|f| f.is_line() || completed.contains(&f.group()));

        let pruned = before - self.collection.len();
        if pruned > 0 {
            debug!("Escape pruned {} uncommitted point(s)", pruned);
            push_to_surface(surface, &self.collection)?;
        }
        Ok(())
    }

    /// Cursor feedback: pointer over a measurement point, crosshair elsewhere.
    pub fn handle_pointer_move(
        &mut self,
        surface: &mut impl RenderSurface,
        coordinate: Coordinate,
    ) {
        if !self.state.is_measuring {
            return;
        }
        let hovering = !surface
            .query_features_at_point(coordinate, &[POINTS_LAYER])
            .is_empty();
        surface.set_cursor_style(if hovering {
            CursorStyle::Pointer
        } else {
            CursorStyle::Crosshair
        });
    }
}
