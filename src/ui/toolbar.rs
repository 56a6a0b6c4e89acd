use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, SetGraticuleRequest};
use crate::measure::{km_to_miles, MeasureStatus, MeasurementController, ToggleMeasurementRequest};
use crate::theme;

/// Main toolbar with the measure toggle and status
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    controller: Res<MeasurementController>,
    status: Res<MeasureStatus>,
    config: Res<AppConfig>,
    mut toggle_events: MessageWriter<ToggleMeasurementRequest>,
    mut graticule_events: MessageWriter<SetGraticuleRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let measuring = controller.is_measuring();
                let button = egui::Button::new(
                    egui::RichText::new("Measure (M)").size(14.0).strong(),
                )
                .min_size(egui::vec2(0.0, 28.0))
                .selected(measuring);

                if ui
                    .add(button)
                    .on_hover_text("Toggle distance measurement")
                    .clicked()
                {
                    toggle_events.write(ToggleMeasurementRequest);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let mut show_graticule = config.data.show_graticule;
                if ui.checkbox(&mut show_graticule, "Graticule").changed() {
                    graticule_events.write(SetGraticuleRequest {
                        visible: show_graticule,
                    });
                }

                ui.add_space(8.0);

                if measuring {
                    let hint = if controller.state().start_new_measurement {
                        "Click to start a measurement"
                    } else {
                        "Click to extend, Esc to finish"
                    };
                    ui.label(egui::RichText::new(hint).color(theme::ui::HINT_TEXT));
                }

                // Right-aligned status
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if measuring {
                        ui.colored_label(
                            theme::ui::MEASURING_ACTIVE,
                            egui::RichText::new("● MEASURING").strong(),
                        );
                    }
                    if let Some(ref error) = status.last_error {
                        ui.colored_label(theme::ui::ERROR_TEXT, error);
                    }
                });
            });
        });
    Ok(())
}

/// Floating list of completed measurements
pub fn measurements_panel_ui(
    mut contexts: EguiContexts,
    controller: Res<MeasurementController>,
) -> Result {
    let lengths = controller.group_lengths_km();
    if lengths.is_empty() {
        return Ok(());
    }

    egui::Window::new("Measurements")
        .collapsible(true)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::Grid::new("measurement_lengths")
                .striped(true)
                .show(ui, |ui| {
                    for (index, (_, km)) in lengths.iter().enumerate() {
                        ui.label(
                            egui::RichText::new(format!("#{}", index + 1))
                                .color(theme::ui::LABEL_TEXT),
                        );
                        ui.label(format!("{:.2} km", km));
                        ui.label(format!("{:.2} mi", km_to_miles(*km)));
                        ui.end_row();
                    }
                });
        });
    Ok(())
}
