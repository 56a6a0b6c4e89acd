mod toolbar;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::config::ConfigResetNotification;

/// Tell the user their config file was replaced with defaults
fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;
    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Settings were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.label(egui::RichText::new(reason).color(crate::theme::ui::HINT_TEXT));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }
    Ok(())
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiPrimaryContextPass,
            (
                toolbar::toolbar_ui,
                toolbar::measurements_panel_ui,
                config_reset_notification_ui,
            )
                .chain(),
        );
    }
}
