//! The default command: look up and show the current temperature.

use crate::config::Settings;
use crate::error::Result;
use crate::model::Forecast;
use crate::pipeline::Pipeline;
use crate::ui::{OutputMode, ProgressReporter, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Runs the forecast pipeline and prints the result.
pub struct RunCommand {
    settings: Settings,
    refresh: bool,
}

impl RunCommand {
    pub fn new(settings: Settings, refresh: bool) -> Self {
        Self { settings, refresh }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pipeline = Pipeline::from_settings(&self.settings)?;

        let forecast = {
            let mut reporter = ProgressReporter::new(&mut *ui);
            pipeline.run(self.refresh, &mut reporter)?
        };

        render_forecast(&forecast, ui);
        Ok(CommandResult::success())
    }
}

/// Print a forecast according to the UI's output mode.
pub fn render_forecast(forecast: &Forecast, ui: &mut dyn UserInterface) {
    let mode = ui.output_mode();

    if mode == OutputMode::Quiet {
        ui.message(&format!("{}: {}", forecast.place(), forecast.temperature_label()));
        return;
    }

    ui.show_header(&forecast.place());
    ui.show_detail(
        "Temperature",
        &format!(
            "{} ({})",
            forecast.temperature_label(),
            forecast.condition.description()
        ),
    );

    if mode.shows_details() {
        ui.show_detail("IP", &forecast.ip);
        ui.show_detail("ISP", &forecast.isp);
        ui.show_detail(
            "Coordinates",
            &format!("{:.4}, {:.4}", forecast.latitude, forecast.longitude),
        );
        if !forecast.observed_at.is_empty() {
            ui.show_detail("Observed", &forecast.observed_at);
        }
        let source = if forecast.from_cache { "cache" } else { "network" };
        ui.show_detail("Source", source);
    }
}
