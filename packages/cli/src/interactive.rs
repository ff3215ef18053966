//! Interactive menu, mirroring the dashboard's page navigation.

use dialoguer::{Input, Select};
use ev_demand_server::ServerConfig;
use ev_demand_station_models::{
    EV_VEHICLE_DENSITY_SLIDER, POPULATION_DENSITY_SLIDER, PredictionInput, SliderSpec,
};

/// Dashboard pages reachable from the CLI.
enum Page {
    Dataset,
    Insights,
    Prediction,
    Server,
}

impl Page {
    const ALL: &[Self] = &[Self::Dataset, Self::Insights, Self::Prediction, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Dataset => "Explore the dataset",
            Self::Insights => "Visual insights",
            Self::Prediction => "Predict station demand",
            Self::Server => "Start dashboard server",
        }
    }
}

/// Prompts for a page and runs it.
///
/// # Errors
///
/// Returns an error if the prompt fails or the selected page does.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("EV Demand Predictor");
    println!();

    let labels: Vec<&str> = Page::ALL.iter().map(Page::label).collect();

    let idx = Select::new()
        .with_prompt("Select a page")
        .items(&labels)
        .default(0)
        .interact()?;

    match Page::ALL[idx] {
        Page::Dataset => super::cities(&config, false, None, None)?,
        Page::Insights => super::insights(&config)?,
        Page::Prediction => {
            let input = PredictionInput {
                population_density: prompt_slider(&POPULATION_DENSITY_SLIDER)?,
                ev_vehicle_density: prompt_slider(&EV_VEHICLE_DENSITY_SLIDER)?,
            };
            super::predict(&config, input)?;
        }
        Page::Server => super::serve(config).await?,
    }

    Ok(())
}

/// Asks for a value the slider could produce, re-prompting until one is
/// entered.
fn prompt_slider(slider: &SliderSpec) -> Result<f64, dialoguer::Error> {
    let value: u32 = Input::new()
        .with_prompt(format!(
            "{} [{}-{}, step {}]",
            slider.label, slider.min, slider.max, slider.step
        ))
        .default(slider.min)
        .validate_with(|v: &u32| -> Result<(), String> {
            if slider.accepts(f64::from(*v)) {
                Ok(())
            } else {
                Err(format!(
                    "must be {}-{} in steps of {}",
                    slider.min, slider.max, slider.step
                ))
            }
        })
        .interact_text()?;
    Ok(f64::from(value))
}
