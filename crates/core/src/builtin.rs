//! The personas shipped with the base configuration.
//!
//! `GenericAssistant` greets the driver and routes car requests to
//! `CarAssistant` through a handoff pseudo-tool. `CarAssistant` drives the
//! vehicle features.

use crate::persona::Persona;
use crate::prompt::PromptTemplate;
use crate::tool::ToolDescriptor;
use schemars::JsonSchema;
use serde::Deserialize;

pub const GENERIC_ASSISTANT: &str = "GenericAssistant";
pub const CAR_ASSISTANT: &str = "CarAssistant";

const GENERIC_PROMPT: &str = include_str!("../prompts/GenericAssistant.md");
const CAR_PROMPT: &str = include_str!("../prompts/CarAssistant.md");

// --- Argument types ---
// Each tool reads only the fields it needs; anything else in the object is ignored.

#[derive(Deserialize, JsonSchema, Debug)]
struct WeatherArgs {
    #[schemars(description = "location for the weather")]
    location: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
struct AcArgs {
    #[schemars(description = "desired temperature in Celsius")]
    temperature: f64,
    #[schemars(description = "AC mode like cool, heat, auto")]
    mode: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
struct MediaArgs {
    #[schemars(description = "media action like play, pause, next, volume up")]
    action: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
struct NavigationArgs {
    #[schemars(description = "destination address or location")]
    destination: String,
}

#[derive(Deserialize, JsonSchema, Debug)]
struct WindowArgs {
    #[schemars(description = "window name e.g. front-left, rear-right")]
    window: String,
    #[schemars(description = "action like up or down")]
    action: String,
}

// --- Personas ---

pub fn generic_assistant() -> Persona {
    Persona::new(GENERIC_ASSISTANT, PromptTemplate::new(GENERIC_PROMPT))
        .with_tool(ToolDescriptor::text(
            "get_weather",
            "get the weather of the locaion",
            |args: WeatherArgs| format!("the weather of {} is 40F and rainy", args.location),
        ))
        .with_tool(ToolDescriptor::handoff(
            CAR_ASSISTANT,
            "Help controling car features such as temperature, music, etc.",
        ))
}

pub fn car_assistant() -> Persona {
    Persona::new(CAR_ASSISTANT, PromptTemplate::new(CAR_PROMPT))
        .with_tool(ToolDescriptor::text(
            "control_ac",
            "Control the air conditioning system",
            |args: AcArgs| format!("AC set to {}C in {} mode.", args.temperature, args.mode),
        ))
        .with_tool(ToolDescriptor::text(
            "control_media",
            "Control media functions like play, pause, next, previous, volume",
            |args: MediaArgs| format!("Media action '{}' performed.", args.action),
        ))
        .with_tool(ToolDescriptor::text(
            "navigate_to",
            "Provide navigation to a destination",
            |args: NavigationArgs| format!("Starting navigation to {}.", args.destination),
        ))
        .with_tool(ToolDescriptor::text(
            "control_window",
            "Control window functions like up or down",
            |args: WindowArgs| format!("Window {} {}", args.window, args.action),
        ))
}
