use yew::prelude::*;

use crate::render::RenderMode;
use crate::state::ViewportConfig;
use crate::util::format_percent;

#[derive(Properties, PartialEq, Clone)]
pub struct InstructionsProps {
    pub mode: RenderMode,
    pub config: ViewportConfig,
}

#[function_component]
pub fn Instructions(props: &InstructionsProps) -> Html {
    let range = format!(
        "{}–{}",
        format_percent(props.config.zoom_min),
        format_percent(props.config.zoom_max)
    );
    let hover = match props.mode {
        RenderMode::Flat => "Enhanced glow + color",
        RenderMode::Scene => "Enhance glow",
    };
    html! {<div data-no-drag="true" data-testid="instructions" style="position:absolute; bottom:20px; left:20px; z-index:50; max-width:320px; background:rgba(255,255,255,0.1); backdrop-filter:blur(12px); border:1px solid rgba(255,255,255,0.2); border-radius:12px; padding:16px; color:#fff; font-size:12px; font-family:Orbitron, monospace;">
        <div style="font-weight:600; margin-bottom:8px;">{"Controls"}</div>
        <div>
            {"🖱️ "}<strong>{"Drag:"}</strong>{" Pan around"}<br />
            {"🔄 "}<strong>{"Scroll:"}</strong>{ format!(" Zoom in/out ({range})") }<br />
            {"🎯 "}<strong>{"Hover:"}</strong>{ format!(" {hover}") }<br />
            {"⌨️ "}<strong>{"Keys:"}</strong>{" + / − zoom, arrows pan, 0 resets"}<br />
            if props.mode == RenderMode::Scene {
                {"📐 Rotation: Disabled"}
            }
        </div>
    </div>}
}
