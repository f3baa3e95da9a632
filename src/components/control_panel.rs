use yew::prelude::*;

use crate::render::RenderMode;
use crate::util::format_percent;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlPanelProps {
    pub mode: RenderMode,
    /// Number of technologies passed in, including ones without a label.
    pub tech_count: usize,
    pub zoom: f64,
}

#[function_component]
pub fn ControlPanel(props: &ControlPanelProps) -> Html {
    html! {<div data-no-drag="true" data-testid="control-panel" style="position:absolute; top:20px; left:20px; z-index:50; background:rgba(255,255,255,0.1); backdrop-filter:blur(12px); border:1px solid rgba(255,255,255,0.2); border-radius:12px; padding:16px; color:#fff; font-size:14px; font-family:Orbitron, monospace;">
        <div style="font-weight:600; margin-bottom:8px;">{ props.mode.title() }</div>
        <div style="font-size:12px; opacity:0.8;">
            { for props.mode.summary().iter().map(|line| html!{ <>{ *line }<br /></> }) }
            <span data-testid="tech-count">{ props.tech_count.to_string() }</span>{" Technologies Loaded"}<br />
            {"Zoom: "}<span data-testid="zoom-level">{ format_percent(props.zoom) }</span>
        </div>
    </div>}
}
