use yew::prelude::*;

use crate::model::Point2;
use crate::state::{ViewAction, ZoomDirection};

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub on_action: Callback<ViewAction>,
    /// Pan distance of one arrow press, in pixels.
    pub nudge: f64,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let button = |label: &'static str, title: &'static str, action: ViewAction| {
        let cb = props.on_action.clone();
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(action.clone()));
        html! { <button {title} {onclick}>{ label }</button> }
    };
    let n = props.nudge;
    html! {<div data-no-drag="true" data-testid="camera-controls" style="position:absolute; right:20px; bottom:20px; z-index:50; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        { button("−", "Zoom out", ViewAction::Zoom(ZoomDirection::Out)) }
        { button("+", "Zoom in", ViewAction::Zoom(ZoomDirection::In)) }
        <span style="width:8px;"></span>
        { button("←", "Pan left", ViewAction::PanBy(Point2::new(n, 0.0))) }
        { button("↑", "Pan up", ViewAction::PanBy(Point2::new(0.0, n))) }
        { button("↓", "Pan down", ViewAction::PanBy(Point2::new(0.0, -n))) }
        { button("→", "Pan right", ViewAction::PanBy(Point2::new(-n, 0.0))) }
        <span style="width:8px;"></span>
        { button("Reset", "Reset view", ViewAction::Reset) }
    </div>}
}
