use yew::prelude::*;

use crate::model::{HexColor, Point2};
use crate::state::HoverState;
use crate::util::slug;

#[derive(Properties, PartialEq, Clone)]
pub struct TechLabelProps {
    pub name: String,
    pub color: HexColor,
    /// Screen position of the label centre, after pan and zoom.
    pub position: Point2,
    pub zoom: f64,
}

#[function_component(TechLabel)]
pub fn tech_label(props: &TechLabelProps) -> Html {
    let hover = use_state(HoverState::default);
    let on_enter = {
        let hover = hover.clone();
        Callback::from(move |_: MouseEvent| hover.set(hover.enter()))
    };
    let on_leave = {
        let hover = hover.clone();
        Callback::from(move |_: MouseEvent| hover.set(hover.leave()))
    };

    let color = props.color;
    let scale = props.zoom * hover.scale();
    let wrapper = format!(
        "position:absolute; left:{:.2}px; top:{:.2}px; transform:translate(-50%, -50%) scale({scale:.3}); transition:transform 0.3s; cursor:pointer;",
        props.position.x, props.position.y,
    );
    let badge = format!(
        "padding:8px 16px; border-radius:8px; font-weight:bold; color:#fff; white-space:nowrap; font-family:Orbitron, monospace; background:{color}; border:2px solid {color}; box-shadow:0 0 {}px {};",
        hover.glow_px(),
        color.with_alpha(0x40),
    );

    html! {
        <div
            style={wrapper}
            data-tech-label="true"
            data-testid={format!("tech-label-{}", slug(&props.name))}
            onmouseenter={on_enter}
            onmouseleave={on_leave}
        >
            <div style={badge}>{ props.name.clone() }</div>
            if hover.is_hovered() {
                <div style="position:absolute; top:100%; left:50%; transform:translateX(-50%); margin-top:6px; padding:2px 6px; border-radius:4px; background:rgba(22,27,34,0.9); border:1px solid #30363d; color:#e6edf3; font-size:10px; font-family:monospace;">
                    { color.to_string() }
                </div>
            }
        </div>
    }
}
