use std::rc::Rc;

use yew::prelude::*;

use super::tech_label::TechLabel;
use crate::model::{LabelEntry, Size};
use crate::state::ViewState;

#[derive(Properties, PartialEq, Clone)]
pub struct FlatLayerProps {
    pub view: ViewState,
    pub labels: Rc<Vec<LabelEntry>>,
    pub size: Size,
}

/// DOM labels placed at `pan + zoom * base`.
#[function_component(FlatLayer)]
pub fn flat_layer(props: &FlatLayerProps) -> Html {
    if props.size.is_empty() {
        return html! {};
    }
    let transform = props.view.transform();
    html! {
        <div style="position:absolute; inset:0;">
            { for props.labels.iter().map(|label| html! {
                <TechLabel
                    key={label.name.clone()}
                    name={label.name.clone()}
                    color={label.color}
                    position={transform.apply(label.flat_base(props.size))}
                    zoom={transform.zoom}
                />
            }) }
        </div>
    }
}
