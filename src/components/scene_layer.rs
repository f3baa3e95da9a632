use std::rc::Rc;

use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::model::{LabelEntry, Point2, Size};
use crate::scene::{OrbitCamera, SceneRenderer, pick};
use crate::state::{LabelHitTest, ViewState};

#[derive(Properties, PartialEq, Clone)]
pub struct SceneLayerProps {
    pub view: ViewState,
    pub labels: Rc<Vec<LabelEntry>>,
    pub size: Size,
    pub label_hit: LabelHitTest,
    pub on_unavailable: Callback<()>,
}

/// Client coordinates relative to the canvas' top-left corner.
fn canvas_point(canvas: &HtmlCanvasElement, client: Point2) -> Point2 {
    let rect = canvas.get_bounding_client_rect();
    Point2::new(client.x - rect.left(), client.y - rect.top())
}

#[function_component(SceneLayer)]
pub fn scene_layer(props: &SceneLayerProps) -> Html {
    let canvas_ref = use_node_ref();
    let renderer = use_mut_ref(|| None::<SceneRenderer>);
    let hovered = use_state(|| None::<usize>);

    // GL setup; failure hands over to the flat renderer.
    {
        let canvas_ref = canvas_ref.clone();
        let renderer = renderer.clone();
        let on_unavailable = props.on_unavailable.clone();
        use_effect_with((), move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                match SceneRenderer::new(&canvas) {
                    Ok(r) => {
                        log::info!("webgl scene ready");
                        *renderer.borrow_mut() = Some(r);
                    }
                    Err(e) => {
                        log::warn!("webgl scene failed: {e}");
                        on_unavailable.emit(());
                    }
                }
            }
            move || {
                renderer.borrow_mut().take();
            }
        });
    }

    // One draw per state change, and a fresh label probe for drag exclusion.
    {
        let canvas_ref = canvas_ref.clone();
        let renderer = renderer.clone();
        let label_hit = props.label_hit.clone();
        let deps = (
            props.view.clone(),
            props.labels.clone(),
            props.size,
            *hovered,
        );
        use_effect_with(deps, move |(view, labels, size, hovered)| {
            let camera = OrbitCamera::from_view(view, *size);
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Some(r) = renderer.borrow().as_ref() {
                    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
                    let width = ((size.width * dpr) as u32).max(1);
                    let height = ((size.height * dpr) as u32).max(1);
                    if canvas.width() != width || canvas.height() != height {
                        canvas.set_width(width);
                        canvas.set_height(height);
                    }
                    r.draw(&camera, labels, *hovered, width, height);
                }
                let labels = labels.clone();
                let (size, hovered) = (*size, *hovered);
                label_hit.install(move |client| {
                    let p = canvas_point(&canvas, client);
                    pick(&camera, &labels, hovered, p, size).is_some()
                });
            }
            move || label_hit.clear()
        });
    }

    let onmousemove = {
        let canvas_ref = canvas_ref.clone();
        let hovered = hovered.clone();
        let labels = props.labels.clone();
        let camera = OrbitCamera::from_view(&props.view, props.size);
        let size = props.size;
        Callback::from(move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let p = canvas_point(&canvas, Point2::new(e.client_x() as f64, e.client_y() as f64));
            let hit = pick(&camera, &labels, *hovered, p, size);
            if hit != *hovered {
                hovered.set(hit);
            }
        })
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(None))
    };
    let cursor = if hovered.is_some() { "cursor:pointer;" } else { "" };

    html! {
        <canvas
            ref={canvas_ref}
            data-testid="three-canvas"
            style={format!("position:absolute; inset:0; width:100%; height:100%; display:block; {cursor}")}
            {onmousemove}
            {onmouseleave}
        />
    }
}
