use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::events::Listener;
use crate::model::{Point2, Size};
use crate::registry::LabelRegistry;
use crate::render::{Frame, RenderMode, renderer_for};
use crate::state::{LabelHitTest, ViewAction, ViewState, ZoomDirection, touch_points};

use super::{
    camera_controls::CameraControls, control_panel::ControlPanel, instructions::Instructions,
    star_field::StarField,
};

#[derive(Properties, PartialEq, Clone)]
pub struct TechMapProps {
    pub technologies: Vec<String>,
}

fn client_point(e: &MouseEvent) -> Point2 {
    Point2::new(e.client_x() as f64, e.client_y() as f64)
}

/// True when the pointer went down on a label or an overlay panel: a DOM
/// element marked as such, or a label the active renderer draws at `client`.
fn over_label(target: Option<EventTarget>, client: Point2, label_hit: &LabelHitTest) -> bool {
    let on_dom_label = target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("[data-tech-label], [data-no-drag]").ok().flatten())
        .is_some();
    on_dom_label || label_hit.hits(client)
}

fn key_action(key: &str, nudge: f64) -> Option<ViewAction> {
    Some(match key {
        "+" | "=" => ViewAction::Zoom(ZoomDirection::In),
        "-" | "_" => ViewAction::Zoom(ZoomDirection::Out),
        "0" => ViewAction::Reset,
        "ArrowLeft" => ViewAction::PanBy(Point2::new(nudge, 0.0)),
        "ArrowRight" => ViewAction::PanBy(Point2::new(-nudge, 0.0)),
        "ArrowUp" => ViewAction::PanBy(Point2::new(0.0, nudge)),
        "ArrowDown" => ViewAction::PanBy(Point2::new(0.0, -nudge)),
        _ => return None,
    })
}

#[function_component(TechMap)]
pub fn tech_map(props: &TechMapProps) -> Html {
    let viewport_ref = use_node_ref();
    let view = use_reducer(ViewState::default);
    let mode = use_state(|| {
        let mode = RenderMode::detect();
        log::info!("render mode: {mode:?}");
        mode
    });
    let size = use_state(Size::default);
    let label_hit = use_state(LabelHitTest::default);
    let labels = use_memo(props.technologies.clone(), |names| {
        LabelRegistry::builtin().resolve_all(names)
    });

    // Viewport-scoped input, resize and keyboard listeners for the lifetime of
    // the component.
    {
        let viewport_ref = viewport_ref.clone();
        let dispatch = view.dispatcher();
        let set_size = size.setter();
        let label_hit = (*label_hit).clone();
        let nudge = view.config.nudge_px;
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();
            if let (Some(window), Some(el)) = (web_sys::window(), viewport_ref.cast::<HtmlElement>()) {
                let measure = {
                    let el = el.clone();
                    move || {
                        let rect = el.get_bounding_client_rect();
                        set_size.set(Size {
                            width: rect.width(),
                            height: rect.height(),
                        });
                    }
                };
                measure();
                let target: &EventTarget = el.as_ref();

                listeners.push(Listener::new(target, "wheel", {
                    let dispatch = dispatch.clone();
                    move |e: WheelEvent| {
                        e.prevent_default();
                        dispatch.dispatch(ViewAction::Wheel { delta_y: e.delta_y() });
                    }
                }));
                listeners.push(Listener::new(target, "mousedown", {
                    let dispatch = dispatch.clone();
                    let label_hit = label_hit.clone();
                    move |e: MouseEvent| {
                        if e.button() != 0 {
                            return;
                        }
                        let pointer = client_point(&e);
                        let on_label = over_label(e.target(), pointer, &label_hit);
                        if !on_label {
                            e.prevent_default();
                        }
                        dispatch.dispatch(ViewAction::DragStart { pointer, on_label });
                    }
                }));
                listeners.push(Listener::new(target, "mousemove", {
                    let dispatch = dispatch.clone();
                    move |e: MouseEvent| {
                        dispatch.dispatch(ViewAction::DragMove {
                            pointer: client_point(&e),
                        });
                    }
                }));
                listeners.push(Listener::new(target, "touchstart", {
                    let dispatch = dispatch.clone();
                    let label_hit = label_hit.clone();
                    move |e: TouchEvent| {
                        let touches = touch_points(&e.touches());
                        let on_label = match touches.as_slice() {
                            [p] => over_label(e.target(), *p, &label_hit),
                            _ => false,
                        };
                        if touches.len() == 1 && !on_label {
                            e.prevent_default();
                        }
                        dispatch.dispatch(ViewAction::TouchStart { touches, on_label });
                    }
                }));
                listeners.push(Listener::new(target, "touchmove", {
                    let dispatch = dispatch.clone();
                    move |e: TouchEvent| {
                        e.prevent_default();
                        dispatch.dispatch(ViewAction::TouchMove {
                            touches: touch_points(&e.touches()),
                        });
                    }
                }));
                for event in ["touchend", "touchcancel"] {
                    let dispatch = dispatch.clone();
                    listeners.push(Listener::new(target, event, move |e: TouchEvent| {
                        dispatch.dispatch(ViewAction::TouchEnd {
                            remaining: touch_points(&e.touches()),
                        });
                    }));
                }
                listeners.push(Listener::new(&window, "resize", move |_: web_sys::Event| {
                    measure()
                }));
                listeners.push(Listener::new(&window, "keydown", {
                    let dispatch = dispatch.clone();
                    move |e: KeyboardEvent| {
                        if e.ctrl_key() || e.meta_key() || e.alt_key() {
                            return;
                        }
                        if let Some(action) = key_action(&e.key(), nudge) {
                            e.prevent_default();
                            dispatch.dispatch(action);
                        }
                    }
                }));
            }
            move || drop(listeners)
        });
    }

    // Document-level move/up while a drag is active, so a drag keeps tracking
    // after the pointer leaves the viewport.
    {
        let dispatch = view.dispatcher();
        use_effect_with(view.dragging, move |dragging| {
            let mut listeners = Vec::new();
            if let (true, Some(window)) = (*dragging, web_sys::window()) {
                listeners.push(Listener::new(&window, "mousemove", {
                    let dispatch = dispatch.clone();
                    move |e: MouseEvent| {
                        dispatch.dispatch(ViewAction::DragMove {
                            pointer: client_point(&e),
                        });
                    }
                }));
                listeners.push(Listener::new(&window, "mouseup", move |_: MouseEvent| {
                    dispatch.dispatch(ViewAction::DragEnd);
                }));
            }
            move || drop(listeners)
        });
    }

    let on_unavailable = {
        let mode = mode.clone();
        let label_hit = (*label_hit).clone();
        Callback::from(move |_| {
            log::warn!("3D renderer unavailable, switching to flat labels");
            label_hit.clear();
            mode.set(RenderMode::Flat);
        })
    };
    let on_action = {
        let dispatch = view.dispatcher();
        Callback::from(move |action: ViewAction| dispatch.dispatch(action))
    };

    let frame = Frame {
        view: (*view).clone(),
        labels: Rc::clone(&labels),
        size: *size,
        label_hit: (*label_hit).clone(),
        on_unavailable,
    };
    let cursor = if view.dragging { "grabbing" } else { "grab" };

    html! {
        <div
            ref={viewport_ref}
            data-testid="tech-map-container"
            style={format!("position:relative; width:100%; height:100%; overflow:hidden; background:#050217; user-select:none; touch-action:none; cursor:{cursor};")}
        >
            <StarField />
            { renderer_for(*mode).render(&frame) }
            <ControlPanel
                mode={*mode}
                tech_count={props.technologies.len()}
                zoom={view.zoom}
            />
            <Instructions mode={*mode} config={view.config} />
            <CameraControls on_action={on_action} nudge={view.config.nudge_px} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_view_actions() {
        assert_eq!(key_action("+", 40.0), Some(ViewAction::Zoom(ZoomDirection::In)));
        assert_eq!(key_action("-", 40.0), Some(ViewAction::Zoom(ZoomDirection::Out)));
        assert_eq!(key_action("0", 40.0), Some(ViewAction::Reset));
        assert_eq!(
            key_action("ArrowLeft", 40.0),
            Some(ViewAction::PanBy(Point2::new(40.0, 0.0)))
        );
        assert_eq!(key_action("a", 40.0), None);
    }
}
