//! Rendering collaborators. Both modes draw the same labels under the same
//! logical zoom/pan; which one is used is decided by capability detection.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::components::{flat_layer::FlatLayer, scene_layer::SceneLayer};
use crate::model::{LabelEntry, Size};
use crate::state::{LabelHitTest, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// DOM/CSS labels. Always available.
    Flat,
    /// WebGL boxes under an orbit camera.
    Scene,
}

impl RenderMode {
    pub fn detect() -> Self {
        if webgl_available() {
            RenderMode::Scene
        } else {
            RenderMode::Flat
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RenderMode::Flat => "Tech Portfolio Map",
            RenderMode::Scene => "3D Tech Map",
        }
    }

    pub fn summary(self) -> &'static [&'static str] {
        match self {
            RenderMode::Flat => &["Mode: 2D Fallback"],
            RenderMode::Scene => &["Camera: Perspective", "Renderer: WebGL"],
        }
    }
}

fn webgl_available() -> bool {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    document
        .create_element("canvas")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .and_then(|canvas| canvas.get_context("webgl").ok().flatten())
        .is_some()
}

/// Everything a renderer needs for one frame.
#[derive(Clone, PartialEq)]
pub struct Frame {
    pub view: ViewState,
    pub labels: Rc<Vec<LabelEntry>>,
    pub size: Size,
    pub label_hit: LabelHitTest,
    /// Raised when the renderer cannot run and the flat mode should take over.
    pub on_unavailable: Callback<()>,
}

pub trait LabelRenderer {
    fn render(&self, frame: &Frame) -> Html;
}

pub struct DomRenderer;

impl LabelRenderer for DomRenderer {
    fn render(&self, frame: &Frame) -> Html {
        html! {
            <FlatLayer
                view={frame.view.clone()}
                labels={frame.labels.clone()}
                size={frame.size}
            />
        }
    }
}

pub struct WebGlRenderer;

impl LabelRenderer for WebGlRenderer {
    fn render(&self, frame: &Frame) -> Html {
        html! {
            <SceneLayer
                view={frame.view.clone()}
                labels={frame.labels.clone()}
                size={frame.size}
                label_hit={frame.label_hit.clone()}
                on_unavailable={frame.on_unavailable.clone()}
            />
        }
    }
}

pub fn renderer_for(mode: RenderMode) -> Box<dyn LabelRenderer> {
    match mode {
        RenderMode::Flat => Box::new(DomRenderer),
        RenderMode::Scene => Box::new(WebGlRenderer),
    }
}
