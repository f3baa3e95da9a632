use super::tech_map::TechMap;
use yew::prelude::*;

/// Technologies shown by the demo page. Names without a configured label are
/// skipped by the map.
const PROJECT_TECH_STACK: [&str; 5] = ["TypeScript", "AWS", "Firebase", "React Router", "Zustand"];

#[function_component(App)]
pub fn app() -> Html {
    let technologies: Vec<String> = PROJECT_TECH_STACK.iter().map(|s| s.to_string()).collect();
    html! {
        <div style="width:100vw; height:100vh; margin:0; padding:0;">
            <TechMap {technologies} />
        </div>
    }
}
