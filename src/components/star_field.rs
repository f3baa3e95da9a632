use yew::prelude::*;

const STAR_COUNT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Percent of the viewport.
    pub left: f64,
    pub top: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

/// Scatter `count` stars using `rand`, which must yield values in `[0, 1)`.
pub fn scatter(count: usize, mut rand: impl FnMut() -> f64) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            left: rand() * 100.0,
            top: rand() * 100.0,
            delay_secs: rand() * 3.0,
            duration_secs: 2.0 + rand() * 2.0,
        })
        .collect()
}

/// Decorative background, fixed for the lifetime of the component.
#[function_component(StarField)]
pub fn star_field() -> Html {
    let stars = use_memo((), |_| scatter(STAR_COUNT, js_sys::Math::random));
    html! {<div style="position:absolute; inset:0; overflow:hidden; pointer-events:none;">
        { for stars.iter().map(|s| html! {
            <div style={format!(
                "position:absolute; width:4px; height:4px; border-radius:50%; background:#fff; opacity:0.3; left:{:.2}%; top:{:.2}%; animation:star-pulse {:.2}s ease-in-out {:.2}s infinite;",
                s.left, s.top, s.duration_secs, s.delay_secs,
            )} />
        }) }
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_stay_inside_the_viewport() {
        let mut seq = [0.0, 0.5, 0.999, 0.25].into_iter().cycle();
        let stars = scatter(STAR_COUNT, || seq.next().unwrap_or(0.0));
        assert_eq!(stars.len(), STAR_COUNT);
        for s in &stars {
            assert!((0.0..100.0).contains(&s.left) && (0.0..100.0).contains(&s.top));
            assert!((0.0..3.0).contains(&s.delay_secs));
            assert!((2.0..4.0).contains(&s.duration_secs));
        }
    }
}
