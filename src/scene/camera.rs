use glam::{Mat4, Vec3, Vec4};

use crate::model::{LabelEntry, Point2, Size};
use crate::state::{ViewState, ViewportConfig};

/// Camera distance at zoom 1.0.
pub const BASE_DISTANCE: f32 = 15.0;
pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 30.0;
pub const FOV_Y_DEG: f32 = 60.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Point2,
    pub max: Point2,
    /// NDC depth of the nearest corner.
    pub depth: f32,
}

impl ScreenRect {
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Eye distance for `zoom`. Zoom 1.0 sits at `BASE_DISTANCE`; the config's
/// zoom limits land on the distance limits, interpolated in log space.
pub fn distance_for(zoom: f64, config: &ViewportConfig) -> f32 {
    let zoom = config.clamp_zoom(zoom);
    let (limit, end) = if zoom >= 1.0 {
        (MIN_DISTANCE, config.zoom_max)
    } else {
        (MAX_DISTANCE, config.zoom_min)
    };
    let span = end.ln();
    if span.abs() < f64::EPSILON {
        return BASE_DISTANCE;
    }
    let t = (zoom.ln() / span).clamp(0.0, 1.0) as f32;
    BASE_DISTANCE * (limit / BASE_DISTANCE).powf(t)
}

/// Orbit-style camera looking down -Z with rotation disabled. Zoom moves the
/// eye along Z; pan slides eye and target together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn from_view(view: &ViewState, size: Size) -> Self {
        let distance = distance_for(view.zoom, &view.config);
        let height = size.height.max(1.0) as f32;
        let visible_h = 2.0 * distance * (FOV_Y_DEG.to_radians() / 2.0).tan();
        let per_px = visible_h / height;
        // screen y grows downwards, world y upwards
        let target = Vec3::new(-view.pan.x as f32 * per_px, view.pan.y as f32 * per_px, 0.0);
        Self {
            eye: target + Vec3::new(0.0, 0.0, distance),
            target,
            aspect: size.width.max(1.0) as f32 / height,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(FOV_Y_DEG.to_radians(), self.aspect, Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        proj * view
    }

    /// World point to CSS pixels plus NDC depth; `None` behind the camera.
    pub fn project(&self, world: Vec3, size: Size) -> Option<(Point2, f32)> {
        let clip = self.view_proj() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x as f64 + 1.0) / 2.0 * size.width;
        let y = (1.0 - ndc.y as f64) / 2.0 * size.height;
        Some((Point2::new(x, y), ndc.z))
    }

    pub fn screen_rect(&self, center: Vec3, extent: Vec3, size: Size) -> Option<ScreenRect> {
        let half = extent / 2.0;
        let mut rect = ScreenRect {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            depth: f32::INFINITY,
        };
        for i in 0..8 {
            let sign = |bit: usize| if i & bit == 0 { -1.0 } else { 1.0 };
            let corner = center + Vec3::new(half.x * sign(1), half.y * sign(2), half.z * sign(4));
            let (p, depth) = self.project(corner, size)?;
            rect.min = Point2::new(rect.min.x.min(p.x), rect.min.y.min(p.y));
            rect.max = Point2::new(rect.max.x.max(p.x), rect.max.y.max(p.y));
            rect.depth = rect.depth.min(depth);
        }
        Some(rect)
    }
}

/// Index of the nearest label whose projected box covers `point`.
pub fn pick(
    camera: &OrbitCamera,
    labels: &[LabelEntry],
    hovered: Option<usize>,
    point: Point2,
    size: Size,
) -> Option<usize> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            let scale = if hovered == Some(i) { 1.1 } else { 1.0 };
            let rect =
                camera.screen_rect(label.spatial.to_vec3(), label.box_extent() * scale, size)?;
            rect.contains(point).then_some((i, rect.depth))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HexColor, Point3};
    use crate::state::ZoomDirection;

    const SIZE: Size = Size {
        width: 800.0,
        height: 600.0,
    };

    fn label(name: &str, x: f64, y: f64, z: f64) -> LabelEntry {
        LabelEntry {
            name: name.into(),
            color: HexColor { r: 1, g: 2, b: 3 },
            flat: Point2::ZERO,
            spatial: Point3 { x, y, z },
        }
    }

    fn distance(view: &ViewState) -> f32 {
        let cam = OrbitCamera::from_view(view, SIZE);
        (cam.eye - cam.target).length()
    }

    #[test]
    fn zoom_limits_map_to_distance_limits() {
        let mut view = ViewState::default();
        assert!((distance(&view) - BASE_DISTANCE).abs() < 1e-4);
        view.zoom = 4.0;
        assert!((distance(&view) - MIN_DISTANCE).abs() < 1e-4);
        view.zoom = 0.2;
        assert!((distance(&view) - MAX_DISTANCE).abs() < 1e-4);
    }

    #[test]
    fn every_zoom_step_moves_the_camera() {
        let mut view = ViewState::default();
        for _ in 0..40 {
            view.zoom_step(ZoomDirection::Out);
        }
        assert_eq!(view.zoom, 0.2);
        let mut last = distance(&view);
        while view.zoom < view.config.zoom_max {
            view.zoom_step(ZoomDirection::In);
            let d = distance(&view);
            assert!(d < last, "zoom {} left distance at {d}", view.zoom);
            assert!((MIN_DISTANCE..=MAX_DISTANCE).contains(&d));
            last = d;
        }
    }

    #[test]
    fn degenerate_zoom_range_keeps_base_distance() {
        let config = ViewportConfig {
            zoom_min: 1.0,
            zoom_max: 1.0,
            ..ViewportConfig::default()
        };
        assert_eq!(distance_for(1.0, &config), BASE_DISTANCE);
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let cam = OrbitCamera::from_view(&ViewState::default(), SIZE);
        let (p, _) = cam.project(Vec3::ZERO, SIZE).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3 && (p.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_content_with_the_pointer() {
        let mut view = ViewState::default();
        view.pan = Point2::new(100.0, -50.0);
        let cam = OrbitCamera::from_view(&view, SIZE);
        let (p, _) = cam.project(Vec3::ZERO, SIZE).unwrap();
        assert!((p.x - 500.0).abs() < 0.01, "x = {}", p.x);
        assert!((p.y - 250.0).abs() < 0.01, "y = {}", p.y);
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        let cam = OrbitCamera::from_view(&ViewState::default(), SIZE);
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0), SIZE).is_none());
    }

    #[test]
    fn pick_finds_label_under_pointer() {
        let cam = OrbitCamera::from_view(&ViewState::default(), SIZE);
        let labels = vec![label("AWS", 0.0, 0.0, 0.0), label("Zustand", 5.0, 5.0, 0.0)];
        assert_eq!(pick(&cam, &labels, None, SIZE.center(), SIZE), Some(0));
        assert_eq!(pick(&cam, &labels, None, Point2::new(5.0, 590.0), SIZE), None);
    }

    #[test]
    fn pick_prefers_nearest_overlapping_label() {
        let cam = OrbitCamera::from_view(&ViewState::default(), SIZE);
        let labels = vec![label("Far", 0.0, 0.0, -2.0), label("Near", 0.0, 0.0, 2.0)];
        assert_eq!(pick(&cam, &labels, None, SIZE.center(), SIZE), Some(1));
    }
}
