// Touch gesture classification. Only single-finger drags are handled.
use web_sys::TouchList;

use crate::model::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchGesture {
    None,
    Single(Point2),
    /// Two or more fingers; pinch zoom is not supported.
    Multi,
}

pub fn classify(touches: &[Point2]) -> TouchGesture {
    match touches {
        [] => TouchGesture::None,
        [p] => TouchGesture::Single(*p),
        _ => TouchGesture::Multi,
    }
}

/// Client-space points of every active touch.
pub fn touch_points(list: &TouchList) -> Vec<Point2> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point2::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}
