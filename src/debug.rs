use crate::math::Point2d;
use serde_json::json;

thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

pub fn debug_line(name: &str, p1: Point2d, p2: Point2d) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "line",
            "name": name,
            "p1": [p1.x, p1.y],
            "p2": [p2.x, p2.y],
        }))
    })
}

pub fn debug_circle(name: &str, centre: Point2d, radius: f64) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "circle",
            "name": name,
            "centre": [centre.x, centre.y],
            "radius": radius
        }))
    })
}

pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_is_drained() {
        debug_circle("configuration", Point2d::new(1.0, 2.0), 10.0);
        debug_line("edge", Point2d::new(1.0, 2.0), Point2d::new(3.0, 4.0));
        let frame = take_debug_frame();
        assert_eq!(frame.as_array().map(|items| items.len()), Some(2));
        assert_eq!(frame[0]["type"], "circle");
        assert_eq!(frame[1]["p2"], json!([3.0, 4.0]));
        assert_eq!(take_debug_frame(), json!([]));
    }
}
