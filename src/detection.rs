use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// Contains (x1,y1) left-top and (x2,y2) right-bottom corners of bbox
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline]
    pub fn new([x1, y1, x2, y2]: [f32; 4], class: i32, confidence: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class,
        }
    }

    #[inline(always)]
    pub fn center(&self) -> na::Point2<f32> {
        na::Point2::new((self.x1 + self.x2) / 2., (self.y1 + self.y2) / 2.)
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_box_midpoint() {
        let det = Detection::new([10.0, 20.0, 30.0, 60.0], 2, 0.7);

        assert_eq!(det.center(), na::Point2::new(20.0, 40.0));
        assert_eq!(det.width(), 20.0);
        assert_eq!(det.height(), 40.0);
    }
}
