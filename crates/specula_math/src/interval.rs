/// A range of real values, used for ray distances and color channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// The normalized color range [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Every distance strictly ahead of a ray origin.
    pub const AHEAD: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };
}
