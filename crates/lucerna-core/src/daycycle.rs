use glam::{Vec2, Vec3};

/// Wall-clock driven day/night cycle. The sun sweeps a full circle every
/// `day_length` seconds; `sun_direction` feeds the ray-trace shader's
/// sun uniform.
#[derive(Debug, Clone)]
pub struct DayCycle {
    /// Seconds into the current day, in `[0, day_length)`.
    pub time_of_day: f32,
    /// Length of a full day in seconds.
    pub day_length: f32,
    /// When false, `update` leaves `time_of_day` frozen.
    pub enabled: bool,
}

impl DayCycle {
    pub fn new(day_length: f32) -> Self {
        Self {
            time_of_day: 0.0,
            day_length,
            enabled: true,
        }
    }

    /// Advance by `dt` seconds, wrapping at day end.
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        self.time_of_day += dt;
        while self.time_of_day > self.day_length {
            self.time_of_day -= self.day_length;
        }
    }

    /// Jump to just before dawn.
    pub fn make_day(&mut self) {
        self.time_of_day = 0.9 * self.day_length;
    }

    /// Normalized day progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.time_of_day / self.day_length
    }

    /// Sun direction for the current time of day, normalized. The sun
    /// orbit is tilted slightly off the horizon plane so shadows never
    /// degenerate to exactly horizontal.
    pub fn sun_direction(&self) -> Vec3 {
        let angle = self.progress() * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let orbit = Vec2::new(cos, sin);
        Vec3::new(orbit.y, orbit.x, 0.2).normalize()
    }
}
