// Fade/slide-in of the main roast line, sampled once per animation frame.

/// Pixels the line starts above its resting position.
pub const SLIDE_PX: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeFrame {
    pub opacity: f64,
    pub offset_y: f64,
    pub done: bool,
}

impl FadeFrame {
    pub const RESTING: FadeFrame = FadeFrame {
        opacity: 1.0,
        offset_y: 0.0,
        done: true,
    };

    /// Inline style for the roast line at this frame.
    pub fn style(&self, base: &str) -> String {
        format!(
            "{base} opacity:{:.3}; transform:translateY({:.1}px);",
            self.opacity, self.offset_y
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeIn {
    start_ms: f64,
    duration_ms: f64,
}

impl FadeIn {
    pub fn start(now: f64, duration_ms: f64) -> Self {
        Self {
            start_ms: now,
            duration_ms,
        }
    }

    pub fn sample(&self, now: f64) -> FadeFrame {
        if self.duration_ms <= 0.0 {
            return FadeFrame::RESTING;
        }
        let t = ((now - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return FadeFrame::RESTING;
        }
        // ease-out cubic
        let eased = 1.0 - (1.0 - t).powi(3);
        FadeFrame {
            opacity: eased,
            offset_y: -SLIDE_PX * (1.0 - eased),
            done: false,
        }
    }
}
