use crate::utils::Time;

/// Progress curve of a [`Transform`](crate::animation::Transform) window.
///
/// Every curve maps `(t0, t1, t)` to a value in `[0, 1]`: 0 at or before
/// `t0`, 1 at or after `t1`. A zero-length window therefore jumps straight
/// to 1 once it starts.
#[derive(Debug, Clone, Copy, Default)]
pub enum Tween {
    #[default]
    Linear,
    /// CSS `ease-in`
    EaseIn,
    /// CSS `ease-out`
    EaseOut,
    /// CSS `ease-in-out`
    EaseInOut,
    /// A cubic Bézier from (0,0) to (1,1) with control points (x0,y0), (x1,y1).
    CubicBezier { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Caller-provided curve. Must clamp to `[0, 1]` itself.
    Custom(fn(Time, Time, Time) -> f32),
}

impl Tween {
    /// Samples the curve at `t` for the window `[t0, t1]`.
    #[must_use]
    pub fn sample(&self, t0: Time, t1: Time, t: Time) -> f32 {
        match *self {
            Tween::Linear => linear(t0, t1, t),
            Tween::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, linear(t0, t1, t)),
            Tween::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, linear(t0, t1, t)),
            Tween::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, linear(t0, t1, t)),
            Tween::CubicBezier { x0, y0, x1, y1 } => cubic_bezier(x0, y0, x1, y1, linear(t0, t1, t)),
            Tween::Custom(f) => f(t0, t1, t),
        }
    }
}

/// Linear progress of `t` through `[t0, t1]`, clamped to `[0, 1]`.
#[must_use]
pub fn linear(t0: Time, t1: Time, t: Time) -> f32 {
    if t >= t1 {
        return 1.0;
    }
    if t <= t0 {
        return 0.0;
    }
    (t - t0) as f32 / (t1 - t0) as f32
}

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 32;
const SOLVE_EPSILON: f32 = 1e-6;

/// Evaluates the Bézier curve's y for a given x progress.
///
/// x(s) is monotonic for control x values in `[0, 1]`, so s is found with
/// Newton's method, falling back to bisection when the slope vanishes.
fn cubic_bezier(x0: f32, y0: f32, x1: f32, y1: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut s = x;
    let mut solved = false;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier(x0, x1, s) - x;
        if err.abs() < SOLVE_EPSILON {
            solved = true;
            break;
        }
        let slope = bezier_slope(x0, x1, s);
        if slope.abs() < SOLVE_EPSILON {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let err = bezier(x0, x1, s) - x;
            if err.abs() < SOLVE_EPSILON {
                break;
            }
            if err > 0.0 {
                hi = s;
            } else {
                lo = s;
            }
            s = (lo + hi) * 0.5;
        }
    }

    bezier(y0, y1, s).clamp(0.0, 1.0)
}

/// One coordinate of a cubic Bézier with endpoints 0 and 1.
#[inline]
fn bezier(c0: f32, c1: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * c0 + 3.0 * inv * s * s * c1 + s * s * s
}

#[inline]
fn bezier_slope(c0: f32, c1: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * c0 + 6.0 * inv * s * (c1 - c0) + 3.0 * s * s * (1.0 - c1)
}
