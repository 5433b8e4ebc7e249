//! Easing functions for cursor tweens.
//!
//! Cubic-bezier based, solved with Newton-Raphson and a bisection fallback.

/// Easing functions applied to a cursor tween's linear fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Ease in using a cubic curve.
    EaseIn,
    /// Ease out using a cubic curve.
    EaseOut,
    /// Ease in and out using a cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f64) -> f64 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f64, b: f64, c: f64, t: f64) -> f64 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f64, b: f64, c: f64, t: f64) -> f64 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Solve for the parametric value `t` matching the x fraction, clamped to
    // keep the solution within bounds.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        // Binary subdivision when Newton-Raphson did not converge.
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..24 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-7 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}
