//! The built-in roof profiles.
//!
//! Profiles work in a local frame centred on the fill's centroid: `u` is the
//! slope axis (across the ridge) and `v` runs along the ridge. Without a
//! direction hint the ridge follows the longer bounding-box side.

use footprint::Column;

use super::{RoofInput, RoofLayers};

/// Height fraction at which a half-hip's clipped ends start.
const HALF_HIP_SHOULDER: f64 = 0.5;
/// Where a gambrel/mansard profile changes pitch, as a fraction of the run.
const BREAK_RUN: f64 = 0.4;
/// Height fraction reached at the pitch break.
const BREAK_RISE: f64 = 0.7;
/// Onion tip radius as a fraction of the full radius.
const ONION_TIP: f64 = 0.25;
/// Saltbox ridge position along the slope axis, from the short side.
const SALTBOX_RIDGE: f64 = 1.0 / 3.0;

struct Frame {
    cx: f64,
    cz: f64,
    u: (f64, f64),
    v: (f64, f64),
    /// Half spans along `u` and `v`.
    su: f64,
    sv: f64,
    /// Axis-aligned half spans.
    sx: f64,
    sz: f64,
    /// Largest Euclidean distance from the centroid.
    radius: f64,
}

impl Frame {
    fn new(input: &RoofInput<'_>) -> Option<Frame> {
        let (cx, cz) = input.fill.centroid()?;
        let (min, max) = input.fill.bounds()?;

        let (u, v) = match input.direction {
            Some(bearing) => {
                let rad = bearing.to_radians();
                let u = (rad.sin(), -rad.cos());
                (u, (-u.1, u.0))
            }
            None => {
                let ridge_along_x = (max.x - min.x) >= (max.z - min.z);
                let (along, across) = if ridge_along_x {
                    ((1.0, 0.0), (0.0, 1.0))
                } else {
                    ((0.0, 1.0), (1.0, 0.0))
                };
                if input.across {
                    (along, across)
                } else {
                    (across, along)
                }
            }
        };

        let mut frame = Frame {
            cx,
            cz,
            u,
            v,
            su: 0.0,
            sv: 0.0,
            sx: 0.0,
            sz: 0.0,
            radius: 0.0,
        };
        for c in input.fill.iter() {
            let (dx, dz) = frame.offset(c);
            let (du, dv) = frame.local(c);
            frame.su = frame.su.max(du.abs());
            frame.sv = frame.sv.max(dv.abs());
            frame.sx = frame.sx.max(dx.abs());
            frame.sz = frame.sz.max(dz.abs());
            frame.radius = frame.radius.max(dx.hypot(dz));
        }
        frame.su = frame.su.max(0.5);
        frame.sv = frame.sv.max(0.5);
        frame.sx = frame.sx.max(0.5);
        frame.sz = frame.sz.max(0.5);
        frame.radius = frame.radius.max(0.5);
        Some(frame)
    }

    fn offset(&self, c: Column) -> (f64, f64) {
        let (px, pz) = c.center();
        (px - self.cx, pz - self.cz)
    }

    /// `(along u, along v)` from the centroid.
    fn local(&self, c: Column) -> (f64, f64) {
        let (dx, dz) = self.offset(c);
        (
            dx * self.u.0 + dz * self.u.1,
            dx * self.v.0 + dz * self.v.1,
        )
    }

    /// Normalized Chebyshev radius: 0 at the centroid, 1 at the farthest
    /// column on either axis.
    fn chebyshev(&self, c: Column) -> f64 {
        let (dx, dz) = self.offset(c);
        (dx.abs() / self.sx).max(dz.abs() / self.sz)
    }

    /// Normalized Euclidean radius.
    fn radial(&self, c: Column) -> f64 {
        let (dx, dz) = self.offset(c);
        dx.hypot(dz) / self.radius
    }

    /// 1 on the ridge line, 0 at the farthest eave.
    fn gable(&self, c: Column) -> f64 {
        1.0 - self.local(c).0.abs() / self.su
    }

    /// Equal-pitch distance to the nearest eave, 1 on the ridge.
    fn hip(&self, c: Column) -> f64 {
        let (du, dv) = self.local(c);
        ((self.su - du.abs()).min(self.sv - dv.abs()) / self.su).min(1.0)
    }
}

/// Two-pitch profile: steep up to the break, shallow above it.
fn broken_pitch(t: f64) -> f64 {
    if t <= BREAK_RUN {
        t / BREAK_RUN * BREAK_RISE
    } else {
        BREAK_RISE + (t - BREAK_RUN) / (1.0 - BREAK_RUN) * (1.0 - BREAK_RISE)
    }
}

/// Evaluate `profile` (a height fraction) on every column.
fn profile(input: &RoofInput<'_>, f: impl Fn(&Frame, Column) -> f64) -> RoofLayers {
    let Some(frame) = Frame::new(input) else {
        return RoofLayers::new();
    };
    let t = input.thickness.max(0);
    input
        .fill
        .iter()
        .map(|c| {
            let fraction = f(&frame, c).clamp(0.0, 1.0);
            (c, ((fraction * t as f64).round() as i32).clamp(0, t))
        })
        .collect()
}

pub fn flat(input: &RoofInput<'_>) -> RoofLayers {
    let t = input.thickness.max(0);
    input.fill.iter().map(|c| (c, t)).collect()
}

pub fn gabled(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| f.gable(c))
}

/// Single slope, high on the `-u` side, falling toward the direction hint.
pub fn skillion(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| (f.su - f.local(c).0) / (2.0 * f.su))
}

pub fn pyramidal(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| 1.0 - f.chebyshev(c))
}

pub fn hip(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| f.hip(c))
}

/// Gable whose ends are clipped by a short hip above the shoulder.
pub fn half_hip(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| {
        let (_, dv) = f.local(c);
        let end = HALF_HIP_SHOULDER + (f.sv - dv.abs()) / f.su;
        f.gable(c).min(end)
    })
}

pub fn gambrel(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| broken_pitch(f.gable(c).max(0.0)))
}

pub fn mansard(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| broken_pitch(f.hip(c).max(0.0)))
}

/// `max(0, 1 - r²)` over the normalized Chebyshev radius.
pub fn dome(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| {
        let r = f.chebyshev(c);
        (1.0 - r * r).max(0.0)
    })
}

/// Bulb with a pointed tip.
pub fn onion(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| {
        let r = f.radial(c);
        let bulb = (1.0 - r * r).max(0.0).sqrt() * (1.0 - ONION_TIP);
        let tip = (1.0 - r / ONION_TIP).max(0.0) * ONION_TIP;
        bulb + tip
    })
}

pub fn conical(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| 1.0 - f.radial(c))
}

/// Repeated skillion teeth along the slope axis.
pub fn sawtooth(input: &RoofInput<'_>) -> RoofLayers {
    let tooth = (2 * input.thickness).max(3) as f64;
    profile(input, move |f, c| {
        let run = f.local(c).0 + f.su;
        run.rem_euclid(tooth) / (tooth - 1.0)
    })
}

/// Inverted gable: valley along the ridge line.
pub fn butterfly(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| 1.0 - f.gable(c))
}

/// Circular vault across the slope axis.
pub fn barrel(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| {
        let d = f.local(c).0 / f.su;
        (1.0 - d * d).max(0.0).sqrt()
    })
}

/// Asymmetric gable: short steep side on `-u`, long side on `+u`.
pub fn saltbox(input: &RoofInput<'_>) -> RoofLayers {
    profile(input, |f, c| {
        let du = f.local(c).0;
        let ridge = -f.su + 2.0 * f.su * SALTBOX_RIDGE;
        if du < ridge {
            1.0 - (ridge - du) / (ridge + f.su)
        } else {
            1.0 - (du - ridge) / (f.su - ridge)
        }
    })
}
