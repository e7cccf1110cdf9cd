// building parameter sampling and dimension resolution

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::*;

/// Raw parameters of one tower, immutable once sampled.
/// All dimensions derive from these through the tiling formula so the
/// window grid always lands exactly on the facade edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingPlan {
    pub window_width: f32,
    pub window_height: f32,
    pub gutter: f32,
    pub padding: f32, // always == gutter, kept separate for the formulas
    pub floors: u32,
    pub rooms_a: u32, // rooms per facade, front/back axis
    pub rooms_b: u32, // rooms per facade, left/right axis
}

/// Lot bounds handed down by the city layout. Applied to raw samples
/// before room/floor counts are derived, never to resolved dimensions.
#[derive(Clone, Copy, Debug)]
pub struct BuildingConstraints {
    pub max_width: f32,
    pub max_depth: f32,
    pub max_height: f32,
}

/// Sampling result; `relaxed` is set when a constraint forced a room or
/// floor count below the normal minimum and the caller should warn.
#[derive(Clone, Copy, Debug)]
pub struct PlanOutcome {
    pub plan: BuildingPlan,
    pub relaxed: bool,
}

impl BuildingPlan {
    /// The tiling span: padding + n cells with gutters between + padding.
    pub fn span(cells: u32, cell: f32, gutter: f32, padding: f32) -> f32 {
        2.0 * padding + cells as f32 * cell + gutter * cells.saturating_sub(1) as f32
    }

    pub fn width_a(&self) -> f32 {
        Self::span(self.rooms_a, self.window_width, self.gutter, self.padding)
    }

    pub fn width_b(&self) -> f32 {
        Self::span(self.rooms_b, self.window_width, self.gutter, self.padding)
    }

    pub fn height(&self) -> f32 {
        Self::span(self.floors, self.window_height, self.gutter, self.padding)
    }

    // centered offset of cell k within a span: padding + k steps + half a cell
    fn cell_offset(k: u32, cells: u32, cell: f32, gutter: f32, padding: f32) -> f32 {
        let span = Self::span(cells, cell, gutter, padding);
        padding + k as f32 * (cell + gutter) + cell / 2.0 - span / 2.0
    }

    /// Lateral center of room `k` on a front/back facade, building-local.
    pub fn room_offset_a(&self, k: u32) -> f32 {
        Self::cell_offset(k, self.rooms_a, self.window_width, self.gutter, self.padding)
    }

    /// Lateral center of room `k` on a left/right facade, building-local.
    pub fn room_offset_b(&self, k: u32) -> f32 {
        Self::cell_offset(k, self.rooms_b, self.window_width, self.gutter, self.padding)
    }

    /// Vertical center of floor `k`, building-local.
    pub fn floor_offset(&self, k: u32) -> f32 {
        Self::cell_offset(k, self.floors, self.window_height, self.gutter, self.padding)
    }

    /// Tight gutters and padding read as a sparse curtain-wall facade.
    /// Pure in (gutter, padding); nothing else may influence it.
    pub fn is_modern(&self) -> bool {
        self.gutter < MODERN_GUTTER_LIMIT && self.padding < MODERN_PADDING_LIMIT
    }
}

// how many cells of size `cell` fit into `span` after the edge padding
fn cells_that_fit(span: f32, cell: f32, gutter: f32, padding: f32) -> u32 {
    let usable = span - 2.0 * padding;
    if usable <= 0.0 {
        return 0;
    }
    (usable / (cell + gutter)).floor() as u32
}

/// Draws an unconstrained plan. Every draw is valid after clamping; the
/// room floor of 4 keeps narrow slab buildings out of the skyline.
pub fn sample(rng: &mut StdRng) -> BuildingPlan {
    sample_constrained(rng, None).plan
}

/// Draws a plan, optionally bounded by a lot. Bounds clamp the desired
/// spans before counts are derived so the tiling stays exact; a lot too
/// tight for 4 rooms relaxes the minimum to 1 and reports it.
pub fn sample_constrained(rng: &mut StdRng, bounds: Option<&BuildingConstraints>) -> PlanOutcome {
    let window_width = rng.random_range(WINDOW_WIDTH_MIN..WINDOW_WIDTH_MAX);
    let window_height = rng.random_range(WINDOW_HEIGHT_MIN..WINDOW_HEIGHT_MAX);
    let gutter = ((window_width + window_height) / 2.0) * (GUTTER_SCALE * rng.random::<f32>());
    let padding = gutter;

    let mut desired_a = rng.random_range(DESIRED_WIDTH_MIN..DESIRED_WIDTH_MAX);
    let mut desired_b = rng.random_range(DESIRED_WIDTH_MIN..DESIRED_WIDTH_MAX);
    let raw_floors = rng.random_range(FLOORS_MIN..=FLOORS_MAX);

    let mut relaxed = false;

    if let Some(bounds) = bounds {
        desired_a = desired_a.min(bounds.max_width);
        desired_b = desired_b.min(bounds.max_depth);
    }

    // clamping up to 4 rooms may widen past the desired span, which is
    // fine on its own; it is only relaxed when the lot bound itself
    // cannot hold 4 rooms
    let mut resolve_rooms = |desired: f32, bound: Option<f32>| -> u32 {
        if let Some(bound) = bound {
            let bound_fit = cells_that_fit(bound, window_width, gutter, padding);
            if bound_fit < ROOMS_MIN {
                relaxed = true;
                return bound_fit.max(1);
            }
        }
        cells_that_fit(desired, window_width, gutter, padding).clamp(ROOMS_MIN, ROOMS_MAX)
    };

    let rooms_a = resolve_rooms(desired_a, bounds.map(|b| b.max_width));
    let rooms_b = resolve_rooms(desired_b, bounds.map(|b| b.max_depth));

    let floors = match bounds {
        Some(bounds) => {
            let fit = cells_that_fit(bounds.max_height, window_height, gutter, padding);
            if fit == 0 {
                relaxed = true;
                1
            } else {
                raw_floors.min(fit)
            }
        }
        None => raw_floors,
    };

    PlanOutcome {
        plan: BuildingPlan {
            window_width,
            window_height,
            gutter,
            padding,
            floors,
            rooms_a,
            rooms_b,
        },
        relaxed,
    }
}
