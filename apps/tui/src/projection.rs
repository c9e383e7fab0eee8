//! Natural Earth I projection and the zoomable map viewport.
//!
//! Projected coordinates are in unit-sphere space with y pointing north, which
//! is what ratatui's canvas expects.

/// Projects `(lon, lat)` in degrees.
#[allow(clippy::suboptimal_flops)]
pub fn natural_earth1(lon: f64, lat: f64) -> (f64, f64) {
    let lambda = lon.to_radians();
    let phi = lat.clamp(-90.0, 90.0).to_radians();
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;

    let x = lambda
        * (0.870_7 - 0.131_979 * phi2
            + phi4 * (-0.013_791 + phi4 * (0.003_971 * phi2 - 0.001_529 * phi4)));
    let y = phi
        * (1.007_226
            + phi2 * (0.015_085 + phi4 * (-0.044_475 + 0.028_874 * phi2 - 0.005_916 * phi4)));
    (x, y)
}

/// Projected extent of the whole globe: `(x_min, x_max, y_min, y_max)`.
pub fn world_bounds() -> (f64, f64, f64, f64) {
    let (x_max, _) = natural_earth1(180.0, 0.0);
    let (_, y_max) = natural_earth1(0.0, 90.0);
    (-x_max, x_max, -y_max, y_max)
}

/// Outline of the projected sphere, traced along the ±180° meridians.
pub fn sphere_outline(steps: usize) -> Vec<(f64, f64)> {
    let steps = steps.max(2);
    let east = (0..=steps).map(|i| {
        let lat = 180.0f64.mul_add(i as f64 / steps as f64, -90.0);
        natural_earth1(180.0, lat)
    });
    let west = (0..=steps).map(|i| {
        let lat = 180.0f64.mul_add(-(i as f64) / steps as f64, 90.0);
        natural_earth1(-180.0, lat)
    });
    east.chain(west).collect()
}

/// Projected meridians and parallels every `step` degrees, inside the sphere.
pub fn graticule(step: f64, samples: usize) -> Vec<Vec<(f64, f64)>> {
    let samples = samples.max(2);
    let span = |from: f64, to: f64| {
        (0..=samples).map(move |i| (to - from).mul_add(i as f64 / samples as f64, from))
    };
    #[allow(clippy::cast_possible_truncation)]
    let count = |limit: f64| (limit / step).ceil() as i32;
    let (meridians, parallels) = (count(180.0), count(90.0));
    let meridians = (1 - meridians..meridians).map(|i| {
        let lon = f64::from(i) * step;
        span(-90.0, 90.0)
            .map(|lat| natural_earth1(lon, lat))
            .collect::<Vec<_>>()
    });
    let parallels = (1 - parallels..parallels).map(|i| {
        let lat = f64::from(i) * step;
        span(-180.0, 180.0)
            .map(|lon| natural_earth1(lon, lat))
            .collect::<Vec<_>>()
    });
    meridians.chain(parallels).collect()
}

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 12.0;
const ZOOM_STEP: f64 = 1.25;
const PAN_FRACTION: f64 = 0.1;

/// Visible window onto the projected world. Zoom 1 shows the whole globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: (f64, f64),
    pub zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: (0.0, 0.0),
            zoom: MIN_ZOOM,
        }
    }
}

impl MapViewport {
    pub fn x_bounds(&self) -> [f64; 2] {
        let (x_min, x_max, _, _) = world_bounds();
        let half = (x_max - x_min) / 2.0 / self.zoom;
        [self.center.0 - half, self.center.0 + half]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let (_, _, y_min, y_max) = world_bounds();
        let half = (y_max - y_min) / 2.0 / self.zoom;
        [self.center.1 - half, self.center.1 + half]
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
        self.clamp_center();
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
        self.clamp_center();
    }

    /// Moves by a fraction of the visible window; `dx`/`dy` are -1, 0 or 1.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        self.center.0 += dx * (x1 - x0) * PAN_FRACTION;
        self.center.1 += dy * (y1 - y0) * PAN_FRACTION;
        self.clamp_center();
    }

    /// Recentres on `point` while zooming in, the way a wheel zoom feels.
    pub fn zoom_towards(&mut self, point: (f64, f64)) {
        let before = self.zoom;
        self.zoom_in();
        let ratio = before / self.zoom;
        self.center = (
            (self.center.0 - point.0).mul_add(ratio, point.0),
            (self.center.1 - point.1).mul_add(ratio, point.1),
        );
        self.clamp_center();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Maps a fractional position inside the canvas (0..1 left→right,
    /// 0..1 top→bottom) to projected coordinates.
    pub fn unproject_fraction(&self, fx: f64, fy: f64) -> (f64, f64) {
        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        ((x1 - x0).mul_add(fx, x0), (y1 - y0).mul_add(-fy, y1))
    }

    /// Projected units per canvas cell horizontally, for hit tolerances.
    pub fn units_per_cell(&self, cells: u16) -> f64 {
        let [x0, x1] = self.x_bounds();
        (x1 - x0) / f64::from(cells.max(1))
    }

    fn clamp_center(&mut self) {
        let (x_min, x_max, y_min, y_max) = world_bounds();
        let half_x = (x_max - x_min) / 2.0 / self.zoom;
        let half_y = (y_max - y_min) / 2.0 / self.zoom;
        self.center.0 = self.center.0.clamp(x_min + half_x, x_max - half_x);
        self.center.1 = self.center.1.clamp(y_min + half_y, y_max - half_y);
    }
}

/// Width of the projected globe, used to convert marker pixel radii.
pub fn world_width() -> f64 {
    let (x_min, x_max, _, _) = world_bounds();
    x_max - x_min
}
