//! Node placement for the failure graph.
//!
//! Placement is deterministic: the same nodes, kind and seed always give the
//! same coordinates, so a re-run produces an identical report. Coordinates
//! are roughly in the unit square; backends rescale to their own canvas.

use crate::model::NodeId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Default jitter, as a fraction of grid spacing.
pub const DEFAULT_NOISE: f64 = 0.15;

/// Default RNG seed for grid jitter.
pub const DEFAULT_SEED: u64 = 0x6e65_7466_6169_6c;

/// Placement scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Square-ish grid in identifier order, with a little jitter so that
    /// edges between neighbours do not overlap exactly.
    #[default]
    Grid,
    /// Evenly spaced on a circle.
    Circle,
    /// Golden-angle spiral from the centre outwards.
    Spiral,
}

impl LayoutKind {
    /// Name accepted on the command line and in the config file.
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::Circle => "circle",
            LayoutKind::Spiral => "spiral",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A layout name that is none of the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout '{0}' (expected grid, circle or spiral)")]
pub struct UnknownLayout(
    /// The rejected input.
    pub String,
);

impl FromStr for LayoutKind {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(LayoutKind::Grid),
            "circle" | "circular" => Ok(LayoutKind::Circle),
            "spiral" => Ok(LayoutKind::Spiral),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}

/// Layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Placement strategy.
    pub kind: LayoutKind,
    /// Grid jitter as a fraction of spacing; ignored by other kinds.
    pub noise: f64,
    /// Seed for the jitter, so a layout is reproducible.
    pub seed: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            kind: LayoutKind::Grid,
            noise: DEFAULT_NOISE,
            seed: DEFAULT_SEED,
        }
    }
}

/// A 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, for nearest-node comparisons.
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: Point,
    /// Upper-right corner.
    pub max: Point,
}

impl Bounds {
    /// Bounds of `points`, or the unit square when there are none.
    pub fn of(points: impl IntoIterator<Item = Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self {
                min: Point::new(0.0, 0.0),
                max: Point::new(1.0, 1.0),
            };
        };

        iter.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: Point::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
                max: Point::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
            },
        )
    }

    /// Grow each side by `fraction` of the span, with a minimum span of 1e-6
    /// so a single node still gets a usable box.
    pub fn padded(self, fraction: f64) -> Self {
        let span_x = (self.max.x - self.min.x).max(1e-6);
        let span_y = (self.max.y - self.min.y).max(1e-6);
        let pad_x = span_x * fraction + if span_x <= 1e-6 { 0.5 } else { 0.0 };
        let pad_y = span_y * fraction + if span_y <= 1e-6 { 0.5 } else { 0.0 };
        Self {
            min: Point::new(self.min.x - pad_x, self.min.y - pad_y),
            max: Point::new(self.max.x + pad_x, self.max.y + pad_y),
        }
    }

    /// Horizontal span.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical span.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Coordinates for each node, in the order the nodes were given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Positions {
    points: Vec<(NodeId, Point)>,
}

impl Positions {
    /// Where `node` was placed.
    pub fn get(&self, node: &NodeId) -> Option<Point> {
        self.points
            .iter()
            .find(|(id, _)| id == node)
            .map(|(_, point)| *point)
    }

    /// Every node with its position.
    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, Point)> {
        self.points.iter()
    }

    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// No nodes were placed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Place `nodes` according to `options`.
///
/// Callers pass nodes in identifier order; neighbouring identifiers (e.g.
/// adjacent IP addresses) end up close to each other in grid and spiral
/// layouts.
pub fn layout(nodes: &[NodeId], options: LayoutOptions) -> Positions {
    let coords = match options.kind {
        LayoutKind::Grid => grid(nodes.len(), options.noise, options.seed),
        LayoutKind::Circle => circle(nodes.len()),
        LayoutKind::Spiral => spiral(nodes.len()),
    };

    Positions {
        points: nodes.iter().cloned().zip(coords).collect(),
    }
}

fn grid(count: usize, noise: f64, seed: u64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }

    // Round up so the grid always has room for every node
    let per_axis = (count as f64).sqrt().ceil() as usize;
    let spacing = 1.0 / per_axis as f64;
    let jitter = spacing * noise.max(0.0);
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let col = (i % per_axis) as f64;
            let row = (i / per_axis) as f64;
            let (dx, dy) = if jitter > 0.0 {
                (rng.gen_range(-jitter..=jitter), rng.gen_range(-jitter..=jitter))
            } else {
                (0.0, 0.0)
            };
            Point::new(col * spacing + dx, row * spacing + dy)
        })
        .collect()
}

fn circle(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Point::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect()
}

fn spiral(count: usize) -> Vec<Point> {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    (0..count)
        .map(|i| {
            let radius = 0.5 * ((i as f64 + 0.5) / count as f64).sqrt();
            let angle = golden_angle * i as f64;
            Point::new(0.5 + radius * angle.cos(), 0.5 + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(count: usize) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = (0..count)
            .map(|i| NodeId::parse(&format!("10.0.{}.{}", i / 256, i % 256)).unwrap())
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn every_node_gets_a_position() {
        for kind in [LayoutKind::Grid, LayoutKind::Circle, LayoutKind::Spiral] {
            let ids = nodes(10);
            let options = LayoutOptions {
                kind,
                ..LayoutOptions::default()
            };
            let positions = layout(&ids, options);
            assert_eq!(positions.len(), 10, "{kind} layout lost nodes");
            for id in &ids {
                assert!(positions.get(id).is_some());
            }
        }
    }

    #[test]
    fn empty_input_gives_empty_positions() {
        let positions = layout(&[], LayoutOptions::default());
        assert!(positions.is_empty());
    }

    #[test]
    fn grid_is_deterministic_for_a_seed() {
        let ids = nodes(17);
        let first = layout(&ids, LayoutOptions::default());
        let second = layout(&ids, LayoutOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn grid_seed_changes_jitter() {
        let ids = nodes(9);
        let a = layout(&ids, LayoutOptions::default());
        let b = layout(
            &ids,
            LayoutOptions {
                seed: 7,
                ..LayoutOptions::default()
            },
        );
        assert_ne!(a, b);
    }

    #[test]
    fn grid_without_noise_is_regular() {
        let ids = nodes(4);
        let positions = layout(
            &ids,
            LayoutOptions {
                noise: 0.0,
                ..LayoutOptions::default()
            },
        );
        let coords: Vec<(f64, f64)> = positions.iter().map(|(_, p)| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(0.0, 0.0), (0.5, 0.0), (0.0, 0.5), (0.5, 0.5)]);
    }

    #[test]
    fn grid_jitter_stays_within_spacing() {
        let ids = nodes(25);
        let positions = layout(&ids, LayoutOptions::default());
        let spacing = 0.2;
        for (i, (_, p)) in positions.iter().enumerate() {
            let ideal = Point::new((i % 5) as f64 * spacing, (i / 5) as f64 * spacing);
            assert!((p.x - ideal.x).abs() <= spacing * DEFAULT_NOISE + 1e-12);
            assert!((p.y - ideal.y).abs() <= spacing * DEFAULT_NOISE + 1e-12);
        }
    }

    #[test]
    fn circle_points_lie_on_the_circle() {
        let positions = layout(
            &nodes(8),
            LayoutOptions {
                kind: LayoutKind::Circle,
                ..LayoutOptions::default()
            },
        );
        for (_, p) in positions.iter() {
            let r2 = p.distance_squared(Point::new(0.5, 0.5));
            assert!((r2 - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn spiral_grows_outwards() {
        let positions = layout(
            &nodes(20),
            LayoutOptions {
                kind: LayoutKind::Spiral,
                ..LayoutOptions::default()
            },
        );
        let centre = Point::new(0.5, 0.5);
        let radii: Vec<f64> = positions
            .iter()
            .map(|(_, p)| p.distance_squared(centre))
            .collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn layout_kind_parses_names() {
        assert_eq!("grid".parse::<LayoutKind>(), Ok(LayoutKind::Grid));
        assert_eq!("Circular".parse::<LayoutKind>(), Ok(LayoutKind::Circle));
        assert_eq!("spiral".parse::<LayoutKind>(), Ok(LayoutKind::Spiral));
        assert!("force".parse::<LayoutKind>().is_err());
    }

    #[test]
    fn bounds_of_single_point_is_padded_to_nonzero() {
        let bounds = Bounds::of([Point::new(0.3, 0.3)]).padded(0.1);
        assert!(bounds.width() > 0.0);
        assert!(bounds.height() > 0.0);
    }

    #[test]
    fn bounds_of_nothing_is_unit_square() {
        let bounds = Bounds::of(std::iter::empty());
        assert_eq!(bounds.min, Point::new(0.0, 0.0));
        assert_eq!(bounds.max, Point::new(1.0, 1.0));
    }
}
