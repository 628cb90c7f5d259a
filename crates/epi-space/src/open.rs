//! Continuous-surface contact strategy.

use epi_agent::PersonStore;
use epi_core::{AgentId, EpiError, EpiResult, Heading, Point, SimRng};

use crate::field::{ContactField, ContactPair};

/// Smallest legal surface extent along either axis.
const MIN_EXTENT: f32 = 10.0;

/// Default collision radius of one agent, in field units.
const DEFAULT_RADIUS: f32 = 4.0;

/// Default distance from an edge at which headings are forced inward.
const DEFAULT_MARGIN: f32 = 5.0;

/// Default per-tick probability of re-deciding the movement heading.
const DEFAULT_REDECIDE: f64 = 0.2;

/// A soft-bounded continuous surface where contact means circle overlap.
///
/// Movement has inertia: an agent keeps its velocity until a re-decision
/// fires, and a re-decision turns the compass heading by at most one step —
/// never a reversal.  Near an edge the heading is forced inward instead,
/// overriding the stochastic choice, and positions are clamped into the
/// bounds after every displacement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenField {
    width: f32,
    height: f32,
    margin: f32,
    redecide_probability: f64,
    default_radius: f32,
    positions: Vec<Point>,
    velocities: Vec<(f32, f32)>,
    radii: Vec<f32>,
}

impl OpenField {
    /// Create an empty surface.
    ///
    /// # Errors
    ///
    /// `EpiError::Config` when either extent is below 10.0.
    pub fn new(width: f32, height: f32) -> EpiResult<Self> {
        if width < MIN_EXTENT || height < MIN_EXTENT {
            return Err(EpiError::Config(format!(
                "surface extent {width}x{height} below minimum {MIN_EXTENT}x{MIN_EXTENT}"
            )));
        }
        Ok(Self {
            width,
            height,
            margin: DEFAULT_MARGIN,
            redecide_probability: DEFAULT_REDECIDE,
            default_radius: DEFAULT_RADIUS,
            positions: Vec::new(),
            velocities: Vec::new(),
            radii: Vec::new(),
        })
    }

    /// Override the collision radius agents are created with (default 4.0).
    pub fn agent_radius(mut self, radius: f32) -> Self {
        self.default_radius = radius;
        self
    }

    /// Override the per-tick heading re-decision probability (default 0.2).
    pub fn redecide_probability(mut self, p: f64) -> Self {
        self.redecide_probability = p.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Relocate one agent (tests and explicit setups).
    pub fn place(&mut self, agent: AgentId, point: Point) {
        assert!(
            (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y),
            "point {point} outside surface {}x{}",
            self.width,
            self.height
        );
        self.positions[agent.index()] = point;
    }

    /// Override one agent's collision radius.
    pub fn set_radius(&mut self, agent: AgentId, radius: f32) {
        self.radii[agent.index()] = radius;
    }

    // ── Movement internals ────────────────────────────────────────────────

    /// Inward heading when within `margin` of an edge, checked in the order
    /// left, right, top, bottom.
    fn forced_heading(&self, p: Point) -> Option<Heading> {
        if p.x < self.margin {
            Some(Heading::E)
        } else if p.x > self.width - self.margin {
            Some(Heading::W)
        } else if p.y < self.margin {
            Some(Heading::S)
        } else if p.y > self.height - self.margin {
            Some(Heading::N)
        } else {
            None
        }
    }

    /// Sample a velocity consistent with `heading`: components along the
    /// heading's axes get a magnitude in `[1, speed]`, the off axis jitters
    /// in `[-1, 1]`.
    fn sample_velocity(heading: Heading, speed: f32, rng: &mut SimRng) -> (f32, f32) {
        let (sx, sy) = heading.offsets();
        (
            Self::component(sx, speed, rng),
            Self::component(sy, speed, rng),
        )
    }

    fn component(sign: i8, speed: f32, rng: &mut SimRng) -> f32 {
        if sign == 0 {
            return rng.gen_range(-1.0f32..=1.0);
        }
        let magnitude = if speed <= 1.0 {
            speed
        } else {
            rng.gen_range(1.0f32..=speed)
        };
        magnitude * f32::from(sign)
    }
}

impl ContactField for OpenField {
    type Pos = Point;

    fn agent_count(&self) -> usize {
        self.positions.len()
    }

    fn scatter(&mut self, count: usize, rng: &mut SimRng) {
        // Keep spawn points a body-width clear of the forcing margin so no
        // agent starts already pressed against an edge.  Capped at the field
        // midpoint so minimum-size surfaces still have a spawn band.
        let inset_x = (self.margin + self.default_radius).min(self.width / 2.0);
        let inset_y = (self.margin + self.default_radius).min(self.height / 2.0);
        self.positions = (0..count)
            .map(|_| {
                Point::new(
                    rng.gen_range(inset_x..=self.width - inset_x),
                    rng.gen_range(inset_y..=self.height - inset_y),
                )
            })
            .collect();
        self.velocities = vec![(0.0, 0.0); count];
        self.radii = vec![self.default_radius; count];
    }

    fn place_all(&mut self, positions: &[Point]) {
        for &p in positions {
            assert!(
                (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y),
                "point {p} outside surface {}x{}",
                self.width,
                self.height
            );
        }
        self.positions = positions.to_vec();
        self.velocities = vec![(0.0, 0.0); positions.len()];
        self.radii = vec![self.default_radius; positions.len()];
    }

    fn step(&mut self, agent: AgentId, store: &mut PersonStore, rng: &mut SimRng) {
        let i = agent.index();
        let p = self.positions[i];
        let speed = store.speed[i];

        if let Some(forced) = self.forced_heading(p) {
            store.heading[i] = Some(forced);
            self.velocities[i] = Self::sample_velocity(forced, speed, rng);
        } else if rng.gen_bool(self.redecide_probability) {
            let heading = match store.heading[i] {
                // First decision: any of the eight headings.
                None => Heading::ALL[rng.gen_range(0..Heading::ALL.len())],
                // Later decisions: turn one compass step at most, so an agent
                // never reverses in a single tick.
                Some(prev) => prev.rotated(rng.gen_range(-1i8..=1)),
            };
            store.heading[i] = Some(heading);
            self.velocities[i] = Self::sample_velocity(heading, speed, rng);
        }

        let (dx, dy) = self.velocities[i];
        self.positions[i] = Point::new(
            (p.x + dx).clamp(0.0, self.width),
            (p.y + dy).clamp(0.0, self.height),
        );
    }

    /// Pairwise circle-overlap scan, ascending `(a, b)` index order.  O(n²) —
    /// fine at the hundreds-to-thousands scale this simulator targets.
    fn collect_contacts(&self, out: &mut Vec<ContactPair>) {
        out.clear();
        let n = self.positions.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let reach = self.radii[i] + self.radii[j];
                if self.positions[i].distance(self.positions[j]) < reach {
                    out.push(ContactPair {
                        a: AgentId(i as u32),
                        b: AgentId(j as u32),
                    });
                }
            }
        }
    }

    fn position(&self, agent: AgentId) -> Point {
        self.positions[agent.index()]
    }
}
