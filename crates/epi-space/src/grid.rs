//! Discrete-grid contact strategy.

use rustc_hash::FxHashMap;

use epi_agent::PersonStore;
use epi_core::{AgentId, Cell, EpiError, EpiResult, Point, SimRng};

use crate::field::{ContactField, ContactPair};

/// Smallest legal grid extent along either axis.
const MIN_EXTENT: u32 = 10;

/// A bounded grid of unit cells where contact means co-occupancy.
///
/// `positions` is the authoritative per-agent placement; `cells` is the flat
/// occupancy index over it — one `Vec<AgentId>` per *occupied* cell, keyed by
/// coordinate.  Occupant vectors are kept sorted by `AgentId`, which makes
/// the index a pure function of `positions` and the contact ordering
/// independent of map history (the determinism contract of
/// [`ContactField`]).
///
/// # Invariants (violations panic — they are core bugs)
///
/// - every placed agent appears in exactly one occupant vector, the one for
///   `positions[agent]`;
/// - inserting an agent into a cell it already occupies, or removing it from
///   a cell it doesn't, is a panic;
/// - no occupant vector is empty (emptied entries are dropped).
///
/// Serialization goes through a bounds-and-positions snapshot only.
/// The occupancy index is rebuilt on load; because occupant vectors are
/// canonical, the rebuilt index is identical to the one that was saved.
/// (JSON checkpoints also cannot carry struct-keyed maps directly.)
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "GridFieldData", into = "GridFieldData")
)]
pub struct GridField {
    width: u32,
    height: u32,
    positions: Vec<Cell>,
    cells: FxHashMap<Cell, Vec<AgentId>>,
}

impl GridField {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// `EpiError::Config` when either extent is below 10.
    pub fn new(width: u32, height: u32) -> EpiResult<Self> {
        if width < MIN_EXTENT || height < MIN_EXTENT {
            return Err(EpiError::Config(format!(
                "grid extent {width}x{height} below minimum {MIN_EXTENT}x{MIN_EXTENT}"
            )));
        }
        Ok(Self {
            width,
            height,
            positions: Vec::new(),
            cells: FxHashMap::default(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cell an agent currently occupies.
    #[inline]
    pub fn cell_of(&self, agent: AgentId) -> Cell {
        self.positions[agent.index()]
    }

    /// Occupants of `cell`, sorted by `AgentId`.  Empty slice if unoccupied.
    pub fn occupants(&self, cell: Cell) -> &[AgentId] {
        self.cells.get(&cell).map_or(&[], Vec::as_slice)
    }

    /// Relocate one agent (tests and explicit setups).
    pub fn place(&mut self, agent: AgentId, cell: Cell) {
        assert!(
            cell.x < self.width && cell.y < self.height,
            "cell {cell} outside grid {}x{}",
            self.width,
            self.height
        );
        let old = self.positions[agent.index()];
        self.remove_occupant(old, agent);
        self.insert_occupant(cell, agent);
        self.positions[agent.index()] = cell;
    }

    // ── Occupancy index maintenance ───────────────────────────────────────

    fn insert_occupant(&mut self, cell: Cell, agent: AgentId) {
        let occupants = self.cells.entry(cell).or_default();
        match occupants.binary_search(&agent) {
            Ok(_) => panic!("agent {agent} already in cell {cell}"),
            Err(pos) => occupants.insert(pos, agent),
        }
    }

    fn remove_occupant(&mut self, cell: Cell, agent: AgentId) {
        let occupants = self
            .cells
            .get_mut(&cell)
            .unwrap_or_else(|| panic!("no occupants in cell {cell}"));
        match occupants.binary_search(&agent) {
            Ok(pos) => {
                occupants.remove(pos);
            }
            Err(_) => panic!("agent {agent} not in cell {cell}"),
        }
        if occupants.is_empty() {
            self.cells.remove(&cell);
        }
    }
}

/// Serialized form of a [`GridField`]: bounds and per-agent cells.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridFieldData {
    width: u32,
    height: u32,
    positions: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl From<GridField> for GridFieldData {
    fn from(field: GridField) -> Self {
        Self {
            width: field.width,
            height: field.height,
            positions: field.positions,
        }
    }
}

#[cfg(feature = "serde")]
impl From<GridFieldData> for GridField {
    fn from(data: GridFieldData) -> Self {
        let mut field = GridField {
            width: data.width,
            height: data.height,
            positions: Vec::new(),
            cells: FxHashMap::default(),
        };
        field.place_all(&data.positions);
        field
    }
}

impl ContactField for GridField {
    type Pos = Cell;

    fn agent_count(&self) -> usize {
        self.positions.len()
    }

    fn scatter(&mut self, count: usize, rng: &mut SimRng) {
        self.positions = Vec::with_capacity(count);
        self.cells.clear();
        for i in 0..count as u32 {
            let cell = Cell::new(
                rng.gen_range(0..self.width),
                rng.gen_range(0..self.height),
            );
            self.positions.push(cell);
            self.insert_occupant(cell, AgentId(i));
        }
    }

    fn place_all(&mut self, positions: &[Cell]) {
        self.positions = Vec::with_capacity(positions.len());
        self.cells.clear();
        for (i, &cell) in positions.iter().enumerate() {
            assert!(
                cell.x < self.width && cell.y < self.height,
                "cell {cell} outside grid {}x{}",
                self.width,
                self.height
            );
            self.positions.push(cell);
            self.insert_occupant(cell, AgentId(i as u32));
        }
    }

    /// One uniform draw over {stay, +x, -x, +y, -y}; a step that would leave
    /// the grid becomes stay (boundary clamp).
    fn step(&mut self, agent: AgentId, _store: &mut PersonStore, rng: &mut SimRng) {
        let cur = self.positions[agent.index()];
        let target = match rng.gen_range(0u8..5) {
            1 if cur.x + 1 < self.width => Cell::new(cur.x + 1, cur.y),
            2 if cur.x > 0 => Cell::new(cur.x - 1, cur.y),
            3 if cur.y + 1 < self.height => Cell::new(cur.x, cur.y + 1),
            4 if cur.y > 0 => Cell::new(cur.x, cur.y - 1),
            _ => cur,
        };
        if target != cur {
            self.remove_occupant(cur, agent);
            self.insert_occupant(target, agent);
            self.positions[agent.index()] = target;
        }
    }

    /// Pairing policy: occupied cells in ascending `(x, y)` order; within a
    /// cell, AgentId-sorted occupants pair consecutively — `(v[0], v[1])`,
    /// `(v[2], v[3])`, … — and an odd trailing occupant has no contact this
    /// tick.
    fn collect_contacts(&self, out: &mut Vec<ContactPair>) {
        out.clear();
        let mut crowded: Vec<(&Cell, &Vec<AgentId>)> = self
            .cells
            .iter()
            .filter(|(_, occupants)| occupants.len() >= 2)
            .collect();
        crowded.sort_by_key(|(cell, _)| **cell);
        for (_, occupants) in crowded {
            for pair in occupants.chunks_exact(2) {
                out.push(ContactPair { a: pair[0], b: pair[1] });
            }
        }
    }

    fn position(&self, agent: AgentId) -> Point {
        self.positions[agent.index()].into()
    }
}
