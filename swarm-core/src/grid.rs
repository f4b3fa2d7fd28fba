use std::collections::HashMap;

use crate::Vector2D;

/// Uniform grid over particle positions with cells as wide as the query radius,
/// so a 3x3 cell neighborhood covers every particle within that radius
#[derive(Debug, Clone)]
pub struct NeighborGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl NeighborGrid {
    pub fn build<I>(positions: I, cell_size: f32) -> Self
    where
        I: IntoIterator<Item = Vector2D>,
    {
        let cell_size = cell_size.max(1.0);
        let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (index, position) in positions.into_iter().enumerate() {
            cells
                .entry(cell_of(position, cell_size))
                .or_default()
                .push(index);
        }
        Self { cell_size, cells }
    }

    /// Indices of candidates in the 3x3 block of cells around `position`,
    /// including the querying particle itself
    pub fn candidates(&self, position: Vector2D) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = cell_of(position, self.cell_size);
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (cx + dx, cy + dy)))
            .filter_map(move |cell| self.cells.get(&cell))
            .flatten()
            .copied()
    }
}

fn cell_of(position: Vector2D, cell_size: f32) -> (i32, i32) {
    (
        (position.x / cell_size).floor() as i32,
        (position.y / cell_size).floor() as i32,
    )
}
