use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for a sector. Valid ids run from 1 to `width * width`
/// inclusive for the owning grid.
pub type SectorId = u16;

/// Square sector grid: the bijection between sector ids and `(col, row)`
/// coordinates, adjacency under both movement modes, and the Chebyshev
/// distance used as the admissible lower bound on move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTopology {
    width: u16,
}

impl GridTopology {
    /// Create a grid of the given width. Widths above 255 would overflow the
    /// sector id space and are rejected.
    pub fn new(width: u16) -> Result<Self> {
        if width == 0 || width > 255 {
            return Err(Error::InvalidGridWidth { width });
        }
        Ok(Self { width })
    }

    pub fn width(self) -> u16 {
        self.width
    }

    /// Total number of sectors (`width * width`).
    pub fn sector_count(self) -> u32 {
        u32::from(self.width) * u32::from(self.width)
    }

    /// Whether `sector` is a valid id for this grid.
    pub fn contains(self, sector: SectorId) -> bool {
        sector >= 1 && u32::from(sector) <= self.sector_count()
    }

    /// Validate a sector id, rejecting anything outside `1..=width^2`.
    pub fn check(self, sector: SectorId) -> Result<()> {
        if self.contains(sector) {
            Ok(())
        } else {
            Err(Error::SectorOutOfRange {
                sector,
                width: self.width,
            })
        }
    }

    /// Iterate over every valid sector id in ascending order.
    pub fn sectors(self) -> impl Iterator<Item = SectorId> {
        (1..=self.sector_count()).map(|s| s as SectorId)
    }

    /// Convert a sector id to a `(col, row)` coordinate pair. Sector ids
    /// start from 1; rows and columns are numbered from 0.
    pub fn to_coords(self, sector: SectorId) -> (u16, u16) {
        debug_assert!(self.contains(sector));
        let index = sector - 1;
        (index % self.width, index / self.width)
    }

    /// Convert a `(col, row)` coordinate pair back to a sector id.
    pub fn to_sector(self, col: u16, row: u16) -> SectorId {
        debug_assert!(col < self.width && row < self.width);
        row * self.width + col + 1
    }

    /// The sectors adjacent to `sector`: the Moore neighborhood (up to 8)
    /// when `diagonal` is set, the von Neumann neighborhood (up to 4)
    /// otherwise. Clipped to the grid bounds; `sector` itself is excluded.
    /// Note that adjacency says nothing about traversability.
    pub fn adjacent_sectors(self, sector: SectorId, diagonal: bool) -> Vec<SectorId> {
        let (col, row) = self.to_coords(sector);
        let mut retval = Vec::with_capacity(8);
        if diagonal {
            for r in row.saturating_sub(1)..=(row + 1).min(self.width - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(self.width - 1) {
                    if (c, r) != (col, row) {
                        retval.push(self.to_sector(c, r));
                    }
                }
            }
        } else {
            if col > 0 {
                retval.push(self.to_sector(col - 1, row));
            }
            if row > 0 {
                retval.push(self.to_sector(col, row - 1));
            }
            if col + 1 < self.width {
                retval.push(self.to_sector(col + 1, row));
            }
            if row + 1 < self.width {
                retval.push(self.to_sector(col, row + 1));
            }
        }
        retval
    }

    /// Chebyshev distance `max(|dcol|, |drow|)` between two sectors: the
    /// number of moves the trip would take on an unrestricted map, and a
    /// lower bound regardless of the diagonal flag.
    pub fn chebyshev(self, a: SectorId, b: SectorId) -> u32 {
        let (col_a, row_a) = self.to_coords(a);
        let (col_b, row_b) = self.to_coords(b);
        u32::from(col_a.abs_diff(col_b).max(row_a.abs_diff(row_b)))
    }

    /// The adjacent sectors of `from` that are strictly closer to `to` by
    /// Chebyshev distance. Empty when `from == to`. As with
    /// `adjacent_sectors`, reachability is not considered.
    pub fn sectors_towards(self, from: SectorId, to: SectorId, diagonal: bool) -> Vec<SectorId> {
        let here = self.chebyshev(from, to);
        self.adjacent_sectors(from, diagonal)
            .into_iter()
            .filter(|&next| self.chebyshev(next, to) < here)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridTopology {
        GridTopology::new(33).unwrap()
    }

    #[test]
    fn rejects_degenerate_widths() {
        assert!(GridTopology::new(0).is_err());
        assert!(GridTopology::new(256).is_err());
        assert!(GridTopology::new(255).is_ok());
    }

    #[test]
    fn coords_known_values() {
        let known = [
            (1, (0, 0)),
            (2, (1, 0)),
            (33, (32, 0)),
            (34, (0, 1)),
            (1057, (0, 32)),
            (1089, (32, 32)),
        ];
        for (sector, coords) in known {
            assert_eq!(grid().to_coords(sector), coords);
            assert_eq!(grid().to_sector(coords.0, coords.1), sector);
        }
    }

    #[test]
    fn towards_known_values() {
        let known = [
            (1, 4, vec![2, 35]),
            (2, 70, vec![36]),
            (33, 98, vec![65, 66]),
            (102, 168, vec![134, 135, 136]),
            (1057, 959, vec![1024, 1025]),
            (1089, 1083, vec![1055, 1088]),
        ];
        for (from, to, expected) in known {
            assert_eq!(grid().sectors_towards(from, to, true), expected);
        }
    }

    #[test]
    fn towards_is_a_subset_of_adjacent() {
        let g = grid();
        for sector in g.sectors() {
            let adjacent = g.adjacent_sectors(sector, true);
            for next in g.sectors_towards(sector, 500, true) {
                assert!(adjacent.contains(&next));
            }
        }
    }

    #[test]
    fn towards_supports_orthogonal_movement() {
        let g = grid();
        // From sector 1 at (0,0) toward (2,0): only (1,0) is strictly closer.
        assert_eq!(g.sectors_towards(1, 3, false), vec![2]);
        assert!(g.sectors_towards(600, 600, false).is_empty());
    }
}
