//! Pattern databases: the exact distance from solved of every coset of a coordinate.
//!
//! A table is built by breadth first search over the coset graph, done as repeated scans over the
//! whole array rather than with a queue. Every scan expands one layer: each entry at the current
//! depth tries all 18 moves and claims the unvisited neighbours for the next depth. The distance
//! to the solved coset never exceeds the number of moves needed to solve a cube in that coset, so
//! any table is an admissible heuristic.

use super::move_tables::CoordMover;
use super::Heuristic;
use crate::coord::Coordinate;
use crate::cube333::coordcube::CornerCoord;
use crate::cube333::moves::Move333;
use crate::cube333::CubieCube;
use crate::error::TableError;

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};

use log::{debug, info};
use rayon::prelude::*;

/// Marks a coset the search hasn't reached. Never present in a finished table.
pub const UNVISITED: u8 = 0xFF;

/// A pruning table storing one distance byte per coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruningTable<C> {
    table: Box<[u8]>,
    _phantom: PhantomData<C>,
}

/// The pattern database over the corner subgroup, 8! * 3^7 entries, at most 11 moves deep.
pub type CornerPruningTable = PruningTable<CornerCoord>;

impl<C: Coordinate<CubieCube> + Send + Sync> PruningTable<C> {
    /// Generate the table from a move table for the coordinate.
    pub fn generate<T: CoordMover<C>>(mover: &T) -> Self {
        let dist: Vec<AtomicU8> = (0..C::count())
            .into_par_iter()
            .map(|_| AtomicU8::new(UNVISITED))
            .collect();
        dist[0].store(0, Ordering::Relaxed);

        let mut depth = 0;
        let mut total = 1;
        // The end of each parallel pass is the barrier between layers: nothing at depth + 1 is
        // expanded until every entry at depth has been.
        while depth < UNVISITED - 1 {
            let claimed: usize = dist
                .par_iter()
                .enumerate()
                .filter(|(_, d)| d.load(Ordering::Relaxed) == depth)
                .map(|(i, _)| {
                    let c = C::from_repr(i);
                    Move333::ALL
                        .iter()
                        .filter(|&&mv| {
                            let next = mover.make_move(c, mv).repr();
                            dist[next]
                                .compare_exchange(
                                    UNVISITED,
                                    depth + 1,
                                    Ordering::Relaxed,
                                    Ordering::Relaxed,
                                )
                                .is_ok()
                        })
                        .count()
                })
                .sum();

            debug!("depth {}: {claimed} new cosets", depth + 1);
            if claimed == 0 {
                break;
            }
            total += claimed;
            depth += 1;
        }

        info!(
            "generated pruning table for {}: {total} of {} cosets reached, max depth {depth}",
            std::any::type_name::<C>(),
            C::count()
        );

        let table = dist
            .into_par_iter()
            .map(AtomicU8::into_inner)
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            table,
            _phantom: PhantomData,
        }
    }

    /// Load the table at `path`, or generate and save it there when the file can't be opened.
    /// The move table is only built when it is needed.
    ///
    /// A file that opens but doesn't hold a complete table is an error, as is failing to save a
    /// freshly built one.
    pub fn load_or_generate<T: CoordMover<C>>(
        path: impl AsRef<Path>,
        mover: impl FnOnce() -> T,
    ) -> Result<Self, TableError> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                info!("loading pruning table from {}", path.display());
                Self::read_from(file)
            }
            Err(e) => {
                info!(
                    "could not open {} ({e}), generating pruning table",
                    path.display()
                );
                let table = Self::generate(&mover());
                table.save(path)?;
                info!("saved pruning table to {}", path.display());
                Ok(table)
            }
        }
    }
}

impl<C: Coordinate<CubieCube>> PruningTable<C> {
    /// The number of moves needed to bring the coordinate to solved.
    pub fn distance(&self, coord: C) -> u8 {
        self.table[coord.repr()]
    }

    /// The raw table, one byte per coordinate index.
    pub fn as_bytes(&self) -> &[u8] {
        &self.table
    }

    /// Check and adopt a raw table.
    pub fn from_bytes(bytes: Box<[u8]>) -> Result<Self, TableError> {
        if bytes.len() != C::count() {
            return Err(TableError::Size {
                expected: C::count(),
                found: bytes.len(),
            });
        }
        if bytes[0] != 0 {
            return Err(TableError::Corrupt {
                index: 0,
                value: bytes[0],
            });
        }
        if let Some(index) = bytes.iter().position(|&d| d == UNVISITED) {
            return Err(TableError::Corrupt {
                index,
                value: UNVISITED,
            });
        }

        Ok(Self {
            table: bytes,
            _phantom: PhantomData,
        })
    }

    /// Read a table written by [`save`](PruningTable::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        Self::read_from(File::open(path)?)
    }

    fn read_from(mut file: File) -> Result<Self, TableError> {
        let len = file.metadata()?.len();
        if len != C::count() as u64 {
            return Err(TableError::Size {
                expected: C::count(),
                found: len as usize,
            });
        }

        let mut bytes = vec![0; C::count()];
        file.read_exact(&mut bytes)?;
        Self::from_bytes(bytes.into_boxed_slice())
    }

    /// Write the table as a flat byte stream. The bytes go to `<path>.tmp` first and are renamed
    /// into place once complete, so `path` never holds a partial table.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let tmp = tmp_path(path);

        let written = File::create(&tmp).and_then(|file| {
            let mut writer = BufWriter::new(file);
            writer.write_all(&self.table)?;
            writer.flush()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// The number of cosets at each distance from solved, indexed by distance.
    pub fn depth_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for &d in self.table.iter() {
            let d = d as usize;
            if counts.len() <= d {
                counts.resize(d + 1, 0);
            }
            counts[d] += 1;
        }
        counts
    }

    /// The mean distance over all cosets.
    pub fn average_depth(&self) -> f64 {
        let sum: u64 = self.table.iter().map(|&d| d as u64).sum();
        sum as f64 / self.table.len() as f64
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

impl<C: Coordinate<CubieCube> + Send + Sync> Heuristic for PruningTable<C> {
    fn bound(&self, cube: &CubieCube) -> usize {
        self.distance(C::from_puzzle(cube)) as usize
    }
}
