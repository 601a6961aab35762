//! A 3x3x3 cube library which finds bounded length solutions with iterative deepening A*, pruned by
//! a pattern database over the corner subgroup.
//!
//! The pieces, leaf first:
//! - [`cube333::CubieCube`] is the state model and the group action of face turns on it.
//! - [`cube333::coordcube`] projects a state onto coset coordinates.
//! - [`cube333::solver::move_tables`] precomputes coordinate transitions for every move.
//! - [`cube333::solver::prune`] tabulates the distance of every corner coset from solved.
//! - [`cube333::solver::Solver`] runs the search.

#![deny(missing_docs)]

pub mod coord;
pub mod cube333;
pub mod error;
pub mod moves;
