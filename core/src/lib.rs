//! This crate implements the core data model for a sprig repository:
//! content-addressed objects, the commit graph, the staging area, and the
//! operations (commit, checkout, merge, and friends) that tie them together.
//!
//! Storage is abstracted behind the [`store::ObjectStore`],
//! [`work_tree::WorkTree`], and [`state::StateStore`] traits. See the
//! `sprig_on_disk` crate for the file-system implementation.

#![deny(warnings)]

pub mod graph;
pub mod memory;
pub mod object;
pub mod path;
pub mod repo;
pub mod state;
pub mod store;
pub mod work_tree;
