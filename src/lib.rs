//! cubit is a 3x3x3 packing-puzzle engine with a built-in software
//! renderer. Players place a fixed sequence of polycube tiles into a
//! cubic grid; tiles drop along one axis, and the game is won when the
//! grid is packed full and lost when the remaining tile no longer fits.
//!
//! The grid is a 27-bit integer and all placement and rotation search is
//! bit algebra on it. Rendering draws depth-tested quads onto an 84x48
//! monochrome surface with no graphics dependencies, matching the small
//! LCD the game targets.

pub mod display;
pub mod grid;
pub mod levels;
pub mod math;
pub mod mesh;
pub mod raster;
pub mod scene;
pub mod search;
pub mod session;
pub mod tile;
