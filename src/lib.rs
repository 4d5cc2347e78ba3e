//! Label points for polygon datasets.
//!
//! Each polygon gets one point strictly inside its filled area, found by
//! sampling horizontal scan-lines and taking the midpoint of the longest
//! chord that lies inside the polygon and outside its holes.

pub mod chord;
pub mod constants;
pub mod error;
pub mod geo;
pub mod orientation;
pub mod parse;
pub mod processor;
pub mod reader;
pub mod scanline;
pub mod shape;
pub mod writer;
