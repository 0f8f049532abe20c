//! Rectbin is a small library for packing batches of axis-aligned
//! rectangles of mixed sizes into one fixed-size bin, for things like glyph
//! caches and spritesheets. It is a pure geometric allocator: it owns no
//! pixels and performs no I/O, it only decides where each rectangle goes.
//!
//! Two strategies are exposed behind the common [`Packer`] trait:
//!
//! - [`GuillotinePacker`] keeps a list of free rectangles, places each item
//!   by best fit, and splits the consumed space with one straight cut.
//! - [`SkylinePacker`] keeps the height contour of everything placed so far
//!   and fills the lowest, narrowest gap first.
//!
//! Both are greedy: an item that fits nowhere is left in the batch for the
//! caller to retry in another bin, and nothing is ever moved after
//! placement.
//!
//! ## Example
//! ```
//! use rectbin::{GuillotinePacker, InputItem, Packer};
//!
//! // Tag each size with a key so placements can be matched back to your
//! // own objects.
//! let mut batch = vec![
//!     InputItem::new("a", (128, 64)),
//!     InputItem::new("b", (64, 64)),
//!     InputItem::new("c", (1, 300)),
//! ];
//!
//! let mut packer = GuillotinePacker::new(512, 512);
//! let placed = packer.insert(&mut batch);
//!
//! assert_eq!(placed.len(), 3);
//! assert!(batch.is_empty());
//! assert!(packer.check().is_empty());
//! ```

mod geometry;
mod guillotine;
mod packer;
mod skyline;
mod types;

pub use geometry::*;
pub use guillotine::*;
pub use packer::*;
pub use skyline::*;
pub use types::*;
