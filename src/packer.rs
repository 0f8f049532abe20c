use crate::{
    geometry::Rect,
    types::{InputItem, PlacedItem},
};

/// The interface shared by the packing strategies.
///
/// A packer owns one fixed-size bin and places rectangles into it greedily.
/// Placement failure is not an error: items that do not fit are simply left
/// in the batch, and the caller decides whether to retry them in another
/// bin. A packer never blocks and has no internal concurrency; `&mut self`
/// on the placing operations enforces single-writer access.
pub trait Packer {
    /// Place as many items from `batch` as possible.
    ///
    /// Placed items are removed from `batch` and returned, annotated with
    /// their assigned position, in the order they were placed. Items that
    /// did not fit stay in `batch` in their original order. Zero-area items
    /// are never placeable and are never consumed.
    fn insert<K>(&mut self, batch: &mut Vec<InputItem<K>>) -> Vec<PlacedItem<K>>;

    /// The bin's `(width, height)`, fixed at construction.
    fn size(&self) -> (u32, u32);

    /// The geometry of every item placed so far, in placement order. The
    /// list only ever grows; there is no unpack operation.
    fn placed(&self) -> &[Rect];

    /// Place a single item, returning `None` if it did not fit.
    fn pack<K>(&mut self, item: InputItem<K>) -> Option<PlacedItem<K>> {
        let mut batch = vec![item];
        self.insert(&mut batch).pop()
    }

    /// Used area over total bin area, as a fraction in `[0, 1]`. A
    /// degenerate zero-area bin reports `0.0`.
    fn occupancy(&self) -> f32 {
        let (width, height) = self.size();
        let total = f64::from(width) * f64::from(height);

        if total == 0.0 {
            return 0.0;
        }

        let used: u64 = self.placed().iter().map(|r| u64::from(r.area())).sum();

        (used as f64 / total) as f32
    }
}
