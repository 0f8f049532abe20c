use log::{debug, trace};

use crate::{
    geometry::{fit_score, guillotine_split, FitMethod, Rect, SplitMethod},
    packer::Packer,
    types::{InputItem, PlacedItem},
};

/// A packer that tracks unoccupied space as a list of free rectangles.
///
/// Items are placed into the best-fitting free rectangle under the
/// configured [`FitMethod`]; the consumed free rectangle is then divided by
/// a single full-length cut ([`guillotine_split`]) and the leftover pieces
/// go back on the free list. The free rectangles are pairwise disjoint and,
/// together with the placed rectangles, always tile the whole bin exactly.
///
/// ## Example
/// ```
/// use rectbin::{GuillotinePacker, InputItem, Packer};
///
/// let mut batch = vec![
///     InputItem::new("glyph-a", (128, 64)),
///     InputItem::new("glyph-b", (64, 64)),
/// ];
///
/// let mut packer = GuillotinePacker::new(512, 512);
/// let placed = packer.insert(&mut batch);
///
/// assert_eq!(placed.len(), 2);
/// assert!(batch.is_empty());
/// ```
pub struct GuillotinePacker {
    width: u32,
    height: u32,

    placed: Vec<Rect>,
    free: Vec<Rect>,

    fit_method: FitMethod,
    split_method: SplitMethod,
    merge_free: bool,
}

impl GuillotinePacker {
    /// A packer for a `width` by `height` bin, with best-area fit,
    /// maximize-area splits, and free-list merging enabled.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            placed: Vec::new(),
            free: vec![Rect::new(0, 0, width, height)],
            fit_method: FitMethod::default(),
            split_method: SplitMethod::default(),
            merge_free: true,
        }
    }

    /// A packer whose free list starts out empty instead of covering the
    /// bin. Used as the skyline packer's waste map: it only ever manages
    /// the scraps handed to it.
    pub(crate) fn empty(width: u32, height: u32) -> Self {
        Self {
            free: Vec::new(),
            ..Self::new(width, height)
        }
    }

    pub fn fit_method(mut self, method: FitMethod) -> Self {
        self.fit_method = method;
        self
    }

    pub fn split_method(mut self, method: SplitMethod) -> Self {
        self.split_method = method;
        self
    }

    /// Whether to coalesce bordering free rectangles after each placement.
    pub fn merge_free(mut self, merge: bool) -> Self {
        self.merge_free = merge;
        self
    }

    /// The current free rectangles, for diagnostics or visualization. Order
    /// is unspecified.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Verify the tiling invariant: every pairwise intersection between
    /// free and placed rectangles is returned, so an empty result means the
    /// bin state is consistent. O(n²); meant for tests and debugging, never
    /// called during insertion.
    pub fn check(&self) -> Vec<Rect> {
        let all: Vec<Rect> = self
            .free
            .iter()
            .chain(self.placed.iter())
            .copied()
            .collect();

        let mut bad = Vec::new();

        for i in 0..all.len() {
            for k in (i + 1)..all.len() {
                if let Some(overlap) = all[i].intersection(&all[k]) {
                    // Keep going to find all errors.
                    bad.push(overlap);
                }
            }
        }

        bad
    }

    pub(crate) fn add_free(&mut self, rect: Rect) {
        if rect.has_area() {
            self.free.push(rect);
        }
    }

    /// Find the `(free index, batch index)` pair with the lowest fit score.
    ///
    /// A pair with exactly equal dimensions is unbeatable and short-circuits
    /// the scan regardless of the fit method.
    pub(crate) fn best_pair<K>(&self, batch: &[InputItem<K>]) -> Option<(usize, usize)> {
        let mut best = None;
        let mut best_score = i64::MAX;

        'free: for (pos, free) in self.free.iter().enumerate() {
            for (idx, item) in batch.iter().enumerate() {
                if !item.has_area() {
                    continue;
                }

                let wanted = item.rect();

                if free.size_eq(&wanted) {
                    best = Some((pos, idx));
                    break 'free;
                }

                if free.can_fit(&wanted) {
                    let score = fit_score(free, &wanted, self.fit_method);

                    if score < best_score {
                        best = Some((pos, idx));
                        best_score = score;
                    }
                }
            }
        }

        best
    }

    /// Place `item` at the origin of the free rectangle at `pos`, splitting
    /// the leftover space back onto the free list.
    ///
    /// `pos` must come from [`best_pair`](Self::best_pair), which guarantees
    /// the item fits.
    pub(crate) fn place_at<K>(&mut self, pos: usize, item: InputItem<K>) -> PlacedItem<K> {
        let slot = self.free[pos];
        let rect = Rect::new(slot.x, slot.y, item.width, item.height);

        trace!(
            "guillotine: {}x{} placed at ({}, {})",
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );

        let (lt, rb) = guillotine_split(&slot, &rect, self.split_method);

        // The scan restarts from scratch on the next placement, so the
        // reordering from swap_remove is harmless here.
        self.free.swap_remove(pos);
        self.add_free(lt);
        self.add_free(rb);

        if self.merge_free {
            let merged = self.merge_free_pass();
            debug!("guillotine: merged {} free rects", merged);
        }

        self.placed.push(rect);

        PlacedItem {
            key: item.key,
            rect,
        }
    }

    /// One coalescing pass over the free list.
    ///
    /// For each pair, a successful merge overwrites the first element with
    /// the union and swap-removes the second. The inner index is then
    /// re-tested without advancing: it now holds the swapped-in element, and
    /// the grown union may merge again with later rectangles.
    pub(crate) fn merge_free_pass(&mut self) -> usize {
        let mut merged = 0;

        let mut i = 0;
        while i < self.free.len() {
            let mut k = i + 1;
            while k < self.free.len() {
                if let Some(union) = self.free[i].merge(&self.free[k]) {
                    self.free[i] = union;
                    self.free.swap_remove(k);
                    merged += 1;
                } else {
                    k += 1;
                }
            }
            i += 1;
        }

        merged
    }
}

impl Packer for GuillotinePacker {
    fn insert<K>(&mut self, batch: &mut Vec<InputItem<K>>) -> Vec<PlacedItem<K>> {
        trace!(
            "guillotine: packing {} items into {}x{} bin",
            batch.len(),
            self.width,
            self.height
        );

        let mut out = Vec::with_capacity(batch.len());

        while !batch.is_empty() {
            let (pos, idx) = match self.best_pair(batch) {
                Some(pair) => pair,
                None => break,
            };

            let item = batch.remove(idx);
            out.push(self.place_at(pos, item));
        }

        out
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn placed(&self) -> &[Rect] {
        &self.placed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_item() {
        let mut packer = GuillotinePacker::new(100, 100);

        let placed = packer.pack(InputItem::new((), (20, 50))).unwrap();
        assert_eq!(placed.position(), (0, 0));
        assert_eq!(placed.size(), (20, 50));

        let free_area: u32 = packer.free_rects().iter().map(Rect::area).sum();
        assert_eq!(free_area, 10_000 - 1_000);
        assert!(packer.check().is_empty());
    }

    #[test]
    fn batch_fills_without_overlap() {
        let mut packer = GuillotinePacker::new(64, 64);
        let mut batch = vec![
            InputItem::new(0u32, (32, 32)),
            InputItem::new(1, (32, 32)),
            InputItem::new(2, (16, 48)),
            InputItem::new(3, (48, 16)),
            InputItem::new(4, (7, 9)),
            InputItem::new(5, (21, 13)),
            InputItem::new(6, (3, 31)),
        ];

        let placed = packer.insert(&mut batch);

        assert!(placed.len() + batch.len() == 7);
        assert!(packer.check().is_empty());

        // Free and placed area still tile the bin.
        let free_area: u64 = packer.free_rects().iter().map(|r| u64::from(r.area())).sum();
        let used_area: u64 = packer.placed().iter().map(|r| u64::from(r.area())).sum();
        assert_eq!(free_area + used_area, 64 * 64);
    }

    #[test]
    fn exact_fit_beats_fit_method() {
        // Worst-area fit scores the roomy rectangle at the front of the
        // free list far better, but the exact dimension match behind it
        // still wins.
        let mut packer = GuillotinePacker::empty(200, 200).fit_method(FitMethod::AreaWorst);
        packer.add_free(Rect::new(0, 0, 140, 200));
        packer.add_free(Rect::new(140, 0, 60, 60));

        let placed = packer.pack(InputItem::new((), (60, 60))).unwrap();
        assert_eq!(placed.position(), (140, 0));
    }

    #[test]
    fn exact_fit_consumes_whole_free_rect() {
        let mut packer = GuillotinePacker::new(100, 100).merge_free(false);

        packer.pack(InputItem::new((), (60, 40))).unwrap();
        // Free list now holds a 60x60 and a 40x100 rectangle.

        let placed = packer.pack(InputItem::new((), (60, 60))).unwrap();
        assert_eq!(placed.position(), (0, 40));
        assert_eq!(packer.free_rects(), &[Rect::new(60, 0, 40, 100)]);
        assert!(packer.check().is_empty());
    }

    #[test]
    fn too_large_items_left_unconsumed() {
        let mut packer = GuillotinePacker::new(10, 10);
        let mut batch = vec![
            InputItem::new("wide", (11, 1)),
            InputItem::new("tall", (1, 11)),
        ];

        let placed = packer.insert(&mut batch);

        assert!(placed.is_empty());
        assert_eq!(batch.len(), 2);
        // Order of the leftovers is preserved.
        assert_eq!(*batch[0].key(), "wide");
        assert_eq!(*batch[1].key(), "tall");
    }

    #[test]
    fn zero_area_items_never_consumed() {
        let mut packer = GuillotinePacker::new(10, 10);
        let mut batch = vec![
            InputItem::new("empty", (0, 5)),
            InputItem::new("real", (5, 5)),
        ];

        let placed = packer.insert(&mut batch);

        assert_eq!(placed.len(), 1);
        assert_eq!(*placed[0].key(), "real");
        assert_eq!(batch.len(), 1);
        assert_eq!(*batch[0].key(), "empty");
    }

    #[test]
    fn occupancy_ratio() {
        let mut packer = GuillotinePacker::new(100, 100);
        assert_eq!(packer.occupancy(), 0.0);

        packer.pack(InputItem::new((), (20, 50))).unwrap();
        assert!((packer.occupancy() - 0.1).abs() < 1e-6);

        let degenerate = GuillotinePacker::new(0, 10);
        assert_eq!(degenerate.occupancy(), 0.0);
    }

    #[test]
    fn merge_pass_coalesces_strips() {
        let mut packer = GuillotinePacker::empty(100, 100);
        packer.add_free(Rect::new(0, 0, 20, 100));
        packer.add_free(Rect::new(20, 0, 30, 100));
        packer.add_free(Rect::new(50, 0, 50, 100));

        // One pass folds the whole chain: the first merge grows the union,
        // which then absorbs the last strip at the same inner index.
        assert_eq!(packer.merge_free_pass(), 2);
        assert_eq!(packer.free_rects(), &[Rect::new(0, 0, 100, 100)]);
    }

    #[test]
    fn merge_pass_ignores_misaligned_rects() {
        let mut packer = GuillotinePacker::empty(100, 100);
        packer.add_free(Rect::new(0, 50, 100, 50));
        packer.add_free(Rect::new(20, 0, 80, 50));

        assert_eq!(packer.merge_free_pass(), 0);
        assert_eq!(packer.free_rects().len(), 2);
    }

    #[test]
    fn check_reports_overlaps() {
        let mut packer = GuillotinePacker::empty(100, 100);
        packer.add_free(Rect::new(0, 0, 60, 60));
        packer.add_free(Rect::new(50, 50, 50, 50));

        let bad = packer.check();
        assert_eq!(bad, vec![Rect::new(50, 50, 10, 10)]);
    }

    #[test]
    fn exhausts_bin_and_reports_partial_result() {
        let mut packer = GuillotinePacker::new(10, 10);
        let mut batch: Vec<_> = (0..5).map(|i| InputItem::new(i, (6, 6))).collect();

        let placed = packer.insert(&mut batch);

        // Only one 6x6 fits; no leftover region can hold another.
        assert_eq!(placed.len(), 1);
        assert_eq!(batch.len(), 4);
        assert!(packer.check().is_empty());
    }
}
