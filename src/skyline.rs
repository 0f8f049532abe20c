use log::trace;

use crate::{
    geometry::Rect,
    guillotine::GuillotinePacker,
    packer::Packer,
    types::{InputItem, PlacedItem},
};

/// One horizontal run of the skyline contour.
///
/// The segment covers `[x, x + width)` at floor height `y`: everything
/// below `y` in that x-range is already spoken for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

/// A packer that tracks occupied space as a height contour across the bin.
///
/// Items are placed with the bottom-left rule: the position yielding the
/// lowest resulting top edge wins, ties broken by the narrower segment. The
/// contour's segments are kept contiguous, ordered by `x`, covering the
/// whole bin width, with no two neighbors at equal height.
///
/// Space that vanishes under a placed item (gaps below the new level) is
/// normally lost. With [`use_wastemap`](Self::use_wastemap) those gaps are
/// handed to an embedded guillotine packer instead and offered to later
/// items first.
pub struct SkylinePacker {
    width: u32,
    height: u32,

    placed: Vec<Rect>,
    skyline: Vec<Segment>,

    wastemap: Option<GuillotinePacker>,
}

impl SkylinePacker {
    /// A packer for a `width` by `height` bin with an empty contour and no
    /// waste map.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            placed: Vec::new(),
            skyline: vec![Segment { x: 0, y: 0, width }],
            wastemap: None,
        }
    }

    /// Enable or disable recycling of shadowed gaps through an embedded
    /// guillotine packer.
    pub fn use_wastemap(mut self, enabled: bool) -> Self {
        self.wastemap = if enabled {
            Some(GuillotinePacker::empty(self.width, self.height))
        } else {
            None
        };
        self
    }

    /// The current contour, ordered by ascending `x`, for diagnostics or
    /// visualization.
    pub fn skyline(&self) -> &[Segment] {
        &self.skyline
    }

    /// The `y` at which an item of the given size would rest when its left
    /// edge starts at segment `index`, or `None` if it cannot fit there.
    fn fit_at(&self, size: (u32, u32), index: usize) -> Option<u32> {
        let (width, height) = size;

        if u64::from(self.skyline[index].x) + u64::from(width) > u64::from(self.width) {
            return None;
        }

        // The item spans every segment under its width; it rests on the
        // tallest of them.
        let mut y = 0;
        let mut remaining = i64::from(width);
        let mut i = index;

        while remaining > 0 {
            let seg = &self.skyline[i];
            y = y.max(seg.y);

            if u64::from(y) + u64::from(height) > u64::from(self.height) {
                return None;
            }

            remaining -= i64::from(seg.width);
            i += 1;
        }

        Some(y)
    }

    /// The bottom-left choice across the whole batch: the `(batch index,
    /// segment index, y)` whose `(top edge, segment width)` is the
    /// lexicographic minimum.
    fn best_level<K>(&self, batch: &[InputItem<K>]) -> Option<(usize, usize, u32)> {
        let mut best = None;
        let mut best_score = (u32::MAX, u32::MAX);

        for (idx, item) in batch.iter().enumerate() {
            if !item.has_area() {
                continue;
            }

            for (pos, seg) in self.skyline.iter().enumerate() {
                if let Some(y) = self.fit_at(item.size(), pos) {
                    let score = (y + item.height, seg.width);

                    // Strictly-better only, so the leftmost candidate wins
                    // ties.
                    if score < best_score {
                        best_score = score;
                        best = Some((idx, pos, y));
                    }
                }
            }
        }

        best
    }

    /// Hand every gap between the contour and the underside of `rect` to
    /// the waste map.
    fn harvest_waste(&mut self, rect: &Rect, pos: usize) {
        let wastemap = match self.wastemap.as_mut() {
            Some(wm) => wm,
            None => return,
        };

        let right = rect.x + rect.width;

        for seg in &self.skyline[pos..] {
            if seg.x >= right {
                break;
            }

            let end = right.min(seg.x + seg.width);

            if seg.y < rect.y && end > seg.x {
                wastemap.add_free(Rect::new(seg.x, seg.y, end - seg.x, rect.y - seg.y));
            }
        }

        wastemap.merge_free_pass();
    }

    /// Raise the contour for a placement: insert the new level at `pos`,
    /// then shrink or drop the segments it shadows and collapse equal-height
    /// neighbors.
    fn add_level(&mut self, rect: &Rect, pos: usize) {
        self.harvest_waste(rect, pos);

        let level = Segment {
            x: rect.x,
            y: rect.y + rect.height,
            width: rect.width,
        };
        self.skyline.insert(pos, level);

        // Walk the segments to the right of the new level. Removal keeps
        // the index in place: the next candidate slides into it.
        let mut i = pos + 1;
        while i < self.skyline.len() {
            let covered_to = self.skyline[i - 1].x + self.skyline[i - 1].width;
            let seg = self.skyline[i];

            if seg.x >= covered_to {
                break;
            }

            let shrink = covered_to - seg.x;
            if seg.width > shrink {
                self.skyline[i].x += shrink;
                self.skyline[i].width -= shrink;
                break;
            }

            self.skyline.remove(i);
        }

        // Collapse runs of equal height into single segments.
        let mut i = 0;
        while i + 1 < self.skyline.len() {
            if self.skyline[i].y == self.skyline[i + 1].y {
                self.skyline[i].width += self.skyline[i + 1].width;
                self.skyline.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

impl Packer for SkylinePacker {
    fn insert<K>(&mut self, batch: &mut Vec<InputItem<K>>) -> Vec<PlacedItem<K>> {
        trace!(
            "skyline: packing {} items into {}x{} bin",
            batch.len(),
            self.width,
            self.height
        );

        let mut out = Vec::with_capacity(batch.len());

        while !batch.is_empty() {
            // Scraps recovered from under earlier placements get first
            // refusal.
            if let Some(wastemap) = self.wastemap.as_mut() {
                if let Some((pos, idx)) = wastemap.best_pair(batch) {
                    let item = batch.remove(idx);
                    let placement = wastemap.place_at(pos, item);

                    trace!(
                        "skyline: {}x{} recovered from waste at ({}, {})",
                        placement.rect.width,
                        placement.rect.height,
                        placement.rect.x,
                        placement.rect.y
                    );

                    self.placed.push(placement.rect);
                    out.push(placement);
                    continue;
                }
            }

            let (idx, pos, y) = match self.best_level(batch) {
                Some(best) => best,
                None => break,
            };

            let item = batch.remove(idx);
            let rect = Rect::new(self.skyline[pos].x, y, item.width, item.height);

            trace!(
                "skyline: {}x{} placed at ({}, {})",
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );

            self.add_level(&rect, pos);
            self.placed.push(rect);

            out.push(PlacedItem {
                key: item.key,
                rect,
            });
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
