//! Rectangle type and the pure geometric operations the packers are built
//! on: fit tests, intersection, border merging, and the guillotine split.

/// An axis-aligned rectangle with unsigned integer coordinates.
///
/// Depending on context a `Rect` is a placed item, a free region tracked by
/// the guillotine packer, or an overlap reported by a consistency check. The
/// origin is the bin's top-left corner; only relative comparisons matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Check if the point `p` lies within the segment starting at `s` with
/// length `l`, endpoints included.
fn segment_contains(s: u32, l: u32, p: u32) -> bool {
    p >= s && p <= s + l
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size placed at the origin.
    pub fn from_size(size: (u32, u32)) -> Self {
        Self::new(0, 0, size.0, size.1)
    }

    /// True iff both extents are positive. Zero-area rectangles can never be
    /// occupied and are discarded right after a split.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Extents match; position is ignored.
    pub fn size_eq(&self, other: &Rect) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// True iff `inner` fits inside `self`, ignoring positions.
    pub fn can_fit(&self, inner: &Rect) -> bool {
        self.height >= inner.height && self.width >= inner.width
    }

    /// The overlap of two rectangles, or `None` if they are disjoint.
    /// Rectangles that merely share an edge do not intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let right = (self.x + self.width).min(other.x + other.width);

        let bottom = self.y.max(other.y);
        let top = (self.y + self.height).min(other.y + other.height);

        if right > left && top > bottom {
            Some(Rect::new(left, bottom, right - left, top - bottom))
        } else {
            None
        }
    }

    /// Merge two rectangles into their exact union.
    ///
    /// This succeeds only when the two have the same height and `y` and
    /// their x-spans touch or overlap, or symmetrically the same width and
    /// `x` with touching/overlapping y-spans. Diagonal or partial-edge
    /// adjacency never merges.
    pub fn merge(&self, other: &Rect) -> Option<Rect> {
        if self.height == other.height
            && self.y == other.y
            && (segment_contains(self.x, self.width, other.x)
                || segment_contains(other.x, other.width, self.x))
        {
            let x = self.x.min(other.x);
            let right = (self.x + self.width).max(other.x + other.width);

            Some(Rect::new(x, self.y, right - x, self.height))
        } else if self.width == other.width
            && self.x == other.x
            && (segment_contains(self.y, self.height, other.y)
                || segment_contains(other.y, other.height, self.y))
        {
            let y = self.y.min(other.y);
            let top = (self.y + self.height).max(other.y + other.height);

            Some(Rect::new(self.x, y, self.width, top - y))
        } else {
            None
        }
    }
}

/// How a guillotine cut divides the leftover space after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// Cut so that the larger of the two leftover pieces is as large as
    /// possible.
    MaximizeArea,
    /// Cut so that the larger leftover piece is as small as possible.
    MinimizeArea,
}

impl Default for SplitMethod {
    fn default() -> Self {
        SplitMethod::MaximizeArea
    }
}

/// Split the space left in `origin` after placing `used` at its corner with
/// one full-length straight cut.
///
/// ```text
///  origin:
///   ______________
///  |      .       |
///  |  lt  .   ?   |
///  |      .       |
///  |------........| <- horizontal cut
///  | used |  rb   |
///  |______________|
///         ^- vertical cut
/// ```
///
/// The corner area `?` belongs to `lt` when the cut is horizontal and to
/// `rb` otherwise; `method` decides the direction. Either piece may come
/// back with a zero extent; callers drop those with [`Rect::has_area`].
///
/// `used` must fit inside `origin`.
pub fn guillotine_split(origin: &Rect, used: &Rect, method: SplitMethod) -> (Rect, Rect) {
    let w = origin.width - used.width;
    let h = origin.height - used.height;

    // Compare the two candidate cut directions by the area of the piece
    // adjacent to `used` in each: used.width * h below the horizontal cut
    // against w * used.height left of the vertical one.
    let adjacent_h = u64::from(used.width) * u64::from(h);
    let adjacent_v = u64::from(w) * u64::from(used.height);

    let horizontal = match method {
        SplitMethod::MaximizeArea => adjacent_h <= adjacent_v,
        SplitMethod::MinimizeArea => adjacent_h > adjacent_v,
    };

    let mut lt = Rect::new(origin.x, origin.y + used.height, 0, h);
    let mut rb = Rect::new(origin.x + used.width, origin.y, w, 0);

    if horizontal {
        lt.width = origin.width;
        rb.height = used.height;
    } else {
        lt.width = used.width;
        rb.height = origin.height;
    }

    (lt, rb)
}

/// Scoring rule used by the guillotine packer to pick a free rectangle for
/// an item. Scores are only comparable within one packer's run using one
/// fixed method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMethod {
    /// Prefer the free rectangle with the least leftover area.
    AreaBest,
    /// Prefer the free rectangle with the most leftover area.
    AreaWorst,
    /// Prefer the smallest leftover extent across both axes.
    ShortSideBest,
    ShortSideWorst,
    /// Prefer the smallest of the larger per-axis leftovers.
    LongSideBest,
    LongSideWorst,
}

impl FitMethod {
    fn is_best(self) -> bool {
        match self {
            FitMethod::AreaBest | FitMethod::ShortSideBest | FitMethod::LongSideBest => true,
            FitMethod::AreaWorst | FitMethod::ShortSideWorst | FitMethod::LongSideWorst => false,
        }
    }
}

impl Default for FitMethod {
    fn default() -> Self {
        FitMethod::AreaBest
    }
}

/// Score how well `inner` fits into `outer` under the given method; lower is
/// better. Every `*Worst` variant is the sign-flipped score of its `*Best`
/// counterpart.
///
/// Assumes `outer.can_fit(inner)`.
pub fn fit_score(outer: &Rect, inner: &Rect, method: FitMethod) -> i64 {
    let score = match method {
        FitMethod::AreaBest | FitMethod::AreaWorst => {
            i64::from(outer.area()) - i64::from(inner.area())
        }

        _ => {
            let dw = (i64::from(outer.width) - i64::from(inner.width)).abs();
            let dh = (i64::from(outer.height) - i64::from(inner.height)).abs();

            match method {
                FitMethod::ShortSideBest | FitMethod::ShortSideWorst => dw.min(dh),
                _ => dw.max(dh),
            }
        }
    };

    if method.is_best() {
        score
    } else {
        -score
    }
}
