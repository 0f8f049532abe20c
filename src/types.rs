use crate::geometry::Rect;

/// An input to the rectangle packing routines.
///
/// `InputItem` is a 2D size plus a caller-supplied key. The key is never
/// interpreted by the packers; it comes back unchanged on the matching
/// [`PlacedItem`], letting the caller correlate placements with its own
/// objects, like glyphs or texture tiles.
#[derive(Debug, Clone, Copy)]
pub struct InputItem<K> {
    pub(crate) key: K,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl<K> InputItem<K> {
    #[inline]
    pub fn new(key: K, size: (u32, u32)) -> Self {
        Self {
            key,
            width: size.0,
            height: size.1,
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The item's extents as a rectangle at the origin, for the geometry
    /// predicates.
    pub(crate) fn rect(&self) -> Rect {
        Rect::from_size((self.width, self.height))
    }

    pub(crate) fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// An item that was placed by a packer.
///
/// `PlacedItem` corresponds 1:1 to the `InputItem` it consumed and carries
/// the input's key along with the assigned position.
#[derive(Debug, Clone, Copy)]
pub struct PlacedItem<K> {
    pub(crate) key: K,
    pub(crate) rect: Rect,
}

impl<K> PlacedItem<K> {
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        (self.rect.x, self.rect.y)
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.rect.width, self.rect.height)
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.position()
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.rect.x + self.rect.width, self.rect.y + self.rect.height)
    }
}
