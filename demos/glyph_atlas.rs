use rectbin::{GuillotinePacker, InputItem, Packer, SkylinePacker};

// Ink extents of a small pseudo glyph set, padded by one pixel.
const GLYPH_SIZES: &[(u32, u32)] = &[
    (10, 14),
    (8, 14),
    (9, 10),
    (3, 14),
    (7, 10),
    (12, 10),
    (6, 18),
    (11, 14),
    (4, 4),
    (9, 13),
    (10, 10),
    (5, 12),
    (8, 8),
    (13, 14),
];

fn batch() -> Vec<InputItem<usize>> {
    GLYPH_SIZES
        .iter()
        .enumerate()
        .map(|(glyph, &size)| InputItem::new(glyph, size))
        .collect()
}

fn main() {
    env_logger::init();

    let mut remaining = batch();
    let mut guillotine = GuillotinePacker::new(64, 64);
    let placed = guillotine.insert(&mut remaining);

    println!(
        "guillotine: {} placed, {} left over, occupancy {:.3}",
        placed.len(),
        remaining.len(),
        guillotine.occupancy()
    );
    for item in &placed {
        println!("  glyph {:2} -> {:?}", item.key(), item.position());
    }

    let mut remaining = batch();
    let mut skyline = SkylinePacker::new(64, 64).use_wastemap(true);
    let placed = skyline.insert(&mut remaining);

    println!(
        "skyline: {} placed, {} left over, occupancy {:.3}",
        placed.len(),
        remaining.len(),
        skyline.occupancy()
    );
    for item in &placed {
        println!("  glyph {:2} -> {:?}", item.key(), item.position());
    }
}
