use super::*;

fn panel() -> Canvas {
    Canvas {
        width: 832,
        height: 1152,
    }
}

#[test]
fn rotation_order_is_fixed() {
    assert_eq!(Corner::for_turn(0), Corner::TopRight);
    assert_eq!(Corner::for_turn(1), Corner::TopLeft);
    assert_eq!(Corner::for_turn(2), Corner::BottomLeft);
    assert_eq!(Corner::for_turn(3), Corner::BottomRight);
    assert_eq!(Corner::for_turn(4), Corner::TopRight);
}

#[test]
fn slots_repeat_with_period_four() {
    let alloc = SlotAllocator::new(panel(), 28.0);
    for i in 0..16 {
        assert_eq!(alloc.allocate(i), alloc.allocate(i + 4));
    }
    for i in 0..4 {
        for j in 0..4 {
            if i != j {
                assert_ne!(alloc.allocate(i), alloc.allocate(j));
            }
        }
    }
}

#[test]
fn slot_geometry_is_relative_to_panel() {
    let alloc = SlotAllocator::new(panel(), 25.0);
    let pad = 832.0 * PADDING_FRACTION;
    let col = 832.0 * COLUMN_WIDTH_FRACTION;

    let tr = alloc.allocate(0);
    assert!((tr.width - col).abs() < 1e-9);
    assert!((tr.height - 100.0).abs() < 1e-9);
    assert!((tr.x + tr.width - (832.0 - pad)).abs() < 1e-9);
    assert!((tr.y - pad).abs() < 1e-9);

    let tl = alloc.allocate(1);
    assert!((tl.x - pad).abs() < 1e-9);
    assert_eq!(tl.y, tr.y);

    let bl = alloc.allocate(2);
    assert_eq!(bl.x, tl.x);
    assert!((bl.y + bl.height - (1152.0 - pad)).abs() < 1e-9);

    let br = alloc.allocate(3);
    assert_eq!(br.x, tr.x);
    assert_eq!(br.y, bl.y);
}

#[test]
fn slots_stay_inside_panel() {
    for (w, h, lh) in [(832, 1152, 28.0), (64, 48, 30.0), (1536, 1024, 40.0)] {
        let alloc = SlotAllocator::new(Canvas { width: w, height: h }, lh);
        for s in alloc.slots() {
            assert!(s.x >= 0.0 && s.y >= 0.0);
            assert!(s.x + s.width <= f64::from(w) + 1e-9);
        }
    }
}

#[test]
fn free_allocate_matches_allocator() {
    let alloc = SlotAllocator::new(panel(), 28.0);
    for i in 0..9 {
        assert_eq!(allocate(panel(), 28.0, i), alloc.allocate(i));
    }
}
