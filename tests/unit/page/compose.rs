use super::*;

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RasterImage {
    RasterImage::from_pixel(w, h, image::Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[test]
fn default_slots_match_fixed_grid() {
    let slots = PageLayout::default().slots();
    assert_eq!(slots[0], PixelRect::from_corners(0, 0, 766, 1024));
    assert_eq!(slots[1], PixelRect::from_corners(770, 0, 1534, 510));
    assert_eq!(slots[2], PixelRect::from_corners(770, 514, 1534, 1022));
    assert_eq!((slots[0].width, slots[0].height), (766, 1024));
}

#[test]
fn slots_scale_with_canvas() {
    let layout = PageLayout::new(Canvas {
        width: 800,
        height: 600,
    })
    .with_gutter(0);
    let slots = layout.slots();
    assert_eq!(slots[0], PixelRect::from_corners(0, 0, 400, 600));
    assert_eq!(slots[1], PixelRect::from_corners(400, 0, 800, 300));
    assert_eq!(slots[2], PixelRect::from_corners(400, 300, 800, 600));
}

#[test]
fn images_fill_their_slots_exactly() {
    let images = vec![
        solid(832, 1152, [255, 0, 0]),
        solid(832, 1152, [0, 255, 0]),
        solid(832, 1152, [0, 0, 255]),
    ];
    let out = compose_page(&images, DEFAULT_PAGE_SIZE).unwrap();
    assert_eq!(out.image.dimensions(), (1536, 1024));
    assert_eq!((out.placed, out.dropped), (3, 0));

    let slots = PageLayout::default().slots();
    for (slot, color) in slots.iter().zip([[255, 0, 0], [0, 255, 0], [0, 0, 255]]) {
        for (x, y) in [
            (slot.x, slot.y),
            (slot.x + slot.width - 1, slot.y + slot.height - 1),
            (slot.x + slot.width / 2, slot.y + slot.height / 2),
        ] {
            assert_eq!(out.image.get_pixel(x, y).0, [color[0], color[1], color[2], 255]);
        }
    }
    // Gutter between left and right columns keeps the background.
    assert_eq!(out.image.get_pixel(767, 10).0, [250, 250, 250, 255]);
    assert_eq!(out.image.get_pixel(1535, 10).0, [250, 250, 250, 255]);
}

#[test]
fn extra_images_are_dropped_and_counted() {
    let images: Vec<_> = (0..5u8).map(|i| solid(10, 10, [i * 40, 0, 0])).collect();
    let out = compose_page(&images, DEFAULT_PAGE_SIZE).unwrap();
    assert_eq!(out.placed, 3);
    assert_eq!(out.dropped, 2);
    assert_eq!(out.image.get_pixel(1000, 800).0, [80, 0, 0, 255]);
}

#[test]
fn missing_images_leave_background() {
    let out = compose_page(&[solid(50, 50, [9, 9, 9])], DEFAULT_PAGE_SIZE).unwrap();
    assert_eq!((out.placed, out.dropped), (1, 0));
    assert_eq!(out.image.get_pixel(100, 100).0, [9, 9, 9, 255]);
    for slot in &PageLayout::default().slots()[1..] {
        for y in slot.y..slot.y + slot.height {
            for x in slot.x..slot.x + slot.width {
                assert_eq!(out.image.get_pixel(x, y).0, [250, 250, 250, 255]);
            }
        }
    }

    let empty = compose_page(&[], DEFAULT_PAGE_SIZE).unwrap();
    assert_eq!(empty.placed, 0);
    assert!(empty.image.pixels().all(|p| p.0 == [250, 250, 250, 255]));
}

#[test]
fn source_alpha_is_discarded() {
    let img = RasterImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 0]));
    let out = compose_page(&[img], DEFAULT_PAGE_SIZE).unwrap();
    assert_eq!(out.image.get_pixel(5, 5).0, [10, 20, 30, 255]);
}

#[test]
fn custom_background_and_invalid_layouts() {
    let layout = PageLayout::new(Canvas {
        width: 40,
        height: 20,
    })
    .with_background(Rgba8::opaque(1, 2, 3));
    let out = PageCompositor::new(layout).compose(&[]).unwrap();
    assert_eq!(out.image.get_pixel(0, 0).0, [1, 2, 3, 255]);

    let zero = PageLayout::new(Canvas {
        width: 0,
        height: 10,
    });
    assert!(PageCompositor::new(zero).compose(&[]).is_err());

    let crowded = PageLayout::new(Canvas {
        width: 40,
        height: 20,
    })
    .with_gutter(20);
    let err = PageCompositor::new(crowded).compose(&[]).unwrap_err();
    assert!(matches!(err, InkError::Validation(_)));
}

#[test]
fn huge_gutter_is_rejected_not_overflowed() {
    let layout = PageLayout::default().with_gutter(u32::MAX);
    let slots = layout.slots();
    assert!(slots.iter().all(|s| s.is_empty()));
    let err = layout.validate().unwrap_err();
    assert!(matches!(err, InkError::Validation(_)));
}
