use super::*;
use crate::layout::slots::Corner;

fn gradient(width: u32, height: u32) -> RasterImage {
    RasterImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

fn renderer() -> OverlayRenderer {
    OverlayRenderer::new(FontSource::builtin())
}

fn hello() -> Vec<DialogueTurn> {
    vec![DialogueTurn::new("Hello there, how are you doing today?")]
}

#[test]
fn empty_dialogue_is_identity_for_every_style() {
    let img = gradient(64, 48);
    for style in [BubbleStyle::Outline, BubbleStyle::Glass] {
        let out = renderer().render(&img, &[], style).unwrap();
        assert_eq!(out.as_raw(), img.as_raw());
        let out = renderer()
            .render(&img, &[DialogueTurn::new("   ")], style)
            .unwrap();
        assert_eq!(out.as_raw(), img.as_raw());
    }
}

#[test]
fn hello_wraps_into_top_right_column() {
    let canvas = Canvas {
        width: 832,
        height: 1152,
    };
    let mut face = renderer().typeface_for_width(832).unwrap();
    let plan = plan_bubbles(canvas, &hello(), &mut face);
    assert_eq!(plan.len(), 1);

    let bubble = &plan[0];
    let tr = SlotAllocator::new(canvas, face.line_height()).allocate(0);
    assert_eq!(bubble.slot, tr);
    assert_eq!(Corner::for_turn(bubble.turn_index), Corner::TopRight);
    assert!(bubble.lines.len() >= 2);
    assert!(bubble.slot.width <= 832.0 * 0.42 + 1e-9);
    for line in &bubble.lines {
        assert!(line.split_whitespace().count() == 1 || face.measure(line) <= tr.width as f32);
    }
    assert!(bubble.text_bounds.x1 <= tr.x + tr.width + 1e-6);
}

#[test]
fn outline_leaves_artwork_outside_text_untouched() {
    let img = gradient(832, 1152);
    let out = renderer()
        .render(&img, &hello(), BubbleStyle::Outline)
        .unwrap();
    assert_eq!(out.dimensions(), img.dimensions());

    let mut face = renderer().typeface_for_width(832).unwrap();
    let plan = plan_bubbles(Canvas::of(&img), &hello(), &mut face);
    let region = plan[0].text_bounds.inflate(4.0, 4.0);

    let mut changed_inside = 0usize;
    for (x, y, px) in out.enumerate_pixels() {
        let inside = region.contains(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
        if inside {
            if px != img.get_pixel(x, y) {
                changed_inside += 1;
            }
        } else {
            assert_eq!(px, img.get_pixel(x, y), "pixel ({x},{y}) changed");
        }
    }
    assert!(changed_inside > 0);
}

#[test]
fn glass_draws_translucent_box_behind_text() {
    let img = RasterImage::from_pixel(832, 1152, image::Rgba([0, 0, 0, 255]));
    let out = renderer()
        .render(&img, &hello(), BubbleStyle::Glass)
        .unwrap();

    let mut face = renderer().typeface_for_width(832).unwrap();
    let plan = plan_bubbles(Canvas::of(&img), &hello(), &mut face);
    let bounds = plan[0].text_bounds;

    // Inside the margin band: glass fill only, no text, no border.
    let x = (bounds.x0 - GLASS_MARGIN_PX / 2.0) as u32;
    let y = bounds.center().y as u32;
    let px = out.get_pixel(x, y).0;
    assert!(px[0] > 140 && px[0] < 200, "glass fill was {px:?}");
    assert_eq!(px[3], 255);

    // Well outside the box nothing changes.
    assert_eq!(out.get_pixel(2, 1150).0, [0, 0, 0, 255]);
}

#[test]
fn five_turns_rotate_back_to_first_slot() {
    let canvas = Canvas {
        width: 832,
        height: 1152,
    };
    let turns: Vec<_> = (0..5)
        .map(|i| DialogueTurn::spoken(format!("S{i}"), "Short line."))
        .collect();
    let mut face = renderer().typeface_for_width(832).unwrap();
    let plan = plan_bubbles(canvas, &turns, &mut face);
    assert_eq!(plan.len(), 5);
    assert_eq!(plan[0].slot, plan[4].slot);
    assert_ne!(plan[0].slot, plan[1].slot);
    assert_eq!(plan[4].lines[0], "S4: Short line.");
}

#[test]
fn blank_turns_do_not_consume_slots() {
    let canvas = Canvas {
        width: 400,
        height: 300,
    };
    let turns = vec![
        DialogueTurn::new("first"),
        DialogueTurn::new(""),
        DialogueTurn::new("second"),
    ];
    let mut face = renderer().typeface_for_width(400).unwrap();
    let plan = plan_bubbles(canvas, &turns, &mut face);
    let slots = SlotAllocator::new(canvas, face.line_height());
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[1].turn_index, 1);
    assert_eq!(plan[1].slot, slots.allocate(1));
}

#[test]
fn rendering_is_deterministic_and_opaque() {
    let mut img = gradient(300, 200);
    img.put_pixel(0, 0, image::Rgba([1, 2, 3, 0]));
    let turns = vec![
        DialogueTurn::spoken("Ada", "Same pixels every time."),
        DialogueTurn::new("Really."),
    ];
    for style in [BubbleStyle::Outline, BubbleStyle::Glass] {
        let a = renderer().render(&img, &turns, style).unwrap();
        let b = renderer().render(&img, &turns, style).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
        assert!(a.pixels().all(|p| p.0[3] == 255));
    }
    assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 0]);
}

#[test]
fn oversized_images_are_rejected() {
    let img = RasterImage::new(70_000, 1);
    let err = renderer()
        .render(&img, &hello(), BubbleStyle::Outline)
        .unwrap_err();
    assert!(matches!(err, crate::InkError::Validation(_)));
}

#[test]
fn truetype_outline_ink_spans_measured_lines() {
    let Some(font) = crate::text::font::find_preferred_font()
        .and_then(|p| FontSource::from_path(&p).ok())
    else {
        eprintln!("skipping: no TrueType font in font search path");
        return;
    };
    let renderer = OverlayRenderer::new(font);
    let img = RasterImage::from_pixel(832, 1152, image::Rgba([0, 0, 255, 255]));
    let out = renderer
        .render(&img, &hello(), BubbleStyle::Outline)
        .unwrap();

    let mut face = renderer.typeface_for_width(832).unwrap();
    let stroke = f64::from(outline_stroke_px(face.size_px()));
    let plan = plan_bubbles(Canvas::of(&img), &hello(), &mut face);
    let bubble = &plan[0];
    assert!(bubble.lines.len() >= 2);
    let widest = f64::from(block_width(&bubble.lines, &mut face));
    assert!(widest <= bubble.slot.width);

    let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0u32, 0u32);
    for (x, y, px) in out.enumerate_pixels() {
        if px != img.get_pixel(x, y) {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x + 1);
            y1 = y1.max(y + 1);
        }
    }
    assert!(x1 > x0, "nothing was drawn");

    let allowed = bubble.text_bounds.inflate(stroke + 2.0, stroke + 2.0);
    assert!(f64::from(x0) >= allowed.x0 && f64::from(x1) <= allowed.x1);
    assert!(f64::from(y0) >= allowed.y0 && f64::from(y1) <= allowed.y1);

    let ink_width = f64::from(x1 - x0);
    assert!(
        ink_width >= widest * 0.85,
        "ink spans {ink_width}px, widest line measures {widest}px"
    );
    // Later lines are drawn below the first one.
    let first_line_bottom = bubble.text_bounds.y0 + bubble.line_height;
    assert!(f64::from(y1) > first_line_bottom);
}
