use super::*;

#[test]
fn names_sort_in_scene_order() {
    assert_eq!(panel_file_name(0, "intro", 0, 1), "panel_001_intro.png");
    assert_eq!(panel_file_name(11, "b", 2, 3), "panel_012_b_v03.png");
    assert_eq!(page_file_name(0), "page_001.png");

    let mut names: Vec<String> = (0..12).map(|i| panel_file_name(i, "x", 0, 1)).collect();
    let expected = names.clone();
    names.sort();
    assert_eq!(names, expected);
}

#[test]
fn in_memory_sink_keeps_write_order() {
    let img = RasterImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
    let mut sink = InMemorySink::new();
    sink.write_panel("a.png", &img).unwrap();
    sink.write_panel("b.png", &img).unwrap();
    sink.write_page("page_001.png", &img).unwrap();

    let panels: Vec<&str> = sink.panels().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(panels, ["a.png", "b.png"]);
    assert_eq!(sink.pages().len(), 1);
}

#[test]
fn png_dir_sink_writes_decodable_files() {
    let root = std::env::temp_dir().join(format!("inkpanel_sink_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);

    let img = RasterImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut sink = PngDirSink::new(&root);
    sink.write_panel("panel_001_a.png", &img).unwrap();
    sink.write_page("page_001.png", &img).unwrap();

    let panel = image::open(root.join("panels").join("panel_001_a.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(panel, img);
    assert!(root.join("pages").join("page_001.png").is_file());

    let _ = std::fs::remove_dir_all(&root);
}
