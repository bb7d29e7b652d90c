use roiview_core::{
    nearest_roi, CellKey, LoadStatus, LoadedData, MinimapGeometry, Point, RoiRecord, Session,
    Stats,
};

fn scattered_rois() -> Vec<RoiRecord> {
    // Irregular layout spanning a wide, short region.
    [
        (120.0, 40.0),
        (980.0, 410.0),
        (455.0, 220.0),
        (4_300.0, 15.0),
        (2_210.0, 380.0),
        (3_050.0, 95.0),
        (760.0, 300.0),
        (1_640.0, 260.0),
        (3_900.0, 440.0),
        (2_700.0, 10.0),
    ]
    .iter()
    .map(|&(x, y)| RoiRecord::new(x, y, 255.0, 255.0))
    .collect()
}

fn load(session: &mut Session, rois: Vec<RoiRecord>, stats: Option<Stats>) {
    let ticket = session.begin_load().expect("no load in flight");
    assert!(session.finish_load::<String>(ticket, Ok(LoadedData { rois, stats })));
}

#[test]
fn test_minimap_click_selects_and_failures_stay_per_cell() {
    let mut session = Session::new();
    load(&mut session, scattered_rois(), None);
    assert_eq!(session.current_index(), Some(0));

    let geometry = MinimapGeometry::default();
    let bbox = *session.bounding_box().unwrap();
    let target = session.rois()[7];
    let pixel = geometry
        .transform(&bbox)
        .world_to_canvas(Point::new(target.x, target.y));
    let click = Point::new(pixel.x.round(), pixel.y.round());

    assert_eq!(session.select_at_canvas(click, &geometry), Some(7));
    assert_eq!(session.current_index(), Some(7));
    assert_eq!(session.failed_cell_count(), 0);

    let view = session.view();
    let failed = CellKey::new(7, 0, 2).unwrap();
    let sibling = CellKey::new(7, 0, 3).unwrap();
    assert!(session.mark_image_failed(failed, view));
    assert!(session.is_image_failed(&failed));
    assert!(!session.is_image_failed(&sibling));
    assert!(session.is_current_cell(&sibling, view));
}

#[test]
fn test_reload_rejects_images_from_previous_data() {
    let mut session = Session::new();
    load(&mut session, scattered_rois()[..5].to_vec(), None);
    let key = CellKey::new(0, 0, 0).unwrap();
    let before = session.view();
    assert_eq!(before.crop_size, 5);
    assert!(session.is_current_cell(&key, before));

    // Same index and crop size, different ROI set.
    load(&mut session, scattered_rois()[5..].to_vec(), None);
    let after = session.view();
    assert_eq!(after.index, before.index);
    assert_eq!(after.crop_size, before.crop_size);
    assert_ne!(after, before);

    assert!(!session.is_current_cell(&key, before));
    assert!(!session.mark_image_failed(key, before));
    assert_eq!(session.failed_cell_count(), 0);
    assert!(session.is_current_cell(&key, after));
}

#[test]
fn test_failed_reload_keeps_view() {
    let mut session = Session::new();
    load(&mut session, scattered_rois(), None);
    let before = session.view();

    let ticket = session.begin_load().expect("no load in flight");
    assert!(session.finish_load(ticket, Err::<LoadedData, _>("backend down")));
    assert_eq!(session.view(), before);
    assert!(session.is_current_cell(&CellKey::new(0, 1, 4).unwrap(), before));
}

#[test]
fn test_click_matches_argmin() {
    let mut session = Session::new();
    let rois = scattered_rois();
    load(&mut session, rois.clone(), None);

    let geometry = MinimapGeometry::default();
    let transform = geometry.transform(session.bounding_box().unwrap());
    for px in (0..300).step_by(37) {
        for py in (0..300).step_by(41) {
            let click = Point::new(f64::from(px), f64::from(py));
            let world = transform.canvas_to_world(click);
            let expected = rois
                .iter()
                .enumerate()
                .map(|(i, r)| (i, r.distance_to(world.x, world.y)))
                .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                    Some((_, bd)) if bd <= d => best,
                    _ => Some((i, d)),
                })
                .map(|(i, _)| i);
            assert_eq!(nearest_roi(&rois, world), expected);
            assert_eq!(session.select_at_canvas(click, &geometry), expected);
        }
    }
}

#[test]
fn test_empty_data_is_safe() {
    let mut session = Session::new();
    load(&mut session, Vec::new(), None);

    assert!(session.is_empty());
    assert_eq!(session.status(), &LoadStatus::Ready);
    assert_eq!(session.current_index(), None);
    assert!(session.current_roi().is_none());
    assert!(session.image_grid().is_none());

    let mut rng = rand::thread_rng();
    assert!(!session.random_sample(&mut rng));
    assert!(!session.previous());
    assert!(!session.next());
    assert!(!session.jump_to(0));
    assert_eq!(
        session.select_at_canvas(Point::new(150.0, 150.0), &MinimapGeometry::default()),
        None
    );
    assert!(!session.zoom_in());
    assert!(!session.zoom_out());
    assert!(!session.can_zoom_out());
    assert_eq!(session.crop_size().get(), 5);
    assert!(session.minimap_scene(MinimapGeometry::default()).markers.is_empty());
}

#[test]
fn test_missing_stats_is_not_an_error() {
    let mut session = Session::new();
    load(&mut session, scattered_rois(), None);

    assert_eq!(session.status(), &LoadStatus::Ready);
    assert!(session.error().is_none());
    assert!(session.stats().is_none());
    assert_eq!(session.image_grid().unwrap().cells().count(), 10);
}

#[test]
fn test_stats_replaced_on_reload() {
    let mut session = Session::new();
    let stats = Stats {
        filtered_rois: 10,
        total_rois_in_csv: 5_000,
        filter_criteria: "cy0==255 and cy1==255".to_string(),
        row0_image_loaded: true,
        row1_image_loaded: true,
    };
    load(&mut session, scattered_rois(), Some(stats));
    assert!(session.stats().unwrap().images_loaded());

    load(&mut session, scattered_rois(), None);
    assert!(session.stats().is_none());
}
