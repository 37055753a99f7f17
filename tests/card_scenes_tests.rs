mod common;

use approx::assert_relative_eq;
use card_scenes::cards::Ordinal;
use card_scenes::error::SceneError;
use card_scenes::host::{ElementId, IntersectionEntry, PageEvent, ResizeEntry};
use card_scenes::math::{Rect, Size};
use card_scenes::CardScenes;
use common::{card_row, start, CountingScheduler, MockContext, MockPage};
use glam::Vec2;

fn show(scenes: &mut CardScenes, page: &MockPage, containers: &[ElementId], ratio: f32) {
    let entries = containers
        .iter()
        .map(|&target| IntersectionEntry { target, ratio })
        .collect();
    scenes.handle_event(page, &PageEvent::Intersection(entries));
}

fn mesh_rotation(scenes: &CardScenes, ordinal: usize) -> glam::Vec3 {
    scenes.record(Ordinal(ordinal)).unwrap().mesh().unwrap().transform.rotation
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn test_one_record_per_container() {
    let (mut page, _, containers) = card_row(4);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let scenes = start(&mut page, &mut context, &scheduler);

    assert_eq!(scenes.registry().len(), 4);
    assert_eq!(scenes.registry().slot_count(), 4);
    for (i, container) in containers.iter().enumerate() {
        assert_eq!(scenes.record(Ordinal(i)).unwrap().container, *container);
    }
}

#[test]
fn test_initial_record_state() {
    let (mut page, _, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let scenes = start(&mut page, &mut context, &scheduler);

    let record = scenes.record(Ordinal(0)).unwrap();
    assert!(!record.visible);
    assert!(!record.hover);
    assert_relative_eq!(record.rotation_speed, 0.005);
    assert_relative_eq!(record.camera.aspect, 300.0 / 180.0);
    assert_relative_eq!(record.camera.position.z, 3.5);
    assert_eq!(record.renderer.size(), Size::new(300.0, 180.0));

    let mesh = record.mesh().unwrap();
    assert!(mesh.material.wireframe);
    assert_relative_eq!(mesh.material.opacity, 0.15);
    assert_eq!(mesh.geometry.vertices().len(), 42);
    assert_eq!(record.particles().unwrap().positions.len(), 20);
}

#[test]
fn test_each_surface_lands_in_its_own_container() {
    let (mut page, _, containers) = card_row(3);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let scenes = start(&mut page, &mut context, &scheduler);

    assert_eq!(page.appended.len(), 3);
    for (_, record) in scenes.registry().iter() {
        let parents: Vec<_> = page
            .appended
            .iter()
            .filter(|(_, surface)| *surface == record.renderer.surface_id())
            .map(|(container, _)| *container)
            .collect();
        assert_eq!(parents, vec![record.container]);
    }
    let mut targets: Vec<_> = page.appended.iter().map(|(c, _)| *c).collect();
    targets.dedup();
    assert_eq!(targets, containers);
}

#[test]
fn test_pixel_ratio_is_capped() {
    let (mut page, _, _) = card_row(1);
    page.dpr = 3.0;
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let scenes = start(&mut page, &mut context, &scheduler);

    assert_relative_eq!(scenes.record(Ordinal(0)).unwrap().renderer.pixel_ratio(), 2.0);
}

#[test]
fn test_zero_size_container_still_gets_a_scene() {
    let mut page = MockPage::new();
    let card = page.card(Rect::new(0.0, 0.0, 320.0, 280.0));
    page.container_in(card, Size::new(0.0, 0.0));
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    let record = scenes.record(Ordinal(0)).unwrap();
    assert_relative_eq!(record.camera.aspect, 1.0);
    assert!(record.camera.projection_matrix().is_finite());

    show(&mut scenes, &page, &[ElementId(1)], 1.0);
    let report = scenes.tick();
    assert_eq!(report.rendered, 1);
}

#[test]
fn test_context_failure_is_isolated() {
    let (mut page, _, containers) = card_row(3);
    let mut context = MockContext::refusing(&[1]);
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    assert_eq!(scenes.registry().len(), 2);
    assert_eq!(scenes.registry().slot_count(), 3);
    assert!(scenes.record(Ordinal(1)).is_none());
    assert!(scenes.record(Ordinal(2)).is_some());
    assert!(scenes.driver().is_started());

    let failures = scenes.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].ordinal, Ordinal(1));
    assert_eq!(failures[0].container, containers[1]);
    assert!(matches!(failures[0].error, SceneError::ContextUnavailable { .. }));
    assert!(failures[0].error.to_string().contains("refused: too many active contexts"));

    // The failed container has no surface and no observers
    assert!(page.appended.iter().all(|(c, _)| *c != containers[1]));
    assert_eq!(scenes.visibility().observed(), 2);
    assert_eq!(scenes.resize().observed(), 2);

    show(&mut scenes, &page, &containers, 1.0);
    assert_eq!(scenes.tick().rendered, 2);
}

#[test]
fn test_no_containers_still_starts_driver() {
    let mut page = MockPage::new();
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    assert!(scenes.registry().is_empty());
    assert!(scenes.driver().is_started());
    assert_eq!(scheduler.requests.get(), 1);
    assert_eq!(scenes.tick().rendered, 0);
}

// ============================================================================
// Interaction
// ============================================================================

#[test]
fn test_container_without_card_is_not_bound() {
    let mut page = MockPage::new();
    page.bare_container(Size::new(200.0, 100.0));
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    assert!(!scenes.interactions().is_bound(Ordinal(0)));

    // The scene still animates when visible
    show(&mut scenes, &page, &[ElementId(0)], 1.0);
    scenes.tick();
    assert_relative_eq!(mesh_rotation(&scenes, 0).y, 0.005);
}

#[test]
fn test_hover_applies_hover_style() {
    let (mut page, cards, _) = card_row(2);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    scenes.handle_event(&page, &PageEvent::PointerEnter { card: cards[0] });

    let record = scenes.record(Ordinal(0)).unwrap();
    assert!(record.hover);
    assert_relative_eq!(record.rotation_speed, 0.02);
    let mesh = record.mesh().unwrap();
    assert_relative_eq!(mesh.material.opacity, 0.4);
    assert_relative_eq!(mesh.transform.scale.x, 1.1);
    assert_relative_eq!(mesh.transform.scale.z, 1.1);
    assert_relative_eq!(record.particles().unwrap().material.opacity, 0.8);

    // The other card is untouched
    let other = scenes.record(Ordinal(1)).unwrap();
    assert!(!other.hover);
    assert_relative_eq!(other.rotation_speed, 0.005);
}

#[test]
fn test_pointer_at_centre_levels_the_mesh() {
    let (mut page, cards, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    scenes.handle_event(&page, &PageEvent::PointerEnter { card: cards[0] });
    scenes.handle_event(
        &page,
        &PageEvent::PointerMove {
            card: cards[0],
            position: Vec2::new(10.0, 10.0),
        },
    );
    scenes.handle_event(
        &page,
        &PageEvent::PointerMove {
            card: cards[0],
            position: Vec2::new(160.0, 140.0),
        },
    );

    let rotation = mesh_rotation(&scenes, 0);
    assert_relative_eq!(rotation.x, 0.0);
    assert_relative_eq!(rotation.y, 0.0);
}

#[test]
fn test_pointer_at_corner_tilts_by_quarter() {
    let (mut page, cards, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    scenes.handle_event(&page, &PageEvent::PointerEnter { card: cards[0] });
    scenes.handle_event(
        &page,
        &PageEvent::PointerMove {
            card: cards[0],
            position: Vec2::new(320.0, 0.0),
        },
    );

    let rotation = mesh_rotation(&scenes, 0);
    assert_relative_eq!(rotation.x, -0.25);
    assert_relative_eq!(rotation.y, 0.25);
}

#[test]
fn test_move_without_hover_is_ignored() {
    let (mut page, cards, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    scenes.handle_event(
        &page,
        &PageEvent::PointerMove {
            card: cards[0],
            position: Vec2::new(0.0, 0.0),
        },
    );
    assert_eq!(mesh_rotation(&scenes, 0), glam::Vec3::ZERO);
}

#[test]
fn test_leave_restores_rest_values() {
    let (mut page, cards, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    scenes.handle_event(&page, &PageEvent::PointerEnter { card: cards[0] });
    for x in [20.0, 90.0, 300.0] {
        scenes.handle_event(
            &page,
            &PageEvent::PointerMove {
                card: cards[0],
                position: Vec2::new(x, 60.0),
            },
        );
    }
    scenes.handle_event(&page, &PageEvent::PointerLeave { card: cards[0] });

    let record = scenes.record(Ordinal(0)).unwrap();
    assert!(!record.hover);
    assert_relative_eq!(record.rotation_speed, 0.005);
    let mesh = record.mesh().unwrap();
    assert_relative_eq!(mesh.material.opacity, 0.15);
    assert_eq!(mesh.transform.scale, glam::Vec3::ONE);
    assert_relative_eq!(record.particles().unwrap().material.opacity, 0.4);
}

#[test]
fn test_two_containers_in_one_card_share_hover() {
    let mut page = MockPage::new();
    let card = page.card(Rect::new(0.0, 0.0, 320.0, 280.0));
    page.container_in(card, Size::new(300.0, 100.0));
    page.container_in(card, Size::new(300.0, 100.0));
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    assert_eq!(scenes.interactions().bound(card), &[Ordinal(0), Ordinal(1)]);
    scenes.handle_event(&page, &PageEvent::PointerEnter { card });
    assert!(scenes.registry().iter().all(|(_, r)| r.hover));
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn test_idle_rotation_accumulates() {
    let (mut page, _, containers) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);
    show(&mut scenes, &page, &containers, 1.0);

    for _ in 0..100 {
        scenes.tick();
    }

    let rotation = mesh_rotation(&scenes, 0);
    assert_relative_eq!(rotation.y, 0.5, epsilon = 1e-4);
    assert_relative_eq!(rotation.x, 0.25, epsilon = 1e-4);
    let particles = scenes.record(Ordinal(0)).unwrap().particles().unwrap();
    assert_relative_eq!(particles.transform.rotation.y, -0.25, epsilon = 1e-4);
}

#[test]
fn test_hovered_mesh_keeps_pointer_tilt() {
    let (mut page, cards, containers) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);
    show(&mut scenes, &page, &containers, 1.0);

    scenes.handle_event(&page, &PageEvent::PointerEnter { card: cards[0] });
    scenes.handle_event(
        &page,
        &PageEvent::PointerMove {
            card: cards[0],
            position: Vec2::new(160.0, 0.0),
        },
    );
    scenes.tick();

    let rotation = mesh_rotation(&scenes, 0);
    assert_relative_eq!(rotation.x, -0.25);
    assert_relative_eq!(rotation.y, 0.02);
}

#[test]
fn test_invisible_records_are_frozen() {
    let (mut page, _, containers) = card_row(2);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);
    show(&mut scenes, &page, &containers[..1], 1.0);

    let report = scenes.tick();
    assert_eq!(report.rendered, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(mesh_rotation(&scenes, 1), glam::Vec3::ZERO);
    assert_eq!(context.rendered(), vec![scenes.record(Ordinal(0)).unwrap().renderer.surface_id()]);
}

#[test]
fn test_only_visible_scenes_render() {
    let (mut page, _, containers) = card_row(3);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);
    show(&mut scenes, &page, &[containers[0], containers[2]], 0.5);
    show(&mut scenes, &page, &[containers[1]], 0.05);

    scenes.tick();
    assert_eq!(context.rendered().len(), 2);
}

#[test]
fn test_scrolling_out_stops_rendering() {
    let (mut page, _, containers) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    show(&mut scenes, &page, &containers, 1.0);
    scenes.tick();
    show(&mut scenes, &page, &containers, 0.0);
    let frozen = mesh_rotation(&scenes, 0);
    scenes.tick();
    scenes.tick();

    assert_eq!(context.rendered().len(), 1);
    assert_eq!(mesh_rotation(&scenes, 0), frozen);
}

#[test]
fn test_render_failure_does_not_stop_others() {
    let (mut page, _, containers) = card_row(2);
    let mut context = MockContext::new();
    context.failing_renders.insert(0);
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);
    show(&mut scenes, &page, &containers, 1.0);

    let report = scenes.tick();
    assert_eq!(report.failed, 1);
    assert_eq!(report.rendered, 1);
    let report = scenes.tick();
    assert_eq!(report.failed, 1);
    assert_eq!(report.rendered, 1);
}

#[test]
fn test_driver_starts_once() {
    let (mut page, _, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    assert_eq!(scheduler.requests.get(), 1);
    let again = scenes.driver_mut().start(&scheduler);
    assert!(matches!(again, Err(SceneError::DriverAlreadyStarted)));
    assert_eq!(scheduler.requests.get(), 1);
}

#[test]
fn test_each_frame_requests_the_next() {
    let (mut page, _, _) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    for _ in 0..5 {
        scenes.on_frame(&scheduler);
    }
    assert_eq!(scheduler.requests.get(), 6);
    assert_eq!(scenes.driver().frame(), 5);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_updates_only_its_record() {
    let (mut page, _, containers) = card_row(2);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    let size = Size::new(400.0, 100.0);
    page.set_size(containers[0], size);
    scenes.handle_event(
        &page,
        &PageEvent::Resize(vec![ResizeEntry {
            target: containers[0],
            size,
        }]),
    );

    let resized = scenes.record(Ordinal(0)).unwrap();
    assert_relative_eq!(resized.camera.aspect, 4.0);
    assert_eq!(resized.renderer.size(), size);

    let other = scenes.record(Ordinal(1)).unwrap();
    assert_relative_eq!(other.camera.aspect, 300.0 / 180.0);
    assert_eq!(other.renderer.size(), Size::new(300.0, 180.0));
}

#[test]
fn test_resize_to_zero_height_keeps_camera_finite() {
    let (mut page, _, containers) = card_row(1);
    let mut context = MockContext::new();
    let scheduler = CountingScheduler::default();
    let mut scenes = start(&mut page, &mut context, &scheduler);

    scenes.handle_event(
        &page,
        &PageEvent::Resize(vec![ResizeEntry {
            target: containers[0],
            size: Size::new(300.0, 0.0),
        }]),
    );

    let record = scenes.record(Ordinal(0)).unwrap();
    assert_relative_eq!(record.camera.aspect, 1.0);
    assert!(record.camera.projection_matrix().is_finite());
}
