use card_scenes::config::SceneConfig;
use card_scenes::engine::SoftwareContext;
use card_scenes::host::{CardPage, FrameScheduler, PageEvent, PageLayout};
use card_scenes::math::Size;
use card_scenes::{CardScenes, Orchestrator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct NoopScheduler;

impl FrameScheduler for NoopScheduler {
    fn request_frame(&self) {}
}

/// A page of `cards` cards with everything scrolled into view
fn scenes(cards: usize) -> CardScenes {
    let config = SceneConfig::default();
    let viewport = Size::new(1200.0, 10_000.0);
    let mut page = CardPage::new(cards, 0, PageLayout::default(), viewport, &config);
    let mut context = SoftwareContext::new();
    let mut rng = StdRng::seed_from_u64(11);
    let mut scenes = Orchestrator::new(config)
        .start(&mut page, &mut context, &NoopScheduler, &mut rng)
        .expect("scenes start");
    let entries = page.intersection_entries();
    scenes.handle_event(&page, &PageEvent::Intersection(entries));
    scenes
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver_tick");

    for cards in [1usize, 6, 24] {
        let mut scenes = scenes(cards);
        group.bench_with_input(BenchmarkId::new("visible", cards), &cards, |b, _| {
            b.iter(|| black_box(scenes.tick()));
        });
    }

    // Off-screen records should cost next to nothing
    let mut hidden = {
        let config = SceneConfig::default();
        let mut page = CardPage::new(24, 0, PageLayout::default(), Size::new(1200.0, 800.0), &config);
        let mut rng = StdRng::seed_from_u64(11);
        Orchestrator::new(config)
            .start(&mut page, &mut SoftwareContext::new(), &NoopScheduler, &mut rng)
            .expect("scenes start")
    };
    group.bench_function("hidden/24", |b| b.iter(|| black_box(hidden.tick())));

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
