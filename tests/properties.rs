//! Property tests for the wave-particle model

use glam::Vec2;
use proptest::prelude::*;

use wave_ripples::sim::{SpatialBins, WaveFrontManager, WaveParticle, subdivide_front};
use wave_ripples::{TickInput, WaterSettings, WaterSurface, tick};

fn point(range: f32) -> impl Strategy<Value = Vec2> {
    (-range..range, -range..range).prop_map(|(x, y)| Vec2::new(x, y))
}

fn unit_direction() -> impl Strategy<Value = Vec2> {
    (0.0f32..std::f32::consts::TAU).prop_map(|a| Vec2::new(a.cos(), a.sin()))
}

fn particle() -> impl Strategy<Value = WaveParticle> {
    (point(50.0), point(10.0), unit_direction(), 0.02f32..20.0, 0.0f32..360.0).prop_map(
        |(origin, offset, direction, amplitude, angle)| {
            let mut p = WaveParticle::new(origin, direction, amplitude, 11.0)
                .with_disp_angle(angle);
            p.position = origin + offset;
            p
        },
    )
}

proptest! {
    #[test]
    fn kernel_is_zero_outside_support(
        p in particle(),
        angle in 0.0f32..std::f32::consts::TAU,
        extra in 0.01f32..100.0,
    ) {
        let d = p.support() + extra;
        let x = p.position + Vec2::new(angle.cos(), angle.sin()) * d;
        prop_assert_eq!(p.displacement(x), 0.0);
    }

    #[test]
    fn kernel_peaks_at_particle(
        p in particle(),
        angle in 0.0f32..std::f32::consts::TAU,
        d in 0.01f32..17.5,
    ) {
        let x = p.position + Vec2::new(angle.cos(), angle.sin()) * d;
        prop_assert!(p.displacement(p.position) > p.displacement(x));
    }

    #[test]
    fn subdivide_never_raises_amplitude(front in prop::collection::vec(particle(), 1..12)) {
        let peak = front.iter().map(|p| p.amplitude).fold(0.0, f32::max);
        let out = subdivide_front(&front, 0.5, 1.6);
        prop_assert!(out.len() >= front.len());
        prop_assert!(out.iter().all(|p| p.amplitude <= peak));

        // Walk the output against the expected traversal order: the last
        // particle first, then the rest. Anything else is an inserted mid.
        let expected: Vec<&WaveParticle> = front.last().into_iter().chain(&front[..front.len() - 1]).collect();
        let mut next = 0;
        for (k, q) in out.iter().enumerate() {
            let original = expected
                .get(next)
                .filter(|e| e.position == q.position && e.direction == q.direction);
            match original {
                Some(e) => {
                    prop_assert!(q.amplitude <= e.amplitude);
                    next += 1;
                }
                None => {
                    let right = &out[k + 1];
                    prop_assert_eq!(q.amplitude, right.amplitude);
                    prop_assert_eq!(q.origin, right.origin);
                }
            }
        }
        prop_assert_eq!(next, front.len());
    }

    #[test]
    fn advance_prunes_and_bins_survivors(
        origins in prop::collection::vec(point(59.0), 1..4),
        steps in 1usize..80,
    ) {
        let settings = WaterSettings::default();
        let mut fronts = WaveFrontManager::new(&settings);
        let mut bins = SpatialBins::new(settings.resolution, settings.width, settings.threshold);
        for origin in origins {
            fronts.spawn_at(origin);
        }
        for _ in 0..steps {
            fronts.advance(&mut bins);
            for p in fronts.particles() {
                prop_assert!(p.amplitude > settings.threshold);
                prop_assert!(p.position.x.abs() < settings.width);
                prop_assert!(p.position.y.abs() < settings.width);
                prop_assert!(bins.query(bins.cell_of(p.position), 0).contains(p));
            }
            prop_assert!(fronts.fronts().iter().all(|f| !f.is_empty()));
            fronts.subdivide();
        }
    }

}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn height_field_rebuild_is_idempotent(seed in any::<u64>(), ticks in 1u32..30) {
        let settings = WaterSettings { seed, spawn_chance: 0.2, resolution: 40, ..Default::default() };
        let mut surface = WaterSurface::new(settings);
        surface.spawn();
        for k in 1..=ticks {
            tick(&mut surface, &TickInput::default(), k as f64);
        }
        let before = surface.height_field().clone();
        surface.rebuild_height_field();
        prop_assert_eq!(&before, surface.height_field());
    }
}

#[test]
fn test_single_particle_pruned_at_domain_edge() {
    let settings = WaterSettings::default();
    let mut fronts = WaveFrontManager::new(&settings);
    let mut bins = SpatialBins::new(settings.resolution, settings.width, settings.threshold);
    fronts.push_front(vec![WaveParticle::new(Vec2::ZERO, Vec2::Y, 20.0, 11.0)]);

    for _ in 0..50 {
        fronts.advance(&mut bins);
    }
    assert_eq!(fronts.particle_count(), 1);
    assert_eq!(fronts.fronts()[0][0].position, Vec2::new(0.0, 50.0));

    for _ in 0..9 {
        fronts.advance(&mut bins);
    }
    assert_eq!(fronts.fronts()[0][0].position.y, 59.0);

    fronts.advance(&mut bins);
    assert_eq!(fronts.particle_count(), 0);
}

#[test]
fn test_close_pair_splits_once() {
    let radius = 11.0;
    let eps = 0.01;
    let a = WaveParticle::new(Vec2::ZERO, Vec2::Y, 20.0, radius);
    let mut b = WaveParticle::new(Vec2::ZERO, Vec2::X, 20.0, radius);
    b.position = Vec2::new(radius / 2.0 + eps, 0.0);

    let out = subdivide_front(&[a, b], 0.5, 1.6);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|p| (p.amplitude - 20.0 / 1.6).abs() < 1e-5));
}

#[test]
fn test_spawn_at_origin_height_is_eighty() {
    let mut surface = WaterSurface::default();
    surface.spawn_at(Vec2::ZERO);
    surface.rebin();
    surface.rebuild_height_field();
    let eta = surface.height_field().get(50, 50).unwrap_or_default();
    assert!((eta - 80.0).abs() < 1e-2, "eta was {eta}");
}
