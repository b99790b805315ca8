//! Random sampling for camera rays.
//!
//! The camera never owns a generator. Every ray-generation call borrows a
//! [`Sampler`], so each render worker brings its own source of uniform values
//! and nothing is synchronized across threads.

use glam::Vec3A;
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::f32::consts::TAU;

thread_local! {
    /// Thread-local ChaCha20 PRNG for quality random numbers.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Source of independent uniform values in [0, 1).
pub trait Sampler {
    /// Next uniform value in [0, 1).
    fn next_f32(&mut self) -> f32;
}

impl<R: Rng> Sampler for R {
    fn next_f32(&mut self) -> f32 {
        self.random()
    }
}

/// Sampler backed by a per-thread ChaCha20 generator.
///
/// Zero-sized; every thread lazily seeds its own generator from the OS-backed
/// `rand::rng()` on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSampler;

impl Sampler for ThreadSampler {
    fn next_f32(&mut self) -> f32 {
        RNG.with(|rng| rng.borrow_mut().random())
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Meant for deterministic tests: a sequence of `0.5` yields zero pixel
/// jitter and the lens center. Values are returned as given, so callers are
/// responsible for keeping them in [0, 1). An empty sequence yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceSampler {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSampler {
    /// Sampler that replays `values` in order.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Sampler that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl Sampler for SequenceSampler {
    fn next_f32(&mut self) -> f32 {
        let Some(&value) = self.values.get(self.next) else {
            return 0.0;
        };
        self.next = (self.next + 1) % self.values.len();
        value
    }
}

/// Reproducible generator for one worker.
///
/// Workers sharing a `seed` but using distinct `stream` values (for example
/// the image row) draw independent sequences.
pub fn seeded_rng(seed: u64, stream: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Generate a value in [min, max)
pub fn random_f32_range<S: Sampler + ?Sized>(sampler: &mut S, min: f32, max: f32) -> f32 {
    min + (max - min) * sampler.next_f32()
}

/// Random offset within the [-0.5, 0.5) square, z = 0.
pub fn sample_square<S: Sampler + ?Sized>(sampler: &mut S) -> Vec3A {
    let x = sampler.next_f32() - 0.5;
    let y = sampler.next_f32() - 0.5;
    Vec3A::new(x, y, 0.0)
}

/// Rejection attempts before [`random_in_unit_disk`] falls back to a polar mapping.
const MAX_DISK_REJECTIONS: usize = 64;

/// Generate random point inside unit disk using rejection sampling.
///
/// A sampler that keeps landing outside the disk (a constant sequence, for
/// instance) gets a polar mapping of two further draws after
/// `MAX_DISK_REJECTIONS` attempts, so this always returns.
pub fn random_in_unit_disk<S: Sampler + ?Sized>(sampler: &mut S) -> Vec3A {
    for _ in 0..MAX_DISK_REJECTIONS {
        let x = random_f32_range(sampler, -1.0, 1.0);
        let y = random_f32_range(sampler, -1.0, 1.0);
        let p = Vec3A::new(x, y, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }

    // sqrt keeps the polar mapping uniform in area.
    let r = sampler.next_f32().sqrt();
    let theta = TAU * sampler.next_f32();
    Vec3A::new(r * theta.cos(), r * theta.sin(), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_samples_stay_in_unit_range() {
        let mut rng = seeded_rng(7, 0);
        for _ in 0..10_000 {
            let x = rng.next_f32();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn thread_sampler_stays_in_unit_range() {
        let mut sampler = ThreadSampler;
        for _ in 0..1_000 {
            let x = sampler.next_f32();
            assert!((0.0..1.0).contains(&x));
        }
    }

    fn draw(mut sampler: impl Sampler, count: usize) -> Vec<f32> {
        (0..count).map(|_| sampler.next_f32()).collect()
    }

    #[test]
    fn seeded_streams_are_reproducible_and_distinct() {
        let a = draw(seeded_rng(1, 3), 8);
        let b = draw(seeded_rng(1, 3), 8);
        let c = draw(seeded_rng(1, 4), 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sequence_sampler_cycles() {
        let mut sampler = SequenceSampler::new([0.1, 0.2]);
        assert_eq!(sampler.next_f32(), 0.1);
        assert_eq!(sampler.next_f32(), 0.2);
        assert_eq!(sampler.next_f32(), 0.1);
        assert_eq!(SequenceSampler::default().next_f32(), 0.0);
    }

    #[test]
    fn square_offset_centered_on_half() {
        let mut centered = SequenceSampler::constant(0.5);
        assert_eq!(sample_square(&mut centered), Vec3A::ZERO);

        let mut corner = SequenceSampler::new([0.0, 0.75]);
        assert_eq!(sample_square(&mut corner), Vec3A::new(-0.5, 0.25, 0.0));
    }

    #[test]
    fn unit_disk_rejects_points_outside() {
        // (-1, -1) is rejected, (0.5, 0) maps from (0.75, 0.5) and is kept.
        let mut sampler = SequenceSampler::new([0.0, 0.0, 0.75, 0.5]);
        assert_eq!(random_in_unit_disk(&mut sampler), Vec3A::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn unit_disk_returns_for_samplers_stuck_outside() {
        // Constant 0.0 maps every rejection draw to (-1, -1); polar fallback gives r = 0.
        assert_eq!(random_in_unit_disk(&mut SequenceSampler::constant(0.0)), Vec3A::ZERO);

        // Constant 0.9 maps to (0.8, 0.8), also outside.
        let p = random_in_unit_disk(&mut SequenceSampler::constant(0.9));
        assert!(p.length_squared() < 1.0);
        assert_eq!(p.z, 0.0);
        assert!(p.length() > 0.9);
    }

    #[test]
    fn unit_disk_samples_inside_disk() {
        let mut rng = seeded_rng(42, 0);
        for _ in 0..10_000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }
}
