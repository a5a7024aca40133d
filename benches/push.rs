#![cfg(feature = "unstable")]
#![feature(test)]

extern crate test;

use fixvec::{AlignedAllocator, FixedVec};
use rand::{rngs::SmallRng, RngCore, SeedableRng};
use test::Bencher;

macro_rules! fills {
    ($fnn:ident, $n:expr, $make:expr) => {
        #[bench]
        fn $fnn(b: &mut Bencher) {
            let mut rng = SmallRng::seed_from_u64(0x5432_1012_3454_3210);
            b.iter(|| {
                let mut vec = $make($n);
                for _ in 0..$n {
                    vec.push(rng.next_u64());
                }
                vec
            })
        }
    };
}

fn fixed(n: usize) -> FixedVec<u64> {
    FixedVec::with_capacity(n).unwrap()
}

fn fixed_aligned(n: usize) -> FixedVec<u64, AlignedAllocator<u64, 64>> {
    FixedVec::with_capacity_in(n, AlignedAllocator::new()).unwrap()
}

fills!(std_vec_16_pushes, 16, Vec::<u64>::with_capacity);
fills!(std_vec_1024_pushes, 1024, Vec::<u64>::with_capacity);
fills!(fixed_vec_16_pushes, 16, fixed);
fills!(fixed_vec_1024_pushes, 1024, fixed);
fills!(fixed_vec_aligned_16_pushes, 16, fixed_aligned);
fills!(fixed_vec_aligned_1024_pushes, 1024, fixed_aligned);

#[bench]
fn fixed_vec_1024_clone(b: &mut Bencher) {
    let mut rng = SmallRng::seed_from_u64(0x5432_1012_3454_3210);
    let vec = FixedVec::<u64>::from_exact_iter((0..1024).map(|_| rng.next_u64())).unwrap();
    b.iter(|| vec.clone())
}
