use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::path::PathBuf;

pub fn scratch_dir(suite: &str) -> PathBuf {
    env::temp_dir().join("pbs_tests").join(suite)
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x9b5)
}

pbss::tuple_struct! {
    #[derive(Clone, PartialEq, Debug)]
    pub struct RunHeader {
        pub run: u32,
        pub title: String,
    }
}

pbss::tagged_struct! {
    #[derive(Clone, Default, PartialEq, Debug)]
    pub struct Particle {
        1 => pub id: i32,
        2 => pub energy: f64,
        3 => pub hits: Vec<u16>,
    }
}

pbsf::realm! {
    #[derive(Debug)]
    pub struct Daq = 0x44415121;
    RunHeader => 1,
    Particle => 2,
    u32 => 3,
    Vec<u8> => 4,
}

pub fn random_particle(rng: &mut StdRng) -> Particle {
    let n_hits = rng.gen_range(0..64);
    Particle {
        id: rng.gen(),
        energy: rng.gen_range(0.0..14_000.0),
        hits: (0..n_hits).map(|_| rng.gen()).collect(),
    }
}
