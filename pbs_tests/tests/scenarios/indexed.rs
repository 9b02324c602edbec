use super::helpers::{random_particle, seeded_rng, Daq, Particle, RunHeader};
use anyhow::Result;
use pbsf::{open_indexed_input_file, open_indexed_output_file, Error};
use std::collections::BTreeMap;
use std::path::Path;

pub fn write_then_read(dir: &Path) -> Result<()> {
    let path = dir.join("basic.pbs");
    let mut rng = seeded_rng();

    let mut expected: BTreeMap<u32, Particle> = BTreeMap::new();
    let mut out = open_indexed_output_file::<Daq, u32, _>(&path, true)?;
    for k in 0..100u32 {
        let p = random_particle(&mut rng);
        out.insert(k, &p)?;
        expected.insert(k, p);
    }
    // readable while still open for writing
    assert_eq!(out.get::<Particle>(&7)?, expected[&7]);
    out.close()?;

    let mut input = open_indexed_input_file::<Daq, u32, _>(&path)?;
    assert_eq!(input.len(), expected.len());
    for (k, p) in &expected {
        assert_eq!(&input.get::<Particle>(k)?, p);
    }

    Ok(())
}

pub fn duplicate_keys_and_reopen(dir: &Path) -> Result<()> {
    let path = dir.join("rewrite.pbs");

    let mut out = open_indexed_output_file::<Daq, u32, _>(&path, true)?;
    out.insert(1, &Particle { id: 1, ..Particle::default() })?;
    out.insert(1, &Particle { id: 2, ..Particle::default() })?;
    out.close()?;

    // last insert per key wins
    let mut input = open_indexed_input_file::<Daq, u32, _>(&path)?;
    assert_eq!(input.len(), 1);
    assert_eq!(input.get::<Particle>(&1)?.id, 2);

    // append mode keeps earlier entries and can supersede them again
    let mut out = open_indexed_output_file::<Daq, u32, _>(&path, false)?;
    assert_eq!(out.len(), 1);
    out.insert(1, &Particle { id: 3, ..Particle::default() })?;
    out.insert(2, &Particle { id: 4, ..Particle::default() })?;
    out.close()?;

    let mut input = open_indexed_input_file::<Daq, u32, _>(&path)?;
    assert_eq!(input.get::<Particle>(&1)?.id, 3);
    assert_eq!(input.get::<Particle>(&2)?.id, 4);

    // truncate mode starts over
    let out = open_indexed_output_file::<Daq, u32, _>(&path, true)?;
    out.close()?;
    let input = open_indexed_input_file::<Daq, u32, _>(&path)?;
    assert!(input.is_empty());

    Ok(())
}

pub fn range_queries(dir: &Path) -> Result<()> {
    let path = dir.join("range.pbs");

    let mut out = open_indexed_output_file::<Daq, u32, _>(&path, true)?;
    for k in 1..=5u32 {
        out.insert(k, &Particle { id: k as i32, ..Particle::default() })?;
    }
    out.close()?;

    let input = open_indexed_input_file::<Daq, u32, _>(&path)?;
    let keys: Vec<u32> = input.range(&2, &4).copied().collect();
    assert_eq!(keys, [2, 3, 4]);

    let all: Vec<u32> = input.keys().copied().collect();
    assert_eq!(all, [1, 2, 3, 4, 5]);

    let mut last_offset = -1;
    for (_k, offset) in input.offsets() {
        assert!(offset > last_offset);
        last_offset = offset;
    }

    Ok(())
}

pub fn error_paths(dir: &Path) -> Result<()> {
    let path = dir.join("errors.pbs");

    let mut out = open_indexed_output_file::<Daq, u32, _>(&path, true)?;
    out.insert(1, &Particle { id: 1, ..Particle::default() })?;
    out.close()?;

    let mut input = open_indexed_input_file::<Daq, u32, _>(&path)?;

    assert!(matches!(
        input.get::<Particle>(&99).unwrap_err(),
        Error::KeyMissing
    ));
    assert!(!input.contains_key(&99));

    // the stored block holds a Particle, not a RunHeader
    assert!(matches!(
        input.get::<RunHeader>(&1).unwrap_err(),
        Error::TypeMismatch { expected: 1, actual: 2 }
    ));

    // the index is keyed by u32, not by Vec<u8>
    let err = open_indexed_input_file::<Daq, Vec<u8>, _>(&path).unwrap_err();
    assert!(matches!(err, Error::KeyMismatch { expected: 4, actual: 3 }));

    Ok(())
}
