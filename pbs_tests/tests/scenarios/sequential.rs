use super::helpers::{random_particle, seeded_rng, Daq, Particle, RunHeader};
use anyhow::Result;
use pbsf::{create_sequential_output_file, open_sequential_input_file};
use std::path::Path;

pub fn heterogeneous_write_read(dir: &Path) -> Result<()> {
    let path = dir.join("run.pbs");

    let header = RunHeader { run: 1234, title: "calibration".to_owned() };
    let particles = vec![
        Particle { id: 11, energy: 45.6, hits: vec![1, 2, 3] },
        Particle { id: -11, energy: 45.7, hits: vec![] },
    ];

    let mut out = create_sequential_output_file::<Daq, _>(&path)?;
    out.write(&header)?;
    for p in &particles {
        out.write(p)?;
    }
    out.close()?;

    let mut input = open_sequential_input_file::<Daq, _>(&path)?;
    let got: Vec<Particle> = input.read_one_type().collect::<pbsf::Result<_>>()?;
    assert_eq!(got, particles);

    let mut input = open_sequential_input_file::<Daq, _>(&path)?;
    let got: Vec<RunHeader> = input.read_one_type().collect::<pbsf::Result<_>>()?;
    assert_eq!(got, vec![header]);

    Ok(())
}

pub fn randomized_roundtrip(dir: &Path) -> Result<()> {
    let path = dir.join("random.pbs");
    let mut rng = seeded_rng();

    let particles: Vec<Particle> = (0..500).map(|_| random_particle(&mut rng)).collect();

    let mut out = create_sequential_output_file::<Daq, _>(&path)?;
    for p in &particles {
        out.write(p)?;
    }
    out.close()?;

    let mut input = open_sequential_input_file::<Daq, _>(&path)?;
    let got: Vec<Particle> = input.read_one_type().collect::<pbsf::Result<_>>()?;
    assert_eq!(got, particles);

    Ok(())
}
