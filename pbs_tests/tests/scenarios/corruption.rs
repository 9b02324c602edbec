use super::helpers::Daq;
use anyhow::Result;
use pbsf::{
    create_sequential_output_file, open_sequential_input_file, EncodedBlock, Encoding, Error,
};
use std::fs;
use std::path::Path;

pub fn flipped_bit_detected(dir: &Path) -> Result<()> {
    let path = dir.join("flipped.pbs");

    let payload: Vec<u8> = (0..200).collect();
    let mut out = create_sequential_output_file::<Daq, _>(&path)?;
    out.write_with_encoding(&payload, Encoding::Identity)?;
    out.close()?;

    let mut bytes = fs::read(&path)?;
    let last = bytes.len() - 1;
    bytes[last] ^= 0x40;
    fs::write(&path, &bytes)?;

    let mut input = open_sequential_input_file::<Daq, _>(&path)?;
    let results: Vec<pbsf::Result<Vec<u8>>> = input.read_one_type().collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0].as_ref().unwrap_err(),
        Error::BadChecksum { .. }
    ));

    Ok(())
}

pub fn reserved_encoding_refused(dir: &Path) -> Result<()> {
    let path = dir.join("lzo.pbs");

    // a well-checksummed block claiming the reserved LZO encoding
    let content = vec![0xaa; 16];
    let block = EncodedBlock {
        content_type: 4,
        content_encoding: Encoding::Lzo as i16,
        content_checksum: crc32c::crc32c(&content),
        content,
    };
    let mut bytes = Vec::new();
    pbsf::write_header::<Daq, _>(&mut bytes)?;
    pbss::serialize(&mut bytes, &block)?;
    fs::write(&path, &bytes)?;

    let mut input = open_sequential_input_file::<Daq, _>(&path)?;
    let results: Vec<pbsf::Result<Vec<u8>>> = input.read_one_type().collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0].as_ref().unwrap_err(),
        Error::UnknownEncoding(2)
    ));

    Ok(())
}

pub fn foreign_realm_refused(dir: &Path) -> Result<()> {
    pbsf::realm! {
        struct Elsewhere = 0x0e15e;
    }

    let path = dir.join("foreign.pbs");
    create_sequential_output_file::<Elsewhere, _>(&path)?.close()?;

    let err = open_sequential_input_file::<Daq, _>(&path).unwrap_err();
    assert!(matches!(err, Error::UnknownRealm { .. }));

    Ok(())
}
