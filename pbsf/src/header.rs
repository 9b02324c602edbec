use crate::defs::{FileHeader, MAGIC};
use crate::error::{Error, Result};
use crate::realm::Realm;
use std::io::{Read, Write};

pub fn write_header<R: Realm, W: Write + ?Sized>(w: &mut W) -> Result<()> {
    let header = FileHeader { magic: MAGIC, realm: R::ID };
    pbss::serialize(w, &header)?;
    Ok(())
}

/// Reads and validates a file header against realm `R`.
pub fn check_header<R: Realm, Rd: Read + ?Sized>(r: &mut Rd) -> Result<()> {
    let header: FileHeader = pbss::parse(r)?;
    if header.magic != MAGIC {
        return Err(Error::UnknownRealm { expected: MAGIC, actual: header.magic });
    }
    if header.realm != R::ID {
        return Err(Error::UnknownRealm { expected: R::ID, actual: header.realm });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    crate::realm! {
        struct Alpha = 10;
    }
    crate::realm! {
        struct Beta = 11;
    }

    #[test]
    fn header_roundtrip() {
        let mut buf = Vec::new();
        write_header::<Alpha, _>(&mut buf).unwrap();
        assert_eq!(buf.len(), 8);
        check_header::<Alpha, _>(&mut buf.as_slice()).unwrap();
    }

    #[test]
    fn foreign_realm_is_refused() {
        let mut buf = Vec::new();
        write_header::<Alpha, _>(&mut buf).unwrap();
        let err = check_header::<Beta, _>(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownRealm { expected: 11, actual: 10 }
        ));
    }

    #[test]
    fn bad_magic_is_refused() {
        let buf = [b'n', b'o', b'p', b'e', 10, 0, 0, 0];
        let err = check_header::<Alpha, _>(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, Error::UnknownRealm { .. }));
    }
}
