//! Std tuples as heterogeneous fixed-layout sequences: members travel in
//! declaration order with no tags and no length prefix. The decoder must know
//! the exact member types; this is the schema-coupled counterpart of the
//! tagged-struct codec.

use crate::error::Result;
use crate::size::sum_fixed;
use crate::traits::{serialized_size, Deser, Ser};
use std::io::{Read, Write};

macro_rules! tuple_codec {
    ($(($($T:ident . $idx:tt),+)),+ $(,)?) => {$(
        impl<$($T: Ser),+> Ser for ($($T,)+) {
            const FIXED_SIZE: Option<usize> = sum_fixed(&[$($T::FIXED_SIZE),+]);

            fn ser<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
                $(self.$idx.ser(w)?;)+
                Ok(())
            }

            fn static_size(&self) -> Option<usize> {
                let mut total = 0;
                $(total += self.$idx.static_size()?;)+
                Some(total)
            }

            fn aot_size(&self) -> usize {
                let mut total = 0;
                $(total += serialized_size(&self.$idx);)+
                total
            }
        }

        impl<$($T: Deser),+> Deser for ($($T,)+) {
            fn deser<R: Read + ?Sized>(r: &mut R) -> Result<Self> {
                Ok(($($T::deser(r)?,)+))
            }
        }
    )+};
}

tuple_codec!(
    (A.0),
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
    (A.0, B.1, C.2, D.3, E.4),
    (A.0, B.1, C.2, D.3, E.4, F.5),
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6),
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7),
);

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::{parse_from_buffer, serialize_to_buffer, serialized_size, Ser};

    #[test]
    fn pair_is_members_in_order() {
        let v = (0x01u8, 0x02u8);
        assert_eq!(serialize_to_buffer(&v).unwrap(), [0x01, 0x02]);
        assert_eq!(parse_from_buffer::<(u8, u8)>(&[0x01, 0x02]).unwrap(), v);
    }

    #[test]
    fn fixed_size_when_all_members_fixed() {
        assert_eq!(<(u8, u32) as Ser>::FIXED_SIZE, Some(5));
        assert_eq!(<(u8, Vec<u8>) as Ser>::FIXED_SIZE, None);
        assert_eq!(serialized_size(&(1u8, 2u32)), 5);
    }

    #[test]
    fn variable_members_fall_back_to_aot() {
        let v = (7u8, vec![1u8, 2, 3]);
        let buf = serialize_to_buffer(&v).unwrap();
        // u8 + (count varuint + 3 bytes)
        assert_eq!(buf.len(), 1 + 1 + 3);
        assert_eq!(v.aot_size(), buf.len());
        let back: (u8, Vec<u8>) = parse_from_buffer(&buf).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn mixed_nested_roundtrip() {
        let v = (1u16, (2u32, String::from("abc")), vec![9u64, 8]);
        let buf = serialize_to_buffer(&v).unwrap();
        let back: (u16, (u32, String), Vec<u64>) = parse_from_buffer(&buf).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn member_underflow_is_early_eof() {
        let buf = serialize_to_buffer(&(1u32, 2u32)).unwrap();
        for cut in 0..buf.len() {
            let err = parse_from_buffer::<(u32, u32)>(&buf[..cut]).unwrap_err();
            assert!(matches!(err, Error::EarlyEof), "cut at {cut}");
        }
    }
}
