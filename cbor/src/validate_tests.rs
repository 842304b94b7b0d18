use super::io::SliceSource;
use super::validate::*;
use super::MajorType;
use hex_literal::hex;
use std::vec;

fn outcome(data: &[u8]) -> Result<Option<MajorType>, Malformed> {
    validate(&mut SliceSource::new(data))
}

#[test]
fn well_formed_scalars() {
    assert_eq!(Ok(Some(MajorType::UnsignedInt)), outcome(&hex!("00")));
    assert_eq!(Ok(Some(MajorType::UnsignedInt)), outcome(&hex!("1bffffffffffffffff")));
    assert_eq!(Ok(Some(MajorType::NegativeInt)), outcome(&hex!("3903e7")));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), outcome(&hex!("f4")));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), outcome(&hex!("f6")));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), outcome(&hex!("f8ff")));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), outcome(&hex!("f97c00")));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), outcome(&hex!("fb3ff199999999999a")));
}

#[test]
fn well_formed_strings() {
    assert_eq!(Ok(Some(MajorType::Bytes)), outcome(&hex!("40")));
    assert_eq!(Ok(Some(MajorType::Bytes)), outcome(&hex!("4401020304")));
    assert_eq!(Ok(Some(MajorType::Text)), outcome(&hex!("6449455446")));
    // Indefinite strings chunked into their own major type
    assert_eq!(Ok(Some(MajorType::Bytes)), outcome(&hex!("5f42010243030405ff")));
    assert_eq!(Ok(Some(MajorType::Text)), outcome(&hex!("7f657374726561646d696e67ff")));
    assert_eq!(Ok(Some(MajorType::Bytes)), outcome(&hex!("5fff")));
}

#[test]
fn well_formed_containers() {
    assert_eq!(Ok(Some(MajorType::Array)), outcome(&hex!("80")));
    assert_eq!(Ok(Some(MajorType::Array)), outcome(&hex!("83010203")));
    assert_eq!(Ok(Some(MajorType::Array)), outcome(&hex!("8301820203820405")));
    assert_eq!(
        Ok(Some(MajorType::Array)),
        outcome(&hex!("98190102030405060708090a0b0c0d0e0f101112131415161718181819"))
    );
    assert_eq!(Ok(Some(MajorType::Map)), outcome(&hex!("a0")));
    assert_eq!(Ok(Some(MajorType::Map)), outcome(&hex!("a26161016162820203")));
    assert_eq!(Ok(Some(MajorType::Array)), outcome(&hex!("9fff")));
    assert_eq!(Ok(Some(MajorType::Array)), outcome(&hex!("9f018202039f0405ffff")));
    assert_eq!(Ok(Some(MajorType::Map)), outcome(&hex!("bf61610161629f0203ffff")));
    assert_eq!(Ok(Some(MajorType::Map)), outcome(&hex!("bf6346756ef563416d7421ff")));
    assert_eq!(Ok(Some(MajorType::Tag)), outcome(&hex!("c11a514b67b0")));
    assert_eq!(Ok(Some(MajorType::Tag)), outcome(&hex!("d818456449455446")));
}

#[test]
fn empty_source_is_not_malformed() {
    assert_eq!(Ok(None), outcome(&[]));
}

#[test]
fn consecutive_items_share_a_source() {
    let mut source = SliceSource::new(&hex!("83010203a1616101f6"));
    assert_eq!(Ok(Some(MajorType::Array)), validate(&mut source));
    assert_eq!(Ok(Some(MajorType::Map)), validate(&mut source));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), validate(&mut source));
    assert_eq!(Ok(None), validate(&mut source));
}

#[test]
fn is_well_formed_convenience() {
    assert!(is_well_formed(&mut SliceSource::new(&hex!("83010203"))));
    assert!(!is_well_formed(&mut SliceSource::new(&hex!("8301"))));
    assert!(!is_well_formed(&mut SliceSource::new(&[])));
}

#[test]
fn truncated_items() {
    for data in [
        &hex!("18")[..],         // missing 1-byte extension
        &hex!("19ff")[..],       // missing half the 2-byte extension
        &hex!("1a")[..],         // missing the 4-byte extension
        &hex!("1b00000000")[..], // missing half the 8-byte extension
        &hex!("44010203")[..],   // byte string short of payload
        &hex!("6449")[..],       // text string short of payload
        &hex!("8301")[..],       // array short of items
        &hex!("a16161")[..],     // map key without value
        &hex!("c1")[..],         // tag without its item
        &hex!("5f4201")[..],     // unterminated indefinite chunk
        &hex!("9f01")[..],       // unterminated indefinite array
    ] {
        assert_eq!(Err(Malformed), outcome(data), "{data:02x?}");
    }
}

#[test]
fn reserved_additional_info() {
    for initial in [0x1cu8, 0x1d, 0x1e, 0x5c, 0xbd, 0xfe] {
        assert_eq!(Err(Malformed), outcome(&[initial, 0, 0]));
    }
}

#[test]
fn indefinite_on_wrong_type() {
    for data in [&hex!("1f")[..], &hex!("3f")[..], &hex!("df00ff")[..]] {
        assert_eq!(Err(Malformed), outcome(data));
    }
}

#[test]
fn break_where_value_expected() {
    assert_eq!(Err(Malformed), outcome(&hex!("ff")));
    // Break in place of a definite array's element
    assert_eq!(Err(Malformed), outcome(&hex!("81ff")));
    // Break in place of an indefinite map's value
    assert_eq!(Err(Malformed), outcome(&hex!("bf6161ffff")));
}

#[test]
fn non_canonical_simple_value() {
    assert_eq!(Err(Malformed), outcome(&hex!("f800")));
    assert_eq!(Err(Malformed), outcome(&hex!("f81f")));
    assert_eq!(Ok(Some(MajorType::SimpleOrFloat)), outcome(&hex!("f820")));
}

#[test]
fn map_length_overflow() {
    // Declared pair count of 2^63: doubling wraps, so the walk must not be
    // attempted
    assert_eq!(Err(Malformed), outcome(&hex!("bb8000000000000000")));
    assert_eq!(Err(Malformed), outcome(&hex!("bbffffffffffffffff")));
}

#[test]
fn chunk_type_mismatch() {
    // Indefinite byte string holding a text chunk
    assert_eq!(Err(Malformed), outcome(&hex!("5f6161ff")));
    // And the reverse
    assert_eq!(Err(Malformed), outcome(&hex!("7f4161ff")));
    // Non-string items inside an indefinite string
    assert_eq!(Err(Malformed), outcome(&hex!("5f01ff")));
}

#[test]
fn depth_limit() {
    fn nested_arrays(depth: usize) -> vec::Vec<u8> {
        let mut data = vec![0x81; depth];
        data.push(0x00);
        data
    }

    let data = nested_arrays(8);
    assert_eq!(
        Ok(Some(MajorType::Array)),
        validate_with_depth(&mut SliceSource::new(&data), 8)
    );
    assert_eq!(
        Err(Malformed),
        validate_with_depth(&mut SliceSource::new(&data), 7)
    );

    // The default limit copes with reasonable nesting
    assert_eq!(Ok(Some(MajorType::Array)), outcome(&nested_arrays(100)));

    // Indefinite nesting counts too
    let mut data = vec![0x9f; 8];
    data.extend(std::iter::repeat_n(0xff, 8));
    assert_eq!(
        Err(Malformed),
        validate_with_depth(&mut SliceSource::new(&data), 7)
    );
}
