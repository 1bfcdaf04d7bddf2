//! Round-trip decoding and encoding tests for directory information.
//!
//! These tests verify that documents survive decode, fold, unfold and
//! re-decode without losing any field component.

use dirinfo_core::config::DecodeConfig;

use super::fixtures::*;
use crate::error::DirInfoError;
use crate::rfc::dirinfo::build::{encode_text, fold};
use crate::rfc::dirinfo::parse::{decode_fields, decode_text, unfold};
use crate::rfc::dirinfo::{Directory, Field, FieldValue, Params, expand, split_outer_inner};

fn decode(input: &str) -> Directory {
    Directory::decode(input, &DecodeConfig::strict()).expect("fixture should decode")
}

fn compare_fields(a: &Field, b: &Field) -> Result<(), String> {
    if a.group() != b.group() {
        return Err(format!("Group mismatch: {:?} vs {:?}", a.group(), b.group()));
    }
    if a.name() != b.name() {
        return Err(format!("Name mismatch: {} vs {}", a.name(), b.name()));
    }
    if a.params() != b.params() {
        return Err(format!(
            "Param mismatch for {}: {:?} vs {:?}",
            a.name(),
            a.params(),
            b.params()
        ));
    }
    if a.value_bytes().ok() != b.value_bytes().ok() {
        return Err(format!("Value mismatch for {}", a.name()));
    }
    Ok(())
}

/// Decode a document, encode it at several widths, then decode again and
/// compare field by field.
fn round_trip(input: &str) -> Result<(), String> {
    let first = Directory::decode(input, &DecodeConfig::strict())
        .map_err(|e| format!("First decode failed: {e}"))?;

    for (width, newline) in [(0, "\n"), (2, "\r\n"), (40, "\n"), (75, "\r\n")] {
        let encoded = first
            .encode(width, newline)
            .map_err(|e| format!("Encode at width {width} failed: {e}"))?;

        let second = Directory::decode(&encoded, &DecodeConfig::strict())
            .map_err(|e| format!("Second decode at width {width} failed: {e}\n{encoded}"))?;

        if first.len() != second.len() {
            return Err(format!(
                "Field count mismatch at width {width}: {} vs {}",
                first.len(),
                second.len()
            ));
        }

        for (a, b) in first.fields().iter().zip(second.fields()) {
            compare_fields(a, b)?;
        }
    }

    first
        .entities()
        .map_err(|e| format!("Expand failed: {e}"))?;

    Ok(())
}

#[test]
fn round_trip_rfc2425_person() {
    round_trip(RFC2425_PERSON).expect("round trip should succeed");
}

#[test]
fn round_trip_vcard_30() {
    round_trip(VCARD_30).expect("round trip should succeed");
}

#[test]
fn round_trip_vcard_21() {
    round_trip(VCARD_21).expect("round trip should succeed");
}

#[test]
fn round_trip_vcard_with_photo() {
    round_trip(VCARD_WITH_PHOTO).expect("round trip should succeed");
}

#[test]
fn round_trip_vcard_grouped() {
    round_trip(VCARD_GROUPED).expect("round trip should succeed");
}

#[test]
fn round_trip_vcalendar_nested() {
    round_trip(VCALENDAR_NESTED).expect("round trip should succeed");
}

#[test]
fn round_trip_long_note() {
    let card = format!(
        "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Long note test\r\n\
NOTE:{}\r\n\
END:VCARD\r\n",
        "Üñïçødé, ".repeat(30)
    );
    round_trip(&card).expect("round trip should succeed");
}

#[test]
fn round_trip_after_mutation() {
    let mut card = decode(VCARD_30);
    card.field_mut("ORG")
        .expect("ORG present")
        .set_value("Lotus; IBM, et al.")
        .expect("set value");
    card.field_mut("ADR")
        .expect("ADR present")
        .add_param_value("TYPE", "pref")
        .expect("add param value");

    let encoded = card.encode(75, "\r\n").expect("encode");
    round_trip(&encoded).expect("round trip should succeed");

    let again = decode(&encoded);
    assert_eq!(
        again.field("ORG").unwrap().as_text().unwrap(),
        "Lotus; IBM, et al."
    );
    assert!(again.field("ADR").unwrap().is_pref());
}

#[test]
fn encode_width_zero_is_unwrapped() {
    let card = decode(VCARD_WITH_PHOTO);
    let photo = card.field("PHOTO").unwrap();
    assert_eq!(
        photo.encode(0, "\n").unwrap(),
        format!("{}\n", photo.line())
    );
    assert_eq!(fold(photo.line(), 0, "\n").unwrap(), format!("{}\n", photo.line()));
}

#[test]
fn unfold_is_idempotent_after_refold() {
    for fixture in [RFC2425_PERSON, VCARD_30, VCARD_21, VCARD_WITH_PHOTO, VCARD_GROUPED] {
        for line in unfold(fixture) {
            for width in [2, 5, 75] {
                let folded = fold(&line, width, "\r\n").unwrap();
                assert_eq!(unfold(&folded), vec![line.clone()], "width {width}");
            }
        }
    }
}

#[test]
fn v21_and_v30_params_are_equivalent() {
    let v21 = decode(VCARD_21);
    let v30 = decode(VCARD_30);

    let tel21 = v21.field("TEL").unwrap();
    let tel30 = Field::decode("TEL;TYPE=WORK,VOICE:+1-919-676-9515").unwrap();
    assert_eq!(tel21.params(), tel30.params());
    assert_eq!(tel21.raw_value(), tel30.raw_value());

    assert!(v30.field("TEL").unwrap().is_type("work"));
}

#[test]
fn quoted_printable_soft_break_joins_lines() {
    let card = decode(VCARD_21);
    let adr = card.field("ADR").unwrap();
    assert_eq!(
        adr.value_str().unwrap(),
        ";;6544 Battleford Drive\r\nSuite 100;Raleigh;NC"
    );

    let note = card.field("NOTE").unwrap();
    assert_eq!(note.value_str().unwrap(), "Café au lait");
}

#[test]
fn folded_photo_decodes_to_bytes() {
    let card = decode(VCARD_WITH_PHOTO);
    let photo = card.field("PHOTO").unwrap();
    let expected: Vec<u8> = (0..96).collect();
    assert_eq!(photo.value_bytes().unwrap(), expected);
    assert!(photo.is_type("png"));
}

#[test]
fn base64_create_round_trip() {
    let bytes: Vec<u8> = (0..=255).rev().collect();
    let field = Field::create(
        "PHOTO",
        FieldValue::Binary(bytes.clone()),
        Params::new().with("ENCODING", ["b64"]).with("TYPE", ["JPEG"]),
    )
    .unwrap();

    let encoded = field.encode(75, "\r\n").unwrap();
    let decoded = decode_fields(&encoded, &DecodeConfig::strict()).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].value_bytes().unwrap(), bytes);
    assert_eq!(decoded[0].param_value("ENCODING"), Some("B"));
}

#[test]
fn grouped_fields() {
    let card = decode(VCARD_GROUPED);
    assert_eq!(card.groups(), ["item1", "item2"]);

    let email = card.field("email").unwrap();
    assert!(email.is_pref());
    assert_eq!(email.param("TYPE").unwrap(), ["INTERNET", "pref"]);

    let label = card.fields_in_group("ITEM1").nth(1).unwrap();
    assert_eq!(label.name(), "X-ABLABEL");
    assert_eq!(label.raw_value(), Some("_$!<Work>!$_"));

    let social = card.field("X-SOCIALPROFILE").unwrap();
    assert_eq!(social.param_value("TYPE"), Some("x-custom:label"));
    assert_eq!(social.param_value("X-USER"), Some("jane"));
}

#[test]
fn nested_entities() {
    let tree = decode(VCALENDAR_NESTED).entities().unwrap();
    let (outer, inner) = split_outer_inner(&tree);
    assert!(outer.is_empty());
    assert_eq!(inner.len(), 1);

    let (cal_fields, components) = inner[0].split_outer_inner();
    let names: Vec<&str> = cal_fields.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["BEGIN", "VERSION", "END"]);
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].kind(), "VEVENT");
    assert_eq!(components[1].kind(), "VTODO");
}

#[test]
fn simple_card_expands_to_one_block() {
    let fields = decode_fields(
        "BEGIN:VCARD\r\nN:Doe;John\r\nEND:VCARD\r\n",
        &DecodeConfig::strict(),
    )
    .unwrap();
    let tree = expand(fields).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].as_block().unwrap().flatten().len(), 3);
}

#[test]
fn date_values() {
    let cal = decode(VCALENDAR_NESTED);

    let start = cal.field("DTSTART").unwrap().as_date_times().unwrap();
    assert_eq!(start[0].components(), [1996, 10, 22, 14, 0, 0]);
    assert!(start[0].time.zone.is_none());

    let end = cal.field("DTEND").unwrap().as_date_times().unwrap();
    assert!(end[0].time.is_utc());

    let rdates = cal.field("RDATE").unwrap().as_dates().unwrap();
    assert_eq!(rdates.len(), 2);
    assert_eq!((rdates[1].year, rdates[1].month, rdates[1].day), (1996, 11, 5));

    let due = cal.field("DUE").unwrap().as_dates().unwrap();
    assert_eq!((due[0].year, due[0].month, due[0].day), (1996, 10, 25));

    let summary = cal.field("SUMMARY").unwrap().as_text().unwrap();
    assert_eq!(summary, "Design review, part 2");
}

#[test]
fn text_escape_inverse() {
    assert_eq!(decode_text("Item1\\, Item2"), "Item1, Item2");
    assert_eq!(encode_text("Item1, Item2"), "Item1\\, Item2");
}

#[test_log::test]
fn mismatched_begin_end() {
    let card = decode(MISMATCHED);
    match card.entities().unwrap_err() {
        DirInfoError::MismatchedBeginEnd { begin, end } => {
            assert_eq!(begin, "VCARD");
            assert_eq!(end, "VEVENT");
        }
        other => panic!("expected MismatchedBeginEnd, got {other:?}"),
    }
    assert!(card.check_begin_end(None).is_err());
}

#[test_log::test]
fn invalid_line_policy() {
    let err = Directory::decode(WITH_GARBAGE, &DecodeConfig::strict()).unwrap_err();
    match err {
        DirInfoError::InvalidEncoding(msg) => assert!(msg.starts_with("line 3:"), "{msg}"),
        other => panic!("expected InvalidEncoding, got {other:?}"),
    }

    let card = Directory::decode(WITH_GARBAGE, &DecodeConfig::lenient()).unwrap();
    assert_eq!(card.len(), 4);
    assert!(!card.fields()[2].is_valid());
    card.check_begin_end(Some("VCARD")).unwrap();

    let tree = card.entities().unwrap();
    assert_eq!(tree[0].as_block().unwrap().children.len(), 2);
}

#[test]
fn parameter_set_semantics() {
    let mut tel = decode(VCARD_30).field("TEL").unwrap().clone();

    tel.add_param_value("type", "voice").unwrap();
    assert_eq!(tel.param("TYPE").unwrap(), ["VOICE", "MSG", "WORK"]);

    tel.add_param_value("TYPE", "cell").unwrap();
    tel.remove_param_value("TYPE", "msg").unwrap();
    tel.remove_param_value("TYPE", "pager").unwrap();
    assert_eq!(tel.param("TYPE").unwrap(), ["VOICE", "WORK", "cell"]);
    assert_eq!(tel.line(), "TEL;TYPE=VOICE,WORK,cell:+1-919-676-9515");
}
