use kanau_totp::OtpError;
use kanau_totp::base32::{self, encoded_len};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VECTORS: &[(&str, &str)] = &[
    ("", ""),
    ("f", "MY======"),
    ("fo", "MZXQ===="),
    ("foo", "MZXW6==="),
    ("foob", "MZXW6YQ="),
    ("fooba", "MZXW6YTB"),
    ("foobar", "MZXW6YTBOI======"),
    (
        "The quick red fox jumped over the lazy brown dogs.",
        "KRUGKIDROVUWG2ZAOJSWIIDGN54CA2TVNVYGKZBAN53GK4RAORUGKIDMMF5HSIDCOJXXO3RAMRXWO4ZO",
    ),
];

#[test]
fn test_encode_known_vectors() {
    for (plain, encoded) in VECTORS {
        assert_eq!(base32::encode(plain.as_bytes()), *encoded, "encoding {plain:?}");
    }
}

#[test]
fn test_decode_known_vectors() {
    for (plain, encoded) in VECTORS {
        assert_eq!(
            base32::decode(encoded).ok().as_deref(),
            Some(plain.as_bytes()),
            "decoding {encoded:?}"
        );
    }
}

#[test]
fn test_round_trip_up_to_1000_bytes() {
    let mut rng = StdRng::seed_from_u64(0x6238);
    for len in 0..=1000 {
        let mut bytes = vec![0u8; len];
        rng.fill(&mut bytes[..]);

        let encoded = base32::encode(&bytes);
        assert_eq!(encoded.len(), encoded_len(len));
        assert_eq!(encoded.len() % 8, 0);
        assert_eq!(base32::decode(&encoded).ok(), Some(bytes));
    }
}

#[test]
fn test_matches_reference_codec() {
    let mut rng = StdRng::seed_from_u64(4648);
    for len in [1, 2, 3, 4, 5, 19, 20, 21, 64, 255] {
        let mut bytes = vec![0u8; len];
        rng.fill(&mut bytes[..]);

        let ours = base32::encode(&bytes);
        let reference = fast32::base32::RFC4648_NOPAD.encode(&bytes);
        assert_eq!(ours.trim_end_matches('='), reference);
        assert_eq!(base32::decode(&reference).ok(), Some(bytes));
    }
}

#[test]
fn test_decode_without_padding() {
    assert_eq!(base32::decode("MZXW6YQ").ok(), Some(b"foob".to_vec()));
    assert_eq!(base32::decode("MY").ok(), Some(b"f".to_vec()));
}

#[test]
fn test_decode_skips_padding_anywhere() {
    assert_eq!(base32::decode("MZ=XW6===").ok(), Some(b"foo".to_vec()));
    assert_eq!(base32::decode("========").ok(), Some(Vec::new()));
}

#[test]
fn test_decode_rejects_invalid_characters() {
    for (input, position, byte) in [
        ("mzxw6===", 0, b'm'),
        ("MZXW1===", 4, b'1'),
        ("MZXW6 ==", 5, b' '),
        ("MZ8W6===", 2, b'8'),
        ("MZXW6YT\0", 7, 0),
    ] {
        match base32::decode(input) {
            Err(OtpError::InvalidCharacter {
                position: got_position,
                byte: got_byte,
            }) => {
                assert_eq!(got_position, position, "{input:?}");
                assert_eq!(got_byte, byte, "{input:?}");
            }
            other => panic!("expected InvalidCharacter for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_decode_into_leaves_buffer_untouched_on_error() {
    let mut buffer = [0xaa; 16];
    assert!(matches!(
        base32::decode_into(b"MZXW6YTB!=======", &mut buffer),
        Err(OtpError::InvalidCharacter { position: 8, .. })
    ));
    assert_eq!(buffer, [0xaa; 16]);

    assert!(matches!(
        base32::decode_into(b"MZXW6YTBOI======", &mut buffer[..5]),
        Err(OtpError::BufferTooSmall {
            required: 6,
            capacity: 5
        })
    ));
    assert_eq!(buffer, [0xaa; 16]);
}

#[test]
fn test_decode_into_exact_capacity() {
    let mut buffer = [0u8; 6];
    assert_eq!(base32::decode_into(b"MZXW6YTBOI======", &mut buffer).ok(), Some(6));
    assert_eq!(&buffer, b"foobar");
}

#[test]
fn test_encode_into_needs_room_for_terminator() {
    let mut buffer = [0xffu8; 9];
    assert!(matches!(
        base32::encode_into(b"foo", &mut buffer[..8]),
        Err(OtpError::BufferTooSmall {
            required: 9,
            capacity: 8
        })
    ));

    assert_eq!(base32::encode_into(b"foo", &mut buffer).ok(), Some(8));
    assert_eq!(&buffer[..8], b"MZXW6===");
    assert_eq!(buffer[8], 0);
}

#[test]
fn test_encode_into_empty_input() {
    assert_eq!(base32::encode_into(b"", &mut []).ok(), Some(0));

    let mut buffer = [0xffu8; 4];
    assert_eq!(base32::encode_into(b"", &mut buffer).ok(), Some(0));
    assert_eq!(buffer[0], 0);
}

#[test]
fn test_capacity_wrappers() {
    assert_eq!(
        base32::encode_with_capacity(b"foobar", 17).ok().as_deref(),
        Some("MZXW6YTBOI======")
    );
    assert!(matches!(
        base32::encode_with_capacity(b"foobar", 16),
        Err(OtpError::BufferTooSmall {
            required: 17,
            capacity: 16
        })
    ));

    assert_eq!(
        base32::decode_with_capacity("MZXW6YTBOI======", 6).ok(),
        Some(b"foobar".to_vec())
    );
    assert!(matches!(
        base32::decode_with_capacity("MZXW6YTBOI======", 5),
        Err(OtpError::BufferTooSmall {
            required: 6,
            capacity: 5
        })
    ));
}
