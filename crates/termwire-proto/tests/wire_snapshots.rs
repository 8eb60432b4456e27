//! Snapshot tests for wire format stability.
//!
//! These tests pin the exact byte sequences of framed terms as inline
//! snapshots. If the wire format changes, they fail, ensuring we don't
//! accidentally break compatibility with Erlang/OTP peers. Each snapshot
//! is also decoded back to prove both directions agree.

use insta::assert_snapshot;
use num_bigint::BigInt;
use termwire_proto::{Atom, Context, Export, Pid, Ref, Term};

/// Helper to encode a framed term to a hex string for snapshotting.
fn term_to_hex(term: &Term) -> String {
    let ctx = Context::new();
    let mut buf = Vec::new();
    ctx.encoder(&mut buf).encode(term).expect("encoding should succeed");
    hex::encode(&buf)
}

fn decode_hex(hex_bytes: &str) -> Term {
    let bytes = hex::decode(hex_bytes).expect("valid hex");
    let ctx = Context::new();
    ctx.decoder(bytes.as_slice()).decode().expect("decoding should succeed")
}

#[test]
fn snapshot_boolean_true() {
    let hex = term_to_hex(&Term::Bool(true));
    assert_snapshot!(hex, @"83730474727565");
    assert_eq!(decode_hex(&hex), Term::Bool(true));
}

#[test]
fn snapshot_boolean_false() {
    let hex = term_to_hex(&Term::Bool(false));
    assert_snapshot!(hex, @"83730566616c7365");
    assert_eq!(decode_hex(&hex), Term::Bool(false));
}

#[test]
fn snapshot_small_integer() {
    let hex = term_to_hex(&Term::Int(42));
    assert_snapshot!(hex, @"83612a");
    assert_eq!(decode_hex(&hex), Term::Int(42));
}

#[test]
fn snapshot_integer() {
    let hex = term_to_hex(&Term::Int(300));
    assert_snapshot!(hex, @"83620000012c");
    assert_eq!(decode_hex(&hex), Term::Int(300));
}

#[test]
fn snapshot_float() {
    let hex = term_to_hex(&Term::Float(1.0));
    assert_snapshot!(hex, @"83463ff0000000000000");
    assert_eq!(decode_hex(&hex), Term::Float(1.0));
}

#[test]
fn snapshot_atom() {
    let hex = term_to_hex(&Term::Atom(Atom::from("ok")));
    assert_snapshot!(hex, @"8373026f6b");
    assert_eq!(decode_hex(&hex), Term::Atom(Atom::from("ok")));
}

#[test]
fn snapshot_string() {
    let hex = term_to_hex(&Term::String("hi".to_string()));
    assert_snapshot!(hex, @"836b00026869");
    assert_eq!(decode_hex(&hex), Term::String("hi".to_string()));
}

#[test]
fn snapshot_binary() {
    let hex = term_to_hex(&Term::Binary(vec![0xCA, 0xFE, 0xBA, 0xBE].into()));
    assert_snapshot!(hex, @"836d00000004cafebabe");
    assert_eq!(decode_hex(&hex), Term::Binary(vec![0xCA, 0xFE, 0xBA, 0xBE].into()));
}

#[test]
fn snapshot_ok_tuple() {
    let term = Term::Tuple(vec![Term::Atom(Atom::from("ok")), Term::Int(1)]);
    let hex = term_to_hex(&term);
    assert_snapshot!(hex, @"83680273026f6b6101");
    assert_eq!(decode_hex(&hex), term);
}

#[test]
fn snapshot_proper_list() {
    let term = Term::List(vec![Term::Int(1), Term::Int(2)]);
    let hex = term_to_hex(&term);
    assert_snapshot!(hex, @"836c00000002610161026a");
    assert_eq!(decode_hex(&hex), term);
}

#[test]
fn snapshot_nil() {
    let hex = term_to_hex(&Term::Nil);
    assert_snapshot!(hex, @"836a");
    assert_eq!(decode_hex(&hex), Term::Nil);
}

#[test]
fn snapshot_empty_list() {
    let hex = term_to_hex(&Term::List(vec![]));
    assert_snapshot!(hex, @"836c000000006a");
    assert_eq!(decode_hex(&hex), Term::List(vec![]));
}

#[test]
fn snapshot_negative_big_integer() {
    let hex = term_to_hex(&Term::BigInt(BigInt::from(-5)));
    assert_snapshot!(hex, @"836e010105");
    // Narrowing brings small magnitudes back to the native lane.
    assert_eq!(decode_hex(&hex), Term::Int(-5));
}

#[test]
fn snapshot_big_integer_beyond_i64() {
    // 2^64 needs nine little-endian magnitude bytes.
    let value = BigInt::from(u64::MAX) + 1u64;
    let hex = term_to_hex(&Term::BigInt(value.clone()));
    assert_snapshot!(hex, @"836e0900000000000000000001");
    assert_eq!(decode_hex(&hex), Term::BigInt(value));
}

#[test]
fn snapshot_pid() {
    let term = Term::Pid(Pid {
        node: Atom::from("n"),
        id: 3,
        serial: 9,
        creation: 2,
    });
    let hex = term_to_hex(&term);
    assert_snapshot!(hex, @"836773016e000000030000000902");
    assert_eq!(decode_hex(&hex), term);
}

#[test]
fn snapshot_reference() {
    let term = Term::Ref(Ref {
        node: Atom::from("n"),
        creation: 2,
        ids: vec![9],
    });
    let hex = term_to_hex(&term);
    assert_snapshot!(hex, @"8372000173016e0200000009");
    assert_eq!(decode_hex(&hex), term);
}

#[test]
fn snapshot_export() {
    let term = Term::Export(Export {
        module: Atom::from("m"),
        function: Atom::from("f"),
        arity: 1,
    });
    let hex = term_to_hex(&term);
    assert_snapshot!(hex, @"837173016d73016601");
    assert_eq!(decode_hex(&hex), term);
}

#[test]
fn decode_list_scenario_from_spec_bytes() {
    // LIST of length 2 carrying 1 and 2 with a NIL tail.
    let term = decode_hex("836c00000002610161026a");
    assert_eq!(term, Term::List(vec![Term::Int(1), Term::Int(2)]));
}
