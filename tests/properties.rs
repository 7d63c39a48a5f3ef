//! Property-based tests over the round-trip, canonicalization, and
//! length invariants.

use alloy_primitives::{Address, Bytes, U256};
use proptest::prelude::*;
use sol_abi::{decode, encode, parse_parameters, AbiType, AbiValue, ArrayLen, Param, Parameters};

/// A small, self-contained generator for a `(AbiType, AbiValue)` pair,
/// bounded to a handful of scalar families — enough to exercise head/tail
/// placement for both static and dynamic leaves without the strategy
/// itself becoming the thing under test.
fn scalar_pair() -> impl Strategy<Value = (AbiType, AbiValue)> {
    prop_oneof![
        any::<bool>().prop_map(|b| (AbiType::BOOL, AbiValue::Bool(b))),
        any::<u64>().prop_map(|v| (AbiType::uint(256), AbiValue::Uint { bits: 256, value: U256::from(v) })),
        (0u64..256).prop_map(|v| (AbiType::uint(8), AbiValue::Uint { bits: 8, value: U256::from(v) })),
        any::<[u8; 20]>().prop_map(|b| (AbiType::ADDRESS, AbiValue::Address(Address::from(b)))),
        "[a-zA-Z0-9 ]{0,40}".prop_map(|s| (AbiType::STRING, AbiValue::Text(s))),
        proptest::collection::vec(any::<u8>(), 0..40)
            .prop_map(|b| (AbiType::BYTES, AbiValue::Bytes(Bytes::from(b)))),
    ]
}

/// One parameter slot: either a bare scalar, or a dynamic list of scalars
/// of one freshly-chosen element type — covering both the static-leaf and
/// dynamic-array/dynamic-tuple-of-dynamic-element head/tail shapes.
fn param_pair() -> impl Strategy<Value = (AbiType, AbiValue)> {
    prop_oneof![
        scalar_pair(),
        scalar_pair().prop_flat_map(|(inner_ty, _)| {
            proptest::collection::vec(value_of_type(inner_ty.clone()), 0..4)
                .prop_map(move |values| {
                    (AbiType::Array { inner: Box::new(inner_ty.clone()), len: ArrayLen::Dynamic }, AbiValue::List(values))
                })
        }),
    ]
}

/// Generates values matching a previously-chosen `AbiType`, so every
/// element of a generated array is the same type (as ABI requires).
fn value_of_type(ty: AbiType) -> impl Strategy<Value = AbiValue> {
    match ty {
        AbiType::Scalar { family: sol_abi::ScalarFamily::Bool, .. } => {
            any::<bool>().prop_map(AbiValue::Bool).boxed()
        }
        AbiType::Scalar { family: sol_abi::ScalarFamily::Uint, size } => any::<u64>()
            .prop_map(move |v| AbiValue::Uint { bits: size, value: U256::from(v) })
            .boxed(),
        AbiType::Scalar { family: sol_abi::ScalarFamily::Address, .. } => {
            any::<[u8; 20]>().prop_map(|b| AbiValue::Address(Address::from(b))).boxed()
        }
        AbiType::Scalar { family: sol_abi::ScalarFamily::String, .. } => {
            "[a-zA-Z0-9 ]{0,40}".prop_map(AbiValue::Text).boxed()
        }
        AbiType::Scalar { family: sol_abi::ScalarFamily::Bytes, .. } => {
            proptest::collection::vec(any::<u8>(), 0..40).prop_map(|b| AbiValue::Bytes(Bytes::from(b))).boxed()
        }
        _ => unreachable!("scalar_pair() never produces this type"),
    }
}

fn single_param(ty: AbiType) -> Parameters {
    Parameters(vec![Param { position: 0, name: "x".to_string(), ty, indexed: false }])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip((ty, value) in param_pair()) {
        let params = single_param(ty);
        let encoded = encode(&params, std::slice::from_ref(&value)).unwrap();
        prop_assert_eq!(encoded.len() % 32, 0);
        let decoded = decode(&params, &encoded).unwrap();
        prop_assert_eq!(&decoded[0].1, &value);
    }

    #[test]
    fn canonicalization_is_idempotent(bits in (1u16..32).prop_map(|n| n * 8)) {
        let descriptor = format!("(uint{bits})");
        let once = parse_parameters(&descriptor).unwrap().canonical_type();
        let twice = parse_parameters(&once).unwrap().canonical_type();
        prop_assert_eq!(once, twice);
    }
}
