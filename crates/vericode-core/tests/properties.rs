//! Property tests for code generation and validation

use proptest::prelude::*;

use vericode_core::{
    generate_at, validate_at, CharClasses, Charset, GenerationParams, SecretKey, TimeBucket,
};

fn classes() -> impl Strategy<Value = CharClasses> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_filter("at least one class", |(d, u, l)| *d || *u || *l)
        .prop_map(|(d, u, l)| CharClasses::new(d, u, l))
}

fn params() -> impl Strategy<Value = GenerationParams> {
    (1u64..=3600, 1usize..=40, classes(), proptest::option::of(any::<u64>())).prop_map(
        |(period, length, classes, counter)| {
            GenerationParams::new()
                .with_period(period)
                .with_length(length)
                .with_classes(classes)
                .with_counter(counter)
        },
    )
}

fn secret() -> impl Strategy<Value = SecretKey> {
    proptest::collection::vec(any::<u8>(), 1..64).prop_map(|b| SecretKey::new(b).unwrap())
}

proptest! {
    #[test]
    fn generation_is_deterministic(
        user in "[a-z0-9@.]{1,24}",
        key in secret(),
        p in params(),
        now in -1_000_000_000i64..4_000_000_000,
    ) {
        let a = generate_at(&user, &key, &p, now).unwrap();
        let b = generate_at(&user, &key, &p, now).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn same_bucket_same_code(
        user in "[a-z]{1,12}",
        key in secret(),
        p in params(),
        now in 0i64..4_000_000_000,
    ) {
        let bucket_start = TimeBucket::at(now, p.period).unwrap().value() * p.period as i64;
        let a = generate_at(&user, &key, &p, bucket_start).unwrap();
        let b = generate_at(&user, &key, &p, bucket_start + p.period as i64 - 1).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn length_and_membership(
        user in "\\PC{1,16}",
        key in secret(),
        p in params(),
        now in any::<i64>(),
    ) {
        let code = generate_at(&user, &key, &p, now).unwrap();
        let charset = Charset::build(p.classes).unwrap();
        prop_assert_eq!(code.chars().count(), p.length);
        prop_assert!(code.chars().all(|c| charset.contains(c)));
    }

    #[test]
    fn window_tolerance(
        user in "[a-z]{1,12}",
        key in secret(),
        period in 1u64..=900,
        issued in 0i64..2_000_000_000,
        delta in -3i64..4,
        offset in 0u64..900,
    ) {
        // 8 symbols keep accidental cross-bucket matches out of reach
        let p = GenerationParams::new()
            .with_period(period)
            .with_length(8)
            .with_classes(CharClasses::ALPHANUMERIC);
        let code = generate_at(&user, &key, &p, issued).unwrap();

        let issued_bucket = TimeBucket::at(issued, period).unwrap().value();
        let check_at = (issued_bucket + delta) * period as i64 + (offset % period) as i64;
        let valid = validate_at(&code, &user, &key, &p, check_at).unwrap();

        prop_assert_eq!(valid, delta == 0 || delta == 1);
    }

    #[test]
    fn key_sensitivity(
        user in "[a-z]{1,12}",
        k1 in secret(),
        k2 in secret(),
        now in 0i64..4_000_000_000,
    ) {
        prop_assume!(k1.as_bytes() != k2.as_bytes());
        let p = GenerationParams::new()
            .with_length(12)
            .with_classes(CharClasses::ALPHANUMERIC);
        let a = generate_at(&user, &k1, &p, now).unwrap();
        let b = generate_at(&user, &k2, &p, now).unwrap();
        prop_assert_ne!(a, b);
    }

    #[test]
    fn counter_separation(
        user in "[a-z]{1,12}",
        key in secret(),
        c1 in any::<u64>(),
        c2 in any::<u64>(),
        now in 0i64..4_000_000_000,
    ) {
        prop_assume!(c1 != c2);
        let base = GenerationParams::new()
            .with_length(12)
            .with_classes(CharClasses::ALPHANUMERIC);
        let a = generate_at(&user, &key, &base.with_counter(Some(c1)), now).unwrap();
        let b = generate_at(&user, &key, &base.with_counter(Some(c2)), now).unwrap();
        prop_assert_ne!(a, b);
    }
}

#[test]
fn scenario_alice_default_period() {
    let key = SecretKey::try_from("fixture-key").unwrap();
    let p = GenerationParams::default();
    let code = generate_at("alice", &key, &p, 1000).unwrap();

    assert!(validate_at(&code, "alice", &key, &p, 1050).unwrap());
    assert!(validate_at(&code, "alice", &key, &p, 1350).unwrap());
    assert!(!validate_at(&code, "alice", &key, &p, 1650).unwrap());
}

#[test]
fn scenario_counters_differ() {
    let key = SecretKey::try_from("fixture-key").unwrap();
    let c1 = generate_at("alice", &key, &GenerationParams::new().with_counter(Some(1)), 1000);
    let c2 = generate_at("alice", &key, &GenerationParams::new().with_counter(Some(2)), 1000);
    assert_ne!(c1.unwrap(), c2.unwrap());
}

#[test]
fn scenario_known_vector_across_windows() {
    let key = SecretKey::try_from("key").unwrap();
    let p = GenerationParams::default();
    assert_eq!(generate_at("alice", &key, &p, 1000).unwrap(), "081849");

    assert!(validate_at("081849", "alice", &key, &p, 1350).unwrap());
    assert!(!validate_at("081849", "alice", &key, &p, 1650).unwrap());
    assert!(!validate_at("081849", "alice", &key, &p.with_counter(Some(7)), 1000).unwrap());
    assert!(validate_at("081027", "alice", &key, &p.with_counter(Some(7)), 1000).unwrap());
}
