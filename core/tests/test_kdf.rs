#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use argon2::Argon2;
    use base64::engine::general_purpose::STANDARD_NO_PAD;
    use base64::Engine as _;

    use hashlab_core::crypto::{argon2 as argon2_unit, bcrypt as bcrypt_unit, pbkdf2 as pbkdf2_unit, scrypt as scrypt_unit};
    use hashlab_core::params::{
        Argon2Params, Argon2Variant, BcryptParams, Pbkdf2Hash, Pbkdf2Params, ScryptParams,
    };
    use hashlab_core::types::ComputationError;

    fn cheap_argon2(variant: Argon2Variant) -> Argon2Params {
        Argon2Params {
            variant,
            time: 1,
            memory: 64,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        }
    }

    // ---------------------------------------------------------------------
    // bcrypt
    // ---------------------------------------------------------------------

    #[test]
    fn bcrypt_cost_10_has_canonical_shape() {
        let res = bcrypt_unit::hash("password123", &BcryptParams { cost: 10, salt_length: 16 }).unwrap();

        assert!(res.hash.starts_with("$2a$10$"));
        assert_eq!(res.hash.len(), "$2a$10$".len() + 53);
        assert_eq!(res.breakdown.len(), 4);
        assert_eq!(res.breakdown[1].value, "10");
        assert_eq!(res.breakdown[1].description, "2^10 iterations");
        assert!(res.time_ms >= 0.0);
    }

    #[test]
    fn bcrypt_segments_reassemble_hash() {
        let res = bcrypt_unit::hash("pw", &BcryptParams { cost: 4, salt_length: 0 }).unwrap();
        let b = &res.breakdown;
        assert_eq!(b[0].value, "2a");
        assert_eq!(b[2].value.len(), 22);
        assert_eq!(b[3].value.len(), 31);
        let rebuilt = format!("${}${}${}{}", b[0].value, b[1].value, b[2].value, b[3].value);
        assert_eq!(rebuilt, res.hash);
        assert!(bcrypt::verify("pw", &res.hash).unwrap());
    }

    #[test]
    fn bcrypt_salts_are_fresh() {
        let p = BcryptParams { cost: 4, salt_length: 16 };
        let a = bcrypt_unit::hash("same", &p).unwrap();
        let b = bcrypt_unit::hash("same", &p).unwrap();
        assert_ne!(a.breakdown[2].value, b.breakdown[2].value);
    }

    #[test]
    fn bcrypt_rejects_cost_out_of_range() {
        let err = bcrypt_unit::hash("pw", &BcryptParams { cost: 3, salt_length: 16 }).unwrap_err();
        assert!(matches!(err, ComputationError::InvalidParameter { field: "cost", .. }));
    }

    // ---------------------------------------------------------------------
    // argon2
    // ---------------------------------------------------------------------

    #[test]
    fn argon2_phc_string_splits_into_five() {
        let res = argon2_unit::hash("hunter2", &cheap_argon2(Argon2Variant::Argon2id)).unwrap();
        let b = &res.breakdown;

        assert_eq!(b.len(), 5);
        assert_eq!(b[0].value, "argon2id");
        assert_eq!(b[1].value, "v=19");
        assert_eq!(b[2].value, "m=64,t=1,p=1");
        assert_eq!(STANDARD_NO_PAD.decode(&b[3].value).unwrap().len(), 16);
        assert_eq!(STANDARD_NO_PAD.decode(&b[4].value).unwrap().len(), 32);
        assert_eq!(
            res.hash,
            format!("${}${}${}${}${}", b[0].value, b[1].value, b[2].value, b[3].value, b[4].value)
        );
    }

    #[test]
    fn argon2_output_verifies_for_every_variant() {
        for variant in [Argon2Variant::Argon2id, Argon2Variant::Argon2i, Argon2Variant::Argon2d] {
            let res = argon2_unit::hash("hunter2", &cheap_argon2(variant)).unwrap();
            assert_eq!(res.breakdown[0].value, variant.as_str());
            let parsed = PasswordHash::new(&res.hash).unwrap();
            assert!(Argon2::default().verify_password(b"hunter2", &parsed).is_ok());
            assert!(Argon2::default().verify_password(b"hunter3", &parsed).is_err());
        }
    }

    #[test]
    fn argon2_backend_is_loaded_once_and_reused() {
        argon2_unit::hash("a", &cheap_argon2(Argon2Variant::Argon2id)).unwrap();
        assert!(argon2_unit::is_loaded());
        argon2_unit::hash("b", &cheap_argon2(Argon2Variant::Argon2id)).unwrap();
        assert!(argon2_unit::is_loaded());
    }

    #[test]
    fn argon2_rejects_bad_ranges() {
        let short_salt = Argon2Params { salt_length: 4, ..cheap_argon2(Argon2Variant::Argon2id) };
        assert!(matches!(
            argon2_unit::hash("x", &short_salt),
            Err(ComputationError::InvalidParameter { field: "saltLength", .. })
        ));

        let low_memory = Argon2Params { memory: 8, parallelism: 2, ..cheap_argon2(Argon2Variant::Argon2id) };
        assert!(matches!(
            argon2_unit::hash("x", &low_memory),
            Err(ComputationError::InvalidParameter { field: "memory", .. })
        ));
    }

    // ---------------------------------------------------------------------
    // pbkdf2
    // ---------------------------------------------------------------------

    #[test]
    fn pbkdf2_sha256_scenario() {
        let params = Pbkdf2Params { iterations: 1000, hash: Pbkdf2Hash::Sha256, salt_length: 16 };
        let res = pbkdf2_unit::hash("hello", &params).unwrap();

        let parts: Vec<&str> = res.hash.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "pbkdf2_sha256");
        assert_eq!(parts[1], "1000");
        assert_eq!(parts[2].len(), 32);
        assert_eq!(parts[3].len(), 64);
        assert!(parts[2..].iter().all(|p| p.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())));

        assert_eq!(res.breakdown[0].value, "PBKDF2-SHA-256");
        assert_eq!(res.breakdown[1].value, "1000");
        assert_eq!(res.breakdown[2].value, parts[2]);
        assert_eq!(res.breakdown[3].value, parts[3]);
    }

    #[test]
    fn pbkdf2_breakdown_reproduces_key() {
        for prf in [Pbkdf2Hash::Sha256, Pbkdf2Hash::Sha512] {
            let params = Pbkdf2Params { iterations: 10, hash: prf, salt_length: 8 };
            let res = pbkdf2_unit::hash("hello", &params).unwrap();
            let salt = hex::decode(&res.breakdown[2].value).unwrap();
            let key = hex::decode(&res.breakdown[3].value).unwrap();

            assert_eq!(hex::encode(&salt), res.breakdown[2].value);
            assert_eq!(key, pbkdf2_unit::derive(b"hello", &salt, 10, prf).to_vec());
            assert!(res.hash.starts_with(&format!("pbkdf2_{}$", prf.tag())));
        }
    }

    // ---------------------------------------------------------------------
    // scrypt
    // ---------------------------------------------------------------------

    #[test]
    fn scrypt_output_matches_crate() {
        let params = ScryptParams { n: 16, r: 1, p: 1, dk_len: 24, salt_length: 8 };
        let res = scrypt_unit::hash("pw", &params).unwrap();

        let parts: Vec<&str> = res.hash.split('$').collect();
        assert_eq!(parts[0], "scrypt");
        assert_eq!(parts[1], "N=16,r=1,p=1");
        assert_eq!(res.breakdown[1].value, "N=16,r=1,p=1");

        let salt = hex::decode(parts[2]).unwrap();
        let mut expected = vec![0u8; 24];
        scrypt::scrypt(b"pw", &salt, &scrypt::Params::new(4, 1, 1, 32).unwrap(), &mut expected).unwrap();
        assert_eq!(parts[3], hex::encode(expected));
    }

    #[test]
    fn scrypt_rejects_non_power_of_two() {
        let params = ScryptParams { n: 100, r: 1, p: 1, dk_len: 16, salt_length: 8 };
        assert!(matches!(
            scrypt_unit::hash("pw", &params),
            Err(ComputationError::InvalidParameter { field: "N", .. })
        ));
    }

    // Property: salt and key hex segments round-trip through hex decode.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_pbkdf2_hex_segments_round_trip(salt_len in 0usize..48, pw in ".{0,24}") {
            let params = Pbkdf2Params { iterations: 2, hash: Pbkdf2Hash::Sha256, salt_length: salt_len };
            let res = pbkdf2_unit::hash(&pw, &params).unwrap();
            let salt = hex::decode(&res.breakdown[2].value).unwrap();
            prop_assert_eq!(salt.len(), salt_len);
            prop_assert_eq!(hex::encode(&salt), res.breakdown[2].value.clone());
            let key = hex::decode(&res.breakdown[3].value).unwrap();
            prop_assert_eq!(key.len(), 32);
        }

        #[test]
        fn prop_scrypt_dk_len_is_honoured(dk_len in 1usize..80) {
            let params = ScryptParams { n: 2, r: 1, p: 1, dk_len, salt_length: 4 };
            let res = scrypt_unit::hash("pw", &params).unwrap();
            prop_assert_eq!(hex::decode(&res.breakdown[3].value).unwrap().len(), dk_len);
        }
    }
}
