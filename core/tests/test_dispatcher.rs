#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use hashlab_core::constants::default_params;
    use hashlab_core::dispatch::{catalog, compute, dispatch, handle_message, resolve, resolve_name};
    use hashlab_core::dispatch::{WorkerRequest, WorkerResponse};
    use hashlab_core::params::{AlgorithmId, Family, HashingParams};
    use hashlab_core::types::ComputationError;

    /// Defaults with costs lowered for test speed.
    fn cheap_params(id: AlgorithmId) -> HashingParams {
        match default_params(id) {
            HashingParams::Bcrypt(mut p) => {
                p.cost = 4;
                HashingParams::Bcrypt(p)
            }
            HashingParams::Argon2(mut p) => {
                p.memory = 64;
                p.time = 1;
                p.parallelism = 1;
                HashingParams::Argon2(p)
            }
            HashingParams::Pbkdf2(mut p) => {
                p.iterations = 1000;
                HashingParams::Pbkdf2(p)
            }
            HashingParams::Scrypt(mut p) => {
                p.n = 16;
                HashingParams::Scrypt(p)
            }
            other => other,
        }
    }

    #[test]
    fn unknown_algorithm_yields_exact_error() {
        let resp = dispatch(WorkerRequest::new("1", "pw", json!({ "name": "not-real" })));
        assert_eq!(resp.id, "1");
        assert_eq!(resp.error.as_deref(), Some("Unknown algorithm: not-real"));
        assert!(resp.result.is_none());
    }

    #[test]
    fn every_algorithm_matches_registry_breakdown_len() {
        for id in AlgorithmId::ALL {
            let req = WorkerRequest::from_params(id.as_str(), "password", &cheap_params(id)).unwrap();
            let resp = dispatch(req);
            assert_eq!(resp.id, id.as_str());
            let result = resp.into_result().unwrap_or_else(|e| panic!("{id}: {e}"));
            assert_eq!(result.breakdown.len(), resolve(id).breakdown_len, "{id}");
            assert!(result.time_ms >= 0.0);
        }
    }

    #[test]
    fn compute_routes_by_variant() {
        let res = compute("abc", &default_params(AlgorithmId::Md5)).unwrap();
        assert_eq!(res.hash, "900150983cd24fb0d6963f7d28e17f72");

        let res = compute("abc", &default_params(AlgorithmId::Sha3_128)).unwrap();
        assert_eq!(res.breakdown[0].value, "SHA-3-128");
    }

    #[test]
    fn invalid_parameters_become_error_strings() {
        let resp = dispatch(WorkerRequest::new("x", "pw", json!({ "name": "bcrypt", "cost": 99 })));
        let err = resp.error.unwrap();
        assert!(err.contains("cost"), "{err}");
        assert!(resp.result.is_none());

        let resp = dispatch(WorkerRequest::new("y", "pw", json!({ "cost": 4 })));
        assert!(resp.error.unwrap().contains("name"));

        let resp = dispatch(WorkerRequest::new("z", "pw", json!({ "name": "md5", "iterations": 0 })));
        assert!(resp.error.is_some());
    }

    #[test]
    fn response_wire_omits_absent_fields() {
        let ok = serde_json::to_value(dispatch(WorkerRequest::new(
            "a",
            "pw",
            json!({ "name": "sha256", "iterations": 1, "saltLength": 0 }),
        )))
        .unwrap();
        assert!(ok.get("error").is_none());
        assert!(ok["result"]["timeMs"].as_f64().unwrap() >= 0.0);
        assert_eq!(ok["result"]["breakdown"][0]["color"], "cyan");

        let err = serde_json::to_value(WorkerResponse::err("b", "boom")).unwrap();
        assert!(err.get("result").is_none());
        assert_eq!(err["error"], "boom");
    }

    #[test]
    fn handle_message_round_trip() {
        let out = handle_message(
            r#"{"id":"m1","password":"hello","params":{"name":"pbkdf2","iterations":1000,"hash":"SHA-256","saltLength":16}}"#,
        );
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["id"], "m1");
        let hash = v["result"]["hash"].as_str().unwrap();
        assert!(hash.starts_with("pbkdf2_sha256$1000$"));
    }

    #[test]
    fn handle_message_recovers_id_from_malformed_request() {
        let v: Value = serde_json::from_str(&handle_message(r#"{"id":"m2","params":{}}"#)).unwrap();
        assert_eq!(v["id"], "m2");
        assert!(v["error"].as_str().unwrap().starts_with("malformed request"));

        let v: Value = serde_json::from_str(&handle_message("not json")).unwrap();
        assert_eq!(v["id"], "");
        assert!(v.get("result").is_none());
    }

    #[test]
    fn cipher_iv_lengths_beyond_one_block_are_honoured() {
        let resp = dispatch(WorkerRequest::new(
            "iv1",
            "pw",
            json!({ "name": "aes", "key": "k", "mode": "CBC", "ivLength": 32, "saltLength": 0 }),
        ));
        let res = resp.into_result().unwrap();
        assert_eq!(res.segment("IV").unwrap().value.len(), 64);

        let resp = dispatch(WorkerRequest::new(
            "iv2",
            "pw",
            json!({ "name": "des", "key": "k", "mode": "CBC", "ivLength": 16, "saltLength": 0 }),
        ));
        let res = resp.into_result().unwrap();
        assert_eq!(res.segment("IV").unwrap().value.len(), 16);
    }

    #[test]
    fn oversized_argon2_hash_length_is_a_parameter_error() {
        let resp = dispatch(WorkerRequest::new(
            "a2",
            "pw",
            json!({
                "name": "argon2", "type": "argon2id", "time": 1, "memory": 8,
                "parallelism": 1, "hashLength": 128, "saltLength": 16
            }),
        ));
        let err = resp.error.unwrap();
        assert!(err.contains("hashLength"), "{err}");
    }

    #[test]
    fn identifier_comes_from_record_tag() {
        // The request id is not consulted for routing.
        let resp = dispatch(WorkerRequest::new("bcrypt", "pw", json!({ "name": "md5", "iterations": 1 })));
        assert_eq!(resp.into_result().unwrap().breakdown[0].value, "MD5");
    }

    #[test]
    fn registry_catalog_is_complete() {
        let all = catalog();
        assert_eq!(all.len(), 17);
        assert_eq!(all.iter().map(|i| i.breakdown_len).sum::<usize>(), 4 * 14 + 5 + 3 + 3);
        assert_eq!(resolve(AlgorithmId::Argon2).breakdown_len, 5);
        assert_eq!(resolve(AlgorithmId::Chacha20).family, Family::SymmetricCipher);
        assert_eq!(resolve_name("tripledes").unwrap().display_name, "3DES");
        assert_eq!(
            resolve_name("not-real").unwrap_err(),
            ComputationError::UnknownAlgorithm("not-real".into())
        );
    }

    #[test]
    fn default_params_match_their_identifier() {
        for id in AlgorithmId::ALL {
            assert_eq!(default_params(id).algorithm(), id);
        }
    }
}
