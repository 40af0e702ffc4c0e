//! PDO immutability: a sealed record always verifies, any field change is
//! detected, and the vault admits each record exactly once.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_types::{ArtifactId, Payload, ZERO_HASH};

    use pl_06_pdo_vault::{
        section_hash, verify_closure_chain, ImmutablePDO, OutcomeStatus, PdoError, PdoFields,
        PdoVault,
    };

    use serde_json::json;

    fn fields_for(pdo_id: &str, seal_time: u64, closure_hash: [u8; 32]) -> PdoFields {
        let mut proof = Payload::new();
        proof.insert("attestation".into(), json!(pdo_id));
        PdoFields {
            pdo_id: ArtifactId::new(pdo_id),
            pac_id: format!("pac-{pdo_id}"),
            wrap_id: format!("wrap-{pdo_id}"),
            ber_id: format!("ber-{pdo_id}"),
            proof_hash: section_hash(&proof),
            decision_hash: section_hash(&Payload::new()),
            outcome_hash: section_hash(&Payload::new()),
            closure_id: "closure-p".into(),
            closure_hash,
            proof_at: seal_time.saturating_sub(300),
            decision_at: seal_time.saturating_sub(200),
            outcome_at: seal_time.saturating_sub(100),
            sealed_at: seal_time,
            outcome_status: OutcomeStatus::Approved,
            issuer: "governance-board".into(),
            schema_version: 1,
        }
    }

    proptest! {
        // Sealing binds identity: the sealed record verifies, and the
        // same fields with a perturbed timestamp hash differently.
        #[test]
        fn prop_seal_binds_every_field(seal_time in 1_000u64..1_000_000) {
            let fields = fields_for("PDO-P", seal_time, ZERO_HASH);
            let pdo = ImmutablePDO::seal(fields.clone());
            prop_assert!(pdo.verify_integrity().is_ok());

            let mut perturbed = fields;
            perturbed.sealed_at += 1;
            prop_assert_ne!(perturbed.compute_hash(), pdo.pdo_hash());

            // Claiming the old hash for the perturbed fields fails closed.
            prop_assert!(ImmutablePDO::new(perturbed, pdo.pdo_hash()).is_err());
        }

        // The vault admits each id exactly once; the second store of an
        // id is treated as a mutation attempt even with identical content.
        #[test]
        fn prop_vault_admits_each_id_once(count in 1usize..15) {
            let vault = PdoVault::new();
            for i in 0..count {
                let pdo = ImmutablePDO::seal(fields_for(&format!("PDO-{i}"), 1_000, ZERO_HASH));
                vault.store(pdo.clone()).unwrap();
                prop_assert!(
                    matches!(vault.store(pdo), Err(PdoError::MutationAttempt { .. })),
                    "expected MutationAttempt on second store"
                );
            }
            prop_assert_eq!(vault.len(), count);
            prop_assert_eq!(vault.verify_all().unwrap(), count);
        }

        // Honest closure chains of any length verify; snipping one link
        // breaks the chain at the successor.
        #[test]
        fn prop_closure_chain_links_are_load_bearing(n in 2usize..10, victim in 0usize..10) {
            let mut chain = Vec::with_capacity(n);
            let mut previous = ZERO_HASH;
            for i in 0..n {
                let pdo = ImmutablePDO::seal(fields_for(
                    &format!("PDO-C{i}"),
                    1_000 + i as u64 * 100,
                    previous,
                ));
                previous = pdo.pdo_hash();
                chain.push(pdo);
            }
            prop_assert!(verify_closure_chain(&chain).is_ok());

            let victim = victim % (n - 1);
            chain.remove(victim);
            prop_assert!(
                matches!(verify_closure_chain(&chain), Err(PdoError::ChainBroken { .. })),
                "expected ChainBroken after removing a link"
            );
        }
    }
}
