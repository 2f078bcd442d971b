/*!
 * Harness stages
 *
 * The stages run strictly in order, each reading only what earlier stages
 * wrote to the artifact store:
 *
 * 1. `generate_dataset` writes the cleartext dataset
 * 2. `keygen_and_encrypt` derives key material and writes the ciphertext
 * 3. `cleartext_reference` decrypts independently and writes the ground truth
 *
 * Any error is terminal for the stage. Verification of the pipeline's results
 * lives in [`crate::verify`].
 */

use crate::aes::AesEngine;
use crate::config::HarnessConfig;
use crate::dataset;
use crate::error::OracleResult;
use crate::keygen::{AesKey, Iv, KeyMaterial};
use crate::reference::ReferenceOutputs;
use crate::store::{Artifact, ArtifactStore};

/// Stage 1: sample the dataset and persist it
pub fn generate_dataset<S: ArtifactStore + ?Sized>(
    config: &HarnessConfig,
    store: &mut S,
) -> OracleResult<Vec<u16>> {
    let values = dataset::generate(config.seed, config.instance);
    store.write_text(Artifact::Dataset, &dataset::format_lines(&values))?;
    log::info!(
        "generated {} dataset with {} integers",
        config.instance,
        values.len()
    );
    Ok(values)
}

/// Stage 2: derive the key (and IV) from the seed and encrypt the dataset
///
/// The dataset is validated before any cryptographic work, so a malformed
/// dataset leaves no key or ciphertext behind. If persisting the key, IV or
/// ciphertext fails, whichever of them were already written are removed.
pub fn keygen_and_encrypt<S: ArtifactStore + ?Sized>(
    config: &HarnessConfig,
    store: &mut S,
) -> OracleResult<KeyMaterial> {
    let seed = config.require_seed()?;
    let values = dataset::parse(&store.read_text(Artifact::Dataset)?)?;
    dataset::validate(&values, config.instance)?;

    let material = KeyMaterial::derive(seed, config.instance);
    let mode = config.instance.cipher_mode();
    let engine = AesEngine::new(&material.key, mode, material.iv.as_ref())?;
    let ciphertext = engine.encrypt_words(&values)?;

    if let Err(e) = persist_encryption(store, &material, &ciphertext) {
        for artifact in KEYED_ARTIFACTS {
            if let Err(cleanup) = store.discard(artifact) {
                log::warn!("could not remove partial {}: {}", artifact, cleanup);
            }
        }
        return Err(e);
    }

    log::info!(
        "encrypted {} integers with AES-128-{} ({} blocks)",
        values.len(),
        mode,
        ciphertext.len() / crate::aes::BLOCK_SIZE
    );
    Ok(material)
}

/// Artifacts written together by stage 2
const KEYED_ARTIFACTS: [Artifact; 3] = [Artifact::Ciphertext, Artifact::Iv, Artifact::Key];

fn persist_encryption<S: ArtifactStore + ?Sized>(
    store: &mut S,
    material: &KeyMaterial,
    ciphertext: &[u8],
) -> OracleResult<()> {
    store.write_hex(Artifact::Ciphertext, ciphertext)?;
    match &material.iv {
        Some(iv) => store.write_hex(Artifact::Iv, iv.as_bytes())?,
        None => store.discard(Artifact::Iv)?,
    }
    store.write_hex(Artifact::Key, material.key.as_bytes())
}

/// Stage 3: decrypt the persisted ciphertext and write the reference outputs
pub fn cleartext_reference<S: ArtifactStore + ?Sized>(
    config: &HarnessConfig,
    store: &mut S,
) -> OracleResult<ReferenceOutputs> {
    let key = AesKey::from_slice(&store.read_hex(Artifact::Key)?)?;
    let iv = if config.instance.is_toy() {
        None
    } else {
        Some(Iv::from_slice(&store.read_hex(Artifact::Iv)?)?)
    };
    let ciphertext = store.read_hex(Artifact::Ciphertext)?;

    let mode = config.instance.cipher_mode();
    let outputs = ReferenceOutputs::compute(&key, iv.as_ref(), mode, &ciphertext)?;

    store.write_text(Artifact::ExpectedAes, &dataset::format_lines(&outputs.values))?;
    store.write_text(Artifact::MaxValue, &format!("{}\n", outputs.max))?;
    store.write_text(
        Artifact::InnerProduct,
        &format!("{}\n", outputs.inner_product),
    )?;

    log::info!(
        "reference: {} values, max={}, inner_product={}",
        outputs.values.len(),
        outputs.max,
        outputs.inner_product
    );
    Ok(outputs)
}

/// Run every local stage in order
pub fn run_all<S: ArtifactStore + ?Sized>(
    config: &HarnessConfig,
    store: &mut S,
) -> OracleResult<ReferenceOutputs> {
    generate_dataset(config, store)?;
    keygen_and_encrypt(config, store)?;
    cleartext_reference(config, store)
}
