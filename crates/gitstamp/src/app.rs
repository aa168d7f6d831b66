//! Pipeline phases and runtime provenance wiring

use std::path::PathBuf;
use std::str::FromStr;

use eyre::{eyre, WrapErr};
use tracing::{info, warn};

use gitstamp_adapters::{GitStampConfig, StaticStoreAdapter};
use gitstamp_core::{BakedProvenance, PortError, ProvenanceMode, ProvenanceService, ProvenanceSource};

include!(concat!(env!("OUT_DIR"), "/embedded_provenance.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Bake provenance into both destination trees.
    Prebuild,
    /// Remove the baked trees after a successful build.
    Postbuild,
    /// Print the active provenance as JSON.
    Show,
}

impl FromStr for Phase {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prebuild" => Ok(Phase::Prebuild),
            "postbuild" => Ok(Phase::Postbuild),
            "show" => Ok(Phase::Show),
            other => Err(eyre!(
                "unknown phase `{other}` (expected prebuild, postbuild or show)"
            )),
        }
    }
}

/// Root `build.rs` compiled the embedded table from.
const BUILD_EMBED_ROOT: &str = env!("GITSTAMP_BUILD_EMBED_ROOT");

/// Config from `lookup`, with the embedded destination defaulting to the root
/// this binary was compiled against so `prebuild` writes where `build.rs` reads.
pub fn resolve_config<F>(lookup: F) -> GitStampConfig
where
    F: Fn(&str) -> Option<String>,
{
    let explicit_embed_root = lookup("GITSTAMP_EMBED_ROOT").is_some();
    let mut config = GitStampConfig::from_lookup(lookup);
    if !explicit_embed_root {
        config.embedded_root = PathBuf::from(BUILD_EMBED_ROOT);
    }
    config
}

pub type DynProvenanceService = ProvenanceService<Box<dyn ProvenanceSource>>;

/// Store over the table generated by `build.rs`.
pub fn embedded_store() -> StaticStoreAdapter {
    StaticStoreAdapter::new(EMBEDDED_PROVENANCE)
}

pub fn provenance_service(
    config: &GitStampConfig,
    store: StaticStoreAdapter,
) -> Result<DynProvenanceService, PortError> {
    let source: Box<dyn ProvenanceSource> = match config.mode {
        ProvenanceMode::Live => Box::new(config.live_provenance()?),
        ProvenanceMode::Baked => {
            if store.is_empty() {
                warn!("no provenance was embedded at compile time; run the prebuild phase first");
            }
            Box::new(BakedProvenance::new(store))
        }
    };
    Ok(ProvenanceService::new(source))
}

pub fn show_json(service: &DynProvenanceService) -> serde_json::Value {
    let record = service.record();
    serde_json::json!({
        "mode": service.mode(),
        "hash": record.hash,
        "hashShort": record.hash_short(),
        "status": record.status,
        "buildTime": record.build_time,
        "clean": record.is_clean(),
    })
}

pub fn run(phase: Phase, config: &GitStampConfig) -> eyre::Result<()> {
    match phase {
        Phase::Prebuild => {
            let live = config.live_provenance()?;
            let outcome = config
                .lifecycle()
                .generate(&live)
                .wrap_err("failed to bake provenance")?;
            info!(
                record = %outcome.record,
                warnings = outcome.warnings.len(),
                "baked provenance"
            );
        }
        Phase::Postbuild => {
            config
                .lifecycle()
                .cleanup()
                .wrap_err("failed to remove transient provenance artifacts")?;
        }
        Phase::Show => {
            let service = provenance_service(config, embedded_store())?;
            let out = serde_json::to_string_pretty(&show_json(&service))?;
            println!("{out}");
        }
    }
    Ok(())
}
