pub mod baked;
pub mod domain;
pub mod lifecycle;
pub mod live;
pub mod ports;
pub mod service;

pub use baked::{BakedProvenance, LoadIssue, LoadIssueKind};
pub use domain::{truncate, ProvenanceEntry, ProvenanceRecord};
pub use lifecycle::{BakeLifecycle, BakeOutcome, BakeWarning};
pub use live::LiveProvenance;
pub use ports::{
    ArtifactSinkPort, ClockPort, CommandOutput, CommandPort, PortError, ResourceStorePort,
};
pub use service::{ProvenanceMode, ProvenanceService, ProvenanceSource};
