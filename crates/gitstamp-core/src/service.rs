use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::baked::BakedProvenance;
use crate::domain::{truncate, ProvenanceRecord, HASH_SHORT_LEN};
use crate::live::LiveProvenance;
use crate::ports::{ClockPort, CommandPort, ResourceStorePort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceMode {
    /// Editable checkout: query git directly.
    Live,
    /// Packaged artifact: read what was persisted at bake time.
    Baked,
}

impl FromStr for ProvenanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(ProvenanceMode::Live),
            "baked" => Ok(ProvenanceMode::Baked),
            other => Err(format!("unknown provenance mode: {other}")),
        }
    }
}

/// Where provenance values come from.
pub trait ProvenanceSource {
    fn mode(&self) -> ProvenanceMode;
    fn hash(&self) -> Cow<'_, str>;
    fn status(&self) -> Cow<'_, str>;
    fn build_time(&self) -> Cow<'_, str>;
}

impl<R, C> ProvenanceSource for LiveProvenance<R, C>
where
    R: CommandPort,
    C: ClockPort,
{
    fn mode(&self) -> ProvenanceMode {
        ProvenanceMode::Live
    }

    fn hash(&self) -> Cow<'_, str> {
        Cow::Owned(LiveProvenance::hash(self))
    }

    fn status(&self) -> Cow<'_, str> {
        Cow::Owned(LiveProvenance::status(self))
    }

    fn build_time(&self) -> Cow<'_, str> {
        Cow::Owned(LiveProvenance::build_time(self))
    }
}

impl<S> ProvenanceSource for BakedProvenance<S>
where
    S: ResourceStorePort,
{
    fn mode(&self) -> ProvenanceMode {
        ProvenanceMode::Baked
    }

    fn hash(&self) -> Cow<'_, str> {
        Cow::Borrowed(BakedProvenance::hash(self))
    }

    fn status(&self) -> Cow<'_, str> {
        Cow::Borrowed(BakedProvenance::status(self))
    }

    fn build_time(&self) -> Cow<'_, str> {
        Cow::Borrowed(BakedProvenance::build_time(self))
    }
}

impl<P: ProvenanceSource + ?Sized> ProvenanceSource for Box<P> {
    fn mode(&self) -> ProvenanceMode {
        (**self).mode()
    }

    fn hash(&self) -> Cow<'_, str> {
        (**self).hash()
    }

    fn status(&self) -> Cow<'_, str> {
        (**self).status()
    }

    fn build_time(&self) -> Cow<'_, str> {
        (**self).build_time()
    }
}

/// Consumer-facing provenance context.
///
/// Built once at startup with the source chosen for the current execution
/// context, then handed to whatever displays the values. Not `Sync`: the baked
/// cache is unguarded and single-threaded use is assumed.
#[derive(Debug)]
pub struct ProvenanceService<P>
where
    P: ProvenanceSource,
{
    source: P,
}

impl<P> ProvenanceService<P>
where
    P: ProvenanceSource,
{
    pub fn new(source: P) -> Self {
        Self { source }
    }

    pub fn mode(&self) -> ProvenanceMode {
        self.source.mode()
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn hash(&self) -> Cow<'_, str> {
        self.source.hash()
    }

    pub fn hash_short(&self) -> Cow<'_, str> {
        match self.source.hash() {
            Cow::Borrowed(hash) => Cow::Borrowed(truncate(Some(hash), HASH_SHORT_LEN)),
            Cow::Owned(hash) => Cow::Owned(truncate(Some(&hash), HASH_SHORT_LEN).to_owned()),
        }
    }

    pub fn status(&self) -> Cow<'_, str> {
        self.source.status()
    }

    pub fn build_time(&self) -> Cow<'_, str> {
        self.source.build_time()
    }

    /// Snapshot of all three values. On the live path this runs git twice.
    pub fn record(&self) -> ProvenanceRecord {
        ProvenanceRecord {
            hash: self.hash().into_owned(),
            status: self.status().into_owned(),
            build_time: self.build_time().into_owned(),
        }
    }
}
