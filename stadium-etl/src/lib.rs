//! # Stadium ETL
//!
//! A small extract-transform-load job for the Wikipedia list of association
//! football stadiums by capacity.
//!
//! The pipeline runs three stages strictly in sequence:
//!
//! - **Extract**: fetch the article and parse the football table into raw rows
//! - **Transform**: coerce capacities, substitute placeholder images, derive
//!   a composite location field
//! - **Write**: serialize the records to a timestamped CSV file
//!
//! Stages hand their output to the next stage through a one-shot keyed
//! [`handoff::TransferStore`], keeping the steps decoupled the same way a
//! workflow scheduler would.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stadium_etl::prelude::*;
//! use std::sync::Arc;
//!
//! let config = EtlConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(&config)?);
//! let pipeline = EtlPipeline::new(fetcher);
//! pipeline.run(config).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod handoff;
pub mod pipeline;
pub mod records;
pub mod transform;
pub mod write;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EtlConfig;
    pub use crate::errors::{EtlError, FetchError, HandoffError, ParseError};
    pub use crate::fetch::{HttpFetcher, PageFetcher, StaticFetcher};
    pub use crate::handoff::TransferStore;
    pub use crate::pipeline::{
        EtlPipeline, PipelineSpec, RunIdentity, Stage, StageContext,
    };
    pub use crate::records::{RawStadiumRow, StadiumRecord};
}
