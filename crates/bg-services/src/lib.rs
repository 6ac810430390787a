//! # bg-services
//!
//! The analysis pipeline: classifier, persistence gateway and the service
//! that ties them together.

pub mod classifier;
pub mod gateway;
pub mod lexicon;
pub mod service;

pub use classifier::{categorize, classify, polarity, Classification};
pub use gateway::{DegradedNotice, PersistOutcome, PersistenceGateway, DEFAULT_PERSIST_TIMEOUT};
pub use service::AnalysisService;
