pub mod index_pipeline;
pub mod logger;
