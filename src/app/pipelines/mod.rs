pub mod costing_pipeline;

pub use costing_pipeline::CostingPipeline;
