pub mod reload;
pub mod variant_ctx;
pub mod variant_flow;

pub use reload::ReloadStage;
pub use variant_ctx::VariantCtx;
pub use variant_flow::VariantWorker;
