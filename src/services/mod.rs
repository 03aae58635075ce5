//! Tagging services.

mod reconciler;

pub use reconciler::{ReconcileOutput, TagReconciler};
