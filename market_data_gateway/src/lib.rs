pub mod bundles;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod packs;
pub mod providers;
pub mod routing;
