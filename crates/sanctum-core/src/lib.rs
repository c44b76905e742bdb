#![deny(warnings)]
pub mod knowledge;
pub mod model;
pub mod path;
pub mod profile;
pub mod snapshot;
pub mod tooltip;
pub mod weight;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "pathfind-sanctum"
    }

    pub const fn codename() -> &'static str {
        "Route Advisor"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
