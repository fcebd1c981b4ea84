// Library crate: exposes testable modules for integration tests and the command interface.
// GUI-specific modules (app, ui, viewport panel and GL renderer) remain in the binary crate.

pub mod appearance;
pub mod asset;
pub mod calendar;
pub mod command;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod scene;
pub mod state;

/// Geometry, picking and camera: everything in the viewport that runs without GL.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}
