//! Capability seams between the renderer and its external collaborators
//!
//! The renderer never names the charting library or the DOM directly. It asks a
//! [`SurfaceProvider`] for a drawing surface, a [`ChartBackend`] for a chart
//! instance, and relies on [`Releasable`] to dispose of superseded instances.

use chart_interop_shared::{ChartConfiguration, ChartData, ChartResult};

/// A live chart instance that can be disposed of
pub trait Releasable {
    /// Whether this handle is a live instance exposing a release operation.
    /// A handle that is not gets dropped unreleased, and the library may keep
    /// treating its surface as occupied.
    fn is_releasable(&self) -> bool {
        true
    }

    /// Dispose of the instance's resources. Called at most once per handle.
    fn release(&mut self);
}

/// Resolves drawing surfaces by element identifier
pub trait SurfaceProvider {
    type Surface;

    fn lookup(&self, surface_id: &str) -> ChartResult<Self::Surface>;
}

/// Constructs chart instances on a drawing surface
pub trait ChartBackend {
    type Surface;
    /// Caller-supplied data, passed through to the library untouched
    type Payload;
    type Handle: Releasable;

    /// Convert assembled datasets and labels into the library's data block
    fn chart_data(&self, data: ChartData<Self::Payload>) -> ChartResult<Self::Payload>;

    fn create_chart(
        &self,
        surface: &Self::Surface,
        config: ChartConfiguration<Self::Payload>,
    ) -> ChartResult<Self::Handle>;
}
