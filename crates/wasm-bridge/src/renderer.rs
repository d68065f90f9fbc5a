//! Replace-previous-instance chart renderer
//!
//! Every render call resolves its drawing surface, releases whatever chart is
//! bound to that surface, then constructs a new one. Lookup and data assembly
//! happen before the release, so a call that fails early leaves the existing
//! chart untouched. A library rejection after the release leaves the slot empty.

use chart_interop_shared::{ChartConfiguration, ChartData, ChartKind, ChartResult, RendererSettings};
use uuid::Uuid;

use crate::backend::{ChartBackend, SurfaceProvider};
use crate::slot_registry::SlotRegistry;

pub struct ChartRenderer<B: ChartBackend, P> {
    backend: B,
    surfaces: P,
    slots: SlotRegistry<B::Handle>,
    settings: RendererSettings,
}

impl<B, P> ChartRenderer<B, P>
where
    B: ChartBackend,
    P: SurfaceProvider<Surface = B::Surface>,
{
    pub fn new(backend: B, surfaces: P) -> Self {
        Self::with_settings(backend, surfaces, RendererSettings::default())
    }

    pub fn with_settings(backend: B, surfaces: P, settings: RendererSettings) -> Self {
        log::info!(
            "Chart renderer ready (scatter: '{}', line: '{}')",
            settings.scatter_surface,
            settings.line_surface
        );
        Self {
            backend,
            surfaces,
            slots: SlotRegistry::new(),
            settings,
        }
    }

    /// Draw a scatter chart of forecast accuracy into the scatter surface
    pub fn render_scatter(&mut self, datasets: B::Payload) -> ChartResult<Uuid> {
        let surface_id = self.settings.scatter_surface.clone();
        let surface = self.lookup_surface(&surface_id)?;
        let data = self.backend.chart_data(ChartData::new(datasets))?;
        self.replace(ChartKind::Scatter, &surface_id, &surface, data)
    }

    /// Draw a line chart over the given category labels into the line surface
    pub fn render_line(&mut self, datasets: B::Payload, labels: Vec<String>) -> ChartResult<Uuid> {
        let surface_id = self.settings.line_surface.clone();
        let surface = self.lookup_surface(&surface_id)?;
        let data = self
            .backend
            .chart_data(ChartData::new(datasets).with_labels(labels))?;
        self.replace(ChartKind::Line, &surface_id, &surface, data)
    }

    /// Draw a bar chart from a pre-assembled data block into a caller-chosen surface
    pub fn render_bar(&mut self, surface_id: &str, chart_data: B::Payload) -> ChartResult<Uuid> {
        let surface = self.lookup_surface(surface_id)?;
        self.replace(ChartKind::Bar, surface_id, &surface, chart_data)
    }

    pub fn release(&mut self, surface_id: &str) -> bool {
        self.slots.release(surface_id)
    }

    pub fn release_all(&mut self) -> usize {
        self.slots.release_all()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    pub fn has_chart(&self, surface_id: &str) -> bool {
        self.slots.contains(surface_id)
    }

    /// Instance id of the chart currently bound to a surface
    pub fn instance_id(&self, surface_id: &str) -> Option<Uuid> {
        self.slots.get(surface_id).map(|slot| slot.instance_id)
    }

    pub fn current_kind(&self, surface_id: &str) -> Option<ChartKind> {
        self.slots.get(surface_id).map(|slot| slot.kind)
    }

    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    fn lookup_surface(&self, surface_id: &str) -> ChartResult<B::Surface> {
        self.surfaces.lookup(surface_id).inspect_err(|e| {
            log::error!("{e}");
        })
    }

    fn replace(
        &mut self,
        kind: ChartKind,
        surface_id: &str,
        surface: &B::Surface,
        data: B::Payload,
    ) -> ChartResult<Uuid> {
        if self.slots.release(surface_id) {
            log::debug!("Replacing chart on '{surface_id}'");
        }

        let config = ChartConfiguration::new(kind, data);
        let handle = self.backend.create_chart(surface, config).inspect_err(|e| {
            log::error!("Failed to create {kind} chart on '{surface_id}': {e}");
        })?;

        let instance_id = self.slots.insert(surface_id, kind, handle);
        log::debug!("Created {kind} chart {instance_id} on '{surface_id}'");
        Ok(instance_id)
    }
}
