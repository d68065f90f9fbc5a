//! Replace-previous-instance contract, exercised through recording collaborators

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use chart_interop_shared::{
    ChartConfiguration, ChartData, ChartInteropError, ChartKind, ChartResult, RendererSettings,
};
use chart_interop_wasm::backend::{ChartBackend, Releasable, SurfaceProvider};
use chart_interop_wasm::renderer::ChartRenderer;
use serde_json::{json, Value};

struct CreatedChart {
    serial: usize,
    surface: String,
    config: Value,
}

#[derive(Clone, Default)]
struct Recorder {
    created: Rc<RefCell<Vec<CreatedChart>>>,
    released: Rc<RefCell<Vec<usize>>>,
    reject: Rc<Cell<bool>>,
    unreleasable: Rc<Cell<bool>>,
}

impl Recorder {
    fn created_count(&self) -> usize {
        self.created.borrow().len()
    }

    fn last_config(&self) -> Value {
        self.created.borrow().last().expect("no chart created").config.clone()
    }

    fn last_surface(&self) -> String {
        self.created.borrow().last().expect("no chart created").surface.clone()
    }

    fn released(&self) -> Vec<usize> {
        self.released.borrow().clone()
    }
}

struct MockHandle {
    serial: usize,
    releasable: bool,
    released: Rc<RefCell<Vec<usize>>>,
}

impl Releasable for MockHandle {
    fn is_releasable(&self) -> bool {
        self.releasable
    }

    fn release(&mut self) {
        self.released.borrow_mut().push(self.serial);
    }
}

struct MockBackend {
    recorder: Recorder,
}

impl ChartBackend for MockBackend {
    type Surface = String;
    type Payload = Value;
    type Handle = MockHandle;

    fn chart_data(&self, data: ChartData<Value>) -> ChartResult<Value> {
        Ok(serde_json::to_value(data)?)
    }

    fn create_chart(
        &self,
        surface: &String,
        config: ChartConfiguration<Value>,
    ) -> ChartResult<MockHandle> {
        if self.recorder.reject.get() {
            return Err(ChartInteropError::LibraryRejection {
                message: "bad dataset".to_string(),
            });
        }

        let mut created = self.recorder.created.borrow_mut();
        let serial = created.len();
        created.push(CreatedChart {
            serial,
            surface: surface.clone(),
            config: config.to_json()?,
        });

        Ok(MockHandle {
            serial,
            releasable: !self.recorder.unreleasable.get(),
            released: self.recorder.released.clone(),
        })
    }
}

#[derive(Clone)]
struct MockSurfaces {
    present: Rc<RefCell<HashSet<String>>>,
}

impl MockSurfaces {
    fn with(ids: &[&str]) -> Self {
        Self {
            present: Rc::new(RefCell::new(ids.iter().map(|id| id.to_string()).collect())),
        }
    }

    fn remove(&self, id: &str) {
        self.present.borrow_mut().remove(id);
    }
}

impl SurfaceProvider for MockSurfaces {
    type Surface = String;

    fn lookup(&self, surface_id: &str) -> ChartResult<String> {
        if self.present.borrow().contains(surface_id) {
            Ok(surface_id.to_string())
        } else {
            Err(ChartInteropError::surface_not_found(surface_id))
        }
    }
}

fn setup(ids: &[&str]) -> (ChartRenderer<MockBackend, MockSurfaces>, Recorder, MockSurfaces) {
    let recorder = Recorder::default();
    let surfaces = MockSurfaces::with(ids);
    let renderer = ChartRenderer::new(
        MockBackend {
            recorder: recorder.clone(),
        },
        surfaces.clone(),
    );
    (renderer, recorder, surfaces)
}

#[test]
fn test_scatter_configuration() {
    let (mut renderer, recorder, _) = setup(&["myScatterChart"]);

    renderer
        .render_scatter(json!([{ "data": [{ "x": 1, "y": 50 }, { "x": 2, "y": 80 }] }]))
        .unwrap();

    let config = recorder.last_config();
    assert_eq!(recorder.last_surface(), "myScatterChart");
    assert_eq!(config["type"], "scatter");
    assert_eq!(
        config["data"]["datasets"],
        json!([{ "data": [{ "x": 1, "y": 50 }, { "x": 2, "y": 80 }] }])
    );

    let scales = &config["options"]["scales"];
    assert_eq!(scales["x"]["type"], "linear");
    assert_eq!(scales["x"]["title"]["text"], "Forecast Horizon (Days)");
    assert_eq!(scales["x"]["ticks"]["stepSize"], 1.0);
    assert_eq!(scales["y"]["title"]["text"], "Accuracy (%)");
    assert_eq!(scales["y"]["beginAtZero"], true);
    assert_eq!(scales["y"]["suggestedMax"], 100.0);
}

#[test]
fn test_line_configuration() {
    let (mut renderer, recorder, _) = setup(&["trendChart"]);

    renderer
        .render_line(
            json!([{ "data": [1, 2, 3] }]),
            vec!["Mon".into(), "Tue".into(), "Wed".into()],
        )
        .unwrap();

    let config = recorder.last_config();
    assert_eq!(recorder.last_surface(), "trendChart");
    assert_eq!(config["type"], "line");
    assert_eq!(config["data"]["labels"], json!(["Mon", "Tue", "Wed"]));
    assert_eq!(config["options"]["scales"]["x"]["title"]["text"], "Date");
    assert_eq!(config["options"]["scales"]["y"]["title"]["text"], "Value");
    assert_eq!(renderer.current_kind("trendChart"), Some(ChartKind::Line));
}

#[test]
fn test_bar_uses_caller_surface_and_data_verbatim() {
    let (mut renderer, recorder, _) = setup(&["foo"]);
    let chart_data = json!({ "labels": ["A", "B"], "datasets": [{ "data": [10, 20] }] });

    renderer.render_bar("foo", chart_data.clone()).unwrap();

    let config = recorder.last_config();
    assert_eq!(recorder.last_surface(), "foo");
    assert_eq!(config["type"], "bar");
    assert_eq!(config["data"], chart_data);
    assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
    assert_eq!(
        config["options"]["scales"]["y"]["title"]["text"],
        "Chance of Next-Day Gain (%)"
    );
}

#[test]
fn test_each_superseded_instance_released_exactly_once() {
    let (mut renderer, recorder, _) = setup(&["trendChart"]);

    for day in 0..4 {
        renderer
            .render_line(json!([{ "data": [day] }]), vec![format!("day {day}")])
            .unwrap();
        assert_eq!(renderer.active_count(), 1);
    }

    assert_eq!(recorder.created_count(), 4);
    assert_eq!(recorder.released(), vec![0, 1, 2]);
}

#[test]
fn test_repeated_scatter_builds_new_instance() {
    let (mut renderer, recorder, _) = setup(&["myScatterChart"]);
    let datasets = json!([{ "data": [{ "x": 3, "y": 70 }] }]);

    let first = renderer.render_scatter(datasets.clone()).unwrap();
    let second = renderer.render_scatter(datasets).unwrap();

    assert_ne!(first, second);
    assert_eq!(renderer.instance_id("myScatterChart"), Some(second));

    let created = recorder.created.borrow();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].config, created[1].config);
}

#[test]
fn test_missing_surface_reports_error_and_keeps_existing_chart() {
    let (mut renderer, recorder, surfaces) = setup(&["trendChart"]);
    let existing = renderer
        .render_line(json!([{ "data": [1] }]), vec!["Mon".into()])
        .unwrap();

    surfaces.remove("trendChart");
    let result = renderer.render_line(json!([{ "data": [2] }]), vec!["Tue".into()]);

    assert_eq!(
        result,
        Err(ChartInteropError::SurfaceNotFound {
            surface_id: "trendChart".to_string()
        })
    );
    assert_eq!(renderer.instance_id("trendChart"), Some(existing));
    assert!(recorder.released().is_empty());
    assert_eq!(recorder.created_count(), 1);
}

#[test]
fn test_missing_surface_on_every_entry_point() {
    let (mut renderer, recorder, _) = setup(&[]);

    assert!(matches!(
        renderer.render_scatter(json!([])),
        Err(ChartInteropError::SurfaceNotFound { .. })
    ));
    assert!(matches!(
        renderer.render_line(json!([]), vec![]),
        Err(ChartInteropError::SurfaceNotFound { .. })
    ));
    assert!(matches!(
        renderer.render_bar("nowhere", json!({ "datasets": [] })),
        Err(ChartInteropError::SurfaceNotFound { .. })
    ));
    assert_eq!(recorder.created_count(), 0);
    assert_eq!(renderer.active_count(), 0);
}

#[test]
fn test_library_rejection_after_release_leaves_slot_empty() {
    let (mut renderer, recorder, _) = setup(&["foo"]);
    renderer.render_bar("foo", json!({ "datasets": [] })).unwrap();

    recorder.reject.set(true);
    let result = renderer.render_bar("foo", json!({ "datasets": "garbage" }));

    assert!(matches!(result, Err(ChartInteropError::LibraryRejection { .. })));
    assert!(!renderer.has_chart("foo"));
    assert_eq!(recorder.released(), vec![0]);
}

#[test]
fn test_unreleasable_chart_is_replaced_without_release() {
    let (mut renderer, recorder, _) = setup(&["foo"]);
    recorder.unreleasable.set(true);
    renderer.render_bar("foo", json!({ "datasets": [] })).unwrap();

    recorder.unreleasable.set(false);
    let replacement = renderer.render_bar("foo", json!({ "datasets": [] })).unwrap();

    assert!(recorder.released().is_empty());
    assert_eq!(recorder.created_count(), 2);
    assert_eq!(renderer.instance_id("foo"), Some(replacement));
    assert_eq!(renderer.active_count(), 1);
}

#[test]
fn test_line_data_block_omits_labels_only_when_absent() {
    let (mut renderer, recorder, _) = setup(&["myScatterChart", "trendChart"]);

    renderer.render_scatter(json!([{ "data": [] }])).unwrap();
    assert_eq!(recorder.last_config()["data"], json!({ "datasets": [{ "data": [] }] }));

    renderer.render_line(json!([]), vec![]).unwrap();
    assert_eq!(recorder.last_config()["data"], json!({ "labels": [], "datasets": [] }));
}

#[test]
fn test_bar_charts_on_different_surfaces_coexist() {
    let (mut renderer, recorder, _) = setup(&["gain-1d", "gain-5d"]);

    renderer.render_bar("gain-1d", json!({ "datasets": [] })).unwrap();
    renderer.render_bar("gain-5d", json!({ "datasets": [] })).unwrap();

    assert_eq!(renderer.active_count(), 2);
    assert!(recorder.released().is_empty());

    assert!(renderer.release("gain-1d"));
    assert!(!renderer.release("gain-1d"));
    assert_eq!(recorder.released(), vec![0]);
    assert!(renderer.has_chart("gain-5d"));
}

#[test]
fn test_chart_kinds_share_a_canvas_slot() {
    let (mut renderer, recorder, _) = setup(&["myScatterChart"]);

    renderer.render_scatter(json!([])).unwrap();
    renderer.render_bar("myScatterChart", json!({ "datasets": [] })).unwrap();

    assert_eq!(renderer.active_count(), 1);
    assert_eq!(renderer.current_kind("myScatterChart"), Some(ChartKind::Bar));
    assert_eq!(recorder.released(), vec![0]);
}

#[test]
fn test_release_all_and_teardown() {
    let (mut renderer, recorder, _) = setup(&["myScatterChart", "trendChart", "foo"]);
    renderer.render_scatter(json!([])).unwrap();
    renderer.render_line(json!([]), vec![]).unwrap();
    assert_eq!(renderer.release_all(), 2);
    assert_eq!(renderer.active_count(), 0);

    renderer.render_bar("foo", json!({ "datasets": [] })).unwrap();
    drop(renderer);

    let mut released = recorder.released();
    released.sort();
    assert_eq!(released, vec![0, 1, 2]);
}

#[test]
fn test_custom_surface_settings() {
    let recorder = Recorder::default();
    let settings =
        RendererSettings::from_json(r#"{"scatterSurface": "accuracy", "lineSurface": "history"}"#)
            .unwrap();
    let mut renderer = ChartRenderer::with_settings(
        MockBackend {
            recorder: recorder.clone(),
        },
        MockSurfaces::with(&["accuracy", "history"]),
        settings,
    );

    renderer.render_scatter(json!([])).unwrap();
    assert_eq!(recorder.last_surface(), "accuracy");
    renderer.render_line(json!([]), vec![]).unwrap();
    assert_eq!(recorder.last_surface(), "history");
    assert_eq!(renderer.settings().line_surface, "history");
}
