//! Tests for the factor layer upsert lifecycle against a mock map surface.

use factor_common::{LegendDef, LegendStop};
use factor_render::ClassificationExpr;
use layer_manager::{
    FactorLayerManager, LayerSpec, MapSurface, RasterSourceSpec, TileLayer, UpsertParams,
    FACTOR_LAYER_KEY_TAG, MANAGED_BY, MANAGED_BY_TAG,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// ============================================================================
// Mock surface
// ============================================================================

#[derive(Debug, Default)]
struct MockLayerState {
    tags: HashMap<String, String>,
    source: Option<RasterSourceSpec>,
    style: Option<ClassificationExpr>,
    opacity: f32,
    z_index: i32,
    source_swaps: usize,
    style_swaps: usize,
}

/// Reference-counted layer proxy, the shape a real host map hands out.
#[derive(Clone)]
struct MockLayer(Rc<RefCell<MockLayerState>>);

impl MockLayer {
    fn same_layer(&self, other: &MockLayer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl TileLayer for MockLayer {
    fn get_tag(&self, name: &str) -> Option<String> {
        self.0.borrow().tags.get(name).cloned()
    }

    fn set_tag(&mut self, name: &str, value: String) {
        self.0.borrow_mut().tags.insert(name.to_string(), value);
    }

    fn set_source(&mut self, source: RasterSourceSpec) {
        let mut state = self.0.borrow_mut();
        state.source = Some(source);
        state.source_swaps += 1;
    }

    fn set_style(&mut self, style: ClassificationExpr) {
        let mut state = self.0.borrow_mut();
        state.style = Some(style);
        state.style_swaps += 1;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.0.borrow_mut().opacity = opacity;
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.0.borrow_mut().z_index = z_index;
    }
}

#[derive(Default)]
struct MockSurface {
    layers: Vec<MockLayer>,
    added: usize,
}

impl MapSurface for MockSurface {
    type Layer = MockLayer;

    fn add_layer(&mut self, spec: LayerSpec) -> MockLayer {
        let layer = MockLayer(Rc::new(RefCell::new(MockLayerState {
            source: Some(spec.source),
            style: Some(spec.style),
            opacity: 1.0,
            ..MockLayerState::default()
        })));
        self.layers.push(layer.clone());
        self.added += 1;
        layer
    }

    fn remove_layer(&mut self, layer: &MockLayer) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| !l.same_layer(layer));
        self.layers.len() < before
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

fn rain_legend() -> LegendDef {
    LegendDef {
        id: "legend_rain".to_string(),
        name: "Precipitation".to_string(),
        unit: Some("mm".to_string()),
        stops: vec![
            LegendStop::new(-2.0, "#8CCFC3"),
            LegendStop::new(2.0, "#84DB9E"),
            LegendStop::new(6.0, "#93E461"),
        ],
        nodata_color: None,
    }
}

// ============================================================================
// Upsert lifecycle tests
// ============================================================================

#[test]
fn test_first_upsert_creates_tagged_layer() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();

    let layer = manager.upsert(
        &mut surface,
        "rain_1h",
        "/cog/rain_1h/latest.tif",
        &rain_legend(),
        UpsertParams {
            opacity: 0.8,
            z_index: 5,
            ..UpsertParams::default()
        },
    );

    assert_eq!(surface.layer_count(), 1);
    assert_eq!(manager.len(), 1);
    assert_eq!(
        layer.get_tag(FACTOR_LAYER_KEY_TAG).as_deref(),
        Some("rain_1h")
    );
    assert_eq!(layer.get_tag(MANAGED_BY_TAG).as_deref(), Some(MANAGED_BY));

    let state = layer.0.borrow();
    let source = state.source.as_ref().unwrap();
    assert_eq!(source.url, "/cog/rain_1h/latest.tif");
    assert!(source.interpolate);
    assert!(!source.normalize);
    assert_eq!(state.opacity, 0.8);
    assert_eq!(state.z_index, 5);
    assert_eq!(state.style.as_ref().unwrap().len(), 3);
}

#[test]
fn test_idempotent_upsert_keeps_single_layer_and_handle() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();
    let legend = rain_legend();
    let params = UpsertParams::default();

    let first = manager.upsert(&mut surface, "rain_1h", "/a.tif", &legend, params);
    let second = manager.upsert(&mut surface, "rain_1h", "/a.tif", &legend, params);

    assert_eq!(surface.layer_count(), 1);
    assert_eq!(surface.added, 1);
    assert_eq!(manager.len(), 1);
    assert!(first.same_layer(&second));
}

#[test]
fn test_reupsert_swaps_source_and_style_in_place() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();
    let params = UpsertParams::default();

    let layer = manager.upsert(&mut surface, "rain_1h", "/t0.tif", &rain_legend(), params);

    let mut other_legend = rain_legend();
    other_legend.stops.push(LegendStop::new(10.0, "#D3ED51"));
    manager.upsert(&mut surface, "rain_1h", "/t1.tif", &other_legend, params);

    let state = layer.0.borrow();
    assert_eq!(state.source.as_ref().unwrap().url, "/t1.tif");
    assert_eq!(state.style.as_ref().unwrap().len(), 4);
    // Full swap, not an incremental patch.
    assert_eq!(state.source_swaps, 1);
    assert_eq!(state.style_swaps, 1);
    drop(state);
    assert_eq!(surface.layer_count(), 1);
}

#[test]
fn test_upsert_reapplies_opacity_and_z_index() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();
    let legend = rain_legend();

    let layer = manager.upsert(
        &mut surface,
        "rain_1h",
        "/a.tif",
        &legend,
        UpsertParams {
            opacity: 1.0,
            z_index: 1,
            ..UpsertParams::default()
        },
    );
    manager.upsert(
        &mut surface,
        "rain_1h",
        "/a.tif",
        &legend,
        UpsertParams {
            opacity: 0.4,
            z_index: 9,
            ..UpsertParams::default()
        },
    );

    let state = layer.0.borrow();
    assert_eq!(state.opacity, 0.4);
    assert_eq!(state.z_index, 9);
}

#[test]
fn test_interpolate_flag_reaches_source() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();

    let layer = manager.upsert(
        &mut surface,
        "rain_1h",
        "/a.tif",
        &rain_legend(),
        UpsertParams {
            interpolate: false,
            ..UpsertParams::default()
        },
    );
    assert!(!layer.0.borrow().source.as_ref().unwrap().interpolate);
}

#[test]
fn test_key_isolation() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();
    let legend = rain_legend();
    let params = UpsertParams::default();

    let a = manager.upsert(&mut surface, "A", "/a.tif", &legend, params);
    let b = manager.upsert(&mut surface, "B", "/b.tif", &legend, params);

    assert_eq!(surface.layer_count(), 2);
    assert!(!a.same_layer(&b));
    assert!(manager.get("A").unwrap().same_layer(&a));
    assert!(manager.get("B").unwrap().same_layer(&b));

    assert!(manager.remove(&mut surface, "A"));
    assert_eq!(surface.layer_count(), 1);
    assert!(manager.get("A").is_none());
    assert!(manager.get("B").unwrap().same_layer(&b));
}

#[test]
fn test_remove_absent_key_is_noop() {
    let mut surface = MockSurface::default();
    let mut manager: FactorLayerManager<MockSurface> = FactorLayerManager::new();
    assert!(!manager.remove(&mut surface, "missing"));
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn test_clear_removes_only_managed_layers() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();
    let legend = rain_legend();
    let params = UpsertParams::default();

    manager.upsert(&mut surface, "A", "/a.tif", &legend, params);
    manager.upsert(&mut surface, "B", "/b.tif", &legend, params);

    // A layer added behind the manager's back stays untouched.
    let foreign = surface.add_layer(LayerSpec {
        source: RasterSourceSpec::cog("/basemap.tif", true),
        style: factor_render::compile(&legend),
    });

    assert_eq!(manager.clear(&mut surface), 2);
    assert!(manager.is_empty());
    assert_eq!(surface.layer_count(), 1);
    assert!(surface.layers[0].same_layer(&foreign));

    // Clearing again removes nothing.
    assert_eq!(manager.clear(&mut surface), 0);
}

#[test]
fn test_manager_keys() {
    let mut surface = MockSurface::default();
    let mut manager = FactorLayerManager::new();
    let legend = rain_legend();
    let params = UpsertParams::default();

    manager.upsert(&mut surface, "A", "/a.tif", &legend, params);
    manager.upsert(&mut surface, "B", "/b.tif", &legend, params);

    let mut keys: Vec<_> = manager.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["A", "B"]);
    assert!(manager.contains_key("A"));
    assert!(!manager.contains_key("C"));
}

#[test]
fn test_upsert_params_from_render_options() {
    let render = factor_common::RenderOptions {
        opacity: 1.0,
        z_index: 1,
        ..Default::default()
    };
    let params = UpsertParams::from(render);
    assert_eq!(params.opacity, 1.0);
    assert_eq!(params.z_index, 1);
    assert!(params.interpolate);
}
