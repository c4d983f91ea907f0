use serde::Serialize;

/// Dark Carto basemap, used both as the map style and as the layer
/// control's basemap reference.
pub const BASEMAP_STYLE_URL: &str =
    "https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json";

/// Corner for the navigation, fullscreen, globe, layer, and point-cloud
/// controls.
pub const CONTROL_CORNER: &str = "top-right";

/// Corner for the scale control.
pub const SCALE_CORNER: &str = "bottom-left";

/// Id shared by the hidden satellite raster source and its layer.
pub const SATELLITE_LAYER_ID: &str = "google-satellite";

/// Map constructor options. Serializes to the exact camelCase option object
/// the map library expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub container: String,
    pub style: String,
    pub center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub max_pitch: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container: "map".to_string(),
            style: BASEMAP_STYLE_URL.to_string(),
            center: [0.0, 0.0],
            zoom: 2.0,
            pitch: 60.0,
            max_pitch: 85.0,
        }
    }
}

/// Layer-visibility control options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerControlOptions {
    pub collapsed: bool,
    pub basemap_style_url: String,
}

impl Default for LayerControlOptions {
    fn default() -> Self {
        Self {
            collapsed: true,
            basemap_style_url: BASEMAP_STYLE_URL.to_string(),
        }
    }
}

/// Point-cloud control options: panel appearance and default point styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LidarControlOptions {
    pub title: String,
    pub collapsed: bool,
    pub panel_width: u32,
    pub point_size: f64,
    pub opacity: f64,
    pub color_scheme: String,
}

impl Default for LidarControlOptions {
    fn default() -> Self {
        Self {
            title: "LiDAR Viewer".to_string(),
            collapsed: false,
            panel_width: 360,
            point_size: 2.0,
            opacity: 1.0,
            color_scheme: "elevation".to_string(),
        }
    }
}

/// The hidden satellite raster source registered on first map readiness.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSourceSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub tiles: Vec<String>,
    pub tile_size: u32,
    pub attribution: String,
}

impl Default for RasterSourceSpec {
    fn default() -> Self {
        Self {
            kind: "raster".to_string(),
            tiles: vec!["https://mt1.google.com/vt/lyrs=s&x={x}&y={y}&z={z}".to_string()],
            tile_size: 256,
            attribution: "&copy; Google".to_string(),
        }
    }
}

/// The satellite layer itself: added once, visibility off until the layer
/// control toggles it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterLayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub paint: RasterPaint,
    pub layout: LayerLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterPaint {
    #[serde(rename = "raster-opacity")]
    pub raster_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerLayout {
    pub visibility: String,
}

impl Default for RasterLayerSpec {
    fn default() -> Self {
        Self {
            id: SATELLITE_LAYER_ID.to_string(),
            kind: "raster".to_string(),
            source: SATELLITE_LAYER_ID.to_string(),
            paint: RasterPaint { raster_opacity: 1.0 },
            layout: LayerLayout {
                visibility: "none".to_string(),
            },
        }
    }
}
