//! wasm-bindgen bridge for browser use.
//!
//! The frontend passes the saved parameter JSON, picks a part and a
//! resolution, and reads back interleaved typed arrays (or STL bytes)
//! for rendering and download.

use crate::models;
use crate::params::{PlanterParams, Resolution};
use crate::trimesh::TriangleMesh;
use js_sys::{Float64Array, Object, Reflect, Uint32Array};
use wasm_bindgen::prelude::*;

fn parse_resolution(resolution: &str) -> Result<Resolution, JsValue> {
    match resolution {
        "preview" => Ok(Resolution::Preview),
        "export" => Ok(Resolution::Export),
        other => Err(JsValue::from_str(&format!(
            "unknown resolution '{other}', expected 'preview' or 'export'"
        ))),
    }
}

fn build_part(
    part: &str,
    params_json: &str,
    resolution: &str,
) -> Result<TriangleMesh, JsValue> {
    let params = PlanterParams::from_json(params_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let res = parse_resolution(resolution)?;

    match part {
        "top" => Ok(models::top::build(&params, res)),
        "bottom" => Ok(models::bottom::build(&params, res)),
        "connector" => Ok(models::connector::build(&params, res)),
        "insert" => Ok(models::insert::build(&params, res)),
        other => Err(JsValue::from_str(&format!("unknown part '{other}'"))),
    }
}

#[wasm_bindgen]
pub struct PlanterMeshJs {
    inner: TriangleMesh,
}

#[wasm_bindgen]
impl PlanterMeshJs {
    /// Build one planter part from parameter JSON.
    #[wasm_bindgen(js_name = build)]
    pub fn build(
        part: &str,
        params_json: &str,
        resolution: &str,
    ) -> Result<PlanterMeshJs, JsValue> {
        Ok(PlanterMeshJs {
            inner: build_part(part, params_json, resolution)?,
        })
    }

    /// Interleaved vertex positions (x,y,z)*.
    #[wasm_bindgen(js_name = positions)]
    pub fn positions(&self) -> Float64Array {
        Float64Array::from(self.inner.positions.as_slice())
    }

    /// Interleaved vertex normals (nx,ny,nz)*.
    #[wasm_bindgen(js_name = normals)]
    pub fn normals(&self) -> Float64Array {
        Float64Array::from(self.inner.normals.as_slice())
    }

    /// Triangle indices (u32).
    #[wasm_bindgen(js_name = indices)]
    pub fn indices(&self) -> Uint32Array {
        Uint32Array::from(self.inner.indices.as_slice())
    }

    #[wasm_bindgen(js_name = triangleCount)]
    pub fn triangle_count(&self) -> u32 {
        self.inner.triangle_count() as u32
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count() as u32
    }

    /// Positions, normals, and indices bundled into one object so the
    /// caller can hand them straight to a BufferGeometry.
    #[wasm_bindgen(js_name = toArrays)]
    pub fn to_arrays(&self) -> Result<Object, JsValue> {
        let obj = Object::new();
        Reflect::set(&obj, &"positions".into(), &self.positions().into())?;
        Reflect::set(&obj, &"normals".into(), &self.normals().into())?;
        Reflect::set(&obj, &"indices".into(), &self.indices().into())?;
        Ok(obj)
    }

    /// Binary STL ready for download.
    #[cfg(feature = "stl-io")]
    #[wasm_bindgen(js_name = toStlBinary)]
    pub fn to_stl_binary(&self) -> Result<Vec<u8>, JsValue> {
        crate::io::stl::write_binary(&self.inner)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[cfg(feature = "stl-io")]
    #[wasm_bindgen(js_name = toStlAscii)]
    pub fn to_stl_ascii(&self, name: &str) -> String {
        crate::io::stl::write_ascii(&self.inner, name)
    }
}

/// Default parameter JSON, for seeding the frontend form.
#[wasm_bindgen(js_name = defaultParams)]
pub fn default_params() -> Result<String, JsValue> {
    PlanterParams::default()
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate parameter JSON, returning an error message when rejected.
#[wasm_bindgen(js_name = validateParams)]
pub fn validate_params(params_json: &str) -> Result<(), JsValue> {
    PlanterParams::from_json(params_json)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
