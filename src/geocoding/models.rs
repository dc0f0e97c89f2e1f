use serde::Deserialize;

// response
//  └── results[]
//       ├── formatted
//       └── geometry
//            ├── lat
//            └── lng

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
