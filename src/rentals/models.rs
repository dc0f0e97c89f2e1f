use serde::Deserialize;
use serde_json::Value;

// listing (provider JSON, one element of the top-level array)
//  ├── formattedAddress | address
//  ├── city, state, zipCode, county
//  ├── latitude, longitude
//  ├── price
//  ├── bedrooms, bathrooms
//  └── squareFootage
//
// Every field is kept as a raw JSON value. Providers send numbers as strings,
// nulls, zeros and junk; the normalizer decides what is usable.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub formatted_address: Option<Value>,
    pub address: Option<Value>,
    pub city: Option<Value>,
    pub state: Option<Value>,
    pub zip_code: Option<Value>,
    pub county: Option<Value>,

    pub latitude: Option<Value>,
    pub longitude: Option<Value>,

    pub price: Option<Value>,
    pub bedrooms: Option<Value>,
    pub bathrooms: Option<Value>,
    pub square_footage: Option<Value>,
}
