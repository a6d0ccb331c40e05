use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;

// quiz clients send ids both as numbers and as strings ("1"), so both are accepted
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(transparent)]
pub struct LooseId(#[serde(deserialize_with = "deserialize_number_from_string")] pub i64);

// anything that is not a page number falls back to the default page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.trim().parse().ok()))
}
