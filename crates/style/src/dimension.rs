//! Page sizes and spacing.
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use tally_types::Size;

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn xy(x: f32, y: f32) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Points per unit for the suffixes a theme file may use.
const UNITS: [(&str, f32); 3] = [("pt", 1.0), ("in", 72.0), ("mm", 2.835)];

fn points(token: &str) -> Result<f32, String> {
    let (number, scale) = UNITS
        .iter()
        .find_map(|(suffix, scale)| token.strip_suffix(suffix).map(|n| (n, *scale)))
        .unwrap_or((token, 1.0));
    number
        .parse::<f32>()
        .map(|v| v * scale)
        .map_err(|_| format!("bad length '{token}'"))
}

impl std::str::FromStr for Margins {
    type Err = String;

    /// One value for every side, `vertical horizontal`, or all four
    /// clockwise from the top.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let sides = input
            .split_whitespace()
            .map(points)
            .collect::<Result<Vec<_>, _>>()?;
        match sides[..] {
            [v] => Ok(Margins::all(v)),
            [y, x] => Ok(Margins::xy(x, y)),
            [top, right, bottom, left] => Ok(Margins {
                top,
                right,
                bottom,
                left,
            }),
            _ => Err(format!("expected 1, 2 or 4 margin values, got {}", sides.len())),
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MarginsDef {
            Uniform(f32),
            Shorthand(String),
            Sides {
                #[serde(default)]
                top: f32,
                #[serde(default)]
                right: f32,
                #[serde(default)]
                bottom: f32,
                #[serde(default)]
                left: f32,
            },
        }

        match MarginsDef::deserialize(deserializer)? {
            MarginsDef::Uniform(v) => Ok(Margins::all(v)),
            MarginsDef::Shorthand(s) => s.parse().map_err(de::Error::custom),
            MarginsDef::Sides {
                top,
                right,
                bottom,
                left,
            } => Ok(Margins {
                top,
                right,
                bottom,
                left,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    A4,
    #[default]
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::new(*width, *height),
        }
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}
